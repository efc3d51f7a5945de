mod animations;
mod app;
mod render;
mod theme;
mod tween;

use app::{App, AppAction};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use slide_core::{Board, MAX_SIZE};
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "slide", about = "Sliding tile puzzle for the terminal")]
struct Cli {
    /// Board edge length (2-16)
    #[arg(short, long, default_value_t = 4)]
    size: usize,

    /// Color theme
    #[arg(short, long, value_enum, default_value = "dark")]
    theme: ThemeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    HighContrast,
}

impl ThemeArg {
    fn index(self) -> usize {
        match self {
            ThemeArg::Dark => 0,
            ThemeArg::Light => 1,
            ThemeArg::HighContrast => 2,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Reject a bad size before touching the terminal.
    let board = match Board::new(cli.size) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("error: {e} (valid sizes are 2-{MAX_SIZE})");
            std::process::exit(2);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, board, cli.theme.index());

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, board: Board, theme_index: usize) -> io::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(board, theme_index, width, height);
    let mut last_tick = Instant::now();

    loop {
        // Faster ticks while slides or celebrations are running
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with a timeout so animations keep moving
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        AppAction::Continue => {}
                        AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(w, h) => app.on_resize(w, h),
                _ => {}
            }
        }

        // Tick animations, timers, and the replay debounce
        if last_tick.elapsed() >= tick_rate {
            app.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }
    }

    Ok(())
}
