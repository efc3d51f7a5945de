use crate::app::{App, MenuState, ScreenState, SIZE_CHOICES};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    render_header(stdout, app)?;
    render_board(stdout, app)?;

    if app.screen_state == ScreenState::Win {
        render_win_overlay(stdout, app, term_width, term_height)?;
    }

    if app.menu == MenuState::NewGame {
        render_menu(stdout, app, term_width, term_height)?;
    }

    render_controls(stdout, app, term_height)?;
    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, term_height)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_header(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let n = app.board.size();
    execute!(
        stdout,
        MoveTo(2, 0),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print("SLIDE"),
        SetForegroundColor(theme.info),
        Print(format!(
            "  {}x{}   moves {}   time {}",
            n,
            n,
            app.moves_made,
            app.elapsed_string()
        ))
    )?;
    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let geom = app.animator.geometry();
    let n = app.board.size();

    // Frame around the board area.
    let left = geom.origin_x.saturating_sub(1);
    let top = geom.origin_y.saturating_sub(1);
    let right = geom.origin_x + geom.board_width();
    let bottom = geom.origin_y + geom.board_height();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border)
    )?;
    execute!(stdout, MoveTo(left, top), Print("┌"))?;
    execute!(stdout, MoveTo(right, top), Print("┐"))?;
    execute!(stdout, MoveTo(left, bottom), Print("└"))?;
    execute!(stdout, MoveTo(right, bottom), Print("┘"))?;
    let horizontal = "─".repeat((right - left).saturating_sub(1) as usize);
    execute!(stdout, MoveTo(left + 1, top), Print(&horizontal))?;
    execute!(stdout, MoveTo(left + 1, bottom), Print(&horizontal))?;
    for y in top + 1..bottom {
        execute!(stdout, MoveTo(left, y), Print("│"))?;
        execute!(stdout, MoveTo(right, y), Print("│"))?;
    }

    // Empty-cell marker at its logical spot.
    let empty = slide_core::Position::from_cell(app.board.empty_cell(), n);
    let (ex, ey) = geom.screen_origin(empty.row as f32, empty.col as f32);
    execute!(
        stdout,
        MoveTo(
            ex + geom.cell_width / 2,
            ey + geom.cell_height.saturating_sub(1) / 2
        ),
        SetForegroundColor(theme.empty),
        Print("·")
    )?;

    // Settled tiles first, the sliding one on top.
    let sliding = app.animator.sliding_face();
    for tile in app.board.tiles() {
        if Some(tile.face()) != sliding {
            draw_tile(stdout, app, tile.face())?;
        }
    }
    if let Some(face) = sliding {
        draw_tile(stdout, app, face)?;
    }

    Ok(())
}

fn draw_tile(stdout: &mut io::Stdout, app: &App, face: u8) -> io::Result<()> {
    let theme = &app.theme;
    let geom = app.animator.geometry();
    let (x, y) = app.animator.screen_pos(face);
    let w = geom.cell_width.saturating_sub(1).max(1);
    let h = geom.cell_height.saturating_sub(1).max(1);

    let n = app.board.size();
    let selected = app
        .board
        .tile(face)
        .map(|t| t.cell() == app.cursor.cell(n))
        .unwrap_or(false);
    let bg = if selected { theme.selected_bg } else { theme.tile_bg };

    execute!(stdout, SetBackgroundColor(bg))?;
    let blank = " ".repeat(w as usize);
    for dy in 0..h {
        execute!(stdout, MoveTo(x, y + dy), Print(&blank))?;
    }

    let label = face.to_string();
    let label_x = x + w.saturating_sub(label.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(label_x, y + h / 2),
        SetForegroundColor(theme.tile_face),
        Print(label)
    )?;
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, term_height: u16) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(2, term_height.saturating_sub(1)),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print("arrows select · enter slide · click slide · "),
        SetForegroundColor(theme.key),
        Print("n"),
        SetForegroundColor(theme.info),
        Print(" new · "),
        SetForegroundColor(theme.key),
        Print("t"),
        SetForegroundColor(theme.info),
        Print(" theme · "),
        SetForegroundColor(theme.key),
        Print("q"),
        SetForegroundColor(theme.info),
        Print(" quit")
    )?;
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let x = term_width.saturating_sub(msg.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, term_height.saturating_sub(2)),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(app.theme.success),
        Print(msg)
    )?;
    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let width: u16 = 24;
    let height = SIZE_CHOICES.len() as u16 + 4;
    let x = term_width.saturating_sub(width) / 2;
    let y = term_height.saturating_sub(height) / 2;

    draw_panel(stdout, app, x, y, width, height)?;

    execute!(
        stdout,
        MoveTo(x + 2, y + 1),
        SetForegroundColor(theme.key),
        Print("NEW GAME")
    )?;
    for (i, size) in SIZE_CHOICES.iter().enumerate() {
        let row = y + 2 + i as u16;
        let bg = if i == app.menu_selection {
            theme.selected_bg
        } else {
            theme.bg
        };
        execute!(
            stdout,
            MoveTo(x + 2, row),
            SetBackgroundColor(bg),
            SetForegroundColor(theme.fg),
            Print(format!(" {size} x {size}{:width$}", "", width = 13))
        )?;
    }
    execute!(
        stdout,
        MoveTo(x + 2, y + height - 1),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print("enter start · esc back")
    )?;
    Ok(())
}

fn render_win_overlay(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    for p in app.win_screen.particles() {
        if p.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(p.color),
                Print(p.char)
            )?;
        }
    }

    let message = app.win_screen.current_message();
    let stats = format!("{} moves in {}", app.moves_made, app.elapsed_string());
    let hint = "enter play again · n new size · q quit";
    let width = (message.len().max(stats.len()).max(hint.len()) + 6) as u16;
    let height: u16 = 7;
    let x = term_width.saturating_sub(width) / 2;
    let y = term_height.saturating_sub(height) / 2;

    draw_panel(stdout, app, x, y, width, height)?;

    let center = |s: &str| x + (width.saturating_sub(s.len() as u16)) / 2;
    execute!(
        stdout,
        MoveTo(center(message), y + 2),
        SetForegroundColor(theme.success),
        Print(message),
        MoveTo(center(&stats), y + 3),
        SetForegroundColor(theme.fg),
        Print(&stats),
        MoveTo(center(hint), y + 5),
        SetForegroundColor(theme.info),
        Print(hint)
    )?;
    Ok(())
}

/// Filled, bordered panel for overlays.
fn draw_panel(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border)
    )?;
    let inner = " ".repeat(width.saturating_sub(2) as usize);
    let horizontal = "─".repeat(width.saturating_sub(2) as usize);
    execute!(
        stdout,
        MoveTo(x, y),
        Print(format!("┌{horizontal}┐"))
    )?;
    for dy in 1..height.saturating_sub(1) {
        execute!(
            stdout,
            MoveTo(x, y + dy),
            Print(format!("│{inner}│"))
        )?;
    }
    execute!(
        stdout,
        MoveTo(x, y + height.saturating_sub(1)),
        Print(format!("└{horizontal}┘"))
    )?;
    Ok(())
}
