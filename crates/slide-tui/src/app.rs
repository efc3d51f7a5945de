use crate::animations::WinScreen;
use crate::theme::Theme;
use crate::tween::{Geometry, TileAnimator};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use slide_core::{Board, MoveOutcome, Position, ReplayState};
use std::time::{Duration, Instant};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Solved celebration screen
    Win,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    NewGame,
}

/// Board sizes offered in the new-game menu.
pub const SIZE_CHOICES: [usize; 5] = [3, 4, 5, 6, 7];

/// The main application state
pub struct App {
    /// Current board (replaced wholesale on a new game)
    pub board: Board,
    /// Visual tile positions and in-flight slides
    pub animator: TileAnimator,
    /// Currently selected grid cell
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    theme_index: usize,
    /// Current menu state
    pub menu: MenuState,
    /// Selected menu item
    pub menu_selection: usize,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Solved celebration animation
    pub win_screen: WinScreen,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Player moves this game (replay steps not included)
    pub moves_made: usize,
    start_time: Instant,
    elapsed: Duration,
    term_size: (u16, u16),
}

fn theme_for(index: usize) -> Theme {
    match index % 3 {
        0 => Theme::dark(),
        1 => Theme::light(),
        _ => Theme::high_contrast(),
    }
}

impl App {
    pub fn new(board: Board, theme_index: usize, term_width: u16, term_height: u16) -> Self {
        let geometry = Geometry::fit(term_width, term_height, board.size());
        let animator = TileAnimator::new(geometry, &board);
        let menu_selection = SIZE_CHOICES
            .iter()
            .position(|&n| n == board.size())
            .unwrap_or(0);
        let mut win_screen = WinScreen::new();
        win_screen.resize(term_width, term_height);

        Self {
            board,
            animator,
            cursor: Position::new(0, 0),
            theme: theme_for(theme_index),
            theme_index,
            menu: MenuState::None,
            menu_selection,
            screen_state: ScreenState::Playing,
            win_screen,
            message: None,
            message_timer: 0,
            moves_made: 0,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            term_size: (term_width, term_height),
        }
    }

    /// Get the tick rate based on what is currently moving
    pub fn get_tick_rate(&self) -> Duration {
        if self.screen_state == ScreenState::Win
            || self.animator.is_animating()
            || self.board.replay_state() != ReplayState::Idle
        {
            Duration::from_millis(33) // 30 FPS while anything animates
        } else {
            Duration::from_millis(100)
        }
    }

    /// Time played this game; frozen once solved.
    pub fn elapsed(&self) -> Duration {
        if self.screen_state == ScreenState::Win || self.board.is_solved() {
            self.elapsed
        } else {
            self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Update animations, timers, and the replay debounce (called every
    /// tick with the time since the last one)
    pub fn tick(&mut self, dt: Duration) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Win {
            self.win_screen.update();
        }

        // Fire a due replay debounce, then feed finished slides back to
        // the engine as completion signals so a running replay advances.
        self.board.tick(&mut self.animator);
        let finished = self.animator.advance(dt);
        for _ in finished {
            self.board.notify_move_complete(&mut self.animator);
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if self.menu == MenuState::NewGame {
            return self.handle_menu_key(key);
        }
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Slide the selected tile
            KeyCode::Enter | KeyCode::Char(' ') => self.slide_at_cursor(),

            // New game menu
            KeyCode::Char('n') => {
                self.menu = MenuState::NewGame;
                self.menu_selection = SIZE_CHOICES
                    .iter()
                    .position(|&n| n == self.board.size())
                    .unwrap_or(0);
            }

            // Theme cycle
            KeyCode::Char('t') => {
                self.theme_index = (self.theme_index + 1) % 3;
                self.theme = theme_for(self.theme_index);
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                self.menu = MenuState::NewGame;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Quick restart with the same size
                self.new_game(self.board.size());
            }
            KeyCode::Esc => {
                // Go back to the (finished) board view
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = MenuState::None;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.menu_selection > 0 {
                    self.menu_selection -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_selection < SIZE_CHOICES.len() - 1 {
                    self.menu_selection += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let size = SIZE_CHOICES[self.menu_selection];
                self.menu = MenuState::None;
                self.new_game(size);
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Handle a mouse event (click-to-slide)
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.screen_state != ScreenState::Playing || self.menu != MenuState::None {
            return;
        }
        if let Some(pos) = self.animator.geometry().cell_at(mouse.column, mouse.row) {
            self.cursor = pos;
            if let Some(tile) = self.board.tile_at(pos.cell(self.board.size())) {
                self.try_slide(tile.face());
            }
        }
    }

    /// The host's geometry signal: refit the board and let the engine
    /// schedule a replay if there is history to resynchronize.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.term_size = (width, height);
        self.win_screen.resize(width, height);
        self.animator
            .set_geometry(Geometry::fit(width, height, self.board.size()));
        if self.board.on_layout_changed() {
            // The engine went back to the home arrangement; re-home the
            // sprites so the replay visibly walks them forward again.
            self.animator.snap_to_board(&self.board);
        }
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = (self.board.size() - 1) as i32;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    fn slide_at_cursor(&mut self) {
        let cell = self.cursor.cell(self.board.size());
        if let Some(tile) = self.board.tile_at(cell) {
            self.try_slide(tile.face());
        }
    }

    fn try_slide(&mut self, face: u8) {
        if self.board.replay_state() != ReplayState::Idle {
            self.show_message("Re-syncing tiles...");
            return;
        }
        match self.board.apply_move(face, &mut self.animator) {
            // Most presses land on tiles that cannot move; stay quiet.
            MoveOutcome::Rejected => {}
            MoveOutcome::Applied { solved } => {
                self.moves_made += 1;
                if solved {
                    self.elapsed = self.start_time.elapsed();
                    self.screen_state = ScreenState::Win;
                    self.win_screen.reset();
                }
            }
        }
    }

    /// Replace the board wholesale and start over.
    fn new_game(&mut self, size: usize) {
        match Board::new(size) {
            Ok(board) => {
                let geometry = Geometry::fit(self.term_size.0, self.term_size.1, size);
                self.animator = TileAnimator::new(geometry, &board);
                self.board = board;
                self.cursor = Position::new(0, 0);
                self.moves_made = 0;
                self.start_time = Instant::now();
                self.elapsed = Duration::ZERO;
                self.screen_state = ScreenState::Playing;
                self.show_message(&format!("New {}x{} game", size, size));
            }
            Err(e) => self.show_message(&e.to_string()),
        }
    }
}
