//! Core engine for an N×N sliding-tile puzzle.
//!
//! The engine owns the logical board: a shuffled, guaranteed-solvable
//! permutation of numbered tiles around one empty cell. It validates
//! player moves against the empty cell, detects the solved state by
//! inversion counting, and keeps rendered tile positions aligned with
//! logical positions across layout changes by replaying the recorded
//! move history through the host's animation hook.
//!
//! Rendering, input mapping, and window management belong to the host:
//! it supplies a [`MoveRenderer`], reports animation completions via
//! [`Board::notify_move_complete`], and signals geometry changes via
//! [`Board::on_layout_changed`]. Everything here is single-threaded and
//! tick-driven; nothing blocks.

mod board;
mod error;
mod generator;
mod replay;
mod solvability;

pub use board::{
    Board, Direction, MoveOutcome, MoveRecord, MoveRenderer, Position, Tile, MAX_SIZE,
};
pub use error::BoardError;
pub use generator::Generator;
pub use replay::{ReplayState, REPLAY_DEBOUNCE};
pub use solvability::{count_inversions, is_solvable, is_solved};
