use thiserror::Error;

use crate::board::MAX_SIZE;

/// Construction-time failures.
///
/// Rejected moves are not errors (see [`crate::MoveOutcome`]); only a
/// misconfigured board refuses to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A 1x1 (or smaller) board has no tile to slide.
    #[error("board size must be at least 2, got {0}")]
    SizeTooSmall(usize),

    /// Tile faces are stored as `u8`, which caps the edge length.
    #[error("board size must be at most {}, got {}", MAX_SIZE, .0)]
    SizeTooLarge(usize),

    /// An explicit layout must hold every face `1..=size*size-1` exactly once.
    #[error("layout must contain each tile 1..={0} exactly once")]
    InvalidLayout(usize),

    /// An explicit layout that the parity rule proves unreachable.
    #[error("layout is not solvable")]
    UnsolvableLayout,
}
