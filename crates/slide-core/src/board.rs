use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BoardError;
use crate::generator::Generator;
use crate::replay::{ReplayScheduler, ReplayState};
use crate::solvability::{is_solvable, is_solved};

/// Largest supported board edge; faces are stored as `u8`.
pub const MAX_SIZE: usize = 16;

/// A grid coordinate. Cells are indexed row-major: `cell = row * width + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_cell(cell: usize, width: usize) -> Self {
        Self {
            row: cell / width,
            col: cell % width,
        }
    }

    pub fn cell(&self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// The four single-step slides, named for the tile's motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// One tile on the board. Owned by the [`Board`]; the face value doubles
/// as the tile's identity.
#[derive(Debug, Clone)]
pub struct Tile {
    face: u8,
    cell: usize,
    home: usize,
}

impl Tile {
    /// The number printed on the tile, `1..=size*size-1`.
    pub fn face(&self) -> u8 {
        self.face
    }

    /// Current logical cell.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// The cell this tile started in; layout resets return it here.
    pub fn home(&self) -> usize {
        self.home
    }

    pub fn position(&self, width: usize) -> Position {
        Position::from_cell(self.cell, width)
    }
}

/// A recorded move: which tile went to which cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub tile: u8,
    pub target: usize,
}

/// Outcome of a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The tile is not next to the empty cell; nothing changed.
    Rejected,
    /// The tile slid into the empty cell.
    Applied { solved: bool },
}

/// The host's animation hook.
///
/// The engine calls [`MoveRenderer::animate_move`] for live moves and
/// replay steps alike. The host must call
/// [`Board::notify_move_complete`] exactly once when the slide finishes;
/// replay progress depends on it.
pub trait MoveRenderer {
    fn animate_move(&mut self, tile: u8, target: Position);
}

/// Authoritative puzzle state: tile positions, the empty cell, and the
/// recorded move history with its replay scheduler.
///
/// One `Board` lives per puzzle; picking a new size replaces it
/// wholesale, history and all.
#[derive(Debug)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
    empty_cell: usize,
    replay: ReplayScheduler,
}

impl Board {
    /// Create a freshly shuffled, guaranteed-solvable board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_generator(size, &mut Generator::new())
    }

    /// Create a board from a caller-owned generator (seed it for
    /// reproducible layouts).
    pub fn with_generator(size: usize, generator: &mut Generator) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        let faces = generator.generate(size);
        Ok(Self::from_faces(size, &faces))
    }

    /// Create a board from an explicit layout: face values for cells
    /// `0..size*size-2` in row-major order, blank in the last cell.
    pub fn from_layout(size: usize, faces: &[u8]) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        let tile_count = size * size - 1;
        if faces.len() != tile_count {
            return Err(BoardError::InvalidLayout(tile_count));
        }
        let mut seen = vec![false; tile_count + 1];
        for &face in faces {
            let face = face as usize;
            if face == 0 || face > tile_count || seen[face] {
                return Err(BoardError::InvalidLayout(tile_count));
            }
            seen[face] = true;
        }
        let tiles: Vec<u16> = faces.iter().map(|&f| f as u16).collect();
        if !is_solvable(&tiles, size, 1) {
            return Err(BoardError::UnsolvableLayout);
        }
        Ok(Self::from_faces(size, faces))
    }

    fn check_size(size: usize) -> Result<(), BoardError> {
        if size < 2 {
            Err(BoardError::SizeTooSmall(size))
        } else if size > MAX_SIZE {
            Err(BoardError::SizeTooLarge(size))
        } else {
            Ok(())
        }
    }

    fn from_faces(size: usize, faces: &[u8]) -> Self {
        let tiles = faces
            .iter()
            .enumerate()
            .map(|(cell, &face)| Tile {
                face,
                cell,
                home: cell,
            })
            .collect();
        Self {
            size,
            tiles,
            empty_cell: size * size - 1,
            replay: ReplayScheduler::default(),
        }
    }

    /// Board edge length N.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, face: u8) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.face == face)
    }

    /// The tile currently occupying `cell`, if any.
    pub fn tile_at(&self, cell: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.cell == cell)
    }

    /// The one cell not occupied by a tile.
    pub fn empty_cell(&self) -> usize {
        self.empty_cell
    }

    pub fn replay_state(&self) -> ReplayState {
        self.replay.state()
    }

    /// Moves recorded since the last replay snapshot, oldest first.
    pub fn pending_moves(&self) -> &[MoveRecord] {
        self.replay.pending()
    }

    /// Whether the tiles read 1, 2, 3, ... with the blank bottom-right.
    pub fn is_solved(&self) -> bool {
        is_solved(&self.flatten())
    }

    /// Flatten to the sequence the oracle expects: face values at tile
    /// cells, the `size*size` sentinel at the empty cell.
    fn flatten(&self) -> Vec<u16> {
        let area = self.size * self.size;
        let mut seq = vec![area as u16; area];
        for tile in &self.tiles {
            seq[tile.cell] = tile.face as u16;
        }
        seq
    }

    /// Which way `face` could slide, if it sits next to the empty cell.
    ///
    /// Edge checks go through row/column coordinates, never raw index
    /// arithmetic, so a tile on the rightmost column cannot "wrap" left
    /// onto the next row. At most one direction can be legal.
    pub fn propose_move(&self, face: u8) -> Option<Direction> {
        let tile = self.tile(face)?;
        let n = self.size;
        let cell = tile.cell;
        let pos = Position::from_cell(cell, n);

        if pos.row > 0 && cell - n == self.empty_cell {
            Some(Direction::Up)
        } else if pos.col < n - 1 && cell + 1 == self.empty_cell {
            Some(Direction::Right)
        } else if pos.row < n - 1 && cell + n == self.empty_cell {
            Some(Direction::Down)
        } else if pos.col > 0 && cell - 1 == self.empty_cell {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Apply a proposed move: swap the tile with the empty cell, record
    /// it, and ask the renderer to animate the slide.
    ///
    /// The sole mutator of tile positions. An illegal proposal is a
    /// silent no-op — most clicks land on tiles that cannot move.
    pub fn apply_move(&mut self, face: u8, renderer: &mut dyn MoveRenderer) -> MoveOutcome {
        if self.propose_move(face).is_none() {
            return MoveOutcome::Rejected;
        }

        let target = self.empty_cell;
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.face == face) {
            self.empty_cell = tile.cell;
            tile.cell = target;
        }

        self.replay.record(MoveRecord { tile: face, target });
        renderer.animate_move(face, Position::from_cell(target, self.size));
        MoveOutcome::Applied {
            solved: self.is_solved(),
        }
    }

    /// Signal that tile screen geometry may have changed (resize,
    /// re-layout).
    ///
    /// When a replay gets scheduled, every tile returns to its home cell
    /// and the blank to the last cell — the arrangement the history
    /// replays from — and the call returns true so the host can re-home
    /// its visuals too. The signal is ignored while a replay is running,
    /// and when there is no history to resynchronize.
    pub fn on_layout_changed(&mut self) -> bool {
        self.on_layout_changed_at(Instant::now())
    }

    /// Explicit-clock variant of [`Board::on_layout_changed`].
    pub fn on_layout_changed_at(&mut self, now: Instant) -> bool {
        if !self.replay.on_layout_change(now) {
            return false;
        }
        for tile in &mut self.tiles {
            tile.cell = tile.home;
        }
        self.empty_cell = self.size * self.size - 1;
        true
    }

    /// Drive the debounce timer; call once per host tick. Issues the
    /// first replay step when the delay has elapsed.
    pub fn tick(&mut self, renderer: &mut dyn MoveRenderer) {
        self.tick_at(Instant::now(), renderer)
    }

    /// Explicit-clock variant of [`Board::tick`].
    pub fn tick_at(&mut self, now: Instant, renderer: &mut dyn MoveRenderer) {
        if self.replay.fire_due(now) {
            self.advance_replay(renderer);
        }
    }

    /// The host's animation-completion signal. Continues a running
    /// replay with the next queued move; outside a replay it is a no-op.
    pub fn notify_move_complete(&mut self, renderer: &mut dyn MoveRenderer) {
        if self.replay.state() == ReplayState::Replaying {
            self.advance_replay(renderer);
        }
    }

    /// Re-apply queued records through the validated move path — each one
    /// re-enters the pending history, so the next layout change replays
    /// the full history again. A record that no longer validates is
    /// skipped rather than stalling the queue.
    fn advance_replay(&mut self, renderer: &mut dyn MoveRenderer) {
        while let Some(step) = self.replay.next_step() {
            if self.apply_move(step.tile, renderer) != MoveOutcome::Rejected {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::REPLAY_DEBOUNCE;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingRenderer {
        slides: Vec<(u8, Position)>,
    }

    impl MoveRenderer for RecordingRenderer {
        fn animate_move(&mut self, tile: u8, target: Position) {
            self.slides.push((tile, target));
        }
    }

    fn solved_board(size: usize) -> Board {
        let faces: Vec<u8> = (1..=(size * size - 1) as u8).collect();
        Board::from_layout(size, &faces).unwrap()
    }

    fn arrangement(board: &Board) -> (Vec<(u8, usize)>, usize) {
        let mut cells: Vec<(u8, usize)> = board.tiles().iter().map(|t| (t.face(), t.cell())).collect();
        cells.sort_unstable();
        (cells, board.empty_cell())
    }

    #[test]
    fn construction_rejects_bad_sizes() {
        assert_eq!(Board::new(0).unwrap_err(), BoardError::SizeTooSmall(0));
        assert_eq!(Board::new(1).unwrap_err(), BoardError::SizeTooSmall(1));
        assert_eq!(Board::new(17).unwrap_err(), BoardError::SizeTooLarge(17));
        assert!(Board::new(2).is_ok());
    }

    #[test]
    fn from_layout_validates_the_permutation() {
        assert_eq!(
            Board::from_layout(3, &[1, 2, 3]).unwrap_err(),
            BoardError::InvalidLayout(8)
        );
        assert_eq!(
            Board::from_layout(3, &[1, 1, 3, 4, 5, 6, 7, 8]).unwrap_err(),
            BoardError::InvalidLayout(8)
        );
        assert_eq!(
            Board::from_layout(3, &[1, 2, 3, 4, 5, 6, 7, 9]).unwrap_err(),
            BoardError::InvalidLayout(8)
        );
        // A single swap flips parity and becomes unreachable.
        assert_eq!(
            Board::from_layout(3, &[2, 1, 3, 4, 5, 6, 7, 8]).unwrap_err(),
            BoardError::UnsolvableLayout
        );
    }

    #[test]
    fn literal_layout_loads_and_is_not_solved() {
        let board = Board::from_layout(3, &[8, 4, 3, 2, 6, 1, 7, 5]).unwrap();
        assert!(!board.is_solved());
        assert_eq!(board.empty_cell(), 8);
    }

    #[test]
    fn generated_boards_are_well_formed() {
        let mut generator = Generator::with_seed(9);
        for size in 2..=5 {
            let board = Board::with_generator(size, &mut generator).unwrap();
            // Cells and blank cover 0..size*size exactly once.
            let mut cells: Vec<usize> = board.tiles().iter().map(|t| t.cell()).collect();
            cells.push(board.empty_cell());
            cells.sort_unstable();
            let expected: Vec<usize> = (0..size * size).collect();
            assert_eq!(cells, expected);
        }
    }

    #[test]
    fn proposals_on_a_solved_board() {
        let board = solved_board(3);
        // Blank is at cell 8: only tile 6 (above it) and tile 8 (left of
        // it) may slide.
        assert_eq!(board.propose_move(6), Some(Direction::Down));
        assert_eq!(board.propose_move(8), Some(Direction::Right));
        for face in [1, 2, 3, 4, 5, 7] {
            assert_eq!(board.propose_move(face), None);
        }
    }

    #[test]
    fn at_most_one_direction_per_tile() {
        let board = Board::from_layout(3, &[8, 4, 3, 2, 6, 1, 7, 5]).unwrap();
        let movable: Vec<u8> = (1..=8)
            .filter(|&f| board.propose_move(f).is_some())
            .collect();
        // The blank (cell 8, a corner) has exactly two orthogonal
        // neighbors, and their directions differ.
        assert_eq!(movable.len(), 2);
        let dirs: Vec<Direction> = movable
            .iter()
            .filter_map(|&f| board.propose_move(f))
            .collect();
        assert_ne!(dirs[0], dirs[1]);
    }

    #[test]
    fn no_wraparound_across_rows() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        // Walk the blank to cell 3 (row 1, col 0).
        for face in [6, 5, 4] {
            assert_ne!(board.apply_move(face, &mut renderer), MoveOutcome::Rejected);
        }
        assert_eq!(board.empty_cell(), 3);
        // Tile 3 sits at cell 2 (row 0, col 2): index arithmetic says
        // 2 + 1 == 3, but a rightward slide would wrap to the next row.
        assert_eq!(board.tile(3).unwrap().cell(), 2);
        assert_eq!(board.propose_move(3), None);
    }

    #[test]
    fn apply_swaps_tile_and_blank_exactly() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();

        let outcome = board.apply_move(6, &mut renderer);
        assert_eq!(outcome, MoveOutcome::Applied { solved: false });
        assert_eq!(board.tile(6).unwrap().cell(), 8);
        assert_eq!(board.empty_cell(), 5);
        assert_eq!(renderer.slides, vec![(6, Position::new(2, 2))]);
        assert_eq!(
            board.pending_moves(),
            &[MoveRecord { tile: 6, target: 8 }][..]
        );
        // Every other tile stayed put.
        for face in [1, 2, 3, 4, 5, 7, 8] {
            assert_eq!(
                board.tile(face).unwrap().cell(),
                (face - 1) as usize
            );
        }
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        let before = arrangement(&board);

        assert_eq!(board.apply_move(1, &mut renderer), MoveOutcome::Rejected);
        assert_eq!(arrangement(&board), before);
        assert!(board.pending_moves().is_empty());
        assert!(renderer.slides.is_empty());
    }

    #[test]
    fn moving_back_re_solves() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();

        assert_eq!(
            board.apply_move(6, &mut renderer),
            MoveOutcome::Applied { solved: false }
        );
        assert_eq!(
            board.apply_move(6, &mut renderer),
            MoveOutcome::Applied { solved: true }
        );
        assert!(board.is_solved());
    }

    #[test]
    fn reverse_moves_restore_the_solved_state() {
        let mut board = solved_board(4);
        let mut renderer = RecordingRenderer::default();

        let forward = [12, 11, 15, 14, 10];
        let mut directions = Vec::new();
        for face in forward {
            directions.push(board.propose_move(face).unwrap());
            board.apply_move(face, &mut renderer);
        }
        assert!(!board.is_solved());

        for (face, dir) in forward.iter().rev().zip(directions.iter().rev()) {
            assert_eq!(board.propose_move(*face), Some(dir.opposite()));
            board.apply_move(*face, &mut renderer);
        }
        assert!(board.is_solved());
    }

    #[test]
    fn layout_change_replays_history_to_the_same_arrangement() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        for face in [6, 5, 4] {
            board.apply_move(face, &mut renderer);
        }
        let before = arrangement(&board);

        let t0 = Instant::now();
        assert!(board.on_layout_changed_at(t0));
        assert_eq!(board.replay_state(), ReplayState::Debouncing);
        // The engine snapped back to the home arrangement.
        for tile in board.tiles() {
            assert_eq!(tile.cell(), tile.home());
        }
        assert_eq!(board.empty_cell(), 8);

        // Nothing happens before the debounce elapses.
        let mut replayer = RecordingRenderer::default();
        board.tick_at(t0 + Duration::from_millis(100), &mut replayer);
        assert!(replayer.slides.is_empty());

        board.tick_at(t0 + REPLAY_DEBOUNCE, &mut replayer);
        assert_eq!(board.replay_state(), ReplayState::Replaying);
        assert_eq!(replayer.slides.len(), 1);

        board.notify_move_complete(&mut replayer);
        board.notify_move_complete(&mut replayer);
        assert_eq!(board.replay_state(), ReplayState::Replaying);
        board.notify_move_complete(&mut replayer);

        assert_eq!(board.replay_state(), ReplayState::Idle);
        assert_eq!(replayer.slides.len(), 3);
        assert_eq!(
            replayer.slides,
            vec![
                (6, Position::new(2, 2)),
                (5, Position::new(1, 2)),
                (4, Position::new(1, 1)),
            ]
        );
        assert_eq!(arrangement(&board), before);
        // Replayed moves re-recorded: ready for the next layout change.
        assert_eq!(board.pending_moves().len(), 3);
    }

    #[test]
    fn layout_signals_coalesce_within_the_window() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        board.apply_move(6, &mut renderer);

        let t0 = Instant::now();
        assert!(board.on_layout_changed_at(t0));
        assert!(board.on_layout_changed_at(t0 + Duration::from_millis(300)));

        let mut replayer = RecordingRenderer::default();
        board.tick_at(t0 + REPLAY_DEBOUNCE, &mut replayer);
        assert!(replayer.slides.is_empty());
        assert_eq!(board.replay_state(), ReplayState::Debouncing);

        board.tick_at(t0 + Duration::from_millis(300) + REPLAY_DEBOUNCE, &mut replayer);
        assert_eq!(replayer.slides.len(), 1);
    }

    #[test]
    fn layout_change_mid_replay_is_ignored() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        board.apply_move(6, &mut renderer);

        let t0 = Instant::now();
        assert!(board.on_layout_changed_at(t0));
        let mut replayer = RecordingRenderer::default();
        board.tick_at(t0 + REPLAY_DEBOUNCE, &mut replayer);
        assert_eq!(board.replay_state(), ReplayState::Replaying);

        // Even on the final in-flight step the signal must not land.
        assert!(!board.on_layout_changed_at(t0 + REPLAY_DEBOUNCE * 2));
        assert_eq!(board.replay_state(), ReplayState::Replaying);

        board.notify_move_complete(&mut replayer);
        assert_eq!(board.replay_state(), ReplayState::Idle);
    }

    #[test]
    fn layout_change_with_no_history_is_a_no_op() {
        let mut board = solved_board(3);
        assert!(!board.on_layout_changed_at(Instant::now()));
        assert_eq!(board.replay_state(), ReplayState::Idle);
    }

    #[test]
    fn player_moves_during_replay_queue_separately() {
        let mut board = solved_board(3);
        let mut renderer = RecordingRenderer::default();
        for face in [6, 5, 4] {
            board.apply_move(face, &mut renderer);
        }

        let t0 = Instant::now();
        board.on_layout_changed_at(t0);
        let mut replayer = RecordingRenderer::default();
        board.tick_at(t0 + REPLAY_DEBOUNCE, &mut replayer);

        // First replay step put tile 6 at cell 8 with the blank at 5;
        // a live move on tile 6 is legal right now.
        assert_eq!(board.replay.queue_len(), 2);
        let pending_before = board.pending_moves().len();
        assert_ne!(board.apply_move(6, &mut replayer), MoveOutcome::Rejected);
        assert_eq!(board.pending_moves().len(), pending_before + 1);
        // The in-flight snapshot is untouched.
        assert_eq!(board.replay.queue_len(), 2);
    }
}
