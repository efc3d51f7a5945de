use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::solvability::is_solvable;

/// Shuffled-board generator.
///
/// Produces a uniform random permutation of the tile faces and re-rolls
/// until the parity rule accepts it for a blank in the bottom-right
/// corner. Half of all permutations are solvable, so this terminates in
/// two attempts on average.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a solvable layout for a `size` x `size` board.
    ///
    /// Returns the face values for cells `0..size*size-2` in row-major
    /// order; the last cell is the blank. Expects `2 <= size <= 16`
    /// (callers validate, see [`crate::Board::new`]).
    pub fn generate(&mut self, size: usize) -> Vec<u8> {
        let tile_count = size * size - 1;
        let mut faces: Vec<u8> = (1..=tile_count as u8).collect();

        loop {
            faces.shuffle(&mut self.rng);
            let tiles: Vec<u16> = faces.iter().map(|&f| f as u16).collect();
            // The blank starts bottom-right, i.e. on the first row from
            // the bottom.
            if is_solvable(&tiles, size, 1) {
                return faces;
            }
        }
    }
}
