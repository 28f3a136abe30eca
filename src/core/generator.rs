//! Generator module - match-free board generation and tile refill
//!
//! Owns the session RNG: one generator per session, and every random tile
//! the session ever sees flows through it.
//!
//! The fill rule excludes any candidate that would complete a run of 3 with
//! the contiguous identical tiles to its left or above. If the filter leaves
//! no candidate, it degrades to an unfiltered pick ("no pre-existing match"
//! is best-effort at pick time); a post-fill scrub pass then removes any
//! matches that slipped through until the board is clean.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::types::{TileType, GRID_SIZE, PALETTE};

#[derive(Debug, Clone)]
pub struct Generator {
    rng: SimpleRng,
}

impl Generator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state (for restarting a session with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Borrow the RNG for decisions outside tile picking (power-up grants).
    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    /// Pick a tile for (row, col), avoiding an immediate match when possible.
    pub fn pick_tile(&mut self, board: &Board, row: u8, col: u8) -> TileType {
        let mut candidates: ArrayVec<TileType, { PALETTE.len() }> = ArrayVec::new();
        for tile in PALETTE {
            if !board.causes_match(row, col, tile) {
                candidates.push(tile);
            }
        }

        if candidates.is_empty() {
            // Fallback: unfiltered pick; the scrub pass restores the
            // invariant afterwards.
            *self.rng.pick(&PALETTE)
        } else {
            *self.rng.pick(&candidates)
        }
    }

    /// Produce a fully occupied board with no pre-existing matches.
    pub fn generate(&mut self) -> Board {
        let mut board = Board::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let tile = self.pick_tile(&board, row, col);
                board.set(row as i8, col as i8, Some(tile));
            }
        }
        self.scrub(&mut board);
        board
    }

    /// Remove any matches and refill until the board is clean.
    ///
    /// Safety net for the fallback path of [`pick_tile`]. Terminates because
    /// each pass replaces matched cells with filtered picks, and the filter
    /// only fails on boards the next pass cleans up.
    pub fn scrub(&mut self, board: &mut Board) {
        loop {
            let matches = board.find_matches();
            if matches.is_empty() {
                return;
            }
            for set in &matches {
                board.clear_cells(set);
            }
            self.refill(board);
        }
    }

    /// Refill every empty cell top-to-bottom using the filtered pick rule.
    ///
    /// Callers are expected to have collapsed columns first; this fills
    /// whatever emptiness remains.
    pub fn refill(&mut self, board: &mut Board) {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if board.get(row as i8, col as i8) == Some(None) {
                    let tile = self.pick_tile(board, row, col);
                    board.set(row as i8, col as i8, Some(tile));
                }
            }
        }
    }
}
