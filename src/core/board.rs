//! Board module - manages the game grid and match detection
//!
//! The board is an 8x8 grid where each cell is empty or holds a tile type.
//! Uses a flat array for better cache locality and zero-allocation access.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left.

use arrayvec::ArrayVec;

use crate::types::{Cell, Coord, TileType, GRID_SIZE};

/// Total number of cells on the board
const BOARD_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Minimum run length that counts as a match
const MIN_RUN: usize = 3;

/// A merged set of matched coordinates.
///
/// Horizontal and vertical runs that touch the same cell are unioned into one
/// set, so no coordinate appears twice across a detection pass. Cells are
/// kept sorted for deterministic iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    cells: Vec<Coord>,
}

impl MatchSet {
    pub fn new(mut cells: Vec<Coord>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.binary_search(&coord).is_ok()
    }
}

/// The game board - 8x8 grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn in_bounds(&self, row: i8, col: i8) -> bool {
        Self::index(row, col).is_some()
    }

    /// Check if position is occupied (within bounds and holding a tile)
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Count occupied cells in a row
    pub fn occupied_in_row(&self, row: u8) -> usize {
        let start = (row as usize) * (GRID_SIZE as usize);
        let end = start + GRID_SIZE as usize;
        self.cells[start..end].iter().filter(|c| c.is_some()).count()
    }

    /// Count occupied cells in a column
    pub fn occupied_in_col(&self, col: u8) -> usize {
        (0..GRID_SIZE)
            .filter(|&row| self.is_occupied(row as i8, col as i8))
            .count()
    }

    /// Count cells currently holding the given tile type
    pub fn count_of(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|c| **c == Some(tile)).count()
    }

    /// The 4-directionally adjacent in-bounds coordinates, in up, down,
    /// left, right order.
    pub fn neighbors4(&self, row: u8, col: u8) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        let (r, c) = (row as i8, col as i8);
        for (nr, nc) in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            if self.in_bounds(nr, nc) {
                out.push((nr as u8, nc as u8));
            }
        }
        out
    }

    /// Swap the contents of two cells. Returns false if either is out of
    /// bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        let (Some(ia), Some(ib)) = (
            Self::index(a.0 as i8, a.1 as i8),
            Self::index(b.0 as i8, b.1 as i8),
        ) else {
            return false;
        };
        self.cells.swap(ia, ib);
        true
    }

    /// Find all matches on the board.
    ///
    /// For every occupied cell, horizontal and vertical runs of identical
    /// tile types with length >= 3 are collected; runs sharing a cell are
    /// merged into a single [`MatchSet`]. Pure: repeated calls on an
    /// unchanged board return identical results.
    pub fn find_matches(&self) -> Vec<MatchSet> {
        let n = GRID_SIZE as usize;
        let mut runs: Vec<Vec<Coord>> = Vec::new();

        // Horizontal runs.
        for row in 0..n {
            let mut col = 0;
            while col < n {
                let Some(Some(tile)) = self.get(row as i8, col as i8) else {
                    col += 1;
                    continue;
                };
                let start = col;
                while col + 1 < n && self.get(row as i8, (col + 1) as i8) == Some(Some(tile)) {
                    col += 1;
                }
                if col - start + 1 >= MIN_RUN {
                    runs.push((start..=col).map(|c| (row as u8, c as u8)).collect());
                }
                col += 1;
            }
        }

        // Vertical runs.
        for col in 0..n {
            let mut row = 0;
            while row < n {
                let Some(Some(tile)) = self.get(row as i8, col as i8) else {
                    row += 1;
                    continue;
                };
                let start = row;
                while row + 1 < n && self.get((row + 1) as i8, col as i8) == Some(Some(tile)) {
                    row += 1;
                }
                if row - start + 1 >= MIN_RUN {
                    runs.push((start..=row).map(|r| (r as u8, col as u8)).collect());
                }
                row += 1;
            }
        }

        merge_runs(runs)
    }

    /// Would placing `tile` at (row, col) complete a run of 3 with the
    /// contiguous identical neighbors to the left or above?
    ///
    /// This is the generation-time filter: it only looks left/up because the
    /// generator fills top-left to bottom-right.
    pub fn causes_match(&self, row: u8, col: u8, tile: TileType) -> bool {
        let (r, c) = (row as i8, col as i8);
        let same = |rr: i8, cc: i8| self.get(rr, cc) == Some(Some(tile));

        (same(r, c - 1) && same(r, c - 2)) || (same(r - 1, c) && same(r - 2, c))
    }

    /// Clear every coordinate in the set to empty
    pub fn clear_cells(&mut self, set: &MatchSet) {
        for &(row, col) in set.cells() {
            self.set(row as i8, col as i8, None);
        }
    }

    /// Apply gravity: per column, compact remaining tiles downward preserving
    /// relative order, leaving empties at the top.
    pub fn collapse_columns(&mut self) {
        let n = GRID_SIZE as usize;
        for col in 0..n {
            let mut stack: ArrayVec<TileType, { GRID_SIZE as usize }> = ArrayVec::new();
            // Collect bottom to top.
            for row in (0..n).rev() {
                if let Some(Some(tile)) = self.get(row as i8, col as i8) {
                    stack.push(tile);
                }
            }
            // Write back bottom to top; anything past the stack is empty.
            for (offset, row) in (0..n).rev().enumerate() {
                let cell = stack.get(offset).copied();
                self.set(row as i8, col as i8, cell);
            }
        }
    }

    /// Create from a 2D vector (rows of cells), mainly for prepared layouts
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), GRID_SIZE as usize);
        assert!(rows.iter().all(|row| row.len() == GRID_SIZE as usize));

        let mut flat = [None; BOARD_CELLS];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                flat[r * GRID_SIZE as usize + c] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Union runs that share a coordinate into merged match sets.
fn merge_runs(runs: Vec<Vec<Coord>>) -> Vec<MatchSet> {
    if runs.is_empty() {
        return Vec::new();
    }

    let mut parent: Vec<usize> = (0..runs.len()).collect();

    fn find(parent: &mut [usize], i: usize) -> usize {
        let mut root = i;
        while parent[root] != root {
            root = parent[root];
        }
        // Path compression.
        let mut cur = i;
        while parent[cur] != root {
            let next = parent[cur];
            parent[cur] = root;
            cur = next;
        }
        root
    }

    let mut owner: [Option<usize>; BOARD_CELLS] = [None; BOARD_CELLS];
    for (i, run) in runs.iter().enumerate() {
        for &(row, col) in run {
            let idx = (row as usize) * (GRID_SIZE as usize) + (col as usize);
            match owner[idx] {
                Some(j) => {
                    let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                    if ri != rj {
                        parent[ri] = rj;
                    }
                }
                None => owner[idx] = Some(i),
            }
        }
    }

    // Group run cells by root, preserving first-seen order of roots.
    let mut root_order: Vec<usize> = Vec::new();
    let mut groups: Vec<Vec<Coord>> = Vec::new();
    let mut slot_of_root: Vec<Option<usize>> = vec![None; runs.len()];

    for (i, run) in runs.iter().enumerate() {
        let root = find(&mut parent, i);
        let slot = match slot_of_root[root] {
            Some(slot) => slot,
            None => {
                root_order.push(root);
                groups.push(Vec::new());
                slot_of_root[root] = Some(groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].extend_from_slice(run);
    }

    groups.into_iter().map(MatchSet::new).collect()
}
