//! Board cursor for the terminal frontend.

use crate::types::{Coord, GRID_SIZE};

/// The currently selected cell, clamped to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: u8,
    pub col: u8,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            row: GRID_SIZE / 2,
            col: GRID_SIZE / 2,
        }
    }

    pub fn pos(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.row = (self.row + 1).min(GRID_SIZE - 1);
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.col = (self.col + 1).min(GRID_SIZE - 1);
    }

    /// The neighbor one step in the given direction, if it is on the board.
    pub fn neighbor(&self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as u8, col as u8))
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut cursor = Cursor { row: 0, col: 0 };
        cursor.move_up();
        cursor.move_left();
        assert_eq!(cursor.pos(), (0, 0));

        let mut cursor = Cursor {
            row: GRID_SIZE - 1,
            col: GRID_SIZE - 1,
        };
        cursor.move_down();
        cursor.move_right();
        assert_eq!(cursor.pos(), (GRID_SIZE - 1, GRID_SIZE - 1));
    }

    #[test]
    fn test_neighbor_is_none_off_board() {
        let cursor = Cursor { row: 0, col: 3 };
        assert_eq!(cursor.neighbor(-1, 0), None);
        assert_eq!(cursor.neighbor(1, 0), Some((1, 3)));
    }
}
