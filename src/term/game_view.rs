//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameState;
use crate::input::Cursor;
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PowerUpKind, TileType, GRID_SIZE, MOVES_BUDGET};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, cursor: Cursor, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = (GRID_SIZE as u16) * self.cell_w;
        let board_px_h = (GRID_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(25, 25, 35),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..GRID_SIZE as u16 {
            for col in 0..GRID_SIZE as u16 {
                let under_cursor =
                    cursor.row as u16 == row && cursor.col as u16 == col && state.armed().is_some();
                match state.board().get(row as i8, col as i8).unwrap_or(None) {
                    Some(tile) => {
                        self.draw_tile(&mut fb, start_x, start_y, row, col, tile, under_cursor)
                    }
                    None => self.draw_empty_cell(&mut fb, start_x, start_y, row, col),
                }
            }
        }

        // Cursor frame around the selected cell.
        self.draw_cursor(&mut fb, start_x, start_y, cursor);

        self.draw_side_panel(&mut fb, state, viewport, start_x, start_y, frame_w);

        match state.phase() {
            GamePhase::Menu => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER");
            }
            GamePhase::GameOver => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            }
            GamePhase::Playing => {}
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: u16, col: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(25, 25, 35),
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, row, col, '·', style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        tile: TileType,
        highlight: bool,
    ) {
        let style = CellStyle {
            fg: tile_color(tile),
            bg: if highlight {
                Rgb::new(70, 70, 90)
            } else {
                Rgb::new(25, 25, 35)
            },
            bold: true,
            dim: false,
        };
        let ch = if tile == TileType::Rainbow { '✶' } else { '●' };
        self.fill_cell_rect(fb, start_x, start_y, row, col, ch, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, cursor: Cursor) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(25, 25, 35),
            bold: true,
            dim: false,
        };
        let px = start_x + 1 + (cursor.col as u16) * self.cell_w;
        let py = start_y + 1 + (cursor.row as u16) * self.cell_h;
        fb.put_char(px, py, '[', style);
        fb.put_char(px + self.cell_w - 1, py, ']', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 14 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", state.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            &format!("{}/{}", state.moves_left(), MOVES_BUDGET),
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        let combo_text = if state.combo() > 1 {
            format!("x{}", state.combo())
        } else {
            "-".to_string()
        };
        fb.put_str(panel_x, y, &combo_text, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "POWER-UPS", label);
        y = y.saturating_add(1);
        for (key, kind) in [
            ('1', PowerUpKind::Bomb),
            ('2', PowerUpKind::Lightning),
            ('3', PowerUpKind::Rainbow),
        ] {
            if y >= viewport.height {
                break;
            }
            let marker = if state.armed() == Some(kind) { '>' } else { ' ' };
            fb.put_str(
                panel_x,
                y,
                &format!(
                    "{}{} {} x{}",
                    marker,
                    key,
                    kind.as_str(),
                    state.inventory().count(kind)
                ),
                value,
            );
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn tile_color(tile: TileType) -> Rgb {
    match tile {
        TileType::Ruby => Rgb::new(220, 80, 80),
        TileType::Amber => Rgb::new(240, 190, 70),
        TileType::Peridot => Rgb::new(110, 220, 110),
        TileType::Sapphire => Rgb::new(90, 130, 230),
        TileType::Amethyst => Rgb::new(190, 110, 220),
        TileType::Rainbow => Rgb::new(250, 250, 250),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timings;

    #[test]
    fn test_render_fits_small_viewport_without_panic() {
        let mut state = GameState::with_timings(7, Timings::turbo());
        state.start();
        let view = GameView::default();

        for (w, h) in [(80, 24), (20, 10), (5, 3), (0, 0)] {
            let fb = view.render(&state, Cursor::new(), Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }

    #[test]
    fn test_menu_overlay_is_drawn() {
        let state = GameState::new(7);
        let view = GameView::default();
        let fb = view.render(&state, Cursor::new(), Viewport::new(80, 24));

        let text: String = (0..fb.width())
            .flat_map(|x| (0..fb.height()).map(move |y| (x, y)))
            .filter_map(|(x, y)| fb.get(x, y))
            .map(|c| c.ch)
            .collect();
        assert!(text.contains('E'), "menu overlay should render text");
    }
}
