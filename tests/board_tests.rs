//! Board tests - match detection, gravity, and the generation invariant

use crystal_match::core::{Board, Generator};
use crystal_match::types::{TileType, GRID_SIZE};

fn base_tile(row: u8, col: u8) -> TileType {
    // Checkerboard of four types: no run of 3 anywhere.
    match (row % 2, col % 2) {
        (0, 0) => TileType::Ruby,
        (0, _) => TileType::Amber,
        (_, 0) => TileType::Peridot,
        _ => TileType::Sapphire,
    }
}

fn base_board() -> Board {
    let rows = (0..GRID_SIZE)
        .map(|r| (0..GRID_SIZE).map(|c| Some(base_tile(r, c))).collect())
        .collect();
    Board::from_rows(rows)
}

#[test]
fn test_base_pattern_has_no_matches() {
    assert!(base_board().find_matches().is_empty());
}

#[test]
fn test_horizontal_and_vertical_runs_detected() {
    let mut board = base_board();
    for col in 2..5 {
        board.set(0, col, Some(TileType::Amethyst));
    }
    for row in 3..6 {
        board.set(row, 7, Some(TileType::Amethyst));
    }

    let matches = board.find_matches();
    assert_eq!(matches.len(), 2);

    let total: usize = matches.iter().map(|m| m.len()).sum();
    assert_eq!(total, 6);
}

#[test]
fn test_overlapping_runs_share_no_coordinate() {
    let mut board = base_board();
    // An L of Amethyst through (4, 4): 3 across, 3 down.
    board.set(4, 4, Some(TileType::Amethyst));
    board.set(4, 5, Some(TileType::Amethyst));
    board.set(4, 6, Some(TileType::Amethyst));
    board.set(5, 4, Some(TileType::Amethyst));
    board.set(6, 4, Some(TileType::Amethyst));

    let matches = board.find_matches();
    assert_eq!(matches.len(), 1, "crossing runs must merge");
    assert_eq!(matches[0].len(), 5, "the corner cell appears once");
}

#[test]
fn test_detection_is_idempotent() {
    let mut board = base_board();
    for col in 1..4 {
        board.set(6, col, Some(TileType::Ruby));
    }

    let first = board.find_matches();
    let second = board.find_matches();
    assert_eq!(first, second);
    // And the board itself is untouched.
    assert_eq!(board, {
        let mut b = base_board();
        for col in 1..4 {
            b.set(6, col, Some(TileType::Ruby));
        }
        b
    });
}

#[test]
fn test_empty_cells_never_match() {
    let mut board = Board::new();
    // Three empties in a row surrounded by nothing: not a match.
    assert!(board.find_matches().is_empty());

    board.set(0, 0, Some(TileType::Ruby));
    board.set(0, 1, Some(TileType::Ruby));
    // Gap at (0, 2); run of two only.
    board.set(0, 3, Some(TileType::Ruby));
    assert!(board.find_matches().is_empty());
}

#[test]
fn test_collapse_conserves_tiles_per_column() {
    let mut board = base_board();
    board.set(2, 3, None);
    board.set(5, 3, None);

    let before: usize = (0..GRID_SIZE).map(|r| usize::from(board.is_occupied(r as i8, 3))).sum();
    board.collapse_columns();
    let after: usize = (0..GRID_SIZE).map(|r| usize::from(board.is_occupied(r as i8, 3))).sum();

    assert_eq!(before, after);
    // Empties are at the top.
    assert_eq!(board.get(0, 3), Some(None));
    assert_eq!(board.get(1, 3), Some(None));
    for row in 2..GRID_SIZE {
        assert!(board.is_occupied(row as i8, 3));
    }
}

#[test]
fn test_generator_invariant_over_many_seeds() {
    for seed in 1..200 {
        let board = Generator::new(seed).generate();
        assert!(board.is_full(), "seed {} left holes", seed);
        assert!(
            board.find_matches().is_empty(),
            "seed {} violated the no-match invariant",
            seed
        );
    }
}

#[test]
fn test_generator_palette_is_ordinary_only() {
    let board = Generator::new(77).generate();
    assert_eq!(board.count_of(TileType::Rainbow), 0);
}
