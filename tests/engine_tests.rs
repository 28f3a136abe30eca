//! Engine tests - move validation, cascade resolution, combo, and game over
//!
//! Scenarios run on prepared layouts so outcomes are deterministic. The base
//! layout is a four-type checkerboard (no matches anywhere); each scenario
//! overrides a handful of cells to stage exactly the situation under test.

use crystal_match::core::{Board, GameEvent, GameState};
use crystal_match::types::{
    GamePhase, MoveOutcome, TileType, Timings, GRID_SIZE, MOVES_BUDGET,
};

fn base_tile(row: u8, col: u8) -> TileType {
    match (row % 2, col % 2) {
        (0, 0) => TileType::Ruby,
        (0, _) => TileType::Amber,
        (_, 0) => TileType::Peridot,
        _ => TileType::Sapphire,
    }
}

fn board_with(overrides: &[(u8, u8, TileType)]) -> Board {
    let rows = (0..GRID_SIZE)
        .map(|r| (0..GRID_SIZE).map(|c| Some(base_tile(r, c))).collect())
        .collect();
    let mut board = Board::from_rows(rows);
    for &(row, col, tile) in overrides {
        board.set(row as i8, col as i8, Some(tile));
    }
    assert!(
        board.find_matches().is_empty(),
        "scenario layout must start match-free"
    );
    board
}

/// Swapping (3,2) down into (4,2) completes a horizontal Amethyst triple on
/// row 4. Clearing it drops column 1 by one, lining up a vertical Sapphire
/// triple there, so the chain is guaranteed to cascade at least once.
fn cascade_board() -> Board {
    board_with(&[
        (3, 2, TileType::Amethyst),
        (4, 1, TileType::Amethyst),
        (4, 2, TileType::Peridot),
        (4, 3, TileType::Amethyst),
        (6, 1, TileType::Sapphire),
        (7, 1, TileType::Ruby),
    ])
}

fn playing(timings: Timings) -> GameState {
    let mut state = GameState::with_timings(99, timings);
    state.start();
    state.take_events();
    state
}

fn score_events(events: &[GameEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Score { points } => Some(*points),
            _ => None,
        })
        .collect()
}

#[test]
fn test_rejected_move_reverts_board_exactly() {
    let mut state = playing(Timings::turbo());
    assert!(state.load_board(board_with(&[])));
    let before = state.board().clone();

    let outcome = state.attempt_move((0, 0), (0, 1));
    assert_eq!(outcome, MoveOutcome::Rejected);
    assert_eq!(state.board(), &before, "rejected swap must leave no trace");
    assert_eq!(state.moves_left(), MOVES_BUDGET);
    assert_eq!(state.score(), 0);
    assert_eq!(
        state.take_events(),
        vec![GameEvent::MoveResolved { accepted: false }]
    );
}

#[test]
fn test_accepted_move_spends_budget_and_scores() {
    let mut state = playing(Timings::turbo());
    assert!(state.load_board(cascade_board()));

    let outcome = state.attempt_move((3, 2), (4, 2));
    assert_eq!(outcome, MoveOutcome::Accepted);
    state.settle();

    assert_eq!(state.moves_left(), MOVES_BUDGET - 1);

    let events = state.take_events();
    assert_eq!(events[0], GameEvent::MoveResolved { accepted: true });

    let scores = score_events(&events);
    assert_eq!(scores[0], 30, "first step: 3 tiles x 10 x combo 1");
    assert_eq!(state.score(), scores.iter().sum::<u32>());

    assert!(state.board().is_full());
    assert!(state.board().find_matches().is_empty());
    assert_eq!(state.combo(), 0, "turbo cooldown resets the combo");
}

#[test]
fn test_cascade_applies_combo_multiplier() {
    let mut state = playing(Timings::turbo());
    assert!(state.load_board(cascade_board()));
    state.attempt_move((3, 2), (4, 2));
    state.settle();

    let scores = score_events(&state.take_events());
    assert!(scores.len() >= 2, "the staged cascade must fire");
    // The second step clears at least the staged Sapphire triple at x2;
    // refill may coincidentally enlarge it, always in whole-tile increments.
    assert!(scores[1] >= 60);
    assert_eq!(scores[1] % 20, 0);
}

#[test]
fn test_combo_survives_until_cooldown_expires() {
    let timings = Timings {
        clear_pause_ms: 0,
        drop_pause_ms: 0,
        combo_cooldown_ms: 5_000,
        rainbow_prime_ms: 0,
    };
    let mut state = playing(timings);
    assert!(state.load_board(cascade_board()));
    state.attempt_move((3, 2), (4, 2));
    state.tick(0);

    assert!(state.combo() >= 2, "chain cascaded at least once");
    assert!(!state.is_busy(), "cooldown accepts new input");

    state.tick(4_999);
    assert!(state.combo() >= 2);
    state.tick(1);
    assert_eq!(state.combo(), 0);
}

#[test]
fn test_input_is_ignored_while_resolving() {
    let timings = Timings {
        clear_pause_ms: 1_000,
        drop_pause_ms: 0,
        combo_cooldown_ms: 0,
        rainbow_prime_ms: 0,
    };
    let mut state = playing(timings);
    assert!(state.load_board(cascade_board()));

    assert_eq!(state.attempt_move((3, 2), (4, 2)), MoveOutcome::Accepted);
    assert!(state.is_busy());

    assert_eq!(state.attempt_move((0, 0), (0, 1)), MoveOutcome::Ignored);
    assert_eq!(
        state.activate_power_up(crystal_match::types::PowerUpKind::Bomb, (4, 4)),
        MoveOutcome::Ignored
    );
    assert!(!state.load_board(board_with(&[])));
    assert_eq!(state.moves_left(), MOVES_BUDGET - 1, "only the first move counted");

    state.settle();
    assert!(!state.is_busy());
    assert!(state.board().is_full());
}

#[test]
fn test_settled_board_conserves_cell_count() {
    let mut state = playing(Timings::turbo());
    assert!(state.load_board(cascade_board()));
    state.attempt_move((3, 2), (4, 2));
    state.settle();

    let board = state.board();
    let total: usize = [
        TileType::Ruby,
        TileType::Amber,
        TileType::Peridot,
        TileType::Sapphire,
        TileType::Amethyst,
    ]
    .iter()
    .map(|&t| board.count_of(t))
    .sum();
    assert_eq!(total, (GRID_SIZE as usize) * (GRID_SIZE as usize));
    assert_eq!(board.count_of(TileType::Rainbow), 0);
}

#[test]
fn test_long_match_earns_a_power_up() {
    let mut state = playing(Timings::turbo());
    // Row 6 reads M M _ M M; swapping the Amethyst at (5,2) down completes
    // a five-tile run.
    assert!(state.load_board(board_with(&[
        (6, 0, TileType::Amethyst),
        (6, 1, TileType::Amethyst),
        (6, 3, TileType::Amethyst),
        (6, 4, TileType::Amethyst),
        (5, 2, TileType::Amethyst),
    ])));

    let total_before: u32 = crystal_match::types::PowerUpKind::ALL
        .iter()
        .map(|&k| state.inventory().count(k))
        .sum();

    assert_eq!(state.attempt_move((5, 2), (6, 2)), MoveOutcome::Accepted);
    state.settle();

    let events = state.take_events();
    assert_eq!(score_events(&events)[0], 50, "5 tiles x 10 x combo 1");
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpEarned { .. })),
        "a 5-tile match grants a power-up"
    );

    let total_after: u32 = crystal_match::types::PowerUpKind::ALL
        .iter()
        .map(|&k| state.inventory().count(k))
        .sum();
    assert!(total_after > total_before);
}

#[test]
fn test_game_over_when_budget_is_spent() {
    let mut state = playing(Timings::turbo());

    for used in 1..=MOVES_BUDGET {
        assert!(state.load_board(cascade_board()));
        assert_eq!(state.attempt_move((3, 2), (4, 2)), MoveOutcome::Accepted);
        state.settle();
        assert_eq!(state.moves_left(), MOVES_BUDGET - used);
    }

    assert_eq!(state.phase(), GamePhase::GameOver);
    let events = state.take_events();
    assert!(events.contains(&GameEvent::GameOver {
        final_score: state.score(),
        moves_used: MOVES_BUDGET,
    }));

    // Game over is terminal for board input.
    assert!(!state.load_board(board_with(&[])));
    assert_eq!(state.attempt_move((3, 2), (4, 2)), MoveOutcome::Ignored);
}

#[test]
fn test_load_board_requires_playing_and_idle() {
    let mut menu = GameState::with_timings(5, Timings::turbo());
    assert!(!menu.load_board(board_with(&[])), "menu rejects layouts");

    let mut state = playing(Timings::turbo());
    assert!(state.load_board(board_with(&[])));
}
