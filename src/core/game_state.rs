//! Game state module - the complete session engine
//!
//! Ties together board, generator, and scoring: move validation with
//! commit/rollback, the timer-paced cascade resolver, the combo counter,
//! the power-up system, and the Menu/Playing/GameOver phase machine.
//!
//! The engine is single-threaded and driven by [`GameState::tick`] with
//! elapsed milliseconds. Deferred steps (clear pause, drop pause, rainbow
//! priming, combo cooldown) run off the same tick; while a clear/drop/prime
//! step is outstanding the engine is "busy" and rejects new input outright.

use crate::core::board::{Board, MatchSet};
use crate::core::generator::Generator;
use crate::core::scoring::{grant_for_match_len, match_points, power_up_points};
use crate::types::{
    Coord, GamePhase, MoveOutcome, PowerUpKind, TileType, Timings, GRID_SIZE, MOVES_BUDGET,
    STARTING_POWER_UPS,
};

/// Events consumed by the host (renderer, UI layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Transitioned Menu -> Playing.
    Started,
    /// A move attempt resolved: accepted (committed) or rejected (reverted).
    MoveResolved { accepted: bool },
    /// Incremental points awarded by one scoring event.
    Score { points: u32 },
    /// A qualifying match size earned an inventory unit.
    PowerUpEarned { kind: PowerUpKind },
    /// The moves budget hit zero and the session ended.
    GameOver { final_score: u32, moves_used: u32 },
}

/// Per-kind power-up counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpInventory {
    bomb: u32,
    lightning: u32,
    rainbow: u32,
}

impl PowerUpInventory {
    fn starting() -> Self {
        Self {
            bomb: STARTING_POWER_UPS,
            lightning: STARTING_POWER_UPS,
            rainbow: STARTING_POWER_UPS,
        }
    }

    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Bomb => self.bomb,
            PowerUpKind::Lightning => self.lightning,
            PowerUpKind::Rainbow => self.rainbow,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::Bomb => &mut self.bomb,
            PowerUpKind::Lightning => &mut self.lightning,
            PowerUpKind::Rainbow => &mut self.rainbow,
        }
    }

    fn try_take(&mut self, kind: PowerUpKind) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    fn add(&mut self, kind: PowerUpKind) {
        *self.slot_mut(kind) += 1;
    }
}

/// Deferred step of the resolution pipeline.
#[derive(Debug, Clone, PartialEq)]
enum ResolveStep {
    Idle,
    /// Matches scored; their cells empty when the clear pause expires.
    Clearing { matches: Vec<MatchSet> },
    /// Cells cleared; gravity + refill run when the drop pause expires.
    Dropping,
    /// Chain settled; the combo counter resets when the cooldown expires.
    CoolingDown,
    /// Rainbow marker placed; the clear resolves when the prime delay expires.
    RainbowPriming { row: u8, col: u8 },
}

/// Complete session state.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    tiles: Generator,
    timings: Timings,
    phase: GamePhase,
    score: u32,
    moves_left: u32,
    /// Resolution steps attributable to the current chain (1-based once a
    /// chain is running). Power-up activations never touch it.
    combo: u32,
    inventory: PowerUpInventory,
    /// Currently armed power-up; a tap on the board activates it.
    armed: Option<PowerUpKind>,
    step: ResolveStep,
    step_timer_ms: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the Menu phase with default pacing.
    pub fn new(seed: u32) -> Self {
        Self::with_timings(seed, Timings::default())
    }

    /// Create a new session with explicit pacing delays.
    pub fn with_timings(seed: u32, timings: Timings) -> Self {
        Self {
            board: Board::new(),
            tiles: Generator::new(seed),
            timings,
            phase: GamePhase::Menu,
            score: 0,
            moves_left: MOVES_BUDGET,
            combo: 0,
            inventory: PowerUpInventory::starting(),
            armed: None,
            step: ResolveStep::Idle,
            step_timer_ms: 0,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn moves_used(&self) -> u32 {
        MOVES_BUDGET - self.moves_left
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn inventory(&self) -> &PowerUpInventory {
        &self.inventory
    }

    pub fn armed(&self) -> Option<PowerUpKind> {
        self.armed
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// True while a clear/drop/prime step is outstanding. Busy sessions
    /// reject moves and power-up activations outright (no queueing).
    pub fn is_busy(&self) -> bool {
        matches!(
            self.step,
            ResolveStep::Clearing { .. } | ResolveStep::Dropping | ResolveStep::RainbowPriming { .. }
        )
    }

    /// Take all pending host events, leaving the queue empty.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start the session: Menu -> Playing with a freshly generated board.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.board = self.tiles.generate();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
    }

    /// Restart into a fresh Playing session: new board, reset score, budget,
    /// combo, and inventory. The RNG continues from its current state so
    /// consecutive sessions differ.
    pub fn restart(&mut self) {
        let seed = self.tiles.seed();
        let timings = self.timings;
        *self = Self::with_timings(seed, timings);
        self.board = self.tiles.generate();
        self.phase = GamePhase::Playing;
    }

    /// Replace the board with a prepared layout (authored puzzles, tests).
    ///
    /// Only honored while Playing and not mid-resolution.
    pub fn load_board(&mut self, board: Board) -> bool {
        if self.phase != GamePhase::Playing || self.is_busy() {
            return false;
        }
        self.board = board;
        true
    }

    /// Attempt to swap two adjacent tiles.
    ///
    /// Accepted: the swap commits, the budget drops by one, the combo resets,
    /// and the cascade pipeline starts. Rejected: the swap is reverted in
    /// place and only a `MoveResolved { accepted: false }` event is emitted.
    /// Ignored: a precondition failed; no state change, no event.
    pub fn attempt_move(&mut self, origin: Coord, target: Coord) -> MoveOutcome {
        if self.phase != GamePhase::Playing || self.is_busy() {
            return MoveOutcome::Ignored;
        }
        if !is_adjacent(origin, target)
            || !self.board.in_bounds(origin.0 as i8, origin.1 as i8)
            || !self.board.in_bounds(target.0 as i8, target.1 as i8)
        {
            return MoveOutcome::Ignored;
        }

        self.board.swap(origin, target);
        let matches = self.board.find_matches();

        if matches.is_empty() {
            // Revert; the board must be bit-identical to its pre-swap state.
            self.board.swap(origin, target);
            self.events.push(GameEvent::MoveResolved { accepted: false });
            return MoveOutcome::Rejected;
        }

        self.moves_left -= 1;
        self.combo = 0;
        self.step = ResolveStep::Idle; // cancels a pending combo cooldown
        self.events.push(GameEvent::MoveResolved { accepted: true });
        self.begin_standard_clear(matches);
        MoveOutcome::Accepted
    }

    /// Arm a power-up for the next tap. Fails outside Playing or with an
    /// empty inventory slot.
    pub fn arm_power_up(&mut self, kind: PowerUpKind) -> bool {
        if self.phase != GamePhase::Playing || self.inventory.count(kind) == 0 {
            return false;
        }
        self.armed = Some(kind);
        true
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Tap a cell: activates the armed power-up there, if any.
    pub fn tap(&mut self, row: u8, col: u8) -> MoveOutcome {
        let Some(kind) = self.armed else {
            return MoveOutcome::Ignored;
        };
        let outcome = self.activate_power_up(kind, (row, col));
        if outcome != MoveOutcome::Ignored {
            self.armed = None;
        }
        outcome
    }

    /// Activate a power-up at a target cell.
    ///
    /// Does not cost a move and needs no adjacency; requires Playing, an idle
    /// pipeline, and a remaining inventory unit of that kind.
    pub fn activate_power_up(&mut self, kind: PowerUpKind, target: Coord) -> MoveOutcome {
        if self.phase != GamePhase::Playing || self.is_busy() {
            return MoveOutcome::Ignored;
        }
        if !self.board.in_bounds(target.0 as i8, target.1 as i8) {
            return MoveOutcome::Ignored;
        }
        if !self.inventory.try_take(kind) {
            return MoveOutcome::Ignored;
        }

        match kind {
            PowerUpKind::Bomb => {
                let coords = self.bomb_area(target);
                self.begin_power_up_clear(PowerUpKind::Bomb, coords);
            }
            PowerUpKind::Lightning => {
                let coords = self.lightning_line(target);
                self.begin_power_up_clear(PowerUpKind::Lightning, coords);
            }
            PowerUpKind::Rainbow => {
                // The target is overwritten with the marker first; the clear
                // resolves after the prime delay.
                self.board
                    .set(target.0 as i8, target.1 as i8, Some(TileType::Rainbow));
                self.step = ResolveStep::RainbowPriming {
                    row: target.0,
                    col: target.1,
                };
                self.step_timer_ms = self.timings.rainbow_prime_ms;
            }
        }
        MoveOutcome::Accepted
    }

    /// Advance timers by `elapsed_ms`, running any step whose delay expired.
    ///
    /// With zeroed timings an entire cascade chain settles within one call.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.step_timer_ms = self.step_timer_ms.saturating_sub(elapsed_ms);
        while self.step_timer_ms == 0 && self.step != ResolveStep::Idle {
            self.advance_step();
        }
    }

    /// Run every outstanding step and timer to completion.
    pub fn settle(&mut self) {
        while self.phase == GamePhase::Playing && self.step != ResolveStep::Idle {
            self.tick(u32::MAX);
        }
    }

    /// Occupied cells of the 3x3 neighborhood around the target, clipped at
    /// the board edges.
    fn bomb_area(&self, target: Coord) -> Vec<Coord> {
        let mut coords = Vec::with_capacity(9);
        for dr in -1i8..=1 {
            for dc in -1i8..=1 {
                let (r, c) = (target.0 as i8 + dr, target.1 as i8 + dc);
                if self.board.is_occupied(r, c) {
                    coords.push((r as u8, c as u8));
                }
            }
        }
        coords
    }

    /// Occupied cells of the denser of the target's row and column; a tie
    /// favors the row.
    fn lightning_line(&self, target: Coord) -> Vec<Coord> {
        let row_count = self.board.occupied_in_row(target.0);
        let col_count = self.board.occupied_in_col(target.1);

        let mut coords = Vec::with_capacity(GRID_SIZE as usize);
        if row_count >= col_count {
            for col in 0..GRID_SIZE {
                if self.board.is_occupied(target.0 as i8, col as i8) {
                    coords.push((target.0, col));
                }
            }
        } else {
            for row in 0..GRID_SIZE {
                if self.board.is_occupied(row as i8, target.1 as i8) {
                    coords.push((row, target.1));
                }
            }
        }
        coords
    }

    /// Score and stage a standard resolution step (initial match or cascade).
    fn begin_standard_clear(&mut self, matches: Vec<MatchSet>) {
        self.combo += 1;

        let tiles: usize = matches.iter().map(MatchSet::len).sum();
        let points = match_points(tiles, self.combo);
        self.score += points;
        self.events.push(GameEvent::Score { points });

        for set in &matches {
            if let Some(kind) = grant_for_match_len(set.len(), self.tiles.rng_mut()) {
                self.inventory.add(kind);
                self.events.push(GameEvent::PowerUpEarned { kind });
            }
        }

        self.step = ResolveStep::Clearing { matches };
        self.step_timer_ms = self.timings.clear_pause_ms;
    }

    /// Score and stage a power-up's synthetic clear. Flat per-tile rate, no
    /// combo increment, no power-up grants.
    fn begin_power_up_clear(&mut self, kind: PowerUpKind, coords: Vec<Coord>) {
        let set = MatchSet::new(coords);
        let points = power_up_points(kind, set.len());
        self.score += points;
        self.events.push(GameEvent::Score { points });

        if set.is_empty() {
            // Nothing to clear; the charge is still spent.
            return;
        }

        self.step = ResolveStep::Clearing { matches: vec![set] };
        self.step_timer_ms = self.timings.clear_pause_ms;
    }

    /// Run the step whose delay just expired.
    fn advance_step(&mut self) {
        match std::mem::replace(&mut self.step, ResolveStep::Idle) {
            ResolveStep::Idle => {}
            ResolveStep::Clearing { matches } => {
                for set in &matches {
                    self.board.clear_cells(set);
                }
                self.step = ResolveStep::Dropping;
                self.step_timer_ms = self.timings.drop_pause_ms;
            }
            ResolveStep::Dropping => {
                self.board.collapse_columns();
                self.tiles.refill(&mut self.board);

                let matches = self.board.find_matches();
                if matches.is_empty() {
                    self.finish_chain();
                } else {
                    // Cascade step: same chain, combo keeps climbing.
                    self.begin_standard_clear(matches);
                }
            }
            ResolveStep::CoolingDown => {
                self.combo = 0;
            }
            ResolveStep::RainbowPriming { row, col } => {
                self.resolve_rainbow(row, col);
            }
        }
    }

    /// The board is stable again: end the session if the budget is spent,
    /// otherwise schedule the combo reset.
    fn finish_chain(&mut self) {
        if self.moves_left == 0 {
            self.combo = 0;
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
                moves_used: self.moves_used(),
            });
            return;
        }

        if self.combo > 0 {
            self.step = ResolveStep::CoolingDown;
            self.step_timer_ms = self.timings.combo_cooldown_ms;
        }
    }

    /// Resolve a primed rainbow: find the dominant tile type among the
    /// target's orthogonal neighbors (encounter order up, down, left, right;
    /// first encountered wins ties) and clear every cell of that type plus
    /// every rainbow marker as one synthetic match.
    fn resolve_rainbow(&mut self, row: u8, col: u8) {
        let mut tallies: Vec<(TileType, usize)> = Vec::with_capacity(4);
        for (nr, nc) in self.board.neighbors4(row, col) {
            let Some(Some(tile)) = self.board.get(nr as i8, nc as i8) else {
                continue;
            };
            if !tile.is_ordinary() {
                continue;
            }
            match tallies.iter_mut().find(|(t, _)| *t == tile) {
                Some((_, n)) => *n += 1,
                None => tallies.push((tile, 1)),
            }
        }

        // Strictly-greater keeps the first-encountered type on ties.
        let mut dominant: Option<TileType> = None;
        let mut best = 0;
        for (tile, n) in tallies {
            if n > best {
                best = n;
                dominant = Some(tile);
            }
        }

        let mut coords = Vec::new();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let Some(Some(tile)) = self.board.get(r as i8, c as i8) else {
                    continue;
                };
                if Some(tile) == dominant || tile == TileType::Rainbow {
                    coords.push((r, c));
                }
            }
        }

        self.begin_power_up_clear(PowerUpKind::Rainbow, coords);
    }
}

fn is_adjacent(a: Coord, b: Coord) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}
