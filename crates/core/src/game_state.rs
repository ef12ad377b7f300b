//! Game state module - manages the complete game session
//!
//! This module ties together all core components: board, pieces, piece
//! generator, scoring and high score persistence. It runs the per-tick state
//! machine:
//!
//! ```text
//! Menu --start--> Playing --blocked above row 2--> AnimatingGameOver
//!                    ^                                   |
//!                    |                             sweep finished
//!                    +------------start-------- GameOver <+
//! ```
//!
//! There is no wall-clock timing. Call [`Game::tick`] once per scheduling
//! quantum; gravity advances by `round(speed)` per call, so the effective fall
//! rate follows the host's call frequency.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::high_score::{HighScoreStore, SessionStore};
use crate::pieces::Piece;
use crate::placement::land_piece;
use crate::rng::PieceGenerator;
use crate::scoring::{gravity_step, line_clear_score, speed_increase};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Redraw hints produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Board or next piece changed
    pub redraw_board: bool,
    /// Active piece moved, rotated or was asked to
    pub redraw_piece: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game<S = SessionStore> {
    board: Board,
    current: Piece,
    next: Piece,
    drop_preview: Piece,
    generator: PieceGenerator,
    store: S,
    score: u32,
    cleared_lines: u32,
    speed: f64,
    delay: u32,
    key_down_debounce: u32,
    high_score: u32,
    mode: GameMode,
    /// Counts down from the last board index while the game-over sweep runs
    game_over_cursor: isize,
}

impl Game<SessionStore> {
    /// Create a new game in the menu with a fresh session store
    pub fn new(seed: u32) -> Self {
        Self::with_store(seed, SessionStore::new())
    }
}

impl<S: HighScoreStore> Game<S> {
    /// Create a new game in the menu backed by `store`
    pub fn with_store(seed: u32, store: S) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let current = generator.spawn();
        let next = generator.spawn();

        let mut game = Self {
            board: Board::new(),
            current,
            next,
            drop_preview: current,
            generator,
            store,
            score: 0,
            cleared_lines: 0,
            speed: INITIAL_SPEED,
            delay: 0,
            key_down_debounce: MAX_KEY_DOWN_DEBOUNCE,
            high_score: 0,
            mode: GameMode::Menu,
            game_over_cursor: BOARD_SIZE as isize - 1,
        };
        game.reset();
        game
    }

    /// Start a fresh session: empty board, new pieces, counters zeroed and
    /// the high score reloaded. The mode is left untouched.
    pub fn reset(&mut self) {
        self.score = 0;
        self.high_score = self.store.load(HIGH_SCORE_KEY);
        self.cleared_lines = 0;
        self.game_over_cursor = BOARD_SIZE as isize - 1;
        self.speed = INITIAL_SPEED;
        self.delay = 0;
        self.key_down_debounce = MAX_KEY_DOWN_DEBOUNCE;
        self.board = Board::new();
        self.current = self.generator.spawn();
        self.next = self.generator.spawn();
        self.update_drop_preview();
    }

    /// Reset and begin playing. Used for both the start and restart actions.
    pub fn start(&mut self) {
        self.reset();
        self.mode = GameMode::Playing;
        info!(
            seed = self.generator.seed(),
            high_score = self.high_score,
            "game started"
        );
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn drop_preview(&self) -> &Piece {
        &self.drop_preview
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.cells();
        out.current = self.current;
        out.next = self.next;
        out.drop_preview = self.drop_preview;
        out.score = self.score;
        out.cleared_lines = self.cleared_lines;
        out.high_score = self.high_score;
        out.speed = self.speed;
        out.mode = self.mode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the state machine by one tick.
    ///
    /// `input.released` is treated as one-shot: the caller must not present
    /// the same released keys to a later tick.
    pub fn tick(&mut self, input: &InputFrame) -> TickOutcome {
        match self.mode {
            GameMode::Menu | GameMode::GameOver => TickOutcome::default(),
            GameMode::Playing => self.tick_playing(input),
            GameMode::AnimatingGameOver => self.tick_game_over_sweep(),
        }
    }

    fn tick_playing(&mut self, input: &InputFrame) -> TickOutcome {
        let released = input.released;
        let down = input.down;
        let mut outcome = TickOutcome::default();
        let mut dx: i8 = 0;
        let mut dy: i8 = 0;
        let mut rotation = self.current.rotation;
        let mut landed = false;

        if released.contains(Key::Up) {
            rotation = rotation.rotate_cw();
        }

        self.delay += gravity_step(self.speed);
        if self.delay >= MAX_DELAY {
            self.delay = 0;
            dy = 1;
        }

        if released.contains(Key::Space) {
            dy = 1;
            landed = true;
            while self.current.can_move(&self.board, 0, 1) {
                self.current.row += 1;
            }
        }

        if released.any_movement() {
            if released.contains(Key::Right) {
                dx = 1;
            }
            if released.contains(Key::Left) {
                dx = -1;
            }
            if released.contains(Key::Down) {
                dy = 1;
            }
            self.key_down_debounce = MAX_KEY_DOWN_DEBOUNCE;
        } else if self.key_down_debounce == 0 {
            if down.contains(Key::Right) {
                dx = 1;
            }
            if down.contains(Key::Left) {
                dx = -1;
            }
            if down.contains(Key::Down) {
                dy = 1;
            }
        }

        if dx != 0 {
            self.try_move(dx, 0);
        }

        outcome.redraw_piece = dx != 0 || dy != 0 || rotation != self.current.rotation;

        if rotation != self.current.rotation {
            self.try_rotate(rotation);
        }

        if !self.try_move(0, dy) {
            if self.current.row < RESERVED_ROWS {
                self.begin_game_over_sweep();
            } else {
                landed = true;
            }
        }

        if landed {
            self.land_current();
            outcome.redraw_board = true;
        }

        if down.any_movement() {
            if self.key_down_debounce > 0 {
                self.key_down_debounce -= 1;
            } else {
                self.key_down_debounce = MAX_KEY_DOWN_DEBOUNCE;
            }
        }

        if self.clear_full_rows() > 0 {
            outcome.redraw_board = true;
        }

        self.update_drop_preview();

        outcome
    }

    /// Paint two cells per tick from the bottom-right towards the top-left,
    /// then settle into [`GameMode::GameOver`].
    fn tick_game_over_sweep(&mut self) -> TickOutcome {
        if self.game_over_cursor < 0 {
            self.game_over();
        } else {
            for _ in 0..2 {
                let colour = Cell::Piece(self.generator.next_kind());
                self.board.set_at(self.game_over_cursor, colour);
                self.game_over_cursor -= 1;
            }
        }

        TickOutcome {
            redraw_board: true,
            redraw_piece: false,
        }
    }

    fn begin_game_over_sweep(&mut self) {
        info!(score = self.score, lines = self.cleared_lines, "piece blocked in spawn rows");
        self.mode = GameMode::AnimatingGameOver;
    }

    fn game_over(&mut self) {
        self.mode = GameMode::GameOver;
        if self.score > self.high_score {
            self.store.store(HIGH_SCORE_KEY, self.score);
            info!(
                previous = self.high_score,
                score = self.score,
                "new high score"
            );
            self.high_score = self.score;
        }
        info!(score = self.score, "game over");
    }

    /// Shift the current piece if legal. Returns whether it moved.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.current.can_move(&self.board, dx, dy) {
            self.current.col += dx;
            self.current.row += dy;
            true
        } else {
            false
        }
    }

    /// Rotate the current piece to `rotation` from its canonical shape.
    /// No wall kicks: a blocked rotation is dropped.
    fn try_rotate(&mut self, rotation: Rotation) -> bool {
        match self.current.rotated(&self.board, rotation) {
            Some(rotated) => {
                self.current = rotated;
                true
            }
            None => {
                trace!(kind = self.current.kind.as_str(), ?rotation, "rotation blocked");
                false
            }
        }
    }

    /// Merge the current piece into the board and promote the next piece
    fn land_current(&mut self) {
        debug!(
            kind = self.current.kind.as_str(),
            col = self.current.col,
            row = self.current.row,
            "piece landed"
        );
        self.board = land_piece(&self.current, &self.board);
        self.current = self.next;
        self.next = self.generator.spawn();
    }

    /// Detect and collapse full rows, updating score, lines and speed.
    /// Returns the number of rows cleared.
    fn clear_full_rows(&mut self) -> usize {
        let full_rows = self.board.find_full_rows();
        let count = full_rows.len();
        if count == 0 {
            return 0;
        }

        self.score += line_clear_score(count);
        self.cleared_lines += count as u32;
        self.speed += speed_increase(self.cleared_lines);
        self.board = self.board.collapse_rows(&full_rows);

        debug!(
            rows = count,
            score = self.score,
            lines = self.cleared_lines,
            speed = self.speed,
            "rows cleared"
        );
        count
    }

    fn update_drop_preview(&mut self) {
        self.drop_preview = self.current.drop_preview(&self.board);
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
        self.update_drop_preview();
    }
}

impl Default for Game<SessionStore> {
    fn default() -> Self {
        Self::new(1)
    }
}
