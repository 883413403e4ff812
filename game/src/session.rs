//! The game state machine: one active piece falling into a [`Playfield`].
//!
//! Per tick the session applies the frame's intents, then advances the fall timer. Locking a
//! piece clears full rows, speeds gravity up, and spawns the next piece. A piece that locks while
//! still poking above the field ends the game, which resets the session in place.

use crate::intents::Intents;
use crate::piece::{Piece, PieceKind};
use crate::playfield::Playfield;
use crate::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub field_width: usize,
    pub field_height: usize,
    /// Forced descents per second at the start of a game.
    pub initial_fall_speed: f64,
    /// Added to the fall speed for every cleared row.
    pub fall_speed_increment: f64,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field_width: 10,
            field_height: 20,
            initial_fall_speed: 1.5,
            fall_speed_increment: 0.1,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Locked { rows_cleared: u32 },
    GameOver,
}

/// What happened during one [`GameSession::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub pieces_locked: u32,
    pub rows_cleared: u32,
    pub game_over: bool,
}

impl TickReport {
    pub fn locked(&self) -> bool {
        self.pieces_locked > 0
    }

    fn record(&mut self, outcome: LockOutcome) {
        match outcome {
            LockOutcome::Locked { rows_cleared } => {
                self.pieces_locked += 1;
                self.rows_cleared += rows_cleared;
            }
            LockOutcome::GameOver => self.game_over = true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    field: Playfield,
    piece: Piece,
    x: i32,
    y: i32,
    lines: u32,
    fall_timer: f64,
    fall_speed: f64,
    games_played: u32,
    rng: Rng,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            field: Playfield::new(config.field_width, config.field_height),
            piece: Piece::default(),
            x: 0,
            y: 0,
            lines: 0,
            fall_timer: 0.0,
            fall_speed: config.initial_fall_speed,
            games_played: 0,
            rng: Rng::new(config.seed),
        };
        session.spawn();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_timer(&self) -> f64 {
        self.fall_timer
    }

    pub fn fall_speed(&self) -> f64 {
        self.fall_speed
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Spawns a random piece above the field.
    pub fn spawn(&mut self) {
        let kind = self.rng.next_kind();
        self.spawn_kind(kind);
    }

    /// Spawns `kind` at the spawn column, fully above the field.
    pub fn spawn_kind(&mut self, kind: PieceKind) {
        self.piece = Piece::make(kind);
        self.x = self.spawn_column();
        self.y = -(self.piece.height() as i32);
        log::debug!("spawned {kind:?} at ({}, {})", self.x, self.y);
    }

    /// Places an arbitrary piece. No collision check.
    pub fn set_active_piece(&mut self, piece: Piece, x: i32, y: i32) {
        self.piece = piece;
        self.x = x;
        self.y = y;
    }

    fn spawn_column(&self) -> i32 {
        let preferred = (self.field.width() / 2).saturating_sub(1) as i32;
        let max_x = self.field.width() as i32 - self.piece.width() as i32;
        preferred.min(max_x).max(0)
    }

    /// Applies intents, then gravity for `elapsed_seconds`.
    pub fn update(&mut self, intents: &Intents, elapsed_seconds: f64) -> TickReport {
        let mut report = TickReport::default();
        self.apply_intents(intents, &mut report);
        self.advance(elapsed_seconds, &mut report);
        report
    }

    /// A hard drop suppresses every other intent for the tick. Otherwise rotate, then at most one
    /// horizontal step (opposing directions cancel), then a soft drop.
    pub fn apply_intents(&mut self, intents: &Intents, report: &mut TickReport) {
        if intents.hard_drop {
            report.record(self.hard_drop());
            return;
        }
        if intents.rotate {
            self.rotate();
        }
        match (intents.move_left, intents.move_right) {
            (true, false) => {
                self.shift(-1);
            }
            (false, true) => {
                self.shift(1);
            }
            _ => {}
        }
        if intents.soft_drop {
            if let Some(outcome) = self.step_down() {
                report.record(outcome);
            }
        }
    }

    /// Accumulates gravity and performs one forced step per whole unit. Non-positive or
    /// non-finite durations do nothing.
    pub fn advance(&mut self, elapsed_seconds: f64, report: &mut TickReport) {
        if elapsed_seconds <= 0.0 || !elapsed_seconds.is_finite() {
            return;
        }
        self.fall_timer += self.fall_speed * elapsed_seconds;
        while self.fall_timer >= 1.0 {
            self.fall_timer -= 1.0;
            if let Some(outcome) = self.step_down() {
                report.record(outcome);
            }
        }
    }

    /// Rotates clockwise, keeping the bottom edge anchored and the piece inside the right wall.
    /// Reverts and returns false if the result collides.
    pub fn rotate(&mut self) -> bool {
        let (old_x, old_y) = (self.x, self.y);
        let old_height = self.piece.height() as i32;

        self.piece.rotate();
        self.y -= self.piece.height() as i32 - old_height;
        let max_x = self.field.width() as i32 - self.piece.width() as i32;
        if self.x > max_x {
            self.x = max_x;
        }

        if self.field.collides(&self.piece, self.x, self.y) {
            for _ in 0..3 {
                self.piece.rotate();
            }
            self.x = old_x;
            self.y = old_y;
            return false;
        }
        true
    }

    /// Moves one column left (`-1`) or right (`1`) if the target is free.
    pub fn shift(&mut self, dx: i32) -> bool {
        if self.field.collides(&self.piece, self.x + dx, self.y) {
            return false;
        }
        self.x += dx;
        true
    }

    /// Moves down one row, or locks if blocked. `None` means the piece moved.
    pub fn step_down(&mut self) -> Option<LockOutcome> {
        if self.field.collides(&self.piece, self.x, self.y + 1) {
            return Some(self.lock());
        }
        self.y += 1;
        None
    }

    pub fn hard_drop(&mut self) -> LockOutcome {
        while !self.field.collides(&self.piece, self.x, self.y + 1) {
            self.y += 1;
        }
        self.lock()
    }

    fn lock(&mut self) -> LockOutcome {
        if self.y < 0 {
            self.game_over();
            return LockOutcome::GameOver;
        }

        self.field.lock(&self.piece, self.x, self.y);
        let rows = self.field.clear_full_rows() as u32;
        for _ in 0..rows {
            self.lines += 1;
            self.fall_speed += self.config.fall_speed_increment;
        }
        if rows > 0 {
            log::debug!(
                "cleared {rows} row(s); lines {} fall speed {:.2}/s",
                self.lines,
                self.fall_speed
            );
        }
        self.spawn();
        LockOutcome::Locked { rows_cleared: rows }
    }

    fn game_over(&mut self) {
        self.games_played += 1;
        log::info!(
            "game over with {} line(s); games played: {}",
            self.lines,
            self.games_played
        );
        self.field.clear();
        self.fall_speed = self.config.initial_fall_speed;
        self.fall_timer = 0.0;
        self.lines = 0;
        self.spawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default())
    }

    #[test]
    fn spawn_places_piece_above_field() {
        let mut s = session();
        s.spawn_kind(PieceKind::Box);
        assert_eq!(s.piece_position(), (4, -2));
        s.spawn_kind(PieceKind::Stick);
        assert_eq!(s.piece_position(), (4, -4));
    }

    #[test]
    fn spawn_column_fits_narrow_fields() {
        let mut s = GameSession::new(SessionConfig {
            field_width: 4,
            field_height: 8,
            ..SessionConfig::default()
        });
        s.spawn_kind(PieceKind::Box);
        assert_eq!(s.piece_position(), (1, -2));
    }

    #[test]
    fn opposing_moves_cancel() {
        let mut s = session();
        s.spawn_kind(PieceKind::Box);
        let mut report = TickReport::default();
        s.apply_intents(
            &Intents {
                move_left: true,
                move_right: true,
                ..Intents::default()
            },
            &mut report,
        );
        assert_eq!(s.piece_position(), (4, -2));
    }

    #[test]
    fn rotation_anchors_bottom_edge() {
        let mut s = session();
        s.spawn_kind(PieceKind::Stick);
        assert!(s.rotate());
        assert_eq!((s.piece().width(), s.piece().height()), (4, 1));
        assert_eq!(s.piece_position(), (4, -1));
    }

    #[test]
    fn rotation_clamps_against_right_wall() {
        let mut s = session();
        s.set_active_piece(Piece::make(PieceKind::Stick), 9, 5);
        assert!(s.rotate());
        assert_eq!(s.piece_position(), (6, 8));
    }

    #[test]
    fn zero_elapsed_time_does_not_fall() {
        let mut s = session();
        let before = s.piece_position();
        let mut report = TickReport::default();
        s.advance(0.0, &mut report);
        s.advance(-1.0, &mut report);
        assert_eq!(s.piece_position(), before);
        assert_eq!(s.fall_timer(), 0.0);
    }
}
