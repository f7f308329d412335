#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

//! Board rules: movement, rotation, gravity, lock-in, line clears, hold and
//! game over.
//!
//! Every mutation queues [`Notification`]s describing what changed. The owner
//! drains them after each call and hands them to a
//! [`Renderer`](crate::renderer::Renderer); the engine never calls out.

use std::fmt;

use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use ratatui::style::Color;

use crate::bag::Bag;
use crate::components::{
    ActivePiece, Cell, Direction, HeldPiece, Rotation, SettledBlocks, TetrominoType,
};
use crate::config::RulesConfig;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Cleared,
    GameOver,
}

/// Why the active piece is being redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// A new piece entered play after a lock-in.
    Refresh,
    Move,
    /// The piece entered play through the hold slot.
    Hold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    PieceMoved {
        blocks: [Cell; 4],
        color: Color,
        mode: DrawMode,
    },
    HoldChanged(Option<HeldPiece>),
    PreviewChanged(Vec<TetrominoType>),
    SettledChanged {
        did_clear: bool,
    },
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftOutcome {
    Moved,
    Rejected,
    Locked { cleared_rows: Vec<i32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A mutating operation was called after the game ended.
    GameOver,
    /// No piece is in play outside of the spawn transition.
    NoActivePiece,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::GameOver => write!(f, "operation attempted after game over"),
            EngineError::NoActivePiece => write!(f, "no active piece in play"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Resource, Debug, Clone)]
pub struct BoardEngine {
    active: Option<ActivePiece>,
    settled: SettledBlocks,
    hold: Option<HeldPiece>,
    hold_used: bool,
    hold_lock_out: bool,
    bag: Bag,
    preview_count: usize,
    phase: Phase,
    notifications: Vec<Notification>,
}

impl BoardEngine {
    /// Starts a game: empty board and hold slot, first piece drawn.
    #[must_use]
    pub fn new(rules: &RulesConfig) -> Self {
        Self::with_bag(Bag::new(rules.seed), rules)
    }

    #[must_use]
    pub fn with_bag(bag: Bag, rules: &RulesConfig) -> Self {
        let mut engine = Self {
            active: None,
            settled: SettledBlocks::new(),
            hold: None,
            hold_used: false,
            hold_lock_out: rules.hold_lock_out,
            bag,
            preview_count: rules.preview_count,
            phase: Phase::Spawning,
            notifications: Vec::new(),
        };

        engine.notify(Notification::SettledChanged { did_clear: false });
        engine.notify(Notification::HoldChanged(None));
        engine.spawn_from_bag(DrawMode::Refresh);
        engine
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn settled(&self) -> &SettledBlocks {
        &self.settled
    }

    #[must_use]
    pub fn held(&self) -> Option<HeldPiece> {
        self.hold
    }

    #[must_use]
    pub fn preview(&self) -> Vec<TetrominoType> {
        self.bag.peek(self.preview_count)
    }

    /// Hands over every notification queued since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Whether `candidate` lies inside the board columns, above the floor and
    /// clear of settled blocks. Rows above the board are allowed.
    #[must_use]
    pub fn validate_placement(&self, candidate: &[Cell; 4]) -> bool {
        candidate.iter().all(|cell| {
            (0..BOARD_WIDTH as i32).contains(&cell.col)
                && cell.row < BOARD_HEIGHT as i32
                && !self.settled.is_occupied(*cell)
        })
    }

    pub fn attempt_shift(&mut self, direction: Direction) -> Result<ShiftOutcome, EngineError> {
        let piece = self.current()?;
        let candidate = piece.shifted(direction);

        if self.validate_placement(&candidate.blocks) {
            trace!("{:?} shifted {:?}", piece.kind, direction);
            self.commit(candidate);
            return Ok(ShiftOutcome::Moved);
        }

        if direction == Direction::Down {
            let cleared_rows = self.lock_in()?;
            Ok(ShiftOutcome::Locked { cleared_rows })
        } else {
            Ok(ShiftOutcome::Rejected)
        }
    }

    /// Rotates around the piece's pivot. A colliding rotation is rejected;
    /// there is no kick to a nearby position.
    pub fn attempt_rotate(&mut self, rotation: Rotation) -> Result<bool, EngineError> {
        let piece = self.current()?;
        let candidate = piece.rotated(rotation);

        if !self.validate_placement(&candidate.blocks) {
            return Ok(false);
        }

        trace!("{:?} rotated {:?}", piece.kind, rotation);
        self.commit(candidate);
        Ok(true)
    }

    /// One step of gravity.
    pub fn tick(&mut self) -> Result<ShiftOutcome, EngineError> {
        self.attempt_shift(Direction::Down)
    }

    /// Sets the active piece aside. Returns `Ok(false)` when the piece in play
    /// already came out of a hold and lock-out is enabled.
    pub fn hold_swap(&mut self) -> Result<bool, EngineError> {
        self.current()?;
        if self.hold_lock_out && self.hold_used {
            debug!("Hold rejected: already used for this piece");
            return Ok(false);
        }

        let Some(piece) = self.active.take() else {
            return Err(EngineError::NoActivePiece);
        };
        let previous = self.hold.replace(HeldPiece::from(piece.kind));
        self.hold_used = true;
        self.notify(Notification::HoldChanged(self.hold));

        match previous {
            Some(held) => {
                debug!("Swapped {:?} for held {:?}", piece.kind, held.kind);
                self.spawn(held.kind, DrawMode::Hold);
            }
            None => {
                debug!("Moved {:?} into the empty hold slot", piece.kind);
                self.spawn_from_bag(DrawMode::Hold);
            }
        }
        Ok(true)
    }

    fn current(&self) -> Result<ActivePiece, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        self.active.ok_or(EngineError::NoActivePiece)
    }

    fn commit(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.notify(Notification::PieceMoved {
            blocks: piece.blocks,
            color: piece.color(),
            mode: DrawMode::Move,
        });
    }

    fn lock_in(&mut self) -> Result<Vec<i32>, EngineError> {
        let Some(piece) = self.active.take() else {
            return Err(EngineError::NoActivePiece);
        };

        self.phase = Phase::Locking;
        for cell in piece.blocks {
            self.settled.insert(cell, piece.kind);
        }

        let cleared_rows = self.settled.clear_full_rows(BOARD_WIDTH);
        self.phase = Phase::Cleared;
        self.hold_used = false;
        self.notify(Notification::SettledChanged {
            did_clear: !cleared_rows.is_empty(),
        });

        if cleared_rows.is_empty() {
            debug!("Locked {:?}", piece.kind);
        } else {
            info!("Locked {:?}, cleared rows {:?}", piece.kind, cleared_rows);
        }

        if self.settled.reaches_hidden_zone() {
            self.end_game();
        } else {
            self.spawn_from_bag(DrawMode::Refresh);
        }

        Ok(cleared_rows)
    }

    fn spawn_from_bag(&mut self, mode: DrawMode) {
        self.phase = Phase::Spawning;
        let kind = self.bag.draw();
        self.spawn(kind, mode);
        if !self.is_game_over() {
            self.notify(Notification::PreviewChanged(self.preview()));
        }
    }

    fn spawn(&mut self, kind: TetrominoType, mode: DrawMode) {
        self.phase = Phase::Spawning;
        let piece = ActivePiece::spawn(kind);
        if !self.validate_placement(&piece.blocks) {
            self.end_game();
            return;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.notify(Notification::PieceMoved {
            blocks: piece.blocks,
            color: piece.color(),
            mode,
        });
    }

    fn end_game(&mut self) {
        info!("Game over with {} settled blocks", self.settled.len());
        self.active = None;
        self.phase = Phase::GameOver;
        self.notify(Notification::GameOver);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    #[cfg(test)]
    pub(crate) fn settled_mut(&mut self) -> &mut SettledBlocks {
        &mut self.settled
    }

    #[cfg(test)]
    pub(crate) fn place_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }
}
