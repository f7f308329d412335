#![warn(clippy::all, clippy::pedantic)]

use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use log::trace;

use crate::components::{Direction, Rotation};

/// Everything the event loop reacts to, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    GravityTick,
    RepeatTick,
}

/// Maps a terminal event to a game event. Terminal auto-repeat is dropped
/// because [`KeyRepeat`] produces repeats itself.
#[must_use]
pub fn translate(event: &Event) -> Option<GameEvent> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameEvent::Quit);
    }
    match key.kind {
        KeyEventKind::Press => Some(GameEvent::KeyDown(key.code)),
        KeyEventKind::Release => Some(GameEvent::KeyUp(key.code)),
        KeyEventKind::Repeat => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(Direction),
    Rotate(Rotation),
    Hold,
    Quit,
}

impl Action {
    /// Movement and rotation keep firing while their key is held.
    #[must_use]
    pub fn repeats(self) -> bool {
        matches!(self, Action::Shift(_) | Action::Rotate(_))
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Action)>,
}

impl KeyBindings {
    /// Binds `code` to `action`, replacing any earlier binding of `code`.
    pub fn bind(&mut self, code: KeyCode, action: Action) {
        self.bindings.retain(|(bound, _)| *bound != code);
        self.bindings.push((code, action));
    }

    #[must_use]
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, action)| *action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    action: Action,
    next_fire: Instant,
}

// Repeat timer for the most recently pressed movement or rotation key
#[derive(Resource, Debug, Clone)]
pub struct KeyRepeat {
    held: Option<HeldKey>,
    delay: Duration,
    interval: Duration,
    enabled: bool,
}

impl KeyRepeat {
    #[must_use]
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            held: None,
            delay,
            interval,
            enabled: true,
        }
    }

    /// Terminals without key release events would never cancel a repeat, so
    /// the timer is switched off and their own auto-repeat is used instead.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.held = None;
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts repeating `action` after the initial delay. Replaces any key
    /// already held.
    pub fn press(&mut self, code: KeyCode, action: Action, now: Instant) {
        if !self.enabled || !action.repeats() {
            return;
        }
        self.held = Some(HeldKey {
            code,
            action,
            next_fire: now + self.delay,
        });
    }

    /// Cancels the repeat if `code` is the held key.
    pub fn release(&mut self, code: KeyCode) {
        if self.held.is_some_and(|held| held.code == code) {
            trace!("Repeat cancelled for {code:?}");
            self.held = None;
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.held.map(|held| held.next_fire)
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Returns the held action when its repeat is due and schedules the next one.
    pub fn fire(&mut self, now: Instant) -> Option<Action> {
        let interval = self.interval;
        let held = self.held.as_mut()?;
        if now < held.next_fire {
            return None;
        }
        held.next_fire += interval;
        if held.next_fire <= now {
            held.next_fire = now + interval;
        }
        Some(held.action)
    }
}
