use std::time::Instant;

use bevy_ecs::prelude::*;
use log::{debug, error, trace};

use crate::clock::GravityClock;
use crate::components::Direction;
use crate::engine::BoardEngine;
use crate::input::{Action, GameEvent, KeyBindings, KeyRepeat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Routes one event to the engine. The only place events are interpreted.
pub fn handle_event(world: &mut World, event: GameEvent, now: Instant) -> Control {
    match event {
        GameEvent::Quit => return Control::Quit,
        GameEvent::KeyDown(code) => {
            let Some(action) = world.resource::<KeyBindings>().action_for(code) else {
                debug!("Ignoring unbound key {code:?}");
                return Control::Continue;
            };
            if action == Action::Quit {
                return Control::Quit;
            }
            world.resource_mut::<KeyRepeat>().press(code, action, now);
            apply_action(world, action);
        }
        GameEvent::KeyUp(code) => world.resource_mut::<KeyRepeat>().release(code),
        GameEvent::GravityTick => {
            trace!("Gravity tick");
            apply_action(world, Action::Shift(Direction::Down));
        }
        GameEvent::RepeatTick => {
            if let Some(action) = world.resource_mut::<KeyRepeat>().fire(now) {
                apply_action(world, action);
            }
        }
    }
    Control::Continue
}

/// Timer events that are due at `now`, gravity first.
pub fn due_timer_events(world: &mut World, now: Instant) -> Vec<GameEvent> {
    let mut events = Vec::with_capacity(2);
    if world.resource_mut::<GravityClock>().fire(now) {
        events.push(GameEvent::GravityTick);
    }
    if world.resource::<KeyRepeat>().is_due(now) {
        events.push(GameEvent::RepeatTick);
    }
    events
}

pub fn apply_action(world: &mut World, action: Action) {
    let mut engine = world.resource_mut::<BoardEngine>();
    if engine.is_game_over() {
        trace!("Game over, dropping {action:?}");
        return;
    }

    let result = match action {
        Action::Shift(direction) => engine.attempt_shift(direction).map(drop),
        Action::Rotate(rotation) => engine.attempt_rotate(rotation).map(drop),
        Action::Hold => engine.hold_swap().map(drop),
        Action::Quit => Ok(()),
    };

    if let Err(err) = result {
        error!("Engine rejected {action:?}: {err}");
    }
}
