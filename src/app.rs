#![warn(clippy::all, clippy::pedantic)]

use std::time::Instant;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::info;

use crate::clock::GravityClock;
use crate::config::Config;
use crate::engine::BoardEngine;
use crate::input::{GameEvent, KeyRepeat};
use crate::renderer::{self, Renderer};
use crate::systems::{self, Control};

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    sender: Sender<GameEvent>,
    events: Receiver<GameEvent>,
}

impl App {
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::starting_at(config, Instant::now())
    }

    /// Builds the app with its timers measured from `now`.
    pub fn starting_at(config: &Config, now: Instant) -> AppResult<Self> {
        let bindings = config.keys.resolve()?;

        let mut world = World::new();
        world.insert_resource(BoardEngine::new(&config.rules));
        world.insert_resource(bindings);
        world.insert_resource(KeyRepeat::new(
            config.timing.repeat_delay(),
            config.timing.repeat_interval(),
        ));
        world.insert_resource(GravityClock::new(config.timing.gravity(), now));

        let (sender, events) = unbounded();

        Ok(Self {
            world,
            should_quit: false,
            sender,
            events,
        })
    }

    /// A handle for event sources such as the input thread.
    #[must_use]
    pub fn sender(&self) -> Sender<GameEvent> {
        self.sender.clone()
    }

    #[must_use]
    pub fn engine(&self) -> &BoardEngine {
        self.world.resource::<BoardEngine>()
    }

    pub fn set_key_repeat(&mut self, enabled: bool) {
        self.world.resource_mut::<KeyRepeat>().set_enabled(enabled);
    }

    pub fn dispatch(&mut self, event: GameEvent, now: Instant) {
        if systems::handle_event(&mut self.world, event, now) == Control::Quit {
            info!("Quit requested");
            self.should_quit = true;
        }
    }

    /// Drains every queued event in arrival order, then fires due timers.
    pub fn pump(&mut self, now: Instant) {
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event, now);
            if self.should_quit {
                return;
            }
        }
        for event in systems::due_timer_events(&mut self.world, now) {
            self.dispatch(event, now);
        }
    }

    /// Earliest instant a timer needs attention.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        let gravity = self.world.resource::<GravityClock>().deadline();
        match self.world.resource::<KeyRepeat>().deadline() {
            Some(repeat) => gravity.min(repeat),
            None => gravity,
        }
    }

    /// Blocks until an event arrives or a timer is due, processes everything
    /// pending and forwards the resulting changes to `renderer`.
    pub fn step<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        // The app holds a sender itself, so the wait only ends on an event or
        // the deadline. Shutdown arrives as `GameEvent::Quit`.
        if let Ok(event) = self.events.recv_deadline(self.next_deadline()) {
            self.dispatch(event, Instant::now());
        }
        if !self.should_quit {
            self.pump(Instant::now());
        }
        self.present(renderer)
    }

    pub fn present<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let mut engine = self.world.resource_mut::<BoardEngine>();
        renderer::present(&mut engine, renderer)
    }
}
