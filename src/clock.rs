use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;

/// Fixed-cadence gravity timer.
#[derive(Resource, Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    next_tick: Instant,
}

impl GravityClock {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.next_tick
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Consumes one due tick. A loop that fell behind by several intervals
    /// gets a single tick, not a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        true
    }
}
