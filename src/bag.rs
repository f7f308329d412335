//! 7-bag randomizer.
//!
//! Each bag holds one of every kind in random order and is drawn without
//! replacement. The following bag is shuffled one bag ahead so the preview
//! can look across a refill.

use std::collections::VecDeque;

use log::debug;

use crate::components::TetrominoType;
use crate::game::BAG_SIZE;

#[derive(Debug, Clone)]
pub struct Bag {
    current: VecDeque<TetrominoType>,
    upcoming: Vec<TetrominoType>,
    rng: fastrand::Rng,
}

impl Bag {
    /// Creates an empty bag. Seeded bags produce the same sequence every run.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let upcoming = Self::shuffled(&mut rng);
        Self {
            current: VecDeque::with_capacity(BAG_SIZE),
            upcoming,
            rng,
        }
    }

    fn shuffled(rng: &mut fastrand::Rng) -> Vec<TetrominoType> {
        let mut kinds = TetrominoType::ALL.to_vec();
        rng.shuffle(&mut kinds);
        kinds
    }

    fn refill(&mut self) {
        let next = Self::shuffled(&mut self.rng);
        self.current = std::mem::replace(&mut self.upcoming, next).into();
        debug!("Bag refilled: {:?}", self.current);
    }

    /// Takes the next kind, refilling first when the current bag is empty.
    pub fn draw(&mut self) -> TetrominoType {
        if self.current.is_empty() {
            self.refill();
        }
        match self.current.pop_front() {
            Some(kind) => kind,
            None => unreachable!("a refilled bag always holds {BAG_SIZE} kinds"),
        }
    }

    /// The next `count` kinds in draw order, at most one bag past the current.
    #[must_use]
    pub fn peek(&self, count: usize) -> Vec<TetrominoType> {
        self.current
            .iter()
            .chain(self.upcoming.iter())
            .take(count)
            .copied()
            .collect()
    }

    /// Kinds left in the current bag before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.current.len()
    }
}
