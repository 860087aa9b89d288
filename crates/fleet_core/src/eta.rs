//! Advisory ETA jitter.
//!
//! The displayed minutes-to-arrival drift downward with a fixed per-tick
//! probability, uncorrelated with actual position or speed. This is
//! documented cosmetic randomness carried over from the reference behavior,
//! not an arrival-time model.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-tick probability that a vehicle's ETA drops by one minute.
pub const DEFAULT_DECREMENT_PROBABILITY: f64 = 0.2;

#[derive(Resource)]
pub struct EtaModel {
    rng: StdRng,
    decrement_probability: f64,
}

impl EtaModel {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_probability(seed, DEFAULT_DECREMENT_PROBABILITY)
    }

    pub fn with_probability(seed: Option<u64>, decrement_probability: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            decrement_probability: decrement_probability.clamp(0.0, 1.0),
        }
    }

    /// Roll the per-tick drift for one vehicle.
    pub fn should_decrement(&mut self) -> bool {
        self.rng.gen_bool(self.decrement_probability)
    }
}
