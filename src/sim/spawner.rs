//! Enemy spawner with a time-based difficulty ramp
//!
//! Spawn rate and enemy speed both grow linearly with elapsed session time
//! until they hit their caps. There is no limit on live enemies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::*;

/// Difficulty multiplier on enemy base speed
pub fn difficulty_scale(elapsed: f32) -> f32 {
    (DIFFICULTY_START + elapsed / DIFFICULTY_RAMP_SECS).min(DIFFICULTY_CAP)
}

/// Countdown reset value after a spawn
pub fn spawn_interval(elapsed: f32) -> f32 {
    (SPAWN_INTERVAL_START - elapsed * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_FLOOR)
}

/// Countdown-driven enemy spawner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next spawn; fires at or below zero
    pub timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self { timer: 0.0 }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Advance the countdown. Returns a new enemy when it elapses.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        elapsed: f32,
        width: f32,
        rng: &mut R,
    ) -> Option<Entity> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = spawn_interval(elapsed);
        Some(spawn_enemy(elapsed, width, rng))
    }
}

/// Build an enemy at a random column inside the side margins
pub fn spawn_enemy<R: Rng>(elapsed: f32, width: f32, rng: &mut R) -> Entity {
    let x = SPAWN_MARGIN + rng.random::<f32>() * (width - SPAWN_MARGIN * 2.0);
    let speed =
        ENEMY_BASE_SPEED * difficulty_scale(elapsed) + rng.random::<f32>() * ENEMY_SPEED_JITTER;
    let wobble_phase = rng.random::<f32>() * std::f32::consts::TAU;
    log::trace!("Spawning enemy at x={x:.1} speed={speed:.1}");
    Entity::enemy(x, ENEMY_SPAWN_Y, speed, wobble_phase)
}
