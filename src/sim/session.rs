//! Headless sessions
//!
//! Runs a full autopilot session at a fixed step with no window, for the
//! native binary and for soak tests.

use glam::Vec2;
use serde::Serialize;

use super::state::{GameEvent, GamePhase, World};
use super::tick::{TickInput, advance};

/// Outcome of a headless session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub score: u64,
    pub lives: u32,
    pub frames: u64,
    pub elapsed_secs: f32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub hits_taken: u32,
    pub game_over: bool,
}

/// Play an autopilot session until game over or `max_secs` of game time
pub fn simulate(seed: u64, bounds: Vec2, dt: f32, max_secs: f32) -> SessionSummary {
    let mut world = World::new(seed, bounds);
    world.start();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut summary = SessionSummary {
        seed,
        score: 0,
        lives: world.lives,
        frames: 0,
        elapsed_secs: 0.0,
        enemies_spawned: 0,
        enemies_destroyed: 0,
        hits_taken: 0,
        game_over: false,
    };
    if dt.is_nan() || dt <= 0.0 {
        log::warn!("Refusing to simulate with a step of {dt}");
        return summary;
    }

    while world.is_running() && world.elapsed < max_secs {
        advance(&mut world, &input, dt);
        summary.frames += 1;
        for event in world.take_events() {
            match event {
                GameEvent::EnemySpawned => summary.enemies_spawned += 1,
                GameEvent::EnemyDestroyed { .. } => summary.enemies_destroyed += 1,
                GameEvent::PlayerHit { lives } => {
                    summary.hits_taken += 1;
                    log::debug!("Hit at {:.2}s, {} lives left", world.elapsed, lives);
                }
                GameEvent::Started | GameEvent::GameOver { .. } => {}
            }
        }
    }

    summary.score = world.score;
    summary.lives = world.lives;
    summary.elapsed_secs = world.elapsed;
    summary.game_over = world.phase == GamePhase::GameOver;
    summary
}
