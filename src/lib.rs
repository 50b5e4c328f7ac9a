//! Star Blaster - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, session state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input sampling, frame pacing and viewport math
//! - `hud`: Score/lives text and start/game-over overlays
//! - `edge`: Static JSON request handlers

pub mod edge;
pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use error::{GameError, Result};
pub use hud::{HudController, HudSink, HudSnapshot};

/// Game configuration constants
pub mod consts {
    /// Delta used on the first frame of a session (and for bogus clock gaps)
    pub const NOMINAL_DT: f32 = 0.016;
    /// Largest delta a single frame may advance (stalled tab protection)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Device pixel ratio is capped to keep the backing store small
    pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 42.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 300.0; // px/s
    /// Player spawns this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 120.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Minimum time between accepted shots (seconds)
    pub const FIRE_INTERVAL: f32 = 0.14;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 600.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 36.0;
    pub const ENEMY_SPAWN_Y: f32 = -40.0;
    pub const ENEMY_HP: u32 = 1;
    /// Wobble phase advance (radians per second)
    pub const ENEMY_WOBBLE_RATE: f32 = 2.0;
    /// Lateral wobble drift amplitude (px/s)
    pub const ENEMY_WOBBLE_AMPLITUDE: f32 = 40.0;

    /// Spawner
    pub const SPAWN_MARGIN: f32 = 24.0;
    pub const ENEMY_BASE_SPEED: f32 = 90.0;
    pub const ENEMY_SPEED_JITTER: f32 = 50.0;
    pub const DIFFICULTY_START: f32 = 0.6;
    pub const DIFFICULTY_CAP: f32 = 1.8;
    /// Seconds of play for difficulty to grow by 1.0
    pub const DIFFICULTY_RAMP_SECS: f32 = 30.0;
    pub const SPAWN_INTERVAL_START: f32 = 1.1;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.35;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.03; // seconds shaved per second of play

    /// Session
    pub const START_LIVES: u32 = 3;
    pub const KILL_SCORE: u64 = 10;

    /// Damage flash
    pub const FLASH_DECAY: f32 = 5.0; // intensity per second
    pub const FLASH_MAX_ALPHA: f32 = 0.35;

    /// Background star field
    pub const STAR_COUNT: u32 = 60;
    pub const STAR_SIZE: f32 = 2.0;
}
