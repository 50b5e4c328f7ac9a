//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `advance`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use entity::{Body, EnemyData, Entity, EntityKind, Frame, PlayerData};
pub use spawner::{Spawner, difficulty_scale, spawn_interval};
pub use session::{SessionSummary, simulate};
pub use state::{GameEvent, GamePhase, World};
pub use tick::{TickInput, advance};
