//! Platform abstraction layer
//!
//! Host-facing state that is still plain data, so it can be tested natively:
//! - Input sampling (keys, pointer)
//! - Frame pacing
//! - Viewport / device pixel ratio

pub mod clock;
pub mod input;
pub mod viewport;

pub use clock::FrameClock;
pub use input::{InputState, KeyCommand, key_command, pointer_position};
pub use viewport::{Viewport, effective_dpr};
