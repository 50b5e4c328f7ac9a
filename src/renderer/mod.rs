//! WebGPU rendering module
//!
//! The scene is built on the CPU as a flat triangle list in CSS pixels and
//! drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::Renderer;
pub use scene::build_frame;
pub use vertex::Vertex;
