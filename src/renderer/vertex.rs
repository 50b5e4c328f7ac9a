//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// `0xRRGGBB` plus alpha to a color array
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const BACKGROUND: [f32; 4] = hex(0x0b1020, 1.0);
    pub const STAR: [f32; 4] = hex(0xffffff, 0.08);
    pub const PLAYER: [f32; 4] = hex(0x69e1ff, 1.0);
    pub const COCKPIT: [f32; 4] = hex(0x1a2a44, 1.0);
    pub const BULLET: [f32; 4] = hex(0xffd166, 1.0);
    pub const ENEMY: [f32; 4] = hex(0xff6b6b, 1.0);
    pub const ENEMY_VISOR: [f32; 4] = hex(0x2b0d0d, 1.0);
    /// Damage flash, alpha scaled by intensity at draw time
    pub const FLASH: [f32; 4] = hex(0xff5050, 1.0);
}
