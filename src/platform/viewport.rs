//! Viewport sizing
//!
//! Game coordinates are CSS pixels; the backing store is scaled by the
//! device pixel ratio, capped at 2x.

use glam::Vec2;

use crate::consts::MAX_DEVICE_PIXEL_RATIO;

/// Clamp a reported device pixel ratio to [1, 2]; junk values become 1
pub fn effective_dpr(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Viewport in CSS pixels plus the pixel ratio used for the backing store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub css_width: f32,
    pub css_height: f32,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(css_width: f32, css_height: f32, raw_dpr: f64) -> Self {
        Self {
            css_width,
            css_height,
            dpr: effective_dpr(raw_dpr),
        }
    }

    /// Playfield size for the simulation
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.css_width, self.css_height)
    }

    /// Canvas backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.css_width as f64 * self.dpr).floor() as u32,
            (self.css_height as f64 * self.dpr).floor() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpr_is_capped() {
        assert_eq!(effective_dpr(3.0), 2.0);
        assert_eq!(effective_dpr(1.5), 1.5);
        assert_eq!(effective_dpr(0.5), 1.0);
        assert_eq!(effective_dpr(f64::NAN), 1.0);
    }

    #[test]
    fn test_backing_size() {
        let vp = Viewport::new(1280.0, 720.0, 3.0);
        assert_eq!(vp.backing_size(), (2560, 1440));
        assert_eq!(vp.bounds(), Vec2::new(1280.0, 720.0));

        let vp = Viewport::new(333.0, 200.0, 1.5);
        assert_eq!(vp.backing_size(), (499, 300));
    }
}
