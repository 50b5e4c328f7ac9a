//! Frame pacing from display-refresh timestamps

use crate::consts::{MAX_FRAME_DT, NOMINAL_DT};

/// Turns refresh-callback timestamps into simulation deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Forget the previous timestamp; the next frame gets the nominal delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous call, clamped to `MAX_FRAME_DT`.
    ///
    /// The first frame, and any gap that is zero, negative or not finite,
    /// gets `NOMINAL_DT`.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => {
                let gap = ((now_ms - last) / 1000.0) as f32;
                if gap.is_finite() && gap > 0.0 {
                    gap.min(MAX_FRAME_DT)
                } else {
                    NOMINAL_DT
                }
            }
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
