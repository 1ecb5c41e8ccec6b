//! Frame timing
//!
//! Converts host timestamps into per-frame deltas. Stalls (tab switches,
//! debugger pauses) are clamped so a single frame can't tunnel the avatar
//! through an obstacle or the ground.

use crate::consts::MAX_FRAME_MS;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_frame_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_MS)
    }
}

impl FrameClock {
    pub fn new(max_frame_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_frame_ms,
        }
    }

    /// Elapsed milliseconds since the previous call, clamped to `[0, max_frame_ms]`
    ///
    /// The first call only records the timestamp and returns 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() && now_ms > last => {
                ((now_ms - last) as f32).min(self.max_frame_ms)
            }
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt
    }

    /// Forget the previous timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
