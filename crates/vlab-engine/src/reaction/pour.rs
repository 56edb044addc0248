//! Pour animation: eases the fill level from its value at pour start up to
//! the target level over the chemical's pour duration.

use crate::anim::{ease, Easing};

/// One in-flight fill animation. At most one pour is active per vessel;
/// starting a new pour while one is running begins from the interpolated
/// current level, so the fill never jumps.
#[derive(Debug, Clone, Copy)]
pub struct Pour {
    from: f32,
    to: f32,
    started_at_ms: f64,
    duration_ms: f64,
}

impl Pour {
    pub fn new(from: f32, to: f32, started_at_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            started_at_ms,
            duration_ms,
        }
    }

    /// A pour that is already finished, used when restoring saved state.
    pub fn settled(level: f32) -> Self {
        Self {
            from: level,
            to: level,
            started_at_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    /// Fill level at `now_ms`, eased and clamped to the pour's range.
    pub fn fill_at(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        ease(self.from, self.to, t, Easing::QuadOut)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        now_ms >= self.started_at_ms + self.duration_ms
    }
}
