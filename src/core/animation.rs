//! Range animation.
//!
//! Zoom and pan mutations apply to the model immediately; a [`RangeTween`]
//! only shapes what the axis reports as its visible window while the
//! transition plays. The host drives time explicitly through
//! `advance(delta_ms)`, so the engine never reads a wall clock.

use tracing::trace;

/// Fixed transition duration, milliseconds.
pub const ANIMATION_DURATION_MS: f64 = 250.0;

/// An in-flight interpolation from one `[from, to]` window to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTween {
    from_start: f64,
    to_start: f64,
    from_end: f64,
    to_end: f64,
    elapsed_ms: f64,
}

impl RangeTween {
    #[must_use]
    pub fn new(from_start: f64, to_start: f64, from_end: f64, to_end: f64) -> Self {
        trace!(
            from_start,
            to_start, from_end, to_end, "starting range animation"
        );
        Self {
            from_start,
            to_start,
            from_end,
            to_end,
            elapsed_ms: 0.0,
        }
    }

    /// Advances by `delta_ms`. Returns `true` while the tween is still
    /// running, `false` once it has reached its target.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        self.elapsed_ms = (self.elapsed_ms + delta_ms.max(0.0)).min(ANIMATION_DURATION_MS);
        !self.is_finished()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= ANIMATION_DURATION_MS
    }

    /// Target window, reported exactly once the tween finishes.
    #[must_use]
    pub fn target(&self) -> (f64, f64) {
        (self.from_end, self.to_end)
    }

    /// Current interpolated window.
    #[must_use]
    pub fn current(&self) -> (f64, f64) {
        if self.is_finished() {
            return (self.from_end, self.to_end);
        }
        let t = self.elapsed_ms / ANIMATION_DURATION_MS;
        (
            lerp(self.from_start, self.from_end, t),
            lerp(self.to_start, self.to_end, t),
        )
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
