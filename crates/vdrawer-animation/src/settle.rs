use crate::easing::{Easing, Lerp};
use std::f32::consts::FRAC_PI_2;

/// Timing parameters for settling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleSpec {
    /// Duration for a full-range settle with no fling velocity.
    pub base_duration_ms: u64,
    pub max_duration_ms: u64,
    pub easing: Easing,
    /// Hard cap on frames. Reaching it snaps to the target, so a settle ends
    /// even when the host stops advancing frame time.
    pub max_frames: u32,
}

impl Default for SettleSpec {
    fn default() -> Self {
        Self {
            base_duration_ms: 256,
            max_duration_ms: 600,
            easing: Easing::QuinticOut,
            max_frames: 240,
        }
    }
}

/// Settle duration in milliseconds for travelling `delta` pixels.
///
/// `velocity` must already be clamped to the fling range (zero when the drawer
/// was not flung). With a fling the drawer keeps roughly the finger's pace;
/// without one the duration grows with the share of `motion_range` covered.
pub fn compute_settle_duration_ms(
    delta: f32,
    velocity: f32,
    motion_range: f32,
    container_extent: f32,
    spec: &SettleSpec,
) -> u64 {
    if delta == 0.0 {
        return 0;
    }
    let half_extent = container_extent.max(1.0) / 2.0;
    let distance_ratio = (delta.abs() / container_extent.max(1.0)).min(1.0);
    let distance = half_extent + half_extent * distance_influence(distance_ratio);

    let velocity = velocity.abs();
    let duration = if velocity > 0.0 {
        4.0 * (1000.0 * (distance / velocity).abs()).round()
    } else {
        let range = delta.abs() / motion_range.max(1.0);
        (range + 1.0) * spec.base_duration_ms as f32
    };
    (duration as u64).min(spec.max_duration_ms)
}

/// Eases the distance term so long hops are not proportionally slower.
fn distance_influence(fraction: f32) -> f32 {
    ((fraction - 0.5) * 0.3 * FRAC_PI_2).sin()
}

/// Output of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    pub value: f32,
    pub finished: bool,
}

/// Frame-stepped tween from a start offset toward a target.
///
/// The target is passed on every step so the owner may move it (for example
/// when the peek height changes mid-settle); progress is time-based and never
/// goes backwards.
#[derive(Debug, Clone)]
pub struct SettleAnimation {
    start: f32,
    duration_nanos: u64,
    easing: Easing,
    max_frames: u32,
    start_time_nanos: Option<u64>,
    /// Furthest point in time reached so far.
    elapsed_nanos: u64,
    frames: u32,
}

impl SettleAnimation {
    pub fn new(start: f32, duration_ms: u64, spec: &SettleSpec) -> Self {
        Self {
            start,
            duration_nanos: duration_ms.saturating_mul(1_000_000),
            easing: spec.easing,
            max_frames: spec.max_frames.max(1),
            start_time_nanos: None,
            elapsed_nanos: 0,
            frames: 0,
        }
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_nanos / 1_000_000
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Moves the start offset, keeping the progress made so far. Used when
    /// the travel range shrinks under a running settle.
    pub fn rebase(&mut self, start: f32) {
        self.start = start;
    }

    pub fn step(&mut self, frame_time_nanos: u64, target: f32) -> SettleFrame {
        self.frames += 1;
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        // A frame stamped before an earlier one must not move the value back.
        self.elapsed_nanos = self
            .elapsed_nanos
            .max(frame_time_nanos.saturating_sub(start_time));
        let elapsed_nanos = self.elapsed_nanos;

        let linear_progress = if self.duration_nanos == 0 {
            1.0
        } else {
            (elapsed_nanos as f32 / self.duration_nanos as f32).clamp(0.0, 1.0)
        };

        if linear_progress >= 1.0 || self.frames >= self.max_frames {
            if linear_progress < 1.0 {
                log::debug!(
                    "settle hit the {} frame cap, snapping to {target:.1}",
                    self.max_frames
                );
            }
            return SettleFrame {
                value: target,
                finished: true,
            };
        }

        let progress = self.easing.transform(linear_progress);
        SettleFrame {
            value: self.start.lerp(&target, progress),
            finished: false,
        }
    }
}

#[cfg(test)]
#[path = "tests/settle_tests.rs"]
mod tests;
