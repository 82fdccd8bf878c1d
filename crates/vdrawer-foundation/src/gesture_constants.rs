//! Shared gesture constants for drawer capture and settling.
//!
//! Values are in logical pixels (and logical pixels per second). They follow
//! the platform conventions a touch user expects from a system drawer.

/// Drag threshold in logical pixels before a pointer may be captured.
///
/// The effective slop is this value divided by the configured sensitivity, so
/// a sensitivity of 1.5 captures after roughly 5.3 px of travel.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Default capture sensitivity.
pub const DEFAULT_SENSITIVITY: f32 = 1.5;

/// Height of the band along the container's top edge that starts edge drags.
pub const EDGE_SIZE: f32 = 20.0;

/// Release velocities below this magnitude count as no fling at all.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
