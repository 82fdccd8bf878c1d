//! Foundation elements for the vertical drawer: geometry, pointer input,
//! velocity estimation and the pointer tracker that turns raw events into
//! capture decisions.

pub mod gesture_constants;
mod geometry;
pub mod pointer;
pub mod velocity_tracker;

pub use geometry::{Point, Rect, Size};
pub use pointer::{
    MoveResult, PointerEvent, PointerEventKind, PointerId, PointerSample, PointerTracker,
    ReleaseInfo, Surface, SurfaceBounds, TrackerConfig, TrackerOutcome,
};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::gesture_constants::*;
    pub use crate::pointer::prelude::*;
    pub use crate::velocity_tracker::VelocityTracker1D;
}
