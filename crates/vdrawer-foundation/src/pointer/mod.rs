mod tracker;
mod types;

pub use tracker::{
    MoveResult, PointerSample, PointerTracker, ReleaseInfo, Surface, SurfaceBounds, TrackerConfig,
    TrackerOutcome,
};
pub use types::{PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::tracker::{
        MoveResult, PointerSample, PointerTracker, ReleaseInfo, Surface, SurfaceBounds,
        TrackerConfig, TrackerOutcome,
    };
    pub use super::types::{PointerEvent, PointerEventKind, PointerId};
}
