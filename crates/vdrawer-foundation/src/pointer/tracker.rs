//! Pointer tracking and capture decisions for a single vertically draggable
//! surface.
//!
//! Capture is lazy: a pointer that lands on the drawer is only handed to the
//! drawer once it travels further than the touch slop along the vertical axis.
//! Until then ordinary content interaction keeps the gesture. Pointers that go
//! down inside the container's top edge band are bound to the drawer even when
//! the drawer itself is not under them, which lets a mostly hidden drawer be
//! pulled from the screen edge.

use crate::geometry::{Point, Rect};
use crate::gesture_constants::{
    DEFAULT_SENSITIVITY, DRAG_THRESHOLD, EDGE_SIZE, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY,
};
use crate::pointer::types::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;
use smallvec::SmallVec;

/// Logical surface a pointer sequence is attributed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    #[default]
    None,
    Content,
    Drawer,
}

/// Current extents of the two surfaces, in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceBounds {
    pub container: Rect,
    pub drawer: Rect,
}

impl SurfaceBounds {
    pub fn new(container: Rect, drawer: Rect) -> Self {
        Self { container, drawer }
    }

    /// Vertical distance the drawer may travel; zero before layout.
    pub fn vertical_drag_range(&self) -> f32 {
        self.drawer.height.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Travel needed before capture, already divided by sensitivity.
    pub touch_slop: f32,
    pub edge_size: f32,
    pub edge_tracking: bool,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl TrackerConfig {
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD / sensitivity.max(f32::EPSILON),
            ..Self::default()
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD / DEFAULT_SENSITIVITY,
            edge_size: EDGE_SIZE,
            edge_tracking: true,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

/// Outcome of a single move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveResult {
    /// No sample for this pointer id.
    Ignored,
    /// The move stays with content interaction.
    PassThrough,
    /// The pointer started in the top edge band and just crossed slop.
    /// Reported at most once per pointer.
    EdgeDragStarted,
    /// A pointer bound to the drawer just crossed slop; the owner decides
    /// whether to capture it.
    SlopExceeded,
    /// The pointer is captured; vertical delta since its previous sample.
    Intercepted(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseInfo {
    pub id: PointerId,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub was_captured: bool,
}

/// Result of [`PointerTracker::process`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerOutcome {
    Down(Surface),
    Move(MoveResult),
    Up(Option<ReleaseInfo>),
    Cancel(Option<ReleaseInfo>),
}

#[derive(Clone, Debug)]
pub struct PointerSample {
    pub id: PointerId,
    pub down: Point,
    pub last: Point,
    pub surface: Surface,
    /// Whether the drawer's own bounds were under the pointer at down.
    pub over_drawer: bool,
    pub edge_touched: bool,
    edge_drag_reported: bool,
    velocity_x: VelocityTracker1D,
    velocity_y: VelocityTracker1D,
}

impl PointerSample {
    fn new(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        let mut velocity_x = VelocityTracker1D::new();
        let mut velocity_y = VelocityTracker1D::new();
        velocity_x.add_data_point(uptime_ms, position.x);
        velocity_y.add_data_point(uptime_ms, position.y);
        Self {
            id,
            down: position,
            last: position,
            surface: Surface::None,
            over_drawer: false,
            edge_touched: false,
            edge_drag_reported: false,
            velocity_x,
            velocity_y,
        }
    }

    fn record(&mut self, position: Point, uptime_ms: i64) {
        self.last = position;
        self.velocity_x.add_data_point(uptime_ms, position.x);
        self.velocity_y.add_data_point(uptime_ms, position.y);
    }

    /// Clamped `(vx, vy)` estimate in px/s.
    pub fn velocity(&self, config: &TrackerConfig) -> (f32, f32) {
        (
            self.velocity_x
                .calculate_velocity_clamped(config.min_fling_velocity, config.max_fling_velocity),
            self.velocity_y
                .calculate_velocity_clamped(config.min_fling_velocity, config.max_fling_velocity),
        )
    }

    pub fn total_dy(&self) -> f32 {
        self.last.y - self.down.y
    }
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    config: TrackerConfig,
    samples: SmallVec<[PointerSample; 4]>,
    captured: Option<PointerId>,
}

impl PointerTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            samples: SmallVec::new(),
            captured: None,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    pub fn sample(&self, id: PointerId) -> Option<&PointerSample> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    fn sample_mut(&mut self, id: PointerId) -> Option<&mut PointerSample> {
        self.samples.iter_mut().find(|sample| sample.id == id)
    }

    pub fn active_pointer_count(&self) -> usize {
        self.samples.len()
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    /// Forces `id` to drive the drawer. Fails only for unknown pointers.
    pub fn capture(&mut self, id: PointerId) -> bool {
        let Some(sample) = self.sample_mut(id) else {
            return false;
        };
        sample.surface = Surface::Drawer;
        self.captured = Some(id);
        log::trace!("pointer {id} captured");
        true
    }

    pub fn release_capture(&mut self) {
        self.captured = None;
    }

    /// Dispatches a raw event to the matching handler.
    pub fn process(&mut self, event: &PointerEvent, bounds: &SurfaceBounds) -> TrackerOutcome {
        match event.kind {
            PointerEventKind::Down => TrackerOutcome::Down(self.on_pointer_down(
                event.id,
                event.position,
                event.uptime_ms,
                bounds,
            )),
            PointerEventKind::Move => TrackerOutcome::Move(self.on_pointer_move(
                event.id,
                event.position,
                event.uptime_ms,
                bounds,
            )),
            PointerEventKind::Up => {
                TrackerOutcome::Up(self.on_pointer_up(event.id, event.position, event.uptime_ms))
            }
            PointerEventKind::Cancel => TrackerOutcome::Cancel(self.on_pointer_cancel(event.id)),
        }
    }

    /// Registers a pointer and attributes it to a surface. No capture decision
    /// is made here.
    pub fn on_pointer_down(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
        bounds: &SurfaceBounds,
    ) -> Surface {
        // A repeated down for a live id restarts that pointer's history.
        self.samples.retain(|sample| sample.id != id);
        if self.captured == Some(id) {
            self.captured = None;
        }

        let mut sample = PointerSample::new(id, position, uptime_ms);
        let has_drawer = bounds.vertical_drag_range() > 0.0;
        sample.over_drawer = has_drawer && bounds.drawer.contains(position.x, position.y);
        sample.edge_touched = has_drawer
            && self.config.edge_tracking
            && bounds.container.contains(position.x, position.y)
            && bounds
                .container
                .in_top_band(position.y, self.config.edge_size);
        sample.surface = if sample.over_drawer || sample.edge_touched {
            Surface::Drawer
        } else if bounds.container.contains(position.x, position.y) {
            Surface::Content
        } else {
            Surface::None
        };

        log::trace!(
            "pointer {id} down at ({:.1}, {:.1}) -> {:?} (edge: {})",
            position.x,
            position.y,
            sample.surface,
            sample.edge_touched
        );
        let surface = sample.surface;
        self.samples.push(sample);
        surface
    }

    /// Updates the pointer's motion history and reports whether this move
    /// belongs to the drawer.
    pub fn on_pointer_move(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
        bounds: &SurfaceBounds,
    ) -> MoveResult {
        let captured = self.captured;
        let slop = self.config.touch_slop;
        let edge_tracking = self.config.edge_tracking;
        let drag_range = bounds.vertical_drag_range();

        let Some(sample) = self.sample_mut(id) else {
            return MoveResult::Ignored;
        };
        let previous = sample.last;
        sample.record(position, uptime_ms);

        match captured {
            Some(captured_id) if captured_id == id => {
                return MoveResult::Intercepted(position.y - previous.y);
            }
            Some(_) => return MoveResult::PassThrough,
            None => {}
        }

        let dx = position.x - sample.down.x;
        let dy = position.y - sample.down.y;

        if sample.edge_touched
            && edge_tracking
            && drag_range > 0.0
            && !sample.edge_drag_reported
            && dy.abs() > slop
        {
            sample.edge_drag_reported = true;
            log::trace!("pointer {id} started an edge drag (dy {dy:.1}, dx {dx:.1})");
            return MoveResult::EdgeDragStarted;
        }

        if sample.surface == Surface::Drawer
            && sample.over_drawer
            && drag_range > 0.0
            && dy.abs() > slop
        {
            return MoveResult::SlopExceeded;
        }

        MoveResult::PassThrough
    }

    /// Finalizes and discards the pointer, returning its release velocity.
    pub fn on_pointer_up(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
    ) -> Option<ReleaseInfo> {
        let index = self.samples.iter().position(|sample| sample.id == id)?;
        let mut sample = self.samples.remove(index);
        sample.record(position, uptime_ms);
        let (velocity_x, velocity_y) = sample.velocity(&self.config);
        let was_captured = self.take_capture(id);
        log::trace!("pointer {id} up, velocity ({velocity_x:.1}, {velocity_y:.1})");
        Some(ReleaseInfo {
            id,
            velocity_x,
            velocity_y,
            was_captured,
        })
    }

    /// Discards the pointer. A cancelled pointer never flings.
    pub fn on_pointer_cancel(&mut self, id: PointerId) -> Option<ReleaseInfo> {
        let index = self.samples.iter().position(|sample| sample.id == id)?;
        self.samples.remove(index);
        let was_captured = self.take_capture(id);
        log::trace!("pointer {id} cancelled");
        Some(ReleaseInfo {
            id,
            velocity_x: 0.0,
            velocity_y: 0.0,
            was_captured,
        })
    }

    /// Drops every pointer, as when an ancestor takes the gesture over.
    /// Returns the release of the captured pointer, if there was one.
    pub fn cancel_all(&mut self) -> Option<ReleaseInfo> {
        let captured = self.captured;
        let release = captured.and_then(|id| self.on_pointer_cancel(id));
        self.samples.clear();
        self.captured = None;
        release
    }

    fn take_capture(&mut self, id: PointerId) -> bool {
        if self.captured == Some(id) {
            self.captured = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../tests/pointer_tracker_tests.rs"]
mod tests;
