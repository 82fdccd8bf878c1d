//! Drag-capture and settle state machine.
//!
//! ```text
//! Idle ──capture──▶ Capturing ──move──▶ Dragging ──release──▶ Settling ──done──▶ Idle
//!   └───────────────── open()/close() ─────────────────────────▶ Settling
//! ```
//!
//! Every offset write goes through [`DrawerGeometry::clamp_top`], so the drawer
//! never leaves `[rest_closed_top, 0]`, not even for a single move.

use crate::config::DrawerConfig;
use crate::drawer::geometry::{DrawerGeometry, RestPosition};
use smallvec::SmallVec;
use vdrawer_animation::{compute_settle_duration_ms, SettleAnimation};
use vdrawer_foundation::{
    MoveResult, Point, PointerEvent, PointerEventKind, PointerId, PointerTracker, ReleaseInfo,
    Size, Surface,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Capturing,
    Dragging,
    Settling,
}

/// Side effects of a controller operation, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawerEffect {
    /// Apply this top offset to the drawer surface.
    PlaceDrawer { top: f32 },
    /// Offset changed while dragging or settling.
    OffsetChanging { show_height: i32 },
    /// Openness flipped on return to idle.
    OpennessChanged(bool),
    /// Geometry must be recomputed by the layout collaborator.
    RequestLayout,
}

pub type DrawerEffects = SmallVec<[DrawerEffect; 4]>;

#[derive(Debug)]
struct ActiveSettle {
    target: RestPosition,
    animation: SettleAnimation,
}

#[derive(Debug)]
pub struct DragSettleController {
    config: DrawerConfig,
    geometry: DrawerGeometry,
    tracker: PointerTracker,
    state: DragState,
    current_top: f32,
    is_open: bool,
    placed: bool,
    settle: Option<ActiveSettle>,
    /// `can_scroll` as it was when the current gesture began.
    gesture_can_scroll: bool,
}

impl DragSettleController {
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            geometry: DrawerGeometry::new(Size::ZERO, Size::ZERO, config.peek_height),
            tracker: PointerTracker::new(config.tracker_config()),
            state: DragState::Idle,
            current_top: 0.0,
            is_open: false,
            placed: false,
            settle: None,
            gesture_can_scroll: config.can_scroll,
            config,
        }
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn geometry(&self) -> &DrawerGeometry {
        &self.geometry
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn current_top(&self) -> f32 {
        self.current_top
    }

    pub fn show_height(&self) -> i32 {
        self.geometry.show_height(self.current_top)
    }

    /// Openness as of the last return to idle.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_settling(&self) -> bool {
        self.state == DragState::Settling
    }

    /// Rest position the running settle heads for.
    pub fn settle_target(&self) -> Option<RestPosition> {
        self.settle.as_ref().map(|settle| settle.target)
    }

    /// Applies a geometry pass from the layout collaborator.
    pub fn set_geometry(&mut self, content: Size, drawer: Size) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        self.geometry.set_surfaces(content, drawer);
        if !self.geometry.is_known() {
            log::trace!("drawer geometry not known yet");
            return effects;
        }

        if !self.placed {
            self.placed = true;
            self.current_top = self.geometry.rest_closed_top();
            self.is_open = self.current_top == self.geometry.rest_open_top();
            log::debug!(
                "drawer placed at {:.1} (height {:.1}, peek {:.1})",
                self.current_top,
                self.geometry.drawer_height(),
                self.geometry.peek_height()
            );
            effects.push(DrawerEffect::PlaceDrawer {
                top: self.current_top,
            });
            return effects;
        }

        match self.state {
            DragState::Idle => {
                let rest = if self.is_open {
                    RestPosition::Open
                } else {
                    RestPosition::Closed
                };
                self.apply_top(self.geometry.rest_top(rest), &mut effects);
            }
            DragState::Capturing | DragState::Dragging => {
                self.apply_top(self.current_top, &mut effects);
            }
            // The target is re-resolved every frame; only the offset needs care.
            DragState::Settling => self.clamp_running_settle(&mut effects),
        }
        effects
    }

    pub fn set_can_scroll(&mut self, can_scroll: bool) {
        self.config.can_scroll = can_scroll;
    }

    pub fn set_peek_height(&mut self, peek_height: f32) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        let peek_height = peek_height.max(0.0);
        if peek_height == self.config.peek_height {
            return effects;
        }
        self.config.peek_height = peek_height;
        self.geometry.set_peek_height(peek_height);
        effects.push(DrawerEffect::RequestLayout);
        log::debug!("peek height now {peek_height:.1}");

        if !self.placed {
            return effects;
        }
        match self.state {
            DragState::Idle if !self.is_open => {
                self.apply_top(self.geometry.rest_closed_top(), &mut effects);
                self.update_openness(&mut effects);
            }
            DragState::Capturing | DragState::Dragging => {
                self.apply_top(self.current_top, &mut effects);
            }
            DragState::Settling => self.clamp_running_settle(&mut effects),
            DragState::Idle => {}
        }
        effects
    }

    /// Feeds one raw input event through the tracker.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> DrawerEffects {
        match event.kind {
            PointerEventKind::Down => {
                self.on_pointer_down(event.id, event.position, event.uptime_ms)
            }
            PointerEventKind::Move => {
                self.on_pointer_move(event.id, event.position, event.uptime_ms)
            }
            PointerEventKind::Up => self.on_pointer_up(event.id, event.position, event.uptime_ms),
            PointerEventKind::Cancel => self.on_pointer_cancel(event.id),
        }
    }

    pub fn on_pointer_down(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
    ) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        if self.tracker.captured_pointer() == Some(id) {
            // A second down for the dragging pointer: the first sequence was lost.
            effects.extend(self.release(0.0));
        }
        if self.tracker.active_pointer_count() == 0 {
            self.gesture_can_scroll = self.config.can_scroll;
        }

        let bounds = self.geometry.surface_bounds(self.current_top);
        let surface = self.tracker.on_pointer_down(id, position, uptime_ms, &bounds);

        let over_drawer = self
            .tracker
            .sample(id)
            .is_some_and(|sample| sample.over_drawer);
        if self.state == DragState::Settling
            && surface == Surface::Drawer
            && over_drawer
            && self.gesture_can_scroll
        {
            log::debug!("pointer {id} caught the settling drawer at {:.1}", self.current_top);
            self.capture(id);
        }
        effects
    }

    pub fn on_pointer_move(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
    ) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        let bounds = self.geometry.surface_bounds(self.current_top);
        match self.tracker.on_pointer_move(id, position, uptime_ms, &bounds) {
            MoveResult::Ignored | MoveResult::PassThrough => {}
            MoveResult::EdgeDragStarted => {
                effects.extend(self.on_edge_drag_started(id));
            }
            MoveResult::SlopExceeded => {
                if self.gesture_can_scroll {
                    self.capture(id);
                } else {
                    log::trace!("pointer {id} passed slop but direct capture is disabled");
                }
            }
            MoveResult::Intercepted(dy) => {
                if matches!(self.state, DragState::Capturing | DragState::Dragging) && dy != 0.0 {
                    self.set_state(DragState::Dragging);
                    self.apply_top(self.current_top + dy, &mut effects);
                }
            }
        }
        effects
    }

    pub fn on_pointer_up(
        &mut self,
        id: PointerId,
        position: Point,
        uptime_ms: i64,
    ) -> DrawerEffects {
        match self.tracker.on_pointer_up(id, position, uptime_ms) {
            Some(info) => self.on_release(info),
            None => DrawerEffects::new(),
        }
    }

    /// Same as a release with zero velocity.
    pub fn on_pointer_cancel(&mut self, id: PointerId) -> DrawerEffects {
        match self.tracker.on_pointer_cancel(id) {
            Some(info) => self.on_release(info),
            None => DrawerEffects::new(),
        }
    }

    /// Drops the whole gesture, e.g. when an ancestor steals it.
    pub fn cancel_gesture(&mut self) -> DrawerEffects {
        match self.tracker.cancel_all() {
            Some(info) => self.on_release(info),
            None => DrawerEffects::new(),
        }
    }

    /// Forces capture for an edge drag, bypassing the `can_scroll` gate.
    pub fn on_edge_drag_started(&mut self, id: PointerId) -> DrawerEffects {
        if self.geometry.is_known() && self.tracker.captured_pointer().is_none() {
            log::debug!("edge drag started by pointer {id}");
            self.capture(id);
        }
        DrawerEffects::new()
    }

    pub fn open(&mut self) -> DrawerEffects {
        self.settle_to(RestPosition::Open)
    }

    pub fn close(&mut self) -> DrawerEffects {
        self.settle_to(RestPosition::Closed)
    }

    /// Opens a closed drawer and closes an open one. A running settle is
    /// reversed.
    pub fn toggle(&mut self) -> DrawerEffects {
        let current = match self.settle_target() {
            Some(target) => target,
            None if self.is_open => RestPosition::Open,
            None => RestPosition::Closed,
        };
        self.settle_to(current.toggled())
    }

    /// Advances a running settle by one frame.
    pub fn tick(&mut self, frame_time_nanos: u64) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        if self.state != DragState::Settling {
            return effects;
        }
        let Some(settle) = self.settle.as_mut() else {
            self.set_state(DragState::Idle);
            return effects;
        };

        let target = settle.target;
        let frame = settle
            .animation
            .step(frame_time_nanos, self.geometry.rest_top(target));
        let frames = settle.animation.frames();
        self.apply_top(frame.value, &mut effects);
        if frame.finished {
            log::trace!("settle to {target:?} finished after {frames} frames");
            self.settle = None;
            self.set_state(DragState::Idle);
            self.update_openness(&mut effects);
        }
        effects
    }

    fn capture(&mut self, id: PointerId) {
        if self.tracker.capture(id) {
            self.settle = None;
            self.set_state(DragState::Capturing);
        }
    }

    fn on_release(&mut self, info: ReleaseInfo) -> DrawerEffects {
        if !info.was_captured || !matches!(self.state, DragState::Capturing | DragState::Dragging)
        {
            return DrawerEffects::new();
        }
        self.release(info.velocity_y)
    }

    fn release(&mut self, velocity_y: f32) -> DrawerEffects {
        self.tracker.release_capture();
        let target = self.geometry.release_target(self.current_top, velocity_y);
        log::debug!(
            "released at {:.1} (fraction {:?}, velocity {velocity_y:.1}) -> {target:?}",
            self.current_top,
            self.geometry.moved_fraction(self.current_top)
        );
        self.start_settle(target, velocity_y)
    }

    fn settle_to(&mut self, target: RestPosition) -> DrawerEffects {
        if !self.geometry.is_known() {
            return DrawerEffects::new();
        }
        let target_top = self.geometry.rest_top(target);
        let idle_at_target = self.state == DragState::Idle && self.current_top == target_top;
        if idle_at_target || self.settle_target() == Some(target) {
            return DrawerEffects::new();
        }
        if self.tracker.captured_pointer().is_some() {
            log::debug!("programmatic {target:?} abandons the current drag");
            self.tracker.release_capture();
        }
        self.start_settle(target, 0.0)
    }

    fn start_settle(&mut self, target: RestPosition, velocity_y: f32) -> DrawerEffects {
        let mut effects = DrawerEffects::new();
        let target_top = self.geometry.rest_top(target);
        if !self.geometry.is_known() || self.current_top == target_top {
            self.settle = None;
            self.set_state(DragState::Idle);
            self.update_openness(&mut effects);
            return effects;
        }

        let duration_ms = compute_settle_duration_ms(
            target_top - self.current_top,
            velocity_y,
            self.geometry.drawer_height(),
            self.geometry.content().height,
            &self.config.settle,
        );
        self.settle = Some(ActiveSettle {
            target,
            animation: SettleAnimation::new(self.current_top, duration_ms, &self.config.settle),
        });
        log::debug!(
            "settling from {:.1} to {target:?} ({target_top:.1}) over {duration_ms}ms",
            self.current_top
        );
        self.set_state(DragState::Settling);
        effects
    }

    fn apply_top(&mut self, candidate: f32, effects: &mut DrawerEffects) {
        let top = self.geometry.clamp_top(candidate);
        if top == self.current_top {
            return;
        }
        self.current_top = top;
        effects.push(DrawerEffect::PlaceDrawer { top });
        if matches!(self.state, DragState::Dragging | DragState::Settling) {
            effects.push(DrawerEffect::OffsetChanging {
                show_height: self.geometry.show_height(top),
            });
        }
    }

    /// Pulls a settling drawer back into a travel range that just shrank and
    /// moves the tween's start there, keeping its progress.
    fn clamp_running_settle(&mut self, effects: &mut DrawerEffects) {
        let before = self.current_top;
        self.apply_top(before, effects);
        if self.current_top == before {
            return;
        }
        if let Some(settle) = self.settle.as_mut() {
            settle.animation.rebase(self.current_top);
        }
        log::debug!(
            "settle offset clamped from {before:.1} to {:.1}",
            self.current_top
        );
    }

    fn update_openness(&mut self, effects: &mut DrawerEffects) {
        let is_open = self.current_top == self.geometry.rest_open_top();
        if is_open != self.is_open {
            self.is_open = is_open;
            log::debug!("drawer is now {}", if is_open { "open" } else { "closed" });
            effects.push(DrawerEffect::OpennessChanged(is_open));
        }
    }

    fn set_state(&mut self, state: DragState) {
        if self.state != state {
            log::trace!("drag state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
