use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vdrawer_core::{FrameRuntime, RuntimeHandle};
use vdrawer_foundation::{Point, PointerId};
use vdrawer_ui::{DragState, DrawerConfig, DrawerHost, Size, VerticalDrawer};

/// Nominal vsync interval used when advancing frames.
pub const FRAME_INTERVAL_NANOS: u64 = 16_000_000;

/// Uptime between synthesized pointer samples.
pub const POINTER_STEP_MS: i64 = 10;

const MAX_PUMPED_FRAMES: usize = 1_000;

/// Something the drawer reported to its observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerEvent {
    OpennessChanged(bool),
    OffsetChanging(i32),
}

/// Host that records what the drawer asked of it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    tops: RefCell<Vec<f32>>,
    layout_requests: Cell<usize>,
}

impl RecordingHost {
    pub fn placements(&self) -> Vec<f32> {
        self.tops.borrow().clone()
    }

    pub fn last_top(&self) -> Option<f32> {
        self.tops.borrow().last().copied()
    }

    pub fn layout_requests(&self) -> usize {
        self.layout_requests.get()
    }
}

impl DrawerHost for RecordingHost {
    fn set_drawer_top(&self, top: f32) {
        self.tops.borrow_mut().push(top);
    }

    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }
}

/// Headless harness that owns a frame runtime, a drawer wired to a
/// [`RecordingHost`], and synthetic clocks for pointer uptime and frame time.
///
/// Geometry requests are answered immediately, the way a layout pass would
/// after `request_layout`.
pub struct DrawerTestRule {
    runtime: FrameRuntime,
    drawer: VerticalDrawer,
    host: Rc<RecordingHost>,
    events: Rc<RefCell<Vec<DrawerEvent>>>,
    container: Size,
    drawer_size: Size,
    uptime_ms: i64,
    frame_time_nanos: u64,
}

impl DrawerTestRule {
    /// 1080x1920 container with a 1000px tall drawer.
    pub fn new(config: DrawerConfig) -> Self {
        Self::with_sizes(config, Size::new(1080.0, 1920.0), Size::new(1080.0, 1000.0))
    }

    pub fn with_sizes(config: DrawerConfig, container: Size, drawer_size: Size) -> Self {
        let runtime = FrameRuntime::new();
        let drawer = VerticalDrawer::new(config, runtime.frame_clock());
        let host = Rc::new(RecordingHost::default());
        drawer.set_host(host.clone());

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        drawer.set_on_openness_changed(move |is_open| {
            sink.borrow_mut().push(DrawerEvent::OpennessChanged(is_open));
        });
        let sink = events.clone();
        drawer.set_on_offset_changing(move |show_height| {
            sink.borrow_mut().push(DrawerEvent::OffsetChanging(show_height));
        });

        drawer.set_geometry(container, drawer_size);
        Self {
            runtime,
            drawer,
            host,
            events,
            container,
            drawer_size,
            uptime_ms: 0,
            frame_time_nanos: 0,
        }
    }

    pub fn drawer(&self) -> &VerticalDrawer {
        &self.drawer
    }

    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn events(&self) -> Vec<DrawerEvent> {
        self.events.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take_events(&self) -> Vec<DrawerEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn openness_changes(&self) -> Vec<bool> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                DrawerEvent::OpennessChanged(is_open) => Some(*is_open),
                DrawerEvent::OffsetChanging(_) => None,
            })
            .collect()
    }

    pub fn uptime_ms(&self) -> i64 {
        self.uptime_ms
    }

    /// Lets pointer time pass without any input.
    pub fn pause(&mut self, millis: i64) {
        self.uptime_ms += millis;
    }

    pub fn set_drawer_size(&mut self, drawer_size: Size) {
        self.drawer_size = drawer_size;
        self.drawer.set_geometry(self.container, drawer_size);
    }

    /// Changes the peek height and answers the resulting layout request.
    pub fn set_peek_height(&mut self, peek_height: f32) {
        let requests = self.host.layout_requests();
        self.drawer.set_peek_height(peek_height);
        if self.host.layout_requests() > requests {
            self.drawer.set_geometry(self.container, self.drawer_size);
        }
    }

    pub fn pointer_down(&mut self, id: PointerId, position: Point) {
        self.drawer
            .on_pointer_down(id, position.x, position.y, self.uptime_ms);
    }

    pub fn pointer_move(&mut self, id: PointerId, position: Point) {
        self.uptime_ms += POINTER_STEP_MS;
        self.drawer
            .on_pointer_move(id, position.x, position.y, self.uptime_ms);
    }

    pub fn pointer_up(&mut self, id: PointerId, position: Point) {
        self.drawer
            .on_pointer_up(id, position.x, position.y, self.uptime_ms);
    }

    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.drawer.on_pointer_cancel(id);
    }

    /// Presses at `from`, moves to `to` in `steps` evenly spaced samples and
    /// keeps the pointer down.
    pub fn drag(&mut self, id: PointerId, from: Point, to: Point, steps: usize) {
        self.pointer_down(id, from);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let position = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.pointer_move(id, position);
        }
    }

    /// Drag, hold still until the motion history expires, then lift.
    pub fn drag_and_hold_release(&mut self, id: PointerId, from: Point, to: Point) {
        self.drag(id, from, to, 10);
        self.pause(200);
        self.pointer_up(id, to);
    }

    /// Drag and lift while still moving.
    pub fn fling(&mut self, id: PointerId, from: Point, to: Point) {
        self.drag(id, from, to, 5);
        self.pointer_up(id, to);
    }

    /// Drains one frame's callbacks and advances frame time.
    pub fn advance_frame(&mut self) {
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
    }

    /// Advances frames until nothing is scheduled. Returns the frame count.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            self.advance_frame();
            frames += 1;
            if frames > MAX_PUMPED_FRAMES {
                panic!("drawer kept requesting frames after {frames} frames");
            }
        }
        if frames > 0 {
            log::trace!("pumped {frames} frames, drawer {:?}", self.drawer.state());
        }
        frames
    }

    pub fn is_idle(&self) -> bool {
        self.drawer.state() == DragState::Idle && !self.runtime.has_frame_callbacks()
    }
}

impl Default for DrawerTestRule {
    fn default() -> Self {
        Self::new(DrawerConfig::default())
    }
}
