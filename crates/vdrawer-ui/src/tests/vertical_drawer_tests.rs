use super::*;
use std::cell::Cell;
use vdrawer_core::FrameRuntime;

const FRAME_NANOS: u64 = 16_000_000;

#[derive(Default)]
struct RecordingHost {
    tops: RefCell<Vec<f32>>,
    layout_requests: Cell<usize>,
}

impl DrawerHost for RecordingHost {
    fn set_drawer_top(&self, top: f32) {
        self.tops.borrow_mut().push(top);
    }

    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }
}

fn setup() -> (FrameRuntime, VerticalDrawer, Rc<RecordingHost>) {
    let runtime = FrameRuntime::new();
    let drawer = VerticalDrawer::new(DrawerConfig::default(), runtime.frame_clock());
    let host = Rc::new(RecordingHost::default());
    drawer.set_host(host.clone());
    drawer.set_geometry(Size::new(1080.0, 1920.0), Size::new(1080.0, 1000.0));
    (runtime, drawer, host)
}

fn pump(runtime: &FrameRuntime) -> usize {
    let mut frames = 0;
    while runtime.has_frame_callbacks() {
        runtime.drain_frame_callbacks(frames as u64 * FRAME_NANOS);
        frames += 1;
        assert!(frames < 100, "drawer kept requesting frames");
    }
    frames
}

#[test]
fn layout_places_drawer_through_host() {
    let (runtime, drawer, host) = setup();
    assert_eq!(host.tops.borrow().as_slice(), &[-640.0]);
    assert_eq!(drawer.show_height(), 360);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn open_is_driven_by_frames() {
    let (runtime, drawer, host) = setup();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    drawer.set_on_openness_changed(move |is_open| sink.borrow_mut().push(is_open));

    drawer.open();
    assert!(drawer.has_pending_frame());
    assert!(runtime.has_frame_callbacks());

    let frames = pump(&runtime);

    assert!(frames > 2);
    assert_eq!(drawer.state(), DragState::Idle);
    assert_eq!(drawer.current_top(), 0.0);
    assert_eq!(host.tops.borrow().last().copied(), Some(0.0));
    assert_eq!(changes.borrow().as_slice(), &[true]);
    assert!(!drawer.has_pending_frame());
}

#[test]
fn observers_may_query_the_drawer() {
    let (runtime, drawer, _host) = setup();
    let seen = Rc::new(Cell::new(None));
    let handle = drawer.clone();
    let sink = seen.clone();
    drawer.set_on_openness_changed(move |is_open| {
        sink.set(Some((is_open, handle.is_open(), handle.current_top())));
    });

    drawer.open();
    pump(&runtime);

    assert_eq!(seen.get(), Some((true, true, 0.0)));
}

#[test]
fn offset_observer_follows_the_drag() {
    let (_runtime, drawer, _host) = setup();
    let heights = Rc::new(RefCell::new(Vec::new()));
    let sink = heights.clone();
    drawer.set_on_offset_changing(move |height| sink.borrow_mut().push(height));

    drawer.on_pointer_down(1, 500.0, 200.0, 0);
    drawer.on_pointer_move(1, 500.0, 210.0, 10);
    drawer.on_pointer_move(1, 500.0, 310.0, 20);
    drawer.on_pointer_move(1, 500.0, 410.0, 30);

    assert_eq!(heights.borrow().as_slice(), &[460, 560]);
}

#[test]
fn catching_the_drawer_drops_the_pending_frame() {
    let (runtime, drawer, _host) = setup();
    drawer.open();
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(3 * FRAME_NANOS);
    assert!(runtime.has_frame_callbacks());

    drawer.on_pointer_down(1, 500.0, 100.0, 1000);

    assert_eq!(drawer.state(), DragState::Capturing);
    assert!(!drawer.has_pending_frame());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn dropping_the_drawer_cancels_its_frame() {
    let (runtime, drawer, _host) = setup();
    drawer.open();
    assert!(runtime.has_frame_callbacks());

    drop(drawer);

    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn peek_change_requests_layout() {
    let (_runtime, drawer, host) = setup();

    drawer.set_peek_height(200.0);

    assert_eq!(host.layout_requests.get(), 1);
    assert_eq!(host.tops.borrow().last().copied(), Some(-800.0));
    assert_eq!(drawer.config().peek_height, 200.0);
}

#[test]
fn cleared_observers_stay_silent() {
    let (runtime, drawer, _host) = setup();
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    drawer.set_on_openness_changed(move |_| sink.set(sink.get() + 1));
    drawer.clear_observers();

    drawer.toggle();
    pump(&runtime);

    assert!(drawer.is_open());
    assert_eq!(calls.get(), 0);
}

#[test]
fn settle_without_runtime_is_reported_inactive() {
    let runtime = FrameRuntime::new();
    let drawer = VerticalDrawer::new(DrawerConfig::default(), runtime.frame_clock());
    drawer.set_geometry(Size::new(1080.0, 1920.0), Size::new(1080.0, 1000.0));
    drop(runtime);

    drawer.open();

    assert_eq!(drawer.state(), DragState::Settling);
    assert!(!drawer.has_pending_frame());
}
