use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use vdrawer_core::FrameRuntime;
use vdrawer_ui::{DrawerConfig, DrawerHost, Size, VerticalDrawer};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 600;
const POINTER_STEP_MS: i64 = 12;

pub const SCREEN_SIZE: Size = Size {
    width: 1080.0,
    height: 1920.0,
};
pub const DRAWER_SIZE: Size = Size {
    width: 1080.0,
    height: 1000.0,
};

/// Stand-in for the screen: a drawer panel whose inner content is only shown
/// while the drawer is open or moving.
#[derive(Debug, Default)]
pub struct DemoScreen {
    drawer_top: Cell<f32>,
    content_visible: Cell<bool>,
    show_height: Cell<i32>,
    layout_requests: Cell<usize>,
}

impl DemoScreen {
    pub fn drawer_top(&self) -> f32 {
        self.drawer_top.get()
    }

    pub fn content_visible(&self) -> bool {
        self.content_visible.get()
    }

    pub fn show_height(&self) -> i32 {
        self.show_height.get()
    }

    fn take_layout_request(&self) -> bool {
        self.layout_requests.replace(0) > 0
    }
}

impl DrawerHost for DemoScreen {
    fn set_drawer_top(&self, top: f32) {
        self.drawer_top.set(top);
    }

    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }
}

pub struct DemoApp {
    runtime: FrameRuntime,
    drawer: VerticalDrawer,
    screen: Rc<DemoScreen>,
    started: Instant,
    uptime_ms: i64,
    paced: bool,
}

impl DemoApp {
    /// `paced` sleeps one frame interval between frames, like a vsync would.
    pub fn new(config: DrawerConfig, paced: bool) -> Self {
        let runtime = FrameRuntime::new();
        let drawer = VerticalDrawer::new(config, runtime.frame_clock());
        let screen = Rc::new(DemoScreen::default());
        drawer.set_host(screen.clone());

        let observed = screen.clone();
        drawer.set_on_openness_changed(move |is_open| {
            observed.content_visible.set(is_open);
            log::info!("drawer {}", if is_open { "opened" } else { "closed" });
        });
        let observed = screen.clone();
        drawer.set_on_offset_changing(move |show_height| {
            observed.content_visible.set(true);
            observed.show_height.set(show_height);
            log::debug!("drawer showing {show_height}px");
        });

        drawer.set_geometry(SCREEN_SIZE, DRAWER_SIZE);
        screen.show_height.set(drawer.show_height());
        Self {
            runtime,
            drawer,
            screen,
            started: Instant::now(),
            uptime_ms: 0,
            paced,
        }
    }

    pub fn drawer(&self) -> &VerticalDrawer {
        &self.drawer
    }

    pub fn screen(&self) -> &DemoScreen {
        &self.screen
    }

    /// Runs frames until the drawer stops asking for them.
    pub fn run_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() && frames < MAX_FRAMES {
            if self.paced {
                std::thread::sleep(FRAME_INTERVAL);
            }
            let frame_time_nanos = if self.paced {
                self.started.elapsed().as_nanos() as u64
            } else {
                frames as u64 * FRAME_INTERVAL.as_nanos() as u64
            };
            self.runtime.drain_frame_callbacks(frame_time_nanos);
            frames += 1;
        }
        log::debug!("ran {frames} frames");
        frames
    }

    /// Swipes vertically along the horizontal centre of the screen. With
    /// `hold` the pointer rests before lifting, so the release carries no
    /// fling velocity.
    pub fn swipe(&mut self, from_y: f32, to_y: f32, steps: usize, hold: bool) {
        let x = SCREEN_SIZE.width / 2.0;
        let steps = steps.max(1);
        self.drawer.on_pointer_down(1, x, from_y, self.uptime_ms);
        for step in 1..=steps {
            self.uptime_ms += POINTER_STEP_MS;
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            self.drawer.on_pointer_move(1, x, y, self.uptime_ms);
        }
        if hold {
            self.uptime_ms += 250;
        }
        self.drawer.on_pointer_up(1, x, to_y, self.uptime_ms);
        self.uptime_ms += 500;
    }

    pub fn set_peek_height(&mut self, peek_height: f32) {
        self.drawer.set_peek_height(peek_height);
        if self.screen.take_layout_request() {
            self.drawer.set_geometry(SCREEN_SIZE, DRAWER_SIZE);
        }
    }
}
