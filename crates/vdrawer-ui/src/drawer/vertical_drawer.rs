use crate::config::DrawerConfig;
use crate::drawer::controller::{DragSettleController, DragState, DrawerEffect, DrawerEffects};
use crate::drawer::host::DrawerHost;
use std::cell::RefCell;
use std::rc::Rc;
use vdrawer_core::{FrameCallbackRegistration, FrameClock};
use vdrawer_foundation::{Point, PointerEvent, PointerId, Size};

/// Host-facing drawer handle.
///
/// Clones share the same drawer. While a settle runs, the handle keeps one
/// frame callback registered on its [`FrameClock`]; the host drives it by
/// draining frame callbacks once per vsync.
#[derive(Clone)]
pub struct VerticalDrawer {
    inner: Rc<RefCell<DrawerInner>>,
}

struct DrawerInner {
    controller: DragSettleController,
    clock: FrameClock,
    registration: Option<FrameCallbackRegistration>,
    host: Option<Rc<dyn DrawerHost>>,
    on_openness_changed: Option<Rc<dyn Fn(bool)>>,
    on_offset_changing: Option<Rc<dyn Fn(i32)>>,
}

struct Dispatch {
    effects: DrawerEffects,
    host: Option<Rc<dyn DrawerHost>>,
    on_openness_changed: Option<Rc<dyn Fn(bool)>>,
    on_offset_changing: Option<Rc<dyn Fn(i32)>>,
}

impl VerticalDrawer {
    pub fn new(config: DrawerConfig, clock: FrameClock) -> Self {
        let inner = DrawerInner {
            controller: DragSettleController::new(config),
            clock,
            registration: None,
            host: None,
            on_openness_changed: None,
            on_offset_changing: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn set_host(&self, host: Rc<dyn DrawerHost>) {
        self.inner.borrow_mut().host = Some(host);
    }

    /// Fired when the drawer comes to rest with a different openness.
    pub fn set_on_openness_changed(&self, listener: impl Fn(bool) + 'static) {
        self.inner.borrow_mut().on_openness_changed = Some(Rc::new(listener));
    }

    /// Fired with the visible drawer height on every offset change while
    /// dragging or settling.
    pub fn set_on_offset_changing(&self, listener: impl Fn(i32) + 'static) {
        self.inner.borrow_mut().on_offset_changing = Some(Rc::new(listener));
    }

    pub fn clear_observers(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.on_openness_changed = None;
        inner.on_offset_changing = None;
    }

    pub fn config(&self) -> DrawerConfig {
        *self.inner.borrow().controller.config()
    }

    pub fn state(&self) -> DragState {
        self.inner.borrow().controller.state()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().controller.is_open()
    }

    pub fn current_top(&self) -> f32 {
        self.inner.borrow().controller.current_top()
    }

    pub fn show_height(&self) -> i32 {
        self.inner.borrow().controller.show_height()
    }

    /// Whether a settle frame is queued on a live runtime.
    pub fn has_pending_frame(&self) -> bool {
        self.inner
            .borrow()
            .registration
            .as_ref()
            .is_some_and(FrameCallbackRegistration::is_active)
    }

    /// Read access to the underlying state machine.
    pub fn with_controller<R>(&self, f: impl FnOnce(&DragSettleController) -> R) -> R {
        f(&self.inner.borrow().controller)
    }

    pub fn set_geometry(&self, content: Size, drawer: Size) {
        self.apply(|controller| controller.set_geometry(content, drawer));
    }

    pub fn set_can_scroll(&self, can_scroll: bool) {
        self.inner.borrow_mut().controller.set_can_scroll(can_scroll);
    }

    pub fn set_peek_height(&self, peek_height: f32) {
        self.apply(|controller| controller.set_peek_height(peek_height));
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) {
        self.apply(|controller| controller.handle_pointer_event(event));
    }

    pub fn on_pointer_down(&self, id: PointerId, x: f32, y: f32, uptime_ms: i64) {
        self.apply(|controller| controller.on_pointer_down(id, Point::new(x, y), uptime_ms));
    }

    pub fn on_pointer_move(&self, id: PointerId, x: f32, y: f32, uptime_ms: i64) {
        self.apply(|controller| controller.on_pointer_move(id, Point::new(x, y), uptime_ms));
    }

    pub fn on_pointer_up(&self, id: PointerId, x: f32, y: f32, uptime_ms: i64) {
        self.apply(|controller| controller.on_pointer_up(id, Point::new(x, y), uptime_ms));
    }

    pub fn on_pointer_cancel(&self, id: PointerId) {
        self.apply(|controller| controller.on_pointer_cancel(id));
    }

    pub fn cancel_gesture(&self) {
        self.apply(|controller| controller.cancel_gesture());
    }

    pub fn open(&self) {
        self.apply(|controller| controller.open());
    }

    pub fn close(&self) {
        self.apply(|controller| controller.close());
    }

    pub fn toggle(&self) {
        self.apply(|controller| controller.toggle());
    }

    fn apply(&self, operation: impl FnOnce(&mut DragSettleController) -> DrawerEffects) {
        let dispatch = {
            let mut inner = self.inner.borrow_mut();
            let effects = operation(&mut inner.controller);
            if !inner.controller.is_settling() {
                // Dropping the registration cancels the queued frame.
                inner.registration = None;
            }
            Dispatch {
                effects,
                host: inner.host.clone(),
                on_openness_changed: inner.on_openness_changed.clone(),
                on_offset_changing: inner.on_offset_changing.clone(),
            }
        };
        self.schedule_frame();
        dispatch.run();
    }

    fn schedule_frame(&self) {
        let clock = {
            let inner = self.inner.borrow();
            if !inner.controller.is_settling() || inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(&self.inner);
        let registration = clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(inner) = weak.upgrade() {
                VerticalDrawer { inner }.on_frame(frame_time_nanos);
            }
        });
        if !registration.is_active() {
            log::warn!("frame runtime is gone; settle cannot progress");
        }
        self.inner.borrow_mut().registration = Some(registration);
    }

    fn on_frame(&self, frame_time_nanos: u64) {
        self.inner.borrow_mut().registration = None;
        self.apply(|controller| controller.tick(frame_time_nanos));
    }
}

impl Dispatch {
    fn run(self) {
        for effect in self.effects {
            match effect {
                DrawerEffect::PlaceDrawer { top } => {
                    if let Some(host) = &self.host {
                        host.set_drawer_top(top);
                    }
                }
                DrawerEffect::RequestLayout => {
                    if let Some(host) = &self.host {
                        host.request_layout();
                    }
                }
                DrawerEffect::OffsetChanging { show_height } => {
                    if let Some(listener) = &self.on_offset_changing {
                        listener(show_height);
                    }
                }
                DrawerEffect::OpennessChanged(is_open) => {
                    if let Some(listener) = &self.on_openness_changed {
                        listener(is_open);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for VerticalDrawer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VerticalDrawer")
            .field("state", &inner.controller.state())
            .field("current_top", &inner.controller.current_top())
            .field("is_open", &inner.controller.is_open())
            .field("has_host", &inner.host.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/vertical_drawer_tests.rs"]
mod tests;
