use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn callbacks_run_once_with_frame_time() {
    let runtime = FrameRuntime::new();
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_clone = Rc::clone(&seen);
    let _registration = clock.with_frame_nanos(move |time| seen_clone.borrow_mut().push(time));
    assert!(runtime.has_frame_callbacks());

    runtime.drain_frame_callbacks(16_000_000);
    runtime.drain_frame_callbacks(32_000_000);

    assert_eq!(seen.borrow().as_slice(), &[16_000_000]);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = FrameRuntime::new();
    let fired = Rc::new(Cell::new(false));

    let fired_clone = Rc::clone(&fired);
    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_clone.set(true));
    drop(registration);

    runtime.drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn explicit_cancel_removes_callback() {
    let runtime = FrameRuntime::new();
    let fired = Rc::new(Cell::new(false));

    let fired_clone = Rc::clone(&fired);
    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_clone.set(true));
    registration.cancel();

    assert!(!runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = FrameRuntime::new();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    let frames_outer = Rc::clone(&frames);
    let handle_inner = handle.clone();
    handle.register_frame_callback(move |time| {
        frames_outer.borrow_mut().push(("outer", time));
        let frames_inner = Rc::clone(&frames_outer);
        handle_inner.register_frame_callback(move |time| {
            frames_inner.borrow_mut().push(("inner", time));
        });
    });

    runtime.drain_frame_callbacks(1);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 1)]);
    assert!(runtime.has_frame_callbacks());

    runtime.drain_frame_callbacks(2);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 1), ("inner", 2)]);
}

#[test]
fn frame_waker_fires_when_queue_becomes_non_empty() {
    let runtime = FrameRuntime::new();
    let handle = runtime.handle();
    let wakes = Rc::new(Cell::new(0));

    let wakes_clone = Rc::clone(&wakes);
    handle.set_frame_waker(move || wakes_clone.set(wakes_clone.get() + 1));

    handle.register_frame_callback(|_| {});
    handle.register_frame_callback(|_| {});
    assert_eq!(wakes.get(), 1);

    runtime.drain_frame_callbacks(0);
    handle.register_frame_callback(|_| {});
    assert_eq!(wakes.get(), 2);
}

#[test]
fn dropped_runtime_yields_inactive_registrations() {
    let runtime = FrameRuntime::new();
    let clock = runtime.frame_clock();
    drop(runtime);

    let registration = clock.with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert!(!clock.runtime_handle().is_alive());
}

#[test]
fn with_frame_millis_converts_nanos() {
    let runtime = FrameRuntime::new();
    let millis = Rc::new(Cell::new(0));

    let millis_clone = Rc::clone(&millis);
    let _registration = runtime
        .frame_clock()
        .with_frame_millis(move |ms| millis_clone.set(ms));
    runtime.drain_frame_callbacks(48_000_000);

    assert_eq!(millis.get(), 48);
    assert_eq!(runtime.handle().last_frame_time_nanos(), Some(48_000_000));
}
