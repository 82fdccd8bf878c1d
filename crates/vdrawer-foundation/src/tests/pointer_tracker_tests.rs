use super::*;

const SLOP: f32 = DRAG_THRESHOLD / DEFAULT_SENSITIVITY;

/// 1080x1920 container with a 1000px drawer peeking 360px from the top.
fn closed_bounds() -> SurfaceBounds {
    SurfaceBounds::new(
        Rect::new(0.0, 0.0, 1080.0, 1920.0),
        Rect::new(0.0, -640.0, 1080.0, 1000.0),
    )
}

fn no_drawer_bounds() -> SurfaceBounds {
    SurfaceBounds::new(Rect::new(0.0, 0.0, 1080.0, 1920.0), Rect::default())
}

#[test]
fn down_attributes_surfaces() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();

    assert_eq!(
        tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds),
        Surface::Drawer
    );
    assert_eq!(
        tracker.on_pointer_down(2, Point::new(500.0, 900.0), 0, &bounds),
        Surface::Content
    );
    assert_eq!(
        tracker.on_pointer_down(3, Point::new(500.0, 2500.0), 0, &bounds),
        Surface::None
    );
    assert_eq!(tracker.active_pointer_count(), 3);
    assert_eq!(tracker.captured_pointer(), None);
}

#[test]
fn edge_band_binds_pointer_to_drawer() {
    let mut tracker = PointerTracker::default();
    // Drawer fully hidden: the edge band is the only way in.
    let bounds = SurfaceBounds::new(
        Rect::new(0.0, 0.0, 1080.0, 1920.0),
        Rect::new(0.0, -1000.0, 1080.0, 1000.0),
    );

    let surface = tracker.on_pointer_down(7, Point::new(300.0, 5.0), 0, &bounds);

    assert_eq!(surface, Surface::Drawer);
    let sample = tracker.sample(7).expect("sample registered");
    assert!(sample.edge_touched);
    assert!(!sample.over_drawer);
}

#[test]
fn edge_tracking_requires_a_drawer() {
    let mut tracker = PointerTracker::default();
    let surface = tracker.on_pointer_down(1, Point::new(300.0, 5.0), 0, &no_drawer_bounds());
    assert_eq!(surface, Surface::Content);
    assert!(!tracker.sample(1).expect("sample").edge_touched);
}

#[test]
fn moves_below_slop_pass_through() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds);

    let result = tracker.on_pointer_move(1, Point::new(500.0, 200.0 + SLOP - 0.5), 8, &bounds);
    assert_eq!(result, MoveResult::PassThrough);
}

#[test]
fn drawer_pointer_past_slop_reports_slop_exceeded() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds);

    let result = tracker.on_pointer_move(1, Point::new(500.0, 220.0), 8, &bounds);
    assert_eq!(result, MoveResult::SlopExceeded);
}

#[test]
fn horizontal_motion_never_crosses_slop() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds);

    let result = tracker.on_pointer_move(1, Point::new(800.0, 202.0), 8, &bounds);
    assert_eq!(result, MoveResult::PassThrough);
}

#[test]
fn content_pointer_never_reaches_drawer() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 900.0), 0, &bounds);

    let result = tracker.on_pointer_move(1, Point::new(500.0, 700.0), 8, &bounds);
    assert_eq!(result, MoveResult::PassThrough);
}

#[test]
fn edge_drag_is_reported_once() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 10.0), 0, &bounds);

    assert_eq!(
        tracker.on_pointer_move(1, Point::new(500.0, 40.0), 8, &bounds),
        MoveResult::EdgeDragStarted
    );
    // Not captured by anyone: the edge flag is spent, the body rule applies.
    assert_eq!(
        tracker.on_pointer_move(1, Point::new(500.0, 60.0), 16, &bounds),
        MoveResult::SlopExceeded
    );
}

#[test]
fn captured_pointer_reports_incremental_deltas() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds);
    tracker.on_pointer_move(1, Point::new(500.0, 220.0), 8, &bounds);
    assert!(tracker.capture(1));

    assert_eq!(
        tracker.on_pointer_move(1, Point::new(500.0, 250.0), 16, &bounds),
        MoveResult::Intercepted(30.0)
    );
    assert_eq!(
        tracker.on_pointer_move(1, Point::new(500.0, 240.0), 24, &bounds),
        MoveResult::Intercepted(-10.0)
    );
}

#[test]
fn second_pointer_passes_through_while_another_is_captured() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 200.0), 0, &bounds);
    tracker.capture(1);
    tracker.on_pointer_down(2, Point::new(600.0, 200.0), 4, &bounds);

    assert_eq!(
        tracker.on_pointer_move(2, Point::new(600.0, 300.0), 8, &bounds),
        MoveResult::PassThrough
    );
}

#[test]
fn unknown_pointers_are_ignored() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();

    assert_eq!(
        tracker.on_pointer_move(42, Point::new(0.0, 0.0), 0, &bounds),
        MoveResult::Ignored
    );
    assert_eq!(tracker.on_pointer_up(42, Point::ZERO, 0), None);
    assert_eq!(tracker.on_pointer_cancel(42), None);
    assert!(!tracker.capture(42));
}

#[test]
fn release_reports_velocity_and_capture() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 300.0), 0, &bounds);
    tracker.capture(1);
    for step in 1..=5 {
        let y = 300.0 - 50.0 * step as f32;
        tracker.on_pointer_move(1, Point::new(500.0, y), step * 10, &bounds);
    }

    let release = tracker
        .on_pointer_up(1, Point::new(500.0, 50.0), 50)
        .expect("known pointer");

    assert!(release.was_captured);
    assert!(release.velocity_y < -1000.0, "got {}", release.velocity_y);
    assert_eq!(tracker.captured_pointer(), None);
    assert_eq!(tracker.active_pointer_count(), 0);
}

#[test]
fn pause_before_release_decays_velocity() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 300.0), 0, &bounds);
    tracker.capture(1);
    tracker.on_pointer_move(1, Point::new(500.0, 200.0), 10, &bounds);
    tracker.on_pointer_move(1, Point::new(500.0, 100.0), 20, &bounds);

    let release = tracker
        .on_pointer_up(1, Point::new(500.0, 100.0), 300)
        .expect("known pointer");

    assert_eq!(release.velocity_y, 0.0);
}

#[test]
fn cancel_releases_with_zero_velocity() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 300.0), 0, &bounds);
    tracker.capture(1);
    tracker.on_pointer_move(1, Point::new(500.0, 100.0), 10, &bounds);

    let release = tracker.on_pointer_cancel(1).expect("known pointer");

    assert!(release.was_captured);
    assert_eq!(release.velocity_y, 0.0);
}

#[test]
fn cancel_all_drops_every_pointer() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();
    tracker.on_pointer_down(1, Point::new(500.0, 300.0), 0, &bounds);
    tracker.on_pointer_down(2, Point::new(500.0, 900.0), 0, &bounds);
    tracker.capture(1);

    let release = tracker.cancel_all().expect("captured pointer released");

    assert_eq!(release.id, 1);
    assert_eq!(tracker.active_pointer_count(), 0);
    assert_eq!(tracker.captured_pointer(), None);
}

#[test]
fn process_dispatches_by_kind() {
    let mut tracker = PointerTracker::default();
    let bounds = closed_bounds();

    assert_eq!(
        tracker.process(&PointerEvent::down(3, 500.0, 200.0, 0), &bounds),
        TrackerOutcome::Down(Surface::Drawer)
    );
    assert_eq!(
        tracker.process(&PointerEvent::moved(3, 500.0, 230.0, 8), &bounds),
        TrackerOutcome::Move(MoveResult::SlopExceeded)
    );
    assert!(matches!(
        tracker.process(&PointerEvent::up(3, 500.0, 230.0, 16), &bounds),
        TrackerOutcome::Up(Some(ReleaseInfo {
            was_captured: false,
            ..
        }))
    ));
}

#[test]
fn sensitivity_scales_slop() {
    let config = TrackerConfig::with_sensitivity(1.0);
    assert_eq!(config.touch_slop, DRAG_THRESHOLD);
    assert!(TrackerConfig::default().touch_slop < DRAG_THRESHOLD);
}
