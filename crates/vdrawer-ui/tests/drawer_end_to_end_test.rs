use std::cell::Cell;
use std::rc::Rc;
use vdrawer_testing::{assert_approx_eq, assert_in_travel_range, DrawerEvent, DrawerTestRule};
use vdrawer_ui::{DragState, DrawerConfig, Point};

fn p(y: f32) -> Point {
    Point::new(540.0, y)
}

#[test]
fn slow_pull_past_half_opens() {
    let mut rule = DrawerTestRule::default();
    assert_eq!(rule.host().placements(), vec![-640.0]);

    rule.drag_and_hold_release(1, p(200.0), p(600.0));
    assert_eq!(rule.drawer().state(), DragState::Settling);
    rule.pump_until_idle();

    assert!(rule.drawer().is_open());
    assert_eq!(rule.drawer().current_top(), 0.0);
    assert_eq!(rule.host().last_top(), Some(0.0));
    assert_eq!(rule.openness_changes(), vec![true]);
}

#[test]
fn short_pull_falls_back_closed() {
    let mut rule = DrawerTestRule::default();

    rule.drag_and_hold_release(1, p(200.0), p(300.0));
    rule.pump_until_idle();

    assert!(!rule.drawer().is_open());
    assert_eq!(rule.drawer().current_top(), -640.0);
    assert!(rule.openness_changes().is_empty());
}

#[test]
fn upward_fling_closes_an_open_drawer() {
    let mut rule = DrawerTestRule::default();
    rule.drawer().open();
    rule.pump_until_idle();
    assert!(rule.drawer().is_open());

    rule.fling(1, p(900.0), p(600.0));
    assert!(rule.drawer().current_top() > -500.0);
    rule.pump_until_idle();

    assert!(!rule.drawer().is_open());
    assert_eq!(rule.drawer().current_top(), -640.0);
    assert_eq!(rule.openness_changes(), vec![true, false]);
}

#[test]
fn drag_reports_visible_height() {
    let mut rule = DrawerTestRule::default();

    rule.drag(1, p(200.0), p(600.0), 10);

    let heights: Vec<i32> = rule
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            DrawerEvent::OffsetChanging(height) => Some(height),
            DrawerEvent::OpennessChanged(_) => None,
        })
        .collect();
    assert_eq!(heights.len(), 9);
    assert_eq!(heights.first().copied(), Some(400));
    assert_eq!(heights.last().copied(), Some(720));
    assert_approx_eq(rule.drawer().current_top(), -280.0, 0.01, "drawer top");
}

#[test]
fn edge_pull_opens_a_hidden_drawer_without_body_capture() {
    let config = DrawerConfig::default()
        .with_peek_height(0.0)
        .with_can_scroll(false);
    let mut rule = DrawerTestRule::new(config);
    assert_eq!(rule.drawer().current_top(), -1000.0);

    rule.drag_and_hold_release(1, p(4.0), p(804.0));
    rule.pump_until_idle();

    assert!(rule.drawer().is_open());
    assert_eq!(rule.openness_changes(), vec![true]);
}

#[test]
fn body_pull_is_ignored_when_scrolling_is_disabled() {
    let mut rule = DrawerTestRule::new(DrawerConfig::default().with_can_scroll(false));

    rule.drag_and_hold_release(1, p(200.0), p(800.0));
    rule.pump_until_idle();

    assert_eq!(rule.drawer().current_top(), -640.0);
    assert!(rule.events().is_empty());
}

#[test]
fn drawer_stays_in_range_under_wild_input() {
    let mut rule = DrawerTestRule::default();
    rule.pointer_down(1, p(200.0));
    let mut y = 200.0;
    for step in 0..60 {
        // Deterministic zig-zag with growing amplitude.
        let swing = (step as f32 * 37.0) % 900.0;
        y = if step % 2 == 0 { y + swing } else { y - swing };
        rule.pointer_move(1, p(y));
        assert_in_travel_range(rule.drawer());
    }
    rule.pointer_up(1, p(y));
    while !rule.is_idle() {
        rule.advance_frame();
        assert_in_travel_range(rule.drawer());
    }
}

#[test]
fn open_and_close_round_trip() {
    let mut rule = DrawerTestRule::default();

    rule.drawer().open();
    rule.pump_until_idle();
    rule.drawer().close();
    rule.pump_until_idle();
    rule.drawer().close();
    rule.pump_until_idle();

    assert_eq!(rule.openness_changes(), vec![true, false]);
    assert_eq!(rule.drawer().current_top(), -640.0);
}

#[test]
fn toggle_twice_returns_to_closed() {
    let mut rule = DrawerTestRule::default();

    rule.drawer().toggle();
    rule.pump_until_idle();
    assert!(rule.drawer().is_open());
    rule.drawer().toggle();
    rule.pump_until_idle();

    assert!(!rule.drawer().is_open());
}

#[test]
fn peek_change_reflows_a_closed_drawer() {
    let mut rule = DrawerTestRule::default();

    rule.set_peek_height(200.0);

    assert_eq!(rule.host().layout_requests(), 1);
    assert_eq!(rule.drawer().current_top(), -800.0);
    assert_eq!(rule.drawer().show_height(), 200);
    assert!(rule.events().is_empty());
}

#[test]
fn settle_wakes_the_frame_loop_once() {
    let rule = DrawerTestRule::default();
    let wakes = Rc::new(Cell::new(0));
    let counter = wakes.clone();
    rule.runtime_handle()
        .set_frame_waker(move || counter.set(counter.get() + 1));

    rule.drawer().open();

    assert_eq!(wakes.get(), 1);
    assert!(!rule.is_idle());
}

#[test]
fn cancel_mid_drag_settles_by_position() {
    let mut rule = DrawerTestRule::default();
    rule.drag(1, p(200.0), p(700.0), 10);

    rule.pointer_cancel(1);
    rule.pump_until_idle();

    assert!(rule.drawer().is_open());
}
