//! Assertion helpers for drawer tests.

use vdrawer_ui::VerticalDrawer;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the drawer sits between its closed and open rest offsets.
pub fn assert_in_travel_range(drawer: &VerticalDrawer) {
    let (top, closed, open) = drawer.with_controller(|controller| {
        let geometry = controller.geometry();
        (
            controller.current_top(),
            geometry.rest_closed_top(),
            geometry.rest_open_top(),
        )
    });
    assert!(
        top >= closed && top <= open,
        "drawer top {} outside [{}, {}]",
        top,
        closed,
        open
    );
}
