//! Animation support for the vertical drawer.
//!
//! A settle is a time-based tween from wherever the drawer was released to one
//! of its rest positions. Short hops and fast flings finish quickly; nothing
//! runs longer than the configured cap.

mod easing;
mod settle;

pub use easing::{Easing, Lerp};
pub use settle::{compute_settle_duration_ms, SettleAnimation, SettleFrame, SettleSpec};
