//! Gesture-driven vertical drawer.
//!
//! A drawer panel overlays a fixed content surface and can be dragged open or
//! closed along the vertical axis. After release it settles into one of two
//! rest positions: fully open (`top == 0`) or peeking (`top == -height + peek`).
//!
//! [`DragSettleController`] is the pure state machine. [`VerticalDrawer`] wraps
//! it for a host: it drives settle animations from a [`FrameClock`] and forwards
//! placements to a [`DrawerHost`] and the two observers.
//!
//! [`FrameClock`]: vdrawer_core::FrameClock

mod config;
pub mod drawer;

pub use config::{DrawerConfig, DEFAULT_PEEK_HEIGHT};
pub use drawer::{
    DragSettleController, DragState, DrawerEffect, DrawerEffects, DrawerGeometry, DrawerHost,
    RestPosition, VerticalDrawer,
};

pub use vdrawer_animation::{Easing, SettleSpec};
pub use vdrawer_foundation::{
    Point, PointerEvent, PointerEventKind, PointerId, Rect, Size, Surface,
};

pub mod prelude {
    pub use crate::config::{DrawerConfig, DEFAULT_PEEK_HEIGHT};
    pub use crate::drawer::{
        DragSettleController, DragState, DrawerEffect, DrawerGeometry, DrawerHost, RestPosition,
        VerticalDrawer,
    };
    pub use vdrawer_foundation::prelude::*;
}
