mod controller;
mod geometry;
mod host;
mod vertical_drawer;

pub use controller::{DragSettleController, DragState, DrawerEffect, DrawerEffects};
pub use geometry::{DrawerGeometry, RestPosition};
pub use host::DrawerHost;
pub use vertical_drawer::VerticalDrawer;
