//! Core runtime for the vertical drawer.
//!
//! Everything here runs on a single UI thread. Animations never block: they
//! register a frame callback through the [`FrameClock`] and the host drains the
//! queue once per vsync with [`RuntimeHandle::drain_frame_callbacks`].

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameRuntime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{FrameRuntime, RuntimeHandle};
    pub use crate::FrameCallbackId;
}
