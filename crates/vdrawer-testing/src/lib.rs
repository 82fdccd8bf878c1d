//! Testing utilities and harness for the vertical drawer

pub mod assertions;
pub mod testing;

pub use assertions::{assert_approx_eq, assert_in_travel_range};
pub use testing::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::testing::*;
}
