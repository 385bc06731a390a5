//! # cg-core
//!
//! Shared foundations for the cgkit crates.
//!
//! - [`Error`], [`Result`] - failures of the checked math operations
//! - [`PI`], [`RAD`], [`DEG`], [`to_radians`], [`to_degrees`] - angle helpers
//!
//! ## Crate Structure
//!
//! ```text
//! cg-core (this crate)
//!    ^
//!    |
//!    +-- cg-math (vectors, quaternions, matrices, projections)
//!    +-- cg-scene (cameras, transforms, geometry, config)
//!    +-- cg-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod angle;
pub mod error;

pub use angle::*;
pub use error::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::angle::{to_degrees, to_radians, DEG, PI, PI_HALF, RAD};
    pub use crate::error::{Error, Result};
}
