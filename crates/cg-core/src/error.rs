//! Error types for the checked math operations.
//!
//! The hot-path operations of `cg-math` (normalize, inverse, look-at, ...)
//! never fail: degenerate input produces IEEE-754 Inf/NaN, exactly as a
//! render loop expects. Every such operation also has a `try_*` twin that
//! validates its input first and reports the problem through [`Error`].
//!
//! # Usage
//!
//! ```rust
//! use cg_core::{Error, Result};
//!
//! fn safe_recip(len: f32) -> Result<f32> {
//!     if len.abs() <= cg_core::EPSILON {
//!         return Err(Error::ZeroLength);
//!     }
//!     Ok(1.0 / len)
//! }
//!
//! assert!(safe_recip(0.0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - `cg-math` - `try_normalized`, `try_inverse`, `try_look_at`, ...
//! - `cg-scene` - wrapped by `SceneError`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the checked math operations.
///
/// # Categories
///
/// - **Length errors**: [`ZeroLength`](Error::ZeroLength)
/// - **Matrix errors**: [`SingularMatrix`](Error::SingularMatrix)
/// - **View/projection errors**: [`DegenerateBasis`](Error::DegenerateBasis),
///   [`InvalidProjection`](Error::InvalidProjection)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A vector or quaternion with (near-)zero magnitude was normalized.
    #[error("cannot normalize a zero-length value")]
    ZeroLength,

    /// A matrix with (near-)zero determinant was inverted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_core::Error;
    ///
    /// let err = Error::SingularMatrix { determinant: 0.0 };
    /// assert!(err.to_string().contains("singular"));
    /// ```
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix {
        /// Determinant that was computed
        determinant: f32,
    },

    /// A look-at basis could not be built.
    ///
    /// Happens when `eye == center` or when `up` is parallel to the view
    /// direction, so the right vector has zero length.
    #[error("degenerate view basis: {reason}")]
    DegenerateBasis {
        /// What collapsed
        reason: String,
    },

    /// Projection parameters produce a division by zero or a flipped frustum.
    #[error("invalid projection: {reason}")]
    InvalidProjection {
        /// Which parameter is wrong
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::DegenerateBasis`] error.
    #[inline]
    pub fn degenerate_basis(reason: impl Into<String>) -> Self {
        Self::DegenerateBasis {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidProjection`] error.
    #[inline]
    pub fn invalid_projection(reason: impl Into<String>) -> Self {
        Self::InvalidProjection {
            reason: reason.into(),
        }
    }
}
