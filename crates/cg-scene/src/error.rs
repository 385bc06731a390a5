//! Error types for scene configuration and camera construction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while loading or building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// A config value is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Degenerate math input (zero-length axis, singular matrix, ...).
    #[error(transparent)]
    Math(#[from] cg_core::Error),
}

impl SceneError {
    /// Creates an [`SceneError::InvalidValue`] error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_is_transparent() {
        let err: SceneError = cg_core::Error::ZeroLength.into();
        assert_eq!(err.to_string(), cg_core::Error::ZeroLength.to_string());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = SceneError::invalid("radius", "must be positive");
        assert_eq!(err.to_string(), "invalid radius: must be positive");
    }
}
