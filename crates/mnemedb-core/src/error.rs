//! Error types for `MnemeDB`.
//!
//! This module provides a unified error type for all `MnemeDB` operations.
//! Every variant covers a configuration fault surfaced at construction time:
//! absent identifiers are expected outcomes signaled as `None`, and
//! dimension mismatches are recovered locally by the scoring fallback, so
//! neither appears here.

use thiserror::Error;

/// Result type alias for `MnemeDB` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `MnemeDB` operations.
///
/// Each variant includes a descriptive error message suitable for end-users.
/// Error codes follow the pattern `MNEME-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid scoring weight (MNEME-001).
    #[error("[MNEME-001] Invalid scoring weight '{key}': {value} (must be finite and non-negative)")]
    InvalidWeight {
        /// Name of the offending weight.
        key: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Invalid decay constant (MNEME-002).
    #[error("[MNEME-002] Invalid decay constant '{key}': {value} (must be finite and non-negative)")]
    InvalidDecay {
        /// Name of the offending constant.
        key: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Threshold out of range (MNEME-003).
    #[error("[MNEME-003] Invalid threshold '{key}': {value} (must be within [{min}, {max}])")]
    InvalidThreshold {
        /// Name of the offending threshold.
        key: &'static str,
        /// The rejected value.
        value: f32,
        /// Lower bound of the accepted range.
        min: f32,
        /// Upper bound of the accepted range.
        max: f32,
    },

    /// Configuration error (MNEME-004).
    #[error("[MNEME-004] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "MNEME-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidWeight { .. } => "MNEME-001",
            Self::InvalidDecay { .. } => "MNEME-002",
            Self::InvalidThreshold { .. } => "MNEME-003",
            Self::Config(_) => "MNEME-004",
        }
    }
}

/// Conversion from the layered-configuration error.
impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
