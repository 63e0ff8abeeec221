//! Error types for Glean.
//!
//! Library crates use [`GleanError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Glean operations.
#[derive(Debug, thiserror::Error)]
pub enum GleanError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level failure (connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The remote answered with a non-success status code.
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Expected content was absent (no search results, empty page).
    #[error("{message}")]
    EmptyContent { message: String },

    /// Malformed markup, payload, selector or identifier.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A required input parameter was not supplied.
    #[error("{name} parameter is required")]
    MissingParameter { name: String },

    /// Input validation error (rating out of range, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GleanError>;

impl GleanError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create an empty-content error from any displayable message.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::EmptyContent {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a missing-parameter error for the named input.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by caller input rather than upstream failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::Validation { .. }
        )
    }
}
