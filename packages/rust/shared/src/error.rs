//! Error types for placepress.
//!
//! Library crates use [`PlacepressError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all placepress operations.
#[derive(Debug, thiserror::Error)]
pub enum PlacepressError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Catalog loading error: missing source, empty catalog, or a record
    /// that fails load-time validation. Always fatal before any output.
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// JSON/TOML parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Network/HTTP error during notification.
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Document rendering error.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlacepressError>;

impl PlacepressError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a catalog error from any displayable message.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PlacepressError::config("no site domain configured");
        assert_eq!(err.to_string(), "config error: no site domain configured");

        let err = PlacepressError::catalog("entity #3 has no id");
        assert!(err.to_string().contains("entity #3"));
    }
}
