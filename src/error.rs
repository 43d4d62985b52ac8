//! Error types for route resolution and navigation state

use thiserror::Error;

/// Result type alias for navigation operations
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors raised while loading navigation configuration or touching persisted state
///
/// Lookup failures (`NotFound`, `Forbidden`) are not errors; they are reported
/// through [`crate::access::Access`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// A route node declares only one of `path` / `title`
    #[error("route node '{key}' declares `{present}` without `{missing}`")]
    AmbiguousNode {
        key: String,
        present: &'static str,
        missing: &'static str,
    },

    /// A route node has the wrong shape (not an object, non-string title, ...)
    #[error("invalid route node '{key}': {reason}")]
    InvalidNode { key: String, reason: String },

    /// Route tree nesting exceeds the configured bound
    #[error("route tree depth {depth} exceeds maximum {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    /// A declared path pattern is malformed
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A sidebar entry links to a path no declared route resolves
    #[error("sidebar entry '{title}' links to undeclared path '{to}'")]
    UnknownSidebarLink { title: String, to: String },

    /// Navigation configuration could not be parsed
    #[error("failed to parse navigation configuration: {0}")]
    Parse(String),

    /// Key-value store backend failure
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Persisted state could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl NavError {
    /// Returns `true` for errors that indicate a malformed route or sidebar
    /// configuration. These are expected at load time, never mid-navigation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NavError::AmbiguousNode { .. }
                | NavError::InvalidNode { .. }
                | NavError::DepthExceeded { .. }
                | NavError::InvalidPattern { .. }
                | NavError::UnknownSidebarLink { .. }
                | NavError::Parse(_)
        )
    }
}

impl From<anyhow::Error> for NavError {
    fn from(err: anyhow::Error) -> Self {
        NavError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NavError {
    fn from(err: serde_json::Error) -> Self {
        NavError::Serialization(err.to_string())
    }
}
