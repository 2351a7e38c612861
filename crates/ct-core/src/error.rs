//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `ct-core`: settings lookup and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("setting {namespace}.{name}: {reason}")]
    Setting {
        namespace: String,
        name:      String,
        reason:    String,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ct-core`.
pub type CoreResult<T> = Result<T, CoreError>;
