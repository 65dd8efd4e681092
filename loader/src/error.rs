//! Error types for declaration loading.
//!
//! Covers every way building a [`CommandLine`](crate::CommandLine) can fail:
//! an unreadable declaration file, malformed JSON or YAML, and a failed bind.

use std::path::PathBuf;

use argsmap_core::{BindFailure, DeclarationError, DeclarationSet};
use thiserror::Error;

/// Errors that can occur while loading declarations or binding against them.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The declaration file is missing or unreadable.
    #[error("failed to load declaration file '{}': {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON declarations could not be parsed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The argument vector did not satisfy the declarations.
    ///
    /// Carries the declarations that were bound against, so callers can show
    /// help without reloading them.
    #[error("failed to bind command line: {failure}")]
    Bind {
        failure: BindFailure,
        declarations: DeclarationSet,
    },
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
