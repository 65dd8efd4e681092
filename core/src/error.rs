//! Error types for loading declarations and binding arguments.

use thiserror::Error;

use crate::BindingMap;

/// Errors raised while reading a declaration document.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// The document is not a valid mapping of flag declarations.
    #[error("failed to parse flag declarations: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Reasons a bind pass stops.
///
/// Each variant names the offending token; value-related variants also carry
/// the declaration's error message so callers can show it to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The token is not declared.
    #[error("unknown flag: {token}")]
    UnknownFlag { token: String },

    /// A value-taking flag was the last argument.
    #[error("no value provided for {token}: {message}")]
    MissingValue { token: String, message: String },

    /// The value does not match the declared pattern.
    #[error("value '{value}' for {token} does not match pattern '{pattern}': {message}")]
    PatternMismatch {
        token: String,
        value: String,
        pattern: String,
        message: String,
    },

    /// The declared pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}' declared for {token}: {reason}")]
    InvalidPattern {
        token: String,
        pattern: String,
        reason: String,
    },
}

impl BindError {
    /// Returns the token the failure refers to.
    pub fn token(&self) -> &str {
        match self {
            Self::UnknownFlag { token }
            | Self::MissingValue { token, .. }
            | Self::PatternMismatch { token, .. }
            | Self::InvalidPattern { token, .. } => token,
        }
    }
}

/// A failed bind: the error plus whatever bindings the failure policy kept.
///
/// Under [`OnFailure::Fatal`](crate::OnFailure::Fatal) `partial` is always
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct BindFailure {
    pub error: BindError,
    pub partial: BindingMap,
}

/// Lookup of a token that was not supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value not provided for {0}")]
pub struct ArgumentNotProvided(pub String);
