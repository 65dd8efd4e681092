//! Declaration set validation.
//!
//! Catches declarations that load fine but can never behave as intended:
//! tokens the binder cannot match, patterns that do not compile, and patterns
//! attached to flags that never take a value.
//!
//! # Examples
//!
//! ```
//! use argsmap_core::*;
//!
//! let good = DeclarationSet::load(r#"{"-p": {"pattern": "^[0-9]+$"}}"#).unwrap();
//! assert!(validate_declarations(&good).is_empty());
//!
//! let bad = DeclarationSet::load(r#"{"-p": {"pattern": "(["}}"#).unwrap();
//! assert!(matches!(
//!     validate_declarations(&bad).as_slice(),
//!     [ValidationError::InvalidPattern { .. }]
//! ));
//! ```

use regex::Regex;
use thiserror::Error;

use crate::{DeclarationSet, FlagDeclaration};

/// Declaration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Token is empty or whitespace-only.
    #[error("flag token cannot be empty")]
    EmptyToken,
    /// Token has surrounding whitespace, so a trimmed argument never matches it.
    #[error("flag token has surrounding whitespace: '{0}'")]
    UntrimmedToken(String),
    /// Pattern fails to compile.
    #[error("invalid pattern '{pattern}' for {token}: {reason}")]
    InvalidPattern {
        token: String,
        pattern: String,
        reason: String,
    },
    /// A presence-only flag declares a pattern that is never checked.
    #[error("pattern declared for {0}, which takes no value")]
    PatternWithoutValue(String),
}

/// Validates every declaration in the set.
///
/// Errors are reported in token order; each declaration contributes at most
/// one error.
pub fn validate_declarations(declarations: &DeclarationSet) -> Vec<ValidationError> {
    declarations.iter().filter_map(validate_flag).collect()
}

fn validate_flag(decl: &FlagDeclaration) -> Option<ValidationError> {
    let token = decl.token.as_str();

    if token.trim().is_empty() {
        return Some(ValidationError::EmptyToken);
    }
    if token.trim() != token {
        return Some(ValidationError::UntrimmedToken(token.to_string()));
    }

    if !decl.has_pattern() {
        return None;
    }
    if !decl.requires_value {
        return Some(ValidationError::PatternWithoutValue(token.to_string()));
    }
    Regex::new(&decl.value_pattern)
        .err()
        .map(|e| ValidationError::InvalidPattern {
            token: token.to_string(),
            pattern: decl.value_pattern.clone(),
            reason: e.to_string(),
        })
}
