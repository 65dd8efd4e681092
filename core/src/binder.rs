//! Argument binding against a [`DeclarationSet`].
//!
//! The binder walks the argument vector once, left to right, starting after
//! the program name. Each token is trimmed and looked up by exact,
//! case-sensitive match:
//!
//! - an undeclared token stops the pass with [`BindError::UnknownFlag`];
//! - a presence-only flag binds to [`PRESENCE_VALUE`] and consumes one slot;
//! - a value-taking flag consumes the next argument, which must exist and
//!   match the declared pattern, and binds it untrimmed.
//!
//! What happens to bindings made before a failure is decided by
//! [`OnFailure`], which the caller must pick explicitly.
//!
//! # Examples
//!
//! ```
//! use argsmap_core::{Binder, BinderConfig, BindError, DeclarationSet};
//!
//! let set = DeclarationSet::load(r#"{
//!     "-p": {"pattern": "^[0-9]+$", "err": "port must be numeric"},
//!     "-h": {"must_have_value": false}
//! }"#).unwrap();
//! let binder = Binder::new(BinderConfig::recoverable());
//!
//! let map = binder.bind(&set, &["prog", "-p", "8080", "-h"]).unwrap();
//! assert_eq!(map.find("-p"), Some("8080"));
//! assert_eq!(map.find("-h"), Some("1"));
//!
//! let failure = binder.bind(&set, &["prog", "-x"]).unwrap_err();
//! assert_eq!(failure.error, BindError::UnknownFlag { token: "-x".into() });
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{BindError, BindFailure, BindingMap, DeclarationSet, FlagDeclaration, PRESENCE_VALUE};

/// What a failed bind returns alongside its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnFailure {
    /// Keep the bindings made before the failing token.
    Recoverable,
    /// Discard all bindings; the caller is expected to abort.
    Fatal,
}

/// Construction-time options for a [`Binder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderConfig {
    /// Whether a failed bind keeps or discards earlier bindings.
    pub on_failure: OnFailure,
    /// Report each binding at `info` level instead of `debug`.
    pub narrate: bool,
}

impl BinderConfig {
    pub fn new(on_failure: OnFailure) -> Self {
        Self {
            on_failure,
            narrate: false,
        }
    }

    /// Failures keep partial bindings.
    pub fn recoverable() -> Self {
        Self::new(OnFailure::Recoverable)
    }

    /// Failures discard partial bindings.
    pub fn fatal() -> Self {
        Self::new(OnFailure::Fatal)
    }

    pub fn with_narration(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }
}

/// Validates and binds argument vectors.
#[derive(Debug, Clone, Copy)]
pub struct Binder {
    config: BinderConfig,
}

impl Binder {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> BinderConfig {
        self.config
    }

    /// Binds `args` against `declarations`.
    ///
    /// `args[0]` is taken to be the program name and skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`BindFailure`] at the first unknown flag, missing value,
    /// pattern mismatch, or uncompilable pattern. Its `partial` map follows
    /// the configured [`OnFailure`] policy.
    pub fn bind<S: AsRef<str>>(
        &self,
        declarations: &DeclarationSet,
        args: &[S],
    ) -> Result<BindingMap, BindFailure> {
        let mut bindings = BindingMap::new();
        let mut i = 1;

        while i < args.len() {
            let token = args[i].as_ref().trim();

            let Some(decl) = declarations.get(token) else {
                return Err(self.fail(
                    BindError::UnknownFlag {
                        token: token.to_string(),
                    },
                    bindings,
                ));
            };

            if !decl.requires_value {
                self.report_binding(token, PRESENCE_VALUE);
                bindings.insert(token, PRESENCE_VALUE);
                i += 1;
                continue;
            }

            let value = match args.get(i + 1) {
                Some(value) => value.as_ref(),
                None => {
                    return Err(self.fail(
                        BindError::MissingValue {
                            token: token.to_string(),
                            message: decl.error_message.clone(),
                        },
                        bindings,
                    ));
                }
            };

            if let Err(error) = check_value(decl, value) {
                return Err(self.fail(error, bindings));
            }

            self.report_binding(token, value);
            bindings.insert(token, value);
            i += 2;
        }

        if self.config.narrate {
            info!(count = bindings.len(), bindings = ?bindings, "Command line bound");
        } else {
            debug!(count = bindings.len(), "Command line bound");
        }

        Ok(bindings)
    }

    fn report_binding(&self, token: &str, value: &str) {
        if self.config.narrate {
            info!(token = %token, value = %value, "Bound flag");
        } else {
            debug!(token = %token, value = %value, "Bound flag");
        }
    }

    fn fail(&self, error: BindError, bindings: BindingMap) -> BindFailure {
        if self.config.narrate {
            warn!(error = %error, "Binding failed");
        } else {
            debug!(error = %error, "Binding failed");
        }

        let partial = match self.config.on_failure {
            OnFailure::Recoverable => bindings,
            OnFailure::Fatal => BindingMap::new(),
        };
        BindFailure { error, partial }
    }
}

fn check_value(decl: &FlagDeclaration, value: &str) -> Result<(), BindError> {
    if !decl.has_pattern() {
        return Ok(());
    }

    let pattern = Regex::new(&decl.value_pattern).map_err(|e| BindError::InvalidPattern {
        token: decl.token.clone(),
        pattern: decl.value_pattern.clone(),
        reason: e.to_string(),
    })?;

    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(BindError::PatternMismatch {
            token: decl.token.clone(),
            value: value.to_string(),
            pattern: decl.value_pattern.clone(),
            message: decl.error_message.clone(),
        })
    }
}

/// Pairs consecutive tokens as key and value without any validation.
///
/// Used when no declarations are available. Starting after the program name,
/// each token becomes a key and the following token its value; a trailing key
/// gets an empty value.
///
/// # Examples
///
/// ```
/// use argsmap_core::passthrough;
///
/// let map = passthrough(&["prog", "-a", "1", "-b"]);
/// assert_eq!(map.find("-a"), Some("1"));
/// assert_eq!(map.find("-b"), Some(""));
/// ```
pub fn passthrough<S: AsRef<str>>(args: &[S]) -> BindingMap {
    let mut bindings = BindingMap::new();
    let mut rest = args.iter().skip(1).map(AsRef::as_ref);
    while let Some(key) = rest.next() {
        let value = rest.next().unwrap_or("");
        bindings.insert(key, value);
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port_and_help() -> DeclarationSet {
        DeclarationSet::load(
            r#"{
                "-p": {"must_have_value": true, "pattern": "^[0-9]+$", "err": "port must be numeric"},
                "-h": {"must_have_value": false}
            }"#,
        )
        .unwrap()
    }

    fn recoverable() -> Binder {
        Binder::new(BinderConfig::recoverable())
    }

    #[test]
    fn test_binds_value_and_presence_flags() {
        let map = recoverable()
            .bind(&port_and_help(), &["prog", "-p", "8080", "-h"])
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.find("-p"), Some("8080"));
        assert_eq!(map.find("-h"), Some(PRESENCE_VALUE));
    }

    #[test]
    fn test_only_supplied_flags_are_bound() {
        let map = recoverable().bind(&port_and_help(), &["prog", "-h"]).unwrap();
        assert_eq!(map.tokens().collect::<Vec<_>>(), vec!["-h"]);
    }

    #[test]
    fn test_program_name_only_yields_empty_map() {
        let map = recoverable().bind(&port_and_help(), &["prog"]).unwrap();
        assert!(map.is_empty());

        let empty: [&str; 0] = [];
        assert!(recoverable().bind(&port_and_help(), &empty).unwrap().is_empty());
    }

    #[test]
    fn test_pattern_mismatch_reports_value_and_pattern() {
        let failure = recoverable()
            .bind(&port_and_help(), &["prog", "-p", "abc"])
            .unwrap_err();
        assert_eq!(
            failure.error,
            BindError::PatternMismatch {
                token: "-p".to_string(),
                value: "abc".to_string(),
                pattern: "^[0-9]+$".to_string(),
                message: "port must be numeric".to_string(),
            }
        );
        let rendered = failure.to_string();
        assert!(rendered.contains("abc"));
        assert!(rendered.contains("^[0-9]+$"));
    }

    #[test]
    fn test_unknown_flag_names_token() {
        let failure = recoverable()
            .bind(&port_and_help(), &["prog", "-x"])
            .unwrap_err();
        assert_eq!(
            failure.error,
            BindError::UnknownFlag {
                token: "-x".to_string()
            }
        );
        assert_eq!(failure.error.token(), "-x");
    }

    #[test]
    fn test_trailing_value_flag_is_missing_value() {
        let failure = recoverable()
            .bind(&port_and_help(), &["prog", "-h", "-p"])
            .unwrap_err();
        assert_eq!(
            failure.error,
            BindError::MissingValue {
                token: "-p".to_string(),
                message: "port must be numeric".to_string(),
            }
        );
    }

    #[test]
    fn test_presence_flag_leaves_next_token_as_flag() {
        // "-p" after "-h" must be looked up as a flag, not taken as a value.
        let map = recoverable()
            .bind(&port_and_help(), &["prog", "-h", "-p", "1"])
            .unwrap();
        assert_eq!(map.find("-h"), Some("1"));
        assert_eq!(map.find("-p"), Some("1"));

        let failure = recoverable()
            .bind(&port_and_help(), &["prog", "-h", "extra"])
            .unwrap_err();
        assert_eq!(failure.error.token(), "extra");
    }

    #[test]
    fn test_flag_token_is_trimmed_but_value_is_not() {
        let set: DeclarationSet = [FlagDeclaration::with_value("-n")].into_iter().collect();
        let map = recoverable()
            .bind(&set, &["prog", "  -n\t", " padded value "])
            .unwrap();
        assert_eq!(map.find("-n"), Some(" padded value "));
    }

    #[test]
    fn test_matching_is_case_sensitive_and_exact() {
        let set: DeclarationSet = [FlagDeclaration::presence("-v")].into_iter().collect();
        let binder = recoverable();
        assert!(binder.bind(&set, &["prog", "-V"]).is_err());
        assert!(binder.bind(&set, &["prog", "-ve"]).is_err());
        assert!(binder.bind(&set, &["prog", "-"]).is_err());
    }

    #[test]
    fn test_value_that_looks_like_flag_is_consumed() {
        let set: DeclarationSet = [
            FlagDeclaration::with_value("-o"),
            FlagDeclaration::presence("-h"),
        ]
        .into_iter()
        .collect();
        let map = recoverable().bind(&set, &["prog", "-o", "-h"]).unwrap();
        assert_eq!(map.find("-o"), Some("-h"));
        assert!(!map.is_present("-h"));
    }

    #[test]
    fn test_pattern_uses_search_semantics() {
        let set: DeclarationSet = [FlagDeclaration::with_value("-t").with_pattern("[0-9]")]
            .into_iter()
            .collect();
        assert!(recoverable().bind(&set, &["prog", "-t", "abc1def"]).is_ok());
    }

    #[test]
    fn test_invalid_pattern_is_error_not_panic() {
        let set: DeclarationSet = [FlagDeclaration::with_value("-t").with_pattern("([")]
            .into_iter()
            .collect();
        let failure = recoverable().bind(&set, &["prog", "-t", "x"]).unwrap_err();
        assert!(matches!(failure.error, BindError::InvalidPattern { .. }));
    }

    #[test]
    fn test_recoverable_keeps_partial_bindings() {
        let failure = recoverable()
            .bind(&port_and_help(), &["prog", "-p", "80", "-x", "-h"])
            .unwrap_err();
        assert_eq!(failure.partial.find("-p"), Some("80"));
        assert_eq!(failure.partial.len(), 1);
    }

    #[test]
    fn test_fatal_discards_partial_bindings() {
        let binder = Binder::new(BinderConfig::fatal());
        let failure = binder
            .bind(&port_and_help(), &["prog", "-p", "80", "-x"])
            .unwrap_err();
        assert!(failure.partial.is_empty());

        let failure = binder
            .bind(&port_and_help(), &["prog", "-h", "-p", "nope"])
            .unwrap_err();
        assert!(failure.partial.is_empty());
    }

    #[test]
    fn test_narration_does_not_change_result() {
        let quiet = recoverable();
        let loud = Binder::new(BinderConfig::recoverable().with_narration(true));
        let args = ["prog", "-p", "8080", "-h"];
        assert_eq!(
            quiet.bind(&port_and_help(), &args),
            loud.bind(&port_and_help(), &args)
        );
    }

    #[test]
    fn test_accepts_owned_strings() {
        let args: Vec<String> = vec!["prog".into(), "-p".into(), "1".into()];
        let map = recoverable().bind(&port_and_help(), &args).unwrap();
        assert_eq!(map.find("-p"), Some("1"));
    }

    #[test]
    fn test_passthrough_pairs_tokens() {
        let map = passthrough(&["prog", "-a", "1", "-b", "2"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.find("-a"), Some("1"));
        assert_eq!(map.find("-b"), Some("2"));
    }

    #[test]
    fn test_passthrough_trailing_key_gets_empty_value() {
        let map = passthrough(&["prog", "-a", "1", "-b"]);
        assert_eq!(map.find("-b"), Some(""));
        assert!(passthrough(&["prog"]).is_empty());
    }
}
