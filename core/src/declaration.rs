//! Flag declaration types.
//!
//! A [`DeclarationSet`] is the read-only table of every flag token a tool
//! recognizes, together with the contract for its value. It is normally
//! loaded once from a JSON document at startup:
//!
//! ```json
//! {
//!   "-p": { "flag": "-p", "pattern": "^[0-9]+$", "value": "8080",
//!           "expect": "port number", "usage": "listen port",
//!           "err": "port must be numeric" },
//!   "-h": { "usage": "show help", "must_have_value": false }
//! }
//! ```
//!
//! Every field is optional. `must_have_value` defaults to `true`, so a flag
//! takes a value unless the declaration says otherwise.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DeclarationError;

/// Declared contract for a single flag token.
///
/// # Examples
///
/// ```
/// use argsmap_core::FlagDeclaration;
///
/// let port = FlagDeclaration::with_value("-p")
///     .with_pattern("^[0-9]+$")
///     .with_usage("listen port")
///     .with_default("8080");
/// assert!(port.requires_value);
/// assert!(port.has_pattern());
///
/// let help = FlagDeclaration::presence("-h");
/// assert!(!help.requires_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDeclaration {
    /// Exact token matched against an argument (e.g. "-p").
    pub token: String,
    /// Regular expression a bound value must match. Empty means no check.
    pub value_pattern: String,
    /// Default shown in help output. Never inserted into bindings.
    pub default_value: String,
    /// Description of the expected value, for help output.
    pub expected_value: String,
    /// What the flag does, for help output.
    pub usage: String,
    /// Message attached to errors raised for this flag.
    pub error_message: String,
    /// Whether the flag consumes the following argument as its value.
    pub requires_value: bool,
}

impl FlagDeclaration {
    /// Creates a flag that consumes the following argument as its value.
    pub fn with_value(token: &str) -> Self {
        Self {
            token: token.to_string(),
            value_pattern: String::new(),
            default_value: String::new(),
            expected_value: String::new(),
            usage: String::new(),
            error_message: String::new(),
            requires_value: true,
        }
    }

    /// Creates a presence-only flag.
    pub fn presence(token: &str) -> Self {
        Self {
            requires_value: false,
            ..Self::with_value(token)
        }
    }

    /// Sets the value pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.value_pattern = pattern.to_string();
        self
    }

    /// Sets the usage text.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Sets the expected-value description.
    pub fn with_expected(mut self, expected: &str) -> Self {
        self.expected_value = expected.to_string();
        self
    }

    /// Sets the default value shown in help.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default_value = default.to_string();
        self
    }

    /// Sets the message reported when validation fails.
    pub fn with_error_message(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }

    /// Returns `true` if a non-empty value pattern is declared.
    pub fn has_pattern(&self) -> bool {
        !self.value_pattern.is_empty()
    }

    /// Builds a declaration from its source form, applying field defaults.
    ///
    /// `token` is the key the entry was stored under; the raw `flag` field is
    /// informational only. Missing strings become empty and a missing
    /// `must_have_value` becomes `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmap_core::{FlagDeclaration, RawFlagDeclaration};
    ///
    /// let raw: RawFlagDeclaration = serde_json::from_str(r#"{"usage": "port"}"#).unwrap();
    /// let decl = FlagDeclaration::from_raw("-p", raw);
    /// assert!(decl.requires_value);
    /// assert_eq!(decl.usage, "port");
    /// ```
    pub fn from_raw(token: &str, raw: RawFlagDeclaration) -> Self {
        Self {
            token: token.to_string(),
            value_pattern: raw.pattern.unwrap_or_default(),
            default_value: raw.value.unwrap_or_default(),
            expected_value: raw.expect.unwrap_or_default(),
            usage: raw.usage.unwrap_or_default(),
            error_message: raw.err.unwrap_or_default(),
            requires_value: raw.must_have_value.unwrap_or(true),
        }
    }
}

/// A flag declaration exactly as it appears in a declaration document.
///
/// Every field is optional so that omissions can be told apart from explicit
/// values; [`FlagDeclaration::from_raw`] applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFlagDeclaration {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub flag: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub pattern: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub expect: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub err: Option<String>,
    #[serde(default)]
    pub must_have_value: Option<bool>,
}

/// Scalar accepted where a declaration expects text, so `value: 8080` in YAML
/// or `"value": 8080` in JSON reads as `"8080"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

/// Read-only table of recognized flags, keyed and ordered by token.
///
/// # Examples
///
/// ```
/// use argsmap_core::DeclarationSet;
///
/// let set = DeclarationSet::load(r#"{
///     "-p": {"pattern": "^[0-9]+$"},
///     "-h": {"must_have_value": false}
/// }"#).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert!(set.get("-p").unwrap().requires_value);
/// assert!(!set.get("-h").unwrap().requires_value);
/// assert_eq!(set.tokens().collect::<Vec<_>>(), vec!["-h", "-p"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    flags: BTreeMap<String, FlagDeclaration>,
}

impl DeclarationSet {
    /// Parses a JSON declaration document.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Deserialization`] if `raw` is not a JSON
    /// object of flag declarations.
    pub fn load(raw: &str) -> Result<Self, DeclarationError> {
        let entries: BTreeMap<String, RawFlagDeclaration> = serde_json::from_str(raw)?;
        Ok(Self::from_raw(entries))
    }

    /// Builds a set from already-deserialized source entries.
    pub fn from_raw(entries: BTreeMap<String, RawFlagDeclaration>) -> Self {
        let flags = entries
            .into_iter()
            .map(|(token, raw)| {
                let decl = FlagDeclaration::from_raw(&token, raw);
                (token, decl)
            })
            .collect();
        Self { flags }
    }

    /// Looks up the declaration for an exact token.
    pub fn get(&self, token: &str) -> Option<&FlagDeclaration> {
        self.flags.get(token)
    }

    /// Returns `true` if `token` is declared.
    pub fn contains(&self, token: &str) -> bool {
        self.flags.contains_key(token)
    }

    /// Iterates declarations in token order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDeclaration> {
        self.flags.values()
    }

    /// Iterates declared tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<FlagDeclaration> for DeclarationSet {
    /// Collects declarations; a repeated token keeps the last declaration.
    fn from_iter<I: IntoIterator<Item = FlagDeclaration>>(iter: I) -> Self {
        let flags = iter
            .into_iter()
            .map(|decl| (decl.token.clone(), decl))
            .collect();
        Self { flags }
    }
}

impl<'a> IntoIterator for &'a DeclarationSet {
    type Item = &'a FlagDeclaration;
    type IntoIter = std::collections::btree_map::Values<'a, String, FlagDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.values()
    }
}
