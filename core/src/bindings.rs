//! Bound flag values produced by a bind pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ArgumentNotProvided, DeclarationSet};

/// Value bound to flags that take no value.
pub const PRESENCE_VALUE: &str = "1";

/// Mapping from supplied flag token to its bound value.
///
/// Holds exactly the flags that appeared on the command line. Declared
/// defaults are never inserted; use
/// [`value_or_default`](BindingMap::value_or_default) to opt in.
///
/// # Examples
///
/// ```
/// use argsmap_core::{BindingMap, PRESENCE_VALUE};
///
/// let mut map = BindingMap::new();
/// map.insert("-p", "8080");
/// map.insert("-h", PRESENCE_VALUE);
///
/// assert_eq!(map.get("-p").unwrap(), "8080");
/// assert!(map.is_present("-h"));
/// assert!(map.get("-x").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingMap {
    values: BTreeMap<String, String>,
}

impl BindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, token: &str, value: &str) {
        self.values.insert(token.to_string(), value.to_string());
    }

    /// Returns the value bound to `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentNotProvided`] if the flag was not supplied.
    pub fn get(&self, token: &str) -> Result<&str, ArgumentNotProvided> {
        self.find(token)
            .ok_or_else(|| ArgumentNotProvided(token.to_string()))
    }

    /// Returns the value bound to `token`, if any.
    pub fn find(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Returns `true` if the flag was supplied.
    pub fn is_present(&self, token: &str) -> bool {
        self.values.contains_key(token)
    }

    /// Returns the bound value, falling back to the declared default.
    ///
    /// Returns `None` when the flag was not supplied and either is not
    /// declared or declares an empty default.
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmap_core::{BindingMap, DeclarationSet, FlagDeclaration};
    ///
    /// let set: DeclarationSet = [FlagDeclaration::with_value("-p").with_default("8080")]
    ///     .into_iter()
    ///     .collect();
    /// let map = BindingMap::new();
    /// assert_eq!(map.value_or_default("-p", &set), Some("8080"));
    /// assert!(!map.is_present("-p"));
    /// ```
    pub fn value_or_default<'a>(
        &'a self,
        token: &str,
        declarations: &'a DeclarationSet,
    ) -> Option<&'a str> {
        self.find(token).or_else(|| {
            declarations
                .get(token)
                .map(|decl| decl.default_value.as_str())
                .filter(|default| !default.is_empty())
        })
    }

    /// Iterates `(token, value)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates bound tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the map, returning the underlying token → value map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl From<BTreeMap<String, String>> for BindingMap {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}
