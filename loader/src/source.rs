//! Reading declaration documents from disk.
//!
//! The format is chosen by file extension: `.yaml` and `.yml` are read as
//! YAML, anything else as JSON. Both formats share the same field names and
//! the same `must_have_value` default.
//!
//! ```no_run
//! use argsmap_loader::load_declarations;
//!
//! let set = load_declarations("help.json").unwrap();
//! println!("{} flags declared", set.len());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use argsmap_core::{DeclarationSet, RawFlagDeclaration};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Format of a declaration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Picks the format from a path's extension, defaulting to JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmap_loader::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_path("flags.yml"), SourceFormat::Yaml);
    /// assert_eq!(SourceFormat::from_path("help.json"), SourceFormat::Json);
    /// assert_eq!(SourceFormat::from_path("help"), SourceFormat::Json);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parses declarations from text in the given format.
///
/// # Errors
///
/// Returns [`LoadError::Declaration`] for malformed JSON or
/// [`LoadError::Yaml`] for malformed YAML.
pub fn parse_declarations(raw: &str, format: SourceFormat) -> Result<DeclarationSet> {
    match format {
        SourceFormat::Json => Ok(DeclarationSet::load(raw)?),
        SourceFormat::Yaml => {
            let entries: BTreeMap<String, RawFlagDeclaration> = serde_yaml::from_str(raw)?;
            Ok(DeclarationSet::from_raw(entries))
        }
    }
}

/// Reads and parses a declaration file.
///
/// # Errors
///
/// Returns [`LoadError::FileUnavailable`] if the file cannot be read, or a
/// parse error as described in [`parse_declarations`].
pub fn load_declarations(path: impl AsRef<Path>) -> Result<DeclarationSet> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let format = SourceFormat::from_path(path);
    let set = parse_declarations(&raw, format)?;
    debug!(path = %path.display(), ?format, flags = set.len(), "Loaded flag declarations");
    Ok(set)
}
