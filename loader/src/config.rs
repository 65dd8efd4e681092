//! Tool configuration for the `argsmap` binary and embedding programs.
//!
//! Defines the YAML-serializable settings that pick the declaration file,
//! the failure policy, narration and help table widths.
//!
//! # Example YAML
//!
//! ```yaml
//! declarations: help.json
//! on_failure: fatal
//! narrate: false
//! help:
//!   min_width: 7
//!   max_width: 100
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use argsmap_core::{BinderConfig, HelpFormatter, OnFailure};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level argsmap configuration.
///
/// `on_failure` has no default: a configuration must say whether partial
/// bindings survive a failure.
///
/// # Examples
///
/// ```
/// use argsmap_core::OnFailure;
/// use argsmap_loader::ArgsmapConfig;
///
/// let config: ArgsmapConfig = serde_yaml::from_str(
///     "declarations: help.json\non_failure: recoverable\n",
/// )
/// .unwrap();
/// assert_eq!(config.on_failure, OnFailure::Recoverable);
/// assert!(!config.narrate);
/// assert_eq!(config.help.min_width, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgsmapConfig {
    /// Path of the declaration file.
    pub declarations: PathBuf,
    /// What a failed bind keeps.
    pub on_failure: OnFailure,
    /// Report bindings at `info` level.
    #[serde(default)]
    pub narrate: bool,
    /// Help table column widths.
    #[serde(default)]
    pub help: HelpFormatter,
}

impl ArgsmapConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`FileUnavailable`](crate::LoadError::FileUnavailable) if the
    /// file cannot be read, or [`Yaml`](crate::LoadError::Yaml) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| {
            crate::LoadError::FileUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FileUnavailable`](crate::LoadError::FileUnavailable) if the
    /// file cannot be created, or [`Yaml`](crate::LoadError::Yaml) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| {
            crate::LoadError::FileUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Binder options described by this configuration.
    pub fn binder_config(&self) -> BinderConfig {
        BinderConfig::new(self.on_failure).with_narration(self.narrate)
    }
}
