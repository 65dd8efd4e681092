//! Declarations, bindings and help bundled for a tool's `main`.
//!
//! [`CommandLine`] is what most tools want: load the declaration file, bind
//! the process arguments against it, then query values or show help.
//!
//! ```no_run
//! use argsmap_core::BinderConfig;
//! use argsmap_loader::CommandLine;
//!
//! let args: Vec<String> = std::env::args().collect();
//! let cli = match CommandLine::from_file("help.json", &args, BinderConfig::fatal()) {
//!     Ok(cli) => cli,
//!     Err(err) => {
//!         eprintln!("error: {err}");
//!         std::process::exit(1);
//!     }
//! };
//! if cli.bindings().is_present("-h") {
//!     cli.show_help();
//! }
//! let port = cli.get_arg("-p").unwrap_or("8080");
//! ```

use std::path::Path;

use argsmap_core::{
    ArgumentNotProvided, Binder, BinderConfig, BindingMap, DeclarationSet, HelpFormatter,
    passthrough,
};
use tracing::warn;

use crate::error::{LoadError, Result};
use crate::source::{SourceFormat, load_declarations, parse_declarations};

/// Help text shown when running without declarations.
pub const NO_DECLARATIONS_HELP: &str = "No flag declarations available.\n";

/// Whether the bindings of a [`CommandLine`] were validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Every argument was checked against the declarations.
    Checked,
    /// Arguments were paired without validation.
    Skipped { reason: String },
}

/// Bound command line plus the declarations it was checked against.
#[derive(Debug, Clone)]
pub struct CommandLine {
    declarations: Option<DeclarationSet>,
    bindings: BindingMap,
    validation: Validation,
    help: HelpFormatter,
}

impl CommandLine {
    /// Binds `args` against an already loaded declaration set.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Bind`] if `args` do not satisfy the declarations.
    pub fn bind<S: AsRef<str>>(
        declarations: DeclarationSet,
        args: &[S],
        config: BinderConfig,
    ) -> Result<Self> {
        let bindings = match Binder::new(config).bind(&declarations, args) {
            Ok(bindings) => bindings,
            Err(failure) => {
                return Err(LoadError::Bind {
                    failure,
                    declarations,
                });
            }
        };
        Ok(Self {
            declarations: Some(declarations),
            bindings,
            validation: Validation::Checked,
            help: HelpFormatter::default(),
        })
    }

    /// Parses JSON declarations and binds `args` against them.
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmap_core::BinderConfig;
    /// use argsmap_loader::CommandLine;
    ///
    /// let cli = CommandLine::from_json(
    ///     r#"{"-p": {"pattern": "^[0-9]+$"}}"#,
    ///     &["prog", "-p", "8080"],
    ///     BinderConfig::fatal(),
    /// )
    /// .unwrap();
    /// assert_eq!(cli.get_arg("-p").unwrap(), "8080");
    /// assert!(cli.is_validated());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Declaration`] for malformed JSON or
    /// [`LoadError::Bind`] if binding fails.
    pub fn from_json<S: AsRef<str>>(raw: &str, args: &[S], config: BinderConfig) -> Result<Self> {
        let declarations = parse_declarations(raw, SourceFormat::Json)?;
        Self::bind(declarations, args, config)
    }

    /// Parses YAML declarations and binds `args` against them.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Yaml`] for malformed YAML or [`LoadError::Bind`]
    /// if binding fails.
    pub fn from_yaml<S: AsRef<str>>(raw: &str, args: &[S], config: BinderConfig) -> Result<Self> {
        let declarations = parse_declarations(raw, SourceFormat::Yaml)?;
        Self::bind(declarations, args, config)
    }

    /// Loads a declaration file and binds `args` against it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::FileUnavailable`] if the file cannot be read, a
    /// parse error, or [`LoadError::Bind`].
    pub fn from_file<S: AsRef<str>>(
        path: impl AsRef<Path>,
        args: &[S],
        config: BinderConfig,
    ) -> Result<Self> {
        let declarations = load_declarations(path)?;
        Self::bind(declarations, args, config)
    }

    /// Like [`from_file`](Self::from_file), but a missing or unreadable file
    /// degrades to unvalidated [`passthrough`] pairing.
    ///
    /// The result reports [`Validation::Skipped`] in that case. Parse and bind
    /// errors are still returned.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file), except for
    /// [`LoadError::FileUnavailable`].
    pub fn from_file_or_passthrough<S: AsRef<str>>(
        path: impl AsRef<Path>,
        args: &[S],
        config: BinderConfig,
    ) -> Result<Self> {
        match Self::from_file(path, args, config) {
            Err(err @ LoadError::FileUnavailable { .. }) => {
                warn!(error = %err, "No declarations available, arguments will not be validated");
                Ok(Self::unvalidated(args, err.to_string()))
            }
            other => other,
        }
    }

    /// Pairs `args` without validation, recording `reason`.
    pub fn unvalidated<S: AsRef<str>>(args: &[S], reason: impl Into<String>) -> Self {
        Self {
            declarations: None,
            bindings: passthrough(args),
            validation: Validation::Skipped {
                reason: reason.into(),
            },
            help: HelpFormatter::default(),
        }
    }

    /// Replaces the help formatter used by [`help_text`](Self::help_text).
    pub fn with_help_formatter(mut self, help: HelpFormatter) -> Self {
        self.help = help;
        self
    }

    /// Returns the value bound to `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentNotProvided`] if the flag was not supplied.
    pub fn get_arg(&self, token: &str) -> std::result::Result<&str, ArgumentNotProvided> {
        self.bindings.get(token)
    }

    pub fn bindings(&self) -> &BindingMap {
        &self.bindings
    }

    /// Declarations the bindings were checked against, if any.
    pub fn declarations(&self) -> Option<&DeclarationSet> {
        self.declarations.as_ref()
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn is_validated(&self) -> bool {
        self.validation == Validation::Checked
    }

    /// Renders the usage table, or a notice when no declarations exist.
    pub fn help_text(&self) -> String {
        match &self.declarations {
            Some(declarations) => self.help.render(declarations),
            None => NO_DECLARATIONS_HELP.to_string(),
        }
    }

    /// Prints [`help_text`](Self::help_text) to stdout.
    pub fn show_help(&self) {
        print!("{}", self.help_text());
    }
}
