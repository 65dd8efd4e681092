//! Declaration-driven command-line argument binding.
//!
//! This crate turns a declarative description of recognized flags into a
//! validated mapping from flag token to supplied value:
//!
//! - [`DeclarationSet`]: the read-only table of [`FlagDeclaration`]s, usually
//!   loaded from JSON with [`DeclarationSet::load`].
//! - [`Binder`]: walks an argument vector once and produces a
//!   [`BindingMap`], or a [`BindFailure`] describing the first problem.
//! - [`HelpFormatter`]: renders the declarations as an aligned usage table.
//!
//! Declarations can be checked up front with [`validate_declarations`], and
//! [`passthrough`] pairs arguments without validation when no declarations
//! are available.
//!
//! # Example
//!
//! ```
//! use argsmap_core::*;
//!
//! let set = DeclarationSet::load(r#"{
//!     "-p": {"pattern": "^[0-9]+$", "usage": "listen port", "value": "8080"},
//!     "-h": {"usage": "show help", "must_have_value": false}
//! }"#).unwrap();
//! assert!(validate_declarations(&set).is_empty());
//!
//! let binder = Binder::new(BinderConfig::fatal());
//! let args = ["server", "-p", "9000", "-h"];
//! let bindings = binder.bind(&set, &args).unwrap();
//!
//! assert_eq!(bindings.get("-p").unwrap(), "9000");
//! assert!(bindings.is_present("-h"));
//! assert!(HelpFormatter::default().render(&set).contains("listen port"));
//! ```

mod binder;
mod bindings;
mod declaration;
mod error;
mod help;
mod validate;

pub use binder::{Binder, BinderConfig, OnFailure, passthrough};
pub use bindings::{BindingMap, PRESENCE_VALUE};
pub use declaration::{DeclarationSet, FlagDeclaration, RawFlagDeclaration};
pub use error::{ArgumentNotProvided, BindError, BindFailure, DeclarationError};
pub use help::{DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH, HelpFormatter};
pub use validate::{ValidationError, validate_declarations};
