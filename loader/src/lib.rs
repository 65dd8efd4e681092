//! Declaration loading and command-line facade for argsmap.
//!
//! This crate reads flag declarations from JSON or YAML files and wraps the
//! bind pass from [`argsmap_core`] in a [`CommandLine`] that tools can query
//! directly.
//!
//! # Quick start
//!
//! ```no_run
//! use argsmap_core::BinderConfig;
//! use argsmap_loader::{ArgsmapConfig, CommandLine};
//!
//! // Load declarations and bind the process arguments
//! let args: Vec<String> = std::env::args().collect();
//! let cli = CommandLine::from_file("help.json", &args, BinderConfig::fatal()).unwrap();
//! println!("port = {}", cli.get_arg("-p").unwrap_or("8080"));
//!
//! // Or drive everything from a YAML configuration file
//! let config = ArgsmapConfig::load("argsmap.yml").unwrap();
//! let cli = CommandLine::from_file_or_passthrough(
//!     &config.declarations,
//!     &args,
//!     config.binder_config(),
//! )
//! .unwrap()
//! .with_help_formatter(config.help);
//! if !cli.is_validated() {
//!     eprintln!("warning: arguments were not validated");
//! }
//! ```

mod command_line;
mod config;
mod error;
mod source;

pub use command_line::{CommandLine, NO_DECLARATIONS_HELP, Validation};
pub use config::ArgsmapConfig;
pub use error::{LoadError, Result};
pub use source::{SourceFormat, load_declarations, parse_declarations};
