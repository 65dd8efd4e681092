use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use argsmap_core::{
    BindFailure, BinderConfig, BindingMap, DeclarationSet, HelpFormatter, OnFailure,
    validate_declarations,
};
use argsmap_loader::{ArgsmapConfig, CommandLine, LoadError, load_declarations};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Output format for bound values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

/// What a failed bind reports.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOnFailure {
    /// Report the bindings made before the failing token.
    Recoverable,
    /// Report no bindings.
    Fatal,
}

impl From<CliOnFailure> for OnFailure {
    fn from(value: CliOnFailure) -> Self {
        match value {
            CliOnFailure::Recoverable => OnFailure::Recoverable,
            CliOnFailure::Fatal => OnFailure::Fatal,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "argsmap")]
#[command(about = "Validate command lines against flag declaration files")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bind an argument vector against a declaration file.
    Bind(BindArgs),
    /// Print the usage table for a declaration file.
    Help(HelpArgs),
    /// Check a declaration file for unusable flags.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct BindArgs {
    /// Declaration file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long, required_unless_present = "config")]
    declarations: Option<PathBuf>,
    /// YAML configuration file providing declarations and binder options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Failure policy; overrides the config file (default: recoverable).
    #[arg(long, value_enum)]
    on_failure: Option<CliOnFailure>,
    /// Log every binding at info level.
    #[arg(long)]
    narrate: bool,
    /// Pair arguments without validation when the declaration file is missing.
    #[arg(long)]
    passthrough_on_missing: bool,
    /// Program name placed before the arguments.
    #[arg(long, default_value = "prog")]
    program: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to bind.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Declaration file.
    #[arg(long)]
    declarations: PathBuf,
    /// Minimum column width.
    #[arg(long, default_value_t = argsmap_core::DEFAULT_MIN_WIDTH)]
    min_width: usize,
    /// Maximum column width.
    #[arg(long, default_value_t = argsmap_core::DEFAULT_MAX_WIDTH)]
    max_width: usize,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Declaration file.
    #[arg(long)]
    declarations: PathBuf,
}

/// Bind options after merging the config file with command-line overrides.
struct BindPlan {
    declarations: PathBuf,
    binder_config: BinderConfig,
    help: HelpFormatter,
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Command::Bind(args) => resolve_bind(&args).and_then(|plan| {
            init_tracing(verbose, plan.binder_config.narrate);
            run_bind(args, plan)
        }),
        Command::Help(args) => {
            init_tracing(verbose, false);
            run_help(args)
        }
        Command::Validate(args) => {
            init_tracing(verbose, false);
            run_validate(args)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Narration is logged at info, so it raises the default `warn` filter.
fn init_tracing(verbose: bool, narrate: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if narrate {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn resolve_bind(args: &BindArgs) -> Result<BindPlan, String> {
    let config = match &args.config {
        Some(path) => Some(ArgsmapConfig::load(path).map_err(|e| e.to_string())?),
        None => None,
    };

    let (declarations, mut binder_config, help) = match (&args.declarations, &config) {
        (Some(path), config) => (
            path.clone(),
            config
                .as_ref()
                .map(ArgsmapConfig::binder_config)
                .unwrap_or_else(BinderConfig::recoverable),
            config.as_ref().map(|c| c.help).unwrap_or_default(),
        ),
        (None, Some(config)) => (
            config.declarations.clone(),
            config.binder_config(),
            config.help,
        ),
        (None, None) => return Err("Specify --declarations or --config".to_string()),
    };
    if let Some(on_failure) = args.on_failure {
        binder_config.on_failure = on_failure.into();
    }
    if args.narrate {
        binder_config.narrate = true;
    }

    Ok(BindPlan {
        declarations,
        binder_config,
        help,
    })
}

fn run_bind(args: BindArgs, plan: BindPlan) -> Result<(), String> {
    let BindPlan {
        declarations,
        binder_config,
        help,
    } = plan;

    let argv: Vec<&str> = std::iter::once(args.program.as_str())
        .chain(args.args.iter().map(String::as_str))
        .collect();

    let result = if args.passthrough_on_missing {
        CommandLine::from_file_or_passthrough(&declarations, &argv, binder_config)
    } else {
        CommandLine::from_file(&declarations, &argv, binder_config)
    };

    match result {
        Ok(cli) => {
            if !cli.is_validated() {
                eprintln!("warning: arguments were not validated");
            }
            println!("{}", format_bindings(cli.bindings(), args.format)?);
            Ok(())
        }
        Err(LoadError::Bind {
            failure,
            declarations,
        }) => {
            report_bind_failure(&declarations, &failure, help, args.format)?;
            Err(failure.error.to_string())
        }
        Err(err) => Err(err.to_string()),
    }
}

fn report_bind_failure(
    declarations: &DeclarationSet,
    failure: &BindFailure,
    help: HelpFormatter,
    format: CliOutputFormat,
) -> Result<(), String> {
    if !failure.partial.is_empty() {
        eprintln!("Partial bindings:");
        eprintln!("{}", format_bindings(&failure.partial, format)?);
    }
    eprint!("{}", help.render(declarations));
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    if args.min_width > args.max_width {
        return Err("--min-width must not exceed --max-width".to_string());
    }
    let set = load_set(&args.declarations)?;
    HelpFormatter::new(args.min_width, args.max_width).print(&set);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let set = load_set(&args.declarations)?;
    let errors = validate_declarations(&set);
    if errors.is_empty() {
        println!(
            "Validated {} flag declaration(s) in '{}'.",
            set.len(),
            args.declarations.display()
        );
        return Ok(());
    }

    for error in &errors {
        eprintln!("  {error}");
    }
    Err(format!(
        "{} invalid flag declaration(s) in '{}'",
        errors.len(),
        args.declarations.display()
    ))
}

fn load_set(path: &Path) -> Result<DeclarationSet, String> {
    load_declarations(path).map_err(|e| e.to_string())
}

fn format_bindings(bindings: &BindingMap, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(bindings)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(bindings).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
