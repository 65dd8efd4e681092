use std::io::Write;
use std::path::{Path, PathBuf};

use argsmap_core::{BindError, BinderConfig, HelpFormatter, OnFailure};
use argsmap_loader::{
    ArgsmapConfig, CommandLine, LoadError, NO_DECLARATIONS_HELP, Validation, load_declarations,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SERVER_JSON: &str = r#"{
    "-p": {
        "flag": "-p",
        "pattern": "^[0-9]+$",
        "value": "8080",
        "expect": "number",
        "usage": "listen port",
        "err": "port must be numeric"
    },
    "-d": {
        "flag": "-d",
        "value": "./public",
        "expect": "directory",
        "usage": "document root"
    },
    "-h": {
        "flag": "-h",
        "usage": "show help",
        "must_have_value": false
    }
}"#;

const SERVER_YAML: &str = r#"
"-p":
  flag: "-p"
  pattern: "^[0-9]+$"
  value: "8080"
  expect: number
  usage: listen port
  err: port must be numeric
"-d":
  flag: "-d"
  value: ./public
  expect: directory
  usage: document root
"-h":
  flag: "-h"
  usage: show help
  must_have_value: false
"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    path
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[test]
fn test_json_and_yaml_files_load_identically() {
    let dir = tempfile::tempdir().unwrap();
    let json = write_file(dir.path(), "help.json", SERVER_JSON);
    let yaml = write_file(dir.path(), "help.yaml", SERVER_YAML);

    let from_json = load_declarations(&json).unwrap();
    let from_yaml = load_declarations(&yaml).unwrap();

    assert_eq!(from_json.len(), 3);
    assert_eq!(from_json, from_yaml);
    assert!(from_json.get("-d").unwrap().requires_value);
    assert!(!from_json.get("-h").unwrap().requires_value);
}

#[test]
fn test_from_file_binds_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "help.json", SERVER_JSON);

    let cli = CommandLine::from_file(
        &path,
        &["server", "-p", "9000", "-d", "/srv/www"],
        BinderConfig::fatal(),
    )
    .unwrap();

    assert!(cli.is_validated());
    assert_eq!(cli.get_arg("-p").unwrap(), "9000");
    assert_eq!(cli.get_arg("-d").unwrap(), "/srv/www");
    assert!(cli.get_arg("-h").is_err());
    // Defaults are shown in help but never bound.
    assert_eq!(cli.bindings().len(), 2);
}

#[test]
fn test_from_file_reports_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "help.yml", SERVER_YAML);

    let err = CommandLine::from_file(
        &path,
        &["server", "-d", "/srv", "-p"],
        BinderConfig::recoverable(),
    )
    .unwrap_err();

    let LoadError::Bind {
        failure,
        declarations,
    } = err
    else {
        panic!("expected bind failure");
    };
    assert_eq!(declarations, load_declarations(&path).unwrap());
    assert_eq!(
        failure.error,
        BindError::MissingValue {
            token: "-p".to_string(),
            message: "port must be numeric".to_string(),
        }
    );
    assert_eq!(failure.partial.find("-d"), Some("/srv"));
}

#[test]
fn test_malformed_file_is_not_degraded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "help.json", "{\"-p\": ");

    let err = CommandLine::from_file_or_passthrough(
        &path,
        &["server", "-p", "1"],
        BinderConfig::fatal(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Declaration(_)));
}

// ---------------------------------------------------------------------------
// Passthrough fallback
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file_is_an_error_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let err = CommandLine::from_file(
        dir.path().join("missing.json"),
        &["server", "-p", "1"],
        BinderConfig::fatal(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::FileUnavailable { .. }));
}

#[test]
fn test_missing_file_degrades_to_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let cli = CommandLine::from_file_or_passthrough(
        dir.path().join("missing.json"),
        &["server", "--anything", "goes", "-x"],
        BinderConfig::fatal(),
    )
    .unwrap();

    assert!(!cli.is_validated());
    assert!(matches!(
        cli.validation(),
        Validation::Skipped { reason } if reason.contains("missing.json")
    ));
    assert_eq!(cli.get_arg("--anything").unwrap(), "goes");
    assert_eq!(cli.get_arg("-x").unwrap(), "");
    assert_eq!(cli.help_text(), NO_DECLARATIONS_HELP);
}

// ---------------------------------------------------------------------------
// Configuration-driven loading
// ---------------------------------------------------------------------------

#[test]
fn test_config_drives_loading_and_help() {
    let dir = tempfile::tempdir().unwrap();
    let declarations = write_file(dir.path(), "help.json", SERVER_JSON);
    let config = ArgsmapConfig {
        declarations,
        on_failure: OnFailure::Recoverable,
        narrate: true,
        help: HelpFormatter::new(2, 8),
    };
    let config_path = dir.path().join("argsmap.yml");
    config.save(&config_path).unwrap();

    let config = ArgsmapConfig::load(&config_path).unwrap();
    let cli = CommandLine::from_file(&config.declarations, &["server", "-h"], config.binder_config())
        .unwrap()
        .with_help_formatter(config.help);

    assert_eq!(cli.get_arg("-h").unwrap(), "1");
    let help = cli.help_text();
    assert!(help.contains("| -d | document root | directory | ./public "));
}
