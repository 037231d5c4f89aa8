use std::fs;
use std::path::{Path, PathBuf};

use ijhttp_tools::config::{ConfigError, HttpClientParameters, LogLevel, RunSettings};
use tempfile::TempDir;

fn write_settings(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("ijhttp.toml");
    fs::write(&path, content).expect("Failed to write settings");
    (temp_dir, path)
}

#[test]
fn loads_parameters_and_runner_tables() {
    let (_dir, path) = write_settings(
        r#"
[parameters]
files = ["orders.http", "products.http"]
directories = ["requests"]
log_level = "HEADERS"
environment_name = "dev"
environment_variables = ["id=1", "field=name"]
connect_timeout = 3000
insecure = true
report = true
report_path = "target/reports"

[runner]
timeout = 60000
working_directory = "target"
use_logger = true
quiet_logs = true
"#,
    );

    let settings = RunSettings::load_from(&path).unwrap();

    assert_eq!(settings.runner.timeout, Some(60000));
    assert_eq!(settings.runner.working_directory, Some(PathBuf::from("target")));
    assert!(settings.runner.use_logger && settings.runner.quiet_logs);
    assert!(!settings.runner.skip);

    let config = settings.parameters.into_config().unwrap();
    assert_eq!(
        config.files(),
        [PathBuf::from("orders.http"), PathBuf::from("products.http")]
    );
    assert_eq!(config.directories(), [PathBuf::from("requests")]);
    assert_eq!(config.log_level(), LogLevel::Headers);
    assert_eq!(config.environment_name(), Some("dev"));
    assert_eq!(config.environment_variables(), ["id=1", "field=name"]);
    assert_eq!(config.connect_timeout(), Some(3000));
    assert!(config.insecure() && config.report());
    assert_eq!(config.report_path(), Some(Path::new("target/reports")));
}

#[test]
fn empty_file_gives_defaults() {
    let (_dir, path) = write_settings("");

    let settings = RunSettings::load_from(&path).unwrap();

    assert_eq!(settings.parameters, HttpClientParameters::default());
    assert_eq!(settings.runner, Default::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let (_dir, path) = write_settings("[parameters]\nfile = [\"typo.http\"]\n");

    match RunSettings::load_from(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn explicit_missing_file_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let result = RunSettings::load(Some(missing.as_path()));

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn default_paths_start_in_current_directory() {
    let paths = RunSettings::default_paths();
    assert_eq!(paths[0], PathBuf::from("ijhttp.toml"));
}

#[test]
fn command_line_overrides_settings_file() {
    let (_dir, path) = write_settings(
        r#"
[parameters]
executable = "/opt/ijhttp/ijhttp"
files = ["a.http"]
socket_timeout = 10000
"#,
    );
    let settings = RunSettings::load_from(&path).unwrap();
    let overrides = HttpClientParameters {
        files: Some(vec!["b.http".into()]),
        log_level: Some("verbose".into()),
        ..Default::default()
    };

    let config = settings.parameters.merge(overrides).into_config().unwrap();

    assert_eq!(config.executable(), "/opt/ijhttp/ijhttp");
    assert_eq!(config.files(), [PathBuf::from("b.http")]);
    assert_eq!(config.socket_timeout(), Some(10000));
    assert_eq!(config.log_level(), LogLevel::Verbose);
}
