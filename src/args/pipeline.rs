//! Pipeline: ties validation, request discovery and assembly together.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::assembler::{quote_if_needed, ArgAssembler};
use crate::args::error::CommandError;
use crate::args::scan::find_request_files;
use crate::config::CommandConfig;

/// Ready-to-spawn command: executable plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    executable: String,
    arguments: Vec<String>,
}

impl CommandLine {
    pub fn new(executable: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Process builder for this command line. Nothing is spawned yet.
    pub fn to_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.executable);
        command.args(&self.arguments);
        command
    }
}

/// Shell-like rendering. Arguments with whitespace are shown quoted; the
/// spawned process still receives them unquoted.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for argument in &self.arguments {
            write!(f, " {}", quote_if_needed(argument))?;
        }
        Ok(())
    }
}

/// Check the config, reporting the first violated constraint.
pub fn validate(config: &CommandConfig) -> Result<(), CommandError> {
    if config.files().is_empty() && config.directories().is_empty() {
        return Err(CommandError::configuration("files are required"));
    }
    if config.executable().trim().is_empty() {
        return Err(CommandError::configuration("executable must not be blank"));
    }
    if config.connect_timeout() == Some(0) {
        return Err(CommandError::configuration("connect timeout must be positive"));
    }
    if config.socket_timeout() == Some(0) {
        return Err(CommandError::configuration("socket timeout must be positive"));
    }
    config
        .environment_variables()
        .iter()
        .chain(config.private_environment_variables())
        .try_for_each(|variable| validate_variable(variable))?;
    if let Some(proxy) = config.proxy() {
        validate_proxy(proxy)?;
    }
    Ok(())
}

/// Turn a config into the final command line.
///
/// Validation runs first, then request files are resolved; either failure
/// returns before any argument list exists.
pub fn build_command_line(config: CommandConfig) -> Result<CommandLine, CommandError> {
    validate(&config)?;
    let requests = resolve_requests(&config)?;

    let arguments = ArgAssembler::new()
        .with_flags(config.docker_mode(), config.insecure())
        .with_log_level(config.log_level())
        .with_timeouts(config.connect_timeout(), config.socket_timeout())
        .with_environment_name(config.environment_name())
        .with_environment(config.environment_file(), config.environment_variables())
        .with_private_environment(
            config.private_environment_file(),
            config.private_environment_variables(),
        )
        .with_proxy(config.proxy())
        .with_requests(requests)
        .with_report(config.report(), config.report_path())
        .build();

    let command_line = CommandLine::new(config.into_executable(), arguments);
    tracing::debug!(command_line = %command_line, "assembled HTTP Client command line");
    Ok(command_line)
}

/// Explicit files first, then each directory's matches, all canonicalized.
fn resolve_requests(config: &CommandConfig) -> Result<Vec<PathBuf>, CommandError> {
    let mut requests = Vec::with_capacity(config.files().len());
    for file in config.files() {
        requests.push(canonicalize(file)?);
    }
    for directory in config.directories() {
        let found = find_request_files(directory, config.max_depth())
            .map_err(|source| CommandError::io(directory, source))?;
        tracing::debug!(
            directory = %directory.display(),
            count = found.len(),
            "found request files"
        );
        for path in found {
            requests.push(canonicalize(&path)?);
        }
    }
    Ok(requests)
}

fn canonicalize(path: &Path) -> Result<PathBuf, CommandError> {
    fs::canonicalize(path).map_err(|source| CommandError::io(path, source))
}

fn validate_variable(variable: &str) -> Result<(), CommandError> {
    match variable.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => Ok(()),
        _ => Err(CommandError::configuration(format!(
            "environment variable '{variable}' must be in key=value form"
        ))),
    }
}

fn validate_proxy(proxy: &str) -> Result<(), CommandError> {
    match url::Url::parse(proxy) {
        Ok(uri) if uri.has_host() => Ok(()),
        _ => Err(CommandError::configuration(format!(
            "proxy '{proxy}' is not a valid URI, expected scheme://host:port"
        ))),
    }
}
