//! Argument assembler: all CLI args in one place.

use std::path::{Path, PathBuf};

use crate::args::registry;
use crate::config::LogLevel;

/// Builder for the arguments passed to the `ijhttp` process.
///
/// The group order is fixed and the pipeline always calls the stages in the
/// order they are declared here. `ijhttp` parses some options differently
/// depending on their position, so do not sort or regroup.
#[derive(Debug, Clone)]
pub struct ArgAssembler {
    args: Vec<String>,
}

impl ArgAssembler {
    /// Start with an empty arg list.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Boolean switches.
    pub fn with_flags(mut self, docker_mode: bool, insecure: bool) -> Self {
        if docker_mode {
            self.args.push(registry::DOCKER_MODE.into());
        }
        if insecure {
            self.args.push(registry::INSECURE.into());
        }
        self
    }

    /// `--log-level`, omitted for the tool's own default.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        match level {
            LogLevel::Headers | LogLevel::Verbose => {
                self.args.push(registry::LOG_LEVEL.into());
                self.args.push(level.to_string());
            }
            LogLevel::Basic => {}
        }
        self
    }

    pub fn with_timeouts(mut self, connect: Option<u32>, socket: Option<u32>) -> Self {
        if let Some(ms) = connect {
            self.push_pair(registry::CONNECT_TIMEOUT, ms.to_string());
        }
        if let Some(ms) = socket {
            self.push_pair(registry::SOCKET_TIMEOUT, ms.to_string());
        }
        self
    }

    /// `--env <name>`; blank names are dropped.
    pub fn with_environment_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.push_pair(registry::ENV, quote_if_needed(name));
        }
        self
    }

    /// Public environment file, then one `--env-variables` pair per variable.
    pub fn with_environment(self, file: Option<&Path>, variables: &[String]) -> Self {
        self.with_environment_group(
            registry::ENV_FILE,
            registry::ENV_VARIABLES,
            file,
            variables,
        )
    }

    /// Private environment file and variables, same shape as the public ones.
    pub fn with_private_environment(self, file: Option<&Path>, variables: &[String]) -> Self {
        self.with_environment_group(
            registry::PRIVATE_ENV_FILE,
            registry::PRIVATE_ENV_VARIABLES,
            file,
            variables,
        )
    }

    pub fn with_proxy(mut self, proxy: Option<&str>) -> Self {
        if let Some(uri) = proxy {
            self.push_pair(registry::PROXY, uri.to_string());
        }
        self
    }

    /// Positional request files, in the given order.
    pub fn with_requests(mut self, requests: impl IntoIterator<Item = PathBuf>) -> Self {
        self.args
            .extend(requests.into_iter().map(|p| path_arg(&p)));
        self
    }

    /// `--report [path]`.
    ///
    /// Must stay the last stage: the HTTP Client CLI misreads the arguments that
    /// follow `--report` (IDEA-339395). Move it back among the other options once
    /// upstream fixes that.
    pub fn with_report(mut self, report: bool, path: Option<&Path>) -> Self {
        if report {
            self.args.push(registry::REPORT.into());
            if let Some(path) = path {
                self.args.push(path_arg(path));
            }
        }
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<String> {
        self.args
    }

    fn with_environment_group(
        mut self,
        file_flag: &str,
        variable_flag: &str,
        file: Option<&Path>,
        variables: &[String],
    ) -> Self {
        if let Some(file) = file {
            self.push_pair(file_flag, path_arg(file));
        }
        for variable in variables {
            self.push_pair(variable_flag, variable.clone());
        }
        self
    }

    fn push_pair(&mut self, flag: &str, value: String) {
        self.args.push(flag.to_string());
        self.args.push(value);
    }
}

impl Default for ArgAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Wrap values with whitespace in double quotes, leaving quoted ones alone.
pub(crate) fn quote_if_needed(value: &str) -> String {
    let quoted = value.len() > 1 && value.starts_with('"') && value.ends_with('"');
    if !quoted && value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
