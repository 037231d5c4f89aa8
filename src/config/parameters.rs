use std::path::PathBuf;

use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::config::types::{CommandConfig, LogLevel};

/// HTTP Client options as they appear in a settings file or on the command line.
///
/// Every field is optional. Empty strings and empty paths count as unset, so a
/// half-filled template behaves like a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpClientParameters {
    /// Connect timeout in milliseconds.
    pub connect_timeout: Option<u32>,
    /// Directories to look up HTTP files in.
    pub directories: Option<Vec<PathBuf>>,
    pub docker_mode: Option<bool>,
    pub environment_file: Option<PathBuf>,
    pub environment_variables: Option<Vec<String>>,
    /// Name of the environment in the environment file.
    pub environment_name: Option<String>,
    pub executable: Option<String>,
    /// HTTP files.
    pub files: Option<Vec<PathBuf>>,
    pub insecure: Option<bool>,
    /// BASIC, HEADERS or VERBOSE.
    pub log_level: Option<String>,
    pub max_depth: Option<usize>,
    pub private_environment_file: Option<PathBuf>,
    pub private_environment_variables: Option<Vec<String>>,
    pub proxy: Option<String>,
    pub report: Option<bool>,
    pub report_path: Option<PathBuf>,
    /// Socket read timeout in milliseconds.
    pub socket_timeout: Option<u32>,
}

impl HttpClientParameters {
    /// Layer `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            connect_timeout: overrides.connect_timeout.or(self.connect_timeout),
            directories: overrides.directories.or(self.directories),
            docker_mode: overrides.docker_mode.or(self.docker_mode),
            environment_file: overrides.environment_file.or(self.environment_file),
            environment_variables: overrides
                .environment_variables
                .or(self.environment_variables),
            environment_name: overrides.environment_name.or(self.environment_name),
            executable: overrides.executable.or(self.executable),
            files: overrides.files.or(self.files),
            insecure: overrides.insecure.or(self.insecure),
            log_level: overrides.log_level.or(self.log_level),
            max_depth: overrides.max_depth.or(self.max_depth),
            private_environment_file: overrides
                .private_environment_file
                .or(self.private_environment_file),
            private_environment_variables: overrides
                .private_environment_variables
                .or(self.private_environment_variables),
            proxy: overrides.proxy.or(self.proxy),
            report: overrides.report.or(self.report),
            report_path: overrides.report_path.or(self.report_path),
            socket_timeout: overrides.socket_timeout.or(self.socket_timeout),
        }
    }

    /// Map onto a [`CommandConfig`], field for field.
    ///
    /// Only the log level is checked here; the command pipeline validates the rest.
    pub fn into_config(self) -> Result<CommandConfig, ConfigError> {
        let mut builder = CommandConfig::builder();

        if let Some(executable) = non_empty(self.executable) {
            builder = builder.executable(executable);
        }
        if let Some(files) = self.files {
            builder = builder.files(non_empty_paths(files));
        }
        if let Some(directories) = self.directories {
            builder = builder.directories(non_empty_paths(directories));
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }
        if let Some(millis) = self.connect_timeout {
            builder = builder.connect_timeout(millis);
        }
        if let Some(millis) = self.socket_timeout {
            builder = builder.socket_timeout(millis);
        }
        builder = builder
            .docker_mode(self.docker_mode.unwrap_or_default())
            .insecure(self.insecure.unwrap_or_default())
            .report(self.report.unwrap_or_default());
        if let Some(path) = non_empty_path(self.report_path) {
            builder = builder.report_path(path);
        }
        if let Some(level) = non_empty(self.log_level) {
            let level: LogLevel = level
                .parse()
                .map_err(|e: crate::config::ParseLogLevelError| ConfigError::ValidationError {
                    message: e.to_string(),
                })?;
            builder = builder.log_level(level);
        }
        if let Some(name) = non_empty(self.environment_name) {
            builder = builder.environment_name(name);
        }
        if let Some(path) = non_empty_path(self.environment_file) {
            builder = builder.environment_file(path);
        }
        if let Some(variables) = self.environment_variables {
            builder = builder.environment_variables(non_empty_strings(variables));
        }
        if let Some(path) = non_empty_path(self.private_environment_file) {
            builder = builder.private_environment_file(path);
        }
        if let Some(variables) = self.private_environment_variables {
            builder = builder.private_environment_variables(non_empty_strings(variables));
        }
        if let Some(proxy) = non_empty(self.proxy) {
            builder = builder.proxy(proxy);
        }

        Ok(builder.build())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

fn non_empty_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

fn non_empty_strings(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn overrides_win_field_by_field() {
        let base = HttpClientParameters {
            executable: Some("/opt/ijhttp/ijhttp".into()),
            insecure: Some(true),
            files: Some(vec!["a.http".into()]),
            ..Default::default()
        };
        let overrides = HttpClientParameters {
            files: Some(vec!["b.http".into()]),
            socket_timeout: Some(500),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.executable.as_deref(), Some("/opt/ijhttp/ijhttp"));
        assert_eq!(merged.insecure, Some(true));
        assert_eq!(merged.files, Some(vec![PathBuf::from("b.http")]));
        assert_eq!(merged.socket_timeout, Some(500));
    }

    #[test]
    fn empty_strings_are_unset() {
        let config = HttpClientParameters {
            executable: Some(String::new()),
            environment_name: Some(String::new()),
            proxy: Some(" ".into()),
            report_path: Some(PathBuf::new()),
            files: Some(vec!["a.http".into(), PathBuf::new()]),
            environment_variables: Some(vec!["id=1".into(), String::new()]),
            ..Default::default()
        }
        .into_config()
        .unwrap();

        assert_eq!(config.executable(), "ijhttp");
        assert_eq!(config.environment_name(), None);
        assert_eq!(config.proxy(), None);
        assert_eq!(config.report_path(), None);
        assert_eq!(config.files(), [PathBuf::from("a.http")]);
        assert_eq!(config.environment_variables(), ["id=1"]);
    }

    #[test]
    fn maps_every_field() {
        let config = HttpClientParameters {
            connect_timeout: Some(3000),
            directories: Some(vec!["requests".into()]),
            docker_mode: Some(true),
            environment_file: Some("http-client.env.json".into()),
            environment_variables: Some(vec!["id=1".into()]),
            environment_name: Some("dev".into()),
            executable: Some("ijhttp.sh".into()),
            files: Some(vec!["a.http".into()]),
            insecure: Some(true),
            log_level: Some("headers".into()),
            max_depth: Some(2),
            private_environment_file: Some("http-client.private.env.json".into()),
            private_environment_variables: Some(vec!["token=x".into()]),
            proxy: Some("http://proxy:3128".into()),
            report: Some(true),
            report_path: Some("reports".into()),
            socket_timeout: Some(10000),
        }
        .into_config()
        .unwrap();

        assert_eq!(config.connect_timeout(), Some(3000));
        assert_eq!(config.socket_timeout(), Some(10000));
        assert_eq!(config.directories(), [PathBuf::from("requests")]);
        assert!(config.docker_mode() && config.insecure() && config.report());
        assert_eq!(config.environment_file(), Some(Path::new("http-client.env.json")));
        assert_eq!(config.environment_name(), Some("dev"));
        assert_eq!(config.executable(), "ijhttp.sh");
        assert_eq!(config.log_level(), LogLevel::Headers);
        assert_eq!(config.max_depth(), Some(2));
        assert_eq!(
            config.private_environment_file(),
            Some(Path::new("http-client.private.env.json"))
        );
        assert_eq!(config.private_environment_variables(), ["token=x"]);
        assert_eq!(config.proxy(), Some("http://proxy:3128"));
        assert_eq!(config.report_path(), Some(Path::new("reports")));
    }

    #[test]
    fn unknown_log_level_is_a_validation_error() {
        let result = HttpClientParameters {
            log_level: Some("LOUD".into()),
            ..Default::default()
        }
        .into_config();

        match result {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("LOUD")),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }
}
