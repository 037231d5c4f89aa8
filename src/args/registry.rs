//! Flag registry: every token passed to `ijhttp`.

/// Executable used when nothing else is configured. Resolved through `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "ijhttp";

/// File name suffixes of HTTP request files.
pub const REQUEST_EXTENSIONS: [&str; 2] = [".http", ".rest"];

/// Treat `localhost` as `host.docker.internal`.
pub const DOCKER_MODE: &str = "--docker-mode";
/// Allow insecure SSL connections.
pub const INSECURE: &str = "--insecure";
pub const LOG_LEVEL: &str = "--log-level";
pub const CONNECT_TIMEOUT: &str = "--connect-timeout";
pub const SOCKET_TIMEOUT: &str = "--socket-timeout";
/// Name of the environment inside an environment file.
pub const ENV: &str = "--env";
pub const ENV_FILE: &str = "--env-file";
pub const ENV_VARIABLES: &str = "--env-variables";
pub const PRIVATE_ENV_FILE: &str = "--private-env-file";
pub const PRIVATE_ENV_VARIABLES: &str = "--private-env-variables";
pub const PROXY: &str = "--proxy";
/// JUnit XML report, optionally followed by the report directory.
pub const REPORT: &str = "--report";
