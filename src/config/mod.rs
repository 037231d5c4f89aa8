//! Configuration: the immutable [`CommandConfig`], the flat
//! [`HttpClientParameters`] it is populated from, and the TOML settings file.

mod loader;
mod parameters;
mod types;

pub use loader::{ConfigError, RunSettings};
pub use parameters::HttpClientParameters;
pub use types::{CommandConfig, CommandConfigBuilder, LogLevel, ParseLogLevelError};
