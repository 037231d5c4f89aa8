use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a config into a command line.
///
/// Both kinds surface before any process is spawned.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("failed to resolve {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
