//! Error types for the seekform command line.

use std::io;
use std::path::PathBuf;

use seekform::FormError;

/// Errors raised while configuring or driving a form from the terminal.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Config file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid YAML for this tool.
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Config or input named something the form model rejects.
    #[error(transparent)]
    Form(#[from] FormError),

    /// A session line or command argument could not be understood.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A `field:keyword` argument had no separator.
    #[error("Invalid clause '{0}', expected FIELD:KEYWORD")]
    InvalidClause(String),

    /// Terminal I/O failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Structured output could not be produced.
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl CliError {
    /// Create an invalid command error.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::InvalidCommand(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}
