//! Error types for build file generation.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that abort a generation run.
///
/// Every variant is terminal: nothing is retried and no partial output is
/// written before the error is returned.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Unknown platform, missing rule template, or an inconsistent manifest.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Manifest file could not be parsed.
    #[error("failed to parse manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Directory creation, read or write failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external build executor exited unsuccessfully.
    #[error("{program} failed with {status}")]
    ExternalTool { program: String, status: ExitStatus },
}

impl GenError {
    pub fn config(msg: impl Into<String>) -> Self {
        GenError::Configuration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code the binary should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::ExternalTool { status, .. } => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;
