//! Error taxonomy for the dependence scanner.

use std::path::PathBuf;

use thiserror::Error;

use crate::bundle::RegistryError;

/// Result alias used across the crate.
pub type DependenceResult<T> = Result<T, DependenceError>;

/// Fatal conditions that abort a `create-list` run.
///
/// Failed manifest writes are not represented here: they are reported by the
/// writer and never stop the run.
#[derive(Debug, Error)]
pub enum DependenceError {
    /// A required configuration key is missing or empty.
    #[error("{0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse {}: {reason}", .path.display())]
    ConfigParse {
        /// Path that caused the error.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A path used an `@alias` that is not defined.
    #[error("invalid path alias: {alias} (in '{path}')")]
    UnknownAlias {
        /// Alias name including the leading `@`.
        alias: String,
        /// Path being resolved.
        path: String,
    },

    /// A path referenced an environment variable that is not set.
    #[error("environment variable '{name}' is not set (in '{path}')")]
    UnsetVariable {
        /// Variable name.
        name: String,
        /// Path being resolved.
        path: String,
    },

    /// A controller or view that must be scanned does not exist.
    #[error("No such file or directory ({})", .0.display())]
    MissingFile(PathBuf),

    /// A bundle could not be resolved through the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Reading a source file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
}

impl DependenceError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
