//! Error types for configuration, source collection and output.

use std::io;
use std::path::PathBuf;

use blacksquare_grammar::RegistryError;

/// Errors that can occur while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON or has the wrong shape.
    #[error("Failed to parse configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The `props` section could not be turned into a registry.
    #[error("Invalid design tokens: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors that can occur while reading source files.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A directory inside the source tree could not be listed.
    #[error("Failed to list {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while producing the stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source collection failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The stylesheet could not be written.
    #[error("Failed to write stylesheet {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
