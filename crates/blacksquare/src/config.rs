//! Configuration file loading.
//!
//! The build is driven by a JSON file, `BlackSquareUI.json` by default:
//!
//! ```json
//! {
//!   "content": {
//!     "sourceDir": "src",
//!     "fileExtension": "tsx",
//!     "outputFile": "assets/css/index.css",
//!     "includeDirs": ["node_modules/@blacksquareui/themebuilder/dist/lib/components"]
//!   },
//!   "settings": { "unit": "rem", "matching": "exact" },
//!   "props": [
//!     { "name": "margin", "type": "range", "property": "margin",
//!       "direction": ["", "-top", "-right", "-bottom", "-left"], "val": 1 }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the
//! configuration file. The loaded [`Config`] is passed explicitly to the
//! [`Builder`](crate::Builder); nothing is cached between invocations.

use std::path::{Path, PathBuf};

use blacksquare_grammar::{PropertyDefinition, PropertyRegistry, SynthOptions};
use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "BlackSquareUI.json";

/// Where sources are read from and where the stylesheet goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    /// Root directory scanned for markup.
    pub source_dir: PathBuf,
    /// Extension of the files to scan, with or without a leading dot.
    pub file_extension: String,
    /// Output path, relative to `source_dir`.
    pub output_file: PathBuf,
    /// Additional roots scanned alongside `source_dir`.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

#[derive(Deserialize)]
struct RawConfig {
    content: ContentConfig,
    #[serde(default)]
    settings: SynthOptions,
    props: Vec<PropertyDefinition>,
}

/// A loaded and validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub content: ContentConfig,
    pub settings: SynthOptions,
    pub registry: PropertyRegistry,
}

impl Config {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if `path` does not exist
    /// - [`ConfigError::Read`] if it cannot be read
    /// - [`ConfigError::Parse`] if it is not a valid configuration
    /// - [`ConfigError::Registry`] if the design tokens are inconsistent
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&json).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.content.source_dir = base.join(&config.content.source_dir);
            for dir in &mut config.content.include_dirs {
                *dir = base.join(&*dir);
            }
        }

        tracing::debug!(
            path = %path.display(),
            props = config.registry.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parses a configuration from JSON text without touching the filesystem.
    ///
    /// Paths are kept as written.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        Ok(Self {
            content: raw.content,
            settings: raw.settings,
            registry: PropertyRegistry::new(raw.props)?,
        })
    }

    /// `{sourceDir}/{outputFile}`.
    pub fn output_path(&self) -> PathBuf {
        self.content.source_dir.join(&self.content.output_file)
    }

    /// `sourceDir` followed by every include directory.
    pub fn source_roots(&self) -> Vec<PathBuf> {
        std::iter::once(self.content.source_dir.clone())
            .chain(self.content.include_dirs.iter().cloned())
            .collect()
    }
}
