use crate::encoding::TextEncoding;
use crate::error::{Result, SgError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration of one filesystem store. Fixed once the store is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base directory; each type namespace is a subdirectory of it.
    pub root: PathBuf,
    /// Encoding used for every file read and write.
    pub encoding: TextEncoding,
    /// Filename suffix appended to every encoded key, e.g. `.json`.
    pub extension: String,
}

/// Caller-supplied settings, merged field by field over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreOverrides {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub encoding: Option<TextEncoding>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            encoding: TextEncoding::Utf8,
            extension: ".json".into(),
        }
    }
}

impl StoreConfig {
    /// Defaults with every provided override applied.
    pub fn merged(overrides: StoreOverrides) -> Self {
        let defaults = Self::default();
        Self {
            root: overrides.root.unwrap_or(defaults.root),
            encoding: overrides.encoding.unwrap_or(defaults.encoding),
            extension: overrides.extension.unwrap_or(defaults.extension),
        }
    }

    /// Defaults rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::merged(StoreOverrides {
            root: Some(root.into()),
            ..Default::default()
        })
    }

    /// Parse a JSON overrides document and merge it over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: StoreOverrides = serde_json::from_str(text)?;
        Ok(Self::merged(overrides))
    }

    /// Load a JSON overrides document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SgError::io("read", path, e))?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            root = %config.root.display(),
            "loaded store config"
        );
        Ok(config)
    }

    /// The extension ends up inside a single filename, so it must be
    /// non-empty and free of path separators.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(SgError::Config("extension must not be empty".into()));
        }
        if self.extension.contains('/') || self.extension.contains('\\') {
            return Err(SgError::Config(format!(
                "extension must not contain a path separator: {}",
                self.extension
            )));
        }
        Ok(())
    }
}
