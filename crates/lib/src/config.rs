//! Repository configuration (`.alloy.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("dependency not declared in config: {0}")]
  MissingDependency(String),
}

/// A dependency entry; only its checkout folder matters to the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
  pub folder: PathBuf,
}

/// Contents of `.alloy.json`. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlloyConfig {
  /// Release version substituted into built files.
  pub version: String,
  #[serde(default)]
  pub dependencies: BTreeMap<String, Dependency>,
}

impl AlloyConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })
  }

  /// Folder of a declared dependency, as written in the config.
  pub fn dependency_folder(&self, name: &str) -> Result<&Path, ConfigError> {
    self
      .dependencies
      .get(name)
      .map(|dep| dep.folder.as_path())
      .ok_or_else(|| ConfigError::MissingDependency(name.to_string()))
  }
}
