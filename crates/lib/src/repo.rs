//! Repository discovery.
//!
//! The build only runs inside an alloy checkout: a git work tree whose root
//! carries a `.alloy.json` configuration file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{AlloyConfig, ConfigError};
use crate::consts::{BUILD_DIR, CONFIG_FILE, SRC_DIR};

#[derive(Debug, Error)]
pub enum RepoError {
  #[error("not inside a git repository: {}", path.display())]
  NotAGitRepo { path: PathBuf },

  #[error("{} is not an alloy repository (missing .alloy.json)", root.display())]
  NotAlloyRepo { root: PathBuf },

  #[error("failed to canonicalize path {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Find the root of the git work tree containing `start`.
///
/// Walks up from `start` (inclusive) to the first directory holding a `.git`
/// entry. Both `.git` directories and `.git` files (worktrees, submodules)
/// count.
pub fn find_git_root(start: &Path) -> Result<PathBuf, RepoError> {
  let start = dunce::canonicalize(start).map_err(|e| RepoError::Canonicalize {
    path: start.to_path_buf(),
    source: e,
  })?;

  let root = start
    .ancestors()
    .find(|dir| dir.join(".git").exists())
    .map(Path::to_path_buf);

  root.ok_or(RepoError::NotAGitRepo { path: start })
}

/// A recognised alloy checkout.
#[derive(Debug, Clone)]
pub struct Repo {
  pub root: PathBuf,
  pub config: AlloyConfig,
}

impl Repo {
  /// Locate the repository containing `cwd` and load its configuration.
  pub fn discover(cwd: &Path) -> Result<Self, RepoError> {
    let root = find_git_root(cwd)?;
    debug!(root = %root.display(), "found git root");

    let config_path = root.join(CONFIG_FILE);
    if !config_path.is_file() {
      return Err(RepoError::NotAlloyRepo { root });
    }

    let config = AlloyConfig::load(&config_path)?;
    Ok(Self { root, config })
  }

  pub fn src_dir(&self) -> PathBuf {
    self.root.join(SRC_DIR)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join(BUILD_DIR)
  }

  /// Folder of a dependency, resolved against the repository root.
  pub fn dependency_folder(&self, name: &str) -> Result<PathBuf, ConfigError> {
    self.config.dependency_folder(name).map(|folder| self.root.join(folder))
  }
}
