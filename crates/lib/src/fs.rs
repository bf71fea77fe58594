//! Filesystem helpers used by the build actions.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum FsError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to traverse directory {}: {source}", path.display())]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

/// Create a directory and its parents. Existing directories are fine.
pub fn mkdir(path: &Path) -> Result<(), FsError> {
  fs::create_dir_all(path).map_err(|e| FsError::CreateDir {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Find files under `dir` whose path relative to `dir` matches `pattern`.
///
/// Relative paths use `/` as separator regardless of platform and are
/// returned sorted. A missing `dir` yields no matches.
pub fn find(dir: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, FsError> {
  if !dir.exists() {
    return Ok(Vec::new());
  }

  let mut matches = Vec::new();
  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry = entry.map_err(|e| FsError::WalkDir {
      path: dir.to_path_buf(),
      source: e,
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let Ok(relative) = entry.path().strip_prefix(dir) else {
      continue;
    };

    if pattern.is_match(&to_slash(relative)) {
      matches.push(relative.to_path_buf());
    }
  }

  Ok(matches)
}

/// Copy a file or a directory tree.
///
/// Directories are merged into `to`: missing directories are created and
/// existing files are overwritten. Parents of `to` are created as needed.
pub fn copy(from: &Path, to: &Path) -> Result<(), FsError> {
  let copy_err = |from: &Path, to: &Path, e: std::io::Error| FsError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source: e,
  };

  let metadata = fs::metadata(from).map_err(|e| copy_err(from, to, e))?;

  if metadata.is_file() {
    if let Some(parent) = to.parent() {
      mkdir(parent)?;
    }
    fs::copy(from, to).map_err(|e| copy_err(from, to, e))?;
    debug!(from = %from.display(), to = %to.display(), "copied file");
    return Ok(());
  }

  // Linked files and directories are copied as their targets.
  for entry in WalkDir::new(from).follow_links(true) {
    let entry = entry.map_err(|e| FsError::WalkDir {
      path: from.to_path_buf(),
      source: e,
    })?;

    let Ok(relative) = entry.path().strip_prefix(from) else {
      continue;
    };
    let target = to.join(relative);

    if entry.file_type().is_dir() {
      mkdir(&target)?;
    } else {
      fs::copy(entry.path(), &target).map_err(|e| copy_err(entry.path(), &target, e))?;
    }
  }

  debug!(from = %from.display(), to = %to.display(), "copied directory");
  Ok(())
}

/// Render a path with `/` separators for pattern matching.
pub fn to_slash(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;
  use tracing_test::traced_test;

  fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  #[test]
  fn mkdir_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("a").join("b");

    mkdir(&dir).unwrap();
    mkdir(&dir).unwrap();

    assert!(dir.is_dir());
  }

  #[test]
  fn find_returns_sorted_relative_matches() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("docs/assets/css/docs.css"), "");
    write(&temp.path().join("bootstrap-3.1.0.css"), "");
    write(&temp.path().join("bootstrap.js"), "");
    write(&temp.path().join("THEME.CSS"), "");

    let pattern = Regex::new(r"(?i)\.css$").unwrap();
    let found = find(temp.path(), &pattern).unwrap();

    assert_eq!(
      found,
      vec![
        PathBuf::from("THEME.CSS"),
        PathBuf::from("bootstrap-3.1.0.css"),
        PathBuf::from("docs/assets/css/docs.css"),
      ]
    );
  }

  #[test]
  fn find_in_missing_dir_is_empty() {
    let temp = TempDir::new().unwrap();
    let pattern = Regex::new(r"\.css$").unwrap();
    assert!(find(&temp.path().join("missing"), &pattern).unwrap().is_empty());
  }

  #[test]
  #[traced_test]
  fn copy_file_creates_parents() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("in.css");
    let to = temp.path().join("out").join("nested").join("in.css");
    write(&from, "body {}");

    copy(&from, &to).unwrap();

    assert_eq!(fs::read_to_string(&to).unwrap(), "body {}");
    assert!(logs_contain("copied file"));
  }

  #[test]
  fn copy_directory_merges_into_target() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("img");
    write(&from.join("icons.png"), "new");
    write(&from.join("sprites/white.png"), "white");

    let to = temp.path().join("out");
    write(&to.join("icons.png"), "old");
    write(&to.join("keep.png"), "keep");

    copy(&from, &to).unwrap();

    assert_eq!(fs::read_to_string(to.join("icons.png")).unwrap(), "new");
    assert_eq!(fs::read_to_string(to.join("sprites/white.png")).unwrap(), "white");
    assert_eq!(fs::read_to_string(to.join("keep.png")).unwrap(), "keep");
  }

  #[cfg(unix)]
  #[test]
  fn copy_directory_follows_symlinks() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("img");
    write(&from.join("real/glyphs.png"), "png");
    std::os::unix::fs::symlink(from.join("real"), from.join("link")).unwrap();
    std::os::unix::fs::symlink(from.join("real/glyphs.png"), from.join("alias.png")).unwrap();

    let to = temp.path().join("out");
    copy(&from, &to).unwrap();

    assert_eq!(fs::read_to_string(to.join("real/glyphs.png")).unwrap(), "png");
    assert_eq!(fs::read_to_string(to.join("link/glyphs.png")).unwrap(), "png");
    assert_eq!(fs::read_to_string(to.join("alias.png")).unwrap(), "png");
    assert!(!fs::symlink_metadata(to.join("link")).unwrap().file_type().is_symlink());
  }

  #[test]
  fn copy_missing_source_fails() {
    let temp = TempDir::new().unwrap();
    let err = copy(&temp.path().join("nope"), &temp.path().join("out")).unwrap_err();
    assert!(matches!(err, FsError::Copy { .. }));
  }
}
