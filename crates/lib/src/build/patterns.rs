//! Path and filename patterns.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::fs::to_slash;

/// A directory named `src`, with or without a trailing slash.
static SRC_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)/src/?$").unwrap());

pub static CSS_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.css$").unwrap());

/// A `-MAJOR.MINOR.PATCH` suffix with single-digit components.
static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-[0-9]\.[0-9]\.[0-9]").unwrap());

pub fn is_src_dir(path: &Path) -> bool {
  SRC_DIR.is_match(&to_slash(path))
}

/// Remove the first version segment from a file name or relative path.
pub fn strip_version(name: &str) -> String {
  VERSION_SUFFIX.replace(name, "").into_owned()
}
