//! Build option resolution.
//!
//! Decides which phases run and from which directory, given the flags the
//! user passed and where the command was started.

use std::path::{Path, PathBuf};

use crate::build::patterns::is_src_dir;

/// Flags as given on the command line. `None` means not requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
  pub css: Option<bool>,
  pub js: Option<bool>,
  pub fast: Option<bool>,
  pub loader: Option<bool>,
}

impl BuildOptions {
  /// True when the user touched none of the flags.
  pub fn is_unset(&self) -> bool {
    self.css.is_none() && self.js.is_none() && self.fast.is_none() && self.loader.is_none()
  }
}

/// Effective flags after default inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
  pub css: bool,
  pub js: bool,
  pub fast: bool,
  pub loader: bool,
  /// Build every component discovered under `cwd` instead of just `cwd`.
  pub walk: bool,
  /// Directory the JavaScript phase builds from.
  pub cwd: PathBuf,
}

/// Resolve `options` for a command started in `cwd`.
///
/// Starting at the repository root or in any `src` directory means walking the
/// source tree, and the working directory becomes `src_dir`. With no flags at
/// all, a fast JavaScript build runs, plus loader metadata when building a
/// single component. The loader default compares the redirected directory, so
/// walking never implies a loader build.
pub fn resolve(options: &BuildOptions, cwd: &Path, repo_root: &Path, src_dir: &Path) -> ResolvedOptions {
  let walk = cwd == repo_root || is_src_dir(cwd);
  let cwd = if walk { src_dir.to_path_buf() } else { cwd.to_path_buf() };

  if options.is_unset() {
    let loader = cwd != src_dir;
    return ResolvedOptions {
      css: false,
      js: true,
      fast: true,
      loader,
      walk,
      cwd,
    };
  }

  ResolvedOptions {
    css: options.css.unwrap_or(false),
    js: options.js.unwrap_or(false),
    fast: options.fast.unwrap_or(false),
    loader: options.loader.unwrap_or(false),
    walk,
    cwd,
  }
}
