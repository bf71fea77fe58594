use thiserror::Error;

use crate::config::ConfigError;
use crate::exec::ExecError;
use crate::fs::FsError;
use crate::prompt::PromptError;

/// Errors that can occur while running a build phase.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Fs(#[from] FsError),

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error(transparent)]
  Prompt(#[from] PromptError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A phase task panicked or was cancelled.
  #[error("build task failed: {0}")]
  Task(String),
}
