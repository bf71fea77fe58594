//! Subprocess execution.
//!
//! External tools run with the caller's environment in a given working
//! directory. Their stdout and stderr are attached to ours so output streams
//! to the console as it is produced.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::tools::Tool;

#[derive(Debug, Error)]
pub enum ExecError {
  #[error("failed to start {program} in {}: {source}", cwd.display())]
  Spawn {
    program: String,
    cwd: PathBuf,
    source: std::io::Error,
  },

  #[error("{program} exited with code {code:?} in {}", cwd.display())]
  Failed {
    program: String,
    cwd: PathBuf,
    code: Option<i32>,
  },
}

/// Run `tool` followed by `args` in `cwd`, streaming its output.
///
/// Resolves once the process exits. A non-zero exit status (or termination
/// by signal, reported as `code: None`) is an error.
pub async fn run_streaming(tool: &Tool, args: &[String], cwd: &Path) -> Result<(), ExecError> {
  info!(program = %tool.program, cwd = %cwd.display(), "running");
  debug!(args = ?tool.args.iter().chain(args).collect::<Vec<_>>(), "command arguments");

  let status = Command::new(&tool.program)
    .args(&tool.args)
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .await
    .map_err(|e| ExecError::Spawn {
      program: tool.program.clone(),
      cwd: cwd.to_path_buf(),
      source: e,
    })?;

  if !status.success() {
    return Err(ExecError::Failed {
      program: tool.program.clone(),
      cwd: cwd.to_path_buf(),
      code: status.code(),
    });
  }

  debug!(program = %tool.program, "process finished");
  Ok(())
}
