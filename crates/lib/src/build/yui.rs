//! JavaScript and loader-metadata builds.
//!
//! Both run the JavaScript compiler; they differ only in the directory the
//! compiler starts from.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::build::BuildError;
use crate::exec::run_streaming;
use crate::fs::mkdir;
use crate::prompt::{Prompt, PromptError, is_affirmative};
use crate::tools::Tool;

/// One compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YuiJob {
  /// Directory the compiler runs from.
  pub src_dir: PathBuf,
  pub build_dir: PathBuf,
  /// Version substituted into the built files.
  pub version: String,
  pub walk: bool,
  pub fast: bool,
}

/// Ask before building.
#[derive(Clone)]
pub struct Confirmation {
  pub message: String,
  pub prompt: Arc<dyn Prompt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YuiOutcome {
  Built,
  /// The user declined the confirmation.
  Skipped,
}

/// Arguments passed to the compiler for `job`.
pub fn compiler_args(job: &YuiJob) -> Vec<String> {
  let mut args = vec![
    "--build-dir".to_string(),
    job.build_dir.to_string_lossy().into_owned(),
    format!("--replace-version={}", job.version),
  ];

  if job.fast {
    args.push("--no-lint".to_string());
    args.push("--no-coverage".to_string());
    args.push("--cache".to_string());
  }

  if job.walk {
    args.push("--walk".to_string());
  }

  args
}

/// Run the compiler for `job`, optionally asking first.
///
/// A declined confirmation returns [`YuiOutcome::Skipped`] without touching
/// the filesystem.
pub async fn build_yui(
  job: &YuiJob,
  compiler: &Tool,
  confirmation: Option<Confirmation>,
) -> Result<YuiOutcome, BuildError> {
  if let Some(confirmation) = confirmation {
    let question = format!("{} [{}]? [y/N] ", confirmation.message, job.build_dir.display());
    let prompt = confirmation.prompt;

    // Reading the answer blocks on stdin.
    let answer = tokio::task::spawn_blocking(move || prompt.ask(&question))
      .await
      .map_err(|e| PromptError::Join(e.to_string()))??;

    if !is_affirmative(&answer) {
      debug!(src_dir = %job.src_dir.display(), "build declined");
      return Ok(YuiOutcome::Skipped);
    }
  }

  mkdir(&job.build_dir)?;

  info!(src_dir = %job.src_dir.display(), walk = job.walk, fast = job.fast, "compiling");
  run_streaming(compiler, &compiler_args(job), &job.src_dir).await?;

  Ok(YuiOutcome::Built)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn job(fast: bool, walk: bool) -> YuiJob {
    YuiJob {
      src_dir: PathBuf::from("/repo/src/aui-node"),
      build_dir: PathBuf::from("/repo/build"),
      version: "2.0.0".to_string(),
      walk,
      fast,
    }
  }

  #[test]
  fn base_args_always_present() {
    assert_eq!(
      compiler_args(&job(false, false)),
      vec!["--build-dir", "/repo/build", "--replace-version=2.0.0"]
    );
  }

  #[test]
  fn fast_mode_skips_lint_and_coverage() {
    assert_eq!(
      compiler_args(&job(true, false)),
      vec![
        "--build-dir",
        "/repo/build",
        "--replace-version=2.0.0",
        "--no-lint",
        "--no-coverage",
        "--cache"
      ]
    );
  }

  #[test]
  fn walk_comes_last() {
    let args = compiler_args(&job(true, true));
    assert_eq!(args.len(), 7);
    assert_eq!(args.last().map(String::as_str), Some("--walk"));
  }

  #[cfg(unix)]
  mod unix {
    use super::*;
    use crate::testutil::{ScriptedPrompt, fake_tool, read_log};
    use tempfile::TempDir;

    fn temp_job(temp: &TempDir) -> YuiJob {
      let src_dir = temp.path().join("src").join("aui-node");
      std::fs::create_dir_all(&src_dir).unwrap();
      YuiJob {
        src_dir,
        build_dir: temp.path().join("build"),
        version: "2.0.0".to_string(),
        walk: false,
        fast: true,
      }
    }

    #[tokio::test]
    async fn builds_without_confirmation() {
      let temp = TempDir::new().unwrap();
      let compiler = fake_tool(temp.path(), "shifter", 0);
      let job = temp_job(&temp);

      let outcome = build_yui(&job, &compiler, None).await.unwrap();

      assert_eq!(outcome, YuiOutcome::Built);
      assert!(job.build_dir.is_dir());
      let log = read_log(temp.path(), "shifter");
      assert_eq!(log.len(), 1);
      assert_eq!(log[0].cwd, dunce::canonicalize(&job.src_dir).unwrap());
      assert_eq!(log[0].args, compiler_args(&job));
    }

    #[tokio::test]
    async fn declined_confirmation_skips_everything() {
      let temp = TempDir::new().unwrap();
      let compiler = fake_tool(temp.path(), "shifter", 0);
      let job = temp_job(&temp);
      let prompt = ScriptedPrompt::new("n\n");

      let confirmation = Confirmation {
        message: "Build aui-node".to_string(),
        prompt: prompt.clone(),
      };
      let outcome = build_yui(&job, &compiler, Some(confirmation)).await.unwrap();

      assert_eq!(outcome, YuiOutcome::Skipped);
      assert!(!job.build_dir.exists());
      assert!(read_log(temp.path(), "shifter").is_empty());
      assert_eq!(
        prompt.questions().as_slice(),
        [format!("Build aui-node [{}]? [y/N] ", job.build_dir.display())]
      );
    }

    #[tokio::test]
    async fn accepted_confirmation_builds() {
      let temp = TempDir::new().unwrap();
      let compiler = fake_tool(temp.path(), "shifter", 0);
      let job = temp_job(&temp);

      let confirmation = Confirmation {
        message: "Build aui-node".to_string(),
        prompt: ScriptedPrompt::new(" Y \n"),
      };
      let outcome = build_yui(&job, &compiler, Some(confirmation)).await.unwrap();

      assert_eq!(outcome, YuiOutcome::Built);
      assert_eq!(read_log(temp.path(), "shifter").len(), 1);
    }

    #[tokio::test]
    async fn compiler_failure_propagates() {
      let temp = TempDir::new().unwrap();
      let compiler = fake_tool(temp.path(), "shifter", 1);
      let job = temp_job(&temp);

      let err = build_yui(&job, &compiler, None).await.unwrap_err();
      assert!(matches!(err, BuildError::Exec(_)));
    }
  }
}
