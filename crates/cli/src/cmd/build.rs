//! Implementation of the `yalloy build` command.
//!
//! Builds the component the command is started in, or every component when
//! started at the repository root or in a `src` directory.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::debug;

use yalloy_lib::build::{BuildContext, BuildOptions, dispatch, plan, resolve};
use yalloy_lib::prompt::Prompt;
use yalloy_lib::repo::Repo;
use yalloy_lib::tools::Toolchain;

use crate::output::{format_duration, print_error, print_info, print_success, print_warning};
use crate::prompts::TerminalPrompt;

/// Execute the build command.
///
/// - Locates the alloy repository containing the current directory
/// - Resolves the flags into phases (see [`resolve`])
/// - Runs every phase concurrently and waits for all of them
///
/// # Errors
///
/// Returns an error outside an alloy repository, when the configuration
/// cannot be used, or when any phase fails.
pub fn cmd_build(options: BuildOptions, interactive: bool) -> Result<()> {
  let cwd = std::env::current_dir().context("Failed to read current directory")?;
  let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);

  let repo = Repo::discover(&cwd).context("Failed to locate an alloy repository")?;
  let resolved = resolve(&options, &cwd, &repo.root, &repo.src_dir());
  let context = BuildContext::new(&repo, &resolved);
  debug!(?resolved, "resolved build options");

  let jobs = plan(&resolved, &context).context("Failed to plan build")?;

  if jobs.is_empty() {
    debug!("no phase requested");
  }

  for job in &jobs {
    print_success(job.phase.banner());
  }
  if resolved.fast {
    print_success("building them fast...");
  }

  let toolchain = Arc::new(Toolchain::from_env());
  debug!(compiler = %toolchain.compiler, css_compiler = %toolchain.css_compiler, "toolchain");
  let prompt: Option<Arc<dyn Prompt>> = interactive.then(|| Arc::new(TerminalPrompt::default()) as Arc<dyn Prompt>);

  let started = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(dispatch(jobs, toolchain, prompt));

  for phase in &report.skipped {
    print_warning(&format!("skipped {}", phase));
  }

  if !report.is_success() {
    for failure in &report.failed {
      print_error(&format!("{} failed: {}", failure.phase, failure.error));
    }
    bail!("{} phase(s) failed", report.failed.len());
  }

  if let Some(css) = &report.css {
    print_info(&format!("published {} stylesheet(s)", css.stylesheets.len()));
  }

  debug!(elapsed = %format_duration(started.elapsed()), "build finished");
  print_success("done.");

  Ok(())
}
