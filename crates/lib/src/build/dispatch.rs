//! Phase planning and concurrent execution.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::build::css::{CssJob, CssLayout, CssReport, build_css};
use crate::build::options::ResolvedOptions;
use crate::build::yui::{Confirmation, YuiJob, YuiOutcome, build_yui};
use crate::build::BuildError;
use crate::config::ConfigError;
use crate::consts::{BOOTSTRAP_DEPENDENCY, LOADER_COMPONENT};
use crate::prompt::Prompt;
use crate::repo::Repo;
use crate::tools::Toolchain;

/// An independently dispatchable build action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
  Javascript,
  LoaderMetadata,
  Css,
}

impl Phase {
  /// Status line shown when the phase is queued.
  pub fn banner(self) -> &'static str {
    match self {
      Self::Javascript => "building javascript",
      Self::LoaderMetadata => "building loader metadata",
      Self::Css => "building css",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Javascript => "javascript",
      Self::LoaderMetadata => "loader",
      Self::Css => "css",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Everything a build needs to know about where it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
  /// Effective working directory (already redirected when walking).
  pub cwd: PathBuf,
  pub src_dir: PathBuf,
  pub build_dir: PathBuf,
  pub walk: bool,
  /// Release version from the repository config.
  pub version: String,
  /// Bootstrap checkout, if the config declares one.
  pub bootstrap_dir: Option<PathBuf>,
}

impl BuildContext {
  pub fn new(repo: &Repo, resolved: &ResolvedOptions) -> Self {
    Self {
      cwd: resolved.cwd.clone(),
      src_dir: repo.src_dir(),
      build_dir: repo.build_dir(),
      walk: resolved.walk,
      version: repo.config.version.clone(),
      bootstrap_dir: repo.dependency_folder(BOOTSTRAP_DEPENDENCY).ok(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseAction {
  Yui(YuiJob),
  Css(CssJob),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseJob {
  pub phase: Phase,
  pub action: PhaseAction,
}

/// Plan one job per requested phase, in javascript, loader, css order.
///
/// Fails only when css is requested and the config has no bootstrap
/// dependency.
pub fn plan(resolved: &ResolvedOptions, context: &BuildContext) -> Result<Vec<PhaseJob>, BuildError> {
  let yui_job = |src_dir: PathBuf| YuiJob {
    src_dir,
    build_dir: context.build_dir.clone(),
    version: context.version.clone(),
    walk: context.walk,
    fast: resolved.fast,
  };

  let mut jobs = Vec::new();

  if resolved.js {
    jobs.push(PhaseJob {
      phase: Phase::Javascript,
      action: PhaseAction::Yui(yui_job(context.cwd.clone())),
    });
  }

  if resolved.loader {
    jobs.push(PhaseJob {
      phase: Phase::LoaderMetadata,
      action: PhaseAction::Yui(yui_job(context.src_dir.join(LOADER_COMPONENT))),
    });
  }

  if resolved.css {
    let bootstrap_dir = context
      .bootstrap_dir
      .clone()
      .ok_or_else(|| ConfigError::MissingDependency(BOOTSTRAP_DEPENDENCY.to_string()))?;

    jobs.push(PhaseJob {
      phase: Phase::Css,
      action: PhaseAction::Css(CssJob {
        layout: CssLayout::new(&context.build_dir),
        bootstrap_dir,
      }),
    });
  }

  Ok(jobs)
}

/// A phase that did not complete.
#[derive(Debug)]
pub struct PhaseFailure {
  pub phase: Phase,
  pub error: BuildError,
}

/// Outcome of every dispatched phase, sorted by phase.
#[derive(Debug, Default)]
pub struct DispatchReport {
  pub completed: Vec<Phase>,
  /// Phases the user declined to run.
  pub skipped: Vec<Phase>,
  pub failed: Vec<PhaseFailure>,
  /// What the css phase published, when it completed.
  pub css: Option<CssReport>,
}

enum PhaseOutcome {
  Built,
  Published(CssReport),
  Skipped,
}

impl DispatchReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Run all jobs concurrently and wait for every one of them.
///
/// With a `prompt`, compiler phases ask for confirmation first. A failing
/// phase does not cancel the others; all failures are collected.
pub async fn dispatch(
  jobs: Vec<PhaseJob>,
  toolchain: Arc<Toolchain>,
  prompt: Option<Arc<dyn Prompt>>,
) -> DispatchReport {
  let mut join_set = JoinSet::new();
  let mut phases = HashMap::new();

  for job in jobs {
    let toolchain = toolchain.clone();
    let phase = job.phase;
    let confirmation = prompt.clone().map(|prompt| Confirmation {
      message: format!("Build {}", phase),
      prompt,
    });
    debug!(%phase, "spawning phase");

    let handle = join_set.spawn(async move {
      match &job.action {
        PhaseAction::Yui(yui) => build_yui(yui, &toolchain.compiler, confirmation)
          .await
          .map(|outcome| match outcome {
            YuiOutcome::Built => PhaseOutcome::Built,
            YuiOutcome::Skipped => PhaseOutcome::Skipped,
          }),
        PhaseAction::Css(css) => build_css(css, &toolchain.css_compiler)
          .await
          .map(PhaseOutcome::Published),
      }
    });
    phases.insert(handle.id(), phase);
  }

  let mut report = DispatchReport::default();

  while let Some(joined) = join_set.join_next_with_id().await {
    match joined {
      Ok((id, Ok(outcome))) => {
        if let Some(phase) = phases.get(&id) {
          match outcome {
            PhaseOutcome::Built => {
              info!(%phase, "phase complete");
              report.completed.push(*phase);
            }
            PhaseOutcome::Published(css) => {
              info!(%phase, stylesheets = css.stylesheets.len(), images = css.images_copied, "phase complete");
              report.completed.push(*phase);
              report.css = Some(css);
            }
            PhaseOutcome::Skipped => {
              info!(%phase, "phase skipped");
              report.skipped.push(*phase);
            }
          }
        }
      }
      Ok((id, Err(e))) => {
        if let Some(phase) = phases.get(&id) {
          error!(%phase, error = %e, "phase failed");
          report.failed.push(PhaseFailure { phase: *phase, error: e });
        }
      }
      Err(e) => {
        if let Some(phase) = phases.get(&e.id()) {
          error!(%phase, error = %e, "phase task panicked");
          report.failed.push(PhaseFailure {
            phase: *phase,
            error: BuildError::Task(e.to_string()),
          });
        }
      }
    }
  }

  report.completed.sort();
  report.skipped.sort();
  report.failed.sort_by_key(|f| f.phase);
  report
}
