//! CSS build.
//!
//! Compiles the bootstrap dependency in place, then publishes its stylesheets
//! (with version suffixes dropped) and images under `build/aui-css`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::build::BuildError;
use crate::build::patterns::{CSS_EXTENSION, strip_version};
use crate::consts::CSS_OUTPUT_DIR;
use crate::exec::run_streaming;
use crate::fs::{copy, find, mkdir, to_slash};
use crate::tools::Tool;

/// Output directories of the CSS build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssLayout {
  pub root: PathBuf,
  pub css_dir: PathBuf,
  pub img_dir: PathBuf,
}

impl CssLayout {
  pub fn new(build_dir: &Path) -> Self {
    let root = build_dir.join(CSS_OUTPUT_DIR);
    Self {
      css_dir: root.join("css"),
      img_dir: root.join("img"),
      root,
    }
  }

  /// Create all output directories.
  pub fn create(&self) -> Result<(), BuildError> {
    mkdir(&self.root)?;
    mkdir(&self.css_dir)?;
    mkdir(&self.img_dir)?;
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssJob {
  pub layout: CssLayout,
  /// Checkout of the bootstrap dependency.
  pub bootstrap_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssReport {
  /// Published stylesheets, relative to the css output directory.
  pub stylesheets: Vec<PathBuf>,
  pub images_copied: bool,
}

/// Run the CSS build for `job`.
pub async fn build_css(job: &CssJob, css_compiler: &Tool) -> Result<CssReport, BuildError> {
  job.layout.create()?;

  run_streaming(css_compiler, &[], &job.bootstrap_dir).await?;

  let job = job.clone();
  tokio::task::spawn_blocking(move || publish(&job))
    .await
    .map_err(|e| BuildError::Task(e.to_string()))?
}

/// Copy compiled stylesheets and images into the output layout.
fn publish(job: &CssJob) -> Result<CssReport, BuildError> {
  let mut report = CssReport::default();

  for stylesheet in find(&job.bootstrap_dir, &CSS_EXTENSION)? {
    let versionless = PathBuf::from(strip_version(&to_slash(&stylesheet)));
    copy(&job.bootstrap_dir.join(&stylesheet), &job.layout.css_dir.join(&versionless))?;
    report.stylesheets.push(versionless);
  }

  info!(count = report.stylesheets.len(), "copied stylesheets");

  let images = job.bootstrap_dir.join("img");
  if images.is_dir() {
    info!("copying images...");
    copy(&images, &job.layout.img_dir)?;
    report.images_copied = true;
  } else {
    warn!(path = %images.display(), "no images to copy");
  }

  Ok(report)
}
