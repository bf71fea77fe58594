//! Component builds.
//!
//! A build resolves the user's flags into [`ResolvedOptions`], plans one job
//! per requested [`Phase`] and runs the jobs concurrently:
//! - JavaScript: the compiler over the current component (or the whole tree)
//! - Loader metadata: the compiler over `src/aui-base`
//! - CSS: the bootstrap stylesheets, compiled and copied into `build/aui-css`

pub mod css;
pub mod dispatch;
mod error;
pub mod options;
pub mod patterns;
pub mod yui;

pub use css::{CssJob, CssLayout, CssReport, build_css};
pub use dispatch::{BuildContext, DispatchReport, Phase, PhaseAction, PhaseFailure, PhaseJob, dispatch, plan};
pub use error::BuildError;
pub use options::{BuildOptions, ResolvedOptions, resolve};
pub use yui::{Confirmation, YuiJob, YuiOutcome, build_yui, compiler_args};
