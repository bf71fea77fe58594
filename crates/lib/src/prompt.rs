//! Interactive confirmation.
//!
//! Actions that need a yes/no answer take a [`Prompt`] so the terminal
//! implementation lives in the binary and tests can script answers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
  #[error("cannot prompt for confirmation in non-interactive mode")]
  NotInteractive,

  #[error("failed to read answer: {0}")]
  Io(#[from] std::io::Error),

  #[error("prompt task failed: {0}")]
  Join(String),
}

pub trait Prompt: Send + Sync {
  /// Show `question` and return the raw line typed by the user.
  fn ask(&self, question: &str) -> Result<String, PromptError>;
}

/// Whether an answer means yes. Only `y` counts, ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
  answer.trim().eq_ignore_ascii_case("y")
}
