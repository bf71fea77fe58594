use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use yalloy_lib::prompt::{Prompt, PromptError};

/// Asks on stderr and reads the answer from stdin.
///
/// Concurrent phases share one terminal, so each question and its answer are
/// handled under a lock.
#[derive(Default)]
pub struct TerminalPrompt {
  lock: Mutex<()>,
}

impl Prompt for TerminalPrompt {
  fn ask(&self, question: &str) -> Result<String, PromptError> {
    let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
      return Err(PromptError::NotInteractive);
    }

    write!(io::stderr(), "{}", question)?;
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input)
  }
}
