//! Test utilities for yalloy-lib, also exported to other crates through the
//! `testutil` feature.
//!
//! Fake external tools are `/bin/sh` scripts that append one line per
//! invocation to `<dir>/<name>.log`: the physical working directory followed
//! by each argument, tab separated.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::prompt::{Prompt, PromptError};
use crate::tools::Tool;

/// One recorded invocation of a fake tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub cwd: PathBuf,
  pub args: Vec<String>,
}

/// Write a fake tool into `dir/bin` that records its calls and exits with `exit_code`.
pub fn fake_tool(dir: &Path, name: &str, exit_code: i32) -> Tool {
  fake_tool_with_body(dir, name, "", exit_code)
}

/// Like [`fake_tool`], running `body` (shell code) before exiting.
pub fn fake_tool_with_body(dir: &Path, name: &str, body: &str, exit_code: i32) -> Tool {
  let bin = dir.join("bin");
  fs::create_dir_all(&bin).unwrap();

  let log = dir.join(format!("{}.log", name));
  // One write per line so concurrent invocations don't interleave.
  let script = format!(
    "#!/bin/sh\n\
     line=\"$(pwd -P)\"\n\
     tab=\"$(printf '\\t')\"\n\
     for a in \"$@\"; do line=\"$line$tab$a\"; done\n\
     printf '%s\\n' \"$line\" >> '{}'\n\
     {}\n\
     exit {}\n",
    log.display(),
    body,
    exit_code
  );

  let path = bin.join(name);
  fs::write(&path, script).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

  Tool::new(path.to_string_lossy(), &[])
}

/// Read the invocations recorded by the fake tool `name` in `dir`.
pub fn read_log(dir: &Path, name: &str) -> Vec<Invocation> {
  let Ok(content) = fs::read_to_string(dir.join(format!("{}.log", name))) else {
    return Vec::new();
  };

  content
    .lines()
    .map(|line| {
      let mut fields = line.split('\t');
      let cwd = PathBuf::from(fields.next().unwrap_or_default());
      Invocation {
        cwd,
        args: fields.map(str::to_string).collect(),
      }
    })
    .collect()
}

/// Answers every question with a fixed line and remembers the questions.
pub struct ScriptedPrompt {
  answer: String,
  asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
  pub fn new(answer: &str) -> Arc<Self> {
    Arc::new(Self {
      answer: answer.to_string(),
      asked: Mutex::new(Vec::new()),
    })
  }

  pub fn questions(&self) -> Vec<String> {
    self.asked.lock().unwrap().clone()
  }
}

impl Prompt for ScriptedPrompt {
  fn ask(&self, question: &str) -> Result<String, PromptError> {
    self.asked.lock().unwrap().push(question.to_string());
    Ok(self.answer.clone())
  }
}
