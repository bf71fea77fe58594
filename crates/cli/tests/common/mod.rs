//! Shared test helpers for CLI tests.
//!
//! Fake tools come from `yalloy_lib::testutil`, which only exists on unix.

#![cfg(unix)]
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub use yalloy_lib::testutil::Invocation;
use yalloy_lib::testutil::{fake_tool_with_body, read_log};

pub const ALLOY_JSON: &str = r#"{
  "name": "alloy",
  "version": "2.0.0",
  "dependencies": {
    "twitter-bootstrap": { "folder": "deps/bootstrap" }
  }
}"#;

/// Isolated alloy checkout.
///
/// Layout:
/// - `repo/.git`, `repo/.alloy.json`
/// - `repo/src/aui-base`, `repo/src/aui-node`
/// - `repo/deps/bootstrap`
/// - `bin/` with fake `shifter` and `yogi` tools logging to `<name>.log`
pub struct TestRepo {
  pub temp: TempDir,
  pub root: PathBuf,
}

impl TestRepo {
  pub fn new() -> Self {
    Self::with_config(ALLOY_JSON)
  }

  pub fn with_config(config: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("repo");

    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("src").join("aui-base")).unwrap();
    fs::create_dir_all(root.join("src").join("aui-node")).unwrap();
    fs::create_dir_all(root.join("deps").join("bootstrap")).unwrap();
    fs::write(root.join(".alloy.json"), config).unwrap();

    let root = dunce::canonicalize(&root).unwrap();
    let repo = Self { temp, root };
    repo.fake_tool("shifter", "", 0);
    repo.fake_tool("yogi", "", 0);
    repo
  }

  /// Write a fake tool that records its calls, runs `body` and exits with `exit_code`.
  pub fn fake_tool(&self, name: &str, body: &str, exit_code: i32) -> PathBuf {
    PathBuf::from(fake_tool_with_body(self.temp.path(), name, body, exit_code).program)
  }

  /// Invocations recorded by the fake tool `name`.
  pub fn log(&self, name: &str) -> Vec<Invocation> {
    read_log(self.temp.path(), name)
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.root.join(relative)
  }

  /// A `yalloy` command started in `relative` with the fake tools configured.
  pub fn yalloy_in(&self, relative: &str) -> Command {
    let bin = self.temp.path().join("bin");
    let mut cmd: Command = cargo_bin_cmd!("yalloy");
    cmd.current_dir(self.root.join(relative));
    cmd.env("YALLOY_SHIFTER", bin.join("shifter"));
    cmd.env("YALLOY_CSS_COMPILER", format!("{} alloy css-compile", bin.join("yogi").display()));
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
