//! External tools invoked by the build.
//!
//! Both tools can be replaced through the environment:
//! - `YALLOY_SHIFTER`: JavaScript compiler (default `shifter`)
//! - `YALLOY_CSS_COMPILER`: CSS compiler (default `yogi alloy css-compile`)
//!
//! Override values are whitespace-separated command lines; the first word is
//! the program and the rest are leading arguments.

use std::fmt;

use crate::consts::{CSS_COMPILER_ENV, SHIFTER_ENV};

/// A program plus the arguments that always precede per-call arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
  pub program: String,
  pub args: Vec<String>,
}

impl Tool {
  pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
    Self {
      program: program.into(),
      args: args.iter().map(|a| a.to_string()).collect(),
    }
  }

  /// Parse a command line such as `yogi alloy css-compile`.
  ///
  /// Returns `None` for a blank line.
  pub fn parse(command_line: &str) -> Option<Self> {
    let mut words = command_line.split_whitespace();
    let program = words.next()?.to_string();
    Some(Self {
      program,
      args: words.map(str::to_string).collect(),
    })
  }
}

impl fmt::Display for Tool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  /// Compiles JavaScript components and loader metadata.
  pub compiler: Tool,
  /// Compiles the bootstrap stylesheets in place.
  pub css_compiler: Tool,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      compiler: Tool::new("shifter", &[]),
      css_compiler: Tool::new("yogi", &["alloy", "css-compile"]),
    }
  }
}

impl Toolchain {
  /// Build the toolchain from the process environment.
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build the toolchain from an arbitrary variable lookup.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();
    Self {
      compiler: lookup(SHIFTER_ENV)
        .and_then(|line| Tool::parse(&line))
        .unwrap_or(defaults.compiler),
      css_compiler: lookup(CSS_COMPILER_ENV)
        .and_then(|line| Tool::parse(&line))
        .unwrap_or(defaults.css_compiler),
    }
  }
}
