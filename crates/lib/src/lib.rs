//! yalloy-lib: Core logic for yalloy
//!
//! This crate provides everything the `yalloy` binary does besides argument
//! parsing and terminal output:
//! - `repo`: locating the repository root and recognising an alloy checkout
//! - `config`: the `.alloy.json` repository configuration
//! - `build`: resolving build options into phases and running them
//! - `exec`, `fs`, `prompt`: process, filesystem and confirmation plumbing

pub mod build;
pub mod config;
pub mod consts;
pub mod exec;
pub mod fs;
pub mod prompt;
pub mod repo;
pub mod tools;

#[cfg(all(unix, any(test, feature = "testutil")))]
pub mod testutil;
