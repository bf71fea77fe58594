mod build;

pub use build::cmd_build;
