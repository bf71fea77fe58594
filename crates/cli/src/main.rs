mod cmd;
mod output;
mod prompts;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yalloy_lib::build::BuildOptions;

/// yalloy - AlloyUI component build orchestrator
#[derive(Parser)]
#[command(name = "yalloy")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  #[command(about = "Build current folder component or walk dirs trying to build all found components.")]
  Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
  /// Build the bootstrap stylesheets into build/aui-css
  #[arg(short, long)]
  css: bool,

  /// Skip lint and coverage, and enable the compiler cache
  #[arg(short, long)]
  fast: bool,

  /// Build javascript components
  #[arg(short, long)]
  js: bool,

  /// Rebuild loader metadata (aui-base)
  #[arg(short, long)]
  loader: bool,

  /// Ask before each compiler run
  #[arg(short, long)]
  interactive: bool,
}

impl BuildArgs {
  /// Flags not given on the command line stay unset.
  fn options(&self) -> BuildOptions {
    BuildOptions {
      css: self.css.then_some(true),
      js: self.js.then_some(true),
      fast: self.fast.then_some(true),
      loader: self.loader.then_some(true),
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(format!("yalloy={0},yalloy_lib={0}", default_level)));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  match cli.command {
    Commands::Build(args) => cmd::cmd_build(args.options(), args.interactive),
  }
}
