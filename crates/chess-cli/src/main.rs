//! Terminal chess for two players sharing one keyboard.
//!
//! Reads commands from stdin (`e2e4`, `select e2`, `promote q`, ...) and
//! prints the board after every move.

mod command;
mod config;
mod driver;

use anyhow::Context;
use clap::Parser;
use config::CliConfig;
use driver::Driver;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play two-player chess in the terminal")]
struct Args {
    /// Path to the TOML configuration file [default: chess.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(long)]
    log_level: Option<String>,

    /// Draw pieces with Unicode chess symbols
    #[arg(long)]
    unicode: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(CliConfig::default_path);
    let mut config = CliConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if args.unicode {
        config.unicode = true;
    }

    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level)?)
        .with_writer(io::stderr)
        .init();
    tracing::info!("Config: {:?}", config_path);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut driver = Driver::new(config, stdin.lock(), stdout.lock());
    driver.run()?;
    Ok(())
}
