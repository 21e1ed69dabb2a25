//! Command-line interface for staged-config
//!
//! Resolves the active stage, reads the configuration tree, and prints the
//! merged YAML document on stdout.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::log::TracingLogger;
use crate::reader::{read, ReadOptions, DEFAULT_CONFIG_PATH};
use crate::stage::{EnvStage, FixedStage, Stage};

/// Stage-layered YAML configuration reader with deterministic deep merging
#[derive(Parser)]
#[command(name = "staged-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Stage to resolve; falls back to the STAGE environment variable, then "dev"
    #[arg(short, long)]
    stage: Option<String>,

    /// Configuration root directory
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: PathBuf,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls
    // back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let stage: Box<dyn Stage> = match cli.stage {
        Some(name) => Box::new(FixedStage::new(name)),
        None => Box::new(EnvStage::from_env("dev")),
    };

    let opts = ReadOptions::new().config_path(&cli.config_path).logger(Arc::new(TracingLogger));

    let bytes = read(stage.as_ref(), opts)
        .with_context(|| format!("reading configuration from {}", cli.config_path.display()))?;

    std::io::stdout().write_all(&bytes).context("writing merged configuration")?;

    Ok(())
}
