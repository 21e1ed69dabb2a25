//! staged-config: merge staged YAML configuration trees
//!
//! Reads a configuration directory layered by deployment stage and prints the
//! merged document for the selected stage as YAML on stdout.

use anyhow::Result;

fn main() -> Result<()> {
    staged_config::cli::run()
}
