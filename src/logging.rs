//! Logger setup.
//!
//! The terminal belongs to the game while it runs, so log records go to a file
//! when one is given. Without a file only errors reach stderr.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::Path;

/// Install the global logger. `RUST_LOG` overrides the default level.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "error" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to install logger")?;
    Ok(())
}
