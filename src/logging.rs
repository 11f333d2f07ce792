//! Tracing subscriber setup
//!
//! File-based logging with environment-based filtering (RUST_LOG). The
//! host process calls this once at activation; everything in the crate
//! logs through `tracing` macros.

use anyhow::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber writing to the given log file.
///
/// Defaults to INFO when RUST_LOG is unset. Fails if a global subscriber
/// is already installed.
pub fn init(log_file_path: &Path) -> Result<()> {
    let log_file = File::create(log_file_path)?;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
