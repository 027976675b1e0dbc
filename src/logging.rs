//! Logging setup.
//!
//! The terminal UI owns stdout, so log lines are appended to a file in the
//! data directory instead. Default filter is `info`; override with `RUST_LOG`.

use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path};

pub(crate) fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
