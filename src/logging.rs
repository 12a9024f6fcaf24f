use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Send log records to `quill.log` in `user_dir`.
///
/// The terminal is in raw mode on the alternate screen while the editor
/// runs, so nothing may be written to stderr. `RUST_LOG` overrides the
/// default levels.
pub fn init(user_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(user_dir)
        .with_context(|| format!("Failed to create {}", user_dir.display()))?;

    let log_path = user_dir.join("quill.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("quill", LevelFilter::Debug);
    }
    logger
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;

    Ok(())
}
