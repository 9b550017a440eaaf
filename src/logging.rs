//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI while a session runs, so logs are appended
//! to `glint.log` in the cache directory instead of stderr.
//!
//! Filter priority: `GLINT_LOG`, then `RUST_LOG`, then `-v` (debug) or the
//! default `warn`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::app_dirs::AppDir;

const LOG_FILE: &str = "glint.log";
const LOG_ENV: &str = "GLINT_LOG";

/// Level used when neither environment variable carries a usable filter.
fn default_level(verbose: u8) -> Level {
	match verbose {
		0 => Level::WARN,
		1 => Level::DEBUG,
		_ => Level::TRACE,
	}
}

fn build_env_filter(verbose: u8) -> EnvFilter {
	if let Ok(directives) = std::env::var(LOG_ENV)
		&& let Ok(filter) = EnvFilter::try_new(&directives)
	{
		return filter;
	}
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return filter;
	}
	EnvFilter::new(default_level(verbose).as_str())
}

/// Install the global subscriber and return the log file path.
pub(crate) fn init(verbose: u8) -> Result<PathBuf> {
	let dir = AppDir::Cache.resolve()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create cache directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let fmt_layer = fmt::layer()
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry()
		.with(build_env_filter(verbose))
		.with(fmt_layer)
		.try_init()
		.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

	Ok(path)
}
