use std::path::PathBuf;

use glint_core::backend::IndexOptions;
use glint_tui::{SessionConfig, Theme};

mod origin;
mod summary;
mod validation;

pub(crate) use origin::{ConfigError, ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	pub(crate) root: PathBuf,
	pub(crate) index: IndexOptions,
	pub(crate) session: SessionConfig,
	pub(crate) theme_name: String,
	pub(crate) theme: Theme,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
