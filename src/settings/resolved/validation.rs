use std::time::Duration;

use glint_tui::layout::Ratio;

use super::{ConfigError, ConfigSources, ResolvedConfig};

const MAX_PREVIEW_DELAY: Duration = Duration::from_secs(10);

/// Share of the terminal: must be in `(0, 1]`.
fn check_share(key: &'static str, ratio: &Ratio, sources: &ConfigSources) -> Result<(), ConfigError> {
	if let Ratio::Fixed(value) = ratio
		&& !(*value > 0.0 && *value <= 1.0)
	{
		return Err(ConfigError::invalid(
			key,
			value.to_string(),
			sources.source_for(key),
			"must be greater than 0 and at most 1",
		));
	}
	Ok(())
}

/// Anchor position: must be in `[0, 1]`.
fn check_anchor(key: &'static str, ratio: &Ratio, sources: &ConfigSources) -> Result<(), ConfigError> {
	if let Ratio::Fixed(value) = ratio
		&& !(0.0..=1.0).contains(value)
	{
		return Err(ConfigError::invalid(
			key,
			value.to_string(),
			sources.source_for(key),
			"must be between 0 and 1",
		));
	}
	Ok(())
}

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
	let layout = &config.session.layout;
	check_share("layout.width", &layout.width, sources)?;
	check_share("layout.height", &layout.height, sources)?;
	check_share("layout.preview_size", &layout.preview_size, sources)?;
	check_anchor("layout.col", &layout.col, sources)?;
	check_anchor("layout.row", &layout.row, sources)?;

	if config.session.page_size == Some(0) {
		return Err(ConfigError::invalid(
			"search.page_size",
			"0",
			sources.source_for("search.page_size"),
			"must be greater than zero",
		));
	}

	let delay = config.session.preview_delay;
	if delay > MAX_PREVIEW_DELAY {
		return Err(ConfigError::invalid(
			"preview.debounce_ms",
			delay.as_millis().to_string(),
			sources.source_for("preview.debounce_ms"),
			"must be at most 10000",
		));
	}

	if config.index.threads == Some(0) {
		return Err(ConfigError::invalid(
			"search.threads",
			"0",
			sources.source_for("search.threads"),
			"must be greater than zero",
		));
	}

	if config.index.max_depth == Some(0) {
		return Err(ConfigError::invalid(
			"search.max_depth",
			"0",
			sources.source_for("search.max_depth"),
			"must be at least 1",
		));
	}

	Ok(())
}
