use std::env;
use std::fmt;

use thiserror::Error;

/// Where a configured value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(String),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Keys set by CLI flags, with the flag that set them.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	cli: Vec<(&'static str, &'static str)>,
}

/// `search.page_size` → `GLINT__SEARCH__PAGE_SIZE`.
fn env_var_for(key: &str) -> String {
	format!("GLINT__{}", key.replace('.', "__").to_ascii_uppercase())
}

impl ConfigSources {
	pub(crate) fn record(&mut self, key: &'static str, flag: &'static str) {
		self.cli.push((key, flag));
	}

	/// The highest-priority layer that can have supplied `key`.
	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		if let Some((_, flag)) = self.cli.iter().rev().find(|(recorded, _)| *recorded == key) {
			return SettingSource::CliFlag(*flag);
		}
		let var = env_var_for(key);
		if env::var_os(&var).is_some() {
			return SettingSource::Environment(var);
		}
		SettingSource::ConfigKey(key)
	}
}

/// A configured value that failed validation.
#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid<V, R>(key: &'static str, value: V, origin: SettingSource, reason: R) -> Self
	where
		V: Into<String>,
		R: Into<String>,
	{
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn environment_names_follow_the_section_separator() {
		assert_eq!(env_var_for("search.page_size"), "GLINT__SEARCH__PAGE_SIZE");
		assert_eq!(env_var_for("layout.width"), "GLINT__LAYOUT__WIDTH");
	}

	#[test]
	fn cli_flags_win_over_other_layers() {
		let mut sources = ConfigSources::default();
		sources.record("ui.theme", "--theme");
		assert_eq!(sources.source_for("ui.theme"), SettingSource::CliFlag("--theme"));
		assert_eq!(
			sources.source_for("glint.test_only_key"),
			SettingSource::ConfigKey("glint.test_only_key")
		);
	}
}
