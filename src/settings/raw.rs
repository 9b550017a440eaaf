use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use glint_core::backend::IndexOptions;
use glint_core::{BackendMode, Location};
use glint_tui::SessionConfig;
use glint_tui::layout::{BorderStyle, LayoutConfig, Ratio};
use glint_tui::render::ComboDetector;
use glint_tui::style;
use serde::Deserialize;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig};
use crate::cli::CliArgs;

/// The configuration as read from files and the environment, before CLI
/// overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	pub(super) search: SearchSection,
	pub(super) layout: LayoutSection,
	pub(super) preview: PreviewSection,
	pub(super) combo: ComboSection,
	pub(super) ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) root: Option<PathBuf>,
	pub(super) mode: Option<String>,
	pub(super) query: Option<String>,
	pub(super) page_size: Option<usize>,
	pub(super) prefetch_margin: Option<usize>,
	pub(super) suggestion_limit: Option<usize>,
	pub(super) include_hidden: Option<bool>,
	pub(super) follow_symlinks: Option<bool>,
	pub(super) respect_ignore_files: Option<bool>,
	pub(super) git_ignore: Option<bool>,
	pub(super) threads: Option<usize>,
	pub(super) max_depth: Option<usize>,
	pub(super) global_ignores: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LayoutSection {
	pub(super) width: Option<f64>,
	pub(super) height: Option<f64>,
	pub(super) col: Option<f64>,
	pub(super) row: Option<f64>,
	pub(super) preview_position: Option<String>,
	pub(super) preview_size: Option<f64>,
	pub(super) prompt_position: Option<String>,
	pub(super) border: Option<String>,
	pub(super) show_preview: Option<bool>,
	pub(super) show_debug: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct PreviewSection {
	pub(super) debounce_ms: Option<u64>,
	pub(super) default_line: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ComboSection {
	pub(super) enabled: Option<bool>,
	pub(super) min_count: Option<u32>,
	pub(super) boost_multiplier: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) theme: Option<String>,
	pub(super) debug_scores: Option<bool>,
}

fn parse_named<T: FromStr>(
	key: &'static str,
	value: Option<String>,
	sources: &ConfigSources,
) -> Result<Option<T>, ConfigError>
where
	T::Err: ToString,
{
	value
		.map(|value| {
			value.parse::<T>().map_err(|err| {
				ConfigError::invalid(key, value.as_str(), sources.source_for(key), err.to_string())
			})
		})
		.transpose()
}

fn parse_mode(value: &str) -> Result<BackendMode, String> {
	match value.trim().to_ascii_lowercase().as_str() {
		"files" | "file" => Ok(BackendMode::Primary),
		"grep" | "content" => Ok(BackendMode::Alternate),
		other => Err(format!("unknown mode `{other}` (expected files or grep)")),
	}
}

impl RawConfig {
	/// Apply CLI overrides and record which keys they touched.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) -> ConfigSources {
		let mut sources = ConfigSources::default();

		if let Some(root) = cli.root.clone() {
			self.search.root = Some(root);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.search.query = Some(query);
		}
		if let Some(mode) = cli.mode {
			self.search.mode = Some(mode.as_str().to_string());
			sources.record("search.mode", "--mode");
		}
		if let Some(size) = cli.page_size {
			self.search.page_size = Some(size);
			sources.record("search.page_size", "--page-size");
		}
		if let Some(value) = cli.hidden {
			self.search.include_hidden = Some(value);
		}
		if let Some(value) = cli.follow_symlinks {
			self.search.follow_symlinks = Some(value);
		}
		if let Some(value) = cli.threads {
			self.search.threads = Some(value);
			sources.record("search.threads", "--threads");
		}
		if let Some(value) = cli.max_depth {
			self.search.max_depth = Some(value);
			sources.record("search.max_depth", "--max-depth");
		}

		if let Some(position) = cli.preview_position.clone() {
			self.layout.preview_position = Some(position);
			sources.record("layout.preview_position", "--preview-position");
		}
		if let Some(position) = cli.prompt_position.clone() {
			self.layout.prompt_position = Some(position);
			sources.record("layout.prompt_position", "--prompt-position");
		}
		if let Some(border) = cli.border.clone() {
			self.layout.border = Some(border);
			sources.record("layout.border", "--border");
		}
		if let Some(show) = cli.preview {
			self.layout.show_preview = Some(show);
		}
		if cli.debug {
			self.layout.show_debug = Some(true);
			self.ui.debug_scores = Some(true);
		}

		if let Some(delay) = cli.preview_delay {
			self.preview.debounce_ms = Some(delay);
			sources.record("preview.debounce_ms", "--preview-delay");
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
			sources.record("ui.theme", "--theme");
		}

		sources
	}

	/// Turn raw values into application-ready configuration.
	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<ResolvedConfig> {
		let mut root = match self.search.root {
			Some(path) => path,
			None => env::current_dir().context("failed to resolve current directory")?,
		};
		if root.is_relative() {
			root = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(root);
		}
		root = fs::canonicalize(&root)
			.with_context(|| format!("failed to canonicalize search root {}", root.display()))?;
		let metadata = fs::metadata(&root)
			.with_context(|| format!("failed to inspect search root {}", root.display()))?;
		ensure!(metadata.is_dir(), "search root must be a directory");

		let defaults = IndexOptions::default();
		let index = IndexOptions {
			include_hidden: self.search.include_hidden.unwrap_or(defaults.include_hidden),
			follow_symlinks: self.search.follow_symlinks.unwrap_or(defaults.follow_symlinks),
			respect_ignore_files: self
				.search
				.respect_ignore_files
				.unwrap_or(defaults.respect_ignore_files),
			git_ignore: self.search.git_ignore.unwrap_or(defaults.git_ignore),
			threads: self.search.threads,
			max_depth: self.search.max_depth,
			global_ignores: self.search.global_ignores.unwrap_or(defaults.global_ignores),
			..defaults
		};

		let theme_name = self
			.ui
			.theme
			.unwrap_or_else(|| style::names().next().unwrap_or_default().to_string());
		let Some(theme) = style::by_name(&theme_name) else {
			return Err(ConfigError::invalid(
				"ui.theme",
				theme_name.as_str(),
				sources.source_for("ui.theme"),
				format!("expected one of {}", style::names().collect::<Vec<_>>().join(", ")),
			)
			.into());
		};

		let border = match self.layout.border {
			Some(name) if BorderStyle::names().any(|known| known == name.trim()) => {
				BorderStyle::by_name(&name)
			}
			Some(name) => {
				return Err(ConfigError::invalid(
					"layout.border",
					name,
					sources.source_for("layout.border"),
					format!(
						"expected one of {}",
						BorderStyle::names().collect::<Vec<_>>().join(", ")
					),
				)
				.into());
			}
			None => BorderStyle::default(),
		};

		let layout_defaults = LayoutConfig::default();
		let layout = LayoutConfig {
			width: self.layout.width.map_or(layout_defaults.width.clone(), Ratio::from),
			height: self.layout.height.map_or(layout_defaults.height.clone(), Ratio::from),
			col: self.layout.col.map_or(layout_defaults.col.clone(), Ratio::from),
			row: self.layout.row.map_or(layout_defaults.row.clone(), Ratio::from),
			preview_position: parse_named(
				"layout.preview_position",
				self.layout.preview_position,
				sources,
			)?
			.unwrap_or(layout_defaults.preview_position),
			preview_size: self
				.layout
				.preview_size
				.map_or(layout_defaults.preview_size.clone(), Ratio::from),
			prompt_position: parse_named(
				"layout.prompt_position",
				self.layout.prompt_position,
				sources,
			)?
			.unwrap_or(layout_defaults.prompt_position),
			show_preview: self.layout.show_preview.unwrap_or(layout_defaults.show_preview),
			show_debug: self.layout.show_debug.unwrap_or(layout_defaults.show_debug),
			border,
		};

		let initial_mode = match self.search.mode {
			Some(mode) => parse_mode(&mode).map_err(|reason| {
				ConfigError::invalid(
					"search.mode",
					mode.as_str(),
					sources.source_for("search.mode"),
					reason,
				)
			})?,
			None => BackendMode::Primary,
		};

		let session_defaults = SessionConfig::default();
		let combo_defaults = ComboDetector::default();
		let session = SessionConfig {
			layout,
			page_size: self.search.page_size,
			prefetch_margin: self
				.search
				.prefetch_margin
				.unwrap_or(session_defaults.prefetch_margin),
			suggestion_limit: self
				.search
				.suggestion_limit
				.unwrap_or(session_defaults.suggestion_limit),
			preview_delay: self
				.preview
				.debounce_ms
				.map_or(session_defaults.preview_delay, Duration::from_millis),
			default_location: self
				.preview
				.default_line
				.map(|line| Location::new(line.max(1), 1)),
			combo: ComboDetector {
				enabled: self.combo.enabled.unwrap_or(combo_defaults.enabled),
				min_uses: self.combo.min_count.unwrap_or(combo_defaults.min_uses),
			},
			boost_multiplier: self
				.combo
				.boost_multiplier
				.unwrap_or(session_defaults.boost_multiplier),
			debug_scores: self.ui.debug_scores.unwrap_or(session_defaults.debug_scores),
			initial_mode,
			initial_query: self.search.query.unwrap_or_default(),
		};

		let resolved = ResolvedConfig {
			root,
			index,
			session,
			theme_name,
			theme,
		};
		resolved.validate(sources)?;
		Ok(resolved)
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use glint_tui::layout::{PreviewPosition, PromptPosition};
	use tempfile::tempdir;

	use super::*;
	use crate::settings::resolved::SettingSource;

	fn rooted(dir: &std::path::Path) -> RawConfig {
		let mut raw = RawConfig::default();
		raw.search.root = Some(dir.to_path_buf());
		raw
	}

	#[test]
	fn cli_overrides_take_precedence() {
		let cli = CliArgs::parse_from([
			"glint",
			"--mode",
			"grep",
			"--page-size",
			"30",
			"--prompt-position",
			"top",
			"--theme",
			"mono",
			"--debug",
		]);
		let mut raw = RawConfig::default();
		raw.search.page_size = Some(10);
		raw.ui.theme = Some("slate".into());

		let sources = raw.apply_cli_overrides(&cli);

		assert_eq!(raw.search.mode.as_deref(), Some("grep"));
		assert_eq!(raw.search.page_size, Some(30));
		assert_eq!(raw.layout.prompt_position.as_deref(), Some("top"));
		assert_eq!(raw.ui.theme.as_deref(), Some("mono"));
		assert_eq!(raw.layout.show_debug, Some(true));
		assert_eq!(raw.ui.debug_scores, Some(true));
		assert!(matches!(
			sources.source_for("search.page_size"),
			SettingSource::CliFlag("--page-size")
		));
	}

	#[test]
	fn defaults_resolve_against_a_directory() {
		let dir = tempdir().expect("tempdir");
		let resolved = rooted(dir.path())
			.resolve(&ConfigSources::default())
			.expect("resolve");

		assert_eq!(resolved.session.initial_mode, BackendMode::Primary);
		assert_eq!(resolved.session.page_size, None);
		assert_eq!(resolved.session.layout.prompt_position, PromptPosition::Bottom);
		assert_eq!(resolved.session.preview_delay, Duration::from_millis(100));
		assert_eq!(resolved.theme_name, "slate");
	}

	#[test]
	fn configured_values_flow_into_the_session() {
		let dir = tempdir().expect("tempdir");
		let mut raw = rooted(dir.path());
		raw.search.mode = Some("grep".into());
		raw.layout.preview_position = Some("left".into());
		raw.layout.border = Some("rounded".into());
		raw.preview.default_line = Some(12);
		raw.combo.min_count = Some(3);

		let resolved = raw.resolve(&ConfigSources::default()).expect("resolve");
		let session = &resolved.session;
		assert_eq!(session.initial_mode, BackendMode::Alternate);
		assert_eq!(session.layout.preview_position, PreviewPosition::Left);
		assert_eq!(session.layout.border.name, "rounded");
		assert_eq!(session.default_location, Some(Location::new(12, 1)));
		assert_eq!(session.combo.min_uses, 3);
	}

	#[test]
	fn unknown_names_report_their_origin() {
		let dir = tempdir().expect("tempdir");
		let cli = CliArgs::parse_from(["glint", "--preview-position", "diagonal"]);
		let mut raw = rooted(dir.path());
		let sources = raw.apply_cli_overrides(&cli);

		let err = raw.resolve(&sources).expect_err("invalid position");
		let config_error = err.downcast_ref::<ConfigError>().expect("typed error");
		assert_eq!(config_error.key, "layout.preview_position");
		assert!(err.to_string().contains("CLI flag `--preview-position`"));
		assert!(err.to_string().contains("value: diagonal"));
	}

	#[test]
	fn unknown_theme_is_rejected() {
		let dir = tempdir().expect("tempdir");
		let mut raw = rooted(dir.path());
		raw.ui.theme = Some("neon".into());

		let err = raw.resolve(&ConfigSources::default()).expect_err("theme");
		assert!(err.to_string().contains("ui.theme"));
	}

	#[test]
	fn file_roots_are_rejected() {
		let dir = tempdir().expect("tempdir");
		let file = dir.path().join("plain.txt");
		fs::write(&file, "x").expect("write");

		let err = rooted(&file).resolve(&ConfigSources::default()).expect_err("root");
		assert!(err.to_string().contains("directory"));
	}
}
