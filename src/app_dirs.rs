//! Platform directories for `glint`, with environment overrides.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

/// One of the per-user directories the binary reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppDir {
	/// Holds `config.toml`.
	Config,
	/// Holds query history and selection memory.
	Data,
	/// Holds `glint.log`.
	Cache,
}

impl AppDir {
	const fn env_var(self) -> &'static str {
		match self {
			Self::Config => "GLINT_CONFIG_DIR",
			Self::Data => "GLINT_DATA_DIR",
			Self::Cache => "GLINT_CACHE_DIR",
		}
	}

	fn platform(self, dirs: &ProjectDirs) -> PathBuf {
		let dir = match self {
			Self::Config => dirs.config_local_dir(),
			Self::Data => dirs.data_local_dir(),
			Self::Cache => dirs.cache_dir(),
		};
		dir.to_path_buf()
	}

	/// The override from the environment when set and non-empty, otherwise
	/// the platform location.
	pub(crate) fn resolve(self) -> Result<PathBuf> {
		if let Some(value) = env::var_os(self.env_var())
			&& !value.is_empty()
		{
			return Ok(PathBuf::from(value));
		}
		let dirs = ProjectDirs::from("rs", "glint", "glint")
			.ok_or_else(|| anyhow!("no home directory to place glint files in"))?;
		Ok(self.platform(&dirs))
	}

	/// `resolve` rendered for humans, never failing.
	pub(crate) fn describe(self) -> String {
		match self.resolve() {
			Ok(path) => path.display().to_string(),
			Err(err) => format!("unavailable ({err})"),
		}
	}
}
