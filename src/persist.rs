//! Query history and selection memory kept between runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glint_core::{HistoryError, HistorySource, InMemoryHistory, SelectionMemory};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Newest queries kept on disk.
const HISTORY_CAP: usize = 200;

const HISTORY_FILE: &str = "history.json";
const SELECTIONS_FILE: &str = "selections.json";

/// A missing file yields the default value, and so does a corrupt one.
fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
	let Ok(body) = fs::read_to_string(path) else {
		return T::default();
	};
	match serde_json::from_str(&body) {
		Ok(value) => value,
		Err(error) => {
			warn!(path = %path.display(), %error, "ignoring unreadable state file");
			T::default()
		}
	}
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create {}", parent.display()))?;
	}
	let body = serde_json::to_string_pretty(value)?;
	fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Query history stored as a JSON array, rewritten on every commit.
#[derive(Debug)]
pub(crate) struct FileHistory {
	path: PathBuf,
	entries: InMemoryHistory,
}

impl FileHistory {
	pub(crate) fn load(path: PathBuf) -> Self {
		let entries: InMemoryHistory = load_json(&path);
		debug!(path = %path.display(), queries = entries.len(), "query history loaded");
		Self { path, entries }
	}
}

impl HistorySource for FileHistory {
	fn historical_query(&self, offset: usize) -> Result<String, HistoryError> {
		self.entries.historical_query(offset)
	}

	fn record(&mut self, query: &str) {
		self.entries.push(query);
		self.entries.truncate(HISTORY_CAP);
		if let Err(error) = save_json(&self.path, &self.entries) {
			warn!("failed to save query history: {error:#}");
		}
	}
}

/// The state files under the data directory.
#[derive(Debug, Clone)]
pub(crate) struct StateDir {
	root: PathBuf,
}

impl StateDir {
	pub(crate) fn new(root: PathBuf) -> Self {
		Self { root }
	}

	pub(crate) fn history(&self) -> FileHistory {
		FileHistory::load(self.root.join(HISTORY_FILE))
	}

	pub(crate) fn load_memory(&self) -> SelectionMemory {
		load_json(&self.root.join(SELECTIONS_FILE))
	}

	pub(crate) fn save_memory(&self, memory: &SelectionMemory) -> Result<()> {
		save_json(&self.root.join(SELECTIONS_FILE), memory)
	}
}
