use anyhow::Result;
use glint_core::backend::{ContentBackend, FileBackend, FileIndex};
use glint_core::{HistorySource, InMemoryHistory};
use glint_tui::{Backends, SessionOutcome};
use tracing::{info, warn};

use crate::app_dirs::AppDir;
use crate::persist::StateDir;
use crate::settings::ResolvedConfig;

/// Wires the reference backends to the terminal session.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self) -> Result<SessionOutcome> {
		let ResolvedConfig {
			root,
			index,
			session,
			theme_name,
			theme,
		} = self.config;

		let state = match AppDir::Data.resolve() {
			Ok(dir) => Some(StateDir::new(dir)),
			Err(error) => {
				warn!("history and selection memory will not persist: {error:#}");
				None
			}
		};
		let history: Box<dyn HistorySource> = match &state {
			Some(state) => Box::new(state.history()),
			None => Box::new(InMemoryHistory::new()),
		};
		let mut memory = state
			.as_ref()
			.map(StateDir::load_memory)
			.unwrap_or_default();
		let loaded = memory.clone();

		info!(root = %root.display(), mode = session.initial_mode.label(), theme = %theme_name, "starting session");
		let index = FileIndex::spawn(root, index);
		let backends = Backends {
			primary: Box::new(FileBackend::new(index.clone())),
			alternate: Box::new(ContentBackend::new(index)),
		};

		let outcome = glint_tui::run(session, backends, history, &mut memory, theme)?;
		if let Some(state) = &state
			&& memory != loaded
			&& let Err(error) = state.save_memory(&memory)
		{
			warn!("failed to save selection memory: {error:#}");
		}
		Ok(outcome)
	}
}
