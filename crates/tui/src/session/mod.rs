//! The interactive session.
//!
//! A [`Session`] is the single owner of all per-session state: the pagination
//! controller, cursor, combo and suggestion state, selection, preview
//! coordinator and current geometry. Every caller operation checks the
//! `active` flag first, so events arriving after the session closed (a resize
//! racing a commit, say) are ignored instead of corrupting state.

mod outcome;
mod status;
#[cfg(test)]
mod tests;

use std::fmt::Display;
use std::time::{Duration, Instant};

use glint_core::{
	BackendMode, HistoryCycler, HistorySource, HistoryStep, Item, Location, PageTurn,
	PaginationController, Query, QueryGeneration, ScanPoller, SearchBackend,
	SearchOptions, SelectionMemory, SuggestionState, TotalCount, DEFAULT_SUGGESTION_LIMIT,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

pub use outcome::{Commit, CommitAction, CommitTarget, ListEntry, SessionOutcome};
pub use status::{Notice, StatusLine};

use crate::host::Surface;
use crate::layout::{Geometry, LayoutConfig, PanelKind, compute_layout};
use crate::preview::{DEFAULT_DEBOUNCE, PreviewCoordinator, PreviewSink};
use crate::render::{ComboDetector, ComboState, ListView, RenderedList, render_list};
use crate::selection::Selection;

/// Drawn before the query text in the prompt panel.
pub const PROMPT_PREFIX: &str = "> ";

/// Failures that end or refuse a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
	#[error("a {width}x{height} terminal leaves no room for the result list")]
	NonViableGeometry { width: u16, height: u16 },
	#[error("the session is closed")]
	Inactive,
}

/// Tunables for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
	pub layout: LayoutConfig,
	/// Items per page; defaults to the list panel height.
	pub page_size: Option<usize>,
	pub prefetch_margin: usize,
	pub suggestion_limit: usize,
	pub preview_delay: Duration,
	/// Preview location for items without one.
	pub default_location: Option<Location>,
	pub combo: ComboDetector,
	pub boost_multiplier: u32,
	pub debug_scores: bool,
	pub initial_mode: BackendMode,
	pub initial_query: String,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			page_size: None,
			prefetch_margin: 2,
			suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
			preview_delay: DEFAULT_DEBOUNCE,
			default_location: None,
			combo: ComboDetector::default(),
			boost_multiplier: 100,
			debug_scores: false,
			initial_mode: BackendMode::Primary,
			initial_query: String::new(),
		}
	}
}

/// The two result backends a session switches between.
pub struct Backends {
	pub primary: Box<dyn SearchBackend>,
	pub alternate: Box<dyn SearchBackend>,
}

impl Backends {
	fn for_mode(&self, mode: BackendMode) -> &dyn SearchBackend {
		match mode {
			BackendMode::Primary => self.primary.as_ref(),
			BackendMode::Alternate => self.alternate.as_ref(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
	Forward,
	Backward,
}

pub struct Session {
	config: SessionConfig,
	active: bool,
	geometry: Geometry,
	backends: Backends,
	history: Box<dyn HistorySource>,
	cycler: HistoryCycler,
	memory: SelectionMemory,
	controller: PaginationController,
	page_size: usize,
	generation: QueryGeneration,
	query_text: String,
	mode: BackendMode,
	cursor: usize,
	combo: ComboState,
	suggestion: SuggestionState,
	selection: Selection,
	preview: PreviewCoordinator,
	notice: Option<Notice>,
	regex_fallback: bool,
	poller: ScanPoller,
	next_poll: Option<Instant>,
}

impl Session {
	/// Lay out a `width` x `height` terminal and run the initial query.
	///
	/// `memory` holds commit counts from earlier sessions; commits made here
	/// are added to it.
	pub fn open(
		config: SessionConfig,
		backends: Backends,
		history: Box<dyn HistorySource>,
		memory: SelectionMemory,
		width: u16,
		height: u16,
	) -> Result<Self, SessionError> {
		let geometry = compute_layout(width, height, &config.layout);
		if !geometry.is_viable() {
			return Err(SessionError::NonViableGeometry { width, height });
		}

		let page_size = config
			.page_size
			.unwrap_or_else(|| geometry.list_height())
			.max(1);
		let mut session = Self {
			controller: PaginationController::new(config.prefetch_margin),
			preview: PreviewCoordinator::new(config.preview_delay, config.default_location),
			query_text: config.initial_query.clone(),
			mode: config.initial_mode,
			config,
			active: true,
			geometry,
			backends,
			history,
			cycler: HistoryCycler::default(),
			memory,
			page_size,
			generation: QueryGeneration::default(),
			cursor: 1,
			combo: ComboState::fresh(),
			suggestion: SuggestionState::inactive(),
			selection: Selection::default(),
			notice: None,
			regex_fallback: false,
			poller: ScanPoller::new(),
			next_poll: None,
		};
		info!(width, height, page_size, mode = session.mode.label(), "session opened");
		session.execute(true);
		Ok(session)
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.active
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query_text
	}

	#[must_use]
	pub fn mode(&self) -> BackendMode {
		self.mode
	}

	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	#[must_use]
	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	#[must_use]
	pub fn page_index(&self) -> usize {
		self.controller.state().page_index
	}

	#[must_use]
	pub fn combo(&self) -> ComboState {
		self.combo
	}

	#[must_use]
	pub fn suggestion(&self) -> &SuggestionState {
		&self.suggestion
	}

	#[must_use]
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	#[must_use]
	pub fn notice(&self) -> Option<&Notice> {
		self.notice.as_ref()
	}

	/// Selection memory, including commits made in this session.
	#[must_use]
	pub fn memory(&self) -> &SelectionMemory {
		&self.memory
	}

	/// Items the cursor navigates: suggestions when active, else the page.
	#[must_use]
	pub fn visible_items(&self) -> &[Item] {
		if self.suggestion.active {
			return &self.suggestion.items;
		}
		let window = self.controller.window();
		if self.controller.is_current(window.generation) {
			&window.items
		} else {
			&[]
		}
	}

	#[must_use]
	pub fn current_item(&self) -> Option<&Item> {
		self.cursor
			.checked_sub(1)
			.and_then(|index| self.visible_items().get(index))
	}

	/// Replace the query text and search again.
	pub fn update_query(&mut self, text: &str) {
		if !self.active || text == self.query_text {
			return;
		}
		self.query_text = text.to_string();
		self.cycler.reset();
		self.execute(true);
	}

	/// Switch between the file and content backends.
	pub fn toggle_mode(&mut self) {
		if !self.active {
			return;
		}
		self.mode = self.mode.other();
		if !self.execute(true) {
			self.mode = self.mode.other();
			return;
		}
		self.selection.clear();
		self.poller.restart();
		self.next_poll = None;
		debug!(mode = self.mode.label(), "backend mode toggled");
	}

	/// Move the cursor one row visually: negative is up, positive is down.
	///
	/// Moving past the first or last item turns the page.
	pub fn move_cursor(&mut self, delta: isize) {
		if !self.active || delta == 0 {
			return;
		}
		let len = self.visible_items().len();
		if len == 0 {
			return;
		}
		let rank_delta = if self.geometry.prompt_position.is_below() {
			-delta.signum()
		} else {
			delta.signum()
		};
		let target = self.cursor as isize + rank_delta;
		if target > len as isize {
			self.turn_page(Direction::Forward);
		} else if target < 1 {
			self.turn_page(Direction::Backward);
		} else {
			self.cursor = target as usize;
			if rank_delta > 0 {
				self.prefetch();
			}
		}
		self.observe_cursor();
	}

	pub fn next_page(&mut self) {
		if self.active {
			self.turn_page(Direction::Forward);
			self.observe_cursor();
		}
	}

	pub fn previous_page(&mut self) {
		if self.active {
			self.turn_page(Direction::Backward);
			self.observe_cursor();
		}
	}

	/// Add or remove the highlighted item from the selection.
	pub fn toggle_selection(&mut self) {
		if !self.active {
			return;
		}
		let Some(item) = self.current_item().cloned() else {
			return;
		};
		let selected = self.selection.toggle(&item);
		debug!(identifier = %item.identifier, selected, "selection toggled");
	}

	/// Commit the selection, or the highlighted item when nothing is selected,
	/// and close the session. Returns `None` when there is nothing to commit.
	pub fn commit_selection(
		&mut self,
		action: CommitAction,
	) -> Result<Option<Commit>, SessionError> {
		if !self.active {
			return Err(SessionError::Inactive);
		}
		let items: Vec<Item> = if self.selection.is_empty() {
			self.current_item().cloned().into_iter().collect()
		} else {
			self.selection.items().cloned().collect()
		};
		if items.is_empty() {
			return Ok(None);
		}

		let source = self.result_source();
		let query = self.active_query().to_owned();
		for item in &items {
			self.memory.record(&query, &item.identifier);
		}
		if !query.trim().is_empty() {
			self.history.record(&query);
		}
		let commit = Commit {
			action,
			query,
			targets: items
				.iter()
				.map(|item| CommitTarget::for_item(item, source))
				.collect(),
		};
		info!(%action, targets = commit.targets.len(), "committed selection");
		self.close();
		Ok(Some(commit))
	}

	/// Hand the selection, or the whole visible page when nothing is selected,
	/// to an external list and close the session.
	pub fn send_all_selected_to_external_list(&mut self) -> Result<Vec<ListEntry>, SessionError> {
		if !self.active {
			return Err(SessionError::Inactive);
		}
		let entries: Vec<ListEntry> = if self.selection.is_empty() {
			self.visible_items().iter().map(ListEntry::from).collect()
		} else {
			self.selection.items().map(ListEntry::from).collect()
		};
		info!(entries = entries.len(), "sent results to external list");
		self.close();
		Ok(entries)
	}

	/// Replace the query with the next older historical query.
	pub fn cycle_history(&mut self) {
		if !self.active {
			return;
		}
		match self.cycler.advance(self.history.as_ref()) {
			Ok(HistoryStep::Query(text)) => {
				self.query_text = text;
				self.execute(true);
			}
			Ok(HistoryStep::Empty) => {
				self.notice = Some(Notice::Info("no query history".into()));
			}
			Err(error) => self.report("history unavailable", error),
		}
	}

	/// Recompute geometry for a new terminal size, keeping query, mode and
	/// cursor. Closes the session when the list no longer fits.
	pub fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), SessionError> {
		if !self.active {
			return Err(SessionError::Inactive);
		}
		let geometry = compute_layout(width, height, &self.config.layout);
		if !geometry.is_viable() {
			warn!(width, height, "terminal too small, closing session");
			self.close();
			return Err(SessionError::NonViableGeometry { width, height });
		}
		debug!(width, height, "geometry updated in place");
		self.geometry = geometry;
		Ok(())
	}

	pub fn close(&mut self) {
		if !self.active {
			return;
		}
		self.active = false;
		self.preview.cancel();
		info!(query = %self.query_text, "session closed");
	}

	/// Advance timers: scan-progress polling and the preview debounce.
	pub fn tick(&mut self, now: Instant, sink: &mut dyn PreviewSink) {
		if !self.active {
			return;
		}
		self.poll_scan(now);
		if self.geometry.preview.is_none() {
			return;
		}
		let window = self.controller.window();
		let items: &[Item] = if self.suggestion.active {
			&self.suggestion.items
		} else if self.controller.is_current(window.generation) {
			&window.items
		} else {
			&[]
		};
		let item = self.cursor.checked_sub(1).and_then(|index| items.get(index));
		self.preview.update(item, now, sink);
		self.preview.poll(now, sink);
	}

	/// Whether the backend is still indexing.
	#[must_use]
	pub fn is_scanning(&self) -> bool {
		self.poller.last().is_scanning
	}

	#[must_use]
	pub fn render(&self) -> RenderedList {
		let window = self.controller.window();
		let suggestion = self
			.suggestion
			.active
			.then_some(self.suggestion.source)
			.flatten();
		render_list(&ListView {
			items: self.visible_items(),
			cursor: self.cursor,
			page_index: window.page_index,
			total_pages: self.controller.total_pages(),
			exact_total: window.total.is_exact(),
			paging: self.controller.paging(),
			mode: self.mode,
			query_blank: self.active_query().trim().is_empty(),
			suggestion,
			combo: self.combo,
			combo_detector: self.config.combo,
			selection: &self.selection,
			prompt_position: self.geometry.prompt_position,
			panel_height: self.geometry.list_height(),
			panel_width: self.geometry.list_width(),
			debug_scores: self.config.debug_scores,
		})
	}

	#[must_use]
	pub fn status(&self) -> StatusLine {
		let window = self.controller.window();
		let count = if self.suggestion.active {
			"0".to_string()
		} else {
			match window.total {
				TotalCount::Exact(n) => n.to_string(),
				TotalCount::Approximate(n) => format!("~{n}"),
			}
		};
		let page = (window.total.is_exact() && !self.suggestion.active).then(|| {
			format!(
				"{}/{}",
				window.page_index + 1,
				self.controller.total_pages()
			)
		});
		StatusLine {
			mode: self.mode,
			count,
			page,
			scanning: self.is_scanning(),
			literal: self.regex_fallback,
			suggestion: self.suggestion.active,
			selected: self.selection.len(),
			notice: self.notice.clone(),
		}
	}

	/// Push the current state to the host. `input_column` is the editing
	/// cursor inside the query text, in display columns.
	pub fn present(&self, surface: &mut dyn Surface, input_column: usize) {
		surface.place_panels(&self.geometry);

		let rendered = self.render();
		surface.replace_lines(PanelKind::List, &rendered.lines);
		surface.apply_ranges(PanelKind::List, &rendered.ranges);
		surface.show_scrollbar(rendered.scrollbar);

		surface.replace_lines(
			PanelKind::Prompt,
			&[format!("{PROMPT_PREFIX}{}", self.query_text)],
		);
		surface.show_status(&self.status());
		surface.place_cursor(PanelKind::Prompt, 0, PROMPT_PREFIX.width() + input_column);

		if self.geometry.info.is_some() {
			surface.replace_lines(PanelKind::Info, &self.debug_lines());
		}
	}

	fn debug_lines(&self) -> Vec<String> {
		let metadata = self.backends.for_mode(self.mode).metadata();
		let state = self.controller.state();
		vec![format!(
			"files {} matched {} page {} size {} gen {}",
			metadata.total_files,
			metadata.total_matched,
			state.page_index,
			state.page_size,
			self.generation.0
		)]
	}

	/// Run the current query text against the active backend. Returns
	/// whether the backend answered.
	///
	/// `fresh` marks a new query: combo and cursor start over. A refresh
	/// keeps both, clamped to the new page. A failed search leaves the
	/// previous results, cursor and generation untouched.
	fn execute(&mut self, fresh: bool) -> bool {
		let generation = self.generation.next();
		let query = Query::new(self.query_text.clone(), self.mode, generation);
		let options = SearchOptions {
			memory: Some(&self.memory),
			boost_multiplier: self.config.boost_multiplier,
		};
		let backend = self.backends.for_mode(self.mode);
		let (regex_fallback, found) = match self
			.controller
			.reset(query.clone(), self.page_size, backend, &options)
		{
			Ok(window) => (window.regex_fallback, window.len()),
			Err(error) => {
				self.report("search failed", error);
				return false;
			}
		};

		self.generation = generation;
		if fresh {
			self.combo = ComboState::fresh();
			self.cursor = 1;
		}
		self.suggestion = SuggestionState::inactive();
		self.regex_fallback = regex_fallback && self.mode == BackendMode::Alternate;
		let literal = self
			.regex_fallback
			.then(|| Notice::Info("invalid pattern, matching literally".into()));
		if fresh || !self.notice.as_ref().is_some_and(Notice::is_warning) {
			self.notice = literal;
		}

		if SuggestionState::should_evaluate(&query, found) {
			let alternate = self.backends.for_mode(self.mode.other());
			match SuggestionState::evaluate(
				&query,
				found,
				alternate,
				&options,
				self.config.suggestion_limit,
			) {
				Ok(suggestion) if self.controller.is_current(query.generation) => {
					self.suggestion = suggestion;
				}
				Ok(_) => debug!("discarding suggestions for a superseded query"),
				Err(error) => self.report("suggestions failed", error),
			}
		}
		self.clamp_cursor();
		true
	}

	fn turn_page(&mut self, direction: Direction) {
		if self.suggestion.active {
			return;
		}
		let options = SearchOptions {
			memory: Some(&self.memory),
			boost_multiplier: self.config.boost_multiplier,
		};
		let backend = self.backends.for_mode(self.mode);
		let turned = match direction {
			Direction::Forward => self.controller.next(backend, &options),
			Direction::Backward => self.controller.previous(backend, &options),
		};
		match turned {
			Ok(PageTurn::Loaded) => {
				self.cursor = match direction {
					Direction::Forward => 1,
					Direction::Backward => self.controller.window().len(),
				};
				self.clamp_cursor();
			}
			Ok(PageTurn::Unchanged) => {}
			Err(error) => self.report("page fetch failed", error),
		}
	}

	fn prefetch(&mut self) {
		if self.suggestion.active {
			return;
		}
		let options = SearchOptions {
			memory: Some(&self.memory),
			boost_multiplier: self.config.boost_multiplier,
		};
		let backend = self.backends.for_mode(self.mode);
		if let Err(error) = self.controller.prefetch(self.cursor, backend, &options) {
			self.report("prefetch failed", error);
		}
	}

	fn poll_scan(&mut self, now: Instant) {
		if self.poller.is_done() || self.next_poll.is_some_and(|due| now < due) {
			return;
		}
		let progress = self.backends.for_mode(self.mode).scan_progress();
		let previous = self.poller.last();
		self.next_poll = self.poller.observe(progress).map(|delay| now + delay);
		if progress.scanned_count != previous.scanned_count && self.page_index() == 0 {
			self.execute(false);
		}
	}

	/// Text of the query whose results are on screen. It lags the prompt
	/// text after a failed search.
	fn active_query(&self) -> &str {
		self.controller
			.query()
			.map_or(self.query_text.as_str(), |query| query.text.as_str())
	}

	/// The backend whose semantics apply to the visible items.
	fn result_source(&self) -> BackendMode {
		if self.suggestion.active {
			self.suggestion.source.unwrap_or(self.mode.other())
		} else {
			self.mode
		}
	}

	fn clamp_cursor(&mut self) {
		let len = self.visible_items().len();
		self.cursor = self.cursor.clamp(1, len.max(1));
	}

	fn observe_cursor(&mut self) {
		let absolute = self.page_index() * self.page_size + self.cursor;
		self.combo.observe(absolute, self.page_size);
	}

	fn report(&mut self, context: &str, error: impl Display) {
		warn!(%error, "{context}");
		self.notice = Some(Notice::Warning(format!("{context}: {error}")));
	}
}
