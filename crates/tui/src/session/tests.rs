use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use glint_core::backend::{FileBackend, FileIndex};
use glint_core::{
	BackendError, BackendMetadata, BackendMode, ContinuationToken, InMemoryHistory, Item, Location,
	PageOrigin, PagingKind, ScanProgress, SearchBackend, SearchOptions, SearchPage,
	SelectionMemory, TotalCount,
};

use super::*;
use crate::layout::{LayoutConfig, PanelKind, PreviewPosition, PromptPosition};
use crate::preview::{PreviewSink, PreviewTarget};
use crate::render::{ScrollbarThumb, StyledRange};

struct ListBackend {
	paging: PagingKind,
	items: RefCell<Vec<Item>>,
	fail: Cell<bool>,
	fallback: bool,
	scan: Cell<ScanProgress>,
}

impl ListBackend {
	fn new(paging: PagingKind, items: Vec<Item>) -> Self {
		Self {
			paging,
			items: RefCell::new(items),
			fail: Cell::new(false),
			fallback: false,
			scan: Cell::new(ScanProgress::default()),
		}
	}

	fn files(names: &[&str]) -> Self {
		Self::new(
			PagingKind::Offset,
			names
				.iter()
				.map(|name| Item::new(format!("/repo/{name}")).with_display_name(*name))
				.collect(),
		)
	}

	fn numbered(count: usize) -> Self {
		let names: Vec<String> = (1..=count).map(|n| format!("file-{n:02}")).collect();
		let names: Vec<&str> = names.iter().map(String::as_str).collect();
		Self::files(&names)
	}

	fn lines(lines: &[(&str, usize, &str)]) -> Self {
		Self::new(
			PagingKind::Token,
			lines
				.iter()
				.map(|(path, line, text)| {
					Item::new(format!("/repo/{path}"))
						.with_display_name(format!("{path}:{line}:1"))
						.with_location(Location::new(*line, 1))
						.with_detail(*text)
				})
				.collect(),
		)
	}
}

impl SearchBackend for ListBackend {
	fn paging(&self) -> PagingKind {
		self.paging
	}

	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		_options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		if self.fail.get() {
			return Err(BackendError::search("test", "backend offline"));
		}
		let matched: Vec<Item> = self
			.items
			.borrow()
			.iter()
			.filter(|item| {
				item.display_name.contains(query)
					|| item.detail.as_deref().is_some_and(|d| d.contains(query))
			})
			.cloned()
			.collect();
		let start = match origin {
			PageOrigin::Offset(page) => page * page_size,
			PageOrigin::Token(token) if token.is_origin() => 0,
			PageOrigin::Token(token) => token
				.as_str()
				.parse()
				.map_err(|_| BackendError::InvalidToken(token.as_str().to_string()))?,
		};
		let end = (start + page_size).min(matched.len());
		let items = matched.get(start..end).unwrap_or_default().to_vec();
		let (total, next) = match self.paging {
			PagingKind::Offset => (TotalCount::Exact(matched.len()), None),
			PagingKind::Token => (
				TotalCount::Approximate(end),
				(end < matched.len()).then(|| ContinuationToken::new(end.to_string())),
			),
		};
		Ok(SearchPage {
			items,
			total,
			next,
			regex_fallback: self.fallback && self.paging == PagingKind::Token,
		})
	}

	fn metadata(&self) -> BackendMetadata {
		BackendMetadata {
			total_files: self.items.borrow().len(),
			total_matched: 0,
		}
	}

	fn scan_progress(&self) -> ScanProgress {
		self.scan.get()
	}
}

/// Lets a test keep a handle on a backend the session owns.
struct Shared(Rc<ListBackend>);

impl SearchBackend for Shared {
	fn paging(&self) -> PagingKind {
		self.0.paging()
	}

	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		self.0.search(query, origin, page_size, options)
	}

	fn metadata(&self) -> BackendMetadata {
		self.0.metadata()
	}

	fn scan_progress(&self) -> ScanProgress {
		self.0.scan_progress()
	}
}

fn open_shared(backend: &Rc<ListBackend>, page_size: usize) -> Session {
	Session::open(
		config(page_size),
		Backends {
			primary: Box::new(Shared(Rc::clone(backend))),
			alternate: Box::new(ListBackend::lines(&[])),
		},
		Box::new(InMemoryHistory::new()),
		SelectionMemory::new(),
		100,
		40,
	)
	.expect("viable session")
}

#[derive(Default)]
struct PreviewLog {
	shown: Vec<String>,
	clears: usize,
}

impl PreviewSink for PreviewLog {
	fn show(&mut self, target: &PreviewTarget) {
		self.shown.push(target.identifier.clone());
	}

	fn relocate(&mut self, _target: &PreviewTarget) {}

	fn clear(&mut self) {
		self.clears += 1;
	}
}

#[derive(Default)]
struct RecordingSurface {
	panels: Option<Geometry>,
	list: Vec<String>,
	prompt: Vec<String>,
	ranges: Vec<StyledRange>,
	scrollbar: Option<ScrollbarThumb>,
	status: Option<StatusLine>,
	cursor: Option<(PanelKind, usize, usize)>,
}

impl Surface for RecordingSurface {
	fn place_panels(&mut self, geometry: &Geometry) {
		self.panels = Some(geometry.clone());
	}

	fn replace_lines(&mut self, panel: PanelKind, lines: &[String]) {
		match panel {
			PanelKind::List => self.list = lines.to_vec(),
			PanelKind::Prompt => self.prompt = lines.to_vec(),
			PanelKind::Preview | PanelKind::Info => {}
		}
	}

	fn apply_ranges(&mut self, _panel: PanelKind, ranges: &[StyledRange]) {
		self.ranges = ranges.to_vec();
	}

	fn show_scrollbar(&mut self, thumb: Option<ScrollbarThumb>) {
		self.scrollbar = thumb;
	}

	fn show_status(&mut self, status: &StatusLine) {
		self.status = Some(status.clone());
	}

	fn place_cursor(&mut self, panel: PanelKind, row: usize, column: usize) {
		self.cursor = Some((panel, row, column));
	}
}

fn config(page_size: usize) -> SessionConfig {
	SessionConfig {
		layout: LayoutConfig {
			show_preview: false,
			prompt_position: PromptPosition::Top,
			..LayoutConfig::default()
		},
		page_size: Some(page_size),
		..SessionConfig::default()
	}
}

fn open_with(config: SessionConfig, primary: ListBackend, alternate: ListBackend) -> Session {
	Session::open(
		config,
		Backends {
			primary: Box::new(primary),
			alternate: Box::new(alternate),
		},
		Box::new(InMemoryHistory::new()),
		SelectionMemory::new(),
		100,
		40,
	)
	.expect("viable session")
}

fn open(primary: ListBackend, page_size: usize) -> Session {
	open_with(config(page_size), primary, ListBackend::lines(&[]))
}

fn names(session: &Session) -> Vec<String> {
	session
		.visible_items()
		.iter()
		.map(|item| item.display_name.clone())
		.collect()
}

#[test]
fn offset_session_stops_at_the_last_page() {
	let mut session = open(ListBackend::numbered(45), 20);
	session.next_page();
	session.next_page();
	assert_eq!(session.page_index(), 2);
	let last_page = names(&session);
	assert_eq!(last_page.len(), 5);

	session.next_page();
	assert_eq!(session.page_index(), 2);
	assert_eq!(names(&session), last_page);

	for _ in 0..5 {
		session.move_cursor(1);
	}
	assert_eq!(session.page_index(), 2);
	assert_eq!(session.cursor(), 5);
}

#[test]
fn empty_content_query_falls_back_to_file_suggestions() {
	let files = ListBackend::files(&["zzz-a.rs", "zzz-b.rs", "zzz-c.rs", "main.rs"]);
	let content = ListBackend::lines(&[("main.rs", 1, "fn main() {}")]);
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	let mut session = open_with(cfg, files, content);

	session.update_query("zzz");
	let suggestion = session.suggestion();
	assert!(suggestion.active);
	assert_eq!(suggestion.source, Some(BackendMode::Primary));
	assert_eq!(suggestion.items.len(), 3);
	assert_eq!(session.cursor(), 1);
	assert_eq!(session.render().scrollbar, None);
	assert!(session.status().suggestion);
}

#[test]
fn suggestion_commits_use_the_source_backend() {
	let files = ListBackend::files(&["zzz-a.rs"]);
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	cfg.initial_query = "zzz".into();
	let mut session = open_with(cfg, files, ListBackend::lines(&[]));

	let commit = session
		.commit_selection(CommitAction::Open)
		.expect("active")
		.expect("something to commit");
	assert_eq!(
		commit.targets,
		vec![CommitTarget::File {
			path: "/repo/zzz-a.rs".into()
		}]
	);
}

#[test]
fn suggestions_clear_on_the_next_query() {
	let files = ListBackend::files(&["zzz-a.rs"]);
	let content = ListBackend::lines(&[("main.rs", 1, "fn main() {}")]);
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	cfg.initial_query = "zzz".into();
	let mut session = open_with(cfg, files, content);
	assert!(session.suggestion().active);

	session.update_query("main");
	assert!(!session.suggestion().active);
	assert_eq!(names(&session), ["main.rs:1:1"]);
}

#[test]
fn rapid_cursor_moves_fetch_one_preview() {
	let mut cfg = config(10);
	cfg.layout.show_preview = true;
	cfg.layout.preview_position = PreviewPosition::Right;
	cfg.preview_delay = Duration::from_millis(100);
	let mut session = open_with(cfg, ListBackend::numbered(5), ListBackend::lines(&[]));
	let mut sink = PreviewLog::default();
	let start = Instant::now();

	session.tick(start, &mut sink);
	assert_eq!(sink.shown, ["/repo/file-01"]);

	session.move_cursor(1);
	session.tick(start + Duration::from_millis(10), &mut sink);
	session.move_cursor(1);
	session.tick(start + Duration::from_millis(40), &mut sink);
	session.tick(start + Duration::from_millis(100), &mut sink);
	assert_eq!(sink.shown.len(), 1);

	session.tick(start + Duration::from_millis(140), &mut sink);
	assert_eq!(sink.shown, ["/repo/file-01", "/repo/file-03"]);
}

#[test]
fn hidden_preview_is_never_fed() {
	let mut session = open(ListBackend::numbered(3), 10);
	let mut sink = PreviewLog::default();
	session.tick(Instant::now(), &mut sink);
	assert!(sink.shown.is_empty());
	assert_eq!(sink.clears, 0);
}

#[test]
fn resize_keeps_state_or_closes_when_too_small() {
	let mut session = open(ListBackend::numbered(30), 10);
	session.update_query("file");
	session.move_cursor(1);
	session.move_cursor(1);

	assert_eq!(session.handle_resize(80, 7), Ok(()));
	assert_eq!(session.geometry().list_height(), 3);
	assert_eq!(session.cursor(), 3);
	assert_eq!(session.query(), "file");
	assert!(session.is_active());

	assert_eq!(
		session.handle_resize(80, 6),
		Err(SessionError::NonViableGeometry {
			width: 80,
			height: 6
		})
	);
	assert!(!session.is_active());
}

#[test]
fn opening_in_a_tiny_terminal_fails() {
	let result = Session::open(
		config(10),
		Backends {
			primary: Box::new(ListBackend::numbered(3)),
			alternate: Box::new(ListBackend::lines(&[])),
		},
		Box::new(InMemoryHistory::new()),
		SelectionMemory::new(),
		80,
		4,
	);
	assert!(matches!(
		result,
		Err(SessionError::NonViableGeometry { .. })
	));
}

#[test]
fn combo_hides_for_the_rest_of_the_query() {
	let backend = ListBackend::numbered(30);
	{
		let mut items = backend.items.borrow_mut();
		items[0].repeat_uses = 4;
		items[1].repeat_uses = 3;
	}
	let mut session = open(backend, 10);
	assert!(session.render().combo.is_some());

	for _ in 0..6 {
		session.move_cursor(1);
	}
	assert!(!session.combo().visible);
	for _ in 0..6 {
		session.move_cursor(-1);
		assert!(!session.combo().visible);
	}
	assert_eq!(session.cursor(), 1);
	assert!(session.render().combo.is_none());

	session.update_query("file");
	assert!(session.combo().visible);
	assert_eq!(session.combo().anchor, Some(1));
}

#[test]
fn cursor_is_clamped_when_a_refresh_shrinks_the_page() {
	let backend = Rc::new(ListBackend::numbered(10));
	let mut session = open_shared(&backend, 10);
	for _ in 0..9 {
		session.move_cursor(1);
	}
	assert_eq!(session.cursor(), 10);

	backend.items.borrow_mut().truncate(4);
	backend.scan.set(ScanProgress {
		is_scanning: true,
		scanned_count: 4,
	});
	session.tick(Instant::now(), &mut PreviewLog::default());

	assert_eq!(session.visible_items().len(), 4);
	assert_eq!(session.cursor(), 4);
	assert!(session.is_scanning());
}

#[test]
fn paging_backward_lands_on_the_last_item() {
	let mut session = open(ListBackend::numbered(25), 10);
	session.next_page();
	assert_eq!(session.cursor(), 1);
	session.move_cursor(-1);
	assert_eq!(session.page_index(), 0);
	assert_eq!(session.cursor(), 10);
}

#[test]
fn token_session_replays_previous_pages() {
	let lines: Vec<(String, usize)> = (1..=25).map(|n| (format!("f{n}.rs"), n)).collect();
	let lines: Vec<(&str, usize, &str)> = lines
		.iter()
		.map(|(path, line)| (path.as_str(), *line, "needle"))
		.collect();
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	cfg.initial_query = "needle".into();
	let mut session = open_with(cfg, ListBackend::files(&[]), ListBackend::lines(&lines));
	let first = names(&session);

	session.previous_page();
	assert_eq!(session.page_index(), 0);

	session.next_page();
	session.next_page();
	assert_eq!(session.page_index(), 2);
	assert_eq!(session.visible_items().len(), 5);
	assert_eq!(session.status().count, "~25");
	assert_eq!(session.status().page, None);

	session.previous_page();
	session.previous_page();
	assert_eq!(names(&session), first);
}

#[test]
fn prompt_below_inverts_vertical_movement() {
	let mut cfg = config(10);
	cfg.layout.prompt_position = PromptPosition::Bottom;
	let mut session = open_with(cfg, ListBackend::numbered(5), ListBackend::lines(&[]));

	session.move_cursor(-1);
	assert_eq!(session.cursor(), 2);
	session.move_cursor(1);
	assert_eq!(session.cursor(), 1);
}

#[test]
fn failed_page_fetch_keeps_the_page_and_warns() {
	let backend = Rc::new(ListBackend::numbered(25));
	let mut session = open_shared(&backend, 10);
	let before = names(&session);

	backend.fail.set(true);
	session.next_page();

	assert_eq!(session.page_index(), 0);
	assert_eq!(names(&session), before);
	assert!(session.notice().is_some_and(Notice::is_warning));
	assert!(session.is_active());
}

#[test]
fn literal_badge_clears_when_leaving_content_mode() {
	let mut content = ListBackend::lines(&[("a.rs", 1, "call(x)")]);
	content.fallback = true;
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	cfg.initial_query = "call(".into();
	let mut session = open_with(cfg, ListBackend::files(&["a.rs"]), content);
	assert!(session.status().literal);

	session.toggle_mode();
	assert_eq!(session.mode(), BackendMode::Primary);
	assert!(!session.status().literal);
}

#[test]
fn history_cycles_and_reports_absence() {
	let mut history = InMemoryHistory::new();
	history.push("older");
	history.push("newer");
	let mut session = Session::open(
		config(10),
		Backends {
			primary: Box::new(ListBackend::files(&["older.rs", "newer.rs"])),
			alternate: Box::new(ListBackend::lines(&[])),
		},
		Box::new(history),
		SelectionMemory::new(),
		100,
		40,
	)
	.expect("viable session");

	session.cycle_history();
	assert_eq!(session.query(), "newer");
	assert_eq!(names(&session), ["newer.rs"]);
	session.cycle_history();
	assert_eq!(session.query(), "older");
	session.cycle_history();
	assert_eq!(session.query(), "newer");

	let mut empty = open(ListBackend::numbered(1), 10);
	empty.cycle_history();
	assert_eq!(
		empty.notice(),
		Some(&Notice::Info("no query history".into()))
	);
}

#[test]
fn commit_takes_the_selection_in_pick_order() {
	let mut session = open(ListBackend::files(&["a.rs", "b.rs", "c.rs"]), 10);
	session.move_cursor(1);
	session.move_cursor(1);
	session.toggle_selection();
	session.move_cursor(-1);
	session.move_cursor(-1);
	session.toggle_selection();

	let commit = session
		.commit_selection(CommitAction::VerticalSplit)
		.expect("active")
		.expect("targets");
	assert_eq!(commit.action, CommitAction::VerticalSplit);
	let paths: Vec<&str> = commit.targets.iter().map(CommitTarget::path).collect();
	assert_eq!(paths, ["/repo/c.rs", "/repo/a.rs"]);
	assert_eq!(session.memory().uses("", "/repo/c.rs"), 1);
	assert!(!session.is_active());
}

#[test]
fn content_commits_carry_locations() {
	let mut cfg = config(10);
	cfg.initial_mode = BackendMode::Alternate;
	cfg.initial_query = "main".into();
	let content = ListBackend::lines(&[("src/main.rs", 7, "fn main() {}")]);
	let mut session = open_with(cfg, ListBackend::files(&[]), content);

	let commit = session
		.commit_selection(CommitAction::Split)
		.expect("active")
		.expect("targets");
	assert_eq!(
		commit.targets,
		vec![CommitTarget::Location {
			path: "/repo/src/main.rs".into(),
			line: 7,
			column: 1,
		}]
	);
}

#[test]
fn external_list_takes_the_page_without_a_selection() {
	let mut session = open(ListBackend::numbered(4), 10);
	let entries = session
		.send_all_selected_to_external_list()
		.expect("active");
	assert_eq!(entries.len(), 4);
	assert!(!session.is_active());
}

#[test]
fn closed_session_ignores_input() {
	let mut session = open(ListBackend::numbered(4), 10);
	session.close();
	session.move_cursor(1);
	session.update_query("x");

	assert_eq!(session.cursor(), 1);
	assert_eq!(session.query(), "");
	assert_eq!(session.handle_resize(100, 40), Err(SessionError::Inactive));
	assert_eq!(
		session.commit_selection(CommitAction::Open),
		Err(SessionError::Inactive)
	);
}

#[test]
fn present_writes_one_line_per_list_row() {
	let mut session = open(ListBackend::numbered(45), 20);
	session.update_query("file");
	let mut surface = RecordingSurface::default();
	session.present(&mut surface, 4);

	let geometry = surface.panels.expect("panels placed");
	assert_eq!(surface.list.len(), geometry.list_height());
	assert_eq!(surface.prompt, ["> file"]);
	assert_eq!(surface.cursor, Some((PanelKind::Prompt, 0, 6)));
	assert!(surface.scrollbar.is_some());
	assert!(!surface.ranges.is_empty());
	let status = surface.status.expect("status shown");
	assert_eq!(status.count, "45");
	assert_eq!(status.page.as_deref(), Some("1/3"));
}

fn open_backends(page_size: usize, backends: Backends, memory: SelectionMemory) -> Session {
	Session::open(
		config(page_size),
		backends,
		Box::new(InMemoryHistory::new()),
		memory,
		100,
		40,
	)
	.expect("viable session")
}

fn open_files(index: &FileIndex, memory: SelectionMemory) -> Session {
	open_backends(
		10,
		Backends {
			primary: Box::new(FileBackend::new(index.clone())),
			alternate: Box::new(ListBackend::lines(&[])),
		},
		memory,
	)
}

#[test]
fn commits_feed_ranking_and_the_combo_in_later_sessions() {
	let index = FileIndex::from_entries("/repo", &["a.rs", "b.rs", "c.rs"]);

	let mut session = open_files(&index, SelectionMemory::new());
	assert_eq!(names(&session), ["a.rs", "b.rs", "c.rs"]);
	session.move_cursor(1);
	session
		.commit_selection(CommitAction::Open)
		.expect("active")
		.expect("target");
	let memory = session.memory().clone();
	assert_eq!(memory.uses("", "/repo/b.rs"), 1);

	let mut session = open_files(&index, memory);
	assert_eq!(names(&session), ["b.rs", "a.rs", "c.rs"]);
	assert_eq!(session.visible_items()[0].repeat_uses, 1);
	assert!(session.render().combo.is_none());
	session
		.commit_selection(CommitAction::Open)
		.expect("active")
		.expect("target");
	let memory = session.memory().clone();

	let session = open_files(&index, memory);
	let top = &session.visible_items()[0];
	assert_eq!(top.display_name, "b.rs");
	assert_eq!(top.repeat_uses, 2);
	assert_eq!(top.score, 200);
	let combo = session.render().combo.expect("combo for a twice-picked file");
	assert_eq!((combo.len, combo.uses), (1, 2));
}

#[test]
fn failed_query_keeps_the_previous_results() {
	let backend = Rc::new(ListBackend::numbered(25));
	let mut session = open_shared(&backend, 10);
	session.update_query("file-0");
	session.move_cursor(1);
	session.move_cursor(1);
	let before = names(&session);

	backend.fail.set(true);
	session.update_query("file-1");
	assert_eq!(session.query(), "file-1");
	assert_eq!(names(&session), before);
	assert_eq!(session.cursor(), 3);
	assert!(session.notice().is_some_and(Notice::is_warning));

	backend.fail.set(false);
	let commit = session
		.commit_selection(CommitAction::Open)
		.expect("active")
		.expect("target");
	assert_eq!(commit.query, "file-0");
	assert_eq!(commit.targets[0].path(), "/repo/file-03");
	assert_eq!(session.memory().uses("file-0", "/repo/file-03"), 1);
	assert_eq!(session.memory().uses("file-1", "/repo/file-03"), 0);
}

#[test]
fn failed_mode_switch_stays_in_the_current_mode() {
	let content = Rc::new(ListBackend::lines(&[("a.rs", 1, "fn a() {}")]));
	let mut session = open_backends(
		10,
		Backends {
			primary: Box::new(ListBackend::files(&["a.rs", "b.rs"])),
			alternate: Box::new(Shared(Rc::clone(&content))),
		},
		SelectionMemory::new(),
	);
	session.toggle_selection();

	content.fail.set(true);
	session.toggle_mode();
	assert_eq!(session.mode(), BackendMode::Primary);
	assert_eq!(names(&session), ["a.rs", "b.rs"]);
	assert_eq!(session.selection().len(), 1);
	assert!(session.notice().is_some_and(Notice::is_warning));
}

#[test]
fn scan_refresh_keeps_a_backend_warning() {
	let backend = Rc::new(ListBackend::numbered(25));
	let mut session = open_shared(&backend, 10);
	backend.fail.set(true);
	session.next_page();
	assert!(session.notice().is_some_and(Notice::is_warning));

	backend.fail.set(false);
	backend.scan.set(ScanProgress {
		is_scanning: true,
		scanned_count: 30,
	});
	session.tick(Instant::now(), &mut PreviewLog::default());
	assert!(session.is_scanning());
	assert!(session.notice().is_some_and(Notice::is_warning));

	session.update_query("file");
	assert_eq!(session.notice(), None);
}

#[test]
fn switching_backends_restarts_scan_polling() {
	let content = Rc::new(ListBackend::lines(&[("a.rs", 1, "needle")]));
	let mut session = open_backends(
		10,
		Backends {
			primary: Box::new(ListBackend::numbered(3)),
			alternate: Box::new(Shared(Rc::clone(&content))),
		},
		SelectionMemory::new(),
	);
	let start = Instant::now();
	session.tick(start, &mut PreviewLog::default());
	assert!(!session.is_scanning());

	content.scan.set(ScanProgress {
		is_scanning: true,
		scanned_count: 1,
	});
	session.tick(start + Duration::from_millis(60), &mut PreviewLog::default());
	assert!(!session.is_scanning());

	session.toggle_mode();
	session.tick(start + Duration::from_millis(120), &mut PreviewLog::default());
	assert!(session.is_scanning());
}
