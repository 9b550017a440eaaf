use std::cell::{Cell, RefCell};

use super::*;
use crate::backend::{
	BackendMetadata, ContinuationToken, PagingKind, ScanProgress, SearchPage, TotalCount,
};
use crate::item::{BackendMode, Item};

/// Deterministic in-memory backend that can page either way.
struct VecBackend {
	items: RefCell<Vec<Item>>,
	paging: PagingKind,
	fail: Cell<bool>,
	fetches: Cell<usize>,
}

impl VecBackend {
	fn new(count: usize, paging: PagingKind) -> Self {
		Self {
			items: RefCell::new((0..count).map(|n| Item::new(format!("item-{n}"))).collect()),
			paging,
			fail: Cell::new(false),
			fetches: Cell::new(0),
		}
	}

	fn truncate(&self, len: usize) {
		self.items.borrow_mut().truncate(len);
	}
}

impl SearchBackend for VecBackend {
	fn paging(&self) -> PagingKind {
		self.paging
	}

	fn search(
		&self,
		_query: &str,
		origin: &PageOrigin,
		page_size: usize,
		_options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		self.fetches.set(self.fetches.get() + 1);
		if self.fail.get() {
			return Err(BackendError::search("vec", "boom"));
		}
		let items = self.items.borrow();
		let start = match origin {
			PageOrigin::Offset(page) => page * page_size,
			PageOrigin::Token(token) if token.is_origin() => 0,
			PageOrigin::Token(token) => token
				.as_str()
				.parse()
				.map_err(|_| BackendError::InvalidToken(token.as_str().into()))?,
		};
		let slice: Vec<Item> = items.iter().skip(start).take(page_size).cloned().collect();
		let end = start + slice.len();
		let (total, next) = match self.paging {
			PagingKind::Offset => (TotalCount::Exact(items.len()), None),
			PagingKind::Token => (
				TotalCount::Approximate(end),
				(end < items.len()).then(|| ContinuationToken::new(end.to_string())),
			),
		};
		Ok(SearchPage {
			items: slice,
			total,
			next,
			regex_fallback: false,
		})
	}

	fn metadata(&self) -> BackendMetadata {
		BackendMetadata::default()
	}

	fn scan_progress(&self) -> ScanProgress {
		ScanProgress::default()
	}
}

fn query(generation: u64) -> Query {
	Query::new("q", BackendMode::Primary, QueryGeneration(generation))
}

fn names(window: &PageWindow) -> Vec<String> {
	window
		.items
		.iter()
		.map(|item| item.identifier.clone())
		.collect()
}

fn opts() -> SearchOptions<'static> {
	SearchOptions::default()
}

#[test]
fn offset_next_is_noop_exactly_at_max_page_index() {
	let backend = VecBackend::new(45, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 20, &backend, &opts()).expect("reset");

	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Loaded);
	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Loaded);
	assert_eq!(controller.state().page_index, 2);
	assert_eq!(controller.window().len(), 5);

	let before = controller.window().clone();
	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Unchanged);
	assert_eq!(controller.window(), &before);
	assert_eq!(controller.state().page_index, 2);
	assert_eq!(controller.total_pages(), 3);
}

#[test]
fn offset_next_noop_on_single_or_empty_corpus() {
	for count in [0, 1, 20] {
		let backend = VecBackend::new(count, PagingKind::Offset);
		let mut controller = PaginationController::new(0);
		controller.reset(query(1), 20, &backend, &opts()).expect("reset");
		assert_eq!(
			controller.next(&backend, &opts()).expect("next"),
			PageTurn::Unchanged,
			"count {count}"
		);
		assert_eq!(controller.total_pages(), 1);
	}
}

#[test]
fn reset_with_no_results_is_an_empty_window() {
	let backend = VecBackend::new(0, PagingKind::Token);
	let mut controller = PaginationController::new(0);
	let window = controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	assert!(window.is_empty());
	assert_eq!(window.page_index, 0);
}

#[test]
fn zero_page_size_fails_every_operation() {
	let backend = VecBackend::new(5, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	assert!(matches!(
		controller.reset(query(1), 0, &backend, &opts()),
		Err(PaginationError::ZeroPageSize)
	));
	assert!(matches!(
		controller.next(&backend, &opts()),
		Err(PaginationError::ZeroPageSize)
	));
	assert!(matches!(
		controller.previous(&backend, &opts()),
		Err(PaginationError::ZeroPageSize)
	));
}

#[test]
fn token_previous_at_first_page_is_noop() {
	let backend = VecBackend::new(30, PagingKind::Token);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	let fetches = backend.fetches.get();

	assert_eq!(
		controller.previous(&backend, &opts()).expect("previous"),
		PageTurn::Unchanged
	);
	assert_eq!(backend.fetches.get(), fetches);
}

#[test]
fn token_next_then_previous_replays_the_same_items() {
	let backend = VecBackend::new(35, PagingKind::Token);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	let first = names(controller.window());

	controller.next(&backend, &opts()).expect("next");
	controller.next(&backend, &opts()).expect("next");
	let third = names(controller.window());
	controller.next(&backend, &opts()).expect("next");
	assert_eq!(controller.state().page_index, 3);
	assert_eq!(controller.window().len(), 5);

	controller.previous(&backend, &opts()).expect("previous");
	assert_eq!(names(controller.window()), third);
	controller.previous(&backend, &opts()).expect("previous");
	controller.previous(&backend, &opts()).expect("previous");
	assert_eq!(controller.state().page_index, 0);
	assert_eq!(names(controller.window()), first);
}

#[test]
fn token_next_stops_when_stream_has_no_continuation() {
	let backend = VecBackend::new(10, PagingKind::Token);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Unchanged);
}

#[test]
fn token_previous_without_recorded_continuation_fails_closed() {
	let backend = VecBackend::new(30, PagingKind::Token);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	controller.next(&backend, &opts()).expect("next");
	controller.next(&backend, &opts()).expect("next");

	if let PaginationStrategy::Token(chain) = controller.strategy_mut() {
		chain.forget(1);
	}
	let before = controller.window().clone();
	assert_eq!(
		controller.previous(&backend, &opts()).expect("previous"),
		PageTurn::Unchanged
	);
	assert_eq!(controller.window(), &before);
}

#[test]
fn failed_fetch_keeps_last_known_good_page() {
	let backend = VecBackend::new(30, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	let before = controller.window().clone();

	backend.fail.set(true);
	assert!(matches!(
		controller.next(&backend, &opts()),
		Err(PaginationError::Backend(_))
	));
	assert!(controller.reset(query(2), 10, &backend, &opts()).is_err());
	assert_eq!(controller.window(), &before);
	assert_eq!(controller.state().page_index, 0);
	assert!(controller.is_current(QueryGeneration(1)));
}

#[test]
fn totals_refresh_from_each_fetch() {
	let backend = VecBackend::new(30, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	assert_eq!(controller.state().total_matched, 30);

	backend.truncate(12);
	controller.next(&backend, &opts()).expect("next");
	assert_eq!(controller.state().total_matched, 12);
	assert_eq!(controller.window().len(), 2);
	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Unchanged);
}

#[test]
fn forward_page_that_vanished_leaves_window_in_place() {
	let backend = VecBackend::new(30, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");
	let before = controller.window().clone();

	backend.truncate(5);
	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Unchanged);
	assert_eq!(controller.window(), &before);
	assert_eq!(controller.state().total_matched, 5);
}

#[test]
fn prefetched_page_is_consumed_without_refetching() {
	let backend = VecBackend::new(30, PagingKind::Token);
	let mut controller = PaginationController::new(2);
	controller.reset(query(1), 10, &backend, &opts()).expect("reset");

	assert!(!controller.prefetch(5, &backend, &opts()).expect("prefetch"));
	assert!(controller.prefetch(8, &backend, &opts()).expect("prefetch"));
	assert!(!controller.prefetch(9, &backend, &opts()).expect("prefetch"));
	let fetches = backend.fetches.get();

	assert_eq!(controller.next(&backend, &opts()).expect("next"), PageTurn::Loaded);
	assert_eq!(backend.fetches.get(), fetches);
	assert_eq!(controller.window().items[0].identifier, "item-10");

	controller.previous(&backend, &opts()).expect("previous");
	assert_eq!(controller.window().items[0].identifier, "item-0");
}

#[test]
fn windows_carry_the_query_generation() {
	let backend = VecBackend::new(3, PagingKind::Offset);
	let mut controller = PaginationController::new(0);
	controller.reset(query(7), 10, &backend, &opts()).expect("reset");
	assert_eq!(controller.window().generation, QueryGeneration(7));
	assert!(controller.is_current(QueryGeneration(7)));
	assert!(!controller.is_current(QueryGeneration(6)));
}
