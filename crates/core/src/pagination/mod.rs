//! The pagination controller.
//!
//! [`PaginationController`] owns the current [`PageWindow`] for a query and
//! exposes `reset`, `next` and `previous`. Offset and token backends differ
//! only in how a page origin is derived, which [`PaginationStrategy`] hides.

mod strategy;
#[cfg(test)]
mod tests;

use thiserror::Error;
use tracing::debug;

pub use strategy::{PaginationStrategy, TokenChain, max_page_index};

use crate::backend::{
	BackendError, PageOrigin, PagingKind, SearchBackend, SearchOptions, SearchPage, TotalCount,
};
use crate::item::{Item, Query, QueryGeneration};

/// Failures surfaced by page navigation.
#[derive(Debug, Error)]
pub enum PaginationError {
	#[error("page size must be greater than zero")]
	ZeroPageSize,
	#[error(transparent)]
	Backend(#[from] BackendError),
}

/// Outcome of a navigation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
	/// A new window replaced the previous one.
	Loaded,
	/// Nothing to navigate to; the window is untouched.
	Unchanged,
}

/// The materialized slice of results currently on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageWindow {
	pub items: Vec<Item>,
	pub page_index: usize,
	pub total: TotalCount,
	/// The backend retried an invalid pattern as a literal.
	pub regex_fallback: bool,
	/// Query generation this window was fetched for.
	pub generation: QueryGeneration,
}

impl PageWindow {
	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Item at a 1-based cursor position.
	#[must_use]
	pub fn item_at(&self, cursor: usize) -> Option<&Item> {
		cursor.checked_sub(1).and_then(|index| self.items.get(index))
	}
}

/// Paging bookkeeping for the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationState {
	pub page_size: usize,
	pub page_index: usize,
	pub total_matched: usize,
	pub prefetch_margin: usize,
}

#[derive(Debug)]
struct Prefetched {
	page_index: usize,
	page: SearchPage,
}

/// Owns the current page of a query and navigates between pages.
#[derive(Debug)]
pub struct PaginationController {
	state: PaginationState,
	strategy: PaginationStrategy,
	query: Option<Query>,
	window: PageWindow,
	prefetched: Option<Prefetched>,
}

impl PaginationController {
	#[must_use]
	pub fn new(prefetch_margin: usize) -> Self {
		Self {
			state: PaginationState {
				prefetch_margin,
				..PaginationState::default()
			},
			strategy: PaginationStrategy::Offset,
			query: None,
			window: PageWindow::default(),
			prefetched: None,
		}
	}

	#[must_use]
	pub fn window(&self) -> &PageWindow {
		&self.window
	}

	#[must_use]
	pub fn state(&self) -> PaginationState {
		self.state
	}

	#[must_use]
	pub fn query(&self) -> Option<&Query> {
		self.query.as_ref()
	}

	#[must_use]
	pub fn paging(&self) -> PagingKind {
		self.strategy.kind()
	}

	/// Number of pages for an exact total, at least one.
	#[must_use]
	pub fn total_pages(&self) -> usize {
		max_page_index(self.state.total_matched, self.state.page_size) + 1
	}

	/// Whether a window stamped with `generation` belongs to the active query.
	#[must_use]
	pub fn is_current(&self, generation: QueryGeneration) -> bool {
		self.query
			.as_ref()
			.is_some_and(|query| query.generation == generation)
	}

	/// Start a new query at page 0.
	///
	/// A backend returning no items yields an empty window, not an error. On
	/// failure the previous window and query stay in place.
	pub fn reset(
		&mut self,
		query: Query,
		page_size: usize,
		backend: &dyn SearchBackend,
		options: &SearchOptions<'_>,
	) -> Result<&PageWindow, PaginationError> {
		if page_size == 0 {
			return Err(PaginationError::ZeroPageSize);
		}

		let strategy = PaginationStrategy::for_kind(backend.paging());
		let origin = strategy
			.origin_for(0)
			.unwrap_or(PageOrigin::Offset(0));
		let page = strategy.fetch_page(backend, &query.text, &origin, page_size, options)?;

		debug!(
			query = %query.text,
			mode = query.mode.label(),
			items = page.items.len(),
			"pagination reset"
		);
		self.strategy = strategy;
		self.state.page_size = page_size;
		self.query = Some(query);
		self.prefetched = None;
		self.apply(0, page);
		Ok(&self.window)
	}

	/// Advance to the following page.
	pub fn next(
		&mut self,
		backend: &dyn SearchBackend,
		options: &SearchOptions<'_>,
	) -> Result<PageTurn, PaginationError> {
		if self.state.page_size == 0 {
			return Err(PaginationError::ZeroPageSize);
		}
		let Some(query) = self.query.as_ref() else {
			return Ok(PageTurn::Unchanged);
		};
		let current = self.state.page_index;
		let target = current + 1;
		let Some(origin) = self.strategy.forward_origin(
			current,
			self.state.total_matched,
			self.state.page_size,
		) else {
			return Ok(PageTurn::Unchanged);
		};

		let page = match self.prefetched.take() {
			Some(prefetched) if prefetched.page_index == target => prefetched.page,
			_ => self.strategy.fetch_page(
				backend,
				&query.text,
				&origin,
				self.state.page_size,
				options,
			)?,
		};

		if page.items.is_empty() {
			// The corpus shrank or the stream ran dry; stay on the current page.
			self.state.total_matched = page.total.value();
			self.strategy.exhaust(current);
			debug!(page = target, "forward page empty, staying put");
			return Ok(PageTurn::Unchanged);
		}

		self.apply(target, page);
		Ok(PageTurn::Loaded)
	}

	/// Go back one page. Fails closed when the page is not reachable.
	pub fn previous(
		&mut self,
		backend: &dyn SearchBackend,
		options: &SearchOptions<'_>,
	) -> Result<PageTurn, PaginationError> {
		if self.state.page_size == 0 {
			return Err(PaginationError::ZeroPageSize);
		}
		let Some(query) = self.query.as_ref() else {
			return Ok(PageTurn::Unchanged);
		};
		let Some(target) = self.state.page_index.checked_sub(1) else {
			return Ok(PageTurn::Unchanged);
		};
		let Some(origin) = self.strategy.origin_for(target) else {
			debug!(page = target, "no continuation recorded, previous page unreachable");
			return Ok(PageTurn::Unchanged);
		};

		let page =
			self.strategy
				.fetch_page(backend, &query.text, &origin, self.state.page_size, options)?;
		self.prefetched = None;
		self.apply(target, page);
		Ok(PageTurn::Loaded)
	}

	/// Fetch the following page ahead of time when `cursor` (1-based) is
	/// within the prefetch margin of the last item.
	pub fn prefetch(
		&mut self,
		cursor: usize,
		backend: &dyn SearchBackend,
		options: &SearchOptions<'_>,
	) -> Result<bool, PaginationError> {
		if self.state.page_size == 0 {
			return Err(PaginationError::ZeroPageSize);
		}
		let Some(query) = self.query.as_ref() else {
			return Ok(false);
		};
		let target = self.state.page_index + 1;
		if self.window.is_empty()
			|| cursor + self.state.prefetch_margin < self.window.len()
			|| self
				.prefetched
				.as_ref()
				.is_some_and(|prefetched| prefetched.page_index == target)
		{
			return Ok(false);
		}
		let Some(origin) = self.strategy.forward_origin(
			self.state.page_index,
			self.state.total_matched,
			self.state.page_size,
		) else {
			return Ok(false);
		};

		let page =
			self.strategy
				.fetch_page(backend, &query.text, &origin, self.state.page_size, options)?;
		debug!(page = target, items = page.items.len(), "prefetched page");
		self.prefetched = Some(Prefetched {
			page_index: target,
			page,
		});
		Ok(true)
	}

	fn apply(&mut self, page_index: usize, page: SearchPage) {
		self.state.page_index = page_index;
		self.state.total_matched = page.total.value();
		self.strategy.record(page_index, &page);
		let generation = self
			.query
			.as_ref()
			.map(|query| query.generation)
			.unwrap_or_default();
		self.window = PageWindow {
			items: page.items,
			page_index,
			total: page.total,
			regex_fallback: page.regex_fallback,
			generation,
		};
	}

	#[cfg(test)]
	pub(crate) fn strategy_mut(&mut self) -> &mut PaginationStrategy {
		&mut self.strategy
	}
}
