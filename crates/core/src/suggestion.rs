//! Cross-backend fallback for queries that match nothing.

use tracing::debug;

use crate::backend::{BackendError, PageOrigin, PagingKind, SearchBackend, SearchOptions};
use crate::item::{BackendMode, Item, Query};

/// Default number of items requested from the alternate backend.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 15;

/// Substitute results from the other backend after an empty primary query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionState {
	pub active: bool,
	/// Backend that produced `items`; drives commit semantics.
	pub source: Option<BackendMode>,
	pub items: Vec<Item>,
}

impl SuggestionState {
	#[must_use]
	pub fn inactive() -> Self {
		Self::default()
	}

	/// Whether a fallback query should run for this outcome.
	#[must_use]
	pub fn should_evaluate(query: &Query, primary_results: usize) -> bool {
		primary_results == 0 && !query.is_blank()
	}

	/// Query `alternate` once with a bounded page and keep its items if any.
	///
	/// `alternate` must be the backend for `query.mode.other()`.
	pub fn evaluate(
		query: &Query,
		primary_results: usize,
		alternate: &dyn SearchBackend,
		options: &SearchOptions<'_>,
		limit: usize,
	) -> Result<Self, BackendError> {
		if !Self::should_evaluate(query, primary_results) || limit == 0 {
			return Ok(Self::inactive());
		}

		let origin = match alternate.paging() {
			PagingKind::Offset => PageOrigin::Offset(0),
			PagingKind::Token => PageOrigin::Token(crate::backend::ContinuationToken::origin()),
		};
		let mut page = alternate.search(&query.text, &origin, limit, options)?;
		page.items.truncate(limit);
		if page.items.is_empty() {
			return Ok(Self::inactive());
		}

		let source = query.mode.other();
		debug!(
			query = %query.text,
			source = source.label(),
			items = page.items.len(),
			"showing suggestions"
		);
		Ok(Self {
			active: true,
			source: Some(source),
			items: page.items,
		})
	}
}
