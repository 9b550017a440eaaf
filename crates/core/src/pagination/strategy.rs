use std::collections::BTreeMap;

use crate::backend::{
	BackendError, ContinuationToken, PageOrigin, PagingKind, SearchBackend, SearchOptions,
	SearchPage,
};

/// Highest reachable page index for an exact total, floored at zero.
#[must_use]
pub fn max_page_index(total_matched: usize, page_size: usize) -> usize {
	if page_size == 0 {
		return 0;
	}
	total_matched.div_ceil(page_size).saturating_sub(1)
}

/// Continuation tokens remembered for backward navigation on a token backend.
///
/// `chain[0]` is always the origin token. `chain[k + 1]` only exists once page
/// `k` was fetched and reported a continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChain {
	chain: BTreeMap<usize, ContinuationToken>,
	next: Option<ContinuationToken>,
}

impl Default for TokenChain {
	fn default() -> Self {
		Self {
			chain: BTreeMap::from([(0, ContinuationToken::origin())]),
			next: None,
		}
	}
}

impl TokenChain {
	#[must_use]
	pub fn token_for(&self, page_index: usize) -> Option<&ContinuationToken> {
		self.chain.get(&page_index)
	}

	/// Forward cursor; `None` once the stream reported no more pages.
	#[must_use]
	pub fn next(&self) -> Option<&ContinuationToken> {
		self.next.as_ref()
	}

	fn record(&mut self, page_index: usize, next: Option<ContinuationToken>) {
		let _stale = self.chain.split_off(&(page_index + 1));
		if let Some(token) = &next {
			self.chain.insert(page_index + 1, token.clone());
		}
		self.next = next;
	}

	fn forget_next(&mut self, page_index: usize) {
		self.record(page_index, None);
	}

	#[cfg(test)]
	pub(crate) fn forget(&mut self, page_index: usize) {
		self.chain.remove(&page_index);
	}
}

/// Backend paging model hidden behind one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationStrategy {
	/// Page `k` is always addressable as offset `k`.
	Offset,
	/// Pages are reachable only through remembered continuation tokens.
	Token(TokenChain),
}

impl PaginationStrategy {
	#[must_use]
	pub fn for_kind(kind: PagingKind) -> Self {
		match kind {
			PagingKind::Offset => Self::Offset,
			PagingKind::Token => Self::Token(TokenChain::default()),
		}
	}

	/// Origin that re-fetches `page_index`, if it is reachable.
	#[must_use]
	pub fn origin_for(&self, page_index: usize) -> Option<PageOrigin> {
		match self {
			Self::Offset => Some(PageOrigin::Offset(page_index)),
			Self::Token(chain) => chain.token_for(page_index).cloned().map(PageOrigin::Token),
		}
	}

	/// Origin of the page after `page_index`, or `None` at the end.
	#[must_use]
	pub fn forward_origin(
		&self,
		page_index: usize,
		total_matched: usize,
		page_size: usize,
	) -> Option<PageOrigin> {
		match self {
			Self::Offset => (page_index < max_page_index(total_matched, page_size))
				.then_some(PageOrigin::Offset(page_index + 1)),
			Self::Token(chain) => chain.next().cloned().map(PageOrigin::Token),
		}
	}

	/// Fetch one page through `backend`.
	pub fn fetch_page(
		&self,
		backend: &dyn SearchBackend,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		backend.search(query, origin, page_size, options)
	}

	/// Remember what a successful fetch of `page_index` reported.
	pub fn record(&mut self, page_index: usize, page: &SearchPage) {
		if let Self::Token(chain) = self {
			chain.record(page_index, page.next.clone());
		}
	}

	/// Mark the stream as exhausted after `page_index`.
	pub fn exhaust(&mut self, page_index: usize) {
		if let Self::Token(chain) = self {
			chain.forget_next(page_index);
		}
	}

	#[must_use]
	pub fn kind(&self) -> PagingKind {
		match self {
			Self::Offset => PagingKind::Offset,
			Self::Token(_) => PagingKind::Token,
		}
	}
}
