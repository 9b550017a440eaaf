//! Interfaces to the result-producing collaborators.
//!
//! A backend either supports random page access by offset (exact totals) or
//! hands out opaque continuation tokens (approximate totals). The pagination
//! controller only ever talks to the [`SearchBackend`] trait.

mod content;
mod error;
mod files;
mod index;
mod memory;

use serde::{Deserialize, Serialize};

pub use content::ContentBackend;
pub use error::BackendError;
pub use files::FileBackend;
pub use index::{FileEntry, FileIndex, IndexOptions};
pub use memory::SelectionMemory;

use crate::item::Item;

/// How a backend addresses pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingKind {
	/// Pages are addressable by index and totals are exact.
	Offset,
	/// Only forward continuation tokens are known.
	Token,
}

/// Opaque cursor returned by a token backend to resume a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
	/// The token that starts a scan from the beginning.
	#[must_use]
	pub fn origin() -> Self {
		Self(String::new())
	}

	#[must_use]
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[must_use]
	pub fn is_origin(&self) -> bool {
		self.0.is_empty()
	}
}

/// Where a fetch should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOrigin {
	/// Zero-based page index for offset backends.
	Offset(usize),
	/// Resume point for token backends.
	Token(ContinuationToken),
}

/// Number of matches known for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalCount {
	Exact(usize),
	/// Lower bound observed so far by a streaming backend.
	Approximate(usize),
}

impl TotalCount {
	#[must_use]
	pub const fn value(self) -> usize {
		match self {
			Self::Exact(count) | Self::Approximate(count) => count,
		}
	}

	#[must_use]
	pub const fn is_exact(self) -> bool {
		matches!(self, Self::Exact(_))
	}
}

impl Default for TotalCount {
	fn default() -> Self {
		Self::Exact(0)
	}
}

/// A single page returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
	pub items: Vec<Item>,
	pub total: TotalCount,
	/// `None` means the stream has no more pages.
	pub next: Option<ContinuationToken>,
	/// Set when an invalid pattern was retried as a literal.
	pub regex_fallback: bool,
}

impl SearchPage {
	#[must_use]
	pub fn empty(total: TotalCount) -> Self {
		Self {
			items: Vec::new(),
			total,
			next: None,
			regex_fallback: false,
		}
	}
}

/// Knobs passed to every search call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions<'a> {
	/// Commit history used to derive the repeat-use signal.
	pub memory: Option<&'a SelectionMemory>,
	/// Score added per repeat use of an item for the same query.
	pub boost_multiplier: u32,
}

/// Size information about the corpus behind a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendMetadata {
	pub total_files: usize,
	pub total_matched: usize,
}

/// Progress of a backend's background scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanProgress {
	pub is_scanning: bool,
	pub scanned_count: usize,
}

/// A result-producing collaborator.
pub trait SearchBackend {
	/// How this backend addresses pages.
	fn paging(&self) -> PagingKind;

	/// Fetch one page of at most `page_size` items.
	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError>;

	fn metadata(&self) -> BackendMetadata;

	fn scan_progress(&self) -> ScanProgress;
}

impl<B: SearchBackend + ?Sized> SearchBackend for Box<B> {
	fn paging(&self) -> PagingKind {
		(**self).paging()
	}

	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		(**self).search(query, origin, page_size, options)
	}

	fn metadata(&self) -> BackendMetadata {
		(**self).metadata()
	}

	fn scan_progress(&self) -> ScanProgress {
		(**self).scan_progress()
	}
}
