use serde::{Deserialize, Serialize};

/// A 1-based line and column inside a result's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
	pub line: usize,
	pub column: usize,
}

impl Location {
	#[must_use]
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

/// A single result record returned by a backend.
///
/// Items are produced by backends and never modified afterwards; the engine
/// only reads them while paging, rendering and committing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
	/// Stable identity of the result, typically a path.
	pub identifier: String,
	/// Text shown in the result list.
	pub display_name: String,
	/// Position inside the content, present for content-search hits.
	pub location: Option<Location>,
	/// Backend-defined ordering key. Higher ranks first.
	pub score: i64,
	/// Whether the underlying content is binary.
	pub is_binary: bool,
	/// How often this item was committed for the current query text.
	pub repeat_uses: u32,
	/// Matched line text for content hits.
	pub detail: Option<String>,
}

impl Item {
	/// Build an item whose display name equals its identifier.
	#[must_use]
	pub fn new(identifier: impl Into<String>) -> Self {
		let identifier = identifier.into();
		Self {
			display_name: identifier.clone(),
			identifier,
			location: None,
			score: 0,
			is_binary: false,
			repeat_uses: 0,
			detail: None,
		}
	}

	#[must_use]
	pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
		self.display_name = name.into();
		self
	}

	#[must_use]
	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	#[must_use]
	pub fn with_score(mut self, score: i64) -> Self {
		self.score = score;
		self
	}

	#[must_use]
	pub fn with_repeat_uses(mut self, uses: u32) -> Self {
		self.repeat_uses = uses;
		self
	}

	#[must_use]
	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}

	#[must_use]
	pub fn binary(mut self, is_binary: bool) -> Self {
		self.is_binary = is_binary;
		self
	}
}

/// Which backend a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
	/// Ranked file search with exact totals.
	#[default]
	Primary,
	/// Streaming content search with continuation tokens.
	Alternate,
}

impl BackendMode {
	/// The other backend, used for suggestions.
	#[must_use]
	pub const fn other(self) -> Self {
		match self {
			Self::Primary => Self::Alternate,
			Self::Alternate => Self::Primary,
		}
	}

	#[must_use]
	pub const fn label(self) -> &'static str {
		match self {
			Self::Primary => "files",
			Self::Alternate => "grep",
		}
	}
}

/// Monotonic stamp distinguishing successive queries of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QueryGeneration(pub u64);

impl QueryGeneration {
	#[must_use]
	pub const fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

/// A query is created for every input change and superseded, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
	pub text: String,
	pub mode: BackendMode,
	pub generation: QueryGeneration,
}

impl Query {
	#[must_use]
	pub fn new(text: impl Into<String>, mode: BackendMode, generation: QueryGeneration) -> Self {
		Self {
			text: text.into(),
			mode,
			generation,
		}
	}

	/// Whether the query has any non-whitespace text.
	#[must_use]
	pub fn is_blank(&self) -> bool {
		self.text.trim().is_empty()
	}
}
