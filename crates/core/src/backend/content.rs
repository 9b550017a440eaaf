//! Streaming line search across the file index, paged by continuation token.

use std::fs;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::{
	BackendError, BackendMetadata, ContinuationToken, FileIndex, PageOrigin, PagingKind,
	ScanProgress, SearchBackend, SearchOptions, SearchPage, TotalCount,
};
use crate::item::{Item, Location};

/// Files larger than this are not scanned.
const MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

/// Longest matched line kept as item detail.
const MAX_DETAIL_CHARS: usize = 240;

const BACKEND_NAME: &str = "content";

/// Resume position encoded inside a [`ContinuationToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
	file: usize,
	line: usize,
	seen: usize,
}

impl Cursor {
	fn decode(token: &ContinuationToken) -> Result<Self, BackendError> {
		if token.is_origin() {
			return Ok(Self::default());
		}
		let invalid = || BackendError::InvalidToken(token.as_str().to_string());
		let mut parts = token.as_str().split(':');
		let mut field = || -> Result<usize, BackendError> {
			parts
				.next()
				.and_then(|part| part.parse().ok())
				.ok_or_else(invalid)
		};
		let cursor = Self {
			file: field()?,
			line: field()?,
			seen: field()?,
		};
		Ok(cursor)
	}

	fn encode(self) -> ContinuationToken {
		ContinuationToken::new(format!("{}:{}:{}", self.file, self.line, self.seen))
	}
}

/// Compile `query` as a smart-case pattern, retrying as a literal when the
/// pattern is invalid. The flag reports whether the literal retry happened.
fn compile_pattern(query: &str) -> Result<(Regex, bool), BackendError> {
	let case_insensitive = !query.chars().any(char::is_uppercase);
	let build = |pattern: &str| {
		RegexBuilder::new(pattern)
			.case_insensitive(case_insensitive)
			.build()
	};

	match build(query) {
		Ok(regex) => Ok((regex, false)),
		Err(error) => {
			warn!(query, %error, "invalid pattern, falling back to literal match");
			build(&regex::escape(query))
				.map(|regex| (regex, true))
				.map_err(|error| BackendError::search(BACKEND_NAME, error.to_string()))
		}
	}
}

fn read_text(path: &std::path::Path) -> Option<String> {
	let metadata = fs::metadata(path).ok()?;
	if metadata.len() > MAX_FILE_BYTES {
		return None;
	}
	let bytes = fs::read(path).ok()?;
	if bytes.contains(&0) {
		return None;
	}
	String::from_utf8(bytes).ok()
}

fn truncate_detail(line: &str) -> String {
	let trimmed = line.trim();
	if trimmed.chars().count() <= MAX_DETAIL_CHARS {
		return trimmed.to_string();
	}
	trimmed.chars().take(MAX_DETAIL_CHARS).collect()
}

/// The alternate backend: scans file contents in index order and hands back
/// a token to continue from the last hit.
#[derive(Debug, Clone)]
pub struct ContentBackend {
	index: FileIndex,
}

impl ContentBackend {
	#[must_use]
	pub fn new(index: FileIndex) -> Self {
		Self { index }
	}
}

impl SearchBackend for ContentBackend {
	fn paging(&self) -> PagingKind {
		PagingKind::Token
	}

	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		_options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		let PageOrigin::Token(token) = origin else {
			return Err(BackendError::UnsupportedOrigin {
				backend: BACKEND_NAME,
				origin: "offset",
			});
		};
		let start = Cursor::decode(token)?;
		if query.trim().is_empty() || page_size == 0 {
			return Ok(SearchPage::empty(TotalCount::Approximate(start.seen)));
		}

		let (pattern, regex_fallback) = compile_pattern(query)?;
		let files = self.index.snapshot();
		let mut items = Vec::with_capacity(page_size);
		let mut seen = start.seen;
		let mut next = None;

		'files: for (file_index, entry) in files.iter().enumerate().skip(start.file) {
			if entry.is_binary {
				continue;
			}
			let Some(text) = read_text(&entry.path) else {
				continue;
			};
			let first_line = if file_index == start.file { start.line } else { 0 };

			for (line_index, line) in text.lines().enumerate().skip(first_line) {
				let Some(found) = pattern.find(line) else {
					continue;
				};
				seen += 1;
				let location = Location::new(line_index + 1, line[..found.start()].chars().count() + 1);
				let score = i64::try_from(seen).map(|seen| -seen).unwrap_or(i64::MIN);
				items.push(
					Item::new(entry.identifier())
						.with_display_name(format!(
							"{}:{}:{}",
							entry.relative, location.line, location.column
						))
						.with_location(location)
						.with_score(score)
						.with_detail(truncate_detail(line)),
				);

				if items.len() == page_size {
					next = Some(
						Cursor {
							file: file_index,
							line: line_index + 1,
							seen,
						}
						.encode(),
					);
					break 'files;
				}
			}
		}

		debug!(
			query,
			returned = items.len(),
			seen,
			more = next.is_some(),
			"content search"
		);
		Ok(SearchPage {
			items,
			total: TotalCount::Approximate(seen),
			next,
			regex_fallback,
		})
	}

	fn metadata(&self) -> BackendMetadata {
		BackendMetadata {
			total_files: self.index.len(),
			total_matched: 0,
		}
	}

	fn scan_progress(&self) -> ScanProgress {
		self.index.progress()
	}
}
