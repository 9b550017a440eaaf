//! Ranked file-path search with exact totals and offset paging.

use std::cmp::Reverse;

use frizbee::{Config, match_list};
use tracing::debug;

use super::{
	BackendError, BackendMetadata, FileEntry, FileIndex, PageOrigin, PagingKind, ScanProgress,
	SearchBackend, SearchOptions, SearchPage, TotalCount,
};
use crate::item::Item;

/// Datasets at least this large enable frizbee's prefilter.
const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// Number of paths scored per `match_list` call.
const MATCH_CHUNK_SIZE: usize = 512;

const BACKEND_NAME: &str = "file";

/// Builds fuzzy matching options for the provided query and dataset size.
fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		prefilter: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
		config.prefilter = true;
		config.max_typos = Some(allowed_typos);
	} else {
		config.max_typos = None;
	}
	config.sort = false;

	config
}

#[derive(Debug, Clone, Copy)]
struct Ranked {
	index: usize,
	score: i64,
	repeat_uses: u32,
}

/// The primary backend: fuzzy-ranks every indexed path and serves pages by
/// index.
#[derive(Debug, Clone)]
pub struct FileBackend {
	index: FileIndex,
}

impl FileBackend {
	#[must_use]
	pub fn new(index: FileIndex) -> Self {
		Self { index }
	}

	fn rank(&self, files: &[FileEntry], query: &str, options: &SearchOptions<'_>) -> Vec<Ranked> {
		let trimmed = query.trim();
		let uses = |entry: &FileEntry| {
			options
				.memory
				.map(|memory| memory.uses(trimmed, &entry.identifier()))
				.unwrap_or(0)
		};
		let boost = |repeat_uses: u32| i64::from(repeat_uses) * i64::from(options.boost_multiplier);

		if trimmed.is_empty() {
			let mut ranked: Vec<Ranked> = files
				.iter()
				.enumerate()
				.map(|(index, entry)| {
					let repeat_uses = uses(entry);
					Ranked {
						index,
						score: boost(repeat_uses),
						repeat_uses,
					}
				})
				.collect();
			ranked.sort_by(|a, b| {
				b.score
					.cmp(&a.score)
					.then_with(|| files[a.index].relative.cmp(&files[b.index].relative))
			});
			return ranked;
		}

		let config = config_for_query(trimmed, files.len());
		let mut ranked = Vec::new();
		let mut haystacks: Vec<&str> = Vec::with_capacity(MATCH_CHUNK_SIZE);
		for (chunk_index, chunk) in files.chunks(MATCH_CHUNK_SIZE).enumerate() {
			haystacks.clear();
			haystacks.extend(chunk.iter().map(|entry| entry.relative.as_str()));
			let offset = chunk_index * MATCH_CHUNK_SIZE;
			for entry in match_list(trimmed, &haystacks, &config) {
				if entry.score == 0 {
					continue;
				}
				let index = offset + entry.index as usize;
				let repeat_uses = uses(&files[index]);
				ranked.push(Ranked {
					index,
					score: i64::from(entry.score) + boost(repeat_uses),
					repeat_uses,
				});
			}
		}
		ranked.sort_by_key(|ranked| (Reverse(ranked.score), ranked.index));
		ranked
	}
}

impl SearchBackend for FileBackend {
	fn paging(&self) -> PagingKind {
		PagingKind::Offset
	}

	fn search(
		&self,
		query: &str,
		origin: &PageOrigin,
		page_size: usize,
		options: &SearchOptions<'_>,
	) -> Result<SearchPage, BackendError> {
		let PageOrigin::Offset(page_index) = origin else {
			return Err(BackendError::UnsupportedOrigin {
				backend: BACKEND_NAME,
				origin: "token",
			});
		};
		if page_size == 0 {
			return Err(BackendError::search(BACKEND_NAME, "page size must be positive"));
		}

		let files = self.index.files();
		let ranked = self.rank(&files, query, options);
		let total = ranked.len();
		let start = page_index.saturating_mul(page_size);
		let items: Vec<Item> = ranked
			.iter()
			.skip(start)
			.take(page_size)
			.map(|ranked| {
				let entry = &files[ranked.index];
				Item::new(entry.identifier())
					.with_display_name(entry.relative.clone())
					.with_score(ranked.score)
					.with_repeat_uses(ranked.repeat_uses)
					.binary(entry.is_binary)
			})
			.collect();

		debug!(query, page_index, total, returned = items.len(), "file search");
		Ok(SearchPage {
			items,
			total: TotalCount::Exact(total),
			next: None,
			regex_fallback: false,
		})
	}

	fn metadata(&self) -> BackendMetadata {
		let total_files = self.index.len();
		BackendMetadata {
			total_files,
			total_matched: total_files,
		}
	}

	fn scan_progress(&self) -> ScanProgress {
		self.index.progress()
	}
}
