use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-query commit counts that feed the repeat-use signal.
///
/// Counts are keyed by the trimmed query text so that `foo` and `foo `
/// share history. Identifiers are the item identifiers backends hand out,
/// so counts survive across sessions when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMemory {
	counts: HashMap<String, HashMap<String, u32>>,
}

impl SelectionMemory {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Record that `identifier` was committed while `query` was active.
	pub fn record(&mut self, query: &str, identifier: &str) {
		let per_query = self.counts.entry(normalize(query)).or_default();
		*per_query.entry(identifier.to_string()).or_insert(0) += 1;
	}

	/// Number of commits of `identifier` for `query`.
	#[must_use]
	pub fn uses(&self, query: &str, identifier: &str) -> u32 {
		self.counts
			.get(&normalize(query))
			.and_then(|per_query| per_query.get(identifier))
			.copied()
			.unwrap_or(0)
	}
}

fn normalize(query: &str) -> String {
	query.trim().to_string()
}
