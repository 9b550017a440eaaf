//! Cycling through previously committed queries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a historical query could not be produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
	#[error("no query at history offset {0}")]
	Exhausted(usize),
	#[error("query history is unavailable: {0}")]
	Unavailable(String),
}

/// Source of past queries, newest at offset 0.
pub trait HistorySource {
	fn historical_query(&self, offset: usize) -> Result<String, HistoryError>;

	/// Remember a committed query. Read-only sources ignore this.
	fn record(&mut self, _query: &str) {}
}

/// Committed queries, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryHistory {
	entries: Vec<String>,
}

impl InMemoryHistory {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Remember `query`, moving a repeated query to the front.
	pub fn push(&mut self, query: &str) {
		let query = query.trim();
		if query.is_empty() {
			return;
		}
		self.entries.retain(|existing| existing != query);
		self.entries.insert(0, query.to_string());
	}

	/// Drop everything older than the newest `max` queries.
	pub fn truncate(&mut self, max: usize) {
		self.entries.truncate(max);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl HistorySource for InMemoryHistory {
	fn historical_query(&self, offset: usize) -> Result<String, HistoryError> {
		self.entries
			.get(offset)
			.cloned()
			.ok_or(HistoryError::Exhausted(offset))
	}

	fn record(&mut self, query: &str) {
		self.push(query);
	}
}

/// Result of stepping through history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStep {
	Query(String),
	/// There is no history at all.
	Empty,
}

/// Walks a [`HistorySource`] from newest to oldest, wrapping at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryCycler {
	offset: Option<usize>,
}

impl HistoryCycler {
	/// Step to the next older query, wrapping to the newest.
	pub fn advance(&mut self, source: &dyn HistorySource) -> Result<HistoryStep, HistoryError> {
		let candidate = self.offset.map_or(0, |offset| offset + 1);
		match source.historical_query(candidate) {
			Ok(query) => {
				self.offset = Some(candidate);
				Ok(HistoryStep::Query(query))
			}
			Err(HistoryError::Exhausted(_)) if candidate > 0 => {
				self.offset = None;
				self.advance(source)
			}
			Err(HistoryError::Exhausted(_)) => {
				self.offset = None;
				Ok(HistoryStep::Empty)
			}
			Err(error) => Err(error),
		}
	}

	/// Forget the position, e.g. after the user typed.
	pub fn reset(&mut self) {
		self.offset = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cycling_wraps_to_newest() {
		let mut history = InMemoryHistory::new();
		history.push("first");
		history.push("second");
		let mut cycler = HistoryCycler::default();

		let steps: Vec<HistoryStep> = (0..3)
			.map(|_| cycler.advance(&history).expect("advance"))
			.collect();
		assert_eq!(
			steps,
			vec![
				HistoryStep::Query("second".into()),
				HistoryStep::Query("first".into()),
				HistoryStep::Query("second".into()),
			]
		);
	}

	#[test]
	fn absent_history_is_reported_not_an_error() {
		let mut cycler = HistoryCycler::default();
		assert_eq!(
			cycler.advance(&InMemoryHistory::new()),
			Ok(HistoryStep::Empty)
		);
	}

	#[test]
	fn repeated_queries_move_to_front() {
		let mut history = InMemoryHistory::new();
		history.push("a");
		history.push("b");
		history.push("a ");
		assert_eq!(history.len(), 2);
		assert_eq!(history.historical_query(0), Ok("a".to_string()));

		history.truncate(1);
		assert_eq!(history.historical_query(1), Err(HistoryError::Exhausted(1)));
	}

	struct Broken;

	impl HistorySource for Broken {
		fn historical_query(&self, _offset: usize) -> Result<String, HistoryError> {
			Err(HistoryError::Unavailable("locked".into()))
		}
	}

	#[test]
	fn unavailable_history_propagates() {
		let mut cycler = HistoryCycler::default();
		assert!(matches!(
			cycler.advance(&Broken),
			Err(HistoryError::Unavailable(_))
		));
	}
}
