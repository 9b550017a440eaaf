//! What a session hands back to its caller when it ends.

use std::fmt;

use glint_core::{BackendMode, Item, Location};
use serde::Serialize;

/// How the caller should open committed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitAction {
	Open,
	Split,
	VerticalSplit,
	NewTab,
}

impl fmt::Display for CommitAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Open => "open",
			Self::Split => "split",
			Self::VerticalSplit => "vertical_split",
			Self::NewTab => "new_tab",
		})
	}
}

/// One committed item, shaped by the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommitTarget {
	/// Whole-file target from the file backend.
	File { path: String },
	/// Position inside a file from the content backend.
	Location {
		path: String,
		line: usize,
		column: usize,
	},
}

impl CommitTarget {
	/// Route `item` through the semantics of `source`.
	#[must_use]
	pub fn for_item(item: &Item, source: BackendMode) -> Self {
		match source {
			BackendMode::Primary => Self::File {
				path: item.identifier.clone(),
			},
			BackendMode::Alternate => {
				let location = item.location.unwrap_or(Location::new(1, 1));
				Self::Location {
					path: item.identifier.clone(),
					line: location.line,
					column: location.column,
				}
			}
		}
	}

	#[must_use]
	pub fn path(&self) -> &str {
		match self {
			Self::File { path } | Self::Location { path, .. } => path,
		}
	}
}

impl fmt::Display for CommitTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::File { path } => f.write_str(path),
			Self::Location { path, line, column } => write!(f, "{path}:{line}:{column}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
	pub action: CommitAction,
	pub query: String,
	pub targets: Vec<CommitTarget>,
}

/// An entry for an external list such as a quickfix window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
	pub identifier: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Location>,
	pub text: String,
}

impl From<&Item> for ListEntry {
	fn from(item: &Item) -> Self {
		Self {
			identifier: item.identifier.clone(),
			location: item.location,
			text: item
				.detail
				.as_deref()
				.map_or_else(|| item.display_name.clone(), |detail| detail.trim().to_string()),
		}
	}
}

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
	Committed(Commit),
	ExternalList {
		query: String,
		entries: Vec<ListEntry>,
	},
	Cancelled {
		query: String,
	},
	/// The terminal became too small to render the list.
	Closed {
		reason: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn content_items_commit_as_locations() {
		let item = Item::new("/r/a.rs").with_location(Location::new(4, 2));
		assert_eq!(
			CommitTarget::for_item(&item, BackendMode::Alternate).to_string(),
			"/r/a.rs:4:2"
		);
		assert_eq!(
			CommitTarget::for_item(&item, BackendMode::Primary),
			CommitTarget::File {
				path: "/r/a.rs".into()
			}
		);
	}

	#[test]
	fn list_entries_prefer_the_matched_line() {
		let item = Item::new("/r/a.rs")
			.with_display_name("a.rs:4:2")
			.with_detail("  let x = 1;");
		assert_eq!(ListEntry::from(&item).text, "let x = 1;");
		assert_eq!(ListEntry::from(&Item::new("/r/b.rs")).text, "/r/b.rs");
	}

	#[test]
	fn outcomes_serialize_with_a_tag() {
		let outcome = SessionOutcome::Cancelled {
			query: "main".into(),
		};
		let json = serde_json::to_string(&outcome).expect("serialize");
		assert_eq!(json, r#"{"outcome":"cancelled","query":"main"}"#);
	}
}
