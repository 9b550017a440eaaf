//! Multi-select bookkeeping.

use glint_core::{Item, Location};
use indexmap::IndexMap;

/// Identity of a selected item; content matches differ by location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
	pub identifier: String,
	pub location: Option<Location>,
}

impl From<&Item> for SelectionKey {
	fn from(item: &Item) -> Self {
		Self {
			identifier: item.identifier.clone(),
			location: item.location,
		}
	}
}

/// Selected items in the order they were picked.
#[derive(Debug, Clone, Default)]
pub struct Selection {
	entries: IndexMap<SelectionKey, Item>,
}

impl Selection {
	/// Add `item`, or remove it if already selected. Returns whether it is
	/// selected afterwards.
	pub fn toggle(&mut self, item: &Item) -> bool {
		let key = SelectionKey::from(item);
		if self.entries.shift_remove(&key).is_some() {
			return false;
		}
		self.entries.insert(key, item.clone());
		true
	}

	#[must_use]
	pub fn contains(&self, item: &Item) -> bool {
		self.entries.contains_key(&SelectionKey::from(item))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn items(&self) -> impl Iterator<Item = &Item> {
		self.entries.values()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
