//! Repeat-use "combo" overlay.

use glint_core::Item;

/// Visibility of the combo header for the active query.
///
/// Starts visible with the anchor on the top-ranked item. Once the cursor
/// strays more than half a page from the anchor it is hidden until the next
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboState {
	pub visible: bool,
	pub anchor: Option<usize>,
}

impl ComboState {
	/// State for a freshly issued query.
	#[must_use]
	pub fn fresh() -> Self {
		Self {
			visible: true,
			anchor: Some(1),
		}
	}

	/// Track the cursor as an absolute 1-based rank across pages.
	pub fn observe(&mut self, cursor: usize, page_size: usize) {
		let Some(anchor) = self.anchor else {
			return;
		};
		if self.visible && cursor.abs_diff(anchor) > page_size / 2 {
			self.visible = false;
		}
	}

	pub fn suppress(&mut self) {
		self.visible = false;
	}
}

impl Default for ComboState {
	fn default() -> Self {
		Self::fresh()
	}
}

/// A detected run of repeat-use items at the top of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboRun {
	/// Index of the first item of the run.
	pub start: usize,
	pub len: usize,
	/// Repeat uses of the first item.
	pub uses: u32,
}

/// Finds the leading run of items the user keeps coming back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboDetector {
	pub enabled: bool,
	/// Minimum repeat uses for an item to join the run.
	pub min_uses: u32,
}

impl Default for ComboDetector {
	fn default() -> Self {
		Self {
			enabled: true,
			min_uses: 2,
		}
	}
}

impl ComboDetector {
	#[must_use]
	pub fn detect(&self, items: &[Item]) -> Option<ComboRun> {
		if !self.enabled {
			return None;
		}
		let min_uses = self.min_uses.max(1);
		let len = items
			.iter()
			.take_while(|item| item.repeat_uses >= min_uses)
			.count();
		(len > 0).then(|| ComboRun {
			start: 0,
			len,
			uses: items[0].repeat_uses,
		})
	}
}
