//! Scrollbar thumb geometry.

/// Position of the scrollbar thumb inside the list panel, in visual rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarThumb {
	pub start: usize,
	pub size: usize,
}

impl ScrollbarThumb {
	/// Place the thumb for `page_index` out of `total_pages`.
	///
	/// With `inverted` set, page 0 sits at the bottom of the panel so the thumb
	/// tracks the same edge as the best results. Returns `None` when the
	/// panel has no rows.
	#[must_use]
	pub fn compute(
		panel_height: usize,
		total_pages: usize,
		page_index: usize,
		inverted: bool,
	) -> Option<Self> {
		if panel_height == 0 {
			return None;
		}
		let total_pages = total_pages.max(1);
		let last_page = total_pages - 1;
		let page_index = page_index.min(last_page);
		let size = (panel_height / total_pages).clamp(1, panel_height);
		let travel = panel_height - size;
		let step = if inverted {
			last_page - page_index
		} else {
			page_index
		};
		let start = step * travel / last_page.max(1);
		Some(Self { start, size })
	}

	/// Whether visual row `row` is covered by the thumb.
	#[must_use]
	pub fn covers(&self, row: usize) -> bool {
		row >= self.start && row < self.start + self.size
	}
}
