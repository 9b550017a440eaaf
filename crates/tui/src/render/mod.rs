//! The render pipeline.
//!
//! [`render_list`] turns the visible page, the cursor and the decorations
//! into exactly `panel_height` lines plus styled column ranges. It never
//! touches the terminal; the host maps [`StyleTag`]s to colors.

mod combo;
mod scrollbar;

use glint_core::{BackendMode, Item, PagingKind};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub use combo::{ComboDetector, ComboRun, ComboState};
pub use scrollbar::ScrollbarThumb;

use crate::layout::PromptPosition;
use crate::selection::Selection;

/// Shown for the content backend before anything was typed.
pub const HELP_LINES: [&str; 3] = [
	"Type to search file contents.",
	"Invalid regular expressions are matched literally.",
	"Ctrl-G switches between files and grep.",
];
pub const NO_RESULTS: &str = "No results";

const CURSOR_MARK: char = '>';
const SELECTED_MARK: char = '+';
const ELLIPSIS: char = '…';

/// Semantic style of a range; the theme decides the colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
	Cursor,
	Selected,
	Combo,
	ComboHeader,
	SuggestionHeader,
	Detail,
	Score,
	Empty,
	Help,
}

/// A styled span of display columns `[start, end)` on one visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRange {
	pub row: usize,
	pub start: usize,
	pub end: usize,
	pub tag: StyleTag,
}

/// Output of [`render_list`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedList {
	/// Exactly one entry per panel row, top to bottom.
	pub lines: Vec<String>,
	pub ranges: Vec<StyledRange>,
	/// Visual row of the highlighted item.
	pub cursor_row: Option<usize>,
	pub scrollbar: Option<ScrollbarThumb>,
	/// Combo run that was drawn, if any.
	pub combo: Option<ComboRun>,
}

/// Everything the pipeline needs to draw the list panel.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
	pub items: &'a [Item],
	/// 1-based cursor into `items`.
	pub cursor: usize,
	pub page_index: usize,
	pub total_pages: usize,
	pub exact_total: bool,
	pub paging: PagingKind,
	pub mode: BackendMode,
	pub query_blank: bool,
	/// Source backend when `items` are suggestions.
	pub suggestion: Option<BackendMode>,
	pub combo: ComboState,
	pub combo_detector: ComboDetector,
	pub selection: &'a Selection,
	pub prompt_position: PromptPosition,
	pub panel_height: usize,
	pub panel_width: usize,
	pub debug_scores: bool,
}

#[derive(Debug, Default)]
struct Row {
	text: String,
	spans: Vec<(usize, usize, StyleTag)>,
	is_cursor: bool,
}

impl Row {
	fn tagged(text: impl Into<String>, tag: StyleTag) -> Self {
		let text = text.into();
		let width = text.width();
		Self {
			text,
			spans: vec![(0, width, tag)],
			is_cursor: false,
		}
	}
}

/// Render the list panel.
#[must_use]
pub fn render_list(view: &ListView<'_>) -> RenderedList {
	let height = view.panel_height;
	if height == 0 {
		return RenderedList::default();
	}

	let combo = combo_run(view);
	let rows = if view.items.is_empty() {
		empty_rows(view)
	} else {
		item_rows(view, combo)
	};

	let cursor_entry = rows.iter().position(|row| row.is_cursor).unwrap_or(0);
	let start = if rows.len() <= height || cursor_entry < height {
		0
	} else {
		cursor_entry + 1 - height
	};

	let mut rendered = RenderedList {
		lines: vec![String::new(); height],
		combo,
		..RenderedList::default()
	};
	for (offset, row) in rows.into_iter().skip(start).take(height).enumerate() {
		let visual = if view.prompt_position.is_below() {
			height - 1 - offset
		} else {
			offset
		};
		let line = truncate_to_width(&row.text, view.panel_width);
		let line_width = line.width();
		for (span_start, span_end, tag) in row.spans {
			let limit = match tag {
				StyleTag::Cursor | StyleTag::Combo => view.panel_width,
				_ => line_width,
			};
			let end = span_end.min(limit);
			if span_start < end {
				rendered.ranges.push(StyledRange {
					row: visual,
					start: span_start,
					end,
					tag,
				});
			}
		}
		if row.is_cursor {
			rendered.cursor_row = Some(visual);
		}
		rendered.lines[visual] = line;
	}

	if view.exact_total
		&& view.paging == PagingKind::Offset
		&& view.suggestion.is_none()
		&& view.total_pages > 1
	{
		rendered.scrollbar = ScrollbarThumb::compute(
			height,
			view.total_pages,
			view.page_index,
			view.prompt_position.is_below(),
		);
	}
	rendered
}

fn combo_run(view: &ListView<'_>) -> Option<ComboRun> {
	let eligible = view.mode == BackendMode::Primary
		&& view.suggestion.is_none()
		&& view.page_index == 0
		&& view.combo.visible;
	if eligible {
		view.combo_detector.detect(view.items)
	} else {
		None
	}
}

fn empty_rows(view: &ListView<'_>) -> Vec<Row> {
	if view.paging == PagingKind::Token && view.query_blank {
		HELP_LINES
			.iter()
			.map(|line| Row::tagged(*line, StyleTag::Help))
			.collect()
	} else {
		vec![Row::tagged(NO_RESULTS, StyleTag::Empty)]
	}
}

fn item_rows(view: &ListView<'_>, combo: Option<ComboRun>) -> Vec<Row> {
	let mut rows = Vec::with_capacity(view.items.len() + 2);
	if let Some(source) = view.suggestion {
		rows.push(Row::tagged(
			format!("No matches. Showing {} results instead", source.label()),
			StyleTag::SuggestionHeader,
		));
	}

	for (index, item) in view.items.iter().enumerate() {
		if let Some(run) = combo
			&& run.start == index
		{
			rows.push(Row::tagged(
				format!("combo x{} ({} picks)", run.len, run.uses),
				StyleTag::ComboHeader,
			));
		}
		let in_combo = combo.is_some_and(|run| index >= run.start && index < run.start + run.len);
		rows.push(item_row(view, item, index + 1 == view.cursor, in_combo));
	}
	rows
}

fn item_row(view: &ListView<'_>, item: &Item, is_cursor: bool, in_combo: bool) -> Row {
	let selected = view.selection.contains(item);
	let mut text = String::new();
	text.push(if is_cursor { CURSOR_MARK } else { ' ' });
	text.push(if selected { SELECTED_MARK } else { ' ' });
	text.push(' ');
	text.push_str(&item.display_name);

	let mut spans = Vec::new();
	if let Some(detail) = item.detail.as_deref() {
		text.push_str("  ");
		let start = text.width();
		text.push_str(detail.trim());
		spans.push((start, text.width(), StyleTag::Detail));
	}
	if view.debug_scores {
		text.push_str("  ");
		let start = text.width();
		text.push_str(&format!("[{}]", item.score));
		spans.push((start, text.width(), StyleTag::Score));
	}

	let width = text.width().max(view.panel_width);
	if in_combo {
		spans.insert(0, (0, width, StyleTag::Combo));
	}
	if is_cursor {
		spans.insert(0, (0, width, StyleTag::Cursor));
	}
	if selected {
		spans.push((1, 2, StyleTag::Selected));
	}
	Row {
		text,
		spans,
		is_cursor,
	}
}

/// Cut `text` to at most `width` display columns, marking the cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
	if text.width() <= width {
		return text.to_string();
	}
	if width == 0 {
		return String::new();
	}
	let budget = width - 1;
	let mut used = 0;
	let mut out = String::new();
	for ch in text.chars() {
		let ch_width = ch.width().unwrap_or(0);
		if used + ch_width > budget {
			break;
		}
		used += ch_width;
		out.push(ch);
	}
	out.push(ELLIPSIS);
	out
}
