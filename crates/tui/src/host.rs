//! The drawing surface a session presents itself on.

use crate::layout::{Geometry, PanelKind};
use crate::render::{ScrollbarThumb, StyledRange};
use crate::session::StatusLine;

/// Host collaborator that owns the panels on screen.
///
/// A session calls these in order on every frame: panels first, then
/// content, then the input cursor.
pub trait Surface {
	/// Create or move panels to match `geometry`.
	fn place_panels(&mut self, geometry: &Geometry);
	/// Replace the text of `panel` line by line.
	fn replace_lines(&mut self, panel: PanelKind, lines: &[String]);
	/// Style ranges for the lines last written to `panel`.
	fn apply_ranges(&mut self, panel: PanelKind, ranges: &[StyledRange]);
	fn show_scrollbar(&mut self, thumb: Option<ScrollbarThumb>);
	fn show_status(&mut self, status: &StatusLine);
	/// Put the terminal cursor at `row`/`column` inside `panel`.
	fn place_cursor(&mut self, panel: PanelKind, row: usize, column: usize);
}
