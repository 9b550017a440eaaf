//! Ratatui-backed [`Surface`].

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use super::preview::FilePreview;
use crate::host::Surface;
use crate::layout::{Geometry, Panel, PanelKind};
use crate::render::{ScrollbarThumb, StyledRange};
use crate::session::StatusLine;
use crate::style::Theme;

const SCROLLBAR_THUMB: &str = "┃";

/// Collects what a session presents and paints it on the next frame.
pub(crate) struct TerminalSurface {
	theme: Theme,
	geometry: Option<Geometry>,
	prompt: Vec<String>,
	list: Vec<String>,
	list_ranges: Vec<StyledRange>,
	info: Vec<String>,
	scrollbar: Option<ScrollbarThumb>,
	status: Option<StatusLine>,
	cursor: Option<(PanelKind, usize, usize)>,
}

impl TerminalSurface {
	pub(crate) fn new(theme: Theme) -> Self {
		Self {
			theme,
			geometry: None,
			prompt: Vec::new(),
			list: Vec::new(),
			list_ranges: Vec::new(),
			info: Vec::new(),
			scrollbar: None,
			status: None,
			cursor: None,
		}
	}

	pub(crate) fn draw(&self, frame: &mut Frame, preview: &FilePreview, throbber: &ThrobberState) {
		let Some(geometry) = &self.geometry else {
			return;
		};

		self.draw_panel(frame, &geometry.list, None);
		self.draw_lines(frame.buffer_mut(), geometry.list.inner(), &self.list);
		self.draw_ranges(frame.buffer_mut(), geometry.list.inner());
		self.draw_scrollbar(frame.buffer_mut(), geometry.scrollbar);

		self.draw_panel(frame, &geometry.prompt, None);
		self.draw_prompt(frame, geometry.prompt.inner(), throbber);

		if let Some(panel) = &geometry.preview {
			let title = (!preview.title.is_empty()).then_some(preview.title.as_str());
			self.draw_panel(frame, panel, title);
			self.draw_preview(frame.buffer_mut(), panel.inner(), preview);
		}
		if let Some(panel) = &geometry.info {
			self.draw_panel(frame, panel, None);
			self.draw_lines(frame.buffer_mut(), panel.inner(), &self.info);
		}

		let buffer = frame.buffer_mut();
		for junction in &geometry.junctions {
			if let Some(cell) = buffer.cell_mut(junction.position) {
				cell.set_symbol(junction.glyph);
				cell.set_style(self.theme.header);
			}
		}

		if let Some((kind, row, column)) = self.cursor
			&& let Some(panel) = geometry.panel(kind)
		{
			let inner = panel.inner();
			let column = (column as u16).min(inner.width.saturating_sub(1));
			frame.set_cursor_position(Position::new(inner.x + column, inner.y + row as u16));
		}
	}

	fn draw_panel(&self, frame: &mut Frame, panel: &Panel, title: Option<&str>) {
		let block = Block::bordered()
			.border_set(self.geometry_border())
			.border_style(self.theme.header)
			.title(Span::styled(
				format!(" {} ", title.unwrap_or(panel.title)),
				self.theme.header,
			));
		frame.render_widget(block, panel.area);
	}

	fn geometry_border(&self) -> ratatui::symbols::border::Set {
		self.geometry
			.as_ref()
			.map(|geometry| geometry.border.border)
			.unwrap_or(ratatui::symbols::border::PLAIN)
	}

	fn draw_lines(&self, buffer: &mut Buffer, area: Rect, lines: &[String]) {
		for (row, line) in lines.iter().enumerate().take(area.height as usize) {
			buffer.set_stringn(
				area.x,
				area.y + row as u16,
				line,
				area.width as usize,
				Style::new(),
			);
		}
	}

	fn draw_ranges(&self, buffer: &mut Buffer, area: Rect) {
		for range in &self.list_ranges {
			if range.row >= area.height as usize || range.start >= area.width as usize {
				continue;
			}
			let end = range.end.min(area.width as usize);
			let target = Rect {
				x: area.x + range.start as u16,
				y: area.y + range.row as u16,
				width: end.saturating_sub(range.start) as u16,
				height: 1,
			};
			buffer.set_style(target, self.theme.style_for(range.tag));
		}
	}

	fn draw_scrollbar(&self, buffer: &mut Buffer, column: Rect) {
		let Some(thumb) = self.scrollbar else {
			return;
		};
		for offset in thumb.start..thumb.start + thumb.size {
			let position = Position::new(column.x, column.y + offset as u16);
			if let Some(cell) = buffer.cell_mut(position) {
				cell.set_symbol(SCROLLBAR_THUMB);
				cell.set_style(self.theme.highlight);
			}
		}
	}

	fn draw_prompt(&self, frame: &mut Frame, area: Rect, throbber: &ThrobberState) {
		let query = self.prompt.first().map(String::as_str).unwrap_or_default();
		let mut right = Vec::new();
		if let Some(status) = &self.status {
			if let Some(notice) = &status.notice {
				let style = if notice.is_warning() {
					self.theme.warning_style()
				} else {
					self.theme.empty
				};
				right.push(Span::styled(format!("{} ", notice.text()), style));
			}
			if status.scanning {
				let spinner = Throbber::default().to_symbol_span(throbber);
				right.push(Span::styled(spinner.content, self.theme.highlight));
			}
			right.push(Span::styled(status.to_string(), self.theme.prompt));
		}

		let right = Line::from(right);
		let right_width = (right.width() as u16).min(area.width);
		let left_width = area.width.saturating_sub(right_width);
		frame.render_widget(
			Paragraph::new(Span::styled(query.to_owned(), self.theme.prompt)),
			Rect { width: left_width, height: 1, ..area },
		);
		if query.width() < left_width as usize {
			frame.render_widget(
				Paragraph::new(right),
				Rect {
					x: area.x + left_width,
					width: right_width,
					height: 1,
					..area
				},
			);
		}
	}

	fn draw_preview(&self, buffer: &mut Buffer, area: Rect, preview: &FilePreview) {
		if let Some(message) = &preview.message {
			buffer.set_stringn(area.x, area.y, message, area.width as usize, self.theme.empty);
			return;
		}
		let height = area.height as usize;
		let offset = preview.scroll_offset(height);
		for (row, line) in preview.lines.iter().skip(offset).take(height).enumerate() {
			let y = area.y + row as u16;
			let focused = preview.focus == Some(offset + row);
			let style = if focused {
				self.theme.row_highlight
			} else {
				Style::new()
			};
			if focused {
				buffer.set_style(Rect { y, height: 1, ..area }, style);
			}
			buffer.set_stringn(area.x, y, line, area.width as usize, style);
		}
	}
}

impl Surface for TerminalSurface {
	fn place_panels(&mut self, geometry: &Geometry) {
		self.geometry = Some(geometry.clone());
	}

	fn replace_lines(&mut self, panel: PanelKind, lines: &[String]) {
		let target = match panel {
			PanelKind::Prompt => &mut self.prompt,
			PanelKind::List => &mut self.list,
			PanelKind::Info => &mut self.info,
			PanelKind::Preview => return,
		};
		target.clear();
		target.extend_from_slice(lines);
	}

	fn apply_ranges(&mut self, panel: PanelKind, ranges: &[StyledRange]) {
		if panel == PanelKind::List {
			self.list_ranges.clear();
			self.list_ranges.extend_from_slice(ranges);
		}
	}

	fn show_scrollbar(&mut self, thumb: Option<ScrollbarThumb>) {
		self.scrollbar = thumb;
	}

	fn show_status(&mut self, status: &StatusLine) {
		self.status = Some(status.clone());
	}

	fn place_cursor(&mut self, panel: PanelKind, row: usize, column: usize) {
		self.cursor = Some((panel, row, column));
	}
}
