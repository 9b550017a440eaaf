//! Panel geometry.
//!
//! [`compute_layout`] is a pure function from terminal size and
//! [`LayoutConfig`] to a [`Geometry`]: outer rectangles for the prompt, list,
//! optional preview and optional info panels, the scrollbar column and the
//! junction glyphs needed where panels share an edge. Deciding whether a
//! geometry is usable is left to the caller through [`Geometry::is_viable`].

mod border;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ratatui::layout::{Position, Rect};
use serde::{Deserialize, Serialize};

pub use border::BorderStyle;

/// Below this terminal width `auto` places the preview at the bottom.
pub const AUTO_PREVIEW_MIN_WIDTH: u16 = 120;
/// Minimum inner rows of a usable list panel.
pub const MIN_LIST_ROWS: u16 = 3;
/// Minimum inner columns of a usable list panel.
pub const MIN_LIST_COLUMNS: u16 = 8;
/// Outer height of the prompt and info panels.
pub const PROMPT_HEIGHT: u16 = 3;

type RatioFn = dyn Fn(u16, u16) -> f64 + Send + Sync;

/// A layout ratio, either constant or derived from the terminal size.
#[derive(Clone)]
pub enum Ratio {
	Fixed(f64),
	Computed(Arc<RatioFn>),
}

impl Ratio {
	pub fn computed(f: impl Fn(u16, u16) -> f64 + Send + Sync + 'static) -> Self {
		Self::Computed(Arc::new(f))
	}

	/// Evaluate against the terminal size, clamped into `[0, 1]`.
	#[must_use]
	pub fn resolve(&self, width: u16, height: u16) -> f64 {
		let value = match self {
			Self::Fixed(value) => *value,
			Self::Computed(f) => f(width, height),
		};
		if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
	}

	fn scale(&self, extent: u16, width: u16, height: u16) -> u16 {
		(f64::from(extent) * self.resolve(width, height)).floor() as u16
	}
}

impl fmt::Debug for Ratio {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
			Self::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}

impl From<f64> for Ratio {
	fn from(value: f64) -> Self {
		Self::Fixed(value)
	}
}

/// Where the preview panel goes relative to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewPosition {
	Left,
	Right,
	Top,
	Bottom,
	#[default]
	Auto,
}

impl PreviewPosition {
	/// Resolve `auto` against the terminal width.
	#[must_use]
	pub fn resolve(self, width: u16) -> Self {
		match self {
			Self::Auto if width < AUTO_PREVIEW_MIN_WIDTH => Self::Bottom,
			Self::Auto => Self::Right,
			other => other,
		}
	}

	pub const NAMES: [&'static str; 5] = ["left", "right", "top", "bottom", "auto"];
}

impl FromStr for PreviewPosition {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"left" => Ok(Self::Left),
			"right" => Ok(Self::Right),
			"top" => Ok(Self::Top),
			"bottom" => Ok(Self::Bottom),
			"auto" => Ok(Self::Auto),
			other => Err(format!(
				"expected one of {}, got `{other}`",
				Self::NAMES.join(", ")
			)),
		}
	}
}

/// Which vertical edge of the list the prompt sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPosition {
	Top,
	#[default]
	Bottom,
}

impl PromptPosition {
	#[must_use]
	pub const fn is_below(self) -> bool {
		matches!(self, Self::Bottom)
	}
}

impl FromStr for PromptPosition {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"top" => Ok(Self::Top),
			"bottom" => Ok(Self::Bottom),
			other => Err(format!("expected `top` or `bottom`, got `{other}`")),
		}
	}
}

/// Inputs to [`compute_layout`].
#[derive(Debug, Clone)]
pub struct LayoutConfig {
	pub width: Ratio,
	pub height: Ratio,
	/// Horizontal anchor of the frame inside the terminal.
	pub col: Ratio,
	/// Vertical anchor of the frame inside the terminal.
	pub row: Ratio,
	pub preview_position: PreviewPosition,
	/// Share of the frame given to the preview along its split axis.
	pub preview_size: Ratio,
	pub prompt_position: PromptPosition,
	pub show_preview: bool,
	pub show_debug: bool,
	pub border: BorderStyle,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			width: Ratio::Fixed(1.0),
			height: Ratio::Fixed(1.0),
			col: Ratio::Fixed(0.5),
			row: Ratio::Fixed(0.5),
			preview_position: PreviewPosition::Auto,
			preview_size: Ratio::Fixed(0.5),
			prompt_position: PromptPosition::Bottom,
			show_preview: true,
			show_debug: false,
			border: BorderStyle::default(),
		}
	}
}

/// Identifies one of the panels the host draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
	Prompt,
	List,
	Preview,
	Info,
}

/// A bordered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
	/// Outer rectangle including the border.
	pub area: Rect,
	pub title: &'static str,
}

impl Panel {
	fn new(area: Rect, title: &'static str) -> Self {
		Self { area, title }
	}

	/// Rectangle inside the border.
	#[must_use]
	pub fn inner(&self) -> Rect {
		Rect {
			x: self.area.x.saturating_add(1),
			y: self.area.y.saturating_add(1),
			width: self.area.width.saturating_sub(2),
			height: self.area.height.saturating_sub(2),
		}
	}
}

/// A glyph drawn over a border cell where two panels meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
	pub position: Position,
	pub glyph: &'static str,
}

/// Result of [`compute_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
	/// Area covered by all panels together.
	pub frame: Rect,
	pub prompt: Panel,
	pub list: Panel,
	pub preview: Option<Panel>,
	pub info: Option<Panel>,
	/// One column on the list's right border, inner rows only.
	pub scrollbar: Rect,
	/// Effective prompt edge after the preview constraint is applied.
	pub prompt_position: PromptPosition,
	/// Resolved preview position, `None` when hidden.
	pub preview_position: Option<PreviewPosition>,
	pub border: BorderStyle,
	pub junctions: Vec<Junction>,
}

impl Geometry {
	/// Whether the list panel is large enough to render into.
	#[must_use]
	pub fn is_viable(&self) -> bool {
		let inner = self.list.inner();
		inner.height >= MIN_LIST_ROWS && inner.width >= MIN_LIST_COLUMNS
	}

	/// Rows available to the render pipeline.
	#[must_use]
	pub fn list_height(&self) -> usize {
		usize::from(self.list.inner().height)
	}

	/// Columns available to the render pipeline.
	#[must_use]
	pub fn list_width(&self) -> usize {
		usize::from(self.list.inner().width)
	}

	#[must_use]
	pub fn panel(&self, kind: PanelKind) -> Option<Panel> {
		match kind {
			PanelKind::Prompt => Some(self.prompt),
			PanelKind::List => Some(self.list),
			PanelKind::Preview => self.preview,
			PanelKind::Info => self.info,
		}
	}
}

/// Compute panel geometry for a `width` x `height` terminal.
#[must_use]
pub fn compute_layout(width: u16, height: u16, config: &LayoutConfig) -> Geometry {
	let frame_width = config.width.scale(width, width, height).min(width);
	let frame_height = config.height.scale(height, width, height).min(height);
	let frame = Rect {
		x: config
			.col
			.scale(width.saturating_sub(frame_width), width, height),
		y: config
			.row
			.scale(height.saturating_sub(frame_height), width, height),
		width: frame_width,
		height: frame_height,
	};

	let preview_position = config
		.show_preview
		.then(|| config.preview_position.resolve(width));
	let prompt_position = match preview_position {
		Some(PreviewPosition::Top) => PromptPosition::Bottom,
		Some(PreviewPosition::Bottom) => PromptPosition::Top,
		_ => config.prompt_position,
	};

	let mut junctions = Vec::new();
	let border = config.border;

	// Carve the preview off the frame; the remainder holds prompt and list.
	let (column, preview) = match preview_position {
		Some(PreviewPosition::Left) => {
			let size = config.preview_size.scale(frame.width, width, height);
			let (preview, column) = split_horizontal(frame, size);
			vertical_seam(&mut junctions, border, column.x, frame);
			(column, Some(preview))
		}
		Some(PreviewPosition::Right) => {
			let size = config.preview_size.scale(frame.width, width, height);
			let (column, preview) =
				split_horizontal(frame, frame.width.saturating_sub(size).saturating_add(1));
			vertical_seam(&mut junctions, border, preview.x, frame);
			(column, Some(preview))
		}
		Some(PreviewPosition::Top) => {
			let size = config.preview_size.scale(frame.height, width, height);
			let (preview, column) = split_vertical(frame, size);
			horizontal_seam(&mut junctions, border, column.y, frame);
			(column, Some(preview))
		}
		Some(PreviewPosition::Bottom) => {
			let size = config.preview_size.scale(frame.height, width, height);
			let (column, preview) =
				split_vertical(frame, frame.height.saturating_sub(size).saturating_add(1));
			horizontal_seam(&mut junctions, border, preview.y, frame);
			(column, Some(preview))
		}
		Some(PreviewPosition::Auto) | None => (frame, None),
	};

	let prompt_height = PROMPT_HEIGHT.min(column.height);
	let (prompt_strip, list) = match prompt_position {
		PromptPosition::Top => split_vertical(column, prompt_height),
		PromptPosition::Bottom => {
			let split = column.height.saturating_sub(prompt_height).saturating_add(1);
			let (list, prompt) = split_vertical(column, split);
			(prompt, list)
		}
	};
	let seam_row = match prompt_position {
		PromptPosition::Top => list.y,
		PromptPosition::Bottom => prompt_strip.y,
	};
	horizontal_seam(&mut junctions, border, seam_row, column);

	let (prompt, info) = if config.show_debug {
		let info_width = prompt_strip.width / 3;
		let (prompt, info) = split_horizontal(
			prompt_strip,
			prompt_strip.width.saturating_sub(info_width).saturating_add(1),
		);
		vertical_seam(&mut junctions, border, info.x, prompt_strip);
		(prompt, Some(Panel::new(info, "Info")))
	} else {
		(prompt_strip, None)
	};

	let list = Panel::new(list, "Results");
	let inner = list.inner();
	let scrollbar = Rect {
		x: list.area.right().saturating_sub(1),
		y: inner.y,
		width: u16::from(list.area.width > 0),
		height: inner.height,
	};

	Geometry {
		frame,
		prompt: Panel::new(prompt, "Query"),
		list,
		preview: preview.map(|area| Panel::new(area, "Preview")),
		info,
		scrollbar,
		prompt_position,
		preview_position,
		border,
		junctions,
	}
}

/// Split `area` into a top part of `first` rows and the remainder, sharing one
/// border row.
fn split_vertical(area: Rect, first: u16) -> (Rect, Rect) {
	let first = first.min(area.height);
	let top = Rect {
		height: first,
		..area
	};
	let seam = area.y + first.saturating_sub(1);
	let bottom = Rect {
		y: seam,
		height: area.bottom().saturating_sub(seam),
		..area
	};
	(top, bottom)
}

/// Split `area` into a left part of `first` columns and the remainder, sharing
/// one border column.
fn split_horizontal(area: Rect, first: u16) -> (Rect, Rect) {
	let first = first.min(area.width);
	let left = Rect {
		width: first,
		..area
	};
	let seam = area.x + first.saturating_sub(1);
	let right = Rect {
		x: seam,
		width: area.right().saturating_sub(seam),
		..area
	};
	(left, right)
}

/// Junctions at both ends of a shared horizontal edge spanning `span`.
fn horizontal_seam(junctions: &mut Vec<Junction>, border: BorderStyle, row: u16, span: Rect) {
	if span.width < 2 || row <= span.y || row + 1 >= span.bottom() {
		return;
	}
	junctions.push(Junction {
		position: Position::new(span.x, row),
		glyph: border.tee_right(),
	});
	junctions.push(Junction {
		position: Position::new(span.right() - 1, row),
		glyph: border.tee_left(),
	});
}

/// Junctions at both ends of a shared vertical edge spanning `span`.
fn vertical_seam(junctions: &mut Vec<Junction>, border: BorderStyle, column: u16, span: Rect) {
	if span.height < 2 || column <= span.x || column + 1 >= span.right() {
		return;
	}
	junctions.push(Junction {
		position: Position::new(column, span.y),
		glyph: border.tee_down(),
	});
	junctions.push(Junction {
		position: Position::new(column, span.bottom() - 1),
		glyph: border.tee_up(),
	});
}
