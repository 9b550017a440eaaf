use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

use crate::render::StyleTag;

/// A theme containing styles for the UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Panel titles, borders and the scrollbar thumb.
	pub header: Style,
	/// The row under the cursor.
	pub row_highlight: Style,
	/// Query text and status line.
	pub prompt: Style,
	/// Empty states, help text and secondary details.
	pub empty: Style,
	/// Selection markers and the combo overlay.
	pub highlight: Style,
}

impl Theme {
	/// Style applied to a range tagged `tag`.
	#[must_use]
	pub fn style_for(&self, tag: StyleTag) -> Style {
		match tag {
			StyleTag::Cursor => self.row_highlight,
			StyleTag::Selected => self.highlight.add_modifier(Modifier::BOLD),
			StyleTag::Combo => Style::new().fg(self.highlight.fg.unwrap_or(Color::Reset)),
			StyleTag::ComboHeader | StyleTag::SuggestionHeader => {
				self.header.add_modifier(Modifier::BOLD)
			}
			StyleTag::Detail | StyleTag::Score | StyleTag::Help => self.empty,
			StyleTag::Empty => self.empty.add_modifier(Modifier::ITALIC),
		}
	}

	/// Style for warnings in the status line.
	#[must_use]
	pub fn warning_style(&self) -> Style {
		Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
	}
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

const SLATE: Theme = Theme {
	header: Style::new().fg(Color::Rgb(148, 163, 184)),
	row_highlight: Style::new()
		.fg(Color::Rgb(241, 245, 249))
		.bg(Color::Rgb(51, 65, 85)),
	prompt: Style::new().fg(Color::Rgb(226, 232, 240)),
	empty: Style::new().fg(Color::Rgb(100, 116, 139)),
	highlight: Style::new().fg(Color::Rgb(56, 189, 248)),
};

const SOLARIZED: Theme = Theme {
	header: Style::new().fg(Color::Rgb(147, 161, 161)),
	row_highlight: Style::new()
		.fg(Color::Rgb(253, 246, 227))
		.bg(Color::Rgb(7, 54, 66)),
	prompt: Style::new().fg(Color::Rgb(238, 232, 213)),
	empty: Style::new().fg(Color::Rgb(88, 110, 117)),
	highlight: Style::new().fg(Color::Rgb(181, 137, 0)),
};

const MONO: Theme = Theme {
	header: Style::new().add_modifier(Modifier::BOLD),
	row_highlight: Style::new().add_modifier(Modifier::REVERSED),
	prompt: Style::new(),
	empty: Style::new().add_modifier(Modifier::DIM),
	highlight: Style::new().add_modifier(Modifier::UNDERLINED),
};

const BUILTINS: [(&str, Theme); 3] = [("slate", SLATE), ("solarized", SOLARIZED), ("mono", MONO)];

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	SLATE
}

/// Names of the built-in themes, default first.
pub fn names() -> impl Iterator<Item = &'static str> {
	BUILTINS.iter().map(|(name, _)| *name)
}

/// Look up a built-in theme by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let found = BUILTINS
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
		.map(|(_, theme)| *theme);
	if found.is_none() {
		debug!(theme = name, "unknown theme");
	}
	found
}
