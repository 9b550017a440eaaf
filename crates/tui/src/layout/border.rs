//! Border glyph table.

use ratatui::symbols::{border, line};
use tracing::debug;

/// Corner and junction glyphs for one named border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderStyle {
	pub name: &'static str,
	pub border: border::Set,
	pub line: line::Set,
}

const STYLES: [BorderStyle; 4] = [
	BorderStyle {
		name: "single",
		border: border::PLAIN,
		line: line::NORMAL,
	},
	BorderStyle {
		name: "rounded",
		border: border::ROUNDED,
		line: line::ROUNDED,
	},
	BorderStyle {
		name: "double",
		border: border::DOUBLE,
		line: line::DOUBLE,
	},
	BorderStyle {
		name: "thick",
		border: border::THICK,
		line: line::THICK,
	},
];

impl BorderStyle {
	/// Look up a style by name, falling back to `single`.
	#[must_use]
	pub fn by_name(name: &str) -> Self {
		let wanted = name.trim();
		STYLES
			.iter()
			.find(|style| style.name.eq_ignore_ascii_case(wanted))
			.copied()
			.unwrap_or_else(|| {
				debug!(style = wanted, "unknown border style, using single");
				Self::default()
			})
	}

	/// Names accepted by [`BorderStyle::by_name`].
	pub fn names() -> impl Iterator<Item = &'static str> {
		STYLES.iter().map(|style| style.name)
	}

	/// Glyph where a horizontal edge meets a vertical one from the right.
	#[must_use]
	pub fn tee_right(&self) -> &'static str {
		self.line.vertical_right
	}

	/// Glyph where a horizontal edge meets a vertical one from the left.
	#[must_use]
	pub fn tee_left(&self) -> &'static str {
		self.line.vertical_left
	}

	/// Glyph where a vertical edge hangs below a horizontal one.
	#[must_use]
	pub fn tee_down(&self) -> &'static str {
		self.line.horizontal_down
	}

	/// Glyph where a vertical edge rises above a horizontal one.
	#[must_use]
	pub fn tee_up(&self) -> &'static str {
		self.line.horizontal_up
	}
}

impl Default for BorderStyle {
	fn default() -> Self {
		STYLES[0]
	}
}
