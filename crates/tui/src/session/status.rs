//! Prompt status line and user-facing notices.

use std::fmt;

use glint_core::BackendMode;

/// A non-fatal message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
	Info(String),
	Warning(String),
}

impl Notice {
	#[must_use]
	pub fn text(&self) -> &str {
		match self {
			Self::Info(text) | Self::Warning(text) => text,
		}
	}

	#[must_use]
	pub fn is_warning(&self) -> bool {
		matches!(self, Self::Warning(_))
	}
}

/// Summary rendered next to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
	pub mode: BackendMode,
	/// Matched count, `~N` when approximate.
	pub count: String,
	/// `i/n` for exact totals.
	pub page: Option<String>,
	pub scanning: bool,
	/// The pattern was matched literally after failing to compile.
	pub literal: bool,
	pub suggestion: bool,
	pub selected: usize,
	pub notice: Option<Notice>,
}

impl fmt::Display for StatusLine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.mode.label(), self.count)?;
		if let Some(page) = &self.page {
			write!(f, " {page}")?;
		}
		if self.selected > 0 {
			write!(f, " +{}", self.selected)?;
		}
		if self.literal {
			f.write_str(" literal")?;
		}
		if self.suggestion {
			f.write_str(" suggestions")?;
		}
		Ok(())
	}
}
