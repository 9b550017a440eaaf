//! Single-line query editing.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// The editable query with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
	text: String,
	/// Cursor position in characters.
	cursor: usize,
}

impl QueryInput {
	#[must_use]
	pub fn new(text: &str) -> Self {
		Self {
			text: text.to_string(),
			cursor: text.chars().count(),
		}
	}

	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Replace the text, moving the cursor to the end.
	pub fn set_text(&mut self, text: &str) {
		*self = Self::new(text);
	}

	/// Display column of the cursor.
	#[must_use]
	pub fn cursor_column(&self) -> usize {
		self.text[..self.byte_index(self.cursor)].width()
	}

	/// Apply an editing key. Returns whether the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('u') if ctrl => self.replace_range(0, self.cursor),
			KeyCode::Char('w') if ctrl => {
				let start = self.word_start();
				self.replace_range(start, self.cursor)
			}
			KeyCode::Char('a') if ctrl => self.move_to(0),
			KeyCode::Char('e') if ctrl => self.move_to(self.len()),
			KeyCode::Char(ch) if !ctrl => {
				let at = self.byte_index(self.cursor);
				self.text.insert(at, ch);
				self.cursor += 1;
				true
			}
			KeyCode::Backspace if self.cursor > 0 => self.replace_range(self.cursor - 1, self.cursor),
			KeyCode::Delete if self.cursor < self.len() => {
				self.replace_range(self.cursor, self.cursor + 1)
			}
			KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
			KeyCode::Right => self.move_to((self.cursor + 1).min(self.len())),
			KeyCode::Home => self.move_to(0),
			KeyCode::End => self.move_to(self.len()),
			_ => false,
		}
	}

	fn len(&self) -> usize {
		self.text.chars().count()
	}

	fn byte_index(&self, chars: usize) -> usize {
		self.text
			.char_indices()
			.nth(chars)
			.map_or(self.text.len(), |(index, _)| index)
	}

	/// Remove characters `[start, end)`; the cursor lands on `start`.
	fn replace_range(&mut self, start: usize, end: usize) -> bool {
		if start >= end {
			return false;
		}
		let from = self.byte_index(start);
		let to = self.byte_index(end);
		self.text.replace_range(from..to, "");
		self.cursor = start;
		true
	}

	/// Cursor-only moves never change the text.
	fn move_to(&mut self, position: usize) -> bool {
		self.cursor = position;
		false
	}

	fn word_start(&self) -> usize {
		let chars: Vec<char> = self.text.chars().take(self.cursor).collect();
		let mut index = chars.len();
		while index > 0 && chars[index - 1].is_whitespace() {
			index -= 1;
		}
		while index > 0 && !chars[index - 1].is_whitespace() {
			index -= 1;
		}
		index
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ctrl(ch: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
	}

	#[test]
	fn typing_and_deleting_edit_at_the_cursor() {
		let mut input = QueryInput::new("mn");
		assert!(!input.input(key(KeyCode::Left)));
		assert!(input.input(key(KeyCode::Char('a'))));
		assert_eq!(input.text(), "man");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "mn");
		assert!(input.input(key(KeyCode::Delete)));
		assert_eq!(input.text(), "m");
	}

	#[test]
	fn ctrl_w_removes_the_previous_word() {
		let mut input = QueryInput::new("fn main  ");
		assert!(input.input(ctrl('w')));
		assert_eq!(input.text(), "fn ");
		assert!(input.input(ctrl('u')));
		assert_eq!(input.text(), "");
		assert!(!input.input(ctrl('u')));
	}

	#[test]
	fn cursor_column_counts_display_width() {
		let mut input = QueryInput::new("日本");
		assert_eq!(input.cursor_column(), 4);
		input.input(key(KeyCode::Home));
		assert_eq!(input.cursor_column(), 0);
	}
}
