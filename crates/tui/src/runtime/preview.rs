//! File-backed preview content.

use std::fs::File;
use std::io::Read;

use glint_core::Location;
use tracing::debug;

use crate::preview::{PreviewSink, PreviewTarget};

/// Bytes read from a previewed file.
const MAX_PREVIEW_BYTES: u64 = 1024 * 1024;
/// Lines kept from a previewed file.
const MAX_PREVIEW_LINES: usize = 5000;

pub(crate) const PLACEHOLDER: &str = "No preview";

/// Preview panel content loaded straight from disk.
#[derive(Debug, Default)]
pub(crate) struct FilePreview {
	pub(crate) title: String,
	pub(crate) lines: Vec<String>,
	/// 0-based line to highlight and center.
	pub(crate) focus: Option<usize>,
	/// Replaces the content when set.
	pub(crate) message: Option<String>,
	loads: usize,
}

impl FilePreview {
	/// First line to draw for a panel of `height` rows.
	pub(crate) fn scroll_offset(&self, height: usize) -> usize {
		let Some(focus) = self.focus else {
			return 0;
		};
		let max_offset = self.lines.len().saturating_sub(height);
		focus.saturating_sub(height / 2).min(max_offset)
	}

	fn focus_for(location: Option<Location>) -> Option<usize> {
		location.map(|location| location.line.saturating_sub(1))
	}

	fn load(&mut self, target: &PreviewTarget) -> std::io::Result<()> {
		let mut bytes = Vec::new();
		File::open(&target.identifier)?
			.take(MAX_PREVIEW_BYTES)
			.read_to_end(&mut bytes)?;
		if bytes.contains(&0) {
			self.message = Some("binary file".into());
			return Ok(());
		}
		self.lines = String::from_utf8_lossy(&bytes)
			.lines()
			.take(MAX_PREVIEW_LINES)
			.map(|line| line.replace('\t', "    "))
			.collect();
		Ok(())
	}
}

impl PreviewSink for FilePreview {
	fn show(&mut self, target: &PreviewTarget) {
		self.loads += 1;
		self.title = target.identifier.clone();
		self.lines.clear();
		self.message = None;
		self.focus = Self::focus_for(target.location);
		if target.is_binary {
			self.message = Some("binary file".into());
			return;
		}
		if let Err(error) = self.load(target) {
			debug!(path = %target.identifier, %error, "preview load failed");
			self.message = Some(format!("cannot read file: {error}"));
		}
	}

	fn relocate(&mut self, target: &PreviewTarget) {
		self.focus = Self::focus_for(target.location);
	}

	fn clear(&mut self) {
		self.title.clear();
		self.lines.clear();
		self.focus = None;
		self.message = Some(PLACEHOLDER.into());
	}
}
