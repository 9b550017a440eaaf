//! Preview coordination.
//!
//! The coordinator watches the highlighted item and decides whether the
//! preview is left alone, moved in place to a new location, or reloaded. A
//! reload after the first one is debounced through a single [`TaskSlot`], so
//! sweeping the cursor across many items costs one content fetch.

mod timer;

use std::time::{Duration, Instant};

use glint_core::{Item, Location};
use tracing::debug;

pub use timer::{TaskHandle, TaskSlot};

/// Default delay before a changed item is loaded.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// What the preview should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
	pub identifier: String,
	pub location: Option<Location>,
	pub is_binary: bool,
}

impl PreviewTarget {
	/// Target for `item`, using `fallback` when the backend gave no location.
	#[must_use]
	pub fn for_item(item: &Item, fallback: Option<Location>) -> Self {
		Self {
			identifier: item.identifier.clone(),
			location: item.location.or(fallback),
			is_binary: item.is_binary,
		}
	}
}

/// The host side of the preview panel.
pub trait PreviewSink {
	/// Load and display the content of `target`.
	fn show(&mut self, target: &PreviewTarget);
	/// Move the highlight to a new location of the content already shown.
	fn relocate(&mut self, target: &PreviewTarget);
	/// Replace the preview with a placeholder.
	fn clear(&mut self);
}

/// What an update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
	Unchanged,
	Shown,
	Relocated,
	Scheduled(TaskHandle),
	Cleared,
}

#[derive(Debug)]
pub struct PreviewCoordinator {
	delay: Duration,
	default_location: Option<Location>,
	last_shown: Option<PreviewTarget>,
	shown_once: bool,
	cleared: bool,
	timer: TaskSlot<PreviewTarget>,
}

impl PreviewCoordinator {
	#[must_use]
	pub fn new(delay: Duration, default_location: Option<Location>) -> Self {
		Self {
			delay,
			default_location,
			last_shown: None,
			shown_once: false,
			cleared: false,
			timer: TaskSlot::default(),
		}
	}

	#[must_use]
	pub fn last_shown(&self) -> Option<&PreviewTarget> {
		self.last_shown.as_ref()
	}

	#[must_use]
	pub fn pending(&self) -> Option<TaskHandle> {
		self.timer.pending()
	}

	/// React to the highlighted item changing (or not).
	pub fn update(
		&mut self,
		item: Option<&Item>,
		now: Instant,
		sink: &mut dyn PreviewSink,
	) -> PreviewAction {
		let Some(item) = item else {
			self.timer.cancel();
			self.last_shown = None;
			if self.cleared {
				return PreviewAction::Unchanged;
			}
			self.cleared = true;
			sink.clear();
			return PreviewAction::Cleared;
		};
		let target = PreviewTarget::for_item(item, self.default_location);

		if let Some(shown) = self.last_shown.as_mut()
			&& shown.identifier == target.identifier
		{
			// Back on the shown item; a reload queued for another one is stale.
			self.timer.cancel();
			if shown.location == target.location {
				return PreviewAction::Unchanged;
			}
			shown.location = target.location;
			sink.relocate(&target);
			return PreviewAction::Relocated;
		}

		if self.timer.peek() == Some(&target) {
			return PreviewAction::Unchanged;
		}

		let had_pending = self.timer.cancel().is_some();
		if !had_pending && !self.shown_once {
			self.display(target, sink);
			return PreviewAction::Shown;
		}
		debug!(identifier = %target.identifier, "preview reload scheduled");
		PreviewAction::Scheduled(self.timer.schedule(now + self.delay, target))
	}

	/// Fire the pending reload if its delay elapsed. Returns whether the
	/// preview changed.
	pub fn poll(&mut self, now: Instant, sink: &mut dyn PreviewSink) -> bool {
		let Some(target) = self.timer.fire_due(now) else {
			return false;
		};
		self.display(target, sink);
		true
	}

	/// Drop any pending reload.
	pub fn cancel(&mut self) {
		self.timer.cancel();
	}

	fn display(&mut self, target: PreviewTarget, sink: &mut dyn PreviewSink) {
		sink.show(&target);
		self.shown_once = true;
		self.cleared = false;
		self.last_shown = Some(target);
	}
}
