//! Polling schedule for background scan progress.

use std::time::Duration;

use crate::backend::ScanProgress;

/// Interval for the first [`FAST_POLLS`] polls.
pub const FAST_INTERVAL: Duration = Duration::from_millis(50);
/// Polls made at [`FAST_INTERVAL`] before backing off.
pub const FAST_POLLS: u32 = 10;
/// Upper bound for the backed-off interval.
pub const MAX_INTERVAL: Duration = Duration::from_millis(800);

/// Restartable poller that reports scan progress until the backend finishes.
///
/// The interval stays short for the first few polls and then doubles up to
/// [`MAX_INTERVAL`].
#[derive(Debug, Clone, Default)]
pub struct ScanPoller {
	polls: u32,
	done: bool,
	last: ScanProgress,
}

impl ScanPoller {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Start over, e.g. when a different backend becomes active.
	pub fn restart(&mut self) {
		*self = Self::default();
	}

	#[must_use]
	pub fn is_done(&self) -> bool {
		self.done
	}

	#[must_use]
	pub fn last(&self) -> ScanProgress {
		self.last
	}

	/// Record one poll result. Returns the delay before the next poll, or
	/// `None` once the scan completed.
	pub fn observe(&mut self, progress: ScanProgress) -> Option<Duration> {
		self.last = progress;
		if !progress.is_scanning {
			self.done = true;
			return None;
		}
		let delay = Self::delay_for(self.polls);
		self.polls = self.polls.saturating_add(1);
		Some(delay)
	}

	fn delay_for(poll: u32) -> Duration {
		if poll < FAST_POLLS {
			return FAST_INTERVAL;
		}
		let exponent = (poll - FAST_POLLS + 1).min(8);
		FAST_INTERVAL
			.saturating_mul(1 << exponent)
			.min(MAX_INTERVAL)
	}
}
