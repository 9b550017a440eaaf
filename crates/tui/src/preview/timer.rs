//! A single cancellable scheduled task.

use std::time::Instant;

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
	handle: TaskHandle,
	due: Instant,
	payload: T,
}

/// Holds at most one pending task; scheduling replaces the previous one.
#[derive(Debug)]
pub struct TaskSlot<T> {
	next_id: u64,
	pending: Option<Scheduled<T>>,
}

impl<T> Default for TaskSlot<T> {
	fn default() -> Self {
		Self {
			next_id: 0,
			pending: None,
		}
	}
}

impl<T> TaskSlot<T> {
	/// Cancel any pending task and schedule `payload` to fire at `due`.
	pub fn schedule(&mut self, due: Instant, payload: T) -> TaskHandle {
		self.cancel();
		self.next_id += 1;
		let handle = TaskHandle(self.next_id);
		self.pending = Some(Scheduled {
			handle,
			due,
			payload,
		});
		handle
	}

	/// Drop the pending task, returning its payload.
	pub fn cancel(&mut self) -> Option<T> {
		self.pending.take().map(|task| task.payload)
	}

	#[must_use]
	pub fn pending(&self) -> Option<TaskHandle> {
		self.pending.as_ref().map(|task| task.handle)
	}

	#[must_use]
	pub fn peek(&self) -> Option<&T> {
		self.pending.as_ref().map(|task| &task.payload)
	}

	/// Take the payload if its deadline has passed.
	pub fn fire_due(&mut self, now: Instant) -> Option<T> {
		if self.pending.as_ref().is_some_and(|task| task.due <= now) {
			return self.cancel();
		}
		None
	}
}
