//! Quiet-period coalescing of raw input changes.

use std::time::Duration;

use tally_worker::{TaskClass, TimerHandle, schedule};

/// A value that survived its quiet period, tagged with the push that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<V> {
	ticket: u64,
	value: V,
}

/// Restartable one-shot timer over the latest pushed value.
///
/// Each [`push`](Self::push) cancels the previous timer. Emissions are
/// tagged with a ticket, and [`accept`](Self::accept) only admits the ticket
/// of the most recent push, so a timer that fired just before being
/// superseded stays inert.
#[derive(Debug)]
pub struct Debouncer {
	delay: Duration,
	ticket: u64,
	pending: Option<TimerHandle>,
}

impl Debouncer {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			ticket: 0,
			pending: None,
		}
	}

	/// Returns the configured quiet interval.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Restarts the quiet period with `value`; `emit` runs once it elapses.
	pub fn push<V, F>(&mut self, value: V, emit: F)
	where
		V: Send + 'static,
		F: FnOnce(Debounced<V>) + Send + 'static,
	{
		self.cancel();
		self.ticket = self.ticket.wrapping_add(1);
		let ticket = self.ticket;
		self.pending = Some(schedule(TaskClass::Interactive, self.delay, move || emit(Debounced { ticket, value })));
	}

	/// Admits an emission if it belongs to the latest push.
	pub fn accept<V>(&mut self, debounced: Debounced<V>) -> Option<V> {
		if self.pending.is_none() || debounced.ticket != self.ticket {
			tracing::trace!(ticket = debounced.ticket, latest = self.ticket, "select.debounce.superseded");
			return None;
		}
		self.pending = None;
		Some(debounced.value)
	}

	/// Returns true while a push is waiting out its quiet period.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Drops any pending emission. Safe to call repeatedly.
	pub fn cancel(&mut self) {
		if let Some(timer) = self.pending.take() {
			timer.cancel();
		}
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		self.cancel();
	}
}
