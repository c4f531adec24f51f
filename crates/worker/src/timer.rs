use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::{TaskClass, spawn};

/// Handle to a callback scheduled with [`schedule`].
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
	cancel: CancellationToken,
}

impl TimerHandle {
	/// Cancels the timer. Idempotent, and a no-op once the callback has run.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Returns true once [`Self::cancel`] has been called or the handle dropped.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}
}

impl Drop for TimerHandle {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}

/// Runs `callback` once after `delay` unless the returned handle is cancelled first.
///
/// A cancel racing the deadline may lose on a multi-threaded runtime;
/// callers needing exactly-once delivery must tag what the callback emits.
pub fn schedule<F>(class: TaskClass, delay: Duration, callback: F) -> TimerHandle
where
	F: FnOnce() + Send + 'static,
{
	let deadline = Instant::now() + delay;
	let cancel = CancellationToken::new();
	let token = cancel.clone();
	spawn(class, async move {
		tokio::select! {
			biased;
			_ = token.cancelled() => {
				tracing::trace!(delay_ms = delay.as_millis() as u64, "worker.timer.cancelled");
			}
			_ = sleep_until(deadline) => {
				if !token.is_cancelled() {
					callback();
				}
			}
		}
	});
	TimerHandle { cancel }
}
