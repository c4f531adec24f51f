//! Epoch-gated candidate fetching.
//!
//! # Purpose
//!
//! * Issues one fetch per committed query (or first open) and owns the
//!   resulting candidate list and loading flag.
//! * Discards resolutions that belong to a superseded epoch.
//!
//! # Mental model
//!
//! * Every [`FetchCoordinator::issue`] advances the epoch clock and captures
//!   the new epoch into the spawned task.
//! * The task reports a [`FetchSettled`] through the caller's sink; the owner
//!   hands it back to [`FetchCoordinator::apply`], which compares epochs.
//! * Nothing outside `apply` mutates the candidate list.
//!
//! # Invariants
//!
//! * Must apply at most one settlement per epoch.
//! * Must never let a settlement for a non-current epoch touch candidates or loading state.
//! * Must replace candidates wholesale; results are never merged.
//! * Must clear candidates and loading on a current-epoch failure and report it once.
//!
//! # Concurrency & ordering
//!
//! * Overlapping fetches are normal; resolution order is irrelevant because
//!   only the current epoch is admitted.
//! * Each fetch runs under a child of the coordinator's root token. With
//!   `abort_superseded`, issuing a new epoch cancels the previous token and
//!   the old fetch future is dropped mid-flight.
//! * Dropping the coordinator cancels the root token, so no task outlives it
//!   with observable effects.
//!
//! # Failure modes & recovery
//!
//! * Fetch error on the current epoch: logged at `warn`, forwarded to the
//!   observer, presented as an empty list. The next issue retries normally.
//! * Stale settlement: logged at `trace`, otherwise inert.
//! * Hung fetch: loading stays true until it resolves or is superseded.

use std::fmt;
use std::sync::Arc;

use tally_worker::{CancellationToken, Epoch, EpochClock, EpochToken, TaskClass};

use crate::error::FetchError;
use crate::fetcher::Fetcher;

/// Observer receiving fetch failures for the current epoch.
pub type ErrorObserver = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Terminal state of one spawned fetch.
#[derive(Debug)]
pub enum FetchOutcome<T> {
	Loaded(Vec<T>),
	Failed(FetchError),
	/// Future was dropped after its epoch was cancelled.
	Aborted,
}

/// Epoch-tagged fetch result travelling back to the owner.
#[derive(Debug)]
pub struct FetchSettled<T> {
	epoch: Epoch,
	outcome: FetchOutcome<T>,
}

impl<T> FetchSettled<T> {
	pub fn epoch(&self) -> Epoch {
		self.epoch
	}
}

/// What [`FetchCoordinator::apply`] did with a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
	/// Superseded epoch; nothing changed.
	Stale,
	/// Candidates replaced with `count` items.
	Replaced { count: usize },
	/// Current epoch failed; candidates cleared.
	Failed,
	/// Current epoch was aborted; loading cleared.
	Aborted,
}

impl Settlement {
	/// Returns true when observable state changed.
	pub fn is_applied(self) -> bool {
		self != Self::Stale
	}
}

/// Owner of the candidate list and request epochs for one control.
pub struct FetchCoordinator<T> {
	fetcher: Arc<dyn Fetcher<T>>,
	clock: EpochClock,
	root: CancellationToken,
	in_flight: Option<EpochToken>,
	issued_query: Option<String>,
	failed: bool,
	loading: bool,
	candidates: Vec<T>,
	abort_superseded: bool,
	on_error: Option<ErrorObserver>,
}

impl<T> fmt::Debug for FetchCoordinator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FetchCoordinator")
			.field("epoch", &self.clock.current())
			.field("issued_query", &self.issued_query)
			.field("loading", &self.loading)
			.field("failed", &self.failed)
			.field("candidates", &self.candidates.len())
			.finish()
	}
}

impl<T> FetchCoordinator<T>
where
	T: Send + 'static,
{
	pub fn new(fetcher: Arc<dyn Fetcher<T>>, abort_superseded: bool) -> Self {
		Self {
			fetcher,
			clock: EpochClock::new(),
			root: CancellationToken::new(),
			in_flight: None,
			issued_query: None,
			failed: false,
			loading: false,
			candidates: Vec::new(),
			abort_superseded,
			on_error: None,
		}
	}

	/// Installs the failure observer.
	pub fn set_error_observer(&mut self, observer: Option<ErrorObserver>) {
		self.on_error = observer;
	}

	/// Returns true when `query` differs from the current epoch's query, or that epoch failed.
	pub fn needs_fetch(&self, query: &str) -> bool {
		self.failed || self.issued_query.as_deref() != Some(query)
	}

	/// Starts a fetch for `query` under a fresh epoch.
	///
	/// `sink` receives the settlement from the spawned task; it must route it
	/// back to [`Self::apply`] on the owning side.
	pub fn issue<S>(&mut self, query: String, sink: S) -> Epoch
	where
		S: FnOnce(FetchSettled<T>) + Send + 'static,
	{
		let epoch = self.clock.advance();
		if let Some(previous) = self.in_flight.take()
			&& self.abort_superseded
		{
			tracing::trace!(epoch = %previous.epoch(), "select.fetch.abort_superseded");
			previous.cancel();
		}
		if self.issued_query.as_deref() != Some(query.as_str()) {
			self.candidates.clear();
		}

		let token = EpochToken::child_of(epoch, &self.root);
		self.in_flight = Some(token.clone());
		self.issued_query = Some(query.clone());
		self.failed = false;
		self.loading = true;

		tracing::debug!(epoch = %epoch, query = %query, "select.fetch.issue");
		let fetcher = Arc::clone(&self.fetcher);
		tally_worker::spawn(TaskClass::Background, async move {
			let outcome = tokio::select! {
				biased;
				_ = token.cancelled() => FetchOutcome::Aborted,
				result = fetcher.fetch(&query) => match result {
					Ok(items) => FetchOutcome::Loaded(items),
					Err(err) => FetchOutcome::Failed(err),
				},
			};
			sink(FetchSettled { epoch, outcome });
		});
		epoch
	}

	/// Applies a settlement if its epoch is still current.
	pub fn apply(&mut self, settled: FetchSettled<T>) -> Settlement {
		let FetchSettled { epoch, outcome } = settled;
		if !self.clock.is_current(epoch) {
			tracing::trace!(epoch = %epoch, current = %self.clock.current(), "select.fetch.stale");
			return Settlement::Stale;
		}
		if !self.loading {
			// Already settled this epoch.
			return Settlement::Stale;
		}

		self.in_flight = None;
		self.loading = false;
		match outcome {
			FetchOutcome::Loaded(items) => {
				let count = items.len();
				self.candidates = items;
				tracing::debug!(epoch = %epoch, count, "select.fetch.loaded");
				Settlement::Replaced { count }
			}
			FetchOutcome::Failed(err) => {
				self.candidates.clear();
				self.failed = true;
				tracing::warn!(epoch = %epoch, query = ?self.issued_query, error = %err, "select.fetch.failed");
				if let Some(observer) = &self.on_error {
					observer(&err);
				}
				Settlement::Failed
			}
			FetchOutcome::Aborted => Settlement::Aborted,
		}
	}

	/// Current candidate list.
	pub fn candidates(&self) -> &[T] {
		&self.candidates
	}

	/// Returns true while the current epoch is unresolved.
	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// Latest issued epoch.
	pub fn epoch(&self) -> Epoch {
		self.clock.current()
	}

	/// Query of the latest issued epoch.
	pub fn issued_query(&self) -> Option<&str> {
		self.issued_query.as_deref()
	}
}

impl<T> Drop for FetchCoordinator<T> {
	fn drop(&mut self) {
		self.root.cancel();
	}
}

#[cfg(test)]
mod tests;
