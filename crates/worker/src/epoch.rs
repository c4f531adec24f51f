use std::fmt;

use tokio_util::sync::CancellationToken;

/// Identifier of one issued request.
///
/// Epochs are only meaningful relative to the [`EpochClock`] that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
	/// Epoch before any request has been issued.
	pub const ZERO: Self = Self(0);

	/// Returns the raw counter value.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Epoch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Strictly increasing epoch source owned by a single coordinator.
#[derive(Debug, Default)]
pub struct EpochClock {
	current: Epoch,
}

impl EpochClock {
	/// Creates a clock at [`Epoch::ZERO`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues the next epoch, which becomes current.
	pub fn advance(&mut self) -> Epoch {
		self.current = Epoch(self.current.0.wrapping_add(1));
		self.current
	}

	/// Returns the latest issued epoch.
	pub const fn current(&self) -> Epoch {
		self.current
	}

	/// Returns true when `epoch` is the latest issued epoch.
	pub fn is_current(&self, epoch: Epoch) -> bool {
		self.current != Epoch::ZERO && self.current == epoch
	}
}

/// Epoch-scoped cancellation token for in-flight work.
#[derive(Debug, Clone)]
pub struct EpochToken {
	epoch: Epoch,
	cancel: CancellationToken,
}

impl EpochToken {
	/// Creates a token for `epoch` that is cancelled together with `parent`.
	pub fn child_of(epoch: Epoch, parent: &CancellationToken) -> Self {
		Self {
			epoch,
			cancel: parent.child_token(),
		}
	}

	/// Returns the epoch this token belongs to.
	pub const fn epoch(&self) -> Epoch {
		self.epoch
	}

	/// Returns true when cancellation is requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation. Idempotent.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}
