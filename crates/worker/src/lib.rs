//! Shared async primitives for the tally controls.
//!
//! * [`TaskClass`] tags spawned work for observability.
//! * [`spawn`] routes futures onto the caller's runtime, or a shared fallback runtime.
//! * [`Epoch`]/[`EpochClock`]/[`EpochToken`] identify the latest issued request.
//! * [`schedule`] returns a [`TimerHandle`] whose cancellation is idempotent.

mod class;
mod epoch;
mod spawn;
mod timer;

pub use class::TaskClass;
pub use epoch::{Epoch, EpochClock, EpochToken};
pub use spawn::spawn;
pub use timer::{TimerHandle, schedule};
pub use tokio_util::sync::CancellationToken;
