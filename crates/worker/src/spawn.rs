use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

/// Runtime used by controls driven from outside any tokio context.
fn fallback_runtime() -> &'static tokio::runtime::Runtime {
	static FALLBACK: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	FALLBACK.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("tally-fallback")
			.build()
			.expect("failed to build tally fallback runtime")
	})
}

/// Spawns an async task on the current runtime, falling back to a shared one.
///
/// Controls may be constructed outside any runtime (e.g. in a synchronous UI
/// loop); their timers and fetches still need somewhere to run.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	match tokio::runtime::Handle::try_current() {
		Ok(handle) => {
			tracing::trace!(worker_class = class.as_str(), "worker.spawn");
			handle.spawn(fut)
		}
		Err(_) => {
			tracing::trace!(worker_class = class.as_str(), "worker.spawn.fallback");
			fallback_runtime().spawn(fut)
		}
	}
}
