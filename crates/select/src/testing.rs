//! Fetchers and items shared by unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::{FetchError, Fetcher, Projection, SelectItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Company {
	pub id: String,
	pub name: String,
}

pub(crate) fn company(id: &str, name: &str) -> Company {
	Company {
		id: id.to_string(),
		name: name.to_string(),
	}
}

impl SelectItem for Company {
	fn select_id(&self) -> String {
		self.id.clone()
	}

	fn select_label(&self) -> String {
		self.name.clone()
	}
}

pub(crate) fn projection() -> Projection<Company> {
	Projection::from_item()
}

type Reply = Result<Vec<Company>, FetchError>;

/// Fetcher whose calls stay pending until the test resolves them.
#[derive(Default)]
pub(crate) struct GatedFetcher {
	calls: Mutex<Vec<String>>,
	gates: Mutex<Vec<(String, oneshot::Sender<Reply>)>>,
}

impl GatedFetcher {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	/// Resolves the oldest pending call for `query`. Returns false if none is waiting.
	pub fn resolve(&self, query: &str, reply: Reply) -> bool {
		let mut gates = self.gates.lock();
		let Some(pos) = gates.iter().position(|(q, _)| q == query) else {
			return false;
		};
		let (_, tx) = gates.remove(pos);
		tx.send(reply).is_ok()
	}

	/// Returns true if the pending call for `query` has been dropped by its caller.
	pub fn is_abandoned(&self, query: &str) -> bool {
		self.gates.lock().iter().find(|(q, _)| q == query).is_some_and(|(_, tx)| tx.is_closed())
	}

	pub async fn wait_for_calls(&self, count: usize) {
		for _ in 0..256 {
			if self.calls.lock().len() >= count {
				return;
			}
			tokio::task::yield_now().await;
		}
		panic!("fetcher saw {} calls, expected {count}", self.calls.lock().len());
	}
}

#[async_trait]
impl Fetcher<Company> for GatedFetcher {
	async fn fetch(&self, query: &str) -> Result<Vec<Company>, FetchError> {
		let (tx, rx) = oneshot::channel();
		self.calls.lock().push(query.to_string());
		self.gates.lock().push((query.to_string(), tx));
		rx.await.unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string())))
	}
}

/// Fetcher answering from a fixed table after an optional latency.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
	replies: HashMap<String, Vec<Company>>,
	failing: Vec<String>,
	latency: Duration,
	calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reply(mut self, query: &str, items: Vec<Company>) -> Self {
		self.replies.insert(query.to_string(), items);
		self
	}

	pub fn fail(mut self, query: &str) -> Self {
		self.failing.push(query.to_string());
		self
	}

	pub fn latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}
}

#[async_trait]
impl Fetcher<Company> for ScriptedFetcher {
	async fn fetch(&self, query: &str) -> Result<Vec<Company>, FetchError> {
		self.calls.lock().push(query.to_string());
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
		if self.failing.iter().any(|q| q == query) {
			return Err(FetchError::Status { status: 500 });
		}
		Ok(self.replies.get(query).cloned().unwrap_or_default())
	}
}
