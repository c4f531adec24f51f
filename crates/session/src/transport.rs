use async_trait::async_trait;

use crate::error::TransportError;

/// One GET against a service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
	/// Path relative to the API base, e.g. `/partners`.
	pub path: String,
	/// Query string pairs in order.
	pub query: Vec<(String, String)>,
	/// `Authorization` header value, when authenticated.
	pub bearer: Option<String>,
}

impl ServiceRequest {
	pub fn get(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			query: Vec::new(),
			bearer: None,
		}
	}

	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}
}

/// JSON transport seam; the HTTP client lives with the caller.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn get(&self, request: ServiceRequest) -> Result<serde_json::Value, TransportError>;
}
