use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tally_select::{FetchError, Fetcher};

use crate::auth::AuthContext;
use crate::error::TransportError;
use crate::transport::{ServiceRequest, Transport};

/// Default name of the search query parameter.
pub const DEFAULT_QUERY_PARAM: &str = "search";

/// [`Fetcher`] backed by a JSON list endpoint.
///
/// The bearer is read from the [`AuthContext`] on every call, so a login
/// or logout between keystrokes is honoured by the next fetch.
pub struct ServiceFetcher<T> {
	transport: Arc<dyn Transport>,
	auth: AuthContext,
	path: String,
	query_param: String,
	envelope: Option<String>,
	_item: PhantomData<fn() -> T>,
}

impl<T> ServiceFetcher<T> {
	pub fn new(transport: Arc<dyn Transport>, auth: AuthContext, path: impl Into<String>) -> Self {
		Self {
			transport,
			auth,
			path: path.into(),
			query_param: DEFAULT_QUERY_PARAM.to_string(),
			envelope: None,
			_item: PhantomData,
		}
	}

	/// Sends the query under `name` instead of `search`.
	pub fn query_param(mut self, name: impl Into<String>) -> Self {
		self.query_param = name.into();
		self
	}

	/// Reads the list from `field` of a response object, e.g. `{"data": [...]}`.
	pub fn envelope(mut self, field: impl Into<String>) -> Self {
		self.envelope = Some(field.into());
		self
	}

	fn request(&self, query: &str) -> Result<ServiceRequest, FetchError> {
		let bearer = self.auth.bearer().map_err(|err| FetchError::Other(err.into()))?;
		let mut request = ServiceRequest::get(self.path.clone());
		if !query.is_empty() {
			request = request.param(self.query_param.clone(), query);
		}
		request.bearer = bearer;
		Ok(request)
	}
}

impl<T: DeserializeOwned> ServiceFetcher<T> {
	fn decode(&self, body: serde_json::Value) -> Result<Vec<T>, FetchError> {
		let list = match (&self.envelope, body) {
			(None, body) => body,
			(Some(field), serde_json::Value::Object(mut object)) => object
				.remove(field)
				.ok_or_else(|| FetchError::Decode(format!("missing `{field}` field")))?,
			(Some(field), _) => return Err(FetchError::Decode(format!("expected object with `{field}` field"))),
		};
		serde_json::from_value(list).map_err(|err| FetchError::Decode(err.to_string()))
	}
}

impl<T> fmt::Debug for ServiceFetcher<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ServiceFetcher")
			.field("path", &self.path)
			.field("query_param", &self.query_param)
			.field("envelope", &self.envelope)
			.finish_non_exhaustive()
	}
}

fn map_transport_error(err: TransportError) -> FetchError {
	match err {
		TransportError::Status { status: 401 } => FetchError::Unauthorized,
		TransportError::Status { status } => FetchError::Status { status },
		TransportError::Connection(message) => FetchError::Transport(message),
		TransportError::Body(err) => FetchError::Decode(err.to_string()),
	}
}

#[async_trait]
impl<T> Fetcher<T> for ServiceFetcher<T>
where
	T: DeserializeOwned + Send + 'static,
{
	async fn fetch(&self, query: &str) -> Result<Vec<T>, FetchError> {
		let request = self.request(query)?;
		tracing::debug!(path = %request.path, authenticated = request.bearer.is_some(), "session.fetch");
		let body = self.transport.get(request).await.map_err(map_transport_error)?;
		self.decode(body)
	}
}
