//! Candidate source capability.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;

/// Asynchronous candidate source for the search-select control.
///
/// Implementations must tolerate repeated, overlapping and empty-string
/// invocations. The control never assumes a call completes.
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
	/// Returns candidates matching `query`. An empty query asks for the default list.
	async fn fetch(&self, query: &str) -> Result<Vec<T>, FetchError>;
}

#[async_trait]
impl<T, F> Fetcher<T> for Arc<F>
where
	F: Fetcher<T> + ?Sized,
{
	async fn fetch(&self, query: &str) -> Result<Vec<T>, FetchError> {
		(**self).fetch(query).await
	}
}

/// Closure-backed fetcher adapter.
pub struct FnFetcher<F, T> {
	f: F,
	_item: PhantomData<fn() -> T>,
}

impl<F, T> FnFetcher<F, T> {
	pub fn new(f: F) -> Self {
		Self { f, _item: PhantomData }
	}
}

#[async_trait]
impl<F, Fut, T> Fetcher<T> for FnFetcher<F, T>
where
	F: Fn(String) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Vec<T>, FetchError>> + Send,
	T: Send + 'static,
{
	async fn fetch(&self, query: &str) -> Result<Vec<T>, FetchError> {
		(self.f)(query.to_owned()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn fn_fetcher_forwards_query() {
		let fetcher = FnFetcher::new(|query: String| async move { Ok(vec![format!("{query}!")]) });
		let out = fetcher.fetch("acme").await.expect("fetch must succeed");
		assert_eq!(out, vec!["acme!".to_string()]);
	}

	#[tokio::test]
	async fn fn_fetcher_propagates_failure() {
		let fetcher = FnFetcher::new(|_query: String| async move { Err::<Vec<u8>, _>(FetchError::Status { status: 503 }) });
		assert!(matches!(fetcher.fetch("").await, Err(FetchError::Status { status: 503 })));
	}
}
