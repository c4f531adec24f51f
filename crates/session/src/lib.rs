//! Request-side context for REST-backed candidate sources.
//!
//! The bearer token lives in an explicit [`AuthContext`] handed to every
//! request issuer; there is no process-global token. [`ServiceFetcher`]
//! adapts a [`Transport`] endpoint into a [`tally_select::Fetcher`].

mod auth;
mod error;
mod service;
mod transport;

pub use auth::{AuthContext, AuthToken};
pub use error::{AuthError, TransportError};
pub use service::ServiceFetcher;
pub use transport::{ServiceRequest, Transport};
