use thiserror::Error;

/// Misuse of the [`crate::AuthContext`] lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
	/// `set`/`bearer` called before `init`.
	#[error("auth context used before init")]
	NotInitialized,
	/// `init` called twice.
	#[error("auth context already initialized")]
	AlreadyInitialized,
}

/// Failure reported by a [`crate::Transport`].
#[derive(Debug, Error)]
pub enum TransportError {
	/// Connection-level failure (DNS, refused, reset, timeout).
	#[error("connection failed: {0}")]
	Connection(String),
	/// The service answered with a non-success status.
	#[error("service returned status {status}")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// The body was not valid JSON.
	#[error("invalid response body: {0}")]
	Body(#[from] serde_json::Error),
}
