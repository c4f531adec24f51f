//! Error types for candidate fetching and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`crate::Fetcher`].
///
/// Never surfaced to the end user: the control degrades to an empty
/// candidate list and forwards the error to its diagnostic sink.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The transport could not complete the request.
	#[error("transport failure: {0}")]
	Transport(String),

	/// The service rejected the credentials attached to the request.
	#[error("request was not authorized")]
	Unauthorized,

	/// The service answered with a non-success status.
	#[error("service returned status {status}")]
	Status {
		/// HTTP-style status code.
		status: u16,
	},

	/// The response could not be decoded into candidates.
	#[error("failed to decode candidates: {0}")]
	Decode(String),

	/// Any other fetcher-specific failure.
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// Errors that can occur when loading a [`crate::SelectConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A field holds a value outside its accepted range.
	#[error("invalid value for `{field}`: {reason}")]
	Invalid {
		/// Offending field name.
		field: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}
