//! Tunables shared by every search-select instance.
//!
//! ```toml
//! debounce_ms = 300
//! abort_superseded = false
//! max_visible = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default quiet interval before a typed query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

const MAX_DEBOUNCE_MS: u64 = 10_000;

/// File name looked up under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "select.toml";

/// Behavioural configuration for [`crate::SearchSelect`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectConfig {
	/// Quiet interval in milliseconds before typed text becomes a query.
	pub debounce_ms: u64,
	/// Drop superseded fetch futures instead of letting them run to completion.
	pub abort_superseded: bool,
	/// Number of rows a renderer should show before scrolling.
	pub max_visible: usize,
}

impl Default for SelectConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
			abort_superseded: false,
			max_visible: 10,
		}
	}
}

impl SelectConfig {
	/// Returns the debounce interval as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Loads `$XDG_CONFIG_HOME/tally/select.toml` when present, defaults otherwise.
	pub fn load_default() -> Result<Self, ConfigError> {
		match default_config_path() {
			Some(path) if path.is_file() => {
				tracing::debug!(path = %path.display(), "select.config.load");
				Self::load(&path)
			}
			_ => Ok(Self::default()),
		}
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_visible == 0 {
			return Err(ConfigError::Invalid {
				field: "max_visible",
				reason: "must be at least 1".to_string(),
			});
		}
		if self.debounce_ms > MAX_DEBOUNCE_MS {
			return Err(ConfigError::Invalid {
				field: "debounce_ms",
				reason: format!("must not exceed {MAX_DEBOUNCE_MS}"),
			});
		}
		Ok(())
	}
}

/// Platform location of the shared select config file.
pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("tally").join(CONFIG_FILE_NAME))
}
