//! Construction-time options for [`crate::SearchSelect`].

use std::fmt;
use std::sync::Arc;

use crate::config::SelectConfig;
use crate::error::FetchError;
use crate::fetch::ErrorObserver;
use crate::fetcher::Fetcher;
use crate::item::{OptionContent, Projection};

/// Receives the identifier of a picked candidate.
pub type ChangeHandler = Box<dyn FnMut(&str) + Send>;
/// Receives the full picked record.
pub type ObjectHandler<T> = Box<dyn FnMut(&T) + Send>;
/// Maps a candidate to row content.
pub type OptionRenderer<T> = Box<dyn Fn(&T) -> OptionContent + Send + Sync>;

/// Capability set a search-select is built from.
pub struct SelectOptions<T> {
	pub(crate) fetcher: Arc<dyn Fetcher<T>>,
	pub(crate) projection: Projection<T>,
	pub(crate) value: Option<String>,
	pub(crate) on_change: Option<ChangeHandler>,
	pub(crate) render_option: Option<OptionRenderer<T>>,
	pub(crate) on_select_object: Option<ObjectHandler<T>>,
	pub(crate) initial_label: Option<String>,
	pub(crate) placeholder: String,
	pub(crate) empty_message: String,
	pub(crate) disabled: bool,
	pub(crate) config: SelectConfig,
	pub(crate) on_fetch_error: Option<ErrorObserver>,
}

impl<T: 'static> SelectOptions<T> {
	/// Options with only the required capabilities; everything else defaults.
	pub fn new<F>(fetcher: F, projection: Projection<T>) -> Self
	where
		F: Fetcher<T> + 'static,
	{
		Self {
			fetcher: Arc::new(fetcher),
			projection,
			value: None,
			on_change: None,
			render_option: None,
			on_select_object: None,
			initial_label: None,
			placeholder: String::new(),
			empty_message: String::new(),
			disabled: false,
			config: SelectConfig::default(),
			on_fetch_error: None,
		}
	}

	/// Current externally owned value.
	pub fn value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn on_change<F>(mut self, f: F) -> Self
	where
		F: FnMut(&str) + Send + 'static,
	{
		self.on_change = Some(Box::new(f));
		self
	}

	pub fn render_option<F>(mut self, f: F) -> Self
	where
		F: Fn(&T) -> OptionContent + Send + Sync + 'static,
	{
		self.render_option = Some(Box::new(f));
		self
	}

	pub fn on_select_object<F>(mut self, f: F) -> Self
	where
		F: FnMut(&T) + Send + 'static,
	{
		self.on_select_object = Some(Box::new(f));
		self
	}

	/// Label shown for the initial value before any fetch.
	pub fn initial_label(mut self, label: impl Into<String>) -> Self {
		self.initial_label = Some(label.into());
		self
	}

	pub fn placeholder(mut self, text: impl Into<String>) -> Self {
		self.placeholder = text.into();
		self
	}

	/// Text shown when an open list has no candidates.
	pub fn empty_message(mut self, text: impl Into<String>) -> Self {
		self.empty_message = text.into();
		self
	}

	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	pub fn config(mut self, config: SelectConfig) -> Self {
		self.config = config;
		self
	}

	/// Diagnostic sink for fetch failures, in addition to `tracing`.
	pub fn on_fetch_error<F>(mut self, f: F) -> Self
	where
		F: Fn(&FetchError) + Send + Sync + 'static,
	{
		self.on_fetch_error = Some(Arc::new(f));
		self
	}
}

impl<T> fmt::Debug for SelectOptions<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectOptions")
			.field("value", &self.value)
			.field("initial_label", &self.initial_label)
			.field("placeholder", &self.placeholder)
			.field("empty_message", &self.empty_message)
			.field("disabled", &self.disabled)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
