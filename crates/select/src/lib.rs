//! Asynchronous search-select control.
//!
//! A headless combobox: typed text is debounced into queries, each query is
//! fetched under a fresh epoch, and only the latest epoch may update the
//! candidate list. The committed value is owned by the caller; the control
//! mirrors its label and reports picks through callbacks.
//!
//! # Example
//!
//! ```ignore
//! use tally_select::{FnFetcher, Projection, SearchSelect, SelectOptions};
//!
//! let fetcher = FnFetcher::new(|query: String| async move { partners.search(&query).await });
//! let projection = Projection::new(|p: &Partner| p.id.to_string(), |p: &Partner| p.name.clone());
//! let mut select = SearchSelect::new(
//! 	SelectOptions::new(fetcher, projection)
//! 		.placeholder("Select a partner")
//! 		.empty_message("No partners found")
//! 		.on_change(move |id| form.set_partner(id)),
//! );
//!
//! select.open();
//! select.input("acme");
//! select.settle().await;
//! select.select(0);
//! ```

mod action;
mod config;
mod control;
mod debounce;
mod error;
mod fetch;
mod fetcher;
mod highlight;
mod item;
mod options;
mod selection;
mod view;
mod visibility;

#[cfg(test)]
mod testing;

pub use action::SelectAction;
pub use config::{CONFIG_FILE_NAME, DEFAULT_DEBOUNCE, SelectConfig, default_config_path};
pub use control::SearchSelect;
pub use debounce::{Debounced, Debouncer};
pub use error::{ConfigError, FetchError};
pub use fetch::{ErrorObserver, FetchCoordinator, FetchOutcome, FetchSettled, Settlement};
pub use fetcher::{Fetcher, FnFetcher};
pub use highlight::Highlight;
pub use item::{OptionContent, Projection, SelectItem};
pub use options::{ChangeHandler, ObjectHandler, OptionRenderer, SelectOptions};
pub use selection::{Selection, SelectionState};
pub use tally_worker::Epoch;
pub use view::{OptionRow, SelectView};
pub use visibility::Visibility;
