//! The search-select control.
//!
//! # Data flow
//!
//! 1. [`SearchSelect::input`] pushes raw text into the debouncer.
//! 2. The debounce timer emits a ticketed query onto the control's event channel.
//! 3. [`SearchSelect::pump`] (or [`SearchSelect::settle`]) admits the latest
//!    ticket and asks the coordinator to fetch when the query changed.
//! 4. The fetch task posts an epoch-tagged settlement onto the same channel.
//! 5. `pump` hands it to the coordinator, which drops it unless its epoch is current.
//!
//! All state lives on the owning side; spawned tasks only send events.

use std::fmt;

use tokio::sync::mpsc;

use crate::action::SelectAction;
use crate::debounce::{Debounced, Debouncer};
use crate::fetch::{FetchCoordinator, FetchSettled};
use crate::highlight::Highlight;
use crate::item::{OptionContent, Projection};
use crate::options::{ChangeHandler, ObjectHandler, OptionRenderer, SelectOptions};
use crate::selection::Selection;
use crate::view::{OptionRow, SelectView};
use crate::visibility::Visibility;
use crate::{Epoch, SelectionState};

enum ControlEvent<T> {
	Query(Debounced<String>),
	Fetch(FetchSettled<T>),
}

/// Asynchronous search-select over candidates of type `T`.
///
/// Dropping the control cancels its debounce timer and every in-flight fetch.
pub struct SearchSelect<T> {
	projection: Projection<T>,
	coordinator: FetchCoordinator<T>,
	debouncer: Debouncer,
	selection: Selection,
	visibility: Visibility,
	highlight: Highlight,
	query: String,
	committed_query: String,
	placeholder: String,
	empty_message: String,
	disabled: bool,
	on_change: Option<ChangeHandler>,
	on_select_object: Option<ObjectHandler<T>>,
	render_option: Option<OptionRenderer<T>>,
	events_tx: mpsc::UnboundedSender<ControlEvent<T>>,
	events_rx: mpsc::UnboundedReceiver<ControlEvent<T>>,
}

impl<T> fmt::Debug for SearchSelect<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchSelect")
			.field("selection", &self.selection)
			.field("visibility", &self.visibility)
			.field("query", &self.query)
			.field("committed_query", &self.committed_query)
			.field("coordinator", &self.coordinator)
			.field("disabled", &self.disabled)
			.finish_non_exhaustive()
	}
}

impl<T> SearchSelect<T>
where
	T: Send + 'static,
{
	pub fn new(options: SelectOptions<T>) -> Self {
		let SelectOptions {
			fetcher,
			projection,
			value,
			on_change,
			render_option,
			on_select_object,
			initial_label,
			placeholder,
			empty_message,
			disabled,
			config,
			on_fetch_error,
		} = options;

		let mut coordinator = FetchCoordinator::new(fetcher, config.abort_superseded);
		coordinator.set_error_observer(on_fetch_error);
		let (events_tx, events_rx) = mpsc::unbounded_channel();

		Self {
			projection,
			coordinator,
			debouncer: Debouncer::new(config.debounce()),
			selection: Selection::new(value, initial_label),
			visibility: Visibility::Closed,
			highlight: Highlight::new(config.max_visible),
			query: String::new(),
			committed_query: String::new(),
			placeholder,
			empty_message,
			disabled,
			on_change,
			on_select_object,
			render_option,
			events_tx,
			events_rx,
		}
	}

	/// Opens the candidate list.
	///
	/// Fetches the committed query only when no candidates are loaded and
	/// nothing is loading, so reopening after a pick costs no request.
	pub fn open(&mut self) -> bool {
		if self.disabled || !self.visibility.open() {
			return false;
		}
		if self.coordinator.candidates().is_empty() && !self.coordinator.is_loading() {
			self.issue_fetch(self.committed_query.clone());
		}
		true
	}

	/// Closes the candidate list without picking. Never fetches.
	pub fn dismiss(&mut self) -> bool {
		let closed = self.visibility.close();
		if closed {
			self.highlight.reset();
		}
		closed
	}

	/// Records a raw change of the search text.
	pub fn input(&mut self, text: impl Into<String>) {
		let text = text.into();
		if self.disabled || text == self.query {
			return;
		}
		self.query.clone_from(&text);
		let tx = self.events_tx.clone();
		self.debouncer.push(text, move |debounced| {
			let _ = tx.send(ControlEvent::Query(debounced));
		});
	}

	/// Picks the candidate at `index`, closing the list.
	pub fn select(&mut self, index: usize) -> bool {
		if self.disabled {
			return false;
		}
		let Some(item) = self.coordinator.candidates().get(index) else {
			return false;
		};
		let id = self.projection.id(item);
		let label = self.projection.label(item);
		tracing::debug!(id = %id, "select.pick");

		self.selection.select(id.clone(), label);
		if let Some(on_change) = &mut self.on_change {
			on_change(&id);
		}
		if let Some(on_select_object) = &mut self.on_select_object {
			on_select_object(item);
		}
		self.visibility.close();
		self.highlight.reset();
		true
	}

	/// Applies a keyboard action.
	pub fn handle(&mut self, action: SelectAction) -> bool {
		if self.disabled {
			return false;
		}
		match action {
			SelectAction::MoveHighlight { delta } => {
				if !self.visibility.is_open() {
					return false;
				}
				let before = self.highlight.index();
				self.highlight.move_by(delta, self.coordinator.candidates().len());
				before != self.highlight.index()
			}
			SelectAction::Confirm => {
				if !self.visibility.is_open() {
					return false;
				}
				self.select(self.highlight.index().unwrap_or(0))
			}
			SelectAction::Dismiss => self.dismiss(),
		}
	}

	/// Mirrors the externally owned value. An empty value clears the label.
	pub fn set_value(&mut self, value: Option<String>) -> bool {
		let projection = &self.projection;
		let candidates = self.coordinator.candidates();
		self.selection.sync_value(value, |id| {
			candidates.iter().find(|item| projection.id(item) == id).map(|item| projection.label(item))
		})
	}

	/// Supplies the label for a value known before any fetch.
	pub fn set_initial_label(&mut self, label: Option<String>) -> bool {
		self.selection.seed_label(label)
	}

	/// Enables or disables interaction.
	///
	/// Disabling closes the list, drops pending input and rewinds the search
	/// text to the last committed query.
	pub fn set_disabled(&mut self, disabled: bool) {
		if disabled == self.disabled {
			return;
		}
		self.disabled = disabled;
		if disabled {
			self.debouncer.cancel();
			self.query.clone_from(&self.committed_query);
			self.dismiss();
		}
	}

	/// Applies every event that is ready without waiting.
	///
	/// Returns true if observable state changed.
	pub fn pump(&mut self) -> bool {
		let mut changed = false;
		while let Ok(event) = self.events_rx.try_recv() {
			changed |= self.handle_event(event);
		}
		changed
	}

	/// Waits until no input is pending and the current fetch has settled.
	///
	/// Never returns while the current fetch hangs; callers wanting a bound
	/// wrap this in `tokio::time::timeout`.
	pub async fn settle(&mut self) -> bool {
		let mut changed = self.pump();
		while self.has_pending_work() {
			let Some(event) = self.events_rx.recv().await else {
				break;
			};
			changed |= self.handle_event(event);
		}
		changed
	}

	/// Returns true while a debounce or the current fetch is outstanding.
	pub fn has_pending_work(&self) -> bool {
		self.debouncer.is_pending() || self.coordinator.is_loading()
	}

	fn handle_event(&mut self, event: ControlEvent<T>) -> bool {
		match event {
			ControlEvent::Query(debounced) => match self.debouncer.accept(debounced) {
				Some(query) => self.commit_query(query),
				None => false,
			},
			ControlEvent::Fetch(settled) => {
				let applied = self.coordinator.apply(settled).is_applied();
				if applied {
					self.highlight.reset();
				}
				applied
			}
		}
	}

	fn commit_query(&mut self, query: String) -> bool {
		tracing::trace!(query = %query, "select.query.commit");
		self.committed_query.clone_from(&query);
		if !self.coordinator.needs_fetch(&query) {
			return false;
		}
		self.issue_fetch(query);
		true
	}

	fn issue_fetch(&mut self, query: String) -> Epoch {
		let tx = self.events_tx.clone();
		self.highlight.reset();
		self.coordinator.issue(query, move |settled| {
			let _ = tx.send(ControlEvent::Fetch(settled));
		})
	}

	/// Builds a render snapshot.
	pub fn view(&self) -> SelectView {
		let open = self.visibility.is_open();
		let rows: Vec<OptionRow> = if open {
			let value = self.selection.value();
			self.coordinator
				.candidates()
				.iter()
				.enumerate()
				.map(|(index, item)| {
					let id = self.projection.id(item);
					OptionRow {
						selected: value == Some(id.as_str()),
						highlighted: self.highlight.index() == Some(index),
						content: self.option_content(item),
						id,
					}
				})
				.collect()
		} else {
			Vec::new()
		};

		let label = self.selection.label();
		let has_selection = !label.is_empty();
		let loading = self.coordinator.is_loading();
		SelectView {
			trigger: if has_selection { label.to_string() } else { self.placeholder.clone() },
			has_selection,
			query: self.query.clone(),
			open,
			loading,
			disabled: self.disabled,
			visible: self.highlight.visible_range(rows.len()),
			empty_message: (open && !loading && rows.is_empty()).then(|| self.empty_message.clone()),
			rows,
		}
	}

	fn option_content(&self, item: &T) -> OptionContent {
		match &self.render_option {
			Some(render) => render(item),
			None => OptionContent::label(self.projection.label(item)),
		}
	}

	/// Committed identifier, if any.
	pub fn value(&self) -> Option<&str> {
		self.selection.value()
	}

	/// Cached label; empty when nothing is selected.
	pub fn label(&self) -> &str {
		self.selection.label()
	}

	pub fn selection(&self) -> &SelectionState {
		self.selection.state()
	}

	pub fn candidates(&self) -> &[T] {
		self.coordinator.candidates()
	}

	pub fn is_open(&self) -> bool {
		self.visibility.is_open()
	}

	pub fn is_loading(&self) -> bool {
		self.coordinator.is_loading()
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	/// Latest issued fetch epoch.
	pub fn epoch(&self) -> Epoch {
		self.coordinator.epoch()
	}

	/// Raw search text.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Last query that survived debouncing.
	pub fn committed_query(&self) -> &str {
		&self.committed_query
	}
}
