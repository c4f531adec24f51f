//! Capability projections over caller-owned candidate records.

use std::fmt;
use std::sync::Arc;

/// Records that know their own identifier and display label.
pub trait SelectItem {
	/// Stable, comparable identifier.
	fn select_id(&self) -> String;
	/// Human-readable label.
	fn select_label(&self) -> String;
}

type ProjectFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Pure `id`/`label` projections for candidates of type `T`.
///
/// Both functions must be stable for a given item.
pub struct Projection<T> {
	id: ProjectFn<T>,
	label: ProjectFn<T>,
}

impl<T> Projection<T> {
	/// Builds a projection from two closures.
	pub fn new<I, L>(id: I, label: L) -> Self
	where
		I: Fn(&T) -> String + Send + Sync + 'static,
		L: Fn(&T) -> String + Send + Sync + 'static,
	{
		Self {
			id: Arc::new(id),
			label: Arc::new(label),
		}
	}

	/// Identifier of `item`.
	pub fn id(&self, item: &T) -> String {
		(self.id)(item)
	}

	/// Display label of `item`.
	pub fn label(&self, item: &T) -> String {
		(self.label)(item)
	}
}

impl<T: SelectItem + 'static> Projection<T> {
	/// Projection delegating to [`SelectItem`].
	pub fn from_item() -> Self {
		Self::new(T::select_id, T::select_label)
	}
}

impl<T> Clone for Projection<T> {
	fn clone(&self) -> Self {
		Self {
			id: Arc::clone(&self.id),
			label: Arc::clone(&self.label),
		}
	}
}

impl<T> fmt::Debug for Projection<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Projection").finish_non_exhaustive()
	}
}

/// Presentation content for one candidate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionContent {
	/// Primary text.
	pub label: String,
	/// Secondary text shown next to or below the label.
	pub detail: Option<String>,
}

impl OptionContent {
	/// Label-only content.
	pub fn label(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			detail: None,
		}
	}

	/// Adds secondary text.
	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}
}
