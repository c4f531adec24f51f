//! Render snapshot of a search-select.

use std::ops::Range;

use crate::item::OptionContent;

/// One candidate row as a renderer should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
	pub id: String,
	pub content: OptionContent,
	/// Keyboard cursor is on this row.
	pub highlighted: bool,
	/// Row matches the committed value.
	pub selected: bool,
}

/// Everything needed to draw the control, detached from its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
	/// Trigger text: the selected label, or the placeholder when there is none.
	pub trigger: String,
	/// Whether `trigger` shows a selection rather than the placeholder.
	pub has_selection: bool,
	/// Raw search text.
	pub query: String,
	pub open: bool,
	pub loading: bool,
	pub disabled: bool,
	/// Candidate rows; empty while closed.
	pub rows: Vec<OptionRow>,
	/// Slice of `rows` inside the viewport.
	pub visible: Range<usize>,
	/// Present when open, settled, and without rows. Failures render the same way.
	pub empty_message: Option<String>,
}
