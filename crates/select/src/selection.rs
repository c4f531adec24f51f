//! Committed value and its cached display label.

/// Selection as seen by the control.
///
/// `Selected` may carry an empty label when the caller supplied a value
/// whose label is not yet known. `Empty` never carries a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
	#[default]
	Empty,
	Selected { value: String, label: String },
}

/// Selection state machine plus the externally seeded label.
#[derive(Debug, Clone, Default)]
pub struct Selection {
	state: SelectionState,
	seed: Option<String>,
}

impl Selection {
	/// Builds the initial state from the caller's value and optional label seed.
	pub fn new(value: Option<String>, initial_label: Option<String>) -> Self {
		let mut selection = Self::default();
		selection.seed_label(initial_label);
		selection.sync_value(value, |_| None);
		selection
	}

	pub fn state(&self) -> &SelectionState {
		&self.state
	}

	pub fn value(&self) -> Option<&str> {
		match &self.state {
			SelectionState::Empty => None,
			SelectionState::Selected { value, .. } => Some(value),
		}
	}

	/// Cached label; empty when unknown or when nothing is selected.
	pub fn label(&self) -> &str {
		match &self.state {
			SelectionState::Empty => "",
			SelectionState::Selected { label, .. } => label,
		}
	}

	/// Commits a picked candidate.
	pub fn select(&mut self, value: String, label: String) {
		self.seed = None;
		self.state = SelectionState::Selected { value, label };
	}

	/// Reacts to the externally owned value.
	///
	/// An empty value clears the label. A new non-empty value takes its label
	/// from `lookup` (e.g. a loaded candidate), then from the pending seed.
	/// Returns true if the state changed.
	pub fn sync_value<F>(&mut self, value: Option<String>, lookup: F) -> bool
	where
		F: FnOnce(&str) -> Option<String>,
	{
		let value = value.filter(|v| !v.is_empty());
		let next = match value {
			None => SelectionState::Empty,
			Some(value) => {
				if self.value() == Some(value.as_str()) {
					return false;
				}
				let label = lookup(&value).or_else(|| self.seed.take()).unwrap_or_default();
				SelectionState::Selected { value, label }
			}
		};
		if next == self.state {
			return false;
		}
		self.state = next;
		true
	}

	/// Supplies a label for a value known before any candidate list exists.
	///
	/// Applied immediately when a value is present, otherwise held until one
	/// arrives. `None` withdraws a pending seed.
	pub fn seed_label(&mut self, label: Option<String>) -> bool {
		let label = label.filter(|l| !l.is_empty());
		match (&mut self.state, label) {
			(SelectionState::Selected { label: current, .. }, Some(label)) => {
				self.seed = None;
				if *current == label {
					return false;
				}
				*current = label;
				true
			}
			(_, label) => {
				self.seed = label;
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn clearing_value_clears_label() {
		let mut selection = Selection::default();
		selection.select("42".to_string(), "Acme".to_string());
		assert_eq!(selection.label(), "Acme");

		assert!(selection.sync_value(None, |_| None));
		assert_eq!(selection.state(), &SelectionState::Empty);
		assert_eq!(selection.label(), "");

		selection.select("42".to_string(), "Acme".to_string());
		assert!(selection.sync_value(Some(String::new()), |_| None));
		assert_eq!(selection.label(), "");
	}

	#[test]
	fn initial_label_shows_without_candidates() {
		let selection = Selection::new(Some("7".to_string()), Some("Beta Corp".to_string()));
		assert_eq!(selection.value(), Some("7"));
		assert_eq!(selection.label(), "Beta Corp");
	}

	#[test]
	fn late_seed_replaces_label() {
		let mut selection = Selection::new(Some("7".to_string()), None);
		assert_eq!(selection.label(), "");
		assert!(selection.seed_label(Some("Beta Corp".to_string())));
		assert_eq!(selection.label(), "Beta Corp");
		assert!(selection.seed_label(Some("Beta Corporation".to_string())));
		assert_eq!(selection.label(), "Beta Corporation");
	}

	#[test]
	fn seed_waits_for_value() {
		let mut selection = Selection::default();
		assert!(!selection.seed_label(Some("Beta Corp".to_string())));
		assert_eq!(selection.label(), "");

		selection.sync_value(Some("7".to_string()), |_| None);
		assert_eq!(selection.label(), "Beta Corp");
	}

	#[test]
	fn external_value_prefers_known_candidate_label() {
		let mut selection = Selection::new(Some("1".to_string()), Some("Acme".to_string()));
		selection.sync_value(Some("2".to_string()), |id| (id == "2").then(|| "Beta".to_string()));
		assert_eq!(selection.label(), "Beta");

		selection.sync_value(Some("3".to_string()), |_| None);
		assert_eq!(selection.label(), "");
	}

	#[test]
	fn same_value_is_not_a_change() {
		let mut selection = Selection::default();
		selection.select("2".to_string(), "B".to_string());
		assert!(!selection.sync_value(Some("2".to_string()), |_| Some("other".to_string())));
		assert_eq!(selection.label(), "B");
	}

	#[derive(Debug, Clone)]
	enum Op {
		Select(u8, String),
		Sync(Option<u8>),
		Seed(Option<String>),
	}

	fn op() -> impl Strategy<Value = Op> {
		prop_oneof![
			(0u8..4, "[a-z]{0,3}").prop_map(|(v, l)| Op::Select(v, l)),
			proptest::option::of(0u8..4).prop_map(Op::Sync),
			proptest::option::of("[a-z]{0,3}").prop_map(Op::Seed),
		]
	}

	proptest! {
		#[test]
		fn label_is_never_set_without_value(ops in proptest::collection::vec(op(), 0..32)) {
			let mut selection = Selection::default();
			for op in ops {
				match op {
					Op::Select(v, l) => selection.select(v.to_string(), l),
					Op::Sync(v) => {
						selection.sync_value(v.map(|v| v.to_string()), |_| None);
					}
					Op::Seed(l) => {
						selection.seed_label(l);
					}
				}
				if selection.value().is_none() {
					prop_assert_eq!(selection.label(), "");
				}
			}
		}
	}
}
