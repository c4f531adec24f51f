/// Key-driven actions independent of any input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
	/// Move the highlight; wraps at both ends.
	MoveHighlight { delta: isize },
	/// Pick the highlighted candidate, or the first one when nothing is highlighted.
	Confirm,
	/// Close the list without picking.
	Dismiss,
}
