//! Keyboard highlight and viewport over the candidate list.

use std::ops::Range;

/// Highlighted row plus scroll offset for a fixed-height list.
#[derive(Debug, Clone)]
pub struct Highlight {
	index: Option<usize>,
	scroll_offset: usize,
	max_visible: usize,
}

impl Highlight {
	pub fn new(max_visible: usize) -> Self {
		Self {
			index: None,
			scroll_offset: 0,
			max_visible: max_visible.max(1),
		}
	}

	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub fn reset(&mut self) {
		self.index = None;
		self.scroll_offset = 0;
	}

	/// Moves by `delta` rows, wrapping at both ends.
	///
	/// From no highlight, a forward move lands on the first row and a
	/// backward move on the last.
	pub fn move_by(&mut self, delta: isize, len: usize) {
		if len == 0 || delta == 0 {
			return;
		}
		let len = len as isize;
		let step = delta.rem_euclid(len);
		let next = match self.index {
			None if delta > 0 => step - 1,
			None => step,
			Some(i) => i as isize + step,
		};
		self.index = Some(next.rem_euclid(len) as usize);
		self.ensure_visible();
	}

	fn ensure_visible(&mut self) {
		let Some(index) = self.index else {
			return;
		};
		if index < self.scroll_offset {
			self.scroll_offset = index;
		}
		let visible_end = self.scroll_offset + self.max_visible;
		if index >= visible_end {
			self.scroll_offset = index.saturating_sub(self.max_visible - 1);
		}
	}

	/// Rows a renderer should draw (start..end indices).
	pub fn visible_range(&self, len: usize) -> Range<usize> {
		let start = self.scroll_offset.min(len);
		let end = (self.scroll_offset + self.max_visible).min(len);
		start..end
	}
}
