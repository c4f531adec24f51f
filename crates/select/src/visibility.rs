/// Whether the candidate list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
	#[default]
	Closed,
	Open,
}

impl Visibility {
	/// Opens the list. Returns true on a `Closed -> Open` transition.
	pub fn open(&mut self) -> bool {
		let opened = *self == Self::Closed;
		*self = Self::Open;
		opened
	}

	/// Closes the list. Returns true on an `Open -> Closed` transition.
	pub fn close(&mut self) -> bool {
		let closed = *self == Self::Open;
		*self = Self::Closed;
		closed
	}

	pub fn is_open(self) -> bool {
		self == Self::Open
	}
}
