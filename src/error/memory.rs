use std::fmt::Display;

/// Which way the pointer was heading when it left the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Moving right, past the last cell (overflow).
	Increase,
	/// Moving left, before the first cell (underflow).
	Decrease,
}

impl Display for Direction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Direction::Increase => write!(f, "increase"),
			Direction::Decrease => write!(f, "decrease"),
		}
	}
}

/// A pointer move that would leave `[0, capacity)`.
///
/// `pointer` is the position before the move, the move itself never happened.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Memory {} at pointer {pointer} when trying to {direction} memory pointer", self.kind())]
pub struct MemoryBoundsError {
	pub pointer:   usize,
	pub direction: Direction,
}

impl MemoryBoundsError {
	pub fn new(pointer: usize, direction: Direction) -> Self { Self { pointer, direction } }

	/// `overflow` or `underflow`.
	pub fn kind(&self) -> &'static str {
		match self.direction {
			Direction::Increase => "overflow",
			Direction::Decrease => "underflow",
		}
	}
}
