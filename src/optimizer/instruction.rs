use std::fmt::Display;

use crate::tokenizer::Operator;

/// An operator plus how many times in a row it runs.
///
/// `count` is always at least 1 and only batchable operators ever carry more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
	op:    Operator,
	count: u32,
}

impl Instruction {
	pub fn new(op: Operator) -> Self { Self { op, count: 1 } }

	/// Build an instruction with an explicit count, `None` if that would
	/// break the count invariant.
	pub fn repeated(op: Operator, count: u32) -> Option<Self> {
		(count == 1 || (count > 1 && op.is_batchable())).then_some(Self { op, count })
	}

	pub fn op(&self) -> Operator { self.op }

	pub fn count(&self) -> u32 { self.count }

	/// Fold one more `op` into this run, false when it has to start a new one
	pub(super) fn absorb(&mut self, op: Operator) -> bool {
		if op != self.op || !op.is_batchable() || self.count == u32::MAX {
			return false;
		}
		self.count += 1;
		true
	}
}

impl Display for Instruction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.count == 1 { write!(f, "{}", self.op) } else { write!(f, "{}x{}", self.op, self.count) }
	}
}
