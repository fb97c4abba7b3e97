use std::fmt::Display;

/// One semantic action of the language, the copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	/// Increase the current cell `+`.
	IncVal,
	/// Decrease the current cell `-`.
	DecVal,
	/// Move the pointer right `>`.
	IncPtr,
	/// Move the pointer left `<`.
	DecPtr,
	/// Jump past the matching loop end if the cell is zero `[`.
	LoopStart,
	/// Jump back to the matching loop start if the cell is non-zero `]`.
	LoopEnd,
	/// Read one unit of input into the cell `,`.
	Input,
	/// Write the cell to the output `.`.
	Output,
	/// Set the cell to zero. Only produced by the optimizer, never by the
	/// tokenizer.
	ClearCell,
}

impl Operator {
	/// The eight operators a dialect has tokens for, in declaration order.
	pub const PRIMITIVES: [Operator; 8] = [
		Operator::IncPtr,
		Operator::DecPtr,
		Operator::IncVal,
		Operator::DecVal,
		Operator::LoopStart,
		Operator::LoopEnd,
		Operator::Input,
		Operator::Output,
	];

	pub fn from_char(c: char) -> Option<Self> {
		use Operator::*;
		Some(match c {
			'+' => IncVal,
			'-' => DecVal,
			'>' => IncPtr,
			'<' => DecPtr,
			'[' => LoopStart,
			']' => LoopEnd,
			',' => Input,
			'.' => Output,
			_ => return None,
		})
	}

	/// Source character of a primitive operator, `None` for synthetic ones.
	pub fn as_char(self) -> Option<char> {
		use Operator::*;
		Some(match self {
			IncVal => '+',
			DecVal => '-',
			IncPtr => '>',
			DecPtr => '<',
			LoopStart => '[',
			LoopEnd => ']',
			Input => ',',
			Output => '.',
			ClearCell => return None,
		})
	}

	/// Operators whose consecutive occurrences can be folded into one count.
	///
	/// Loop boundaries and I/O have an effect per occurrence, `ClearCell` is
	/// idempotent already.
	pub fn is_batchable(self) -> bool {
		matches!(self, Operator::IncVal | Operator::DecVal | Operator::IncPtr | Operator::DecPtr)
	}

	pub fn is_synthetic(self) -> bool { matches!(self, Operator::ClearCell) }
}

impl Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.as_char() {
			Some(c) => write!(f, "{c}"),
			None => write!(f, "[-]"),
		}
	}
}
