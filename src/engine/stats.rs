use std::{fmt::Display, time::Duration};

/// Counters collected while a program runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
	/// Dispatched instructions, a batched instruction counts once.
	pub executed: u64,
	/// Wall-clock time spent in the dispatch loop.
	pub elapsed:  Duration,
}

impl Display for Stats {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Finished in {} ms | Instructions: {}", self.elapsed.as_millis(), self.executed)
	}
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	/// The program counter ran off the end of the program.
	Finished,
	/// The cancel flag was raised, `pc` is the instruction that never ran.
	Cancelled { pc: usize },
}

impl Completion {
	pub fn is_finished(&self) -> bool { matches!(self, Completion::Finished) }
}

/// Completion event plus counters of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
	pub completion: Completion,
	pub stats:      Stats,
}
