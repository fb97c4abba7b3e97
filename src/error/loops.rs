/// Structural errors found while resolving loop jump targets.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoopSyntaxError {
	/// A loop end with no open loop start before it.
	#[error("Invalid loops: unmatched loop end at instruction {index}")]
	UnmatchedEnd { index: usize },
	/// Loop starts still open when the program ends.
	#[error("Invalid loops: {open} loop start(s) never closed")]
	UnclosedStart { open: usize },
}
