pub mod loops;
pub mod memory;

/// BfError is the top-level error type for the interpreter.
#[derive(thiserror::Error, Debug)]
pub enum BfError {
	/// Internal or environment error, e.g. a source file that can't be read
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Unbalanced loop brackets, detected before anything runs
	#[error(transparent)]
	LoopSyntax(#[from] loops::LoopSyntaxError),
	/// Pointer left the tape under the fatal bounds policy
	#[error(transparent)]
	MemoryBounds(#[from] memory::MemoryBoundsError),
	/// Rejected memory configuration
	#[error("Invalid memory config: {0}")]
	InvalidConfig(String),
	/// The output stream refused a write or flush
	#[error("Failed write output: {0}")]
	Output(#[from] std::io::Error),
}
