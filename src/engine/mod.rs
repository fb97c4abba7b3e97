//! The dispatch loop.
//!
//! The engine walks the optimized instructions with a program counter, using
//! the jump table for loops. It is generic over the [`Memory`] implementation
//! and the I/O streams, so the loop is monomorphized per cell width and no
//! virtual call sits between two instructions.
//!
//! | Instruction | Effect                                                     |
//! |-------------|------------------------------------------------------------|
//! | `+` / `-`   | add / subtract `count`, wrapping at the cell width         |
//! | `>` / `<`   | move `count` cells, bounds failures go to the policy       |
//! | `[`         | if the cell is zero, continue after the matching `]`       |
//! | `]`         | if the cell is non-zero, continue after the matching `[`   |
//! | `,`         | read one byte, end of input stores 0                       |
//! | `.`         | write the low byte of the cell                             |
//! | `[-]`       | write 0                                                    |
mod stats;

use std::{
	io::{ErrorKind, Read, Write},
	time::Instant,
};

pub use stats::*;
use tracing::{debug, warn};

use crate::{
	error::{BfError, memory::MemoryBoundsError},
	memory::{BoundsPolicy, Cell, Memory},
	optimizer::Instruction,
	resolver::JumpTable,
	tokenizer::Operator::*,
	utils::CancelFlag,
};

/// Executes one resolved program against one memory tape.
pub struct Engine<'p, M, R, W> {
	instructions: &'p [Instruction],
	jumps:        &'p JumpTable,
	memory:       M,
	input:        R,
	output:       W,
	bounds:       BoundsPolicy,
	cancel:       CancelFlag,
}

impl<'p, M: Memory, R: Read, W: Write> Engine<'p, M, R, W> {
	pub fn new(instructions: &'p [Instruction], jumps: &'p JumpTable, memory: M, input: R, output: W) -> Self {
		debug_assert_eq!(instructions.len(), jumps.len());
		Self { instructions, jumps, memory, input, output, bounds: BoundsPolicy::default(), cancel: CancelFlag::new() }
	}

	pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
		self.bounds = bounds;
		self
	}

	pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
		self.cancel = cancel;
		self
	}

	pub fn memory(&self) -> &M { &self.memory }

	/// Run until the end of the program, cancellation or a fatal error.
	///
	/// Output is flushed in every case, so what was written before a bounds
	/// error stays written. A run error takes precedence over a failed flush.
	pub fn execute(&mut self) -> Result<Outcome, BfError> {
		let started = Instant::now();
		let mut executed = 0;
		let completion = self.dispatch_loop(&mut executed);
		let flushed = self.output.flush();
		let completion = completion?;
		flushed?;
		let stats = Stats { executed, elapsed: started.elapsed() };
		Ok(Outcome { completion, stats })
	}

	fn dispatch_loop(&mut self, executed: &mut u64) -> Result<Completion, BfError> {
		let mut pc = 0;
		while pc < self.instructions.len() {
			if self.cancel.is_cancelled() {
				debug!(pc, executed = *executed, "run cancelled");
				return Ok(Completion::Cancelled { pc });
			}
			pc = self.step(pc)?;
			*executed += 1;
		}
		Ok(Completion::Finished)
	}

	/// Execute the instruction at `pc`, returning the next program counter
	fn step(&mut self, pc: usize) -> Result<usize, BfError> {
		let instruction = self.instructions[pc];
		let count = instruction.count();
		match instruction.op() {
			IncVal => self.memory.increase(count),
			DecVal => self.memory.decrease(count),
			IncPtr => {
				if let Err(e) = self.memory.move_right(count as usize) {
					self.recover(e, count as usize)?;
				}
			}
			DecPtr => {
				if let Err(e) = self.memory.move_left(count as usize) {
					self.recover(e, count as usize)?;
				}
			}
			LoopStart => {
				if self.memory.is_zero() {
					return Ok(self.jumps.target(pc) + 1);
				}
			}
			LoopEnd => {
				if !self.memory.is_zero() {
					return Ok(self.jumps.target(pc) + 1);
				}
			}
			Input => {
				let value = self.read_input();
				self.memory.write(value);
			}
			Output => self.output.write_all(&[self.memory.read().low_byte()])?,
			ClearCell => self.memory.write(M::Cell::default()),
		}
		Ok(pc + 1)
	}

	fn recover(&mut self, error: MemoryBoundsError, n: usize) -> Result<(), BfError> {
		self.bounds.recover(&mut self.memory, error.clone(), n)?;
		debug!(policy = %self.bounds, %error, pointer = self.memory.pointer(), "recovered pointer move");
		Ok(())
	}

	/// One byte of input, 0 once the input is exhausted or broken
	fn read_input(&mut self) -> M::Cell {
		let mut byte = [0u8; 1];
		loop {
			match self.input.read(&mut byte) {
				Ok(0) => return M::Cell::default(),
				Ok(_) => return M::Cell::from_byte(byte[0]),
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => {
					warn!("Failed read input, treating as end of input: {e}");
					return M::Cell::default();
				}
			}
		}
	}
}
