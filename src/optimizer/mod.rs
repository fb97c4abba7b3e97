//! Peephole optimization of the operator stream.
//!
//! Two passes, always in this order:
//!
//! 1. **Idiom fusion** rewrites the window `[`, `+` or `-`, `]` into a single
//!    [`Operator::ClearCell`]. The loop only ever looks at the cell it keeps
//!    stepping, so it terminates with that cell at zero. This has to look at
//!    the raw stream, batching first would hide `[-]` behind `[`, `-`x1, `]`
//!    style counts and longer runs would no longer be the same idiom.
//! 2. **Run-length batching** folds runs of `+ - > <` into one
//!    [`Instruction`] carrying the run length. Loop boundaries and I/O are
//!    observable per occurrence and always stay one instruction each.
//!
//! Neither pass can fail.
mod instruction;

pub use instruction::Instruction;
use tracing::debug;

use crate::tokenizer::Operator::{self, *};

/// Replace every `[-]` / `[+]` window with `ClearCell`.
pub fn fuse_clear_loops(operators: &[Operator]) -> Vec<Operator> {
	let mut fused = Vec::with_capacity(operators.len());
	let mut i = 0;
	while i < operators.len() {
		if let [LoopStart, IncVal | DecVal, LoopEnd, ..] = &operators[i..] {
			fused.push(ClearCell);
			i += 3;
			continue;
		}
		fused.push(operators[i]);
		i += 1;
	}
	fused
}

/// Merge runs of identical batchable operators into counted instructions.
pub fn batch(operators: &[Operator]) -> Vec<Instruction> {
	let mut instructions: Vec<Instruction> = Vec::with_capacity(operators.len());
	for &op in operators {
		if !instructions.last_mut().is_some_and(|last| last.absorb(op)) {
			instructions.push(Instruction::new(op));
		}
	}
	instructions
}

/// Run both passes over a tokenized program.
pub fn optimize(operators: &[Operator]) -> Vec<Instruction> {
	let fused = fuse_clear_loops(operators);
	let instructions = batch(&fused);
	debug!(
		operators = operators.len(),
		cleared = operators.len().saturating_sub(fused.len()) / 2,
		instructions = instructions.len(),
		"optimized program"
	);
	instructions
}

/// Undo batching, one operator per executed step. `ClearCell` stays as is.
pub fn expand(instructions: &[Instruction]) -> Vec<Operator> {
	instructions.iter().flat_map(|i| std::iter::repeat_n(i.op(), i.count() as usize)).collect()
}

/// Render instructions back into primitive-dialect source, `ClearCell` as
/// `[-]`.
pub fn render(instructions: &[Instruction]) -> String {
	let mut source = String::with_capacity(instructions.len());
	for instruction in instructions {
		for _ in 0..instruction.count() {
			source.push_str(&instruction.op().to_string());
		}
	}
	source
}
