//! Loop jump-target resolution.
//!
//! Resolution runs in two passes. A linear balance check runs first, so that
//! malformed programs are rejected before anything else happens. Then, for
//! every loop start, a forward scan finds the loop end at the same depth.
use std::ops::Index;

use tracing::debug;

use crate::{error::loops::LoopSyntaxError, optimizer::Instruction, tokenizer::Operator};

/// Maps each loop boundary to its partner, indexed by program counter.
///
/// Entries of non-loop instructions point at themselves and are never read by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
	targets: Vec<usize>,
}

impl JumpTable {
	pub fn len(&self) -> usize { self.targets.len() }

	pub fn is_empty(&self) -> bool { self.targets.is_empty() }

	/// Jump target of the instruction at `pc`
	pub fn target(&self, pc: usize) -> usize { self.targets[pc] }
}

impl Index<usize> for JumpTable {
	type Output = usize;

	fn index(&self, pc: usize) -> &usize { &self.targets[pc] }
}

/// Build the jump table, failing on unbalanced loops.
pub fn resolve(instructions: &[Instruction]) -> Result<JumpTable, LoopSyntaxError> {
	check_balance(instructions)?;

	let mut targets: Vec<usize> = (0..instructions.len()).collect();
	let mut loops = 0;
	for (start, instruction) in instructions.iter().enumerate() {
		if instruction.op() != Operator::LoopStart {
			continue;
		}
		let mut depth = 0usize;
		for (end, inner) in instructions.iter().enumerate().skip(start + 1) {
			match inner.op() {
				Operator::LoopStart => depth += 1,
				Operator::LoopEnd if depth == 0 => {
					targets[start] = end;
					targets[end] = start;
					loops += 1;
					break;
				}
				Operator::LoopEnd => depth -= 1,
				_ => {}
			}
		}
	}

	debug!(instructions = instructions.len(), loops, "resolved jump table");
	Ok(JumpTable { targets })
}

/// Running `[` minus `]` count, must never dip below zero and end at zero
fn check_balance(instructions: &[Instruction]) -> Result<(), LoopSyntaxError> {
	let mut open = 0usize;
	for (index, instruction) in instructions.iter().enumerate() {
		match instruction.op() {
			Operator::LoopStart => open += 1,
			Operator::LoopEnd => {
				open = open.checked_sub(1).ok_or(LoopSyntaxError::UnmatchedEnd { index })?;
			}
			_ => {}
		}
	}
	if open != 0 {
		return Err(LoopSyntaxError::UnclosedStart { open });
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{optimizer::optimize, tokenizer::tokenize};

	fn table(source: &str) -> Result<JumpTable, LoopSyntaxError> { resolve(&optimize(&tokenize(source))) }

	#[test]
	fn resolve_flat_and_nested() {
		let jumps = table("+[>[-<]]").unwrap();
		assert_eq!(jumps.len(), 8);
		assert_eq!(jumps[1], 7);
		assert_eq!(jumps[7], 1);
		assert_eq!(jumps[3], 6);
		assert_eq!(jumps[6], 3);
	}

	#[test]
	fn resolve_siblings() {
		let jumps = table("[>][<]").unwrap();
		assert_eq!((jumps[0], jumps[2], jumps[3], jumps[5]), (2, 0, 5, 3));
	}

	#[test]
	fn jump_table_is_symmetric() {
		let instructions = optimize(&tokenize("++[>+[>++[-]<-]<[->+<]]>[.>]<<[[[,]]]"));
		let jumps = resolve(&instructions).unwrap();
		for (i, instruction) in instructions.iter().enumerate() {
			if instruction.op() == Operator::LoopStart {
				assert_eq!(instructions[jumps[i]].op(), Operator::LoopEnd);
				assert_eq!(jumps[jumps[i]], i);
			}
		}
	}

	#[test]
	fn resolve_without_loops() {
		assert!(table("").unwrap().is_empty());
		assert_eq!(table("+>-<").unwrap().target(2), 2);
	}

	#[test]
	fn reject_unbalanced() {
		assert_eq!(table("[").unwrap_err(), LoopSyntaxError::UnclosedStart { open: 1 });
		assert_eq!(table("[[]").unwrap_err(), LoopSyntaxError::UnclosedStart { open: 1 });
		assert_eq!(table("]").unwrap_err(), LoopSyntaxError::UnmatchedEnd { index: 0 });
		assert_eq!(table("+[]]").unwrap_err(), LoopSyntaxError::UnmatchedEnd { index: 3 });
		assert_eq!(table("][").unwrap_err(), LoopSyntaxError::UnmatchedEnd { index: 0 });
	}
}
