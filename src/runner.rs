use std::{
	fs::read_to_string,
	io::{Read, Write},
	path::Path,
};

use anyhow::Context;
use tracing::info;

use crate::{
	BfError,
	dialect::{BRAINFUCK, Dialect},
	engine::{Completion, Engine, Outcome, Stats},
	memory::{Cell, CellWidth, MemoryConfig, Tape},
	optimizer::{Instruction, optimize},
	resolver::{JumpTable, resolve},
	tokenizer::tokenize,
	utils::CancelFlag,
};

/// Everything a finished or cancelled run reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	/// The optimized program that was executed
	pub instructions: Vec<Instruction>,
	pub stats:        Stats,
	pub completion:   Completion,
}

/// Runner drives the whole pipeline: tokenize, optimize, resolve, execute.
#[derive(Debug, Clone, Default)]
pub struct Runner {
	config: MemoryConfig,
	cancel: CancelFlag,
}

impl Runner {
	pub fn new(config: MemoryConfig) -> Self { Self { config, cancel: CancelFlag::new() } }

	pub fn config(&self) -> &MemoryConfig { &self.config }

	/// Flag that stops this runner's runs, clone it into another thread to
	/// cancel from there.
	pub fn cancel_flag(&self) -> CancelFlag { self.cancel.clone() }

	/// Run a program in the primitive dialect.
	///
	/// Loop errors are reported before anything executes. A bounds error stops
	/// the run where it happened, whatever was written to `output` until then
	/// stays written.
	pub fn run<R: Read, W: Write>(&self, source: &str, input: R, output: W) -> Result<Report, BfError> {
		self.config.validate()?;
		let instructions = optimize(&tokenize(source));
		let jumps = resolve(&instructions)?;
		let outcome = match self.config.cell_width {
			CellWidth::Bits8 => self.execute::<u8, R, W>(&instructions, &jumps, input, output)?,
			CellWidth::Bits16 => self.execute::<u16, R, W>(&instructions, &jumps, input, output)?,
			CellWidth::Bits32 => self.execute::<u32, R, W>(&instructions, &jumps, input, output)?,
		};
		info!(
			instructions = instructions.len(),
			executed = outcome.stats.executed,
			elapsed_ms = outcome.stats.elapsed.as_millis() as u64,
			completion = ?outcome.completion,
			"run complete"
		);
		Ok(Report { instructions, stats: outcome.stats, completion: outcome.completion })
	}

	/// Run a program written in any dialect by translating it first.
	pub fn run_dialect<R: Read, W: Write>(
		&self,
		source: &str,
		dialect: &Dialect,
		input: R,
		output: W,
	) -> Result<Report, BfError> {
		if *dialect == BRAINFUCK {
			return self.run(source, input, output);
		}
		let primitive = crate::dialect::translate(source, dialect, &BRAINFUCK);
		self.run(&primitive, input, output)
	}

	/// Load a source file and run it.
	pub fn run_file<P: AsRef<Path>, R: Read, W: Write>(
		&self,
		path: P,
		dialect: &Dialect,
		input: R,
		output: W,
	) -> Result<Report, BfError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		self.run_dialect(&source, dialect, input, output)
	}
}

impl Runner {
	fn execute<C: Cell, R: Read, W: Write>(
		&self,
		instructions: &[Instruction],
		jumps: &JumpTable,
		input: R,
		output: W,
	) -> Result<Outcome, BfError> {
		let tape = Tape::<C>::new(self.config.capacity)?;
		Engine::new(instructions, jumps, tape, input, output)
			.with_bounds(self.config.bounds)
			.with_cancel(self.cancel.clone())
			.execute()
	}
}

/// Run `source` once with a fresh [`Runner`].
pub fn run<R: Read, W: Write>(source: &str, input: R, output: W, config: MemoryConfig) -> Result<Report, BfError> {
	Runner::new(config).run(source, input, output)
}

#[cfg(test)]
mod tests {
	use std::io::empty;

	use super::*;
	use crate::{dialect::DialectKind, error::memory::Direction, memory::BoundsPolicy, tokenizer::Operator};

	fn output_of(source: &str, config: MemoryConfig) -> Result<Vec<u8>, BfError> {
		let mut output = Vec::new();
		run(source, empty(), &mut output, config)?;
		Ok(output)
	}

	#[test]
	fn run_reports_optimized_program() {
		let mut output = Vec::new();
		let report = run("++++[>++++<-]>.", empty(), &mut output, MemoryConfig::default().with_capacity(2)).unwrap();
		assert_eq!(output, vec![16]);
		assert_eq!(report.instructions.len(), 9);
		assert!(report.completion.is_finished());
		assert_eq!(report.stats.executed, 2 + 4 * 5 + 2);
	}

	#[test]
	fn clear_loop_alone() {
		let mut output = Vec::new();
		let report = run("[-]", empty(), &mut output, MemoryConfig::default()).unwrap();
		assert_eq!(report.instructions, vec![Instruction::new(Operator::ClearCell)]);
		assert_eq!(report.stats.executed, 1);
		assert!(output.is_empty());
	}

	#[test]
	fn loop_errors_stop_before_execution() {
		for source in ["+.[", ".]", "+.[[]", ".[]]["] {
			let mut output = Vec::new();
			let result = run(source, empty(), &mut output, MemoryConfig::default());
			assert!(matches!(result, Err(BfError::LoopSyntax(_))), "{source}");
			assert!(output.is_empty(), "{source} produced output");
		}
	}

	#[test]
	fn overflow_at_capacity() {
		let result = output_of(">>>", MemoryConfig::default().with_capacity(3));
		match result {
			Err(BfError::MemoryBounds(e)) => {
				assert_eq!(e.pointer, 0);
				assert_eq!(e.direction, Direction::Increase);
				assert_eq!(e.direction.to_string(), "increase");
			}
			other => panic!("expected bounds error, got {other:?}"),
		}
		assert!(output_of(">>", MemoryConfig::default().with_capacity(3)).is_ok());
	}

	#[test]
	fn width_changes_wrapping() {
		// 16 * 16, then output 1 if the product cell is non-zero
		let product = "++++++++++++++++[>++++++++++++++++<-]>[>+<[-]]>.";
		assert_eq!(output_of(product, MemoryConfig::default()).unwrap(), vec![0]);
		assert_eq!(output_of(product, MemoryConfig::default().with_cell_width(CellWidth::Bits16)).unwrap(), vec![1]);
		assert_eq!(output_of(product, MemoryConfig::default().with_cell_width(CellWidth::Bits32)).unwrap(), vec![1]);
		assert_eq!(output_of("-.", MemoryConfig::default().with_cell_width(CellWidth::Bits32)).unwrap(), vec![255]);
	}

	#[test]
	fn bounds_policy_from_config() {
		let config = MemoryConfig::default().with_capacity(4).with_bounds(BoundsPolicy::Wrap);
		assert_eq!(output_of("<+++.>.", config).unwrap(), vec![3, 0]);
	}

	#[test]
	fn invalid_capacity_rejected() {
		assert!(matches!(output_of("+", MemoryConfig::default().with_capacity(0)), Err(BfError::InvalidConfig(_))));
	}

	#[test]
	fn run_other_dialect() {
		let runner = Runner::default();
		let ook = DialectKind::Brainfuck.translate("+++.", DialectKind::Ook);
		let mut output = Vec::new();
		runner.run_dialect(&ook, &DialectKind::Ook.dialect(), empty(), &mut output).unwrap();
		assert_eq!(output, vec![3]);
	}

	#[test]
	fn cancelled_runner_stops_immediately() {
		let runner = Runner::default();
		runner.cancel_flag().cancel();
		let mut output = Vec::new();
		let report = runner.run("+.[]", empty(), &mut output).unwrap();
		assert_eq!(report.completion, Completion::Cancelled { pc: 0 });
		assert!(output.is_empty());
	}

	#[test]
	fn missing_file_is_internal_error() {
		let result = Runner::default().run_file("/nonexistent/program.bf", &BRAINFUCK, empty(), std::io::sink());
		assert!(matches!(result, Err(BfError::InternalError(_))));
	}
}
