//! The bounded memory tape.
//!
//! [`Memory`] is the capability set the engine drives. [`Tape`] is its only
//! implementation, generic over the [`Cell`] width. The engine is generic over
//! `Memory`, so every width gets its own monomorphized dispatch loop.
//!
//! Pointer moves are checked before they happen and report a
//! [`MemoryBoundsError`] instead of moving. Recovering from that error is the
//! job of the caller through [`BoundsPolicy`], not of the tape.
mod cell;

use std::{fmt::Display, str::FromStr};

pub use cell::Cell;

use crate::error::{
	BfError,
	memory::{Direction, MemoryBoundsError},
};

/// Default tape length, the classic 30000 cells.
pub const DEFAULT_CAPACITY: usize = 30_000;

/// Operations the engine needs from a memory tape.
pub trait Memory {
	type Cell: Cell;

	fn capacity(&self) -> usize;

	fn pointer(&self) -> usize;

	/// Move the pointer `n` cells right, or fail without moving.
	fn move_right(&mut self, n: usize) -> Result<(), MemoryBoundsError>;

	/// Move the pointer `n` cells left, or fail without moving.
	fn move_left(&mut self, n: usize) -> Result<(), MemoryBoundsError>;

	/// Place the pointer at `index`, clamped to the last cell.
	fn seek(&mut self, index: usize);

	fn increase(&mut self, n: u32);

	fn decrease(&mut self, n: u32);

	fn read(&self) -> Self::Cell;

	fn write(&mut self, value: Self::Cell);

	fn is_zero(&self) -> bool { self.read().is_zero() }
}

/// Fixed-capacity tape of `C` cells with a cursor.
#[derive(Debug, Clone)]
pub struct Tape<C> {
	cells:   Vec<C>,
	pointer: usize,
}

impl<C: Cell> Tape<C> {
	/// All-zero tape with the pointer at 0.
	pub fn new(capacity: usize) -> Result<Self, BfError> {
		if capacity == 0 {
			return Err(BfError::InvalidConfig("tape capacity must be positive".to_string()));
		}
		Ok(Self { cells: vec![C::default(); capacity], pointer: 0 })
	}

	pub fn cells(&self) -> &[C] { &self.cells }
}

impl<C: Cell> Memory for Tape<C> {
	type Cell = C;

	fn capacity(&self) -> usize { self.cells.len() }

	fn pointer(&self) -> usize { self.pointer }

	fn move_right(&mut self, n: usize) -> Result<(), MemoryBoundsError> {
		match self.pointer.checked_add(n) {
			Some(next) if next < self.cells.len() => {
				self.pointer = next;
				Ok(())
			}
			_ => Err(MemoryBoundsError::new(self.pointer, Direction::Increase)),
		}
	}

	fn move_left(&mut self, n: usize) -> Result<(), MemoryBoundsError> {
		let pointer = self.pointer;
		self.pointer = pointer.checked_sub(n).ok_or_else(|| MemoryBoundsError::new(pointer, Direction::Decrease))?;
		Ok(())
	}

	fn seek(&mut self, index: usize) { self.pointer = index.min(self.cells.len() - 1) }

	fn increase(&mut self, n: u32) {
		let cell = &mut self.cells[self.pointer];
		*cell = cell.increased(n);
	}

	fn decrease(&mut self, n: u32) {
		let cell = &mut self.cells[self.pointer];
		*cell = cell.decreased(n);
	}

	fn read(&self) -> C { self.cells[self.pointer] }

	fn write(&mut self, value: C) { self.cells[self.pointer] = value }
}

/// What to do when a pointer move would leave the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
	/// Abort the run with the bounds error.
	#[default]
	Fatal,
	/// Continue from the other end of the tape.
	Wrap,
	/// Stop at the first or last cell.
	Clamp,
	/// Drop the move and keep the pointer where it is.
	Ignore,
}

impl BoundsPolicy {
	pub const ALL: [BoundsPolicy; 4] = [BoundsPolicy::Fatal, BoundsPolicy::Wrap, BoundsPolicy::Clamp, BoundsPolicy::Ignore];

	/// Handle a failed move of `n` cells, `Err` means the run must stop.
	pub fn recover<M: Memory>(self, memory: &mut M, error: MemoryBoundsError, n: usize) -> Result<(), MemoryBoundsError> {
		let capacity = memory.capacity();
		match (self, error.direction) {
			(BoundsPolicy::Fatal, _) => return Err(error),
			(BoundsPolicy::Ignore, _) => {}
			(BoundsPolicy::Wrap, Direction::Increase) => memory.seek((error.pointer + n % capacity) % capacity),
			(BoundsPolicy::Wrap, Direction::Decrease) => {
				memory.seek((error.pointer + capacity - n % capacity) % capacity)
			}
			(BoundsPolicy::Clamp, Direction::Increase) => memory.seek(capacity - 1),
			(BoundsPolicy::Clamp, Direction::Decrease) => memory.seek(0),
		}
		Ok(())
	}
}

impl Display for BoundsPolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			BoundsPolicy::Fatal => "fatal",
			BoundsPolicy::Wrap => "wrap",
			BoundsPolicy::Clamp => "clamp",
			BoundsPolicy::Ignore => "ignore",
		};
		write!(f, "{name}")
	}
}

impl FromStr for BoundsPolicy {
	type Err = BfError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		BoundsPolicy::ALL
			.into_iter()
			.find(|policy| policy.to_string().eq_ignore_ascii_case(s))
			.ok_or_else(|| BfError::InvalidConfig(format!("unknown bounds policy '{s}'")))
	}
}

/// Width of a single tape cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
	#[default]
	Bits8,
	Bits16,
	Bits32,
}

impl CellWidth {
	pub const ALL: [CellWidth; 3] = [CellWidth::Bits8, CellWidth::Bits16, CellWidth::Bits32];

	pub fn bits(self) -> u32 {
		match self {
			CellWidth::Bits8 => u8::BITS,
			CellWidth::Bits16 => u16::BITS,
			CellWidth::Bits32 => u32::BITS,
		}
	}

	/// Name of the matching integer type.
	pub fn name(self) -> &'static str {
		match self {
			CellWidth::Bits8 => "Byte",
			CellWidth::Bits16 => "Short",
			CellWidth::Bits32 => "Integer",
		}
	}
}

impl Display for CellWidth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.bits()) }
}

impl FromStr for CellWidth {
	type Err = BfError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		CellWidth::ALL
			.into_iter()
			.find(|width| width.to_string() == s || width.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| BfError::InvalidConfig(format!("unknown cell width '{s}', expected 8, 16 or 32")))
	}
}

/// How the tape of a run is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
	pub cell_width: CellWidth,
	pub capacity:   usize,
	pub bounds:     BoundsPolicy,
}

impl Default for MemoryConfig {
	fn default() -> Self { Self { cell_width: CellWidth::default(), capacity: DEFAULT_CAPACITY, bounds: BoundsPolicy::default() } }
}

impl MemoryConfig {
	pub fn with_cell_width(mut self, cell_width: CellWidth) -> Self {
		self.cell_width = cell_width;
		self
	}

	pub fn with_capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
		self.bounds = bounds;
		self
	}

	pub fn validate(&self) -> Result<(), BfError> {
		if self.capacity == 0 {
			return Err(BfError::InvalidConfig("tape capacity must be positive".to_string()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tape(capacity: usize) -> Tape<u8> { Tape::new(capacity).unwrap() }

	#[test]
	fn new_tape_is_zeroed() {
		let tape = tape(4);
		assert_eq!(tape.cells(), &[0, 0, 0, 0]);
		assert_eq!(tape.pointer(), 0);
		assert!(tape.is_zero());
		assert!(Tape::<u16>::new(0).is_err());
	}

	#[test]
	fn move_within_bounds() {
		let mut tape = tape(3);
		tape.move_right(2).unwrap();
		assert_eq!(tape.pointer(), 2);
		tape.move_left(1).unwrap();
		assert_eq!(tape.pointer(), 1);
	}

	#[test]
	fn overflow_reports_pointer_before_move() {
		let mut tape = tape(3);
		tape.move_right(1).unwrap();
		let error = tape.move_right(2).unwrap_err();
		assert_eq!(error, MemoryBoundsError::new(1, Direction::Increase));
		assert_eq!(error.direction.to_string(), "increase");
		assert_eq!(tape.pointer(), 1);
		assert!(tape.move_right(usize::MAX).is_err());
	}

	#[test]
	fn underflow_reports_pointer_before_move() {
		let mut tape = tape(3);
		let error = tape.move_left(1).unwrap_err();
		assert_eq!(error, MemoryBoundsError::new(0, Direction::Decrease));
		assert_eq!(error.kind(), "underflow");
		assert_eq!(tape.pointer(), 0);
	}

	#[test]
	fn cell_arithmetic_wraps() {
		let mut tape = tape(1);
		tape.decrease(1);
		assert_eq!(tape.read(), 255);
		tape.increase(3);
		assert_eq!(tape.read(), 2);
		tape.write(0);
		assert!(tape.is_zero());

		let mut wide = Tape::<u16>::new(1).unwrap();
		wide.increase(300);
		assert_eq!(wide.read(), 300);
	}

	#[test]
	fn bounds_policies() {
		let mut tape = tape(5);
		tape.move_right(3).unwrap();
		let error = tape.move_right(4).unwrap_err();

		assert!(BoundsPolicy::Fatal.recover(&mut tape, error.clone(), 4).is_err());
		assert_eq!(tape.pointer(), 3);

		BoundsPolicy::Ignore.recover(&mut tape, error.clone(), 4).unwrap();
		assert_eq!(tape.pointer(), 3);

		BoundsPolicy::Wrap.recover(&mut tape, error.clone(), 4).unwrap();
		assert_eq!(tape.pointer(), 2);

		BoundsPolicy::Clamp.recover(&mut tape, MemoryBoundsError::new(2, Direction::Increase), 4).unwrap();
		assert_eq!(tape.pointer(), 4);

		tape.seek(1);
		let error = tape.move_left(3).unwrap_err();
		BoundsPolicy::Wrap.recover(&mut tape, error, 3).unwrap();
		assert_eq!(tape.pointer(), 3);

		BoundsPolicy::Clamp.recover(&mut tape, MemoryBoundsError::new(3, Direction::Decrease), 9).unwrap();
		assert_eq!(tape.pointer(), 0);
	}

	#[test]
	fn parse_config_values() {
		assert_eq!("16".parse::<CellWidth>().unwrap(), CellWidth::Bits16);
		assert_eq!("integer".parse::<CellWidth>().unwrap(), CellWidth::Bits32);
		assert!("64".parse::<CellWidth>().is_err());
		assert_eq!("Wrap".parse::<BoundsPolicy>().unwrap(), BoundsPolicy::Wrap);
		assert!("explode".parse::<BoundsPolicy>().is_err());
		assert!(MemoryConfig::default().with_capacity(0).validate().is_err());
		assert_eq!(MemoryConfig::default().capacity, DEFAULT_CAPACITY);
	}
}
