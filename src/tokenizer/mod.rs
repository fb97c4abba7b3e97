//! Turns raw program text into operators.
//!
//! The language has no lexical grammar to speak of: every one of the eight
//! characters `> < + - [ ] , .` is an operator on its own, and every other
//! character is a comment. So there is nothing that can go wrong here, an
//! input with no operators at all is simply an empty program.
//!
//! Dialects with multi-character tokens are not tokenized directly, they are
//! translated to the primitive dialect first (see [`crate::dialect`]).
mod operator;

use std::{iter::Peekable, str::Chars};

pub use operator::*;
use tracing::debug;

/// A tokenizer over primitive-dialect source code
pub struct Tokenizer<'a> {
	/// User input source code iterator
	source_iter: Peekable<Chars<'a>>,
	/// Characters consumed that did not map to an operator
	skipped:     usize,
}

impl<'a> Tokenizer<'a> {
	pub fn new(source: &'a str) -> Self { Self { source_iter: source.chars().peekable(), skipped: 0 } }

	/// Tokenize the whole source, discarding non-operator characters.
	pub fn tokenize(mut self) -> Vec<Operator> {
		let mut operators = Vec::new();
		while self.source_iter.peek().is_some() {
			if let Some(op) = self.next_operator() {
				operators.push(op);
			}
		}
		debug!(operators = operators.len(), skipped = self.skipped, "tokenized source");
		operators
	}

	/// Advance one character, returning its operator if it has one
	fn next_operator(&mut self) -> Option<Operator> {
		let c = self.source_iter.next()?;
		let op = Operator::from_char(c);
		if op.is_none() {
			self.skipped += 1;
		}
		op
	}
}

/// Shorthand for `Tokenizer::new(source).tokenize()`.
pub fn tokenize(source: &str) -> Vec<Operator> { Tokenizer::new(source).tokenize() }
