//! Token vocabularies of the language family and translation between them.
//!
//! A [`Dialect`] spells each of the eight primitive operators with a token of
//! its own, anything from a single character to a phrase like `Ook! Ook?`.
//! [`translate`] rewrites text by longest match: at every position the
//! longest source token that prefixes the rest of the text wins, and its
//! target token is emitted. Text matching no token is dropped, so a
//! round-trip keeps the operator stream but not comments or layout.
use std::{fmt::Display, str::FromStr};

use tracing::debug;

use crate::{error::BfError, tokenizer::Operator};

/// One token per primitive operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect<'a> {
	pub inc_ptr:    &'a str,
	pub dec_ptr:    &'a str,
	pub inc_val:    &'a str,
	pub dec_val:    &'a str,
	pub loop_start: &'a str,
	pub loop_end:   &'a str,
	pub input:      &'a str,
	pub output:     &'a str,
}

impl<'a> Dialect<'a> {
	/// Build a dialect from tokens in [`Operator::PRIMITIVES`] order.
	pub const fn new(tokens: [&'a str; 8]) -> Self {
		let [inc_ptr, dec_ptr, inc_val, dec_val, loop_start, loop_end, input, output] = tokens;
		Self { inc_ptr, dec_ptr, inc_val, dec_val, loop_start, loop_end, input, output }
	}

	/// Token spelling `op`, `None` for synthetic operators.
	pub fn token(&self, op: Operator) -> Option<&'a str> {
		use Operator::*;
		Some(match op {
			IncPtr => self.inc_ptr,
			DecPtr => self.dec_ptr,
			IncVal => self.inc_val,
			DecVal => self.dec_val,
			LoopStart => self.loop_start,
			LoopEnd => self.loop_end,
			Input => self.input,
			Output => self.output,
			ClearCell => return None,
		})
	}

	/// Tokens in [`Operator::PRIMITIVES`] order.
	pub fn tokens(&self) -> [&'a str; 8] {
		[self.inc_ptr, self.dec_ptr, self.inc_val, self.dec_val, self.loop_start, self.loop_end, self.input, self.output]
	}
}

impl Display for Dialect<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let pairs = Operator::PRIMITIVES
			.iter()
			.zip(self.tokens())
			.map(|(op, token)| format!("{op}='{token}'"))
			.collect::<Vec<_>>()
			.join(", ");
		write!(f, "Dialect{{{pairs}}}")
	}
}

pub const BRAINFUCK: Dialect<'static> = Dialect::new([">", "<", "+", "-", "[", "]", ",", "."]);
pub const TROLLSCRIPT: Dialect<'static> = Dialect::new(["ooo", "ool", "olo", "oll", "loo", "lol", "llo", "lll"]);
pub const OOK: Dialect<'static> = Dialect::new([
	"Ook. Ook?",
	"Ook? Ook.",
	"Ook. Ook.",
	"Ook! Ook!",
	"Ook! Ook.",
	"Ook. Ook!",
	"Ook! Ook?",
	"Ook? Ook!",
]);
/// Input and output share `Moo`, translating out of COW always yields output.
pub const COW: Dialect<'static> = Dialect::new(["moO", "mOo", "MoO", "MOo", "MOO", "moo", "Moo", "Moo"]);

/// Registry of the built-in dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectKind {
	#[default]
	Brainfuck,
	Trollscript,
	Ook,
	Cow,
}

impl DialectKind {
	pub const ALL: [DialectKind; 4] = [DialectKind::Brainfuck, DialectKind::Trollscript, DialectKind::Ook, DialectKind::Cow];

	pub fn dialect(self) -> Dialect<'static> {
		match self {
			DialectKind::Brainfuck => BRAINFUCK,
			DialectKind::Trollscript => TROLLSCRIPT,
			DialectKind::Ook => OOK,
			DialectKind::Cow => COW,
		}
	}

	/// Human readable name.
	pub fn name(self) -> &'static str {
		match self {
			DialectKind::Brainfuck => "Brainfuck",
			DialectKind::Trollscript => "Trollscript",
			DialectKind::Ook => "Ook!",
			DialectKind::Cow => "COW",
		}
	}

	pub fn translate(self, source: &str, to: DialectKind) -> String { translate(source, &self.dialect(), &to.dialect()) }
}

impl Display for DialectKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name()) }
}

impl FromStr for DialectKind {
	type Err = BfError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim_end_matches('!');
		DialectKind::ALL
			.into_iter()
			.find(|kind| kind.name().trim_end_matches('!').eq_ignore_ascii_case(wanted))
			.ok_or_else(|| BfError::InvalidConfig(format!("unknown dialect '{s}'")))
	}
}

/// `from` token to `to` token, longest `from` first
struct TranslationTable<'a> {
	entries: Vec<(&'a str, &'a str)>,
}

impl<'a> TranslationTable<'a> {
	fn new(from: &Dialect<'a>, to: &Dialect<'a>) -> Self {
		let mut entries: Vec<(&'a str, &'a str)> = Vec::with_capacity(8);
		for (from_token, to_token) in from.tokens().into_iter().zip(to.tokens()) {
			if from_token.is_empty() {
				continue;
			}
			// A token shared by several operators maps like the last of them.
			match entries.iter_mut().find(|(existing, _)| *existing == from_token) {
				Some(entry) => entry.1 = to_token,
				None => entries.push((from_token, to_token)),
			}
		}
		entries.sort_by_key(|(from_token, _)| std::cmp::Reverse(from_token.len()));
		Self { entries }
	}

	/// Longest entry whose `from` token starts `text`
	fn longest_match(&self, text: &str) -> Option<(&'a str, &'a str)> {
		self.entries.iter().copied().find(|(from_token, _)| text.starts_with(*from_token))
	}
}

/// Rewrite `source` from one dialect into another.
///
/// Never fails. Characters that do not start a `from` token are dropped.
pub fn translate(source: &str, from: &Dialect, to: &Dialect) -> String {
	let table = TranslationTable::new(from, to);
	let mut translated = String::with_capacity(source.len());
	let mut rest = source;
	let mut dropped = 0usize;
	while let Some(c) = rest.chars().next() {
		match table.longest_match(rest) {
			Some((from_token, to_token)) => {
				translated.push_str(to_token);
				rest = &rest[from_token.len()..];
			}
			None => {
				dropped += 1;
				rest = &rest[c.len_utf8()..];
			}
		}
	}
	debug!(input = source.len(), output = translated.len(), dropped, "translated source");
	translated
}

/// Whether `first` (in `first_dialect`) is exactly what `second` (in
/// `second_dialect`) translates to.
pub fn equivalent(first: &str, first_dialect: &Dialect, second: &str, second_dialect: &Dialect) -> bool {
	first == translate(second, second_dialect, first_dialect)
}
