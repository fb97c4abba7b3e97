//! # How a program of eight characters gets run
//!
//! User's source code: `++++[>++++<-]>.`

//! ## Tokenizing
//!
//! Every one of `> < + - [ ] , .` is an operator, everything else is a
//! comment. The tokenizer keeps the operators in order and drops the rest, so
//! the example becomes `[+, +, +, +, [, >, +, +, +, +, <, -, ], >, .]`. It has
//! no error cases, any text is a valid (maybe empty) program as far as tokens
//! go.

//! ## Peephole optimization
//!
//! The operator stream is very repetitive and most of it folds cleanly.
//!
//! First, `idiom fusion`: the loop `[-]` (or `[+]`) keeps stepping one cell
//! until it reads zero, which is the same thing as writing zero. It becomes
//! one synthetic `ClearCell` operator.
//!
//! Then `run-length batching`: `++++` is one "add 4", `>>>` is one "move 3".
//! Loop boundaries and I/O are never merged, each occurrence does something
//! observable.
//!
//! ``` markdown
//! 0  +x4
//! 1  [      ─┐
//! 2  >       │
//! 3  +x4     │
//! 4  <       │
//! 5  -       │
//! 6  ]      ─┘
//! 7  >
//! 8  .
//! ```

//! ## Loop resolution
//!
//! Before running, every `[` is paired with its `]` in a `jump table`, and
//! unbalanced brackets are rejected. A malformed program never executes a
//! single instruction.

//! ## Execution
//!
//! A program counter walks the instructions over a bounded `memory tape` of
//! 8, 16 or 32-bit cells. Cell arithmetic wraps at the cell width. Moving the
//! pointer off the tape is an error by default, a `bounds policy` can turn
//! that into wrapping, clamping or ignoring the move instead.
//!
//! The example leaves 16 in the second cell and writes it out.

//! # Dialects
//!
//! The same eight operators have been spelled in many ways: `Ook. Ook?`,
//! `moO`, `ooo`. [`translate`] converts text between any two [`Dialect`]s by
//! longest token match, and [`Runner::run_dialect`] runs them directly.

pub mod cli;
pub mod dialect;
pub mod engine;
mod error;
pub mod memory;
pub mod optimizer;
pub mod resolver;
mod runner;
pub mod tokenizer;
mod utils;

pub use dialect::{Dialect, DialectKind, translate};
pub use error::{
	BfError,
	loops::LoopSyntaxError,
	memory::{Direction, MemoryBoundsError},
};
pub use runner::{Report, Runner, run};
pub use utils::CancelFlag;
