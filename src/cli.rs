use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brainrun", after_long_help = "Optimizing interpreter and dialect translator for Brainfuck-family languages.")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Execute a program from a file, reading program input from stdin
	Run {
		/// Source file
		path:    PathBuf,
		/// Dialect the file is written in
		#[arg(long)]
		dialect: Option<String>,
		/// Cell width: 8, 16 or 32
		#[arg(long)]
		width:   Option<String>,
		/// Number of cells on the tape
		#[arg(long)]
		size:    Option<usize>,
		/// Out of bounds pointer moves: fatal, wrap, clamp or ignore
		#[arg(long)]
		bounds:  Option<String>,
		/// Log execution stats when done
		#[arg(long)]
		stats:   bool,
	},
	/// Convert a program between dialects
	Convert {
		/// Source file
		input:  PathBuf,
		/// Destination file
		output: PathBuf,
		/// Dialect of the source file
		#[arg(long)]
		from:   String,
		/// Dialect to write
		#[arg(long)]
		to:     String,
	},
	/// List available dialects or memories
	List {
		/// `dialects` or `memories`
		target: String,
	},
}
