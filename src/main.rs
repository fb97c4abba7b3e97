use std::io::{Write, stdin, stdout};

use anyhow::{Context, anyhow};
use brainrun::{
	DialectKind, Runner,
	cli::*,
	memory::{BoundsPolicy, CellWidth, DEFAULT_CAPACITY, MemoryConfig},
};
use palc::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
	init_logging();

	let result = match Cli::parse().command {
		Command::Run { path, dialect, width, size, bounds, stats } => run(path, dialect, width, size, bounds, stats),
		Command::Convert { input, output, from, to } => convert(input, output, &from, &to),
		Command::List { target } => list(&target),
	};
	if let Err(e) = result {
		eprintln!("Failed: {e:#}");
		std::process::exit(1);
	}
}

/// `RUST_LOG` overrides the default filter
fn init_logging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,brainrun=info"));
	fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn run(
	path: std::path::PathBuf,
	dialect: Option<String>,
	width: Option<String>,
	size: Option<usize>,
	bounds: Option<String>,
	stats: bool,
) -> anyhow::Result<()> {
	let dialect = dialect.as_deref().map(str::parse::<DialectKind>).transpose()?.unwrap_or_default();
	let config = MemoryConfig::default()
		.with_cell_width(width.as_deref().map(str::parse::<CellWidth>).transpose()?.unwrap_or_default())
		.with_capacity(size.filter(|&size| size > 0).unwrap_or(DEFAULT_CAPACITY))
		.with_bounds(bounds.as_deref().map(str::parse::<BoundsPolicy>).transpose()?.unwrap_or_default());

	let runner = Runner::new(config);
	let report = runner
		.run_file(&path, &dialect.dialect(), stdin().lock(), stdout().lock())
		.with_context(|| format!("Failed run file {}", path.display()))?;
	println!();
	if stats {
		info!("{}", report.stats);
	}
	Ok(())
}

fn convert(input: std::path::PathBuf, output: std::path::PathBuf, from: &str, to: &str) -> anyhow::Result<()> {
	let from: DialectKind = from.parse()?;
	let to: DialectKind = to.parse()?;
	let source =
		std::fs::read_to_string(&input).with_context(|| format!("Failed open source file {}", input.display()))?;
	std::fs::write(&output, from.translate(&source, to))
		.with_context(|| format!("Failed write {}", output.display()))?;
	println!("Converted {} -> {}", input.display(), output.display());
	Ok(())
}

fn list(target: &str) -> anyhow::Result<()> {
	let mut out = stdout().lock();
	match target.to_ascii_lowercase().as_str() {
		"dialects" => {
			for kind in DialectKind::ALL {
				writeln!(out, "{kind:?} - {kind}")?;
			}
		}
		"memories" => {
			for width in CellWidth::ALL {
				writeln!(out, "{width} - {}", width.name())?;
			}
		}
		_ => return Err(anyhow!("Unknown list target: {target}, expected dialects or memories")),
	}
	Ok(())
}
