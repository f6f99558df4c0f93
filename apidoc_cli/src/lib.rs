use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Prune stale API documentation stubs and inspect apidoc defaults.",
	long_about = "apidoc keeps the output directory of an API documentation stub generator in \
	              sync with the files the generator last wrote.\n\nIt removes every output file \
	              that the latest run did not produce and reports the project-wide defaults \
	              read from `apidoc.toml`.\n\nQuick start:\n  apidoc prune --dest docs/api \
	              docs/api/*.rst\n  apidoc defaults  Show the resolved apidoc defaults"
)]
pub struct ApidocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Remove output files that the latest generation run did not write.
	///
	/// Every file below `--dest` whose name ends in `.<suffix>` and that is
	/// not part of the write-set is deleted. Files with other suffixes and
	/// directories are never touched. A file that can't be removed is
	/// reported as a warning and the remaining files are still pruned.
	Prune {
		/// Directory the generator writes its output to.
		#[arg(long, short)]
		dest: PathBuf,

		/// Output file extension, without the leading dot.
		#[arg(long, short, default_value = "rst")]
		suffix: String,

		/// List the files that would be removed without deleting them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// File listing written paths, one per line. Combined with any paths
		/// given as arguments.
		#[arg(long)]
		manifest: Option<PathBuf>,

		/// Files written by the latest generation run.
		written: Vec<PathBuf>,
	},
	/// Print the apidoc defaults resolved from the project configuration.
	///
	/// Reads `apidoc.toml`, `.apidoc.toml` or `.config/apidoc.toml` from the
	/// project root. Built-in defaults are shown when no file exists.
	Defaults {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
