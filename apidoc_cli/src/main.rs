use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use apidoc_cli::ApidocCli;
use apidoc_cli::Commands;
use apidoc_cli::OutputFormat;
use apidoc_core::ApidocDefaults;
use apidoc_core::ApidocError;
use apidoc_core::HostConfig;
use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Style;
use tracing_subscriber::EnvFilter;

static COLOR: AtomicBool = AtomicBool::new(true);

/// Render `text` with `style` when the terminal accepts color.
fn paint(text: impl std::fmt::Display, style: Style) -> String {
	if COLOR.load(Ordering::Relaxed) {
		text.style(style).to_string()
	} else {
		text.to_string()
	}
}

fn main() {
	let args = ApidocCli::parse();
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	COLOR.store(use_color, Ordering::Relaxed);

	init_tracing(args.verbose, use_color);
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Prune {
			dest,
			suffix,
			dry_run,
			manifest,
			written,
		}) => run_prune(dest, suffix, *dry_run, manifest.as_deref(), written),
		Some(Commands::Defaults { format }) => run_defaults(&args, *format),
		None => {
			eprintln!("apidoc: no subcommand given, see `apidoc --help`.");
			process::exit(1);
		}
	};

	if let Err(error) = result {
		report_error(error);
		process::exit(2);
	}
}

/// `ApidocError`s carry a diagnostic code and help text, so they go through
/// miette. Anything else is printed on one line.
fn report_error(error: Box<dyn std::error::Error>) {
	match error.downcast::<ApidocError>() {
		Ok(error) => eprintln!("{:?}", miette::Report::new(*error)),
		Err(error) => eprintln!("{} {error}", paint("apidoc:", Style::new().red())),
	}
}

/// Log to stderr. `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "info,apidoc_core=debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.try_init();
}

fn resolve_root(args: &ApidocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<28} {value}");
}

/// Read a newline-separated list of written paths. Blank lines are skipped.
fn read_manifest(path: &Path) -> Result<Vec<PathBuf>, ApidocError> {
	let content = std::fs::read_to_string(path).map_err(|e| {
		ApidocError::Manifest {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})?;

	Ok(content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(PathBuf::from)
		.collect())
}

fn run_prune(
	dest: &Path,
	suffix: &str,
	dry_run: bool,
	manifest: Option<&Path>,
	written: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
	let mut written_files = written.to_vec();
	if let Some(manifest) = manifest {
		written_files.extend(read_manifest(manifest)?);
	}

	let report = if dry_run {
		apidoc_core::preview_prune(&written_files, dest, suffix)?
	} else {
		apidoc_core::prune(&written_files, dest, suffix)?
	};

	let verb = if dry_run { "Would remove" } else { "Removed" };
	for path in &report.removed {
		println!("{} {}", paint(verb, Style::new().green()), path.display());
	}

	match (report.removed.len(), dry_run) {
		(0, _) => println!("No stale files found in {}.", dest.display()),
		(count, true) => println!("\n{count} stale file(s) would be removed."),
		(count, false) => println!("\nRemoved {count} stale file(s)."),
	}

	if !report.is_clean() {
		let message = format!("{} file(s) could not be removed.", report.failures.len());
		println!("{}", paint(message, Style::new().yellow()));
	}

	Ok(())
}

fn run_defaults(args: &ApidocCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = HostConfig::resolve_path(&root);
	let config = HostConfig::load(&root)?.unwrap_or_default();
	let defaults = ApidocDefaults::from_config(&config);

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"config_path": config_path,
				"defaults": defaults,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			println!("{}", paint("apidoc defaults", Style::new().bold()));
			print_field(
				"Resolved config",
				config_path.as_ref().map_or_else(
					|| "(none, using built-in defaults)".to_string(),
					|path| path.display().to_string(),
				),
			);
			print_field("exclude_patterns", list(defaults.exclude_patterns()));
			print_field("automodule_options", list(defaults.automodule_options()));
			print_field("max_depth", defaults.max_depth());
			print_field("follow_links", defaults.follow_links());
			print_field("separate_modules", defaults.separate_modules());
			print_field("include_private", defaults.include_private());
			print_field("no_headings", defaults.no_headings());
			print_field("module_first", defaults.module_first());
			print_field("implicit_namespaces", defaults.implicit_namespaces());
		}
	}

	Ok(())
}

fn list<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
	let joined = items
		.into_iter()
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(", ");
	if joined.is_empty() {
		"(none)".to_string()
	} else {
		joined
	}
}
