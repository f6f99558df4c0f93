use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobMatcher;

use crate::ApidocError;
use crate::ApidocResult;
use crate::options::validate_suffix;

/// A stale file that could not be removed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PruneFailure {
	pub path: PathBuf,
	/// Operating system description of the failure, e.g. `Permission denied`.
	pub reason: String,
}

/// Outcome of a prune pass.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PruneReport {
	/// Stale files that were removed, or would be removed when previewing.
	pub removed: Vec<PathBuf>,
	/// Stale files that could not be removed.
	pub failures: Vec<PruneFailure>,
}

impl PruneReport {
	/// Returns `true` if no removal failed.
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Remove every file under `dest_dir` named `*.{suffix}` that is not one of
/// `written_files`.
///
/// The suffix is matched literally. The whole tree is enumerated before
/// anything is removed, so an unreadable `dest_dir` aborts the pass with the
/// tree untouched. Subdirectories that can't be read are skipped with a
/// warning. Failing to remove an individual file is not an error either: it
/// is logged, recorded in [`PruneReport::failures`] and the pass moves on.
///
/// A missing `dest_dir` has nothing to prune. Directories are never removed,
/// and symlinked directories are not descended into.
pub fn prune<I, P>(written_files: I, dest_dir: &Path, suffix: &str) -> ApidocResult<PruneReport>
where
	I: IntoIterator<Item = P>,
	P: AsRef<Path>,
{
	let stale = find_stale_files(written_files, dest_dir, suffix)?;
	let mut report = PruneReport::default();

	for existing in stale {
		match std::fs::remove_file(&existing) {
			Ok(()) => {
				tracing::debug!(path = %existing.display(), "removed stale file");
				report.removed.push(existing);
			}
			Err(e) => {
				let reason = os_reason(&e);
				tracing::warn!(
					category = "autodoc",
					path = %existing.display(),
					reason = %reason,
					"Failed to remove {}: {}",
					existing.display(),
					reason,
				);
				report.failures.push(PruneFailure {
					path: existing,
					reason,
				});
			}
		}
	}

	tracing::debug!(
		dest_dir = %dest_dir.display(),
		removed = report.removed.len(),
		failed = report.failures.len(),
		"prune finished"
	);

	Ok(report)
}

/// Report what [`prune`] would remove without touching the filesystem.
pub fn preview_prune<I, P>(
	written_files: I,
	dest_dir: &Path,
	suffix: &str,
) -> ApidocResult<PruneReport>
where
	I: IntoIterator<Item = P>,
	P: AsRef<Path>,
{
	let removed = find_stale_files(written_files, dest_dir, suffix)?;
	for path in &removed {
		tracing::debug!(path = %path.display(), "[dry-run] would remove stale file");
	}

	Ok(PruneReport {
		removed,
		failures: Vec::new(),
	})
}

fn find_stale_files<I, P>(
	written_files: I,
	dest_dir: &Path,
	suffix: &str,
) -> ApidocResult<Vec<PathBuf>>
where
	I: IntoIterator<Item = P>,
	P: AsRef<Path>,
{
	let matcher = build_suffix_matcher(suffix)?;
	let files_to_keep: HashSet<PathBuf> = written_files
		.into_iter()
		.map(|path| normalize_path(path.as_ref()))
		.collect();

	let mut candidates = Vec::new();
	collect_matching(dest_dir, &matcher, &mut candidates)?;

	let mut stale: Vec<PathBuf> = candidates
		.into_iter()
		.filter(|path| !files_to_keep.contains(&normalize_path(path)))
		.collect();
	// Sort for deterministic ordering.
	stale.sort();
	Ok(stale)
}

/// Build the `*.{suffix}` matcher applied to each entry's file name.
fn build_suffix_matcher(suffix: &str) -> ApidocResult<GlobMatcher> {
	validate_suffix(suffix)?;
	let glob = GlobBuilder::new(&format!("*.{}", globset::escape(suffix)))
		.literal_separator(true)
		.build()
		.map_err(|e| {
			ApidocError::InvalidOption {
				name: "suffix".to_string(),
				reason: e.to_string(),
			}
		})?;

	Ok(glob.compile_matcher())
}

/// Collect every entry below `dest_dir` whose name matches.
///
/// Only a failure to read `dest_dir` itself is an error.
fn collect_matching(
	dest_dir: &Path,
	matcher: &GlobMatcher,
	found: &mut Vec<PathBuf>,
) -> ApidocResult<()> {
	if !dest_dir.is_dir() {
		return Ok(());
	}

	let entries = std::fs::read_dir(dest_dir).map_err(|e| read_dir_error(dest_dir, &e))?;
	collect_entries(dest_dir, entries, matcher, found);

	Ok(())
}

fn collect_entries(
	dir: &Path,
	entries: std::fs::ReadDir,
	matcher: &GlobMatcher,
	found: &mut Vec<PathBuf>,
) {
	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				warn_unreadable(dir, &e);
				continue;
			}
		};
		let path = entry.path();

		if matcher.is_match(entry.file_name()) {
			found.push(path.clone());
		}

		// `file_type` doesn't follow symlinks, so linked directories are skipped.
		match entry.file_type() {
			Ok(file_type) if file_type.is_dir() => {
				match std::fs::read_dir(&path) {
					Ok(children) => collect_entries(&path, children, matcher, found),
					Err(e) => warn_unreadable(&path, &e),
				}
			}
			Ok(_) => {}
			Err(e) => warn_unreadable(&path, &e),
		}
	}
}

fn warn_unreadable(path: &Path, error: &std::io::Error) {
	let reason = os_reason(error);
	tracing::warn!(
		category = "autodoc",
		path = %path.display(),
		reason = %reason,
		"Skipping unreadable directory {}: {}",
		path.display(),
		reason,
	);
}

fn read_dir_error(path: &Path, error: &std::io::Error) -> ApidocError {
	ApidocError::ReadDir {
		path: path.display().to_string(),
		reason: os_reason(error),
	}
}

/// Normalize a path for keep-set lookups.
///
/// The parent directory is canonicalized and the file name kept as is, so
/// relative and absolute spellings of one file compare equal while a symlink
/// and its target stay distinct.
fn normalize_path(path: &Path) -> PathBuf {
	let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

	match (absolute.parent(), absolute.file_name()) {
		(Some(parent), Some(name)) => {
			parent
				.canonicalize()
				.map_or_else(|_| absolute.clone(), |parent| parent.join(name))
		}
		_ => absolute,
	}
}

/// The OS description of an I/O error without the ` (os error N)` suffix
/// that `std` appends.
fn os_reason(error: &std::io::Error) -> String {
	let message = error.to_string();
	if error.raw_os_error().is_none() {
		return message;
	}

	match message.rfind(" (os error ") {
		Some(index) => message[..index].to_string(),
		None => message,
	}
}
