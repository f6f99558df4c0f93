use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::Serialize;

use crate::ApidocError;
use crate::ApidocResult;
use crate::PruneReport;
use crate::config::ApidocConfigSource;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::prune::preview_prune;
use crate::prune::prune;

/// Options for one stub generation run.
///
/// Every value is fixed at construction. Use [`ApidocOptions::builder`] to
/// set the fields that differ from their defaults; `dest_dir` and
/// `module_path` are required.
///
/// ```rust
/// use apidoc_core::ApidocOptions;
///
/// let options = ApidocOptions::builder()
/// 	.dest_dir("docs/api")
/// 	.module_path("src/pkg")
/// 	.separate_modules(true)
/// 	.automodule_options(["members", "undoc-members", "members"])
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!(options.suffix(), "rst");
/// assert_eq!(options.automodule_options().len(), 2);
/// ```
///
/// Fields cannot be changed once the options are built:
///
/// ```rust,compile_fail
/// use apidoc_core::ApidocOptions;
///
/// let mut options = ApidocOptions::builder()
/// 	.dest_dir("docs/api")
/// 	.module_path("src/pkg")
/// 	.build()
/// 	.unwrap();
///
/// options.suffix = String::from("txt");
/// ```
#[derive(Debug, Clone, Builder, Serialize, Eq, PartialEq)]
#[builder(
	pattern = "owned",
	setter(into),
	build_fn(validate = "Self::validate", error = "ApidocError")
)]
#[allow(clippy::struct_excessive_bools)]
pub struct ApidocOptions {
	dest_dir: PathBuf,
	module_path: PathBuf,

	#[builder(setter(custom), default)]
	exclude_pattern: Vec<String>,
	#[builder(default = "DEFAULT_MAX_DEPTH")]
	max_depth: u32,
	#[builder(default)]
	follow_links: bool,
	#[builder(default)]
	separate_modules: bool,
	#[builder(default)]
	include_private: bool,
	#[builder(default = "String::from(\"modules\")")]
	toc_file: String,
	#[builder(default)]
	no_headings: bool,
	#[builder(default)]
	module_first: bool,
	#[builder(default)]
	implicit_namespaces: bool,
	#[builder(setter(custom), default)]
	automodule_options: BTreeSet<String>,
	#[builder(default = "String::from(\"rst\")")]
	suffix: String,

	#[builder(default = "true")]
	remove_old: bool,

	#[builder(default)]
	quiet: bool,
	#[builder(default)]
	dry_run: bool,
	#[builder(default = "true")]
	force: bool,

	// Only read when `full` is set.
	#[builder(default)]
	full: bool,
	#[builder(default)]
	append_syspath: bool,
	#[builder(default)]
	header: String,
	#[builder(setter(into, strip_option), default)]
	author: Option<String>,
	#[builder(setter(into, strip_option), default)]
	version: Option<String>,
	#[builder(setter(into, strip_option), default)]
	release: Option<String>,
	#[builder(setter(custom), default)]
	extensions: Option<Vec<String>>,
	#[builder(setter(into, strip_option), default)]
	template_dir: Option<PathBuf>,
}

impl ApidocOptionsBuilder {
	/// Glob-like patterns for paths to leave out of the module walk.
	#[must_use]
	pub fn exclude_pattern<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_pattern = Some(patterns.into_iter().map(Into::into).collect());
		self
	}

	/// Flags passed through to `automodule` directives. Duplicates collapse.
	#[must_use]
	pub fn automodule_options<I, S>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.automodule_options = Some(options.into_iter().map(Into::into).collect());
		self
	}

	/// Extension names enabled in a generated full-project configuration.
	#[must_use]
	pub fn extensions<I, S>(mut self, extensions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.extensions = Some(Some(extensions.into_iter().map(Into::into).collect()));
		self
	}

	fn validate(&self) -> Result<(), ApidocError> {
		if let Some(suffix) = &self.suffix {
			validate_suffix(suffix)?;
		}

		if self.max_depth == Some(0) {
			return Err(ApidocError::InvalidOption {
				name: "max_depth".to_string(),
				reason: "must be at least 1".to_string(),
			});
		}

		Ok(())
	}
}

/// Check that an output suffix is a bare extension: non-empty, without a
/// leading dot and without path separators.
pub(crate) fn validate_suffix(suffix: &str) -> ApidocResult<()> {
	let reason = if suffix.is_empty() {
		"must not be empty"
	} else if suffix.starts_with('.') {
		"must not start with `.`"
	} else if suffix.contains(['/', '\\']) {
		"must not contain a path separator"
	} else {
		return Ok(());
	};

	Err(ApidocError::InvalidOption {
		name: "suffix".to_string(),
		reason: reason.to_string(),
	})
}

impl ApidocOptions {
	/// Create a new options builder.
	pub fn builder() -> ApidocOptionsBuilder {
		ApidocOptionsBuilder::default()
	}

	/// Directory the generated files are written to.
	pub fn dest_dir(&self) -> &Path {
		&self.dest_dir
	}

	/// Root of the source tree to document.
	pub fn module_path(&self) -> &Path {
		&self.module_path
	}

	pub fn exclude_pattern(&self) -> &[String] {
		&self.exclude_pattern
	}

	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	pub fn follow_links(&self) -> bool {
		self.follow_links
	}

	pub fn separate_modules(&self) -> bool {
		self.separate_modules
	}

	pub fn include_private(&self) -> bool {
		self.include_private
	}

	/// Base name of the table-of-contents file, without extension.
	pub fn toc_file(&self) -> &str {
		&self.toc_file
	}

	pub fn no_headings(&self) -> bool {
		self.no_headings
	}

	pub fn module_first(&self) -> bool {
		self.module_first
	}

	pub fn implicit_namespaces(&self) -> bool {
		self.implicit_namespaces
	}

	pub fn automodule_options(&self) -> &BTreeSet<String> {
		&self.automodule_options
	}

	/// Output file extension, without the leading dot.
	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	/// Whether stale outputs are pruned after the run.
	pub fn remove_old(&self) -> bool {
		self.remove_old
	}

	pub fn quiet(&self) -> bool {
		self.quiet
	}

	pub fn dry_run(&self) -> bool {
		self.dry_run
	}

	/// Whether existing files are overwritten unconditionally.
	pub fn force(&self) -> bool {
		self.force
	}

	/// Whether project-level scaffolding is generated as well.
	pub fn is_full(&self) -> bool {
		self.full
	}

	pub fn append_syspath(&self) -> bool {
		self.append_syspath
	}

	pub fn header(&self) -> &str {
		&self.header
	}

	pub fn author(&self) -> Option<&str> {
		self.author.as_deref()
	}

	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	pub fn release(&self) -> Option<&str> {
		self.release.as_deref()
	}

	pub fn extensions(&self) -> Option<&[String]> {
		self.extensions.as_deref()
	}

	pub fn template_dir(&self) -> Option<&Path> {
		self.template_dir.as_deref()
	}

	/// Prune stale outputs from [`dest_dir`](Self::dest_dir) after a run
	/// that wrote `written_files`.
	///
	/// Nothing is scanned when `remove_old` is unset. In a dry run the stale
	/// files are reported but left on disk.
	pub fn prune_stale<I, P>(&self, written_files: I) -> ApidocResult<PruneReport>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		if !self.remove_old {
			return Ok(PruneReport::default());
		}

		if self.dry_run {
			return preview_prune(written_files, &self.dest_dir, &self.suffix);
		}

		prune(written_files, &self.dest_dir, &self.suffix)
	}
}

/// Project-wide apidoc defaults taken from a host configuration.
///
/// This only collects the values. Merging them with explicit run arguments is
/// left to the caller building [`ApidocOptions`].
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ApidocDefaults {
	exclude_patterns: Vec<String>,
	automodule_options: BTreeSet<String>,
	max_depth: u32,
	follow_links: bool,
	separate_modules: bool,
	include_private: bool,
	no_headings: bool,
	module_first: bool,
	implicit_namespaces: bool,
}

impl ApidocDefaults {
	/// Collect the default values for apidoc options.
	pub fn from_config<C>(config: &C) -> Self
	where
		C: ApidocConfigSource + ?Sized,
	{
		Self {
			exclude_patterns: config.apidoc_exclude_patterns().to_vec(),
			automodule_options: config
				.apidoc_automodule_options()
				.iter()
				.cloned()
				.collect(),
			max_depth: config.apidoc_max_depth(),
			follow_links: config.apidoc_follow_links(),
			separate_modules: config.apidoc_separate_modules(),
			include_private: config.apidoc_include_private(),
			no_headings: config.apidoc_no_headings(),
			module_first: config.apidoc_module_first(),
			implicit_namespaces: config.apidoc_implicit_namespaces(),
		}
	}

	pub fn exclude_patterns(&self) -> &[String] {
		&self.exclude_patterns
	}

	pub fn automodule_options(&self) -> &BTreeSet<String> {
		&self.automodule_options
	}

	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	pub fn follow_links(&self) -> bool {
		self.follow_links
	}

	pub fn separate_modules(&self) -> bool {
		self.separate_modules
	}

	pub fn include_private(&self) -> bool {
		self.include_private
	}

	pub fn no_headings(&self) -> bool {
		self.no_headings
	}

	pub fn module_first(&self) -> bool {
		self.module_first
	}

	pub fn implicit_namespaces(&self) -> bool {
		self.implicit_namespaces
	}
}
