use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::ApidocError;
use crate::ApidocResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"apidoc.toml",
	".apidoc.toml",
	".config/apidoc.toml",
];

/// Default maximum depth of the module tree walk.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Automodule flags applied when the host configuration doesn't name any.
pub const DEFAULT_AUTOMODULE_OPTIONS: [&str; 3] = ["members", "show-inheritance", "undoc-members"];

/// The apidoc values a host configuration must expose.
///
/// [`ApidocDefaults::from_config`](crate::ApidocDefaults::from_config) reads
/// exactly these nine values. Any configuration type can seed apidoc defaults
/// by implementing this trait; [`HostConfig`] is the implementation backed by
/// `apidoc.toml`.
pub trait ApidocConfigSource {
	fn apidoc_exclude_patterns(&self) -> &[String];
	fn apidoc_automodule_options(&self) -> &[String];
	fn apidoc_max_depth(&self) -> u32;
	fn apidoc_follow_links(&self) -> bool;
	fn apidoc_separate_modules(&self) -> bool;
	fn apidoc_include_private(&self) -> bool;
	fn apidoc_no_headings(&self) -> bool;
	fn apidoc_module_first(&self) -> bool;
	fn apidoc_implicit_namespaces(&self) -> bool;
}

/// Host configuration loaded from an `apidoc.toml` file.
///
/// The file may carry any number of unrelated keys. Only the flat `apidoc_*`
/// keys are read; each one falls back to its registered default when absent.
///
/// ```toml
/// project = "example"
///
/// apidoc_exclude_patterns = ["tests/*", "setup.py"]
/// apidoc_automodule_options = ["members", "undoc-members"]
/// apidoc_max_depth = 2
/// apidoc_follow_links = false
/// apidoc_separate_modules = true
/// apidoc_include_private = false
/// apidoc_no_headings = false
/// apidoc_module_first = true
/// apidoc_implicit_namespaces = false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct HostConfig {
	/// Glob-like patterns for paths to leave out of the module walk.
	pub apidoc_exclude_patterns: Vec<String>,
	/// Flags passed through to every generated `automodule` directive.
	pub apidoc_automodule_options: Vec<String>,
	/// Maximum depth of submodules listed in a table of contents.
	pub apidoc_max_depth: u32,
	/// Whether symlinked directories are traversed.
	pub apidoc_follow_links: bool,
	/// Whether each module gets its own output file.
	pub apidoc_separate_modules: bool,
	/// Whether underscore-prefixed members are documented.
	pub apidoc_include_private: bool,
	/// Whether generated section headings are suppressed.
	pub apidoc_no_headings: bool,
	/// Whether module documentation comes before the submodule listing.
	pub apidoc_module_first: bool,
	/// Whether directories without a package marker count as packages.
	pub apidoc_implicit_namespaces: bool,
}

impl Default for HostConfig {
	fn default() -> Self {
		Self {
			apidoc_exclude_patterns: Vec::new(),
			apidoc_automodule_options: DEFAULT_AUTOMODULE_OPTIONS
				.iter()
				.map(ToString::to_string)
				.collect(),
			apidoc_max_depth: DEFAULT_MAX_DEPTH,
			apidoc_follow_links: false,
			apidoc_separate_modules: false,
			apidoc_include_private: false,
			apidoc_no_headings: false,
			apidoc_module_first: false,
			apidoc_implicit_namespaces: false,
		}
	}
}

impl HostConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ApidocResult<Option<HostConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		Self::from_toml_str(&content).map(Some)
	}

	/// Parse a host configuration document.
	pub fn from_toml_str(content: &str) -> ApidocResult<HostConfig> {
		toml::from_str(content).map_err(|e| ApidocError::ConfigParse(e.to_string()))
	}
}

impl ApidocConfigSource for HostConfig {
	fn apidoc_exclude_patterns(&self) -> &[String] {
		&self.apidoc_exclude_patterns
	}

	fn apidoc_automodule_options(&self) -> &[String] {
		&self.apidoc_automodule_options
	}

	fn apidoc_max_depth(&self) -> u32 {
		self.apidoc_max_depth
	}

	fn apidoc_follow_links(&self) -> bool {
		self.apidoc_follow_links
	}

	fn apidoc_separate_modules(&self) -> bool {
		self.apidoc_separate_modules
	}

	fn apidoc_include_private(&self) -> bool {
		self.apidoc_include_private
	}

	fn apidoc_no_headings(&self) -> bool {
		self.apidoc_no_headings
	}

	fn apidoc_module_first(&self) -> bool {
		self.apidoc_module_first
	}

	fn apidoc_implicit_namespaces(&self) -> bool {
		self.apidoc_implicit_namespaces
	}
}
