use derive_builder::UninitializedFieldError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ApidocError {
	#[error(transparent)]
	#[diagnostic(code(apidoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(apidoc::config_parse),
		help("check that apidoc.toml is valid TOML and that `apidoc_*` keys have the expected types")
	)]
	ConfigParse(String),

	#[error("missing required option: `{0}`")]
	#[diagnostic(
		code(apidoc::missing_option),
		help("set `{0}` on the options builder before calling `build()`")
	)]
	MissingOption(String),

	#[error("invalid value for option `{name}`: {reason}")]
	#[diagnostic(code(apidoc::invalid_option))]
	InvalidOption { name: String, reason: String },

	#[error("failed to read output directory `{path}`: {reason}")]
	#[diagnostic(
		code(apidoc::read_dir),
		help("make sure the destination directory is readable")
	)]
	ReadDir { path: String, reason: String },

	#[error("failed to read manifest `{path}`: {reason}")]
	#[diagnostic(
		code(apidoc::manifest),
		help("a manifest lists one written file per line")
	)]
	Manifest { path: String, reason: String },
}

impl From<UninitializedFieldError> for ApidocError {
	fn from(error: UninitializedFieldError) -> Self {
		Self::MissingOption(error.field_name().to_string())
	}
}

pub type ApidocResult<T> = Result<T, ApidocError>;
pub type AnyEmptyResult = Result<(), Box<dyn std::error::Error>>;
