//! `apidoc_core` holds the configuration surface and the output-tree
//! synchronization used by an API documentation stub generator.
//!
//! A generation driver walks a module tree, writes one stub file per module
//! or package, and records every path it wrote. This crate does not render
//! anything itself; it covers what happens around the generation pass.
//!
//! ## Modules
//!
//! - [`config`]: Host configuration loading from `apidoc.toml` and the
//!   [`ApidocConfigSource`] trait that exposes the `apidoc_*` defaults.
//! - `options`: [`ApidocOptions`], the immutable parameters of one run, and
//!   [`ApidocDefaults`], the project-wide defaults read from a host
//!   configuration.
//! - `prune`: [`prune`], which removes outputs left behind by earlier runs.
//!
//! ## Pruning
//!
//! After a run, every file under the destination directory that carries the
//! output suffix but was not written by the run is stale:
//!
//! ```rust,no_run
//! use apidoc_core::ApidocOptions;
//! use std::path::PathBuf;
//!
//! let options = ApidocOptions::builder()
//! 	.dest_dir("docs/api")
//! 	.module_path("src/pkg")
//! 	.build()
//! 	.unwrap();
//!
//! let written = vec![PathBuf::from("docs/api/pkg.rst")];
//! let report = options.prune_stale(&written).unwrap();
//! for path in &report.removed {
//! 	println!("removed {}", path.display());
//! }
//! ```
//!
//! Files that can't be removed are logged as warnings and listed in
//! [`PruneReport::failures`]; they never abort the pass.

pub use config::*;
pub use error::*;
pub use options::*;
pub use prune::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod options;
mod prune;
