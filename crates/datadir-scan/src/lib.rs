//! Directory location and traversal engine for datadir.
//!
//! This crate finds the nearest directory with a conventional name
//! (`testdata` by default) and inventories the files beneath it.
//!
//! # Overview
//!
//! - **Locator** searches the working directory and its ancestors, then
//!   falls back to the enclosing git repository root
//! - **Walker** does a serial depth-first jwalk traversal, classifying
//!   every file by extension
//! - **Diagnostics** go to an injected [`DiagnosticSink`] rather than a
//!   global logger
//!
//! # Example
//!
//! ```rust,no_run
//! use datadir_scan::Locator;
//!
//! let mut locator = Locator::new(["testdata", "fixtures"]);
//! let root = locator.resolve().unwrap().to_path_buf();
//! println!("Resolved {}", root.display());
//!
//! for descriptor in locator.walk().unwrap() {
//!     println!("{} ({})", descriptor.path().display(), descriptor.kind());
//! }
//! ```
//!
//! # Capturing Diagnostics
//!
//! ```rust,no_run
//! use datadir_scan::{Locator, LocatorConfig, MemorySink};
//!
//! let mut locator = Locator::with_sink(LocatorConfig::default(), MemorySink::new());
//! let _ = locator.resolve();
//!
//! for diagnostic in locator.sink().diagnostics() {
//!     eprintln!("{:?}: {}", diagnostic.level, diagnostic.message);
//! }
//! ```

mod locator;
mod repo;
mod walker;

pub use locator::{Anchor, Locator, Resolution};
pub use repo::{RepoRootError, resolve_repo_root};
pub use walker::Walker;

// Re-export core types for convenience
pub use datadir_core::{
    DEFAULT_CANDIDATE, Descriptor, Diagnostic, DiagnosticKind, DiagnosticSink, EntryKind, Level,
    LocateError, LocatorConfig, MemorySink, TracingSink, WalkConfig, WalkError, classify,
};
