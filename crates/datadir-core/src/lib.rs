//! Core types and traits for datadir.
//!
//! This crate provides the data structures shared by the datadir
//! crates: entry classification, file descriptors, diagnostics,
//! errors, and configuration.

mod config;
mod descriptor;
mod diagnostic;
mod error;
mod kind;

pub use config::{
    DEFAULT_CANDIDATE, LocatorConfig, LocatorConfigBuilder, LocatorConfigBuilderError, WalkConfig,
};
pub use descriptor::Descriptor;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Level, MemorySink, TracingSink};
pub use error::{LocateError, WalkError};
pub use kind::{EntryKind, classify, extension_of};
