//! Error types for location and traversal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::descriptor::Descriptor;

/// Errors that can occur while locating or walking a directory.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The current working directory could not be determined.
    #[error("Working directory unavailable: {source}")]
    WorkingDirectory {
        #[source]
        source: io::Error,
    },

    /// No candidate matched from any anchor.
    #[error("No directory named {} found", .candidates.join(", "))]
    NotFound { candidates: Vec<String> },

    /// Traversal hit an I/O error.
    #[error("I/O error at {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LocateError {
    /// Create a traversal error with path context.
    pub fn traversal(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Traversal {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Kind of the underlying I/O error, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::WorkingDirectory { source } | Self::Traversal { source, .. } => {
                Some(source.kind())
            }
            Self::NotFound { .. } => None,
        }
    }
}

/// A walk that stopped early.
///
/// Carries the descriptors collected before the failure so the caller can
/// decide whether to keep them.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct WalkError {
    partial: Vec<Descriptor>,
    source: LocateError,
}

impl WalkError {
    /// Create a walk error from its partial results and cause.
    pub fn new(partial: Vec<Descriptor>, source: LocateError) -> Self {
        Self { partial, source }
    }

    /// Descriptors collected before the failure.
    pub fn partial(&self) -> &[Descriptor] {
        &self.partial
    }

    /// The underlying error.
    pub fn error(&self) -> &LocateError {
        &self.source
    }

    /// Split into partial results and cause.
    pub fn into_parts(self) -> (Vec<Descriptor>, LocateError) {
        (self.partial, self.source)
    }
}

impl From<LocateError> for WalkError {
    fn from(source: LocateError) -> Self {
        Self::new(Vec::new(), source)
    }
}
