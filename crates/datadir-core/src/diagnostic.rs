//! Non-fatal diagnostics and the sinks that receive them.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Debug,
    Warning,
    Error,
}

/// Kind of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A candidate name was blank or contained a path separator.
    InvalidCandidate,
    /// Stat of a probe path failed.
    StatFailed,
    /// A probe path exists but is not a directory.
    NotADirectory,
    /// No enclosing repository, or its metadata is unreadable.
    RepoRootUnavailable,
    /// A search phase finished without a match.
    NotFound,
    /// A candidate directory was resolved.
    Resolved,
    /// Traversal stopped on an I/O error.
    WalkFailed,
}

impl DiagnosticKind {
    /// Name used as the `kind` field in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCandidate => "InvalidCandidate",
            Self::StatFailed => "StatFailed",
            Self::NotADirectory => "NotADirectory",
            Self::RepoRootUnavailable => "RepoRootUnavailable",
            Self::NotFound => "NotFound",
            Self::Resolved => "Resolved",
            Self::WalkFailed => "WalkFailed",
        }
    }
}

/// Observation emitted while locating or walking.
///
/// Diagnostics never influence control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub level: Level,
    /// Kind of diagnostic.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Path involved, if any.
    pub path: Option<PathBuf>,
    /// Candidate name involved, if any.
    pub candidate: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: Level, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            path: None,
            candidate: None,
        }
    }

    /// Debug-level diagnostic.
    pub fn debug(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Debug, kind, message)
    }

    /// Warning-level diagnostic.
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, kind, message)
    }

    /// Error-level diagnostic.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Error, kind, message)
    }

    /// Attach a path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a candidate name.
    pub fn with_candidate(mut self, candidate: impl Into<String>) -> Self {
        self.candidate = Some(candidate.into());
        self
    }

    /// Blank or separator-bearing candidate name.
    pub fn invalid_candidate(original: &str, message: impl Into<String>) -> Self {
        Self::warning(DiagnosticKind::InvalidCandidate, message).with_candidate(original)
    }

    /// Stat failure at a probe path.
    pub fn stat_failed(path: &Path, error: &std::io::Error) -> Self {
        Self::warning(
            DiagnosticKind::StatFailed,
            format!("Error while evaluating {}: {error}", path.display()),
        )
        .with_path(path)
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    /// Record a diagnostic.
    fn emit(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let kind = diagnostic.kind.as_str();
        let path = diagnostic
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let candidate = diagnostic.candidate.as_deref().unwrap_or_default();

        match diagnostic.level {
            Level::Debug => {
                tracing::debug!(
                    kind,
                    path = path.as_str(),
                    candidate,
                    "{}",
                    diagnostic.message
                )
            }
            Level::Warning => {
                tracing::warn!(
                    kind,
                    path = path.as_str(),
                    candidate,
                    "{}",
                    diagnostic.message
                )
            }
            Level::Error => {
                tracing::error!(
                    kind,
                    path = path.as_str(),
                    candidate,
                    "{}",
                    diagnostic.message
                )
            }
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Check if a diagnostic of the given kind was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics().iter().any(|d| d.kind == kind)
    }

    /// Number of diagnostics recorded.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic);
        }
    }
}
