//! Nearest-directory resolution with a repository-root fallback.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use datadir_core::{
    DEFAULT_CANDIDATE, Descriptor, Diagnostic, DiagnosticKind, DiagnosticSink, LocateError,
    LocatorConfig, TracingSink, WalkError,
};

use crate::repo::resolve_repo_root;
use crate::walker::Walker;

/// Where a search phase starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The working directory (first phase).
    WorkingDirectory,
    /// The enclosing repository root (second phase).
    RepositoryRoot,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingDirectory => f.write_str("working directory"),
            Self::RepositoryRoot => f.write_str("repository root"),
        }
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The matching directory.
    pub path: PathBuf,
    /// Candidate name that matched.
    pub candidate: String,
    /// Phase that found it.
    pub anchor: Anchor,
}

/// Locates the nearest directory with one of several candidate names.
///
/// The first phase searches the working directory and each of its
/// ancestors for `<ancestor>/<candidate>`; the second repeats the search
/// from the enclosing repository root. Candidates are tried in order, each
/// from the innermost ancestor outward, and the first hit is cached.
pub struct Locator<S = TracingSink> {
    candidates: Vec<String>,
    config: LocatorConfig,
    walker: Walker,
    resolved: Option<Resolution>,
    sink: S,
}

impl Locator<TracingSink> {
    /// Create a locator for the given names, logging through `tracing`.
    ///
    /// With no names, searches for `testdata`.
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_config(LocatorConfig::new(names))
    }

    /// Create a locator from a config, logging through `tracing`.
    pub fn from_config(config: LocatorConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }
}

impl Default for Locator<TracingSink> {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl<S: DiagnosticSink> Locator<S> {
    /// Create a locator reporting diagnostics to `sink`.
    pub fn with_sink(config: LocatorConfig, sink: S) -> Self {
        let candidates = normalize_candidates(&config.candidates, &sink);
        let walker = Walker::new(config.walk.clone());
        Self {
            candidates,
            config,
            walker,
            resolved: None,
            sink,
        }
    }

    /// Effective candidate names, in search order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Configuration this locator was built from.
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Cached resolution, if any.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolved.as_ref()
    }

    /// Forget the cached resolution so the next call searches again.
    pub fn invalidate(&mut self) {
        self.resolved = None;
    }

    /// Resolve the nearest matching directory.
    ///
    /// Returns the cached path without touching the filesystem once a
    /// previous call succeeded.
    pub fn resolve(&mut self) -> Result<&Path, LocateError> {
        let resolution = match self.resolved.take() {
            Some(resolution) => resolution,
            None => self.search()?,
        };
        Ok(self.resolved.insert(resolution).path.as_path())
    }

    /// Walk the resolved directory, resolving first if needed.
    pub fn walk(&mut self) -> Result<Vec<Descriptor>, WalkError> {
        let root = self.resolve()?.to_path_buf();
        self.walk_path(&root)
    }

    /// Walk an explicit root with this locator's walk options.
    pub fn walk_path(&self, root: impl AsRef<Path>) -> Result<Vec<Descriptor>, WalkError> {
        self.walker.walk(root.as_ref(), &self.sink)
    }

    fn search(&self) -> Result<Resolution, LocateError> {
        let working_dir = self.working_dir()?;

        let repo_root = if self.config.repo_fallback {
            match resolve_repo_root(&working_dir) {
                Ok(root) => Some(root),
                Err(err) => {
                    self.sink.emit(
                        Diagnostic::warning(
                            DiagnosticKind::RepoRootUnavailable,
                            format!("Repository root not found: {err}"),
                        )
                        .with_path(&working_dir),
                    );
                    None
                }
            }
        } else {
            None
        };

        if let Some(resolution) = self.search_from(&working_dir, Anchor::WorkingDirectory) {
            return Ok(resolution);
        }

        self.sink.emit(
            Diagnostic::warning(
                DiagnosticKind::NotFound,
                format!("No directory found from {}", Anchor::WorkingDirectory),
            )
            .with_path(&working_dir),
        );

        if let Some(root) = repo_root {
            if let Some(resolution) = self.search_from(&root, Anchor::RepositoryRoot) {
                return Ok(resolution);
            }
        }

        self.sink.emit(Diagnostic::error(
            DiagnosticKind::NotFound,
            format!("No directory named {} found", self.candidates.join(", ")),
        ));

        Err(LocateError::NotFound {
            candidates: self.candidates.clone(),
        })
    }

    fn working_dir(&self) -> Result<PathBuf, LocateError> {
        let current = || {
            std::env::current_dir().map_err(|source| LocateError::WorkingDirectory { source })
        };

        let dir = match &self.config.working_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current()?.join(dir),
            None => current()?,
        };
        Ok(clean(&dir))
    }

    fn search_from(&self, anchor_path: &Path, anchor: Anchor) -> Option<Resolution> {
        for candidate in &self.candidates {
            if let Some(path) = self.ancestor_search(anchor_path, candidate) {
                self.sink.emit(
                    Diagnostic::debug(
                        DiagnosticKind::Resolved,
                        format!("Found directory from {anchor}"),
                    )
                    .with_path(&path)
                    .with_candidate(candidate),
                );

                return Some(Resolution {
                    path,
                    candidate: candidate.clone(),
                    anchor,
                });
            }
        }

        None
    }

    /// Test `<dir>/<candidate>` for `start` and each ancestor, innermost first.
    fn ancestor_search(&self, start: &Path, candidate: &str) -> Option<PathBuf> {
        for (depth, dir) in start.ancestors().enumerate() {
            let probe = dir.join(candidate);

            match fs::metadata(&probe) {
                Ok(metadata) if metadata.is_dir() => return Some(probe),
                Ok(_) => self.sink.emit(
                    Diagnostic::error(
                        DiagnosticKind::NotADirectory,
                        format!("Invalid search directory: {}", probe.display()),
                    )
                    .with_path(&probe)
                    .with_candidate(candidate),
                ),
                // Only the anchor level reports a missing probe.
                Err(err) if err.kind() == io::ErrorKind::NotFound && depth > 0 => {}
                Err(err) => self
                    .sink
                    .emit(Diagnostic::stat_failed(&probe, &err).with_candidate(candidate)),
            }
        }

        None
    }
}

impl<S> fmt::Debug for Locator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("candidates", &self.candidates)
            .field("config", &self.config)
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

/// Lexically resolve `.` and `..` so ancestors are real ancestors.
///
/// Symlinks are left alone; `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Apply the default, reduce paths to base names, trim, and drop blanks.
fn normalize_candidates<S>(names: &[String], sink: &S) -> Vec<String>
where
    S: DiagnosticSink + ?Sized,
{
    if names.is_empty() {
        return vec![DEFAULT_CANDIDATE.to_string()];
    }

    let mut candidates = Vec::with_capacity(names.len());

    for original in names {
        let mut name = original.as_str();

        if name.chars().any(std::path::is_separator) {
            let base = Path::new(name)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            sink.emit(Diagnostic::invalid_candidate(
                original,
                format!("Basename not provided, using {base:?}"),
            ));
            name = base;
        }

        let name = name.trim();
        if name.is_empty() || name == "." || name == ".." {
            sink.emit(Diagnostic::invalid_candidate(original, "Invalid search directory"));
            continue;
        }

        candidates.push(name.to_string());
    }

    candidates
}
