//! Enclosing repository root discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why no repository root could be determined.
#[derive(Debug, Error)]
pub enum RepoRootError {
    /// No repository encloses the start path.
    #[error("No repository found above {start}")]
    NotFound { start: PathBuf },

    /// The repository has no working tree.
    #[error("Repository at {path} has no working tree")]
    Bare { path: PathBuf },

    /// Repository metadata could not be read.
    #[cfg(feature = "git")]
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

/// Find the root of the working tree enclosing `start`.
#[cfg(feature = "git")]
pub fn resolve_repo_root(start: &Path) -> Result<PathBuf, RepoRootError> {
    let repo = match git2::Repository::discover(start) {
        Ok(repo) => repo,
        Err(err) if err.code() == git2::ErrorCode::NotFound => {
            return Err(RepoRootError::NotFound {
                start: start.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    match repo.workdir() {
        Some(workdir) => Ok(normalize(workdir)),
        None => Err(RepoRootError::Bare {
            path: normalize(repo.path()),
        }),
    }
}

/// Find the root of the working tree enclosing `start`.
///
/// Looks for a `.git` entry (directory, or file for worktrees) in the
/// canonical form of `start` and each of its ancestors.
#[cfg(not(feature = "git"))]
pub fn resolve_repo_root(start: &Path) -> Result<PathBuf, RepoRootError> {
    let canonical = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    canonical
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(normalize)
        .ok_or_else(|| RepoRootError::NotFound {
            start: start.to_path_buf(),
        })
}

/// Drop trailing separators and `.` components.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
