//! Serial jwalk-based file inventory.

use std::fs;
use std::io;
use std::path::Path;

use jwalk::{Parallelism, WalkDir};

use datadir_core::{
    Descriptor, Diagnostic, DiagnosticKind, DiagnosticSink, LocateError, WalkConfig, WalkError,
};

/// Depth-first walker producing a [`Descriptor`] per non-directory entry.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    /// Create a walker with the given options.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk options in effect.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk `root`, describing every file beneath it.
    ///
    /// Directories are descended into but never described. Entries come back
    /// in directory enumeration order; sort them if order matters. The first
    /// I/O error stops the walk, and the descriptors gathered so far travel
    /// with the error.
    pub fn walk<S>(&self, root: &Path, sink: &S) -> Result<Vec<Descriptor>, WalkError>
    where
        S: DiagnosticSink + ?Sized,
    {
        if let Err(err) = fs::symlink_metadata(root) {
            return Err(self.fail(sink, Vec::new(), LocateError::traversal(root, err)));
        }
        // A symlinked root is read through but still yields itself as a link.
        let root_is_dir = fs::metadata(root).is_ok_and(|m| m.is_dir());

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .sort(false)
            .skip_hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_symlinks)
            .min_depth(0)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        let mut descriptors = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let err = traversal_error(err, root);
                    return Err(self.fail(sink, descriptors, err));
                }
            };

            if entry.file_type().is_dir() || (entry.depth() == 0 && root_is_dir) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            descriptors.push(Descriptor::new(entry.path(), name));
        }

        Ok(descriptors)
    }

    fn fail<S>(&self, sink: &S, partial: Vec<Descriptor>, err: LocateError) -> WalkError
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut diagnostic = Diagnostic::warning(
            DiagnosticKind::WalkFailed,
            format!("Error while walking directory: {err}"),
        );
        if let LocateError::Traversal { path, .. } = &err {
            diagnostic = diagnostic.with_path(path);
        }
        sink.emit(diagnostic);

        WalkError::new(partial, err)
    }
}

/// Convert a jwalk error, keeping the underlying I/O error kind.
fn traversal_error(err: jwalk::Error, root: &Path) -> LocateError {
    let path = err
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    let kind = err.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    LocateError::traversal(path, io::Error::new(kind, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datadir_core::{EntryKind, MemorySink};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("a.yaml"), "key: value").unwrap();
        fs::write(root.join("b.txt"), "hello").unwrap();
        fs::write(root.join("nested/c.json"), "{}").unwrap();

        temp
    }

    /// Entries of `dir` that enumerate ahead of `name`.
    fn listed_before(dir: &Path, name: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .take_while(|path| path != name)
            .collect()
    }

    fn sorted(mut descriptors: Vec<Descriptor>) -> Vec<Descriptor> {
        descriptors.sort_by(|a, b| a.path().cmp(b.path()));
        descriptors
    }

    #[test]
    fn test_walk_describes_files_only() {
        let temp = create_test_tree();
        let sink = MemorySink::new();

        let descriptors = sorted(Walker::default().walk(temp.path(), &sink).unwrap());

        assert_eq!(descriptors.len(), 3);
        assert!(descriptors.iter().all(|d| d.name() != "nested"));

        assert_eq!(descriptors[0].path(), temp.path().join("a.yaml"));
        assert_eq!(descriptors[0].kind(), EntryKind::Yaml);
        assert_eq!(descriptors[1].path(), temp.path().join("b.txt"));
        assert_eq!(descriptors[1].kind(), EntryKind::Text);
        assert_eq!(descriptors[2].path(), temp.path().join("nested/c.json"));
        assert_eq!(descriptors[2].name(), "c.json");
        assert_eq!(descriptors[2].kind(), EntryKind::Json);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_hidden_files_included_by_default() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".env"), "X=1").unwrap();

        let descriptors = Walker::default().walk(temp.path(), &MemorySink::new()).unwrap();
        let hidden = descriptors.iter().find(|d| d.name() == ".env").unwrap();
        assert_eq!(hidden.kind(), EntryKind::Unknown);
    }

    #[test]
    fn test_hidden_files_skipped_when_configured() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".env"), "X=1").unwrap();

        let walker = Walker::new(WalkConfig {
            include_hidden: false,
            ..WalkConfig::default()
        });
        let descriptors = walker.walk(temp.path(), &MemorySink::new()).unwrap();
        assert_eq!(descriptors.len(), 3);
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let temp = create_test_tree();

        let walker = Walker::new(WalkConfig {
            max_depth: Some(1),
            ..WalkConfig::default()
        });
        let descriptors = walker.walk(temp.path(), &MemorySink::new()).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert!(descriptors.iter().all(|d| d.name() != "c.json"));
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let sink = MemorySink::new();

        let err = Walker::default()
            .walk(&temp.path().join("missing"), &sink)
            .unwrap_err();

        assert!(err.partial().is_empty());
        assert_eq!(err.error().io_kind(), Some(io::ErrorKind::NotFound));
        assert!(sink.contains(DiagnosticKind::WalkFailed));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let descriptors = Walker::default().walk(temp.path(), &MemorySink::new()).unwrap();
        assert!(descriptors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_described_not_followed() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("nested"), temp.path().join("link"))
            .unwrap();

        let descriptors = Walker::default().walk(temp.path(), &MemorySink::new()).unwrap();
        assert_eq!(descriptors.len(), 4);
        assert!(descriptors.iter().any(|d| d.name() == "link"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_is_not_described() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("a.txt"), "a").unwrap();
        let root = temp.path().join("testdata");
        std::os::unix::fs::symlink(&real, &root).unwrap();

        let descriptors = Walker::default().walk(&root, &MemorySink::new()).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].path(), root.join("a.txt"));
        assert_eq!(descriptors[0].name(), "a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_root_is_described() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real.json"), "{}").unwrap();
        let root = temp.path().join("link.json");
        std::os::unix::fs::symlink(temp.path().join("real.json"), &root).unwrap();

        let descriptors = Walker::default().walk(&root, &MemorySink::new()).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].kind(), EntryKind::Json);
    }

    #[cfg(unix)]
    #[test]
    fn test_error_mid_walk_keeps_partial_results() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("a.yaml"), "a: 1").unwrap();
        let mut broken = root.join("z0");
        fs::create_dir(&broken).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), broken.join("dangling")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        // Enumeration order belongs to the filesystem. Rename the broken
        // directory until some file is listed ahead of it.
        for attempt in 1..64 {
            if !listed_before(root, &broken).is_empty() {
                break;
            }
            let renamed = root.join(format!("z{attempt}"));
            fs::rename(&broken, &renamed).unwrap();
            broken = renamed;
        }
        let mut expected = listed_before(root, &broken);
        expected.sort();
        assert!(!expected.is_empty());

        let walker = Walker::new(WalkConfig {
            follow_symlinks: true,
            ..WalkConfig::default()
        });
        let sink = MemorySink::new();
        let err = walker.walk(root, &sink).unwrap_err();

        assert_eq!(err.partial().len(), expected.len());
        assert_eq!(err.error().io_kind(), Some(io::ErrorKind::NotFound));
        assert!(sink.contains(DiagnosticKind::WalkFailed));

        let (partial, source) = err.into_parts();
        let mut paths: Vec<PathBuf> = partial.iter().map(|d| d.path().to_path_buf()).collect();
        paths.sort();
        assert_eq!(paths, expected);
        assert!(
            matches!(source, LocateError::Traversal { ref path, .. } if path.ends_with("dangling"))
        );
    }
}
