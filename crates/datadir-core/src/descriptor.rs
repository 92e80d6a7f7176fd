//! Records describing discovered files.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::Serialize;

use crate::kind::EntryKind;

/// A single file discovered by a walk.
///
/// Descriptors are only produced by walkers and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Full traversal path.
    path: PathBuf,

    /// Base name (not full path).
    name: CompactString,

    /// Content category derived from the name's extension.
    #[serde(rename = "type")]
    kind: EntryKind,
}

impl Descriptor {
    /// Describe the entry at `path`, classifying it by its base name.
    ///
    /// Public for the walker in `datadir-scan`; other callers should take
    /// descriptors from a walk rather than build their own.
    #[doc(hidden)]
    pub fn new(path: impl Into<PathBuf>, name: impl Into<CompactString>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            kind: EntryKind::for_name(&name),
            name,
        }
    }

    /// Full path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classified content category.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Directory containing the entry, or the entry itself for directories.
    pub fn directory(&self) -> &Path {
        if self.kind.is_directory() {
            return &self.path;
        }
        self.path.parent().unwrap_or(Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_classifies_name() {
        let desc = Descriptor::new("/data/config.YML", "config.YML");
        assert_eq!(desc.kind(), EntryKind::Yaml);
        assert_eq!(desc.name(), "config.YML");
        assert_eq!(desc.path(), Path::new("/data/config.YML"));
    }

    #[test]
    fn test_directory_is_parent() {
        let desc = Descriptor::new("/data/nested/c.json", "c.json");
        assert_eq!(desc.directory(), Path::new("/data/nested"));
    }

    #[test]
    fn test_serialized_field_names() {
        let desc = Descriptor::new("/data/b.txt", "b.txt");
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(value["type"], "Text");
        assert_eq!(value["name"], "b.txt");
        assert_eq!(value["path"], "/data/b.txt");
    }
}
