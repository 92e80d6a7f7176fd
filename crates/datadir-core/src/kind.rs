//! Content classification of discovered entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content category of a file system entry.
///
/// Classification from an extension always produces exactly one variant.
/// `Directory` is never produced by [`EntryKind::from_extension`]; it exists
/// so callers can describe directories with the same vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A generic file.
    File,
    /// YAML document (`.yaml`, `.yml`).
    #[serde(rename = "YAML")]
    Yaml,
    /// JSON document (`.json`, `.json5`).
    #[serde(rename = "JSON")]
    Json,
    /// Plain text (`.txt`, `.text`).
    Text,
    /// Anything else.
    #[default]
    Unknown,
}

impl EntryKind {
    /// Classify an extension, with or without its leading dot.
    ///
    /// Matching is case-insensitive. The literal token `directory` maps to
    /// [`EntryKind::Unknown`], not [`EntryKind::Directory`].
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.strip_prefix('.').unwrap_or(extension);

        match extension.to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "yaml" | "yml" => Self::Yaml,
            "json" | "json5" => Self::Json,
            "text" | "txt" => Self::Text,
            "directory" | "unknown" => Self::Unknown,
            _ => Self::Unknown,
        }
    }

    /// Classify a base name by its extension.
    pub fn for_name(name: &str) -> Self {
        Self::from_extension(extension_of(name))
    }

    /// Human-readable name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "Directory",
            Self::File => "File",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Text => "Text",
            Self::Unknown => "Unknown",
        }
    }

    /// Human-readable name of an optional kind; absent values read as `Unknown`.
    pub fn name_of(kind: Option<Self>) -> &'static str {
        kind.unwrap_or_default().as_str()
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check if this is a generic file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Check if this is a YAML document.
    pub fn is_yaml(&self) -> bool {
        matches!(self, Self::Yaml)
    }

    /// Check if this is a JSON document.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Check if this is plain text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Check if the content category is unknown.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntryKind {
    fn from(extension: &str) -> Self {
        Self::from_extension(extension)
    }
}

/// Classify an extension. Shorthand for [`EntryKind::from_extension`].
pub fn classify(extension: &str) -> EntryKind {
    EntryKind::from_extension(extension)
}

/// Extension of a base name, including its leading dot.
///
/// Everything from the final `.` onward; empty when the name has no dot.
/// A dot-file such as `.json` is its own extension.
pub fn extension_of(name: &str) -> &str {
    name.rfind('.').map_or("", |idx| &name[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_aliases_and_case() {
        assert_eq!(classify("yml"), EntryKind::Yaml);
        assert_eq!(classify("YAML"), EntryKind::Yaml);
        assert_eq!(classify(".Yml"), EntryKind::Yaml);
    }

    #[test]
    fn test_directory_token_is_unknown() {
        assert_eq!(classify("directory"), EntryKind::Unknown);
        assert_eq!(classify(".DIRECTORY"), EntryKind::Unknown);
    }

    #[test]
    fn test_only_one_dot_stripped() {
        assert_eq!(classify("..json"), EntryKind::Unknown);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.yaml"), ".yaml");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".json"), ".json");
    }

    #[test]
    fn test_name_of_absent() {
        assert_eq!(EntryKind::name_of(None), "Unknown");
        assert_eq!(EntryKind::name_of(Some(EntryKind::Directory)), "Directory");
    }
}
