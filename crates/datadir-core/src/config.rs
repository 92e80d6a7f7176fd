//! Locator and walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Candidate searched for when none are supplied.
pub const DEFAULT_CANDIDATE: &str = "testdata";

/// Configuration for locating and walking a directory.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LocatorConfig {
    /// Directory names to search for, in priority order.
    #[builder(default)]
    #[serde(default)]
    pub candidates: Vec<String>,

    /// Anchor for the first search phase (None = process working directory).
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Fall back to the enclosing repository root.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub repo_fallback: bool,

    /// Options for walking the resolved directory.
    #[builder(default)]
    #[serde(default)]
    pub walk: WalkConfig,
}

/// Configuration for directory traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Follow symbolic links.
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden files (starting with .).
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Maximum depth to traverse (None = unlimited).
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
        }
    }
}

impl LocatorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(ref dir)) = self.working_dir {
            if dir.as_os_str().is_empty() {
                return Err("Working directory cannot be empty".to_string());
            }
        }
        if let Some(ref walk) = self.walk {
            if walk.max_depth == Some(0) {
                return Err("Max depth must be at least 1".to_string());
            }
        }
        Ok(())
    }
}

impl LocatorConfig {
    /// Create a new locator config builder.
    pub fn builder() -> LocatorConfigBuilder {
        LocatorConfigBuilder::default()
    }

    /// Create a simple config searching for the given names.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            working_dir: None,
            repo_fallback: true,
            walk: WalkConfig::default(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self::new([DEFAULT_CANDIDATE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LocatorConfig::builder()
            .candidates(vec!["fixtures".to_string()])
            .working_dir("/home/user/project")
            .repo_fallback(false)
            .build()
            .unwrap();

        assert_eq!(config.candidates, vec!["fixtures".to_string()]);
        assert_eq!(config.working_dir, Some(PathBuf::from("/home/user/project")));
        assert!(!config.repo_fallback);
        assert!(config.walk.include_hidden);
    }

    #[test]
    fn test_builder_defaults() {
        let config = LocatorConfig::builder().build().unwrap();
        assert!(config.candidates.is_empty());
        assert!(config.working_dir.is_none());
        assert!(config.repo_fallback);
        assert_eq!(config.walk, WalkConfig::default());
    }

    #[test]
    fn test_builder_rejects_empty_working_dir() {
        let result = LocatorConfig::builder().working_dir("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_depth() {
        let walk = WalkConfig {
            max_depth: Some(0),
            ..WalkConfig::default()
        };
        assert!(LocatorConfig::builder().walk(walk).build().is_err());
    }

    #[test]
    fn test_default_searches_testdata() {
        let config = LocatorConfig::default();
        assert_eq!(config.candidates, vec![DEFAULT_CANDIDATE.to_string()]);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: LocatorConfig =
            serde_json::from_str(r#"{"candidates": ["fixtures"]}"#).unwrap();
        assert!(config.repo_fallback);
        assert!(config.walk.include_hidden);
        assert!(!config.walk.follow_symlinks);
    }
}
