//! Nested mirror of a project's directory structure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Directory nesting only; files are never leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderTree(BTreeMap<String, FolderTree>);

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path given as segments, extending existing branches.
    pub fn insert<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = self;
        for segment in segments {
            node = node.0.entry(segment.into()).or_default();
        }
    }

    /// Insert a relative directory path. `.` and empty paths are ignored.
    pub fn insert_path(&mut self, relative: &Path) {
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if !segments.is_empty() {
            self.insert(segments);
        }
    }

    pub fn get(&self, segment: &str) -> Option<&FolderTree> {
        self.0.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut tree = FolderTree::new();
        tree.insert(["chapters", "intro"]);
        tree.insert(["chapters", "intro"]);
        tree.insert(["chapters"]);
        tree.insert(["chapters", "results"]);

        assert_eq!(tree.len(), 1);
        let chapters = tree.get("chapters").unwrap();
        assert_eq!(chapters.keys().collect::<Vec<_>>(), vec!["intro", "results"]);
        assert!(chapters.get("intro").unwrap().is_empty());
    }

    #[test]
    fn test_insert_path_ignores_current_dir() {
        let mut tree = FolderTree::new();
        tree.insert_path(Path::new("."));
        tree.insert_path(Path::new(""));
        assert!(tree.is_empty());

        tree.insert_path(Path::new("./figs/plots"));
        assert!(tree.get("figs").unwrap().get("plots").is_some());
    }

    #[test]
    fn test_serializes_as_nested_mapping() {
        let mut tree = FolderTree::new();
        tree.insert(["b"]);
        tree.insert(["a", "x"]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"a":{"x":{}},"b":{}}"#);
    }
}
