//! Coarse document-role classification from file paths.
//!
//! Classification is a best-effort substring heuristic over the lowercased
//! relative path; file contents are never consulted.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Role a markup file plays in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Abstract,
    Introduction,
    Methods,
    Results,
    Conclusion,
    Appendix,
    Body,
    Main,
    Other,
}

/// Ordered substring rules; the first rule with any matching needle wins.
const ROLE_RULES: &[(FileRole, &[&str])] = &[
    (FileRole::Abstract, &["abstract"]),
    (FileRole::Introduction, &["intro"]),
    (FileRole::Methods, &["method"]),
    (FileRole::Results, &["result", "eval"]),
    (FileRole::Conclusion, &["conclu", "discuss"]),
    (FileRole::Appendix, &["appendix", "appendice"]),
    (FileRole::Body, &["chapter", "section"]),
];

/// Basenames that mark the root document.
const MAIN_FILE_NAMES: &[&str] = &["main.tex", "thesis.tex"];

impl FileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::Abstract => "abstract",
            FileRole::Introduction => "introduction",
            FileRole::Methods => "methods",
            FileRole::Results => "results",
            FileRole::Conclusion => "conclusion",
            FileRole::Appendix => "appendix",
            FileRole::Body => "body",
            FileRole::Main => "main",
            FileRole::Other => "other",
        }
    }

    /// Classify a file by its (relative) path.
    pub fn classify<P: AsRef<Path>>(path: P) -> Self {
        let lowered = path.as_ref().to_string_lossy().to_lowercase();

        for (role, needles) in ROLE_RULES {
            if needles.iter().any(|n| lowered.contains(n)) {
                return *role;
            }
        }

        let name = Path::new(&lowered)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if MAIN_FILE_NAMES.contains(&name) {
            return FileRole::Main;
        }

        FileRole::Other
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
