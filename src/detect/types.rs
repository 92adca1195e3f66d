//! Core types for the project profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::roles::FileRole;
use super::tree::FolderTree;

/// Indentation convention detected across a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentationStyle {
    Spaces,
    Tabs,
    #[default]
    Unknown,
}

impl IndentationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentationStyle::Spaces => "spaces",
            IndentationStyle::Tabs => "tabs",
            IndentationStyle::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IndentationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete profile of one LaTeX project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub files_and_structure: FilesAndStructure,
    pub macros: Macros,
    pub preamble: Preamble,
    pub code_style: CodeStyle,
    pub structure_elements: StructureElements,
    pub verna_features: VernaFeatures,
    pub folder_tree: FolderTree,
}

/// File organization of the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesAndStructure {
    pub num_tex_files: usize,
    /// Relative paths in traversal order
    pub tex_files: Vec<String>,
    /// Distinct folders containing markup files, sorted; `.` is the root
    pub folders: Vec<String>,
    pub file_roles: BTreeMap<FileRole, usize>,
    pub uses_input_include: bool,
    pub has_makefile: bool,
    pub has_readme: bool,
    pub total_line_count: usize,
    pub total_character_count: usize,
    pub num_folders: usize,
    pub modularity_score: usize,
}

/// Custom macro usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub num_custom_macros: usize,
    pub macro_prefixes: Vec<String>,
    pub uses_parameters_in_macros: bool,
    pub redefines_builtin_commands: bool,
}

/// Package imports and preamble shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preamble {
    pub num_packages: usize,
    pub used_packages: Vec<String>,
    pub preamble_line_count: usize,
    pub has_comment_sections: bool,
}

/// Line-level formatting statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeStyle {
    pub avg_line_length: f64,
    pub longest_line_length: usize,
    pub indentation_style: IndentationStyle,
    pub indentation_width: usize,
    pub comment_ratio: f64,
}

/// Occurrence counts per sectioning level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectioningDepth {
    pub section: usize,
    pub subsection: usize,
    pub subsubsection: usize,
}

/// Document-structure usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureElements {
    pub sectioning_depth: SectioningDepth,
    pub environments_used: Vec<String>,
    pub uses_labels_and_refs: bool,
    pub citation_commands: Vec<String>,
}

/// Holistic style flags derived from the whole corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VernaFeatures {
    pub has_verna_comment_blocks: bool,
    pub packages_alphabetized: bool,
}

/// Round to two decimal places, as reported ratios and averages are.
///
/// Exact halves go to the even neighbour.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
