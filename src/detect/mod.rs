//! Convention extraction for LaTeX projects.

mod patterns;
mod roles;
mod runner;
mod style;
mod tree;
mod types;
mod verna;

pub use patterns::{
    citation_command, defines_parameterized_macro, environments, is_comment, is_import_line,
    macro_definitions, package_imports, redefines_builtin, scan_line, sectioning_commands,
    uses_cross_reference, uses_input_include, LineFeatures, SectionLevel,
};
pub use roles::FileRole;
pub use runner::{analyze_project, build_folder_tree, project_dirs, Analyzer};
pub use style::{comment_ratio, detect_indentation};
pub use tree::FolderTree;
pub use types::{
    CodeStyle, FilesAndStructure, IndentationStyle, Macros, Preamble, ProjectSummary,
    SectioningDepth, StructureElements, VernaFeatures,
};
pub use verna::{has_block_comment_rules, packages_alphabetized};
