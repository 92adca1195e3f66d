//! Project analyzer that drives every detector over one project tree.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{AnalyzeError, Result};

use super::patterns::{scan_line, LineFeatures, SectionLevel};
use super::roles::FileRole;
use super::style::{self, line_length};
use super::tree::FolderTree;
use super::types::{
    FilesAndStructure, Macros, Preamble, ProjectSummary, SectioningDepth, StructureElements,
};
use super::verna;

/// Line marking the end of the preamble.
const BODY_START_MARKER: &str = "\\begin{document}";

/// Name recorded for markup files sitting directly in the project root.
const ROOT_FOLDER: &str = ".";

/// Bonus added to the modularity score when files are stitched together.
const INCLUSION_BONUS: usize = 2;

/// Builds a [`ProjectSummary`] for a project directory.
pub struct Analyzer {
    config: Config,
    exclusions: Option<GlobSet>,
}

impl Analyzer {
    /// Create an analyzer; fails only if an exclusion pattern is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let exclusions = config.exclusion_matcher()?;
        Ok(Self { config, exclusions })
    }

    /// Analyze the project rooted at `root`.
    ///
    /// The tree is walked once in file-name order. A project without markup
    /// files still yields a complete summary. A missing or unreadable root,
    /// or an unreadable markup file, is an error; unreadable subdirectories
    /// are skipped with a warning.
    pub fn analyze<P: AsRef<Path>>(&self, root: P) -> Result<ProjectSummary> {
        let root = root.as_ref();
        check_root(root)?;

        let mut acc = Accumulator::default();
        let mut folder_tree = FolderTree::new();

        for entry in self.walk(root) {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            if entry.file_type().is_dir() {
                folder_tree.insert_path(relative);
                continue;
            }

            if !is_regular_file(&entry) || !self.config.is_markup_file(entry.path()) {
                continue;
            }

            let lines = read_lines(entry.path())?;
            let role = FileRole::classify(relative);
            tracing::debug!(
                file = %relative.display(),
                role = %role,
                lines = lines.len(),
                "scanned markup file"
            );
            acc.add_file(relative, role, lines);
        }

        let summary = acc.finish(ProjectContext {
            project_id: project_id(root),
            has_makefile: root.join(&self.config.build_file).exists(),
            has_readme: root.join(&self.config.readme_file).exists(),
            folder_tree,
            comment_window: self.config.preamble_comment_window,
        });

        tracing::info!(
            project = %summary.project_id,
            files = summary.files_and_structure.num_tex_files,
            lines = summary.files_and_structure.total_line_count,
            "project analyzed"
        );

        Ok(summary)
    }

    /// Mirror every non-excluded subdirectory under `root`.
    ///
    /// The root itself is not a key of its own tree.
    pub fn folder_tree<P: AsRef<Path>>(&self, root: P) -> Result<FolderTree> {
        let root = root.as_ref();
        check_root(root)?;

        let mut tree = FolderTree::new();
        for entry in self.walk(root) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                tree.insert_path(relative);
            }
        }
        Ok(tree)
    }

    /// Entries below `root` in file-name order, with exclusions pruned.
    ///
    /// Errors on the root are returned; errors below it are logged and skipped.
    fn walk<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = Result<DirEntry>> + 'a {
        WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| !self.is_excluded(root, e))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.depth() == 0 => None,
                Ok(entry) => Some(Ok(entry)),
                Err(e) if e.depth() == 0 => Some(Err(e.into())),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
    }

    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        let Some(matcher) = &self.exclusions else {
            return false;
        };
        match entry.path().strip_prefix(root) {
            Ok(relative) if entry.depth() > 0 => matcher.is_match(relative),
            _ => false,
        }
    }
}

/// Analyze a project with the default configuration.
pub fn analyze_project<P: AsRef<Path>>(root: P) -> Result<ProjectSummary> {
    Analyzer::new(Config::default())?.analyze(root)
}

/// Build the folder tree of `root` with the default configuration.
pub fn build_folder_tree<P: AsRef<Path>>(root: P) -> Result<FolderTree> {
    Analyzer::new(Config::default())?.folder_tree(root)
}

fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AnalyzeError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AnalyzeError::NotFound(root.to_path_buf()))
        }
        Err(e) => Err(AnalyzeError::io(root, e)),
    }
}

/// Regular files, plus symlinks that resolve to one when links are not followed.
fn is_regular_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

/// Final path segment of the project root, resolving `.` and friends.
fn project_id(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

/// Read a file as text, dropping undecodable bytes.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| AnalyzeError::io(path, e))?;
    Ok(split_lines(&decode_ignoring_invalid(&bytes)))
}

/// Decode UTF-8, silently skipping invalid byte sequences.
pub(crate) fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    // Truncated sequence at end of input
                    None => break,
                }
            }
        }
    }
    out
}

/// Split text into lines that keep their `\n` terminator.
///
/// `\r\n` and lone `\r` are normalized to `\n` first.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split_inclusive('\n').map(str::to_string).collect()
}

/// Project-level facts gathered outside the per-file pass.
struct ProjectContext {
    project_id: String,
    has_makefile: bool,
    has_readme: bool,
    folder_tree: FolderTree,
    comment_window: usize,
}

/// Running state of one analysis; consumed by [`Accumulator::finish`].
#[derive(Default)]
struct Accumulator {
    tex_files: Vec<String>,
    folders: BTreeSet<String>,
    file_roles: BTreeMap<FileRole, usize>,
    uses_input_include: bool,

    num_custom_macros: usize,
    macro_names: BTreeSet<String>,
    parameterized_macros: bool,
    redefines_builtin: bool,

    packages: BTreeSet<String>,
    preamble_line_count: Option<usize>,

    sectioning: SectioningDepth,
    environments: BTreeSet<String>,
    cross_references: bool,
    citations: BTreeSet<String>,

    lines: Vec<String>,
}

impl Accumulator {
    fn add_file(&mut self, relative: &Path, role: FileRole, lines: Vec<String>) {
        self.tex_files.push(relative.to_string_lossy().into_owned());
        self.folders.insert(folder_of(relative));
        *self.file_roles.entry(role).or_insert(0) += 1;

        if self.preamble_line_count.is_none() {
            self.preamble_line_count = lines.iter().position(|l| l.contains(BODY_START_MARKER));
        }

        for line in &lines {
            self.absorb(&scan_line(line));
        }
        self.lines.extend(lines);
    }

    fn absorb(&mut self, features: &LineFeatures<'_>) {
        self.uses_input_include |= features.input_include;

        self.num_custom_macros += features.macros.len();
        self.macro_names
            .extend(features.macros.iter().map(|m| m.to_string()));
        self.parameterized_macros |= features.parameterized_macro;
        self.redefines_builtin |= features.redefines_builtin;

        self.packages
            .extend(features.packages.iter().map(|p| p.to_string()));

        for level in &features.sections {
            match level {
                SectionLevel::Section => self.sectioning.section += 1,
                SectionLevel::Subsection => self.sectioning.subsection += 1,
                SectionLevel::Subsubsection => self.sectioning.subsubsection += 1,
            }
        }
        self.environments
            .extend(features.environments.iter().map(|e| e.to_string()));
        self.cross_references |= features.cross_reference;
        if let Some(cite) = features.citation {
            self.citations.insert(cite.to_string());
        }
    }

    fn finish(self, ctx: ProjectContext) -> ProjectSummary {
        let code_style = style::compute(&self.lines);
        let mut verna_features = verna::compute(&self.lines);
        if self.tex_files.is_empty() {
            verna_features.packages_alphabetized = false;
        }

        let total_character_count = self.lines.iter().map(|l| line_length(l)).sum();
        let has_comment_sections = self
            .lines
            .iter()
            .take(ctx.comment_window)
            .any(|l| l.contains('%'));

        let num_tex_files = self.tex_files.len();
        let num_folders = self.folders.len();
        let modularity_score = num_tex_files
            + num_folders
            + if self.uses_input_include {
                INCLUSION_BONUS
            } else {
                0
            };

        let used_packages: Vec<String> = self.packages.into_iter().collect();

        ProjectSummary {
            project_id: ctx.project_id,
            files_and_structure: FilesAndStructure {
                num_tex_files,
                tex_files: self.tex_files,
                folders: self.folders.into_iter().collect(),
                file_roles: self.file_roles,
                uses_input_include: self.uses_input_include,
                has_makefile: ctx.has_makefile,
                has_readme: ctx.has_readme,
                total_line_count: self.lines.len(),
                total_character_count,
                num_folders,
                modularity_score,
            },
            macros: Macros {
                num_custom_macros: self.num_custom_macros,
                macro_prefixes: self.macro_names.into_iter().collect(),
                uses_parameters_in_macros: self.parameterized_macros,
                redefines_builtin_commands: self.redefines_builtin,
            },
            preamble: Preamble {
                num_packages: used_packages.len(),
                used_packages,
                preamble_line_count: self.preamble_line_count.unwrap_or(0),
                has_comment_sections,
            },
            code_style,
            structure_elements: StructureElements {
                sectioning_depth: self.sectioning,
                environments_used: self.environments.into_iter().collect(),
                uses_labels_and_refs: self.cross_references,
                citation_commands: self.citations.into_iter().collect(),
            },
            verna_features,
            folder_tree: ctx.folder_tree,
        }
    }
}

fn folder_of(relative: &Path) -> String {
    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ROOT_FOLDER.to_string(),
    }
}

/// Paths of every immediate subdirectory of `parent`, sorted by name.
///
/// Used by batch mode, where each subdirectory is one project.
pub fn project_dirs<P: AsRef<Path>>(parent: P) -> Result<Vec<PathBuf>> {
    let parent = parent.as_ref();
    check_root(parent)?;

    let mut dirs = Vec::new();
    for entry in WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}
