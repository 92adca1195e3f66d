//! Per-line convention detectors.
//!
//! Every detector is a pure function of one line; none looks at neighbouring
//! lines. [`scan_line`] runs the full set and returns the line's contribution
//! to the project profile.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `\newcommand{\name` / `\renewcommand{\name`
    static ref MACRO_DEF: Regex =
        Regex::new(r"\\(?:newcommand|renewcommand)\{\\(\w+)").unwrap();

    /// Definition with an argument count, e.g. `\newcommand{\vec}[1]`
    static ref PARAM_MACRO_DEF: Regex =
        Regex::new(r"\\(?:newcommand|renewcommand)\{\\\w+\}\[(\d)\]").unwrap();

    /// Redefinition of a reserved counter/labeling command
    static ref BUILTIN_REDEF: Regex =
        Regex::new(r"\\renewcommand\{\\(?:thesection|thefigure|thetable)").unwrap();

    /// `\usepackage[opts]{a, b}`
    static ref PACKAGE_IMPORT: Regex =
        Regex::new(r"\\usepackage(?:\[[^\]]*\])?\{([^\}]*)\}").unwrap();

    // Alternation order matters: the longest command must be tried first.
    static ref SECTIONING: Regex =
        Regex::new(r"\\(subsubsection|subsection|section)\{").unwrap();

    static ref ENVIRONMENT: Regex = Regex::new(r"\\begin\{(\w+)\}").unwrap();

    static ref CROSS_REFERENCE: Regex = Regex::new(r"\\(label|ref|autoref)\{").unwrap();

    static ref CITATION: Regex = Regex::new(r"\\(cite\w*)\{").unwrap();
}

/// Substrings that mark a file-inclusion directive.
const INCLUSION_COMMANDS: &[&str] = &["\\input{", "\\include{"];

/// Marker that opens a line comment.
pub const COMMENT_MARKER: char = '%';

/// Token that opens a package import line.
pub const IMPORT_COMMAND: &str = "\\usepackage";

/// Nesting level of a sectioning command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLevel {
    Section,
    Subsection,
    Subsubsection,
}

impl SectionLevel {
    fn from_command(cmd: &str) -> Option<Self> {
        match cmd {
            "section" => Some(SectionLevel::Section),
            "subsection" => Some(SectionLevel::Subsection),
            "subsubsection" => Some(SectionLevel::Subsubsection),
            _ => None,
        }
    }
}

/// Names of all macros defined on this line.
pub fn macro_definitions(line: &str) -> Vec<&str> {
    MACRO_DEF
        .captures_iter(line)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn defines_parameterized_macro(line: &str) -> bool {
    PARAM_MACRO_DEF.is_match(line)
}

pub fn redefines_builtin(line: &str) -> bool {
    BUILTIN_REDEF.is_match(line)
}

/// Packages named by the first import command on this line.
///
/// Each comma-separated entry is trimmed; entries are not otherwise filtered.
pub fn package_imports(line: &str) -> Vec<&str> {
    PACKAGE_IMPORT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split(',').map(str::trim).collect())
        .unwrap_or_default()
}

/// Every sectioning command on this line, in order.
pub fn sectioning_commands(line: &str) -> Vec<SectionLevel> {
    SECTIONING
        .captures_iter(line)
        .filter_map(|c| c.get(1).and_then(|m| SectionLevel::from_command(m.as_str())))
        .collect()
}

/// Every environment opened on this line.
pub fn environments(line: &str) -> Vec<&str> {
    ENVIRONMENT
        .captures_iter(line)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn uses_cross_reference(line: &str) -> bool {
    CROSS_REFERENCE.is_match(line)
}

/// The first citation command on this line, e.g. `citep`.
pub fn citation_command(line: &str) -> Option<&str> {
    CITATION
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with(COMMENT_MARKER)
}

pub fn uses_input_include(line: &str) -> bool {
    INCLUSION_COMMANDS.iter().any(|cmd| line.contains(cmd))
}

/// Whether the trimmed line starts with the package import command.
pub fn is_import_line(line: &str) -> bool {
    line.trim().starts_with(IMPORT_COMMAND)
}

/// One line's contribution to the project profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFeatures<'a> {
    pub macros: Vec<&'a str>,
    pub parameterized_macro: bool,
    pub redefines_builtin: bool,
    pub packages: Vec<&'a str>,
    pub sections: Vec<SectionLevel>,
    pub environments: Vec<&'a str>,
    pub cross_reference: bool,
    pub citation: Option<&'a str>,
    pub comment: bool,
    pub input_include: bool,
}

/// Run every detector over a single line.
pub fn scan_line(line: &str) -> LineFeatures<'_> {
    LineFeatures {
        macros: macro_definitions(line),
        parameterized_macro: defines_parameterized_macro(line),
        redefines_builtin: redefines_builtin(line),
        packages: package_imports(line),
        sections: sectioning_commands(line),
        environments: environments(line),
        cross_reference: uses_cross_reference(line),
        citation: citation_command(line),
        comment: is_comment(line),
        input_include: uses_input_include(line),
    }
}
