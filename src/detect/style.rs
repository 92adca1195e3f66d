//! Whole-corpus formatting statistics.

use super::patterns::is_comment;
use super::types::{round2, CodeStyle, IndentationStyle};

/// Line length in characters, terminator included.
pub fn line_length(line: &str) -> usize {
    line.chars().count()
}

/// Fraction of comment lines, rounded to two decimals; 0 for no lines.
pub fn comment_ratio<S: AsRef<str>>(lines: &[S]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let comments = as_strs(lines).filter(|l| is_comment(l)).count();
    round2(comments as f64 / lines.len() as f64)
}

pub(crate) fn as_strs<S: AsRef<str>>(lines: &[S]) -> impl Iterator<Item = &str> {
    lines.iter().map(|l| l.as_ref())
}

fn leading_run(line: &str, ch: char) -> usize {
    line.chars().take_while(|&c| c == ch).count()
}

/// Detect the indentation convention.
///
/// Space-indented lines win over tab-indented ones; the reported width is the
/// smallest indent observed for the winning style.
pub fn detect_indentation<S: AsRef<str>>(lines: &[S]) -> (IndentationStyle, usize) {
    let min_spaces = as_strs(lines)
        .filter(|l| l.starts_with(' '))
        .map(|l| leading_run(l, ' '))
        .min();
    if let Some(width) = min_spaces {
        return (IndentationStyle::Spaces, width);
    }

    let min_tabs = as_strs(lines)
        .filter(|l| l.starts_with('\t'))
        .map(|l| leading_run(l, '\t'))
        .min();
    if let Some(width) = min_tabs {
        return (IndentationStyle::Tabs, width);
    }

    (IndentationStyle::Unknown, 0)
}

/// Compute the full [`CodeStyle`] record for a line corpus.
pub fn compute<S: AsRef<str>>(lines: &[S]) -> CodeStyle {
    let (indentation_style, indentation_width) = detect_indentation(lines);
    let mut style = CodeStyle {
        indentation_style,
        indentation_width,
        comment_ratio: comment_ratio(lines),
        ..Default::default()
    };

    if !lines.is_empty() {
        let lengths: Vec<usize> = as_strs(lines).map(line_length).collect();
        let total: usize = lengths.iter().sum();
        style.avg_line_length = round2(total as f64 / lengths.len() as f64);
        style.longest_line_length = lengths.iter().copied().max().unwrap_or(0);
    }

    style
}
