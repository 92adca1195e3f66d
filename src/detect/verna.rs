//! Holistic style flags computed over the whole line corpus.
//!
//! These run independently of the per-line detector pass and only see the
//! concatenated lines in discovery order.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::is_import_line;
use super::style::as_strs;
use super::types::VernaFeatures;

lazy_static! {
    /// `% ====` style block-comment rule
    static ref BLOCK_COMMENT_RULE: Regex = Regex::new(r"^%\s*={2,}").unwrap();
}

/// Whether any line is a `%` comment followed by a `==...` rule.
pub fn has_block_comment_rules<S: AsRef<str>>(lines: &[S]) -> bool {
    as_strs(lines).any(|l| BLOCK_COMMENT_RULE.is_match(l.trim()))
}

/// Whether package import lines already appear in case-insensitive order.
///
/// Lines are compared whole (options included) across every file in
/// discovery order. A corpus without import lines is trivially sorted.
pub fn packages_alphabetized<S: AsRef<str>>(lines: &[S]) -> bool {
    let keys: Vec<String> = as_strs(lines)
        .filter(|l| is_import_line(l))
        .map(str::to_lowercase)
        .collect();

    keys.windows(2).all(|pair| pair[0] <= pair[1])
}

pub fn compute<S: AsRef<str>>(lines: &[S]) -> VernaFeatures {
    VernaFeatures {
        has_verna_comment_blocks: has_block_comment_rules(lines),
        packages_alphabetized: packages_alphabetized(lines),
    }
}
