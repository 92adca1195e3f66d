//! Errors surfaced by the analysis engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a project analysis.
///
/// Everything else (undecodable bytes, missing markers, empty projects) is
/// folded into the summary as a zero/empty default.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("project directory not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walking project tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl AnalyzeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
