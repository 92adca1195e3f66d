//! texprofile - LaTeX project convention profiler.
//!
//! texprofile walks a directory of `.tex` sources and produces a
//! [`ProjectSummary`]: how the project is organized into files and folders,
//! which authoring conventions it follows (custom macros, packages,
//! indentation, commenting) and which document-structure features it uses
//! (sectioning, environments, citations, cross-references). Profiles are
//! meant to be compared across many projects by a downstream pipeline.
//!
//! # Architecture
//!
//! - `detect`: per-line detectors, role classification, style metrics and the
//!   [`Analyzer`] that folds them into one summary
//! - `config`: optional YAML configuration
//! - `report`: output formatting (JSON, YAML, pretty)
//! - `cli`: command-line front end, including batch mode
//!
//! ```no_run
//! let summary = texprofile::analyze_project("thesis/")?;
//! println!("{} packages", summary.preamble.num_packages);
//! # Ok::<(), texprofile::AnalyzeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod report;

pub use config::Config;
pub use detect::{analyze_project, Analyzer, FileRole, FolderTree, ProjectSummary};
pub use error::AnalyzeError;
