//! Analyzer configuration.
//!
//! A config file is optional; every field has a default that reproduces the
//! stock profile (`.tex` sources, `Makefile`, `README.md`, 50-line comment
//! window).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file names searched in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["texprofile.yaml", ".texprofile.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// File extensions treated as markup sources (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Build automation file looked up at the project root
    #[serde(default = "default_build_file")]
    pub build_file: String,
    /// Readme file looked up at the project root
    #[serde(default = "default_readme_file")]
    pub readme_file: String,
    /// Glob patterns (relative to the project root) to skip, e.g. "**/figures/**"
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether to follow symlinks while walking (default: false)
    #[serde(default)]
    pub follow_links: bool,
    /// Number of leading corpus lines scanned for `%` when computing `has_comment_sections`
    #[serde(default = "default_comment_window")]
    pub preamble_comment_window: usize,
}

fn default_extensions() -> Vec<String> {
    vec!["tex".to_string()]
}

fn default_build_file() -> String {
    "Makefile".to_string()
}

fn default_readme_file() -> String {
    "README.md".to_string()
}

fn default_comment_window() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            build_file: default_build_file(),
            readme_file: default_readme_file(),
            excluded_paths: Vec::new(),
            follow_links: false,
            preamble_comment_window: default_comment_window(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a file with this path counts as a markup source.
    pub fn is_markup_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|want| want == ext))
            .unwrap_or(false)
    }

    /// Build a matcher for `excluded_paths`.
    ///
    /// Returns `None` when nothing is excluded.
    pub fn exclusion_matcher(&self) -> Result<Option<globset::GlobSet>, globset::Error> {
        if self.excluded_paths.is_empty() {
            return Ok(None);
        }
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(globset::Glob::new(pattern)?);
        }
        Ok(Some(builder.build()?))
    }
}

/// Look for a config file in the current directory.
pub fn discover() -> Option<std::path::PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(std::path::PathBuf::from)
        .find(|p| p.exists())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must list at least one file extension");
    }

    for ext in &config.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            anyhow::bail!("invalid extension {:?}, expected e.g. \"tex\"", ext);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
