//! Command-line interface for texprofile.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::detect::{project_dirs, Analyzer};
use crate::report::{self, Format};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Profile the authoring conventions of LaTeX projects.
///
/// texprofile walks a directory of .tex sources and reports file
/// organization, macro and package usage, indentation and commenting
/// style, and document-structure features as one structured record.
#[derive(Parser)]
#[command(name = "texprofile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a single project directory
    #[command(visible_alias = "profile")]
    Analyze(AnalyzeArgs),
    /// Profile every project directory inside a parent folder
    Batch(BatchArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Project directory to analyze
    pub path: PathBuf,

    /// Write the summary to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json, yaml, or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the batch command.
#[derive(Parser)]
pub struct BatchArgs {
    /// Folder whose immediate subdirectories are projects
    pub input_dir: PathBuf,

    /// Folder receiving one `<project>.json` per project
    #[arg(short, long, default_value = "profiles")]
    pub output_dir: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of projects analyzed in parallel (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Load the explicit config, a discovered one, or the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(),
    };

    let config = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            Config::parse_file(&p)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?
        }
        None => Config::default(),
    };

    config::validate(&config)?;
    Ok(config)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let format: Format = match args.format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let analyzer = Analyzer::new(config)?;
    let summary = match analyzer.analyze(&args.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if summary.files_and_structure.num_tex_files == 0 {
        tracing::warn!(path = %args.path.display(), "no markup files found");
    }

    report::write(&summary, format, args.output.as_deref())?;

    if let Some(output) = &args.output {
        eprintln!("Summary saved to {}", output.display());
    }

    Ok(EXIT_SUCCESS)
}

/// Run the batch command.
pub fn run_batch(args: &BatchArgs) -> anyhow::Result<i32> {
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let projects = match project_dirs(&args.input_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if projects.is_empty() {
        eprintln!("Warning: no project directories in {}", args.input_dir.display());
        return Ok(EXIT_SUCCESS);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let analyzer = Analyzer::new(config)?;
    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(projects.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()?;

    let failures: usize = pool.install(|| {
        projects
            .par_iter()
            .map(|project| {
                let outcome = profile_one(&analyzer, project, &args.output_dir);
                progress.inc(1);
                match outcome {
                    Ok(out) => {
                        tracing::info!(project = %project.display(), output = %out.display(), "profile written");
                        0_usize
                    }
                    Err(e) => {
                        tracing::warn!(project = %project.display(), error = %e, "project failed");
                        progress.println(format!("failed: {}: {}", project.display(), e));
                        1_usize
                    }
                }
            })
            .sum()
    });

    progress.finish_and_clear();
    eprintln!(
        "Profiled {} of {} projects into {}",
        projects.len() - failures,
        projects.len(),
        args.output_dir.display()
    );

    if failures > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Analyze one project and write `<output_dir>/<name>.json`.
fn profile_one(analyzer: &Analyzer, project: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let summary = analyzer.analyze(project)?;
    let out = output_dir.join(format!("{}.json", summary.project_id));
    report::write(&summary, Format::Json, Some(out.as_path()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_batch_writes_one_profile_per_project() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("corpus");
        std::fs::create_dir_all(input.join("alpha")).unwrap();
        std::fs::create_dir_all(input.join("beta/chapters")).unwrap();
        std::fs::write(input.join("alpha/main.tex"), "\\section{A}\n").unwrap();
        std::fs::write(input.join("beta/chapters/intro.tex"), "% intro\n").unwrap();
        std::fs::write(input.join("stray.tex"), "ignored\n").unwrap();

        let output_dir = temp.path().join("out");
        let args = BatchArgs {
            input_dir: input,
            output_dir: output_dir.clone(),
            config: Some(write_default_config(temp.path())),
            jobs: Some(2),
            no_progress: true,
        };

        assert_eq!(run_batch(&args).unwrap(), EXIT_SUCCESS);
        assert!(output_dir.join("alpha.json").exists());
        assert!(output_dir.join("beta.json").exists());
        assert!(!output_dir.join("stray.json").exists());
    }

    #[test]
    fn test_batch_missing_input_is_error() {
        let temp = TempDir::new().unwrap();
        let args = BatchArgs {
            input_dir: temp.path().join("nope"),
            output_dir: temp.path().join("out"),
            config: Some(write_default_config(temp.path())),
            jobs: None,
            no_progress: true,
        };
        assert_eq!(run_batch(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_analyze_rejects_unknown_format() {
        let temp = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            path: temp.path().to_path_buf(),
            output: None,
            format: "sarif".to_string(),
            config: None,
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_analyze_writes_output_file() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("thesis");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(project.join("main.tex"), "\\begin{document}\n").unwrap();

        let output = temp.path().join("thesis.yaml");
        let args = AnalyzeArgs {
            path: project,
            output: Some(output.clone()),
            format: "yaml".to_string(),
            config: Some(write_default_config(temp.path())),
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_SUCCESS);
        let content = std::fs::read_to_string(output).unwrap();
        assert!(content.contains("project_id: thesis"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("bad.yaml");
        std::fs::write(&config, "extensions: []\n").unwrap();
        let args = AnalyzeArgs {
            path: temp.path().to_path_buf(),
            output: None,
            format: "json".to_string(),
            config: Some(config),
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }

    /// Explicit config so tests don't pick up one from the working directory.
    fn write_default_config(dir: &Path) -> PathBuf {
        let path = dir.join("texprofile-test.yaml");
        std::fs::write(&path, "extensions: [\"tex\"]\n").unwrap();
        path
    }
}
