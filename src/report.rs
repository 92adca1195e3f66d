//! Output formatting for project profiles.
//!
//! Supports three output formats:
//! - JSON: the canonical record consumed by corpus pipelines
//! - YAML: same structure, easier to diff by eye
//! - Pretty: colored terminal summary for humans

use colored::*;
use std::fs;
use std::path::Path;

use crate::detect::ProjectSummary;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Pretty,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "pretty" => Ok(Format::Pretty),
            _ => Err(format!(
                "invalid format {:?}, must be 'json', 'yaml', or 'pretty'",
                s
            )),
        }
    }
}

/// Serialize a summary as pretty-printed JSON.
pub fn to_json(summary: &ProjectSummary) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Serialize a summary as YAML.
pub fn to_yaml(summary: &ProjectSummary) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(summary)?)
}

/// Render a summary in `format`, to `output` if given or stdout otherwise.
pub fn write(summary: &ProjectSummary, format: Format, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = match format {
        Format::Json => to_json(summary)?,
        Format::Yaml => to_yaml(summary)?,
        Format::Pretty => {
            if output.is_some() {
                anyhow::bail!("pretty format can only be written to the terminal");
            }
            write_pretty(summary);
            return Ok(());
        }
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, rendered + "\n")
                .map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a human-readable summary to stdout.
pub fn write_pretty(summary: &ProjectSummary) {
    println!();
    print!("  ");
    print!("{}", "texprofile".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Project: ".dimmed());
    println!("{}", summary.project_id.bold());
    println!();

    write_files(summary);
    write_macros_and_preamble(summary);
    write_style(summary);
    write_structure(summary);
}

fn write_heading(title: &str) {
    println!("  {}", title.bold());
}

fn write_field(name: &str, value: impl std::fmt::Display) {
    println!("    {:<24}{}", name.dimmed(), value);
}

fn write_flag(name: &str, value: bool) {
    let shown = if value { "yes".green() } else { "no".dimmed() };
    write_field(name, shown);
}

fn write_list(name: &str, items: &[String]) {
    if items.is_empty() {
        write_field(name, "-".dimmed());
    } else {
        write_field(name, items.join(", "));
    }
}

fn write_files(summary: &ProjectSummary) {
    let files = &summary.files_and_structure;
    write_heading("Files");
    write_field("tex files", files.num_tex_files);
    write_field("folders", files.num_folders);
    write_field("lines", files.total_line_count);
    write_field("characters", files.total_character_count);
    write_field("modularity", files.modularity_score.to_string().cyan());
    if !files.file_roles.is_empty() {
        let roles: Vec<String> = files
            .file_roles
            .iter()
            .map(|(role, count)| format!("{}={}", role, count))
            .collect();
        write_field("roles", roles.join(" "));
    }
    write_flag("input/include", files.uses_input_include);
    write_flag("makefile", files.has_makefile);
    write_flag("readme", files.has_readme);
    println!();
}

fn write_macros_and_preamble(summary: &ProjectSummary) {
    let macros = &summary.macros;
    write_heading("Macros");
    write_field("definitions", macros.num_custom_macros);
    write_list("names", &macros.macro_prefixes);
    write_flag("parameterized", macros.uses_parameters_in_macros);
    write_flag("redefines builtins", macros.redefines_builtin_commands);
    println!();

    let preamble = &summary.preamble;
    write_heading("Preamble");
    write_field("packages", preamble.num_packages);
    write_list("used", &preamble.used_packages);
    write_field("preamble lines", preamble.preamble_line_count);
    write_flag("comment sections", preamble.has_comment_sections);
    println!();
}

fn write_style(summary: &ProjectSummary) {
    let style = &summary.code_style;
    write_heading("Style");
    write_field("avg line length", format!("{:.2}", style.avg_line_length));
    write_field("longest line", style.longest_line_length);
    if style.indentation_width > 0 {
        write_field(
            "indentation",
            format!("{} ({})", style.indentation_style, style.indentation_width),
        );
    } else {
        write_field("indentation", style.indentation_style);
    }
    write_field("comment ratio", format!("{:.2}", style.comment_ratio));
    write_flag("verna comment blocks", summary.verna_features.has_verna_comment_blocks);
    write_flag("packages alphabetized", summary.verna_features.packages_alphabetized);
    println!();
}

fn write_structure(summary: &ProjectSummary) {
    let structure = &summary.structure_elements;
    let depth = &structure.sectioning_depth;
    write_heading("Structure");
    write_field(
        "sections",
        format!(
            "{} / {} / {}",
            depth.section, depth.subsection, depth.subsubsection
        ),
    );
    write_list("environments", &structure.environments_used);
    write_list("citations", &structure.citation_commands);
    write_flag("labels and refs", structure.uses_labels_and_refs);
    println!();
}
