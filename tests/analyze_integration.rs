//! Integration tests for the full analysis pipeline.
//!
//! These tests run the analyzer against the `testdata/thesis` fixture, a
//! small multi-file thesis with chapters, an appendix and build files.

use std::path::PathBuf;

use texprofile::detect::{FileRole, IndentationStyle};
use texprofile::{analyze_project, AnalyzeError, Analyzer, Config, ProjectSummary};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("thesis")
}

fn analyze_fixture() -> ProjectSummary {
    analyze_project(fixture_path()).expect("fixture should analyze")
}

#[test]
fn test_files_and_structure() {
    let summary = analyze_fixture();
    let files = &summary.files_and_structure;

    assert_eq!(summary.project_id, "thesis");
    assert_eq!(files.num_tex_files, 4);
    // Discovery order is by file name at every level
    assert_eq!(
        files.tex_files,
        vec![
            "appendix/appendix_a.tex",
            "chapters/introduction.tex",
            "chapters/methods.tex",
            "thesis.tex",
        ]
    );
    assert_eq!(files.folders, vec![".", "appendix", "chapters"]);
    assert_eq!(files.num_folders, 3);
    assert!(files.uses_input_include);
    assert!(files.has_makefile);
    assert!(files.has_readme);
    assert_eq!(files.total_line_count, 40);
    assert_eq!(files.total_character_count, 913);
    assert_eq!(files.modularity_score, 4 + 3 + 2);

    assert_eq!(files.file_roles.get(&FileRole::Appendix), Some(&1));
    assert_eq!(files.file_roles.get(&FileRole::Introduction), Some(&1));
    assert_eq!(files.file_roles.get(&FileRole::Methods), Some(&1));
    assert_eq!(files.file_roles.get(&FileRole::Main), Some(&1));
    assert_eq!(files.file_roles.values().sum::<usize>(), files.num_tex_files);
}

#[test]
fn test_macros_and_preamble() {
    let summary = analyze_fixture();

    assert_eq!(summary.macros.num_custom_macros, 2);
    assert_eq!(summary.macros.macro_prefixes, vec!["R", "norm"]);
    assert!(summary.macros.uses_parameters_in_macros);
    assert!(!summary.macros.redefines_builtin_commands);

    assert_eq!(
        summary.preamble.used_packages,
        vec!["amsmath", "graphicx", "hyperref", "inputenc"]
    );
    assert_eq!(summary.preamble.num_packages, 4);
    // thesis.tex is the first discovered file with a body marker
    assert_eq!(summary.preamble.preamble_line_count, 9);
    assert!(summary.preamble.has_comment_sections);
}

#[test]
fn test_code_style() {
    let summary = analyze_fixture();
    let style = &summary.code_style;

    assert_eq!(style.longest_line_length, 53);
    assert!((style.avg_line_length - 913.0 / 40.0).abs() < 0.011);
    // The appendix uses two spaces, methods four, the introduction tabs
    assert_eq!(style.indentation_style, IndentationStyle::Spaces);
    assert_eq!(style.indentation_width, 2);
    assert!((style.comment_ratio - 0.10).abs() < 1e-9);
}

#[test]
fn test_structure_elements() {
    let summary = analyze_fixture();
    let structure = &summary.structure_elements;

    assert_eq!(structure.sectioning_depth.section, 3);
    assert_eq!(structure.sectioning_depth.subsection, 2);
    assert_eq!(structure.sectioning_depth.subsubsection, 1);
    assert_eq!(
        structure.environments_used,
        vec!["document", "equation", "itemize", "table"]
    );
    assert!(structure.uses_labels_and_refs);
    // Only the first citation command on a line is recorded, so the
    // `\citep` following `\cite` in the introduction is not counted
    assert_eq!(structure.citation_commands, vec!["cite", "citet"]);
}

#[test]
fn test_verna_features_and_tree() {
    let summary = analyze_fixture();

    assert!(summary.verna_features.has_verna_comment_blocks);
    // `\usepackage{amsmath}` precedes `\usepackage[utf8]{inputenc}`
    assert!(!summary.verna_features.packages_alphabetized);

    let keys: Vec<&str> = summary.folder_tree.keys().collect();
    assert_eq!(keys, vec!["appendix", "chapters", "figures"]);
    assert!(summary.folder_tree.get("figures").unwrap().is_empty());
}

#[test]
fn test_idempotent() {
    let first = serde_json::to_string(&analyze_fixture()).unwrap();
    let second = serde_json::to_string(&analyze_fixture()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sorted_set_invariants() {
    let summary = analyze_fixture();

    let sets = [
        &summary.preamble.used_packages,
        &summary.macros.macro_prefixes,
        &summary.structure_elements.environments_used,
        &summary.structure_elements.citation_commands,
        &summary.files_and_structure.folders,
    ];
    for set in sets {
        assert!(
            set.windows(2).all(|w| w[0] < w[1]),
            "not strictly sorted: {:?}",
            set
        );
    }

    assert_eq!(
        summary.preamble.num_packages,
        summary.preamble.used_packages.len()
    );
    assert_eq!(
        summary.files_and_structure.num_folders,
        summary.files_and_structure.folders.len()
    );
    assert!((0.0..=1.0).contains(&summary.code_style.comment_ratio));
}

#[test]
fn test_excluding_appendix() {
    let config = Config {
        excluded_paths: vec!["appendix".to_string()],
        ..Default::default()
    };
    let summary = Analyzer::new(config)
        .unwrap()
        .analyze(fixture_path())
        .unwrap();

    assert_eq!(summary.files_and_structure.num_tex_files, 3);
    assert!(summary.folder_tree.get("appendix").is_none());
    // Only methods.tex (four spaces) is space-indented now
    assert_eq!(summary.code_style.indentation_width, 4);
    assert!(!summary
        .structure_elements
        .environments_used
        .contains(&"table".to_string()));
}

#[test]
fn test_missing_project_fails() {
    let err = analyze_project(fixture_path().join("missing")).unwrap_err();
    assert!(matches!(err, AnalyzeError::NotFound(_)));
    assert!(err.to_string().contains("not found"));
}
