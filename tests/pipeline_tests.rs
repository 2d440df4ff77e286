use std::fs;

use kmertour::kmertour::{load_kmers, run_kmertour, Args, CliError};
use kmertour::GraphError;

fn args_with_kmers(kmers: &[&str], start: &str) -> Args {
    Args {
        kmers: Some(kmers.iter().map(|s| s.to_string()).collect()),
        input_file: None,
        start: start.to_string(),
        dot: None,
        render: false,
        json: None,
        verbose: false,
    }
}

#[test]
fn test_overlapping_reads_end_to_end() {
    // Eight overlapping 3-mers spelling out AAGATTCTCA
    let args = args_with_kmers(
        &["AAG", "AGA", "GAT", "ATT", "TTC", "TCT", "CTC", "TCA"],
        "AA",
    );
    let report = run_kmertour(args).unwrap();
    assert!(report.valid);
    assert_eq!(report.sequence, "AAGATTCTCA");
    assert_eq!(report.tour.len(), 9);
}

#[test]
fn test_infeasible_graph_reports_invalid_not_error() {
    // "DE" is unreachable from "A"; the attempt still runs to completion
    let args = args_with_kmers(&["AB", "BC", "DE"], "A");
    let report = run_kmertour(args).unwrap();
    assert!(!report.valid);
}

#[test]
fn test_kmers_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kmers.txt");
    fs::write(&path, "  AAG\nAGA\n\nGAT\nATT \nTTC\nTCT\nCTC\nTCA\n").unwrap();

    let kmers = load_kmers(path.to_str().unwrap()).unwrap();
    assert_eq!(kmers.len(), 8);
    assert_eq!(kmers[0], "AAG");

    let mut args = args_with_kmers(&[], "AA");
    args.kmers = None;
    args.input_file = Some(path.to_str().unwrap().to_string());
    let report = run_kmertour(args).unwrap();
    assert!(report.valid);
    assert_eq!(report.sequence, "AAGATTCTCA");
}

#[test]
fn test_missing_input_file_is_io_error() {
    let mut args = args_with_kmers(&[], "AA");
    args.kmers = None;
    args.input_file = Some("/nonexistent/kmers.txt".to_string());
    let err = run_kmertour(args).unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

#[test]
fn test_usage_errors() {
    let mut args = args_with_kmers(&[], "AA");
    args.kmers = None;
    assert!(matches!(
        run_kmertour(args).unwrap_err(),
        CliError::MissingKmerSource
    ));

    let mut args = args_with_kmers(&["AB"], "A");
    args.input_file = Some("also.txt".to_string());
    assert!(matches!(
        run_kmertour(args).unwrap_err(),
        CliError::AmbiguousKmerSource
    ));
}

#[test]
fn test_mixed_length_kmers_rejected() {
    let args = args_with_kmers(&["AAG", "AG"], "AA");
    let err = run_kmertour(args).unwrap_err();
    assert!(matches!(
        err,
        CliError::Graph(GraphError::MixedLength { .. })
    ));
}

#[test]
fn test_dot_output_written() {
    let dir = tempfile::tempdir().unwrap();
    let dot_path = dir.path().join("graph.dot");

    let mut args = args_with_kmers(&["AB", "BC", "BC", "CA"], "A");
    args.dot = Some(dot_path.to_str().unwrap().to_string());
    let report = run_kmertour(args).unwrap();
    assert!(report.valid);

    let contents = fs::read_to_string(&dot_path).unwrap();
    assert!(contents.contains("digraph debruijn"));
    assert_eq!(contents.matches("\"B\" -> \"C\";").count(), 2);
}

#[test]
fn test_json_report_written() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");

    let mut args = args_with_kmers(&["AA"], "A");
    args.json = Some(json_path.to_str().unwrap().to_string());
    let report = run_kmertour(args).unwrap();
    assert!(report.valid);

    let contents = fs::read_to_string(&json_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["start"], "A");
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["sequence"], "AA");
    assert_eq!(parsed["tour"], serde_json::json!(["A", "A"]));
}
