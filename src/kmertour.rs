use std::fs::{self, File};
use std::io;

use clap::Parser;
use thiserror::Error;

use crate::dot_writer;
use crate::graph::{DeBruijnGraph, GraphError};
use crate::tour::{check_tour, TourReport};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kmertour",
    version,
    about = "Build a De Bruijn graph from k-mers and check for Eulerian tours"
)]
pub struct Args {
    /// K-mers to build the graph from, given directly on the command line
    #[arg(long, num_args = 1.., value_name = "KMER")]
    pub kmers: Option<Vec<String>>,

    /// Path to a file containing k-mers, one per line
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<String>,

    /// Node to start the traversal from
    #[arg(long, default_value = "AG")]
    pub start: String,

    /// Write the graph in Graphviz DOT format to this path
    #[arg(long, value_name = "PATH")]
    pub dot: Option<String>,

    /// Render the DOT output to PNG with graphviz and open the image
    #[arg(long, requires = "dot")]
    pub render: bool,

    /// Write the tour report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("provide k-mers either with --kmers or with --input-file")]
    MissingKmerSource,

    #[error("--kmers and --input-file are mutually exclusive; provide exactly one")]
    AmbiguousKmerSource,

    #[error("failed to read k-mers: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rendering failed: {0}")]
    Render(String),
}

/// Load k-mers from a file, one per line. Lines are trimmed of
/// surrounding whitespace and blank lines are skipped.
pub fn load_kmers(path: &str) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn gather_kmers(args: &Args) -> Result<Vec<String>, CliError> {
    match (&args.kmers, &args.input_file) {
        (Some(_), Some(_)) => Err(CliError::AmbiguousKmerSource),
        (Some(kmers), None) => Ok(kmers.clone()),
        (None, Some(path)) => Ok(load_kmers(path)?),
        (None, None) => Err(CliError::MissingKmerSource),
    }
}

/// Full pipeline: load k-mers, build the graph, optionally visualize,
/// then attempt and verify an Eulerian tour from the requested start.
/// Infeasible graphs are not an error: the attempt is always made and
/// the report comes back with `valid == false`.
pub fn run_kmertour(args: Args) -> Result<TourReport, CliError> {
    let kmers = gather_kmers(&args)?;
    let graph = DeBruijnGraph::build(&kmers)?;

    if args.verbose {
        eprintln!(
            "[kmertour] built graph with {} nodes and {} edges from {} k-mers",
            graph.node_count(),
            graph.edge_count(),
            kmers.len()
        );
        let imbalances = graph.degree_imbalances();
        if !imbalances.is_empty() {
            let summary: Vec<String> = imbalances
                .iter()
                .map(|(node, diff)| format!("{}:{:+}", node, diff))
                .collect();
            eprintln!(
                "[kmertour] degree imbalances (out - in): {}",
                summary.join(" ")
            );
        }
    }

    if let Some(dot_path) = &args.dot {
        dot_writer::write_dot(&graph, dot_path, args.verbose)?;
        if args.render {
            dot_writer::render_png(dot_path, args.verbose).map_err(CliError::Render)?;
        }
    }

    let report = check_tour(&args.start, &graph);

    println!(
        "Eulerian tour starting from '{}': {}",
        report.start,
        report.tour.join(" -> ")
    );
    println!("Tour valid: {}", report.valid);
    println!("Reconstructed sequence: {}", report.sequence);

    if let Some(json_path) = &args.json {
        let file = File::create(json_path)?;
        serde_json::to_writer_pretty(file, &report)?;
    }

    Ok(report)
}
