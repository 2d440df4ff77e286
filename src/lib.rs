pub mod dot_writer;
pub mod graph;
pub mod kmertour;
pub mod tour;

pub use graph::{DeBruijnGraph, GraphError};
pub use kmertour::{load_kmers, run_kmertour, Args, CliError};
pub use tour::{check_tour, find_tour, reconstruct, verify, TourReport};
