use std::collections::HashMap;

use serde::Serialize;

use crate::graph::DeBruijnGraph;

/// Remaining out-edges per node, consumed destructively during a tour.
type Remaining = HashMap<String, Vec<String>>;

/// Outcome of one find-then-verify tour attempt.
#[derive(Debug, Clone, Serialize)]
pub struct TourReport {
    /// Node the traversal started from.
    pub start: String,
    /// True when the tour used every edge of the graph exactly once.
    pub valid: bool,
    /// The node sequence the traversal produced.
    pub tour: Vec<String>,
    /// Sequence reconstructed from the tour by overlapping its nodes.
    pub sequence: String,
}

/// Find a candidate Eulerian tour from `start`.
///
/// Works on a consumable copy of the adjacency lists; the caller's graph
/// is untouched and can be re-enumerated for verification afterwards.
/// The result is only a candidate: on graphs that violate the Eulerian
/// degree conditions the walk dead-ends with edges left over, which
/// [`verify`] reports as an invalid tour.
pub fn find_tour(start: &str, graph: &DeBruijnGraph) -> Vec<String> {
    let mut remaining = graph.consumable_copy();
    splice_tour(start.to_string(), None, &mut remaining)
}

fn pop_edge(remaining: &mut Remaining, node: &str) -> Option<String> {
    // LIFO: take the most recently inserted residual edge.
    remaining.get_mut(node).and_then(Vec::pop)
}

/// Build a sub-tour from `start` that tries to close at `finish`
/// (defaulting to `start` itself), then splice in detours until every
/// node along the growing path has no residual out-edges.
fn splice_tour(start: String, finish: Option<String>, remaining: &mut Remaining) -> Vec<String> {
    let finish_on = finish.unwrap_or_else(|| start.clone());
    let mut path = walk(start, &finish_on, remaining);

    // Cursor over the growing path. Invariant: the cursor always points
    // at the next unexamined element, including elements added by
    // earlier splices, so spliced-in nodes get their residual edges
    // drained too. Splices land after the cursor, which keeps already
    // examined positions at stable indices.
    let mut cursor = 0;
    while cursor < path.len() {
        while let Some(next) = pop_edge(remaining, &path[cursor]) {
            let detour = splice_tour(next, Some(path[cursor].clone()), remaining);
            path.splice(cursor + 1..cursor + 1, detour);
        }
        cursor += 1;
    }
    path
}

/// Simple path: repeatedly consume the last residual edge of the
/// current node, stopping on a dead end or when `finish_on` is reached.
fn walk(start: String, finish_on: &str, remaining: &mut Remaining) -> Vec<String> {
    let mut path = vec![start];
    loop {
        let current = path[path.len() - 1].clone();
        match pop_edge(remaining, &current) {
            Some(next) => {
                let closed = next == finish_on;
                path.push(next);
                if closed {
                    break;
                }
            }
            None => break,
        }
    }
    path
}

/// Replay `tour` against the graph's full edge multiset: every
/// consecutive pair must remove exactly one matching edge instance, and
/// the multiset must be empty afterwards.
pub fn verify(tour: &[String], graph: &DeBruijnGraph) -> bool {
    let mut edges: Vec<(&str, &str)> = graph.edges().collect();
    for pair in tour.windows(2) {
        let (src, dst) = (pair[0].as_str(), pair[1].as_str());
        match edges.iter().position(|&(s, d)| s == src && d == dst) {
            Some(idx) => {
                edges.swap_remove(idx);
            }
            None => return false,
        }
    }
    edges.is_empty()
}

/// Recover the original sequence implied by a tour: the first symbol of
/// every node, then the rest of the final node. For a valid tour over n
/// k-mers of length k this yields n + k − 1 symbols.
pub fn reconstruct(tour: &[String]) -> String {
    let mut sequence: String = tour
        .iter()
        .filter_map(|node| node.chars().next())
        .collect();
    if let Some(last) = tour.last() {
        sequence.extend(last.chars().skip(1));
    }
    sequence
}

/// Find a tour from `start`, verify it against the original graph, and
/// reconstruct the implied sequence.
pub fn check_tour(start: &str, graph: &DeBruijnGraph) -> TourReport {
    let tour = find_tour(start, graph);
    let valid = verify(&tour, graph);
    let sequence = reconstruct(&tour);
    TourReport {
        start: start.to_string(),
        valid,
        tour,
        sequence,
    }
}
