use std::collections::HashMap;
use thiserror::Error;

/// Errors produced while building a De Bruijn graph from k-mers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("k-mer '{kmer}' is too short: need at least 2 symbols to split into head and tail")]
    KmerTooShort { kmer: String },

    #[error("k-mer '{kmer}' has length {len} but earlier k-mers have length {expected}")]
    MixedLength {
        kmer: String,
        len: usize,
        expected: usize,
    },
}

/// De Bruijn graph stored as an adjacency multimap from (k-1)-mer to
/// (k-1)-mer. Each entry in a node's target list is one directed edge,
/// so duplicate k-mers yield parallel edges rather than being merged.
///
/// Keys are also kept in first-insertion order so that edge enumeration
/// and the consuming traversal are deterministic given the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeBruijnGraph {
    adjacency: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl DeBruijnGraph {
    /// Build the graph from an ordered sequence of k-mers.
    ///
    /// Every k-mer of length L contributes one edge from its first L-1
    /// symbols to its last L-1 symbols. All k-mers must share the same
    /// length, and that length must be at least 2; splitting happens on
    /// `char` boundaries so non-ASCII alphabets work.
    pub fn build<S: AsRef<str>>(kmers: &[S]) -> Result<Self, GraphError> {
        let mut graph = DeBruijnGraph::default();
        let mut expected_len: Option<usize> = None;

        for kmer in kmers {
            let kmer = kmer.as_ref();
            let len = kmer.chars().count();
            if len < 2 {
                return Err(GraphError::KmerTooShort {
                    kmer: kmer.to_string(),
                });
            }
            match expected_len {
                Some(expected) if expected != len => {
                    return Err(GraphError::MixedLength {
                        kmer: kmer.to_string(),
                        len,
                        expected,
                    });
                }
                Some(_) => {}
                None => expected_len = Some(len),
            }

            // Split on char boundaries: head drops the last symbol,
            // tail drops the first.
            let last_start = kmer
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            let first_len = kmer.chars().next().map(|c| c.len_utf8()).unwrap_or(0);
            let head = kmer[..last_start].to_string();
            let tail = kmer[first_len..].to_string();
            graph.push_edge(head, tail);
        }

        Ok(graph)
    }

    fn push_edge(&mut self, head: String, tail: String) {
        if !self.adjacency.contains_key(&head) {
            self.order.push(head.clone());
        }
        self.adjacency.entry(head).or_insert_with(Vec::new).push(tail);
    }

    /// Iterate all directed edges as (source, target) pairs.
    ///
    /// Keys come out in insertion order and each key's targets in their
    /// stored order, with exact multiplicities. The iterator is computed
    /// fresh from the multimap on every call, so it is unaffected by any
    /// traversal that worked on a consumable copy.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().flat_map(move |src| {
            self.adjacency[src]
                .iter()
                .map(move |dst| (src.as_str(), dst.as_str()))
        })
    }

    /// Iterate the distinct source nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Targets recorded for one node, in insertion order.
    pub fn targets(&self, node: &str) -> Option<&[String]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Owned copy of the adjacency lists for destructive traversal.
    /// The traversal pops edges from this copy; the graph itself stays
    /// intact so verification can re-enumerate the original edges.
    pub fn consumable_copy(&self) -> HashMap<String, Vec<String>> {
        self.adjacency.clone()
    }

    /// Nodes whose out-degree differs from their in-degree, with the
    /// (out − in) difference, in first-seen order. An Eulerian cycle
    /// needs this list empty; a trail needs exactly one +1 and one −1.
    /// Diagnostic only: the traversal is always attempted regardless.
    pub fn degree_imbalances(&self) -> Vec<(String, i64)> {
        let mut balance: HashMap<&str, i64> = HashMap::new();
        let mut seen: Vec<&str> = Vec::new();

        for (src, dst) in self.edges() {
            if !balance.contains_key(src) {
                seen.push(src);
            }
            *balance.entry(src).or_insert(0) += 1;
            if !balance.contains_key(dst) {
                seen.push(dst);
            }
            *balance.entry(dst).or_insert(0) -= 1;
        }

        seen.into_iter()
            .filter_map(|node| {
                let diff = balance[node];
                (diff != 0).then(|| (node.to_string(), diff))
            })
            .collect()
    }
}
