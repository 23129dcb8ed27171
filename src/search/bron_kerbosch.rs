//! Maximal clique enumeration.
//!
//! Bron–Kerbosch with Tomita pivoting: at every level the candidate set `P` is
//! only branched on for nodes outside the neighbourhood of a pivot `u ∈ P ∪ X`
//! maximising `|P ∩ N(u)|`. All sets are sorted vectors of [`LocalIndex`], so
//! intersections and differences are linear merges.

use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};
use tracing::{debug, instrument};

use crate::{
    graph::{NodeId, Undirected},
    local_index::{Compaction, LocalIndex, LocalVec},
};

fn intersection(a: &[LocalIndex], b: &[LocalIndex]) -> Vec<LocalIndex> {
    a.iter()
        .merge_join_by(b, |x, y| x.cmp(y))
        .filter_map(|m| match m {
            EitherOrBoth::Both(&x, _) => Some(x),
            _ => None,
        })
        .collect()
}

fn intersection_len(a: &[LocalIndex], b: &[LocalIndex]) -> usize {
    a.iter()
        .merge_join_by(b, |x, y| x.cmp(y))
        .filter(|m| matches!(m, EitherOrBoth::Both(..)))
        .count()
}

fn difference(a: &[LocalIndex], b: &[LocalIndex]) -> Vec<LocalIndex> {
    a.iter()
        .merge_join_by(b, |x, y| x.cmp(y))
        .filter_map(|m| match m {
            EitherOrBoth::Left(&x) => Some(x),
            _ => None,
        })
        .collect()
}

fn insert_sorted(set: &mut Vec<LocalIndex>, v: LocalIndex) {
    if let Err(at) = set.binary_search(&v) {
        set.insert(at, v);
    }
}

struct CliqueSearch<'a> {
    adjacency: &'a LocalVec<Vec<LocalIndex>>,
    clique: Vec<LocalIndex>,
    found: Vec<Vec<LocalIndex>>,
}

impl CliqueSearch<'_> {
    fn pivot(&self, candidates: &[LocalIndex], excluded: &[LocalIndex]) -> Option<LocalIndex> {
        candidates
            .iter()
            .chain(excluded)
            .copied()
            .max_by(|&u, &v| {
                let score = |w: LocalIndex| intersection_len(candidates, &self.adjacency[w]);
                match score(u).cmp(&score(v)) {
                    // ties go to the lower index
                    Ordering::Equal => v.cmp(&u),
                    other => other,
                }
            })
    }

    fn expand(&mut self, mut candidates: Vec<LocalIndex>, mut excluded: Vec<LocalIndex>) {
        let Some(pivot) = self.pivot(&candidates, &excluded) else {
            self.found.push(self.clique.clone());
            return;
        };

        let adjacency = self.adjacency;
        for v in difference(&candidates, &adjacency[pivot]) {
            let neighbours = &adjacency[v];
            self.clique.push(v);
            self.expand(
                intersection(&candidates, neighbours),
                intersection(&excluded, neighbours),
            );
            self.clique.pop();

            if let Ok(at) = candidates.binary_search(&v) {
                candidates.remove(at);
            }
            insert_sorted(&mut excluded, v);
        }
    }
}

/// All maximal cliques of an undirected graph.
///
/// Every node, isolated ones included, is in at least one returned clique.
/// Self-loops are ignored. Neither the order of the cliques nor the order of
/// nodes within a clique is specified.
///
/// ```
/// use trellis::{concrete::UndirectedGraph, graph::{Edge, NodeId}, search::bron_kerbosch};
///
/// let mut g = UndirectedGraph::default();
/// for (u, v) in [(0, 1), (1, 2), (2, 0), (2, 3)] {
///     g.add_undirected_edge(Edge::new(u, v), 1.);
/// }
///
/// let mut cliques: Vec<Vec<NodeId>> = bron_kerbosch(&g)
///     .into_iter()
///     .map(|mut c| {
///         c.sort();
///         c
///     })
///     .collect();
/// cliques.sort();
/// assert_eq!(
///     cliques,
///     vec![vec![NodeId(0), NodeId(1), NodeId(2)], vec![NodeId(2), NodeId(3)]]
/// );
/// ```
#[instrument(level = "debug", skip_all)]
pub fn bron_kerbosch<G: Undirected>(graph: &G) -> Vec<Vec<NodeId>> {
    let nodes = Compaction::of(graph);
    if nodes.is_empty() {
        return Vec::new();
    }
    let adjacency = nodes.adjacency(|n| graph.neighbors(n));

    let mut search = CliqueSearch {
        adjacency: &adjacency,
        clique: Vec::new(),
        found: Vec::new(),
    };
    search.expand(nodes.indices().collect(), Vec::new());

    debug!(cliques = search.found.len(), "enumerated");
    search
        .found
        .into_iter()
        .map(|clique| nodes.nodes(clique))
        .collect()
}
