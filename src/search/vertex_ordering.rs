//! Degeneracy ordering and k-core decomposition.
//!
//! A k-core is a maximal subgraph in which every node has degree at least `k`.
//! The core number of a node is the largest `k` for which it belongs to the
//! k-core, and the degeneracy of a graph is the largest core number.
//!
//! The decomposition peels the graph: it repeatedly removes a node of minimum
//! remaining degree (Matula & Beck, Batagelj & Zaversnik). Remaining degrees are
//! kept in a bucket queue, so the whole run is `O(V + E)`.

use ahash::{HashMap, HashMapExt};
use bitvec::vec::BitVec;
use tracing::{debug, instrument};

use crate::{
    graph::{NodeId, Undirected},
    local_index::{Compaction, LocalIndex, LocalVec},
};

/// Result of [`vertex_ordering`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexOrdering {
    /// Degeneracy ordering: the reverse of the order nodes were peeled in, so
    /// nodes of the innermost core come first.
    pub order: Vec<NodeId>,
    /// `cores[k]` holds the nodes with core number exactly `k`, that is the
    /// k-core minus the (k+1)-core. There is always at least one entry.
    pub cores: Vec<Vec<NodeId>>,
    core_number: HashMap<NodeId, usize>,
}

impl VertexOrdering {
    pub fn degeneracy(&self) -> usize {
        self.cores.len() - 1
    }

    pub fn core_number(&self, node: NodeId) -> Option<usize> {
        self.core_number.get(&node).copied()
    }

    /// Every node of the k-core, in no particular order.
    pub fn k_core(&self, k: usize) -> Vec<NodeId> {
        self.cores.iter().skip(k).flatten().copied().collect()
    }
}

/// Buckets of not yet peeled nodes keyed by remaining degree, with each node's
/// slot in its bucket so it can be moved in constant time.
struct DegreeBuckets {
    buckets: Vec<Vec<LocalIndex>>,
    degree: LocalVec<usize>,
    slot: LocalVec<usize>,
}

impl DegreeBuckets {
    fn new(nodes: &Compaction, adjacency: &LocalVec<Vec<LocalIndex>>) -> Self {
        let degree: LocalVec<usize> = adjacency.iter().map(|(_, succ)| succ.len()).collect();
        let max_degree = degree.iter().map(|(_, &d)| d).max().unwrap_or(0);

        let mut buckets = vec![Vec::new(); max_degree + 1];
        let mut slot = nodes.new_vec(0);
        for (v, &d) in degree.iter() {
            slot[v] = buckets[d].len();
            buckets[d].push(v);
        }

        DegreeBuckets {
            buckets,
            degree,
            slot,
        }
    }

    /// Lowest non-empty bucket at or above `floor`.
    fn lowest_from(&self, floor: usize) -> Option<usize> {
        (floor..self.buckets.len()).find(|&d| !self.buckets[d].is_empty())
    }

    fn pop(&mut self, d: usize) -> Option<LocalIndex> {
        self.buckets[d].pop()
    }

    fn decrement(&mut self, w: LocalIndex) {
        let d = self.degree[w];
        let Some(lower) = d.checked_sub(1) else {
            return;
        };

        let at = self.slot[w];
        self.buckets[d].swap_remove(at);
        if let Some(&moved) = self.buckets[d].get(at) {
            self.slot[moved] = at;
        }

        self.degree[w] = lower;
        self.slot[w] = self.buckets[lower].len();
        self.buckets[lower].push(w);
    }
}

/// Degeneracy ordering and core decomposition of an undirected graph.
///
/// Self-loops do not count towards degree. Ties between nodes of equal degree
/// are broken arbitrarily, which changes `order` within a core but never the
/// cores themselves.
///
/// ```
/// use trellis::{concrete::UndirectedGraph, graph::{Edge, NodeId}, search::vertex_ordering};
///
/// let mut g = UndirectedGraph::default();
/// for (u, v) in [(0, 1), (1, 2), (2, 0), (2, 3)] {
///     g.add_undirected_edge(Edge::new(u, v), 1.);
/// }
///
/// let ordering = vertex_ordering(&g);
/// assert_eq!(ordering.degeneracy(), 2);
/// assert_eq!(ordering.cores[1], vec![NodeId(3)]);
/// assert_eq!(ordering.order.last(), Some(&NodeId(3)));
/// ```
#[instrument(level = "debug", skip_all)]
pub fn vertex_ordering<G: Undirected>(graph: &G) -> VertexOrdering {
    let nodes = Compaction::of(graph);
    let adjacency = nodes.adjacency(|n| graph.neighbors(n));
    let mut buckets = DegreeBuckets::new(&nodes, &adjacency);

    let mut peeled: BitVec = BitVec::repeat(false, nodes.len());
    let mut removal = Vec::with_capacity(nodes.len());
    let mut shell_sizes = vec![0];
    let mut k = 0;
    let mut floor = 0;

    // Removing a node of degree d lowers its neighbours to at least d - 1, so
    // the scan for the next minimum can restart just below it.
    while let Some(d) = buckets.lowest_from(floor) {
        let Some(v) = buckets.pop(d) else {
            break;
        };
        if d > k {
            k = d;
            shell_sizes.resize(k + 1, 0);
        }
        shell_sizes[k] += 1;
        peeled.set(v.0, true);
        removal.push(v);

        for &w in &adjacency[v] {
            if !peeled[w.0] {
                buckets.decrement(w);
            }
        }
        floor = d.saturating_sub(1);
    }

    let mut cores = Vec::with_capacity(shell_sizes.len());
    let mut core_number = HashMap::with_capacity(removal.len());
    let mut peeled_so_far = removal.iter();
    for (k, &size) in shell_sizes.iter().enumerate() {
        let shell = nodes.nodes(peeled_so_far.by_ref().take(size).copied());
        core_number.extend(shell.iter().map(|&n| (n, k)));
        cores.push(shell);
    }

    debug!(degeneracy = k, nodes = removal.len(), "peeled");
    VertexOrdering {
        order: nodes.nodes(removal.into_iter().rev()),
        cores,
        core_number,
    }
}
