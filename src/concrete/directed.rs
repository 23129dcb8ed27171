use ahash::HashMap;

use super::IdAllocator;
use crate::graph::{Coster, Directed, Edge, EdgeList, Graph, NodeId, WeightedEdge};

/// A mutable directed graph over arbitrary node ids.
///
/// Successors and predecessors are both indexed, so walking either way costs
/// the same. Adding an edge adds its missing endpoints, adding an edge that
/// already exists replaces its cost.
///
/// ```
/// use trellis::{concrete::DirectedGraph, graph::{Coster, Directed, Edge, Graph}};
///
/// let mut g = DirectedGraph::new();
/// let a = g.new_node();
/// let b = g.new_node();
/// g.add_directed_edge(Edge::new(a, b), 2.5);
///
/// assert_eq!(g.cost(&Edge::new(a, b)), 2.5);
/// assert_eq!(g.predecessors(b).collect::<Vec<_>>(), vec![a]);
/// assert!(g.edge_from_to(b, a).is_none());
/// assert_eq!(g.degree(a), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DirectedGraph {
    successors: HashMap<NodeId, HashMap<NodeId, WeightedEdge>>,
    predecessors: HashMap<NodeId, HashMap<NodeId, WeightedEdge>>,
    ids: IdAllocator,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` without edges. Adding a node twice keeps its edges.
    pub fn add_node(&mut self, node: NodeId) {
        self.successors.entry(node).or_default();
        self.predecessors.entry(node).or_default();
        self.ids.add(node);
    }

    /// Adds a node with an id not currently in the graph and returns it.
    pub fn new_node(&mut self) -> NodeId {
        let node = self.ids.allocate(|n| self.has(n));
        self.add_node(node);
        node
    }

    pub fn add_directed_edge(&mut self, edge: Edge, cost: f64) {
        self.add_node(edge.from);
        self.add_node(edge.to);

        let weighted = WeightedEdge { edge, cost };
        self.successors
            .entry(edge.from)
            .or_default()
            .insert(edge.to, weighted);
        self.predecessors
            .entry(edge.to)
            .or_default()
            .insert(edge.from, weighted);
    }

    /// Removes `node` and every edge touching it. Returns whether it was present.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(heads) = self.successors.remove(&node) else {
            return false;
        };
        for head in heads.keys() {
            if let Some(tails) = self.predecessors.get_mut(head) {
                tails.remove(&node);
            }
        }
        if let Some(tails) = self.predecessors.remove(&node) {
            for tail in tails.keys() {
                if let Some(heads) = self.successors.get_mut(tail) {
                    heads.remove(&node);
                }
            }
        }

        self.ids.release(node);
        true
    }

    /// Removes the edge `edge.from -> edge.to` and returns its cost.
    pub fn remove_directed_edge(&mut self, edge: Edge) -> Option<f64> {
        let removed = self.successors.get_mut(&edge.from)?.remove(&edge.to)?;
        if let Some(tails) = self.predecessors.get_mut(&edge.to) {
            tails.remove(&edge.from);
        }
        Some(removed.cost)
    }

    /// In-degree plus out-degree. A self-loop counts twice.
    pub fn degree(&self, node: NodeId) -> usize {
        let out = self.successors.get(&node).map_or(0, HashMap::len);
        let into = self.predecessors.get(&node).map_or(0, HashMap::len);
        out + into
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(HashMap::len).sum()
    }

    /// Removes every node and edge. Ids are handed out from zero again.
    pub fn clear(&mut self) {
        self.successors.clear();
        self.predecessors.clear();
        self.ids = IdAllocator::default();
    }
}

impl Graph for DirectedGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.successors.keys().copied()
    }

    fn has(&self, node: NodeId) -> bool {
        self.successors.contains_key(&node)
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors
            .get(&node)
            .into_iter()
            .flat_map(|heads| heads.keys().copied())
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        self.successors.get(&from)?.get(&to).map(|w| w.edge)
    }

    fn node_count(&self) -> usize {
        self.successors.len()
    }
}

impl Directed for DirectedGraph {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.predecessors
            .get(&node)
            .into_iter()
            .flat_map(|tails| tails.keys().copied())
    }
}

impl Coster for DirectedGraph {
    fn cost(&self, edge: &Edge) -> f64 {
        self.successors
            .get(&edge.from)
            .and_then(|heads| heads.get(&edge.to))
            .map_or(f64::INFINITY, |w| w.cost)
    }
}

impl EdgeList for DirectedGraph {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.successors
            .values()
            .flat_map(|heads| heads.values().map(|w| w.edge))
    }
}
