use ahash::HashMap;

use super::IdAllocator;
use crate::graph::{Coster, Edge, EdgeList, Graph, NodeId, Undirected, WeightedEdge};

/// A mutable undirected graph over arbitrary node ids.
///
/// Each edge is stored once per endpoint, in the orientation it was added in.
/// The cost reported for an absent edge is chosen at construction and defaults
/// to `f64::INFINITY`, the only value the search algorithms understand.
///
/// ```
/// use trellis::{concrete::UndirectedGraph, graph::{Edge, EdgeList, Graph, NodeId}};
///
/// let mut g = UndirectedGraph::default();
/// g.add_undirected_edge(Edge::new(3, 1), 1.);
///
/// assert_eq!(g.edge_from_to(NodeId(1), NodeId(3)), Some(Edge::new(3, 1)));
/// assert_eq!(g.edges().count(), 1);
/// assert_eq!(g.remove_undirected_edge(Edge::new(1, 3)), Some(1.));
/// assert!(g.edge_from_to(NodeId(3), NodeId(1)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct UndirectedGraph {
    neighbours: HashMap<NodeId, HashMap<NodeId, WeightedEdge>>,
    absent: f64,
    ids: IdAllocator,
}

impl Default for UndirectedGraph {
    fn default() -> Self {
        UndirectedGraph::new(f64::INFINITY)
    }
}

impl UndirectedGraph {
    pub fn new(absent: f64) -> Self {
        UndirectedGraph {
            neighbours: HashMap::default(),
            absent,
            ids: IdAllocator::default(),
        }
    }

    /// Adds `node` without edges. Adding a node twice keeps its edges.
    pub fn add_node(&mut self, node: NodeId) {
        self.neighbours.entry(node).or_default();
        self.ids.add(node);
    }

    /// Adds a node with an id not currently in the graph and returns it.
    pub fn new_node(&mut self) -> NodeId {
        let node = self.ids.allocate(|n| self.has(n));
        self.add_node(node);
        node
    }

    /// Adds or re-costs the edge joining `edge.from` and `edge.to`, adding
    /// missing endpoints.
    pub fn add_undirected_edge(&mut self, edge: Edge, cost: f64) {
        self.add_node(edge.from);
        self.add_node(edge.to);

        let weighted = WeightedEdge { edge, cost };
        for (u, v) in [(edge.from, edge.to), (edge.to, edge.from)] {
            self.neighbours.entry(u).or_default().insert(v, weighted);
        }
    }

    /// Removes `node` and every edge touching it. Returns whether it was present.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(neighbours) = self.neighbours.remove(&node) else {
            return false;
        };
        for neighbour in neighbours.keys() {
            if let Some(back) = self.neighbours.get_mut(neighbour) {
                back.remove(&node);
            }
        }

        self.ids.release(node);
        true
    }

    /// Removes the edge joining `edge.from` and `edge.to`, in whichever
    /// orientation it was added, and returns its cost.
    pub fn remove_undirected_edge(&mut self, edge: Edge) -> Option<f64> {
        let removed = self.neighbours.get_mut(&edge.from)?.remove(&edge.to)?;
        if let Some(back) = self.neighbours.get_mut(&edge.to) {
            back.remove(&edge.from);
        }
        Some(removed.cost)
    }

    /// Number of incident edges. A self-loop counts twice.
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbours.get(&node).map_or(0, |neighbours| {
            neighbours.len() + usize::from(neighbours.contains_key(&node))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Removes every node and edge, keeping the cost reported for absent edges.
    pub fn clear(&mut self) {
        self.neighbours.clear();
        self.ids = IdAllocator::default();
    }
}

impl Graph for UndirectedGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours.keys().copied()
    }

    fn has(&self, node: NodeId) -> bool {
        self.neighbours.contains_key(&node)
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours
            .get(&node)
            .into_iter()
            .flat_map(|neighbours| neighbours.keys().copied())
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        self.neighbours.get(&from)?.get(&to).map(|w| w.edge)
    }

    fn node_count(&self) -> usize {
        self.neighbours.len()
    }
}

impl Undirected for UndirectedGraph {}

impl Coster for UndirectedGraph {
    fn cost(&self, edge: &Edge) -> f64 {
        self.neighbours
            .get(&edge.from)
            .and_then(|neighbours| neighbours.get(&edge.to))
            .map_or(self.absent, |w| w.cost)
    }
}

impl EdgeList for UndirectedGraph {
    /// Each edge once, in the orientation it was added in.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.neighbours.iter().flat_map(|(&u, neighbours)| {
            neighbours
                .iter()
                .filter(move |&(&v, _)| u <= v)
                .map(|(_, w)| w.edge)
        })
    }
}
