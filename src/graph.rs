//! # Graph Capabilities
//!
//! The algorithms in [`crate::search`] never look at how a graph is stored. They
//! only ask it questions, and each kind of question is a trait:
//!
//! - [`Graph`]: node enumeration, existence, traversal in the direction the graph
//!   allows, and edge lookup between two nodes.
//! - [`Directed`]: reverse adjacency, for graphs whose edges have an orientation.
//! - [`Undirected`]: neighbourhoods, for graphs whose edges have none.
//! - [`Coster`]: the cost of an edge.
//! - [`EdgeList`]: enumeration of every edge.
//!
//! Every algorithm is generic over the smallest set of these it needs, so any
//! storage layout (see [`crate::concrete`] for a few) can be searched as long as
//! it answers the questions consistently for the duration of one call.
//!
//! A graph is either directed or undirected, never both. Nothing enforces this,
//! implementing both traits on the same type gives unspecified results.

use derive_more::{Display, From, Into};

/// Stable integer identity of a node.
///
/// Ids are only compared and hashed. They need not be contiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// An ordered (head, tail) pair. Undirected graphs hand back whichever
/// orientation they stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn reversed(self) -> Self {
        Edge {
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// An edge together with its cost, as stored by the concrete graphs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEdge {
    pub edge: Edge,
    pub cost: f64,
}

/// The minimal read interface every algorithm relies on.
pub trait Graph {
    /// All nodes currently in the graph, in no particular order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;

    fn has(&self, node: NodeId) -> bool;

    /// Nodes reachable over a single edge leaving `node`.
    ///
    /// For directed graphs these are the heads of outgoing edges, for undirected
    /// graphs the neighbours. A node the graph does not have has no successors.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// The edge that can be traversed from `from` to `to`, if any.
    ///
    /// Directed graphs must honour orientation here, undirected graphs must not.
    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge>;

    fn node_count(&self) -> usize {
        self.nodes().count()
    }
}

/// A graph whose edges have an orientation.
pub trait Directed: Graph {
    /// Nodes with an edge pointing at `node`.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// An edge joining `u` and `v` in either orientation.
    fn edge_between(&self, u: NodeId, v: NodeId) -> Option<Edge> {
        self.edge_from_to(u, v).or_else(|| self.edge_from_to(v, u))
    }
}

/// A graph whose edges have no orientation.
pub trait Undirected: Graph {
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors(node)
    }

    fn edge_between(&self, u: NodeId, v: NodeId) -> Option<Edge> {
        self.edge_from_to(u, v)
    }
}

/// Edge costs for weighted search.
pub trait Coster: Graph {
    /// The cost of traversing `edge`, `f64::INFINITY` when the graph has no such
    /// edge. Shortest path searches require costs to be non-negative.
    fn cost(&self, edge: &Edge) -> f64;
}

/// Enumeration of every edge of a graph.
///
/// Undirected graphs list each edge once, in the orientation they stored.
pub trait EdgeList: Graph {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;
}

/// Presents any graph as a weighted one where every existing edge costs `1`.
///
/// ```
/// use trellis::{concrete::DirectedGraph, graph::{Coster, Edge, UniformCost}};
///
/// let mut g = DirectedGraph::new();
/// g.add_directed_edge(Edge::new(0, 1), 12.5);
///
/// assert_eq!(UniformCost(&g).cost(&Edge::new(0, 1)), 1.0);
/// assert_eq!(UniformCost(&g).cost(&Edge::new(1, 0)), f64::INFINITY);
/// ```
#[derive(Debug)]
pub struct UniformCost<'a, G>(pub &'a G);

impl<G> Clone for UniformCost<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for UniformCost<'_, G> {}

impl<G: Graph> Graph for UniformCost<'_, G> {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.nodes()
    }

    fn has(&self, node: NodeId) -> bool {
        self.0.has(node)
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.0.successors(node)
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        self.0.edge_from_to(from, to)
    }

    fn node_count(&self) -> usize {
        self.0.node_count()
    }
}

impl<G: Directed> Directed for UniformCost<'_, G> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.0.predecessors(node)
    }
}

impl<G: Undirected> Undirected for UniformCost<'_, G> {}

impl<G: EdgeList> EdgeList for UniformCost<'_, G> {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.0.edges()
    }
}

impl<G: Graph> Coster for UniformCost<'_, G> {
    fn cost(&self, edge: &Edge) -> f64 {
        if self.0.edge_from_to(edge.from, edge.to).is_some() {
            1.0
        } else {
            f64::INFINITY
        }
    }
}
