//! Adjacency matrix graphs over the node ids `0..n`.

use crate::graph::{Coster, Directed, Edge, EdgeList, Graph, NodeId, Undirected};

/// `a` and `b` are equal, or both NaN.
fn is_same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// A directed graph stored as an `n × n` cost matrix.
///
/// A matrix entry equal to the `absent` value means no edge, which lets `NaN`
/// or `0` mark missing edges when `f64::INFINITY` is a meaningful cost. Costs
/// are still reported as `f64::INFINITY` for absent edges.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectedDenseGraph {
    n: usize,
    absent: f64,
    costs: Vec<f64>,
}

impl DirectedDenseGraph {
    /// `n` nodes, all pairs joined with unit cost when `passable`, none joined
    /// otherwise. Self-loops included.
    pub fn new(n: usize, passable: bool, absent: f64) -> Self {
        let fill = if passable { 1. } else { absent };
        DirectedDenseGraph {
            n,
            absent,
            costs: vec![fill; n * n],
        }
    }

    fn at(&self, from: NodeId, to: NodeId) -> Option<f64> {
        (self.has(from) && self.has(to)).then(|| self.costs[from.0 * self.n + to.0])
    }

    /// # Panics
    ///
    /// If either endpoint is not below `n`.
    pub fn set_edge_cost(&mut self, edge: Edge, cost: f64) {
        assert!(self.has(edge.from) && self.has(edge.to), "{edge:?} outside of 0..{}", self.n);
        self.costs[edge.from.0 * self.n + edge.to.0] = cost;
    }

    /// # Panics
    ///
    /// If either endpoint is not below `n`.
    pub fn remove_edge(&mut self, edge: Edge) {
        self.set_edge_cost(edge, self.absent);
    }
}

impl Graph for DirectedDenseGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.n).map(NodeId)
    }

    fn has(&self, node: NodeId) -> bool {
        node.0 < self.n
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(move |&to| self.edge_from_to(node, to).is_some())
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        let cost = self.at(from, to)?;
        (!is_same(cost, self.absent)).then_some(Edge { from, to })
    }

    fn node_count(&self) -> usize {
        self.n
    }
}

impl Directed for DirectedDenseGraph {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(move |&from| self.edge_from_to(from, node).is_some())
    }
}

impl Coster for DirectedDenseGraph {
    fn cost(&self, edge: &Edge) -> f64 {
        match self.edge_from_to(edge.from, edge.to) {
            Some(_) => self.costs[edge.from.0 * self.n + edge.to.0],
            None => f64::INFINITY,
        }
    }
}

impl EdgeList for DirectedDenseGraph {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes()
            .flat_map(move |from| self.successors(from).map(move |to| Edge { from, to }))
    }
}

/// An undirected graph stored as a symmetric `n × n` cost matrix, with
/// `f64::INFINITY` marking absent edges.
#[derive(Clone, Debug, PartialEq)]
pub struct UndirectedDenseGraph {
    n: usize,
    costs: Vec<f64>,
}

impl UndirectedDenseGraph {
    /// `n` nodes, all pairs joined with unit cost when `passable`, none joined
    /// otherwise. Self-loops included.
    pub fn new(n: usize, passable: bool) -> Self {
        let fill = if passable { 1. } else { f64::INFINITY };
        UndirectedDenseGraph {
            n,
            costs: vec![fill; n * n],
        }
    }

    /// Sets the cost both ways. A cost of `f64::INFINITY` removes the edge.
    ///
    /// # Panics
    ///
    /// If either endpoint is not below `n`.
    pub fn set_edge_cost(&mut self, edge: Edge, cost: f64) {
        assert!(self.has(edge.from) && self.has(edge.to), "{edge:?} outside of 0..{}", self.n);
        self.costs[edge.from.0 * self.n + edge.to.0] = cost;
        self.costs[edge.to.0 * self.n + edge.from.0] = cost;
    }

    /// # Panics
    ///
    /// If either endpoint is not below `n`.
    pub fn remove_edge(&mut self, edge: Edge) {
        self.set_edge_cost(edge, f64::INFINITY);
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.successors(node).count()
    }
}

impl Graph for UndirectedDenseGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.n).map(NodeId)
    }

    fn has(&self, node: NodeId) -> bool {
        node.0 < self.n
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(move |&to| self.edge_from_to(node, to).is_some())
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        let joined = self.has(from) && self.has(to) && self.costs[from.0 * self.n + to.0] != f64::INFINITY;
        joined.then_some(Edge { from, to })
    }

    fn node_count(&self) -> usize {
        self.n
    }
}

impl Undirected for UndirectedDenseGraph {}

impl Coster for UndirectedDenseGraph {
    fn cost(&self, edge: &Edge) -> f64 {
        match self.edge_from_to(edge.from, edge.to) {
            Some(_) => self.costs[edge.from.0 * self.n + edge.to.0],
            None => f64::INFINITY,
        }
    }
}

impl EdgeList for UndirectedDenseGraph {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes().flat_map(move |from| {
            self.successors(from)
                .filter(move |&to| from <= to)
                .map(move |to| Edge { from, to })
        })
    }
}
