use itertools::Itertools;

use crate::graph::{Graph, NodeId};

/// Whether `path` can be walked in `graph`.
///
/// An empty path is valid. A single node is valid when the graph has it. Longer
/// paths need every node to exist and an edge from each node to the next, in that
/// orientation when the graph is directed.
///
/// ```
/// use trellis::{concrete::DirectedGraph, graph::{Edge, NodeId}, search::is_path};
///
/// let mut g = DirectedGraph::new();
/// g.add_directed_edge(Edge::new(0, 1), 1.);
///
/// assert!(is_path(&[NodeId(0), NodeId(1)], &g));
/// assert!(!is_path(&[NodeId(1), NodeId(0)], &g));
/// ```
pub fn is_path<G: Graph>(path: &[NodeId], graph: &G) -> bool {
    match path {
        [] => true,
        [node] => graph.has(*node),
        _ => path.iter().tuple_windows().all(|(&u, &v)| {
            graph.has(u) && graph.has(v) && graph.edge_from_to(u, v).is_some()
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        concrete::{DirectedGraph, UndirectedGraph},
        graph::Edge,
    };

    #[test]
    fn directed_and_undirected_paths() {
        let mut dg = DirectedGraph::new();
        assert!(is_path(&[], &dg), "empty path");

        let mut p = vec![NodeId(0)];
        assert!(!is_path(&p, &dg), "single node missing from the graph");
        dg.add_node(p[0]);
        assert!(is_path(&p, &dg), "single existing node");

        p.push(NodeId(1));
        dg.add_node(p[1]);
        assert!(!is_path(&p, &dg), "two nodes without an edge");
        dg.add_directed_edge(Edge::new(p[0], p[1]), 1.);
        assert!(is_path(&p, &dg), "two nodes with an edge");

        p.swap(0, 1);
        assert!(!is_path(&p, &dg), "reversed directed edge");

        let p = vec![p[1], p[0], NodeId(2)];
        dg.add_directed_edge(Edge::new(p[1], p[2]), 1.);
        assert!(is_path(&p, &dg), "three node path");

        let mut ug = UndirectedGraph::default();
        ug.add_undirected_edge(Edge::new(p[1], p[0]), 1.);
        ug.add_undirected_edge(Edge::new(p[1], p[2]), 1.);
        assert!(is_path(&p, &ug), "undirected edges work both ways");
    }

    #[test]
    fn repeated_node_needs_a_self_loop() {
        let mut g = DirectedGraph::new();
        g.add_node(NodeId(3));
        assert!(!is_path(&[NodeId(3), NodeId(3)], &g));
        g.add_directed_edge(Edge::new(3, 3), 0.);
        assert!(is_path(&[NodeId(3), NodeId(3)], &g));
    }
}
