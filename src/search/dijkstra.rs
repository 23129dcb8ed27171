use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use tracing::{debug, instrument};

use super::{frontier::Frontier, rebuild_path};
use crate::graph::{Coster, NodeId};

/// Cheapest paths from one source to every node it can reach.
///
/// Nodes the source cannot reach appear in neither map. The source itself maps
/// to the single node path with cost `0`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPaths {
    pub source: NodeId,
    pub paths: HashMap<NodeId, Vec<NodeId>>,
    pub costs: HashMap<NodeId, f64>,
}

impl ShortestPaths {
    fn unreachable(source: NodeId) -> Self {
        ShortestPaths {
            source,
            paths: HashMap::new(),
            costs: HashMap::new(),
        }
    }

    pub fn path_to(&self, node: NodeId) -> Option<&[NodeId]> {
        self.paths.get(&node).map(Vec::as_slice)
    }

    pub fn cost_to(&self, node: NodeId) -> Option<f64> {
        self.costs.get(&node).copied()
    }

    /// Number of reachable nodes, the source included.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn reachable(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.costs.keys().copied()
    }
}

/// Dijkstra's single source shortest paths.
///
/// Costs must be non-negative, this is not checked. Edges costing
/// `f64::INFINITY` are treated as absent. A node's cost is final the first time
/// it leaves the frontier. When two routes cost the same, the one discovered
/// first is kept.
///
/// A source the graph does not have reaches nothing.
///
/// ```
/// use trellis::{concrete::UndirectedGraph, graph::{Edge, NodeId}, search::dijkstra};
///
/// let mut g = UndirectedGraph::default();
/// g.add_undirected_edge(Edge::new(0, 1), 4.);
/// g.add_undirected_edge(Edge::new(0, 2), 1.);
/// g.add_undirected_edge(Edge::new(2, 1), 1.);
///
/// let shortest = dijkstra(&g, NodeId(0));
/// assert_eq!(shortest.cost_to(NodeId(1)), Some(2.));
/// assert_eq!(shortest.path_to(NodeId(1)), Some(&[NodeId(0), NodeId(2), NodeId(1)][..]));
/// ```
#[instrument(level = "debug", skip_all, fields(source = %source))]
pub fn dijkstra<G: Coster>(graph: &G, source: NodeId) -> ShortestPaths {
    if !graph.has(source) {
        debug!("source is not in the graph");
        return ShortestPaths::unreachable(source);
    }

    let mut costs = HashMap::new();
    let mut predecessor = HashMap::new();
    let mut closed = HashSet::new();
    let mut frontier = Frontier::new();

    costs.insert(source, 0.);
    frontier.push(source, 0., 0.);

    while let Some((u, cost_u)) = frontier.pop() {
        if !closed.insert(u) {
            continue;
        }
        for v in graph.successors(u) {
            if closed.contains(&v) {
                continue;
            }
            let Some(edge) = graph.edge_from_to(u, v) else {
                continue;
            };
            let step = graph.cost(&edge);
            if step == f64::INFINITY {
                continue;
            }
            let candidate = cost_u + step;
            if costs.get(&v).is_some_and(|&known| known <= candidate) {
                continue;
            }
            costs.insert(v, candidate);
            predecessor.insert(v, u);
            frontier.push(v, candidate, candidate);
        }
    }

    debug!(reachable = costs.len(), "settled");
    let paths = costs
        .keys()
        .map(|&n| (n, rebuild_path(&predecessor, n)))
        .collect();
    ShortestPaths {
        source,
        paths,
        costs,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        concrete::{DirectedGraph, TileGraph},
        graph::{Edge, UniformCost},
        search::{is_path, test::small_weighted_graph},
    };

    #[test]
    fn small_weighted_graph_by_hand() {
        let g = small_weighted_graph();
        let shortest = dijkstra(&g, NodeId(1));
        assert_eq!(shortest.paths.len(), 6);
        assert_eq!(shortest.costs.len(), 6);

        let mut s = String::new();
        for i in 1..=6 {
            let n = NodeId(i);
            let path = shortest.path_to(n).unwrap().iter().map(|n| n.0).collect::<Vec<_>>();
            s += &format!("{path:?} {}\n", shortest.cost_to(n).unwrap());
        }
        insta::assert_snapshot!(s, @r"
        [1] 0
        [1, 2] 7
        [1, 3] 9
        [1, 3, 4] 20
        [1, 3, 6, 5] 20
        [1, 3, 6] 11
        ");

        for (n, path) in &shortest.paths {
            assert!(is_path(path, &g));
            assert_eq!(path.first(), Some(&NodeId(1)));
            assert_eq!(path.last(), Some(n));
        }
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let mut g = DirectedGraph::new();
        g.add_directed_edge(Edge::new(0, 1), 2.);
        g.add_directed_edge(Edge::new(2, 0), 2.);
        g.add_node(NodeId(3));

        let shortest = dijkstra(&g, NodeId(0));
        let mut reachable: Vec<_> = shortest.reachable().collect();
        reachable.sort();
        assert_eq!(reachable, vec![NodeId(0), NodeId(1)]);
        assert_eq!(shortest.path_to(NodeId(2)), None);
        assert_eq!(shortest.cost_to(NodeId(3)), None);
    }

    #[test]
    fn missing_source_is_empty() {
        let g = DirectedGraph::new();
        let shortest = dijkstra(&g, NodeId(4));
        assert!(shortest.is_empty());
        assert_eq!(shortest.source, NodeId(4));
    }

    #[test]
    fn zero_costs_and_self_loops() {
        let mut g = DirectedGraph::new();
        g.add_directed_edge(Edge::new(0, 0), 0.);
        g.add_directed_edge(Edge::new(0, 1), 0.);
        g.add_directed_edge(Edge::new(1, 2), 0.);
        g.add_directed_edge(Edge::new(2, 0), 0.);
        g.add_directed_edge(Edge::new(0, 2), 3.);

        let shortest = dijkstra(&g, NodeId(0));
        assert_eq!(shortest.cost_to(NodeId(0)), Some(0.));
        assert_eq!(shortest.path_to(NodeId(0)), Some(&[NodeId(0)][..]));
        assert_eq!(shortest.cost_to(NodeId(2)), Some(0.));
        assert_eq!(
            shortest.path_to(NodeId(2)),
            Some(&[NodeId(0), NodeId(1), NodeId(2)][..])
        );
    }

    #[test]
    fn infinite_cost_edges_are_not_edges() {
        let mut g = DirectedGraph::new();
        g.add_directed_edge(Edge::new(0, 1), f64::INFINITY);
        assert_eq!(dijkstra(&g, NodeId(0)).cost_to(NodeId(1)), None);
    }

    #[test]
    fn uniform_cost_counts_edges() {
        let grid = TileGraph::new(4, 4, true);
        let shortest = dijkstra(&UniformCost(&grid), NodeId(0));
        assert_eq!(shortest.len(), 16);
        assert_eq!(shortest.cost_to(NodeId(15)), Some(6.));
    }
}
