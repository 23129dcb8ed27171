//! A* search between two nodes.
//!
//! The frontier is ordered by `cost so far + heuristic(node, goal)`. With an
//! admissible heuristic the path found is a cheapest one. Closed nodes are never
//! reopened, which is only sound when the heuristic is also consistent; in that
//! case no node is expanded twice and no more nodes are expanded than with
//! [`NullHeuristic`]. Use [`check_consistent`] to validate a heuristic against a
//! graph.

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use thiserror::Error;
use tracing::{debug, instrument};

use super::{frontier::Frontier, rebuild_path};
use crate::graph::{Coster, Edge, EdgeList, NodeId};

/// Estimated cost of the cheapest path from a node to a goal.
pub trait Heuristic {
    fn estimate(&self, node: NodeId, goal: NodeId) -> f64;
}

impl<F: Fn(NodeId, NodeId) -> f64> Heuristic for F {
    fn estimate(&self, node: NodeId, goal: NodeId) -> f64 {
        self(node, goal)
    }
}

/// Estimates every remaining cost as `0`, which turns A* into Dijkstra's
/// algorithm stopped at the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    fn estimate(&self, _: NodeId, _: NodeId) -> f64 {
        0.
    }
}

/// `None` behaves as [`NullHeuristic`].
impl<H: Heuristic> Heuristic for Option<H> {
    fn estimate(&self, node: NodeId, goal: NodeId) -> f64 {
        match self {
            Some(h) => h.estimate(node, goal),
            None => 0.,
        }
    }
}

/// Outcome of an [`astar`] search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStar {
    /// The path found, `None` when the goal is unreachable.
    pub path: Option<Vec<NodeId>>,
    /// True cost of `path`, `f64::INFINITY` when there is none.
    pub cost: f64,
    /// Nodes taken off the frontier, the goal included.
    pub expanded: usize,
}

impl AStar {
    fn unreachable(expanded: usize) -> Self {
        AStar {
            path: None,
            cost: f64::INFINITY,
            expanded,
        }
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Cheapest path from `start` to `goal` guided by `heuristic`.
///
/// Costs must be non-negative and edges costing `f64::INFINITY` are treated as
/// absent, as in [`dijkstra`](super::dijkstra()). A `start` the graph does not
/// have expands nothing.
///
/// ```
/// use trellis::{
///     concrete::TileGraph,
///     graph::NodeId,
///     search::{astar, NullHeuristic},
/// };
///
/// let grid: TileGraph = "▀  ▀\n▀▀ ▀\n▀▀ ▀\n▀▀ ▀".parse().unwrap();
/// let found = astar(&grid, NodeId(1), NodeId(14), NullHeuristic);
///
/// assert_eq!(found.cost, 4.);
/// assert_eq!(
///     found.path,
///     Some([1, 2, 6, 10, 14].map(NodeId).to_vec())
/// );
/// ```
#[instrument(level = "debug", skip_all, fields(start = %start, goal = %goal))]
pub fn astar<G: Coster, H: Heuristic>(graph: &G, start: NodeId, goal: NodeId, heuristic: H) -> AStar {
    if !graph.has(start) {
        debug!("start is not in the graph");
        return AStar::unreachable(0);
    }

    let mut best = HashMap::new();
    let mut predecessor = HashMap::new();
    let mut closed = HashSet::new();
    let mut frontier = Frontier::new();
    let mut expanded = 0;

    best.insert(start, 0.);
    frontier.push(start, 0., heuristic.estimate(start, goal));

    while let Some((u, cost_u)) = frontier.pop() {
        if closed.contains(&u) {
            continue;
        }
        expanded += 1;
        if u == goal {
            debug!(expanded, cost = cost_u, "reached goal");
            return AStar {
                path: Some(rebuild_path(&predecessor, goal)),
                cost: cost_u,
                expanded,
            };
        }
        closed.insert(u);

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
            if best.get(&v).is_some_and(|&known| known <= candidate) {
                continue;
            }
            best.insert(v, candidate);
            predecessor.insert(v, u);
            frontier.push(v, candidate, candidate + heuristic.estimate(v, goal));
        }
    }

    debug!(expanded, "goal unreachable");
    AStar::unreachable(expanded)
}

/// An edge across which a heuristic estimate drops by more than the edge costs.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("heuristic towards {goal} is inconsistent on {edge:?}: {from_estimate} > {cost} + {to_estimate}")]
pub struct InconsistentHeuristic {
    pub edge: Edge,
    pub goal: NodeId,
    pub cost: f64,
    pub from_estimate: f64,
    pub to_estimate: f64,
}

/// Checks `h(u, goal) <= cost(u, v) + h(v, goal)` for every goal and every edge.
///
/// Every edge listed by [`EdgeList::edges`] is checked in each orientation the
/// graph lets it be traversed in.
pub fn check_consistent<G, H>(graph: &G, heuristic: &H) -> Result<(), InconsistentHeuristic>
where
    G: Coster + EdgeList,
    H: Heuristic,
{
    for goal in graph.nodes() {
        for listed in graph.edges() {
            for (u, v) in [(listed.from, listed.to), (listed.to, listed.from)] {
                let Some(edge) = graph.edge_from_to(u, v) else {
                    continue;
                };
                let cost = graph.cost(&edge);
                let from_estimate = heuristic.estimate(u, goal);
                let to_estimate = heuristic.estimate(v, goal);
                if from_estimate > cost + to_estimate {
                    return Err(InconsistentHeuristic {
                        edge: Edge::new(u, v),
                        goal,
                        cost,
                        from_estimate,
                        to_estimate,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        concrete::{DirectedGraph, TileGraph},
        graph::Graph,
        search::{
            dijkstra, is_path,
            test::{small_heuristic, small_weighted_graph},
        },
    };

    #[test]
    fn simple_tile_graph() {
        let grid: TileGraph = "▀  ▀\n▀▀ ▀\n▀▀ ▀\n▀▀ ▀".parse().unwrap();
        let found = astar(&grid, NodeId(1), NodeId(14), NullHeuristic);

        assert!((found.cost - 4.).abs() < 1e-5);
        let path = found.path.unwrap();
        assert_eq!(path, [1, 2, 6, 10, 14].map(NodeId).to_vec());
        insta::assert_snapshot!(grid.path_string(&path), @r"
        ▀s♥▀
        ▀▀♥▀
        ▀▀♥▀
        ▀▀g▀
        ");
    }

    #[test]
    fn bigger_grids() {
        let grid = TileGraph::new(3, 3, true);
        let found = astar(&grid, NodeId(0), NodeId(8), NullHeuristic);
        assert!((found.cost - 4.).abs() < 1e-5);
        assert!(is_path(found.path.as_deref().unwrap(), &grid));

        let grid = TileGraph::new(100, 100, true);
        let goal = grid.coords_to_node(99, 99).unwrap();
        let found = astar(&grid, NodeId(0), goal, grid.manhattan());
        assert_eq!(found.cost, 198.);
        assert!(is_path(found.path.as_deref().unwrap(), &grid));
    }

    #[test]
    fn obstructed_grid_heuristic_expands_less() {
        let mut grid = TileGraph::new(10, 10, true);
        // a wall across the middle row with a gap on the left
        for col in 1..10 {
            grid.set_passability(4, col, false).unwrap();
        }

        let (rows, cols) = grid.dimensions();
        let goal = grid.coords_to_node(rows - 1, cols - 1).unwrap();

        let blind = astar(&grid, NodeId(5), goal, NullHeuristic);
        assert!(is_path(blind.path.as_deref().unwrap(), &grid));

        check_consistent(&grid, &grid.manhattan()).unwrap();
        let informed = astar(&grid, NodeId(5), goal, grid.manhattan());
        assert!(is_path(informed.path.as_deref().unwrap(), &grid));

        assert!((blind.cost - informed.cost).abs() < 1e-5);
        assert!(
            informed.expanded <= blind.expanded,
            "{} > {}",
            informed.expanded,
            blind.expanded
        );
    }

    #[test]
    fn walled_off_goal() {
        let mut grid = TileGraph::new(5, 5, true);
        for col in 0..5 {
            grid.set_passability(2, col, false).unwrap();
        }
        let (rows, _) = grid.dimensions();
        let start = grid.coords_to_node(0, 2).unwrap();
        let goal = grid.coords_to_node(rows - 1, 2).unwrap();

        let found = astar(&grid, start, goal, NullHeuristic);
        assert!(!found.found());
        assert_eq!(found.cost, f64::INFINITY);
        assert_eq!(found.expanded, 10);
    }

    #[test]
    fn agrees_with_dijkstra_on_small_graph() {
        let g = small_weighted_graph();
        let heuristic = small_heuristic();
        check_consistent(&g, &heuristic).unwrap();

        for start in g.nodes() {
            let reference = dijkstra(&g, start);
            for (&goal, path) in &reference.paths {
                let found = astar(&g, start, goal, &heuristic);
                assert_eq!(found.path.as_ref(), Some(path), "{start} -> {goal}");
                assert_eq!(Some(found.cost), reference.cost_to(goal), "{start} -> {goal}");
            }
        }
    }

    #[test]
    fn absent_heuristic_is_null() {
        let g = small_weighted_graph();
        let none: Option<fn(NodeId, NodeId) -> f64> = None;
        assert_eq!(
            astar(&g, NodeId(1), NodeId(5), none),
            astar(&g, NodeId(1), NodeId(5), NullHeuristic)
        );
    }

    #[test]
    fn missing_start_expands_nothing() {
        let g = DirectedGraph::new();
        let found = astar(&g, NodeId(0), NodeId(0), NullHeuristic);
        assert_eq!(found.expanded, 0);
        assert!(!found.found());
    }

    #[test]
    fn overestimate_is_reported() {
        let mut g = DirectedGraph::new();
        g.add_directed_edge(Edge::new(0, 1), 1.);
        g.add_directed_edge(Edge::new(1, 2), 1.);

        let pessimist = |n: NodeId, goal: NodeId| if n == goal { 0. } else { 10. };
        let err = check_consistent(&g, &pessimist).unwrap_err();
        assert_eq!(err.cost, 1.);
        assert!(err.from_estimate > err.cost + err.to_estimate);
        assert_eq!(err.goal, err.edge.to);
    }
}
