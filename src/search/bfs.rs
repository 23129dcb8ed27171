use std::collections::VecDeque;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use tracing::{debug, instrument};

use super::rebuild_path;
use crate::graph::{Graph, NodeId};

/// Fewest-edges path from `start` to `goal`, ignoring costs.
///
/// Nodes are explored in distance layers. A node is marked visited, and its
/// predecessor recorded, when it is first enqueued, so every node is enqueued at
/// most once. The search stops as soon as `goal` is dequeued.
///
/// Returns the path, or `None` when `goal` cannot be reached, together with the
/// number of nodes visited including `start`. A `start` the graph does not have
/// visits nothing.
///
/// ```
/// use trellis::{concrete::DirectedGraph, graph::{Edge, NodeId}, search::breadth_first_search};
///
/// let mut g = DirectedGraph::new();
/// g.add_directed_edge(Edge::new(0, 1), 1.);
/// g.add_directed_edge(Edge::new(0, 2), 1.);
/// g.add_directed_edge(Edge::new(2, 3), 1.);
///
/// let (path, visited) = breadth_first_search(&g, NodeId(0), NodeId(3));
/// assert_eq!(path, Some(vec![NodeId(0), NodeId(2), NodeId(3)]));
/// assert_eq!(visited, 4);
/// ```
#[instrument(level = "debug", skip_all, fields(start = %start, goal = %goal))]
pub fn breadth_first_search<G: Graph>(
    graph: &G,
    start: NodeId,
    goal: NodeId,
) -> (Option<Vec<NodeId>>, usize) {
    if !graph.has(start) {
        debug!("start is not in the graph");
        return (None, 0);
    }

    let mut visited = HashSet::new();
    let mut predecessor = HashMap::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        if u == goal {
            debug!(visited = visited.len(), "reached goal");
            return (Some(rebuild_path(&predecessor, goal)), visited.len());
        }
        for v in graph.successors(u) {
            if visited.insert(v) {
                predecessor.insert(v, u);
                queue.push_back(v);
            }
        }
    }

    debug!(visited = visited.len(), "goal unreachable");
    (None, visited.len())
}
