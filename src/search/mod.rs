//! # Search and Decomposition Algorithms
//!
//! Every algorithm here reads a graph through the capability traits of
//! [`crate::graph`], allocates its own working state and returns owned results.
//! None of them mutates the graph, and none depends on another.
//!
//! ## Paths
//!
//! - [`is_path`]: checks that a node sequence can be walked in a graph
//! - [`breadth_first_search`]: fewest-edges path between two nodes
//! - [`dijkstra`]: cheapest paths from one node to every reachable node
//! - [`astar`]: cheapest path between two nodes, guided by a [`Heuristic`]
//!
//! ## Structure
//!
//! - [`tarjan_scc`]: strongly connected components of a directed graph
//! - [`vertex_ordering`]: degeneracy ordering and k-core decomposition
//! - [`bron_kerbosch`]: all maximal cliques of an undirected graph
//! - [`connected_components`]: connected components of an undirected graph
//!
//! A path is a `Vec<NodeId>`. "No path" is always `None`, which is distinct from
//! the single node path from a node to itself.

use ahash::HashMap;

use crate::graph::NodeId;

pub mod astar;
pub mod bfs;
pub mod bron_kerbosch;
pub mod components;
pub mod dijkstra;
mod frontier;
pub mod path;
pub mod tarjan;
pub mod vertex_ordering;


pub use astar::{astar, check_consistent, AStar, Heuristic, InconsistentHeuristic, NullHeuristic};
pub use bfs::breadth_first_search;
pub use bron_kerbosch::bron_kerbosch;
pub use components::connected_components;
pub use dijkstra::{dijkstra, ShortestPaths};
pub use path::is_path;
pub use tarjan::tarjan_scc;
pub use vertex_ordering::{vertex_ordering, VertexOrdering};

/// Walks predecessor links back from `goal` and returns the path in forward order.
///
/// The walk stops at the first node without a predecessor, which is the origin
/// of the search. The links must not form a cycle.
pub(crate) fn rebuild_path(predecessor: &HashMap<NodeId, NodeId>, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = predecessor.get(&current) {
        debug_assert!(path.len() <= predecessor.len(), "predecessor links form a cycle");
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
