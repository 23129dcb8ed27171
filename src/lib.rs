//! # Trellis
//!
//! Trellis is a library of classic graph search and decomposition algorithms,
//! written against small capability traits instead of a fixed graph type.
//!
//! - [`graph`] defines node identity and the traits an algorithm may ask a
//!   graph to implement.
//! - [`search`] holds the algorithms: path checking, breadth-first search,
//!   Dijkstra, A*, Tarjan's strongly connected components, degeneracy ordering,
//!   Bron–Kerbosch maximal cliques and connected components.
//! - [`concrete`] provides a few ready-made graphs to run them on.
//!
//! ```
//! use trellis::{
//!     concrete::UndirectedGraph,
//!     graph::{Edge, NodeId},
//!     search::{connected_components, dijkstra},
//! };
//!
//! let mut g = UndirectedGraph::default();
//! g.add_undirected_edge(Edge::new(0, 1), 2.);
//! g.add_undirected_edge(Edge::new(1, 2), 3.);
//! g.add_node(NodeId(7));
//!
//! assert_eq!(dijkstra(&g, NodeId(0)).cost_to(NodeId(2)), Some(5.));
//! assert_eq!(connected_components(&g).len(), 2);
//! ```

pub mod concrete;
pub mod graph;
pub(crate) mod local_index;
pub mod search;
