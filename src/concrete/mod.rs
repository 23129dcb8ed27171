//! # Concrete Graphs
//!
//! Ready-made storage layouts implementing the capability traits of
//! [`crate::graph`]:
//!
//! - [`DirectedGraph`] and [`UndirectedGraph`]: hash map adjacency over
//!   arbitrary node ids, mutable, with id allocation.
//! - [`DirectedDenseGraph`] and [`UndirectedDenseGraph`]: cost matrices over
//!   the ids `0..n`.
//! - [`TileGraph`]: a grid of passable and impassable tiles, handy for
//!   exercising path search.

use ahash::HashSet;

use crate::graph::NodeId;

pub mod dense;
pub mod directed;
pub mod tile;
pub mod undirected;


pub use dense::{DirectedDenseGraph, UndirectedDenseGraph};
pub use directed::DirectedGraph;
pub use tile::{TileError, TileGraph};
pub use undirected::UndirectedGraph;

/// Hands out node ids for the mutable graphs.
///
/// Fresh ids are one past the largest id ever added. Once that would overflow,
/// ids of removed nodes are reused, and as a last resort the lowest id not in
/// use is searched for.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    next: usize,
    exhausted: bool,
    free: HashSet<NodeId>,
}

impl IdAllocator {
    pub(crate) fn add(&mut self, id: NodeId) {
        self.free.remove(&id);
        match id.0.checked_add(1) {
            Some(next) => self.next = self.next.max(next),
            None => self.exhausted = true,
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) {
        self.free.insert(id);
    }

    /// An id `in_use` says is free. Does not reserve it.
    pub(crate) fn allocate(&self, in_use: impl Fn(NodeId) -> bool) -> NodeId {
        if !self.exhausted {
            return NodeId(self.next);
        }
        if let Some(&id) = self.free.iter().next() {
            return id;
        }
        match (0..usize::MAX).map(NodeId).find(|&id| !in_use(id)) {
            Some(id) => id,
            None => unreachable!("every node id is in use"),
        }
    }
}
