//! Dense renumbering of the nodes of one graph snapshot.
//!
//! Node ids can be sparse, so algorithms that want flat arrays (low-links,
//! degree buckets, clique candidate sets) first assign every node a
//! [`LocalIndex`] in `0..n` through a [`Compaction`], work on [`LocalVec`]s, and
//! translate back to [`NodeId`]s when they report.

use std::ops::{Index, IndexMut};

use ahash::RandomState;
use indexmap::IndexSet;

use crate::graph::{Graph, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalIndex(pub usize);

/// A vector that can only be indexed by [`LocalIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalVec<T>(Vec<T>);

impl<T> Index<LocalIndex> for LocalVec<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: LocalIndex) -> &Self::Output {
        &self.0[i.0]
    }
}

impl<T> IndexMut<LocalIndex> for LocalVec<T> {
    #[inline]
    fn index_mut(&mut self, i: LocalIndex) -> &mut Self::Output {
        &mut self.0[i.0]
    }
}

impl<T> LocalVec<T> {
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (LocalIndex, &T)> {
        self.0.iter().enumerate().map(|(u, t)| (LocalIndex(u), t))
    }
}

impl<T> FromIterator<T> for LocalVec<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Self {
        Self(Vec::from_iter(it))
    }
}

/// Bijection between the nodes of a graph and `0..n`.
#[derive(Clone, Debug)]
pub struct Compaction {
    ids: IndexSet<NodeId, RandomState>,
}

impl Compaction {
    pub fn of<G: Graph>(graph: &G) -> Self {
        let mut ids = IndexSet::with_hasher(RandomState::new());
        ids.extend(graph.nodes());
        Compaction { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = LocalIndex> {
        (0..self.ids.len()).map(LocalIndex)
    }

    pub fn local(&self, node: NodeId) -> Option<LocalIndex> {
        self.ids.get_index_of(&node).map(LocalIndex)
    }

    /// # Panics
    ///
    /// If `index` was not handed out by this compaction.
    pub fn node(&self, index: LocalIndex) -> NodeId {
        self.ids[index.0]
    }

    pub fn nodes(&self, indices: impl IntoIterator<Item = LocalIndex>) -> Vec<NodeId> {
        indices.into_iter().map(|i| self.node(i)).collect()
    }

    pub fn new_vec<T: Clone>(&self, value: T) -> LocalVec<T> {
        LocalVec(vec![value; self.len()])
    }

    /// Adjacency lists in local indices, sorted and without duplicates.
    ///
    /// `adjacent` lists the nodes reachable in one step. Pass
    /// `|n| graph.successors(n)` for directed walks and `|n| graph.neighbors(n)`
    /// for undirected ones. Self-loops are dropped, as are nodes the graph does
    /// not enumerate.
    pub fn adjacency<I>(&self, adjacent: impl Fn(NodeId) -> I) -> LocalVec<Vec<LocalIndex>>
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.indices()
            .map(|u| {
                let mut succ: Vec<LocalIndex> = adjacent(self.node(u))
                    .into_iter()
                    .filter_map(|n| self.local(n))
                    .filter(|&v| v != u)
                    .collect();
                succ.sort_unstable();
                succ.dedup();
                succ
            })
            .collect()
    }
}
