//! Min-priority frontier shared by the cost-ordered searches.
//!
//! Entries are never updated in place. A search that finds a cheaper route to a
//! node pushes a new entry and skips the stale ones when they surface, so a node
//! counts as closed the first time it is popped.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graph::NodeId;

#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: f64,
    seq: usize,
    node: NodeId,
    cost: f64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // BinaryHeap is a max-heap: lowest priority first, then oldest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: usize,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues `node` reached at `cost`, ordered by `priority`.
    pub(crate) fn push(&mut self, node: NodeId, cost: f64, priority: f64) {
        self.heap.push(Entry {
            priority,
            seq: self.seq,
            node,
            cost,
        });
        self.seq += 1;
    }

    /// The node with the lowest priority and the cost it was queued with.
    pub(crate) fn pop(&mut self) -> Option<(NodeId, f64)> {
        self.heap.pop().map(|e| (e.node, e.cost))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pops_lowest_priority_then_oldest() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId(1), 3., 5.);
        frontier.push(NodeId(2), 1., 2.);
        frontier.push(NodeId(3), 0., 5.);
        frontier.push(NodeId(4), 9., 2.);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(
            order,
            vec![
                (NodeId(2), 1.),
                (NodeId(4), 9.),
                (NodeId(1), 3.),
                (NodeId(3), 0.)
            ]
        );
    }

    #[test]
    fn infinite_priorities_come_last() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId(0), 0., f64::INFINITY);
        frontier.push(NodeId(1), 0., 1e300);
        assert_eq!(frontier.pop().map(|(n, _)| n), Some(NodeId(1)));
        assert_eq!(frontier.pop().map(|(n, _)| n), Some(NodeId(0)));
        assert_eq!(frontier.pop(), None);
    }
}
