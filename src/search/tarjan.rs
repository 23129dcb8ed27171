//! Strongly connected components using Tarjan's algorithm.
//!
//! A strongly connected component (SCC) is a maximal set of nodes such that
//! there is a path from every node to every other node in the set.

use bitvec::vec::BitVec;
use tracing::{debug, instrument};

use crate::{
    graph::{Directed, NodeId},
    local_index::{Compaction, LocalIndex, LocalVec},
};

struct TarjanState {
    next_index: usize,
    index: LocalVec<Option<usize>>,
    low_link: LocalVec<usize>,
    on_stack: BitVec,
    stack: Vec<LocalIndex>,
    components: Vec<Vec<LocalIndex>>,
}

impl TarjanState {
    fn new(nodes: &Compaction) -> Self {
        TarjanState {
            next_index: 0,
            index: nodes.new_vec(None),
            low_link: nodes.new_vec(0),
            on_stack: BitVec::repeat(false, nodes.len()),
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn visit(&mut self, v: LocalIndex) {
        self.index[v] = Some(self.next_index);
        self.low_link[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack.set(v.0, true);
    }

    /// Depth-first search from `root` with an explicit call stack of
    /// `(node, next successor to look at)` frames.
    fn strong_connect(&mut self, root: LocalIndex, adjacency: &LocalVec<Vec<LocalIndex>>) {
        self.visit(root);
        let mut calls = vec![(root, 0)];

        while let Some(frame) = calls.last_mut() {
            let v = frame.0;
            if let Some(&w) = adjacency[v].get(frame.1) {
                frame.1 += 1;
                match self.index[w] {
                    None => {
                        self.visit(w);
                        calls.push((w, 0));
                    }
                    Some(index_w) if self.on_stack[w.0] => {
                        self.low_link[v] = self.low_link[v].min(index_w);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                self.low_link[parent] = self.low_link[parent].min(self.low_link[v]);
            }

            if self.index[v] == Some(self.low_link[v]) {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack.set(w.0, false);
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

/// Partitions a directed graph into its strongly connected components.
///
/// Components are returned in reverse topological order of the condensation:
/// if any node of component `A` can reach a node of component `B != A`, then
/// `B` comes before `A`. Components with no path between them may appear in
/// either order. Nodes within a component are in no particular order and nodes
/// on no cycle form singleton components.
///
/// Runs in `O(V + E)` without recursion.
#[instrument(level = "debug", skip_all)]
pub fn tarjan_scc<G: Directed>(graph: &G) -> Vec<Vec<NodeId>> {
    let nodes = Compaction::of(graph);
    let adjacency = nodes.adjacency(|n| graph.successors(n));
    let mut state = TarjanState::new(&nodes);

    for root in nodes.indices() {
        if state.index[root].is_none() {
            state.strong_connect(root, &adjacency);
        }
    }

    debug!(components = state.components.len(), nodes = nodes.len(), "partitioned");
    state
        .components
        .into_iter()
        .map(|component| nodes.nodes(component))
        .collect()
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::{
        concrete::DirectedGraph,
        search::test::{directed_from_lists, sorted_ids},
    };

    struct TarjanCase {
        g: &'static [&'static [usize]],
        /// Ranges of the expected output whose components have no path between
        /// them, and so no fixed relative order.
        ambiguous_order: &'static [std::ops::Range<usize>],
        want: &'static [&'static [usize]],
    }

    const CASES: &[TarjanCase] = &[
        TarjanCase {
            g: &[&[1], &[2, 7], &[3, 6], &[4], &[2, 5], &[], &[3, 5], &[0, 6]],
            ambiguous_order: &[],
            want: &[&[5], &[2, 3, 4, 6], &[0, 1, 7]],
        },
        TarjanCase {
            g: &[&[1, 2, 3], &[2], &[3], &[1]],
            ambiguous_order: &[],
            want: &[&[1, 2, 3], &[0]],
        },
        TarjanCase {
            g: &[&[1], &[0, 2], &[1]],
            ambiguous_order: &[],
            want: &[&[0, 1, 2]],
        },
        TarjanCase {
            g: &[&[1], &[2, 3], &[4, 5], &[4, 5], &[6], &[], &[]],
            // 6 only has to come before 4, and 2 and 3 are unrelated.
            ambiguous_order: &[0..3, 3..5],
            want: &[&[6], &[5], &[4], &[3], &[2], &[1], &[0]],
        },
        TarjanCase {
            g: &[&[1], &[2, 3, 4], &[0, 3], &[4], &[3]],
            ambiguous_order: &[0..2],
            want: &[&[0, 1, 2], &[3, 4]],
        },
    ];

    fn normalise(mut components: Vec<Vec<usize>>, ambiguous: &[std::ops::Range<usize>]) -> Vec<Vec<usize>> {
        for range in ambiguous {
            components[range.clone()].sort();
        }
        components
    }

    #[test]
    fn tarjan_cases() {
        for (i, case) in CASES.iter().enumerate() {
            let g = directed_from_lists(case.g);
            let got = tarjan_scc(&g).iter().map(|c| sorted_ids(c)).collect_vec();
            let want = case.want.iter().map(|c| c.to_vec()).collect_vec();

            similar_asserts::assert_eq!(
                normalise(got, case.ambiguous_order),
                normalise(want, case.ambiguous_order),
                "case {i}"
            );
        }
    }

    #[test]
    fn empty_graph_has_no_components() {
        assert!(tarjan_scc(&DirectedGraph::new()).is_empty());
    }

    #[test]
    fn sparse_ids_and_self_loops() {
        let mut g = DirectedGraph::new();
        g.add_directed_edge(crate::graph::Edge::new(1_000_000, 1_000_000), 1.);
        g.add_directed_edge(crate::graph::Edge::new(1_000_000, 7), 1.);

        let got = tarjan_scc(&g);
        assert_eq!(got, vec![vec![NodeId(7)], vec![NodeId(1_000_000)]]);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let n = 200_000;
        let mut g = DirectedGraph::new();
        for i in 0..n {
            g.add_directed_edge(crate::graph::Edge::new(i, i + 1), 1.);
        }
        g.add_directed_edge(crate::graph::Edge::new(n, 0), 1.);

        let got = tarjan_scc(&g);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].len(), n + 1);
    }
}
