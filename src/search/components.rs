//! Connected components of undirected graphs.

use ahash::{HashSet, HashSetExt};
use tracing::{debug, instrument};

use crate::graph::{NodeId, Undirected};

/// Partitions an undirected graph into connected components.
///
/// Every node appears in exactly one component. Isolated nodes are singleton
/// components. The order of components, and of nodes inside them, is not
/// specified.
#[instrument(level = "debug", skip_all)]
pub fn connected_components<G: Undirected>(graph: &G) -> Vec<Vec<NodeId>> {
    let mut seen = HashSet::with_capacity(graph.node_count());
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for root in graph.nodes() {
        if !seen.insert(root) {
            continue;
        }

        let mut component = vec![root];
        stack.push(root);
        while let Some(u) = stack.pop() {
            for v in graph.neighbors(u) {
                if seen.insert(v) {
                    component.push(v);
                    stack.push(v);
                }
            }
        }
        components.push(component);
    }

    debug!(components = components.len(), nodes = seen.len(), "partitioned");
    components
}
