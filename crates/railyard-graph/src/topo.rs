//! Topological ordering of the dependency graph.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::DependencyGraph;
use crate::id::LibraryId;

/// Order all libraries so every dependency precedes its dependents.
///
/// Kahn's algorithm over the edge-bearing subgraph, followed by the
/// isolated nodes — found by set difference against the sorted output —
/// appended in their deterministic set order. The ordering among mutually
/// independent libraries is unspecified beyond the dependency partial
/// order.
///
/// The graph is acyclic by construction ([`DependencyGraph::add_edge`]
/// rejects cycle-closing insertions), so the sort always covers every
/// connected node.
pub fn topological_order(graph: &DependencyGraph) -> Vec<LibraryId> {
    let connected = graph.connected_nodes();

    // Unresolved dependency count per connected node, plus the reverse
    // adjacency (dependency → dependents) used to release dependents.
    let mut pending: BTreeMap<&LibraryId, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&LibraryId, BTreeSet<&LibraryId>> = BTreeMap::new();
    for node in &connected {
        let deps: Vec<&LibraryId> = graph.dependencies_of(node).collect();
        pending.insert(node, deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().insert(node);
        }
    }

    let mut ready: BTreeSet<&LibraryId> = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| *node)
        .collect();

    let mut order: Vec<LibraryId> = Vec::with_capacity(graph.node_count());
    while let Some(node) = ready.pop_first() {
        order.push(node.clone());
        for &dependent in dependents.get(node).into_iter().flatten() {
            if let Some(count) = pending.get_mut(dependent) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    ready.insert(dependent);
                }
            }
        }
    }

    // Isolated libraries carry no edges and fall out of the sort above;
    // they still belong in the result.
    let sorted: BTreeSet<&LibraryId> = order.iter().collect();
    let isolated: Vec<LibraryId> = graph
        .nodes()
        .filter(|node| !sorted.contains(node))
        .cloned()
        .collect();
    order.extend(isolated);

    order
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use proptest::prelude::{prop, proptest};

    use super::*;

    /// Build an acyclic graph from index pairs: the higher-indexed library
    /// always depends on the lower-indexed one.
    fn dag_from_pairs(pairs: &[(usize, usize)], isolated: usize) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for &(a, b) in pairs {
            if a == b {
                continue;
            }
            let (low, high) = if a < b { (a, b) } else { (b, a) };
            let dependent = LibraryId::new(&format!("lib{high:03}"));
            let dependency = LibraryId::new(&format!("lib{low:03}"));
            graph
                .add_edge(&dependent, &dependency)
                .unwrap_or_else(|e| panic!("edges of an index DAG cannot cycle: {e}"));
        }
        for i in 0..isolated {
            graph.add_node(LibraryId::new(&format!("solo{i:03}")));
        }
        graph
    }

    proptest! {
        /// Every dependency is placed strictly before every dependent.
        #[test]
        fn order_respects_every_edge(
            pairs in prop::collection::vec((0usize..20, 0usize..20), 0..60),
            isolated in 0usize..5,
        ) {
            let graph = dag_from_pairs(&pairs, isolated);
            let order = topological_order(&graph);

            for dependent in graph.nodes() {
                let dependent_pos = order.iter().position(|n| n == dependent).unwrap();
                for dependency in graph.dependencies_of(dependent) {
                    let dependency_pos = order.iter().position(|n| n == dependency).unwrap();
                    assert!(
                        dependency_pos < dependent_pos,
                        "{dependency} must precede {dependent} in {order:?}"
                    );
                }
            }
        }

        /// The output is exactly the node set: no loss, no duplication.
        #[test]
        fn order_is_a_permutation_of_nodes(
            pairs in prop::collection::vec((0usize..20, 0usize..20), 0..60),
            isolated in 0usize..5,
        ) {
            let graph = dag_from_pairs(&pairs, isolated);
            let order = topological_order(&graph);

            assert_eq!(order.len(), graph.node_count());
            let ordered: BTreeSet<_> = order.iter().collect();
            let nodes: BTreeSet<_> = graph.nodes().collect();
            assert_eq!(ordered, nodes);
        }
    }
}
