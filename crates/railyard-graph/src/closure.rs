//! Transitive dependency closure of a single library.

use std::collections::BTreeSet;

use crate::graph::DependencyGraph;
use crate::id::LibraryId;

/// All libraries `target` depends on, directly or transitively.
///
/// Follows edges outward from the target only — libraries that depend on
/// the target are never included, and neither is the target itself.
/// Returns the empty set for a library with no dependencies (or one not in
/// the graph at all; existence is the caller's concern).
pub fn transitive_dependencies(
    graph: &DependencyGraph,
    target: &LibraryId,
) -> BTreeSet<LibraryId> {
    let mut closure: BTreeSet<LibraryId> = BTreeSet::new();
    let mut stack: Vec<&LibraryId> = graph.dependencies_of(target).collect();

    while let Some(current) = stack.pop() {
        if current == target || !closure.insert(current.clone()) {
            continue;
        }
        stack.extend(graph.dependencies_of(current));
    }

    closure
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(name: &str) -> LibraryId {
        LibraryId::new(name)
    }

    #[test]
    fn leaf_has_empty_closure() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("b"), &id("a")).unwrap();
        assert!(transitive_dependencies(&graph, &id("a")).is_empty());
    }

    #[test]
    fn chain_closure_is_transitive() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("b"), &id("a")).unwrap();
        graph.add_edge(&id("c"), &id("b")).unwrap();

        let closure = transitive_dependencies(&graph, &id("c"));
        let expected: BTreeSet<_> = [id("a"), id("b")].into_iter().collect();
        assert_eq!(closure, expected);
    }

    #[test]
    fn closure_never_contains_target() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("b"), &id("a")).unwrap();
        graph.add_edge(&id("c"), &id("b")).unwrap();
        graph.add_edge(&id("d"), &id("c")).unwrap();

        for name in ["a", "b", "c", "d"] {
            let closure = transitive_dependencies(&graph, &id(name));
            assert!(
                !closure.contains(&id(name)),
                "closure of {name} contains itself"
            );
        }
    }

    #[test]
    fn closure_follows_edges_outward_only() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("b"), &id("a")).unwrap();
        graph.add_edge(&id("c"), &id("b")).unwrap();

        // b's dependents (c) must not appear in b's closure.
        let closure = transitive_dependencies(&graph, &id("b"));
        let expected: BTreeSet<_> = [id("a")].into_iter().collect();
        assert_eq!(closure, expected);
    }

    #[test]
    fn diamond_closure_deduplicates() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("b"), &id("a")).unwrap();
        graph.add_edge(&id("c"), &id("a")).unwrap();
        graph.add_edge(&id("d"), &id("b")).unwrap();
        graph.add_edge(&id("d"), &id("c")).unwrap();

        let closure = transitive_dependencies(&graph, &id("d"));
        let expected: BTreeSet<_> = [id("a"), id("b"), id("c")].into_iter().collect();
        assert_eq!(closure, expected);
    }

    #[test]
    fn unknown_target_yields_empty_closure() {
        let graph = DependencyGraph::new();
        assert!(transitive_dependencies(&graph, &id("ghost-lib")).is_empty());
    }
}
