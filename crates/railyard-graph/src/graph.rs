//! The directed dependency graph, acyclic at all times.

use std::collections::{BTreeMap, BTreeSet};

use crate::id::LibraryId;

/// Errors produced by graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Inserting an edge would close a dependency cycle.
    #[error("dependency cycle detected: {cycle}")]
    Cycle { cycle: String },
}

/// Directed graph of `dependent → dependency` edges between libraries.
///
/// The graph is acyclic at all times: [`DependencyGraph::add_edge`] checks
/// whether the new edge would close a cycle and rejects it before any
/// mutation. BTree collections keep iteration deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeSet<LibraryId>,
    edges: BTreeMap<LibraryId, BTreeSet<LibraryId>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without edges. Idempotent.
    pub fn add_node(&mut self, id: LibraryId) {
        self.nodes.insert(id);
    }

    /// All nodes, in deterministic order.
    pub fn nodes(&self) -> impl Iterator<Item = &LibraryId> {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when `id` is a node of this graph.
    pub fn contains(&self, id: &LibraryId) -> bool {
        self.nodes.contains(id)
    }

    /// The direct dependencies of `id`, in deterministic order.
    pub fn dependencies_of(&self, id: &LibraryId) -> impl Iterator<Item = &LibraryId> {
        self.edges.get(id).into_iter().flatten()
    }

    /// Nodes that participate in at least one edge, as either endpoint.
    pub fn connected_nodes(&self) -> BTreeSet<LibraryId> {
        let mut connected = BTreeSet::new();
        for (dependent, deps) in &self.edges {
            connected.insert(dependent.clone());
            connected.extend(deps.iter().cloned());
        }
        connected
    }

    /// Insert the edge `dependent → dependency`.
    ///
    /// Both endpoints become nodes. The edge is rejected — and the graph
    /// left untouched — when it would close a cycle: directly
    /// (self-dependency) or through an existing path from the dependency
    /// back to the dependent.
    ///
    /// # Errors
    /// Returns `GraphError::Cycle` carrying the formatted cycle path.
    pub fn add_edge(
        &mut self,
        dependent: &LibraryId,
        dependency: &LibraryId,
    ) -> Result<(), GraphError> {
        if dependent == dependency {
            return Err(GraphError::Cycle {
                cycle: format!("{dependent} -> {dependent}"),
            });
        }

        if let Some(path) = self.path_between(dependency, dependent) {
            // Path dependency ⟶ … ⟶ dependent exists; adding the edge
            // dependent ⟶ dependency would close it into a cycle.
            let mut cycle: Vec<String> = Vec::with_capacity(path.len() + 1);
            cycle.push(dependent.to_string());
            cycle.extend(path.iter().map(ToString::to_string));
            return Err(GraphError::Cycle {
                cycle: cycle.join(" -> "),
            });
        }

        self.nodes.insert(dependent.clone());
        self.nodes.insert(dependency.clone());
        self.edges
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());
        Ok(())
    }

    /// Find a path `from ⟶ … ⟶ to` along dependency edges, if one exists.
    /// Returns the node sequence including both endpoints.
    fn path_between(&self, from: &LibraryId, to: &LibraryId) -> Option<Vec<LibraryId>> {
        let mut visited: BTreeSet<&LibraryId> = BTreeSet::new();
        let mut path: Vec<LibraryId> = Vec::new();
        if self.dfs_path(from, to, &mut visited, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn dfs_path<'a>(
        &'a self,
        current: &'a LibraryId,
        to: &LibraryId,
        visited: &mut BTreeSet<&'a LibraryId>,
        path: &mut Vec<LibraryId>,
    ) -> bool {
        if !visited.insert(current) {
            return false;
        }
        path.push(current.clone());
        if current == to {
            return true;
        }
        for dep in self.dependencies_of(current) {
            if self.dfs_path(dep, to, visited, path) {
                return true;
            }
        }
        path.pop();
        false
    }
}
