#![forbid(unsafe_code)]
//! Intra-repository dependency graph: construction, topological ordering,
//! and transitive-closure resolution.

pub mod closure;
pub mod graph;
pub mod id;
pub mod topo;

pub use closure::transitive_dependencies;
pub use graph::{DependencyGraph, GraphError};
pub use id::LibraryId;
pub use topo::topological_order;
