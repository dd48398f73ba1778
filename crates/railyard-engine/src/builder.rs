//! Dependency graph construction from library manifests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use railyard_config::Manifest;
use railyard_graph::{DependencyGraph, LibraryId};
use railyard_util::maven::Coordinate;

use crate::error::EngineError;

/// Per-library manifest filename.
pub const MANIFEST_FILE: &str = "railyard.toml";

/// The constructed graph plus the raw adjacency it was built from.
#[derive(Debug)]
pub struct BuildGraph {
    pub graph: DependencyGraph,
    /// `library → depends-on set`, restricted to sibling libraries.
    pub adjacency: BTreeMap<LibraryId, BTreeSet<LibraryId>>,
}

/// Build the intra-repository dependency graph.
///
/// For each discovered library: parse its manifest, retain only the
/// dependency coordinates owned by `group` (the repository's shared group
/// identifier), and map each retained coordinate to the sibling LibraryId.
/// External, third-party dependencies are never represented. A library
/// without a manifest file simply has no dependencies.
///
/// Edges are inserted `dependent → dependency`; any insertion that would
/// close a cycle aborts construction entirely — no partial graph is
/// returned.
///
/// # Errors
/// Returns `EngineError::Manifest` on a malformed manifest,
/// `EngineError::UnknownSibling` when a same-group coordinate has no
/// sibling directory, and `EngineError::Cycle` on a cyclic declaration.
pub fn build_graph(
    libs_root: &Path,
    libraries: &BTreeSet<LibraryId>,
    group: &str,
) -> Result<BuildGraph, EngineError> {
    let mut adjacency: BTreeMap<LibraryId, BTreeSet<LibraryId>> = BTreeMap::new();

    for library in libraries {
        let manifest_path = libs_root.join(library.as_str()).join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            Manifest::from_path(&manifest_path)?
        } else {
            Manifest::default()
        };

        let mut depends_on = BTreeSet::new();
        for coordinate_str in manifest.dependencies.keys() {
            let coordinate = Coordinate::parse(coordinate_str)?;
            if !coordinate.is_owned_by(group) {
                continue;
            }
            let dependency = LibraryId::new(&coordinate.artifact_id);
            if !libraries.contains(&dependency) {
                return Err(EngineError::UnknownSibling {
                    library: library.to_string(),
                    coordinate: coordinate.to_string(),
                });
            }
            depends_on.insert(dependency);
        }
        adjacency.insert(library.clone(), depends_on);
    }

    let mut graph = DependencyGraph::new();
    for library in libraries {
        graph.add_node(library.clone());
    }
    for (dependent, depends_on) in &adjacency {
        for dependency in depends_on {
            graph.add_edge(dependent, dependency)?;
        }
    }

    Ok(BuildGraph { graph, adjacency })
}
