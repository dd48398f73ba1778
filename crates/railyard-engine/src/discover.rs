//! Library discovery: enumerate candidate libraries from a root directory.

use std::collections::BTreeSet;
use std::path::Path;

use railyard_graph::LibraryId;

use crate::error::EngineError;

/// Enumerate the libraries under `libs_root`.
///
/// One id per immediate subdirectory that is a real directory and whose
/// name does not start with the hidden-file marker `'.'`. The filesystem
/// guarantees uniqueness; the `BTreeSet` makes iteration deterministic,
/// but no other ordering may be relied on downstream.
///
/// # Errors
/// Returns `EngineError::Discovery` if the root cannot be read.
pub fn discover_libraries(libs_root: &Path) -> Result<BTreeSet<LibraryId>, EngineError> {
    let entries = std::fs::read_dir(libs_root).map_err(|source| EngineError::Discovery {
        path: libs_root.display().to_string(),
        source,
    })?;

    let mut libraries = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| EngineError::Discovery {
            path: libs_root.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        libraries.insert(LibraryId::new(name));
    }

    Ok(libraries)
}
