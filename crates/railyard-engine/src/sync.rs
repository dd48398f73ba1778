//! Sync: reconcile a library's sibling dependency references with the
//! version catalog.

use std::path::Path;

use railyard_config::{Manifest, VersionCatalog};
use railyard_util::maven::Coordinate;

use crate::error::EngineError;

/// Rewrite the same-group dependency versions in the manifest at
/// `manifest_path` to the catalog's current versions.
///
/// External dependencies and siblings absent from the catalog are left
/// untouched. The manifest is written back only when something changed.
/// Returns `true` if a write happened. A missing manifest is a no-op.
///
/// # Errors
/// Returns an error if the manifest cannot be read, parsed, or written,
/// or a dependency coordinate is malformed.
pub fn sync_manifest(
    manifest_path: &Path,
    group: &str,
    catalog: &VersionCatalog,
) -> Result<bool, EngineError> {
    if !manifest_path.exists() {
        return Ok(false);
    }

    let mut manifest = Manifest::from_path(manifest_path)?;
    let mut changed = false;

    for (coordinate_str, version) in &mut manifest.dependencies {
        let coordinate = Coordinate::parse(coordinate_str)?;
        if !coordinate.is_owned_by(group) {
            continue;
        }
        if let Some(current) = catalog.get(&coordinate.artifact_id) {
            if version.as_str() != current {
                *version = current.to_owned();
                changed = true;
            }
        }
    }

    if changed {
        manifest.write_to(manifest_path)?;
    }
    Ok(changed)
}
