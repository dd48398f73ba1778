//! Per-library build descriptor: derived paths and coordinates.

use std::path::{Path, PathBuf};

use railyard_config::VersionCatalog;
use railyard_graph::LibraryId;
use railyard_util::maven::{validate_part, ArtifactCoordinate, Coordinate};

use crate::builder::MANIFEST_FILE;
use crate::error::EngineError;

/// Filesystem roots a build operates against.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Repository root (where `railyard.toml` and the VCS working tree live).
    pub repo_root: PathBuf,
    /// Directory holding one subdirectory per library.
    pub libs_root: PathBuf,
    /// Build-output root; each library gets a subdirectory here.
    pub target_root: PathBuf,
}

/// Everything the pipeline needs to know about one library's build.
///
/// Built fresh from the workspace group + LibraryId + version catalog each
/// time it is needed; never persisted. Path derivation is a pure function
/// of name and version, so repeated derivations yield identical paths.
#[derive(Debug, Clone)]
pub struct BuildDescriptor {
    pub id: LibraryId,
    pub artifact: ArtifactCoordinate,
    /// The library's source tree root.
    pub lib_dir: PathBuf,
    pub src_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// This library's build-output directory (removed by Clean).
    pub target_dir: PathBuf,
    /// Staging area mirroring the remote repository layout.
    pub staging_dir: PathBuf,
    /// `{target_dir}/{name}-{version}.{packaging}`.
    pub artifact_path: PathBuf,
    /// `{staging_dir}/{group-as-path}/{name}/pom.xml`.
    pub descriptor_path: PathBuf,
}

impl BuildDescriptor {
    /// Derive the descriptor for `id` from the group, catalog, and paths.
    ///
    /// # Errors
    /// Returns `EngineError::Catalog` when the catalog has no version for
    /// the library, and `EngineError::Util` when the name, group, or
    /// version contains path-unsafe characters.
    pub fn derive(
        group: &str,
        id: &LibraryId,
        catalog: &VersionCatalog,
        paths: &BuildPaths,
    ) -> Result<Self, EngineError> {
        let version = catalog.version_of(id.as_str())?;
        validate_part(group)?;
        validate_part(id.as_str())?;
        validate_part(version)?;

        let artifact = ArtifactCoordinate::new(Coordinate::new(group, id.as_str()), version);
        let lib_dir = paths.libs_root.join(id.as_str());
        let target_dir = paths.target_root.join(id.as_str());
        let staging_dir = target_dir.join("staging");
        let artifact_path = target_dir.join(artifact.filename());
        let descriptor_path = descriptor_path_in(&staging_dir, &artifact.coordinate);

        Ok(Self {
            id: id.clone(),
            artifact,
            src_dir: lib_dir.join("src"),
            resources_dir: lib_dir.join("resources"),
            manifest_path: lib_dir.join(MANIFEST_FILE),
            lib_dir,
            target_dir,
            staging_dir,
            artifact_path,
            descriptor_path,
        })
    }
}

/// The descriptor file's fixed nested path inside a staging directory:
/// `{staging}/{group-as-path}/{artifact}/pom.xml`.
fn descriptor_path_in(staging_dir: &Path, coordinate: &Coordinate) -> PathBuf {
    let group_path = coordinate.group_id.replace('.', "/");
    staging_dir
        .join(group_path)
        .join(&coordinate.artifact_id)
        .join("pom.xml")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn catalog() -> VersionCatalog {
        let mut versions = BTreeMap::new();
        versions.insert("acme-core".to_owned(), "1.4.0".to_owned());
        VersionCatalog::from_map(versions)
    }

    fn paths() -> BuildPaths {
        BuildPaths {
            repo_root: PathBuf::from("/repo"),
            libs_root: PathBuf::from("/repo/libs"),
            target_root: PathBuf::from("/repo/target"),
        }
    }

    #[test]
    fn derives_all_paths() {
        let descriptor = BuildDescriptor::derive(
            "com.acme",
            &LibraryId::new("acme-core"),
            &catalog(),
            &paths(),
        )
        .unwrap();

        assert_eq!(descriptor.lib_dir, Path::new("/repo/libs/acme-core"));
        assert_eq!(descriptor.src_dir, Path::new("/repo/libs/acme-core/src"));
        assert_eq!(descriptor.target_dir, Path::new("/repo/target/acme-core"));
        assert_eq!(
            descriptor.artifact_path,
            Path::new("/repo/target/acme-core/acme-core-1.4.0.tgz")
        );
        assert_eq!(
            descriptor.descriptor_path,
            Path::new("/repo/target/acme-core/staging/com/acme/acme-core/pom.xml")
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let first = BuildDescriptor::derive(
            "com.acme",
            &LibraryId::new("acme-core"),
            &catalog(),
            &paths(),
        )
        .unwrap();
        let second = BuildDescriptor::derive(
            "com.acme",
            &LibraryId::new("acme-core"),
            &catalog(),
            &paths(),
        )
        .unwrap();
        assert_eq!(first.artifact_path, second.artifact_path);
        assert_eq!(first.descriptor_path, second.descriptor_path);
    }

    #[test]
    fn missing_catalog_version_errors() {
        let result = BuildDescriptor::derive(
            "com.acme",
            &LibraryId::new("ghost-lib"),
            &catalog(),
            &paths(),
        );
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("ghost-lib"), "error was: {err}");
    }

    #[test]
    fn unsafe_version_rejected() {
        let mut versions = BTreeMap::new();
        versions.insert("acme-core".to_owned(), "../1.0".to_owned());
        let bad_catalog = VersionCatalog::from_map(versions);

        let result = BuildDescriptor::derive(
            "com.acme",
            &LibraryId::new("acme-core"),
            &bad_catalog,
            &paths(),
        );
        assert!(result.is_err());
    }
}
