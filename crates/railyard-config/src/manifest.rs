use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A per-library `railyard.toml` dependency manifest.
///
/// Dependencies are keyed by `"group:artifact"` coordinate and map to a
/// version string. The BTreeMap keeps serialization deterministic, which
/// matters for the sync step's change detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Read and parse a library's `railyard.toml`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let manifest: Manifest = toml::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(manifest)
    }

    /// Serialize this manifest and write it to `path`.
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), ManifestError> {
        let content =
            toml::to_string_pretty(self).map_err(|source| ManifestError::Serialize { source })?;
        std::fs::write(path, content).map_err(|e| ManifestError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid railyard.toml at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("cannot serialize manifest: {source}")]
    Serialize { source: toml::ser::Error },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parse_dependencies() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("railyard.toml");
        fs::write(
            &path,
            r#"
[dependencies]
"com.acme:acme-core" = "1.4.0"
"org.clojure:clojure" = "1.11.1"
"#,
        )
        .unwrap();

        let manifest = Manifest::from_path(&path).unwrap();
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(
            manifest.dependencies.get("com.acme:acme-core").unwrap(),
            "1.4.0"
        );
    }

    #[test]
    fn empty_manifest_has_no_dependencies() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("railyard.toml");
        fs::write(&path, "").unwrap();

        let manifest = Manifest::from_path(&path).unwrap();
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("railyard.toml");
        fs::write(&path, "[dependencies\n").unwrap();

        let result = Manifest::from_path(&path);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid railyard.toml"), "error was: {err}");
    }

    #[test]
    fn write_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("railyard.toml");

        let mut manifest = Manifest::default();
        manifest
            .dependencies
            .insert("com.acme:acme-core".to_owned(), "2.0.0".to_owned());
        manifest.write_to(&path).unwrap();

        let reread = Manifest::from_path(&path).unwrap();
        assert_eq!(reread, manifest);
    }
}
