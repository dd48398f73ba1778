//! The process-wide version catalog.
//!
//! One file maps every library name to its version. The catalog is loaded
//! exactly once per process through [`init`] and frozen afterward; there is
//! no mutation API. Code that needs a catalog takes `&VersionCatalog`, so
//! tests construct instances directly without touching the global.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

static CATALOG: OnceLock<VersionCatalog> = OnceLock::new();

/// Mapping from library name to version string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionCatalog {
    #[serde(default)]
    versions: BTreeMap<String, String>,
}

impl VersionCatalog {
    /// Build a catalog from an in-memory mapping.
    pub fn from_map(versions: BTreeMap<String, String>) -> Self {
        Self { versions }
    }

    /// Read and parse a version catalog file (`[versions]` table).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog: VersionCatalog =
            toml::from_str(&content).map_err(|e| CatalogError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(catalog)
    }

    /// Look up a library's version, if the catalog has one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// Look up a library's version, erroring when absent.
    ///
    /// # Errors
    /// Returns `CatalogError::MissingVersion` if the catalog has no entry.
    pub fn version_of(&self, name: &str) -> Result<&str, CatalogError> {
        self.get(name).ok_or_else(|| CatalogError::MissingVersion {
            name: name.to_owned(),
        })
    }

    /// `true` when the catalog has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }
}

/// Load the process-wide catalog from `path`. Must be called exactly once.
///
/// # Errors
/// Returns an error if the file cannot be loaded or the catalog was already
/// initialized.
pub fn init(path: &Path) -> Result<&'static VersionCatalog, CatalogError> {
    let catalog = VersionCatalog::from_path(path)?;
    CATALOG
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyInitialized)?;
    global().ok_or(CatalogError::AlreadyInitialized)
}

/// The process-wide catalog, if [`init`] has run.
pub fn global() -> Option<&'static VersionCatalog> {
    CATALOG.get()
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid version catalog at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("no version in catalog for library \"{name}\"")]
    MissingVersion { name: String },
    #[error("version catalog already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parse_versions_table() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("versions.toml");
        fs::write(
            &path,
            "[versions]\nacme-core = \"1.4.0\"\nacme-http = \"0.9.2\"\n",
        )
        .unwrap();

        let catalog = VersionCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.get("acme-core"), Some("1.4.0"));
        assert_eq!(catalog.get("acme-http"), Some("0.9.2"));
        assert_eq!(catalog.get("ghost-lib"), None);
    }

    #[test]
    fn version_of_missing_errors() {
        let catalog = VersionCatalog::default();
        let result = catalog.version_of("ghost-lib");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("ghost-lib"), "error was: {err}");
    }

    #[test]
    fn from_map_lookup() {
        let mut versions = BTreeMap::new();
        versions.insert("acme-core".to_owned(), "1.4.0".to_owned());
        let catalog = VersionCatalog::from_map(versions);
        assert!(catalog.contains("acme-core"));
        assert_eq!(catalog.version_of("acme-core").unwrap(), "1.4.0");
    }

    #[test]
    fn malformed_catalog_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("versions.toml");
        fs::write(&path, "versions = 3\n").unwrap();

        assert!(VersionCatalog::from_path(&path).is_err());
    }
}
