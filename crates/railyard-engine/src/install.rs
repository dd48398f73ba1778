//! The local artifact store.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use railyard_util::fs::{copy_into, ensure_dir, railyard_home};
use railyard_util::hash::sha256_file;

use crate::descriptor::BuildDescriptor;
use crate::error::EngineError;

/// Metadata written alongside each installed artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallMetadata {
    /// Hex-encoded SHA-256 of the installed artifact.
    pub artifact_sha256: String,
    /// Epoch-seconds timestamp of the install.
    pub installed_at: u64,
}

/// Local artifact store, keyed by `(group, name, version)` under a
/// Maven-style directory layout.
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open the store at its default location, `~/.railyard/store`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined.
    pub fn open_default() -> Result<Self, EngineError> {
        Ok(Self {
            root: railyard_home()?.join("store"),
        })
    }

    /// Open a store rooted at an explicit path.
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The directory an install of `descriptor` lands in.
    pub fn entry_dir(&self, descriptor: &BuildDescriptor) -> PathBuf {
        descriptor.artifact.store_dir(&self.root)
    }

    /// Place the artifact, its descriptor, and install metadata into the
    /// store. An existing entry for the same (name, version) is
    /// overwritten — the path derivation is idempotent, the contents are
    /// whatever was packaged last.
    ///
    /// # Errors
    /// Returns an error if any file cannot be copied or written.
    pub fn install(&self, descriptor: &BuildDescriptor) -> Result<PathBuf, EngineError> {
        let dir = self.entry_dir(descriptor);
        ensure_dir(&dir)?;

        copy_into(
            &descriptor.artifact_path,
            &dir.join(descriptor.artifact.filename()),
        )?;
        copy_into(
            &descriptor.descriptor_path,
            &dir.join(descriptor.artifact.descriptor_filename()),
        )?;

        let metadata = InstallMetadata {
            artifact_sha256: sha256_file(&descriptor.artifact_path)?,
            installed_at: epoch_seconds(),
        };
        let json = serde_json::to_vec_pretty(&metadata).map_err(|e| EngineError::Metadata {
            message: e.to_string(),
        })?;
        let metadata_path = dir.join("metadata.json");
        std::fs::write(&metadata_path, json).map_err(|source| EngineError::Io {
            path: metadata_path.display().to_string(),
            source,
        })?;

        Ok(dir)
    }
}

fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
