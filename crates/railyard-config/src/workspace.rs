use serde::{Deserialize, Serialize};
use std::path::Path;

/// The repository-level `railyard.toml` configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub workspace: Workspace,
    /// Remote repository for publishing. Optional: repositories that never
    /// publish need no remote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Shared Maven group identifier, e.g. `"com.acme"`. Dependencies with
    /// this group are siblings; everything else is external.
    pub group: String,
    /// Directory holding one subdirectory per library.
    #[serde(default = "default_libraries")]
    pub libraries: String,
    /// Version catalog file, relative to the repository root.
    #[serde(default = "default_catalog")]
    pub catalog: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Base URL of the remote artifact repository.
    pub url: String,
}

fn default_libraries() -> String {
    "libs".to_owned()
}

fn default_catalog() -> String {
    "versions.toml".to_owned()
}

impl WorkspaceConfig {
    /// Read and parse a repository-level `railyard.toml`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_path(path: &Path) -> Result<Self, WorkspaceError> {
        let content = std::fs::read_to_string(path).map_err(|e| WorkspaceError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: WorkspaceConfig =
            toml::from_str(&content).map_err(|e| WorkspaceError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
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
}
