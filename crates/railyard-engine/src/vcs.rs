//! Working-tree status: the pre-publish gate's data source.

use std::path::{Path, PathBuf};
use std::process::Command;

use railyard_util::process::run_command;

use crate::error::EngineError;

/// The porcelain status code marking an untracked file.
pub const UNTRACKED: &str = "??";

/// One `(statusCode, path)` pair from the working-tree snapshot.
///
/// The code is the two-character porcelain convention: first char is the
/// staged state, second the unstaged state. The gate filters on this exact
/// fixed-width contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: String,
    pub path: String,
}

impl StatusEntry {
    /// `true` for files the repository does not track. Untracked files are
    /// exempt from the publish gate.
    pub fn is_untracked(&self) -> bool {
        self.code == UNTRACKED
    }
}

/// Source of working-tree status snapshots.
///
/// A snapshot is requested anew for every gate check — implementations
/// must not cache.
pub trait StatusProvider {
    /// Take a fresh snapshot of the working tree.
    ///
    /// # Errors
    /// Returns an error if the status source is unavailable.
    fn status(&self) -> Result<Vec<StatusEntry>, EngineError>;
}

/// Status provider shelling out to `git status --porcelain`.
#[derive(Debug)]
pub struct GitStatus {
    repo_root: PathBuf,
}

impl GitStatus {
    pub fn new(repo_root: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
        }
    }
}

impl StatusProvider for GitStatus {
    fn status(&self) -> Result<Vec<StatusEntry>, EngineError> {
        let output = run_command(
            Command::new("git")
                .arg("-C")
                .arg(&self.repo_root)
                .args(["status", "--porcelain"]),
        )?;
        if !output.success {
            return Err(EngineError::Status {
                message: output.stderr.trim().to_owned(),
            });
        }
        Ok(output.lines().filter_map(parse_porcelain_line).collect())
    }
}

/// Parse one `git status --porcelain` line: two status characters, one
/// separator space, then the path. Lines too short to carry all three are
/// discarded.
fn parse_porcelain_line(line: &str) -> Option<StatusEntry> {
    let code = line.get(..2)?;
    let path = line.get(3..)?;
    if path.is_empty() {
        return None;
    }
    Some(StatusEntry {
        code: code.to_owned(),
        path: path.to_owned(),
    })
}
