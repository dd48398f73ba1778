//! Filesystem utilities for Railyard.

use std::path::{Path, PathBuf};

use crate::error::UtilError;

/// Create a directory and all parent directories if they do not exist.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<(), UtilError> {
    std::fs::create_dir_all(path).map_err(|source| UtilError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Place `src` at `dest`, preferring a hard link for speed.
///
/// Creates `dest`'s parent directories, removes any existing file at
/// `dest`, and falls back to a regular copy if hard linking fails
/// (e.g. cross-device).
///
/// # Errors
/// Returns an error if both hard linking and copying fail.
pub fn copy_into(src: &Path, dest: &Path) -> Result<(), UtilError> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }

    if dest.exists() {
        std::fs::remove_file(dest).map_err(|source| UtilError::Io {
            path: dest.display().to_string(),
            source,
        })?;
    }

    if std::fs::hard_link(src, dest).is_err() {
        std::fs::copy(src, dest).map_err(|source| UtilError::Io {
            path: dest.display().to_string(),
            source,
        })?;
    }

    Ok(())
}

/// Remove a directory and all its contents. No error if the directory is absent.
///
/// # Errors
/// Returns an error if the directory exists but cannot be removed.
pub fn remove_dir_if_present(path: &Path) -> Result<(), UtilError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(UtilError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Return the Railyard home directory (`~/.railyard`).
///
/// Resolves via `HOME` (Unix) or `USERPROFILE` (Windows).
///
/// # Errors
/// Returns `UtilError::NoHomeDir` if neither environment variable is set.
pub fn railyard_home() -> Result<PathBuf, UtilError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| UtilError::NoHomeDir)?;
    Ok(home.join(".railyard"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b").join("c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_dir_existing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_dir(tmp.path()).unwrap();
    }

    #[test]
    fn copy_into_places_content() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.tgz");
        let dest = tmp.path().join("store").join("dest.tgz");
        fs::write(&src, b"artifact").unwrap();

        copy_into(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"artifact");
    }

    #[test]
    fn copy_into_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.tgz");
        let dest = tmp.path().join("dest.tgz");
        fs::write(&src, b"new").unwrap();
        fs::write(&dest, b"old").unwrap();

        copy_into(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn remove_dir_if_present_removes() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("target");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("out.tgz"), b"x").unwrap();

        remove_dir_if_present(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn remove_dir_if_present_absent_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        remove_dir_if_present(&tmp.path().join("nonexistent")).unwrap();
    }
}
