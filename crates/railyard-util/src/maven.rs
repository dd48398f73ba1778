//! Maven-flavored coordinates and artifact path derivation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::UtilError;

/// Default packaging type for repository artifacts.
pub const DEFAULT_PACKAGING: &str = "tgz";

/// Validate that a coordinate part is safe for filesystem paths and URLs.
///
/// Allows only `[a-zA-Z0-9._-]`. Must be non-empty.
///
/// # Errors
/// Returns `UtilError::InvalidPart` if the string is empty or contains
/// characters outside the allowed set.
pub fn validate_part(part: &str) -> Result<(), UtilError> {
    if part.is_empty()
        || !part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(UtilError::InvalidPart {
            part: part.to_owned(),
        });
    }
    Ok(())
}

/// A two-part Maven coordinate: `group:artifact`.
///
/// The group identifier is the owner tag: dependencies whose group equals
/// the repository's shared group are siblings, everything else is external.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Group identifier, e.g. `"com.acme"`.
    pub group_id: String,
    /// Artifact identifier, e.g. `"acme-core"`.
    pub artifact_id: String,
}

impl Coordinate {
    /// Create a coordinate from already-validated parts.
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_owned(),
            artifact_id: artifact_id.to_owned(),
        }
    }

    /// Parse a `"group:artifact"` coordinate string.
    ///
    /// # Errors
    /// Returns `UtilError::InvalidCoordinate` when the string does not have
    /// exactly 2 colon-separated parts, or any part is empty.
    pub fn parse(coord: &str) -> Result<Self, UtilError> {
        let parts: Vec<&str> = coord.split(':').collect();

        if parts.len() != 2 {
            return Err(UtilError::InvalidCoordinate {
                coordinate: coord.to_owned(),
                reason: format!(
                    "expected exactly 2 colon-separated parts (group:artifact), got {}",
                    parts.len()
                ),
            });
        }

        let (Some(group), Some(artifact)) = (parts.first(), parts.get(1)) else {
            // Unreachable: len checked above.
            return Err(UtilError::InvalidCoordinate {
                coordinate: coord.to_owned(),
                reason: "expected 2 parts".to_owned(),
            });
        };

        for (label, part) in [("group", *group), ("artifact", *artifact)] {
            if part.is_empty() {
                return Err(UtilError::InvalidCoordinate {
                    coordinate: coord.to_owned(),
                    reason: format!("{label} is empty"),
                });
            }
        }

        Ok(Self::new(group, artifact))
    }

    /// `true` when this coordinate's group equals `group` — the intra-repo
    /// sibling predicate.
    pub fn is_owned_by(&self, group: &str) -> bool {
        self.group_id == group
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A coordinate plus version and packaging — enough to derive every path
/// and URL an artifact lives at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinate {
    pub coordinate: Coordinate,
    /// Artifact version, e.g. `"1.4.0"`.
    pub version: String,
    /// File extension / packaging type.
    pub packaging: String,
}

impl ArtifactCoordinate {
    /// Create a new artifact coordinate with the default packaging.
    pub fn new(coordinate: Coordinate, version: &str) -> Self {
        Self {
            coordinate,
            version: version.to_owned(),
            packaging: DEFAULT_PACKAGING.to_owned(),
        }
    }

    /// Builder method to override the packaging type.
    pub fn with_packaging(mut self, packaging: &str) -> Self {
        self.packaging = packaging.to_owned();
        self
    }

    /// The artifact filename: `"{artifact}-{version}.{packaging}"`.
    pub fn filename(&self) -> String {
        format!(
            "{}-{}.{}",
            self.coordinate.artifact_id, self.version, self.packaging
        )
    }

    /// The descriptor filename: `"{artifact}-{version}.pom"`.
    pub fn descriptor_filename(&self) -> String {
        format!("{}-{}.pom", self.coordinate.artifact_id, self.version)
    }

    /// The repository-relative directory for this artifact's version.
    ///
    /// Dots in the group are replaced with `/`:
    /// `"{group_path}/{artifact}/{version}"`.
    pub fn repository_dir(&self) -> String {
        let group_path = self.coordinate.group_id.replace('.', "/");
        format!(
            "{}/{}/{}",
            group_path, self.coordinate.artifact_id, self.version
        )
    }

    /// The local store directory for this artifact, rooted at `store_root`.
    pub fn store_dir(&self, store_root: &Path) -> PathBuf {
        let group_path = self.coordinate.group_id.replace('.', "/");
        store_root
            .join(group_path)
            .join(&self.coordinate.artifact_id)
            .join(&self.version)
    }

    /// Build the full deploy URL for a file of this artifact version.
    ///
    /// Strips any trailing `/` from `repository` before appending the path.
    pub fn deploy_url(&self, repository: &str, file_name: &str) -> String {
        let base = repository.trim_end_matches('/');
        format!("{}/{}/{}", base, self.repository_dir(), file_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn parse_two_part() {
        let coord = Coordinate::parse("com.acme:acme-core").unwrap();
        assert_eq!(coord.group_id, "com.acme");
        assert_eq!(coord.artifact_id, "acme-core");
    }

    #[test]
    fn parse_rejects_one_part() {
        let result = Coordinate::parse("acme-core");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid coordinate"), "error was: {err}");
    }

    #[test]
    fn parse_rejects_three_parts() {
        let result = Coordinate::parse("com.acme:acme-core:1.0.0");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid coordinate"), "error was: {err}");
    }

    #[test]
    fn parse_rejects_empty_parts() {
        let result = Coordinate::parse("com.acme:");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("empty"), "error was: {err}");
    }

    #[test]
    fn owned_by_compares_group() {
        let coord = Coordinate::parse("com.acme:acme-core").unwrap();
        assert!(coord.is_owned_by("com.acme"));
        assert!(!coord.is_owned_by("org.clojure"));
    }

    #[test]
    fn display_round_trips() {
        let coord = Coordinate::parse("com.acme:acme-core").unwrap();
        assert_eq!(coord.to_string(), "com.acme:acme-core");
    }

    #[test]
    fn filename_default_packaging() {
        let art = ArtifactCoordinate::new(Coordinate::new("com.acme", "acme-core"), "1.4.0");
        assert_eq!(art.filename(), "acme-core-1.4.0.tgz");
        assert_eq!(art.descriptor_filename(), "acme-core-1.4.0.pom");
    }

    #[test]
    fn filename_custom_packaging() {
        let art = ArtifactCoordinate::new(Coordinate::new("com.acme", "acme-core"), "1.4.0")
            .with_packaging("jar");
        assert_eq!(art.filename(), "acme-core-1.4.0.jar");
    }

    #[test]
    fn repository_dir_dots_to_slashes() {
        let art = ArtifactCoordinate::new(Coordinate::new("com.acme.tools", "acme-core"), "1.4.0");
        assert_eq!(art.repository_dir(), "com/acme/tools/acme-core/1.4.0");
    }

    #[test]
    fn store_dir_layout() {
        let art = ArtifactCoordinate::new(Coordinate::new("com.acme", "acme-core"), "1.4.0");
        let dir = art.store_dir(Path::new("/home/user/.railyard/store"));
        assert_eq!(
            dir,
            Path::new("/home/user/.railyard/store/com/acme/acme-core/1.4.0")
        );
    }

    #[test]
    fn deploy_url_strips_trailing_slash() {
        let art = ArtifactCoordinate::new(Coordinate::new("com.acme", "acme-core"), "1.4.0");
        let url1 = art.deploy_url("https://repo.acme.com/releases", &art.filename());
        let url2 = art.deploy_url("https://repo.acme.com/releases/", &art.filename());
        assert_eq!(url1, url2);
        assert_eq!(
            url1,
            "https://repo.acme.com/releases/com/acme/acme-core/1.4.0/acme-core-1.4.0.tgz"
        );
    }

    #[test]
    fn validate_part_accepts_safe() {
        assert!(validate_part("1.23.7").is_ok());
        assert!(validate_part("acme-core").is_ok());
        assert!(validate_part("2.0.0-RC1").is_ok());
    }

    #[test]
    fn validate_part_rejects_unsafe() {
        assert!(validate_part("").is_err());
        assert!(validate_part("../../etc").is_err());
        assert!(validate_part("1.0; rm -rf /").is_err());
        assert!(validate_part("a b").is_err());
    }
}
