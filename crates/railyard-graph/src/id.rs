use std::fmt;

/// Unique name of a library within the repository.
///
/// Owned by the repository's directory layout: the id is the library's
/// directory name, immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryId(String);

impl LibraryId {
    /// Create an id from a directory name.
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The library name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LibraryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
