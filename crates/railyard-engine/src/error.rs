//! Error types for railyard-engine.

/// Errors produced by engine operations.
///
/// Every variant is fatal for the current batch: the first error halts
/// the remaining sequence with no skip-and-continue across libraries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The libraries root cannot be enumerated.
    #[error("cannot discover libraries under {path}: {source}")]
    Discovery {
        path: String,
        source: std::io::Error,
    },

    /// A filesystem operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A utility operation failed.
    #[error("{0}")]
    Util(#[from] railyard_util::error::UtilError),

    /// A library manifest could not be read or parsed.
    #[error("{0}")]
    Manifest(#[from] railyard_config::manifest::ManifestError),

    /// The repository-level configuration could not be read or parsed.
    #[error("{0}")]
    Workspace(#[from] railyard_config::workspace::WorkspaceError),

    /// A version catalog operation failed.
    #[error("{0}")]
    Catalog(#[from] railyard_config::catalog::CatalogError),

    /// Inserting a dependency edge would close a cycle.
    #[error("{0}")]
    Cycle(#[from] railyard_graph::GraphError),

    /// A same-group dependency names an artifact with no sibling directory.
    #[error("library \"{library}\" depends on \"{coordinate}\", which shares this repository's group but is not a library here")]
    UnknownSibling { library: String, coordinate: String },

    /// Publish requested while tracked files have uncommitted changes.
    #[error("cannot publish with uncommitted changes in the working tree: {}", paths.join(", "))]
    DirtyWorkingTree { paths: Vec<String> },

    /// The version-control status provider failed.
    #[error("cannot read working tree status: {message}")]
    Status { message: String },

    /// Packaging failed.
    #[error("cannot package {path}: {message}")]
    Package { path: String, message: String },

    /// A remote deployment failed.
    #[error("cannot deploy to {url}: {message}")]
    Deploy { url: String, message: String },

    /// Publish requested but no `[repository]` is configured.
    #[error("publishing requires a [repository] section in railyard.toml")]
    NoRemote,

    /// The remote installer only makes sense for publish runs.
    #[error("--installer remote requires --publish")]
    RemoteInstallerRequiresPublish,

    /// Metadata serialization/deserialization failed.
    #[error("cannot process store metadata: {message}")]
    Metadata { message: String },
}
