//! Error types for railyard-util.

/// Errors produced by utility functions.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// An I/O operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A command failed to execute.
    #[error("cannot execute command: {source}")]
    CommandExec { source: std::io::Error },

    /// A Maven coordinate string is malformed.
    #[error("invalid coordinate \"{coordinate}\": {reason}")]
    InvalidCoordinate { coordinate: String, reason: String },

    /// A coordinate part contains characters unsafe for paths or URLs.
    #[error("invalid coordinate part \"{part}\": only alphanumeric characters, dots, hyphens, and underscores are allowed")]
    InvalidPart { part: String },

    /// Cannot determine the user's home directory.
    #[error("cannot determine home directory — set the HOME environment variable")]
    NoHomeDir,
}
