use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    // Filesystem
    #[error("path not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("symlink loop at {0}")]
    SymlinkLoop(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    #[error("path escapes the filesystem root: {0}")]
    InvalidPath(String),

    // Patterns
    #[error("invalid glob pattern '{pattern}'")]
    PatternSyntax {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // Config
    #[error("invalid concurrency {0}: at least one worker is required")]
    InvalidConcurrency(usize),

    // Runtime
    #[error("worker pool failure: {0}")]
    ThreadPool(String),

    #[error("search task panicked: {0}")]
    TaskPanicked(String),
}

impl FinderError {
    /// Map an I/O error at `path`, keeping the kinds a search treats specially.
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::SymlinkLoop(p)
            | Self::InvalidPath(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether this is a plain "does not exist".
    ///
    /// Searches absorb these into an empty result instead of failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
