use std::path::PathBuf;

/// The primary error type for all operations in the `tarpack` crate.
#[derive(Debug)]
pub enum ArchiveError {
    /// An I/O error from the filesystem, the tar container or a compression
    /// codec. Includes the path where the error happened, when one is known.
    Io { source: std::io::Error, path: PathBuf },

    /// The root prefix could not be stripped from a walked path while
    /// packing a directory.
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// A compression name that does not map to any supported codec.
    UnknownCompression(String),
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::Io { source, path } if path.as_os_str().is_empty() => {
                write!(f, "I/O error: {}", source)
            }
            ArchiveError::Io { source, path } => {
                write!(f, "I/O error on path '{}': {}", path.display(), source)
            }
            ArchiveError::StripPrefix { prefix, path } => {
                write!(f, "Could not strip prefix '{}' from path '{}'", prefix.display(), path.display())
            }
            ArchiveError::UnknownCompression(name) => write!(f, "Unknown compression '{}'", name),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Generic IO error conversion that doesn't require a path
impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Io { source: err, path: PathBuf::new() }
    }
}
