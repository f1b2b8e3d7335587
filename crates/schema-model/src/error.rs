use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or adapting a schema source.
///
/// All of these are fatal for a whole generation batch: without a usable
/// schema model there is no per-field work to isolate.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema source found: expected {} or {}", .sdl.display(), .introspection.display())]
    MissingSource {
        sdl: PathBuf,
        introspection: PathBuf,
    },

    #[error("failed to parse schema text: {message}")]
    UnparseableSdl { message: String },

    #[error("invalid introspection document: {0}")]
    InvalidIntrospection(String),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
