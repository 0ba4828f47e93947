use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for generation runs.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Fatal failures of a generation run.
///
/// Unsupported field kinds, unclassifiable parameters and name collisions are not errors; they
/// are logged and the run continues.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Output file could not be created.
    #[error("cannot create output file {}", .path.display())]
    CreateDestination {
        /// Requested output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing the encoded document to the sink failed.
    #[error("failed to write document")]
    Write(#[source] io::Error),
    /// The document could not be encoded as JSON.
    #[error("failed to encode document")]
    Encode(#[from] serde_json::Error),
    /// A record references itself, directly or through other records.
    #[error("cyclic type reference: {}", .chain.join(" -> "))]
    CyclicType {
        /// Type names along the cycle, starting and ending with the re-entered type.
        chain: Vec<String>,
    },
}
