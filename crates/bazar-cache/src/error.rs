//! Storage errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// The storage file's directory could not be created.
    #[error("Cannot open storage at {0}")]
    Open(String),

    /// A stored value is not the JSON its reader expects.
    #[error("Stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A writer panicked while holding the in-memory store.
    #[error("Storage lock poisoned: {0}")]
    Poisoned(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
