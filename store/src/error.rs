//! Errors surfaced by storage backends.
//!
//! Rows are never "not found" at this layer: absent rows come back as
//! `Ok(None)` and the engine decides what absence means.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not complete a read or a commit.
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("row encoding error: {0}")]
    Serialization(String),

    /// A stored key or row violates the table layout.
    #[error("token store is corrupted: {0}")]
    Corruption(String),
}
