//! Error types for quire.

use crate::DocumentId;

/// Errors that can occur while chunking, resolving, or editing documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid word budget (must be > 0).
    #[error("invalid word budget: {0} (must be > 0)")]
    InvalidWordBudget(usize),

    /// A chunk index that does not exist in the chunking pass it was resolved against.
    ///
    /// Usually means the index is stale: it was produced against older content
    /// or a different word budget.
    #[error("chunk index {index} out of range (document has {chunk_count} chunks)")]
    ChunkIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of chunks in the pass.
        chunk_count: usize,
    },

    /// A synthesis request that selects no chunks from either document.
    #[error("synthesis selection is empty")]
    EmptySelection,

    /// The document store has no document with this id.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// The stored document changed after the snapshot an edit was made against.
    ///
    /// Nothing was written; re-read the document and retry.
    #[error("document {0} changed since it was read")]
    StaleSnapshot(DocumentId),

    /// The text generator failed.
    #[error(transparent)]
    Generation(#[from] GenerateError),
}

/// A failure reported by a [`Generator`](crate::Generator) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generation failed: {message}")]
pub struct GenerateError {
    /// The provider's error message.
    pub message: String,
}

impl GenerateError {
    /// Create a generation error from a provider message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for quire operations.
pub type Result<T> = std::result::Result<T, Error>;
