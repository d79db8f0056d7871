//! Chunk resolution, multi-document synthesis, and reassembly.
//!
//! Three operations sit on top of a [`ChunkedDocument`]:
//!
//! - **Resolve**: look up chunks by index, in caller order, and join them.
//! - **Synthesize**: resolve from two documents and label each side.
//! - **Edit and reassemble**: replace one chunk, then join every chunk back
//!   into the text that becomes the document's new content.
//!
//! ```text
//! Document A: [A0, A1]          selection: a = [1], b = [0, 2]
//! Document B: [B0, B1, B2]
//!
//! Content from Document A:
//! A1
//!
//! Content from Document B:
//! B0
//!
//! B2
//! ```
//!
//! Every function here is pure: inputs are borrowed, results are freshly
//! allocated, and nothing is cached between calls.

use tracing::{debug, warn};

use crate::words::count_words;
use crate::{chunk_document, Chunk, ChunkedDocument, Error, Result};

/// Separator placed between resolved or reassembled chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Join the content of the chunks at `indices`, in the order given.
///
/// Indices are not sorted or deduplicated, so a caller can reorder or
/// repeat chunks.
///
/// # Errors
///
/// Returns [`Error::ChunkIndexOutOfRange`] for the first index that does not
/// exist in `doc`. An out-of-range index usually means it was computed
/// against older content or another word budget.
///
/// ```rust
/// use quire::{resolve_chunk_content, Chunker, WordChunker};
///
/// let doc = WordChunker::new(1).chunk("zero one two");
/// assert_eq!(resolve_chunk_content(&doc, &[2, 0, 1]).unwrap(), "two\n\nzero\n\none");
/// assert!(resolve_chunk_content(&doc, &[3]).is_err());
/// ```
pub fn resolve_chunk_content(doc: &ChunkedDocument, indices: &[usize]) -> Result<String> {
    let parts = indices
        .iter()
        .map(|&index| {
            doc.get(index)
                .map(|chunk| chunk.content.as_str())
                .ok_or(Error::ChunkIndexOutOfRange {
                    index,
                    chunk_count: doc.chunk_count,
                })
        })
        .collect::<Result<Vec<&str>>>()?;

    debug!(requested = indices.len(), "resolved chunk content");
    Ok(parts.join(CHUNK_SEPARATOR))
}

/// Like [`resolve_chunk_content`], but a missing index resolves to `""`.
///
/// The empty slot is still joined, so `[0, 9]` on a one-chunk document gives
/// `"<chunk 0>\n\n"`. Each miss is logged at `warn`.
pub fn resolve_chunk_content_lossy(doc: &ChunkedDocument, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&index| match doc.get(index) {
            Some(chunk) => chunk.content.as_str(),
            None => {
                warn!(
                    index,
                    chunk_count = doc.chunk_count,
                    "chunk index out of range, resolving to empty"
                );
                ""
            }
        })
        .collect::<Vec<&str>>()
        .join(CHUNK_SEPARATOR)
}

/// Re-chunk `content` with `max_words` and resolve `indices` against it.
///
/// # Errors
///
/// [`Error::InvalidWordBudget`] for a zero budget, otherwise as
/// [`resolve_chunk_content`].
pub fn resolve_document_chunks(
    content: &str,
    indices: &[usize],
    max_words: usize,
) -> Result<String> {
    let doc = chunk_document(content, max_words)?;
    resolve_chunk_content(&doc, indices)
}

/// Which chunks of documents A and B a synthesis request draws on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ChunkSelection {
    /// Indices into document A, in the order they should appear.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chunk_a_indexes: Vec<usize>,
    /// Indices into document B, in the order they should appear.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chunk_b_indexes: Vec<usize>,
    /// What to do with the selected content.
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: String,
}

impl ChunkSelection {
    /// A selection with instructions and no chunks.
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            ..Self::default()
        }
    }

    /// Set the indices drawn from document A.
    #[must_use]
    pub fn with_a(mut self, indices: impl Into<Vec<usize>>) -> Self {
        self.chunk_a_indexes = indices.into();
        self
    }

    /// Set the indices drawn from document B.
    #[must_use]
    pub fn with_b(mut self, indices: impl Into<Vec<usize>>) -> Self {
        self.chunk_b_indexes = indices.into();
        self
    }

    /// Whether neither side selects a chunk.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunk_a_indexes.is_empty() && self.chunk_b_indexes.is_empty()
    }
}

fn labeled(label: &str, content: &str) -> String {
    format!("Content from Document {label}:\n{content}")
}

/// The labeled context block for two resolved payloads.
///
/// ```rust
/// assert_eq!(
///     quire::synthesis_context("a", "b"),
///     "Content from Document A:\na\n\nContent from Document B:\nb"
/// );
/// ```
pub fn synthesis_context(a: &str, b: &str) -> String {
    format!("{}{CHUNK_SEPARATOR}{}", labeled("A", a), labeled("B", b))
}

/// Resolve a selection against two chunked documents into one context block.
///
/// With chunks selected on both sides the result is exactly
/// [`synthesis_context`]: `"Content from Document A:\n<A>\n\nContent from
/// Document B:\n<B>"`. When only one side selects chunks, this departs from
/// that two-label format on purpose: only the selected side's labeled
/// section is produced, with no empty section for the other document.
///
/// ```rust
/// use quire::{synthesize, ChunkSelection, Chunker, WordChunker};
///
/// let a = WordChunker::new(1).chunk("a0 a1");
/// let b = WordChunker::new(1).chunk("b0");
///
/// let only_a = ChunkSelection::new("summarize").with_a([1]);
/// assert_eq!(synthesize(&a, &b, &only_a).unwrap(), "Content from Document A:\na1");
/// ```
///
/// # Errors
///
/// [`Error::EmptySelection`] when no chunk is selected on either side, and
/// [`Error::ChunkIndexOutOfRange`] for a missing index on either side.
pub fn synthesize(
    doc_a: &ChunkedDocument,
    doc_b: &ChunkedDocument,
    selection: &ChunkSelection,
) -> Result<String> {
    let a = &selection.chunk_a_indexes;
    let b = &selection.chunk_b_indexes;

    match (a.is_empty(), b.is_empty()) {
        (true, true) => Err(Error::EmptySelection),
        (false, true) => Ok(labeled("A", &resolve_chunk_content(doc_a, a)?)),
        (true, false) => Ok(labeled("B", &resolve_chunk_content(doc_b, b)?)),
        (false, false) => Ok(synthesis_context(
            &resolve_chunk_content(doc_a, a)?,
            &resolve_chunk_content(doc_b, b)?,
        )),
    }
}

/// Replace the content of chunk `index`, returning a new chunked document.
///
/// The edited chunk's word count is recomputed and it is marked modified.
/// All other chunks are copied unchanged and `doc` itself is untouched.
/// The result is not durable until it is [reassembled](reassemble) into the
/// parent document's content.
///
/// # Errors
///
/// Returns [`Error::ChunkIndexOutOfRange`] if `index` does not exist.
pub fn apply_chunk_edit(
    doc: &ChunkedDocument,
    index: usize,
    new_content: impl Into<String>,
) -> Result<ChunkedDocument> {
    let out_of_range = Error::ChunkIndexOutOfRange {
        index,
        chunk_count: doc.chunk_count,
    };
    let mut chunks = doc.chunks.clone();
    let chunk = chunks.get_mut(index).ok_or(out_of_range)?;

    let new_content = new_content.into();
    chunk.word_count = count_words(&new_content);
    chunk.content = new_content;
    chunk.is_modified = true;

    debug!(index, words = chunk.word_count, "applied chunk edit");

    Ok(ChunkedDocument {
        original_content: doc.original_content.clone(),
        chunks,
        total_word_count: doc.total_word_count,
        chunk_count: doc.chunk_count,
    })
}

/// Join every chunk's current content, in order, with a blank line.
///
/// Empty chunks keep their slot. The result is what a document's content
/// becomes after a chunk-level edit.
///
/// ```rust
/// use quire::{apply_chunk_edit, reassemble, Chunker, WordChunker};
///
/// let doc = WordChunker::new(2).chunk("a b c d e");
/// let edited = apply_chunk_edit(&doc, 1, "C D!").unwrap();
/// assert_eq!(reassemble(&edited.chunks), "a b\n\nC D!\n\ne");
/// ```
pub fn reassemble(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<&str>>()
        .join(CHUNK_SEPARATOR)
}
