//! # quire
//!
//! Word-budget chunking, chunk-level editing, and multi-document synthesis
//! for documents that are too long to hand to a language model in one go.
//!
//! ## The Problem
//!
//! A user uploads a 40-page document and asks for page 12 to be rewritten.
//! The model can't take the whole thing, and even if it could, rewriting
//! one section shouldn't touch the rest. You need to:
//!
//! - Split the document into pieces small enough to send
//! - Address pieces by a stable index so the UI can select them
//! - Send a selection (possibly from two documents) as one context block
//! - Put an edited piece back without losing or duplicating a single word
//!
//! ## Chunking by Words
//!
//! A word is a maximal run of non-whitespace. A document with at most
//! `max_words` words is one chunk and keeps its formatting. A longer
//! document is cut into consecutive runs of `max_words` words:
//!
//! ```text
//! Document: 2500 words, max_words = 1000
//!
//! Chunk 0: words    0..1000   "chunk-0"
//! Chunk 1: words 1000..2000   "chunk-1"
//! Chunk 2: words 2000..2500   "chunk-2"   <- last chunk may be shorter
//! ```
//!
//! Multi-chunk content is rebuilt from its words with single spaces, so line
//! breaks inside a chunked document are not preserved. Word order and word
//! count always are.
//!
//! ## Indices Are Relative
//!
//! A chunk index means something only against the exact content and budget
//! that produced it. Nothing is cached: every operation re-chunks the
//! current content, and a document's content (never its chunk set) is the
//! system of record.
//!
//! ```text
//! content ──chunk──▶ [c0, c1, c2]
//!                         │
//!                      edit c1
//!                         ▼
//!                   [c0, c1', c2] ──reassemble──▶ "c0\n\nc1'\n\nc2"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quire::{apply_chunk_edit, resolve_chunk_content, Chunker, WordChunker};
//!
//! let text = "one two three four five six seven";
//! let chunker = WordChunker::new(3);
//! let doc = chunker.chunk(text);
//!
//! assert_eq!(doc.chunk_count, 3);
//!
//! // Select chunks in any order
//! let context = resolve_chunk_content(&doc, &[2, 0]).unwrap();
//! assert_eq!(context, "seven\n\none two three");
//!
//! // Edit one chunk, then fold it back into the document
//! let edited = apply_chunk_edit(&doc, 1, "FOUR FIVE SIX").unwrap();
//! assert_eq!(edited.reassemble(), "one two three\n\nFOUR FIVE SIX\n\nseven");
//! ```
//!
//! ## Two Documents
//!
//! ```rust
//! use quire::{synthesize, ChunkSelection, Chunker, WordChunker};
//!
//! let chunker = WordChunker::new(1);
//! let a = chunker.chunk("a0 a1");
//! let b = chunker.chunk("b0 b1 b2");
//!
//! let selection = ChunkSelection::new("compare").with_a([1]).with_b([0, 2]);
//! let context = synthesize(&a, &b, &selection).unwrap();
//!
//! assert_eq!(
//!     context,
//!     "Content from Document A:\na1\n\nContent from Document B:\nb0\n\nb2"
//! );
//! ```
//!
//! ## With Storage and a Model
//!
//! [`Workbench`] wires a [`DocumentStore`] and a [`Generator`] to the
//! functions above and turns missing documents, stale indices, and provider
//! failures into [`Error`] values. See `demos/rewrite_by_chunk.rs`.
//!
//! ## Logging
//!
//! Events are emitted through `tracing` (`debug` for chunking passes,
//! `info` for persisted edits, `warn` for lossy fallbacks). The crate never
//! installs a subscriber.

mod chunk;
mod config;
mod document;
mod error;
mod synthesis;
mod word;
mod words;
mod workflow;

pub use chunk::{Chunk, ChunkedDocument};
pub use config::{ChunkingConfig, ENV_DISPLAY_BYTES, ENV_DISPLAY_WORDS, ENV_MAX_WORDS};
pub use document::{Document, DocumentId};
pub use error::{Error, GenerateError, Result};
pub use synthesis::{
    apply_chunk_edit, reassemble, resolve_chunk_content, resolve_chunk_content_lossy,
    resolve_document_chunks, synthesis_context, synthesize, ChunkSelection, CHUNK_SEPARATOR,
};
pub use word::{chunk_document, WordChunker, DEFAULT_MAX_WORDS};
pub use words::{count_words, words, Word, Words};
pub use workflow::{DocumentStore, Generator, MemoryStore, Message, Role, Workbench};

/// A document chunking strategy.
///
/// ```rust
/// use quire::{Chunker, ChunkedDocument, WordChunker};
///
/// fn chunk_for_rewrite(chunker: &dyn Chunker, text: &str) -> ChunkedDocument {
///     chunker.chunk(text)
/// }
///
/// let doc = chunk_for_rewrite(&WordChunker::default(), "Hello world.");
/// assert_eq!(doc.chunk_count, 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Always returns at least one chunk, in index order, with
    /// `chunk_count == chunks.len()`.
    fn chunk(&self, text: &str) -> ChunkedDocument;

    /// The number of chunks a text with `word_count` words produces.
    fn estimate_chunks(&self, word_count: usize) -> usize {
        // Upper bound for any word-aligned strategy
        word_count.max(1)
    }
}
