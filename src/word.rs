//! Word-budget chunking.
//!
//! Splits a document into consecutive groups of at most `max_words` words.
//!
//! ## How It Works
//!
//! ```text
//! max_words = 4
//!
//! Document: "The quick brown fox\njumps over the lazy\n\ndog"
//! Words:    [The quick brown fox jumps over the lazy dog]   (9)
//!
//! Chunk 0: "The quick brown fox"    4 words
//! Chunk 1: "jumps over the lazy"    4 words  <- "\n" between "fox" and "jumps" is gone
//! Chunk 2: "dog"                    1 word   <- final chunk may be shorter
//! ```
//!
//! ## Two Regimes
//!
//! | Words | Chunks | Content |
//! |-------|--------|---------|
//! | `<= max_words` | 1 | `text.trim()`, formatting preserved |
//! | `> max_words` | `ceil(words / max_words)` | words joined by single spaces |
//!
//! The second regime is lossy on purpose: line breaks and whitespace runs
//! inside a multi-chunk document do not survive. Reassembly joins chunks
//! with `"\n\n"`, so a chunked-and-rejoined document keeps every word in
//! order but not its original layout. Do not "fix" one side without the
//! other.
//!
//! Empty or whitespace-only input produces one empty chunk with zero words.

use tracing::debug;

use crate::words::{words, Word};
use crate::{Chunk, ChunkedDocument, Chunker, Error, Result};

/// Budget used for rewrite chunking when the caller supplies none.
pub const DEFAULT_MAX_WORDS: usize = 1000;

/// Word-budget chunker.
///
/// ## Example
///
/// ```rust
/// use quire::{Chunker, WordChunker};
///
/// let text = vec!["word"; 2500].join(" ");
/// let doc = WordChunker::new(1000).chunk(&text);
///
/// assert_eq!(doc.chunk_count, 3);
/// assert_eq!(doc.chunks[2].word_count, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordChunker {
    max_words: usize,
}

impl WordChunker {
    /// Create a chunker with a word budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_words == 0`. Use [`WordChunker::try_new`] for
    /// caller-supplied budgets.
    #[must_use]
    pub fn new(max_words: usize) -> Self {
        assert!(max_words > 0, "max_words must be > 0");
        Self { max_words }
    }

    /// Create a chunker, rejecting a zero budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordBudget`] if `max_words == 0`.
    pub fn try_new(max_words: usize) -> Result<Self> {
        if max_words == 0 {
            return Err(Error::InvalidWordBudget(max_words));
        }
        Ok(Self { max_words })
    }

    /// The word budget.
    #[must_use]
    pub const fn max_words(&self) -> usize {
        self.max_words
    }

    fn single(text: &str, tokens: &[Word<'_>]) -> Chunk {
        let (start, end) = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0, 0),
        };
        Chunk::new(text.trim(), 0, tokens.len(), start, end)
    }

    fn joined(index: usize, group: &[Word<'_>]) -> Chunk {
        let len = group.iter().map(|w| w.text.len() + 1).sum::<usize>();
        let mut content = String::with_capacity(len);
        for (i, word) in group.iter().enumerate() {
            if i > 0 {
                content.push(' ');
            }
            content.push_str(word.text);
        }

        // group is non-empty: slice::chunks never yields an empty slice
        let start = group.first().map_or(0, |w| w.start);
        let end = group.last().map_or(start, |w| w.end);
        Chunk::new(content, index, group.len(), start, end)
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS)
    }
}

impl Chunker for WordChunker {
    fn chunk(&self, text: &str) -> ChunkedDocument {
        let tokens: Vec<Word<'_>> = words(text).collect();
        let total = tokens.len();

        let chunks = if total <= self.max_words {
            vec![Self::single(text, &tokens)]
        } else {
            tokens
                .chunks(self.max_words)
                .enumerate()
                .map(|(index, group)| Self::joined(index, group))
                .collect()
        };

        debug!(
            total_words = total,
            max_words = self.max_words,
            chunks = chunks.len(),
            "chunked document"
        );

        ChunkedDocument::new(text, chunks, total)
    }

    fn estimate_chunks(&self, word_count: usize) -> usize {
        if word_count <= self.max_words {
            1
        } else {
            word_count.div_ceil(self.max_words)
        }
    }
}

/// Chunk `content` with a caller-supplied word budget.
///
/// # Errors
///
/// Returns [`Error::InvalidWordBudget`] if `max_words == 0`. Any string
/// content is accepted.
///
/// ```rust
/// let doc = quire::chunk_document("  short\n\ntext  ", 1000).unwrap();
/// assert_eq!(doc.chunk_count, 1);
/// assert_eq!(doc.chunks[0].content, "short\n\ntext");
///
/// assert!(quire::chunk_document("text", 0).is_err());
/// ```
pub fn chunk_document(content: &str, max_words: usize) -> Result<ChunkedDocument> {
    Ok(WordChunker::try_new(max_words)?.chunk(content))
}
