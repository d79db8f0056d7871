//! The Chunk type and the chunker's output envelope.

use unicode_segmentation::UnicodeSegmentation;

/// A word-bounded slice of a document, computed on demand.
///
/// A chunk's `chunk_index` is only meaningful relative to the
/// `(content, word budget)` pair that produced it. Re-chunking with a
/// different budget, or after the content changed, invalidates old indices.
///
/// ## Byte Spans
///
/// `start` and `end` are byte offsets of the chunk's first and last source
/// word in the content that was chunked:
///
/// ```rust
/// use quire::{Chunker, WordChunker};
///
/// let text = "one two three four five";
/// let doc = WordChunker::new(2).chunk(text);
///
/// assert_eq!(&text[doc.chunks[1].span()], "three four");
/// ```
///
/// Spans record where a chunk came from. They are not updated when a chunk
/// is edited, and multi-chunk content is whitespace-normalized, so
/// `content` and `&text[span]` agree only word for word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Chunk {
    /// Stable id derived from the index (`"chunk-{index}"`).
    pub id: String,
    /// Zero-based position in the chunking pass.
    pub chunk_index: usize,
    /// The chunk text.
    pub content: String,
    /// Number of words in `content`.
    pub word_count: usize,
    /// Set once an edit has been applied. Never cleared.
    pub is_modified: bool,
    /// Transient UI flag. Has no effect on content.
    pub is_editing: bool,
    /// Byte offset of the first source word.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: usize,
    /// Byte offset one past the last source word.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: usize,
}

impl Chunk {
    /// Create an unmodified chunk.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        chunk_index: usize,
        word_count: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            id: Self::id_for(chunk_index),
            chunk_index,
            content: content.into(),
            word_count,
            is_modified: false,
            is_editing: false,
            start,
            end,
        }
    }

    /// The id a chunk at `chunk_index` carries.
    #[must_use]
    pub fn id_for(chunk_index: usize) -> String {
        format!("chunk-{chunk_index}")
    }

    /// Whether the chunk has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The byte span of the source words in the chunked content.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// The first `max_graphemes` grapheme clusters of the content, with an
    /// ellipsis when truncated.
    ///
    /// ```rust
    /// use quire::Chunk;
    ///
    /// let chunk = Chunk::new("héllo wörld", 0, 2, 0, 13);
    /// assert_eq!(chunk.preview(5), "héllo…");
    /// assert_eq!(chunk.preview(50), "héllo wörld");
    /// ```
    #[must_use]
    pub fn preview(&self, max_graphemes: usize) -> String {
        let mut graphemes = self.content.graphemes(true);
        let head: String = graphemes.by_ref().take(max_graphemes).collect();
        if graphemes.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, words: {}, modified: {}, text: {:?} }}",
            self.chunk_index,
            self.word_count,
            self.is_modified,
            self.preview(32)
        )
    }
}

/// The result of one chunking pass over a document's content.
///
/// The chunk set is a derived view. The document's content stays the system
/// of record; edits become durable only by reassembling and replacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ChunkedDocument {
    /// The content that was chunked, untouched.
    pub original_content: String,
    /// Chunks in index order.
    pub chunks: Vec<Chunk>,
    /// Words in `original_content`.
    pub total_word_count: usize,
    /// `chunks.len()`.
    pub chunk_count: usize,
}

impl ChunkedDocument {
    /// Wrap a chunk list produced from `original_content`.
    #[must_use]
    pub fn new(
        original_content: impl Into<String>,
        chunks: Vec<Chunk>,
        total_word_count: usize,
    ) -> Self {
        let chunk_count = chunks.len();
        Self {
            original_content: original_content.into(),
            chunks,
            total_word_count,
            chunk_count,
        }
    }

    /// The chunk at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Iterate over chunks in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Whether the pass split the content into more than one chunk.
    #[must_use]
    pub fn is_chunked(&self) -> bool {
        self.chunk_count > 1
    }

    /// Whether any chunk has been edited.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.chunks.iter().any(|c| c.is_modified)
    }

    /// Toggle the transient editing flag on one chunk.
    ///
    /// Returns `false` when `index` does not exist.
    pub fn set_editing(&mut self, index: usize, editing: bool) -> bool {
        match self.chunks.get_mut(index) {
            Some(chunk) => {
                chunk.is_editing = editing;
                true
            }
            None => false,
        }
    }

    /// Join all chunks' current content in index order.
    ///
    /// See [`reassemble`](crate::reassemble).
    #[must_use]
    pub fn reassemble(&self) -> String {
        crate::reassemble(&self.chunks)
    }
}

impl<'a> IntoIterator for &'a ChunkedDocument {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_derives_from_index() {
        let chunk = Chunk::new("a b", 7, 2, 0, 3);
        assert_eq!(chunk.id, "chunk-7");
        assert!(!chunk.is_modified);
        assert!(!chunk.is_editing);
    }

    #[test]
    fn test_preview_keeps_graphemes_whole() {
        // "e" + combining acute is one grapheme
        let chunk = Chunk::new("e\u{301}tude", 0, 1, 0, 7);
        assert_eq!(chunk.preview(1), "e\u{301}…");
    }

    #[test]
    fn test_set_editing() {
        let mut doc = ChunkedDocument::new("x", vec![Chunk::new("x", 0, 1, 0, 1)], 1);
        assert!(doc.set_editing(0, true));
        assert!(doc.chunks[0].is_editing);
        assert!(!doc.is_modified());
        assert!(!doc.set_editing(3, true));
    }

    #[test]
    fn test_display_mentions_index() {
        let chunk = Chunk::new("hello", 2, 1, 0, 5);
        let shown = chunk.to_string();
        assert!(shown.contains("index: 2"), "{shown}");
    }
}
