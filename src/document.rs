//! Documents: the system of record that chunk sets are derived from.

use uuid::Uuid;

use crate::words::count_words;
use crate::{apply_chunk_edit, ChunkedDocument, Chunker, ChunkingConfig, Result, WordChunker};

/// Identifier of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A named document and its full text.
///
/// `content` is authoritative. `size` and `word_count` are derived from it
/// and recomputed on every replacement; chunk sets are recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Document {
    /// Stable identifier.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    content: String,
    size: usize,
    word_count: usize,
}

impl Document {
    /// Create a document with a fresh id.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(DocumentId::new(), name, content)
    }

    /// Create a document with a known id.
    pub fn with_id(id: DocumentId, name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id,
            name: name.into(),
            size: content.len(),
            word_count: count_words(&content),
            content,
        }
    }

    /// The full text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size of the content in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Words in the content.
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Whether `chunker` would split this document into more than one chunk.
    #[must_use]
    pub fn is_chunked(&self, chunker: &WordChunker) -> bool {
        self.word_count > chunker.max_words()
    }

    /// How many chunks `chunker` would produce.
    #[must_use]
    pub fn chunk_count(&self, chunker: &WordChunker) -> usize {
        chunker.estimate_chunks(self.word_count)
    }

    /// Whether the document is large enough to need virtualized rendering.
    ///
    /// Independent of the rewrite budget.
    #[must_use]
    pub fn needs_virtualization(&self, config: &ChunkingConfig) -> bool {
        self.word_count > config.display_word_threshold || self.size > config.display_byte_threshold
    }

    /// Chunk the current content.
    #[must_use]
    pub fn chunks(&self, chunker: &dyn Chunker) -> ChunkedDocument {
        chunker.chunk(&self.content)
    }

    /// Replace the content wholesale.
    pub fn replace_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.size = content.len();
        self.word_count = count_words(&content);
        self.content = content;
    }

    /// Edit one chunk and write the reassembled text back as the content.
    ///
    /// The content is re-chunked first, so `index` refers to the current
    /// content under `chunker`. Returns the edited chunk set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChunkIndexOutOfRange`](crate::Error::ChunkIndexOutOfRange)
    /// if `index` does not exist; the content is left unchanged.
    pub fn apply_chunk_edit(
        &mut self,
        chunker: &dyn Chunker,
        index: usize,
        new_content: impl Into<String>,
    ) -> Result<ChunkedDocument> {
        let edited = apply_chunk_edit(&self.chunks(chunker), index, new_content)?;
        self.replace_content(edited.reassemble());
        Ok(edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields() {
        let doc = Document::new("notes.txt", "héllo  world\n");
        assert_eq!(doc.size(), 14);
        assert_eq!(doc.word_count(), 2);
        assert_eq!(doc.content(), "héllo  world\n");
    }

    #[test]
    fn test_chunk_flags() {
        let chunker = WordChunker::new(3);
        let small = Document::new("a", "one two three");
        let large = Document::new("b", "one two three four five six seven");

        assert!(!small.is_chunked(&chunker));
        assert_eq!(small.chunk_count(&chunker), 1);
        assert!(large.is_chunked(&chunker));
        assert_eq!(large.chunk_count(&chunker), 3);
        assert_eq!(large.chunks(&chunker).chunk_count, 3);
    }

    #[test]
    fn test_needs_virtualization() {
        let config = ChunkingConfig::default().with_display_thresholds(3, 1000);
        assert!(!Document::new("a", "one two three").needs_virtualization(&config));
        assert!(Document::new("b", "one two three four").needs_virtualization(&config));
        assert!(Document::new("c", "x".repeat(1001)).needs_virtualization(&config));
    }

    #[test]
    fn test_chunk_edit_becomes_content() {
        let chunker = WordChunker::new(2);
        let mut doc = Document::new("d", "a b\nc d e");
        let edited = doc.apply_chunk_edit(&chunker, 1, "C D X Y").unwrap();

        assert!(edited.chunks[1].is_modified);
        assert_eq!(doc.content(), "a b\n\nC D X Y\n\ne");
        assert_eq!(doc.word_count(), 7);
    }

    #[test]
    fn test_failed_edit_leaves_content() {
        let chunker = WordChunker::new(2);
        let mut doc = Document::new("d", "a b c");
        assert!(doc.apply_chunk_edit(&chunker, 4, "x").is_err());
        assert_eq!(doc.content(), "a b c");
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }
}
