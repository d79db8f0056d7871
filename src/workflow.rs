//! The calling layer: stored documents, a text generator, and the
//! chunk-level operations that connect them.
//!
//! The core functions in this crate never fail on well-formed input and
//! never touch storage. [`Workbench`] is where missing documents, stale
//! indices, and generator failures become typed errors.
//!
//! ```text
//! store ──get──▶ snapshot ──chunk──▶ ChunkedDocument ──resolve──▶ context
//!   ▲                                                            │
//!   │                                                        Generator
//!   └──update_if── reassemble ◀── apply_chunk_edit ◀── text ◀────┘
//!      (snapshot)
//! ```
//!
//! Chunk sets are recomputed from the stored content on every call. An index
//! a caller obtained from [`Workbench::chunks`] stays valid only until the
//! document's content changes.
//!
//! An edit is resolved, generated, and applied against one snapshot of the
//! content. It is written back only if the stored content still equals that
//! snapshot; otherwise the write fails with [`Error::StaleSnapshot`] and the
//! newer content is kept.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, instrument};

use crate::{
    apply_chunk_edit, resolve_chunk_content, synthesize, ChunkSelection, ChunkedDocument,
    ChunkingConfig, Document, DocumentId, Error, GenerateError, Result, WordChunker,
};

/// Where documents live.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id.
    fn get_document(&self, id: DocumentId) -> Option<Document>;

    /// Replace a document's content and return the updated document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if no document has this id.
    fn update_document(&self, id: DocumentId, content: String) -> Result<Document>;

    /// Replace a document's content only if it still equals `expected`.
    ///
    /// The comparison and the write must be atomic with respect to other
    /// updates of the same document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if no document has this id, and
    /// [`Error::StaleSnapshot`] if its content is no longer `expected`.
    fn update_document_if(
        &self,
        id: DocumentId,
        expected: &str,
        content: String,
    ) -> Result<Document>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn get_document(&self, id: DocumentId) -> Option<Document> {
        (**self).get_document(id)
    }

    fn update_document(&self, id: DocumentId, content: String) -> Result<Document> {
        (**self).update_document(id, content)
    }

    fn update_document_if(
        &self,
        id: DocumentId,
        expected: &str,
        content: String,
    ) -> Result<Document> {
        (**self).update_document_if(id, expected, content)
    }
}

/// An in-process [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, replacing any with the same id.
    pub fn insert(&self, document: Document) -> DocumentId {
        let id = document.id;
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, document);
        id
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    fn get_document(&self, id: DocumentId) -> Option<Document> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn update_document(&self, id: DocumentId, content: String) -> Result<Document> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        let document = documents.get_mut(&id).ok_or(Error::DocumentNotFound(id))?;
        document.replace_content(content);
        Ok(document.clone())
    }

    fn update_document_if(
        &self,
        id: DocumentId,
        expected: &str,
        content: String,
    ) -> Result<Document> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        let document = documents.get_mut(&id).ok_or(Error::DocumentNotFound(id))?;
        if document.content() != expected {
            return Err(Error::StaleSnapshot(id));
        }
        document.replace_content(content);
        Ok(document.clone())
    }
}

/// Who said a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The person using the application.
    User,
    /// The model.
    Assistant,
}

/// One turn of chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Speaker.
    pub role: Role,
    /// Text.
    pub content: String,
}

impl Message {
    /// Create a message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A text-generation provider.
///
/// One implementation per provider, chosen by the host's configuration.
/// `context` is exactly the resolved chunk content or synthesis block.
///
/// Closures with the same signature implement this trait:
///
/// ```rust
/// use quire::{GenerateError, Generator, Message};
///
/// let echo = |prompt: &str, context: &str, _: &[Message]| -> Result<String, GenerateError> {
///     Ok(format!("{prompt}: {context}"))
/// };
/// assert_eq!(echo.generate("shout", "hi", &[]).unwrap(), "shout: hi");
/// ```
pub trait Generator: Send + Sync {
    /// Produce text for `prompt` given `context` and prior `history`.
    ///
    /// # Errors
    ///
    /// Returns the provider's failure as a [`GenerateError`].
    fn generate(
        &self,
        prompt: &str,
        context: &str,
        history: &[Message],
    ) -> std::result::Result<String, GenerateError>;
}

impl<F> Generator for F
where
    F: Fn(&str, &str, &[Message]) -> std::result::Result<String, GenerateError> + Send + Sync,
{
    fn generate(
        &self,
        prompt: &str,
        context: &str,
        history: &[Message],
    ) -> std::result::Result<String, GenerateError> {
        self(prompt, context, history)
    }
}

/// Chunk-level operations over a document store and a generator.
#[derive(Debug)]
pub struct Workbench<S, G> {
    store: S,
    generator: G,
    chunker: WordChunker,
    config: ChunkingConfig,
}

impl<S: DocumentStore, G: Generator> Workbench<S, G> {
    /// Create a workbench.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordBudget`] if the config's budget is zero.
    pub fn new(store: S, generator: G, config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            generator,
            chunker: WordChunker::try_new(config.max_words)?,
            config,
        })
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The active config.
    pub const fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    fn document(&self, id: DocumentId) -> Result<Document> {
        self.store.get_document(id).ok_or(Error::DocumentNotFound(id))
    }

    /// Write `edited` back over `snapshot`, failing if the store moved on.
    fn commit(&self, snapshot: &Document, edited: &ChunkedDocument) -> Result<Document> {
        let updated = self.store.update_document_if(
            snapshot.id,
            snapshot.content(),
            edited.reassemble(),
        )?;

        info!(words = updated.word_count(), "persisted chunk edit");
        Ok(updated)
    }

    /// Chunk a stored document's current content.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`] if the id is unknown.
    #[instrument(skip_all, fields(document = %id))]
    pub fn chunks(&self, id: DocumentId) -> Result<ChunkedDocument> {
        Ok(self.document(id)?.chunks(&self.chunker))
    }

    /// Replace one chunk's content and persist the reassembled document.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`], [`Error::ChunkIndexOutOfRange`], or
    /// [`Error::StaleSnapshot`] if the document changed before the write.
    #[instrument(skip_all, fields(document = %id, index = index))]
    pub fn edit_chunk(
        &self,
        id: DocumentId,
        index: usize,
        new_content: impl Into<String>,
    ) -> Result<Document> {
        let snapshot = self.document(id)?;
        let edited = apply_chunk_edit(&snapshot.chunks(&self.chunker), index, new_content)?;
        self.commit(&snapshot, &edited)
    }

    /// Send the selected chunks of one document to the generator.
    ///
    /// Chunks are joined in the order of `indices`.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`], [`Error::ChunkIndexOutOfRange`], or
    /// [`Error::Generation`].
    #[instrument(skip_all, fields(document = %id, chunks = indices.len()))]
    pub fn rewrite_chunks(
        &self,
        id: DocumentId,
        indices: &[usize],
        instructions: &str,
        history: &[Message],
    ) -> Result<String> {
        let chunks = self.chunks(id)?;
        let context = resolve_chunk_content(&chunks, indices)?;
        debug!(context_bytes = context.len(), "calling generator");
        Ok(self.generator.generate(instructions, &context, history)?)
    }

    /// Rewrite one chunk with the generator and persist the result in place.
    ///
    /// # Errors
    ///
    /// As [`Workbench::rewrite_chunks`] and [`Workbench::edit_chunk`]. On a
    /// generator failure nothing is written. If the document changed while
    /// the generator ran, the result is [`Error::StaleSnapshot`] and the
    /// newer content is left in place.
    #[instrument(skip_all, fields(document = %id, index = index))]
    pub fn rewrite_chunk_in_place(
        &self,
        id: DocumentId,
        index: usize,
        instructions: &str,
    ) -> Result<Document> {
        let snapshot = self.document(id)?;
        let chunks = snapshot.chunks(&self.chunker);
        let context = resolve_chunk_content(&chunks, &[index])?;

        debug!(context_bytes = context.len(), "calling generator");
        let rewritten = self.generator.generate(instructions, &context, &[])?;

        let edited = apply_chunk_edit(&chunks, index, rewritten)?;
        self.commit(&snapshot, &edited)
    }

    /// Combine selected chunks of two documents and send them to the generator
    /// with `selection.instructions`.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`] for either id, [`Error::EmptySelection`],
    /// [`Error::ChunkIndexOutOfRange`], or [`Error::Generation`].
    #[instrument(skip_all, fields(a = %a, b = %b))]
    pub fn synthesize(
        &self,
        a: DocumentId,
        b: DocumentId,
        selection: &ChunkSelection,
        history: &[Message],
    ) -> Result<String> {
        let doc_a = self.chunks(a)?;
        let doc_b = self.chunks(b)?;
        let context = synthesize(&doc_a, &doc_b, selection)?;
        debug!(context_bytes = context.len(), "calling generator");
        Ok(self
            .generator
            .generate(&selection.instructions, &context, history)?)
    }
}
