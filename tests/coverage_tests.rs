//! End-to-end scenarios: chunk, select, synthesize, edit, reassemble.
//!
//! These tests exercise the public API the way a request handler would,
//! checking that chunked content covers the whole document and that edits
//! come back through the document's content.

use quire::{
    chunk_document, reassemble, resolve_chunk_content, resolve_chunk_content_lossy, synthesize,
    ChunkSelection, Chunker, ChunkingConfig, Document, Error, GenerateError, MemoryStore, Message,
    Workbench, WordChunker, DEFAULT_MAX_WORDS,
};

fn distinct_words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Coverage: every word lands in exactly one chunk
// =============================================================================

#[test]
fn twenty_five_hundred_words_default_budget() {
    let text = distinct_words("w", 2500);
    let doc = chunk_document(&text, DEFAULT_MAX_WORDS).unwrap();

    assert_eq!(doc.chunk_count, 3);
    assert_eq!(
        doc.iter().map(|c| c.word_count).collect::<Vec<_>>(),
        [1000, 1000, 500]
    );
    assert_eq!(
        doc.iter().map(|c| c.chunk_index).collect::<Vec<_>>(),
        [0, 1, 2]
    );

    // boundaries fall between w999|w1000 and w1999|w2000
    assert!(doc.chunks[0].content.ends_with(" w999"));
    assert!(doc.chunks[1].content.starts_with("w1000 "));
    assert!(doc.chunks[2].content.starts_with("w2000 "));
}

#[test]
fn every_word_covered_once() {
    let texts = [
        distinct_words("a", 1),
        distinct_words("b", 999),
        distinct_words("c", 1000),
        distinct_words("d", 1001),
        distinct_words("e", 3333),
        format!("{}\n\n{}", distinct_words("p", 700), distinct_words("q", 700)),
    ];

    for text in &texts {
        let doc = WordChunker::default().chunk(text);
        let rebuilt = doc.reassemble();
        let mut seen: Vec<&str> = rebuilt.split_whitespace().collect();
        let mut want: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(seen, want, "order differs for {} words", want.len());

        seen.sort_unstable();
        seen.dedup();
        want.sort_unstable();
        assert_eq!(seen.len(), want.len(), "duplicated or dropped words");
    }
}

#[test]
fn formatting_kept_only_below_budget() {
    let text = "Heading\n\nFirst paragraph.\n\n  - item one\n  - item two\n";

    let whole = WordChunker::new(100).chunk(text);
    assert_eq!(whole.chunks[0].content, text.trim());

    let split = WordChunker::new(4).chunk(text);
    assert_eq!(split.chunks[0].content, "Heading First paragraph. -");
    assert!(split.iter().all(|c| !c.content.contains('\n')));
}

// =============================================================================
// Synthesis across two documents
// =============================================================================

#[test]
fn two_document_synthesis_block() {
    let a = WordChunker::new(3).chunk(&distinct_words("a", 6));
    let b = WordChunker::new(3).chunk(&distinct_words("b", 9));
    assert_eq!((a.chunk_count, b.chunk_count), (2, 3));

    let selection = ChunkSelection::new("Find contradictions")
        .with_a([1])
        .with_b([0, 2]);
    let context = synthesize(&a, &b, &selection).unwrap();

    assert_eq!(
        context,
        "Content from Document A:\na3 a4 a5\n\n\
         Content from Document B:\nb0 b1 b2\n\nb6 b7 b8"
    );
}

#[test]
fn reordered_selection_is_not_sorted() {
    let doc = WordChunker::new(2).chunk(&distinct_words("x", 6));
    assert_eq!(
        resolve_chunk_content(&doc, &[2, 0, 1]).unwrap(),
        "x4 x5\n\nx0 x1\n\nx2 x3"
    );
}

#[test]
fn stale_index_strict_and_lossy() {
    let text = distinct_words("s", 30);
    let fine = WordChunker::new(5).chunk(&text);
    let coarse = WordChunker::new(20).chunk(&text);

    // index 4 exists at budget 5 but not at budget 20
    assert!(fine.get(4).is_some());
    let err = resolve_chunk_content(&coarse, &[4]).unwrap_err();
    assert!(matches!(
        err,
        Error::ChunkIndexOutOfRange {
            index: 4,
            chunk_count: 2
        }
    ));
    assert_eq!(resolve_chunk_content_lossy(&coarse, &[4]), "");
}

// =============================================================================
// Edits become content
// =============================================================================

#[test]
fn document_edit_round_trip() {
    let chunker = WordChunker::new(3);
    let mut doc = Document::new("essay.txt", distinct_words("w", 8));

    let edited = doc.apply_chunk_edit(&chunker, 1, "rewritten middle").unwrap();
    assert_eq!(reassemble(&edited.chunks), doc.content());
    assert_eq!(doc.content(), "w0 w1 w2\n\nrewritten middle\n\nw6 w7");
    assert_eq!(doc.word_count(), 7);

    // indices are recomputed against the new content
    let again = doc.chunks(&chunker);
    assert_eq!(again.chunk_count, 3);
    assert_eq!(again.chunks[1].content, "rewritten middle w6");
    assert!(!again.is_modified());
}

#[test]
fn workbench_rewrite_flow() {
    let store = MemoryStore::new();
    let id = store.insert(Document::new("notes", distinct_words("n", 5)));

    let shout = |_: &str, context: &str, _: &[Message]| -> Result<String, GenerateError> {
        Ok(context.to_uppercase())
    };
    let bench = Workbench::new(store, shout, ChunkingConfig::new(2)).unwrap();

    let updated = bench.rewrite_chunk_in_place(id, 1, "uppercase").unwrap();
    assert_eq!(updated.content(), "n0 n1\n\nN2 N3\n\nn4");
    assert_eq!(bench.chunks(id).unwrap().chunks[1].content, "N2 N3");
}
