//! Rewrite by Chunk
//!
//! Store two documents, rewrite one chunk in place, then synthesize across
//! both. The generator here is a stand-in that reverses word order; a real
//! host plugs in a provider client.
//!
//! ```bash
//! RUST_LOG=quire=debug cargo run --example rewrite_by_chunk
//! ```

use quire::{
    ChunkSelection, ChunkingConfig, Document, GenerateError, MemoryStore, Message, Workbench,
};
use tracing_subscriber::EnvFilter;

fn reverse_words(
    _prompt: &str,
    context: &str,
    _history: &[Message],
) -> Result<String, GenerateError> {
    Ok(context.split_whitespace().rev().collect::<Vec<_>>().join(" "))
}

fn main() -> quire::Result<()> {
    init_tracing();

    let store = MemoryStore::new();
    let essay = store.insert(Document::new(
        "essay.txt",
        "Chunking splits long text. Each chunk is addressed by index. \
         Edits are folded back into the document. The document stays the source of truth.",
    ));
    let notes = store.insert(Document::new(
        "notes.txt",
        "Indices are only valid for one chunking pass. Re-chunk after every edit.",
    ));

    let config = ChunkingConfig::from_env();
    let config = ChunkingConfig {
        max_words: 6,
        ..config
    };
    let bench = Workbench::new(store, reverse_words, config)?;

    let chunks = bench.chunks(essay)?;
    println!("essay: {} chunks", chunks.chunk_count);
    for chunk in &chunks {
        println!("  {chunk}");
    }

    let updated = bench.rewrite_chunk_in_place(essay, 1, "reverse this")?;
    println!("\nafter rewriting chunk 1:\n{}\n", updated.content());

    let selection = ChunkSelection::new("compare").with_a([0, 2]).with_b([1]);
    let answer = bench.synthesize(essay, notes, &selection, &[])?;
    println!("synthesis output:\n{answer}");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
