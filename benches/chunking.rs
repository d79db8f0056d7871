//! Benchmarks for word-budget chunking and reassembly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quire::{apply_chunk_edit, resolve_chunk_content, Chunker, WordChunker};

fn sample_text(words: usize) -> String {
    // Realistic prose with paragraph breaks
    let sentences = [
        "The quick brown fox jumps over the lazy dog.",
        "Pack my box with five dozen liquor jugs.",
        "How vexingly quick daft zebras jump!",
        "The five boxing wizards jump quickly.\n\n",
        "Sphinx of black quartz, judge my vow.",
    ];
    let mut text = String::new();
    let mut count = 0;
    let mut i = 0;
    while count < words {
        let sentence = sentences[i % sentences.len()];
        count += sentence.split_whitespace().count();
        text.push_str(sentence);
        text.push(' ');
        i += 1;
    }
    text
}

fn bench_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_chunker");
    let chunker = WordChunker::default();

    for words in [500, 10_000, 100_000] {
        let text = sample_text(words);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("chunk", words), &text, |b, text| {
            b.iter(|| chunker.chunk(black_box(text)))
        });
    }

    group.finish();
}

fn bench_edit_and_reassemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("reassembly");
    let chunker = WordChunker::default();

    for words in [10_000, 100_000] {
        let doc = chunker.chunk(&sample_text(words));
        let middle = doc.chunk_count / 2;

        group.bench_with_input(BenchmarkId::new("edit_reassemble", words), &doc, |b, doc| {
            b.iter(|| {
                apply_chunk_edit(black_box(doc), middle, "replacement text")
                    .map(|edited| edited.reassemble())
            })
        });
        group.bench_with_input(BenchmarkId::new("resolve_all", words), &doc, |b, doc| {
            let all: Vec<usize> = (0..doc.chunk_count).rev().collect();
            b.iter(|| resolve_chunk_content(black_box(doc), &all))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunk, bench_edit_and_reassemble);
criterion_main!(benches);
