//! Performance benchmarks for wordgrid
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordgrid::generator::generate_puzzle;
use wordgrid::grid::RowRange;
use wordgrid::search::{search_word_in_range, search_words};
use wordgrid::{search_puzzle, Puzzle, SearchConfig};

const WORDS: [&str; 8] = [
    "scatter", "gather", "torus", "worker", "diagonal", "wrap", "partition", "highlight",
];

/// Generate a seeded puzzle hiding [`WORDS`]
fn create_benchmark_puzzle(rows: usize, cols: usize) -> Puzzle {
    let words: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();
    generate_puzzle(rows, cols, &words, Some(42))
        .expect("Failed to generate puzzle")
        .into_puzzle()
}

fn bench_single_word(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_word");
    for size in [32, 128, 512] {
        let puzzle = create_benchmark_puzzle(size, size);
        let range = RowRange { start: 0, end: size };
        group.bench_with_input(BenchmarkId::from_parameter(size), &puzzle, |b, p| {
            b.iter(|| search_word_in_range(&p.grid, black_box("partition"), range))
        });
    }
    group.finish();
}

fn bench_word_list(c: &mut Criterion) {
    let puzzle = create_benchmark_puzzle(256, 256);
    let range = RowRange { start: 0, end: 256 };

    c.bench_function("word_list_256", |b| {
        b.iter(|| search_words(&puzzle.grid, black_box(&puzzle.words), range, 0, None))
    });
}

fn bench_full_run(c: &mut Criterion) {
    let puzzle = create_benchmark_puzzle(256, 256);

    let mut group = c.benchmark_group("full_run");
    group.sample_size(20);
    for workers in [1, 2, 4, 8] {
        let config = SearchConfig::with_workers(workers).expect("Invalid worker count");
        group.bench_with_input(BenchmarkId::from_parameter(workers), &config, |b, config| {
            b.iter(|| search_puzzle(config, puzzle.clone()))
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let words: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();
    c.bench_function("generate_512", |b| {
        b.iter(|| generate_puzzle(512, 512, black_box(&words), Some(7)))
    });
}

criterion_group!(
    benches,
    bench_single_word,
    bench_word_list,
    bench_full_run,
    bench_generate
);
criterion_main!(benches);
