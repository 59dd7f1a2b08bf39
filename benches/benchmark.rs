use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phyloclust::build_tree;
use phyloclust::model::Sequence;
use std::hint::black_box;

const SEQUENCE_LENGTH: usize = 200;
const ALPHABET: &[u8] = b"ACGT";

const REGRESSION_SIZES: &[usize] = &[16, 32, 64];
const REPORTING_SIZES: &[usize] = &[128, 256];

/// Pseudo-random but reproducible alignment of `n` sequences.
fn synthetic_alignment(n: usize) -> Vec<Sequence> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..n)
        .map(|i| {
            let symbols: Vec<u8> = (0..SEQUENCE_LENGTH)
                .map(|_| {
                    // xorshift64
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    ALPHABET[(state % ALPHABET.len() as u64) as usize]
                })
                .collect();
            Sequence::new(format!("S{i:04}"), symbols)
        })
        .collect()
}

fn clustering(c: &mut Criterion, sizes: &[usize]) {
    for &n in sizes {
        let alignment = synthetic_alignment(n);
        c.bench_with_input(BenchmarkId::new("build_tree", n), &alignment, |b, alignment| {
            b.iter(|| build_tree(black_box(alignment.clone())).unwrap());
        });
    }
}

fn clustering_regression(c: &mut Criterion) {
    clustering(c, REGRESSION_SIZES);
}

fn clustering_reporting(c: &mut Criterion) {
    clustering(c, REPORTING_SIZES);
}

criterion_group!(regression, clustering_regression);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = clustering_reporting
}
criterion_main!(regression, reporting);
