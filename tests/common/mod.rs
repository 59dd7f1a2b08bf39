#![allow(dead_code)]

use phyloclust::build_tree;
use phyloclust::model::{PhyloTree, Sequence};

/// A ACGT, B ACGA, C TCGT: A and B merge first, then C joins.
pub fn three_species_sequences() -> Vec<Sequence> {
    vec![
        Sequence::new("A", "ACGT"),
        Sequence::new("B", "ACGA"),
        Sequence::new("C", "TCGT"),
    ]
}

/// Merges A+B at 0.25, A+B+C at 0.375 and A+B+C+D at 0.75.
pub fn four_species_sequences() -> Vec<Sequence> {
    vec![
        Sequence::new("A", "AAAA"),
        Sequence::new("B", "AAAT"),
        Sequence::new("C", "AATT"),
        Sequence::new("D", "TTTT"),
    ]
}

pub fn three_species_tree() -> PhyloTree {
    build_tree(three_species_sequences()).unwrap()
}

pub fn four_species_tree() -> PhyloTree {
    build_tree(four_species_sequences()).unwrap()
}

pub const THREE_SPECIES_FASTA: &str = ">A\nACGT\n>B\nACGA\n>C\nTCGT\n";

/// Reproducible alignment of `n` sequences of length `len`, names `S000`, `S001`, ...
pub fn synthetic_alignment(n: usize, len: usize) -> Vec<Sequence> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    (0..n)
        .map(|i| {
            let symbols: Vec<u8> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    b"ACGT"[(state % 4) as usize]
                })
                .collect();
            Sequence::new(format!("S{i:03}"), symbols)
        })
        .collect()
}

pub fn dots(n: usize) -> String {
    ".".repeat(n)
}
