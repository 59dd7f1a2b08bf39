//! Phyloclust is a library to infer phylogenetic trees from aligned
//! sequences by weighted average-linkage clustering.
//!
//! Core functionality provided:
//! - Distance: fraction of differing alignment columns of two sequences.
//! - Clustering: [ClusterBuilder](crate::cluster::ClusterBuilder) repeatedly
//!   merges the two nearest clusters until one cluster, the root, remains.
//!   Ties are broken by the lexicographically smallest pair of labels, so the
//!   resulting tree is reproducible.
//! - Tree model: [PhyloTree] is a strictly binary tree using the arena
//!   pattern, with lookup of every vertex by its label.
//! - Queries: height, weighted height, depth, least common ancestor,
//!   evolutionary distance between any two labels.
//! - Output: Newick strings and an indented visual rendering.
//! - Input: FASTA alignment files.
//!
//! # Labels
//! A leaf is labelled by its sequence name. Merging clusters `A` and `B`
//! with `A < B` produces the label `A+B`, with `A` as right child and `B` as
//! left child.
//!
//! # Example
//! ```
//! use phyloclust::{build_tree, parse_fasta_str};
//! use phyloclust::newick::NewickStyle;
//!
//! let sequences = parse_fasta_str(">A\nACGT\n>B\nACGA\n>C\nTCGT\n")?;
//! let tree = build_tree(sequences)?;
//!
//! assert_eq!(tree.count_all_species(), 3);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.weighted_height(), 0.3125);
//! assert_eq!(tree.evolutionary_distance("A", "B"), 0.25);
//! assert_eq!(tree.to_newick(&NewickStyle::Shortest), "((A:0.125,B:0.125):0.1875,C:0.1875);");
//! # Ok::<(), phyloclust::PhyloError>(())
//! ```

pub mod batch;
pub mod cluster;
pub mod config;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;

pub use crate::cluster::build_tree;
pub use crate::config::Config;
pub use crate::error::PhyloError;
pub use crate::model::PhyloTree;

use crate::model::Sequence;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick FASTA API
// ============================================================================
/// Parses a FASTA alignment file into its sequences, in file order.
///
/// See [`parser::fasta::parse_file`] for full documentation.
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, ParsingError> {
    parser::fasta::parse_file(path)
}

/// Parses FASTA text into its sequences, in input order.
///
/// See [`parser::fasta::parse_str`] for full documentation.
pub fn parse_fasta_str<S: AsRef<str>>(fasta: S) -> Result<Vec<Sequence>, ParsingError> {
    parser::fasta::parse_str(fasta)
}

/// Parses a FASTA alignment file and builds its tree.
pub fn build_tree_from_fasta_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, PhyloError> {
    build_tree(parse_fasta_file(path)?)
}
