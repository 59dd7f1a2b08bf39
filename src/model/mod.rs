//! Data model for sequences and clustered phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Leaf` holding a [Sequence] or an
//! `Internal` vertex created by merging two clusters, referenced by [VertexIndex].
//!
//! # Building trees
//! Trees are constructed by the [ClusterBuilder](crate::cluster::ClusterBuilder)
//! and immutable afterwards.

pub mod sequence;
pub mod tree;
pub mod vertex;

pub use sequence::{AlignmentMismatchError, Sequence, sequence_distance};
pub use tree::{PhyloTree, PostOrderIter, PreOrderIter, VertexIndex, VisualLayout};
pub use vertex::{BranchLength, Vertex};
