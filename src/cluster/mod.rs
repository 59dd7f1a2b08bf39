//! Agglomerative clustering.
//!
//! - [DistanceMatrix] + [LabelPair]: symmetric distances between live clusters
//! - [ClusterBuilder]: merges nearest clusters into a [PhyloTree](crate::model::PhyloTree)

pub mod builder;
pub mod distance_matrix;

pub use builder::{ClusterBuilder, LABEL_SEPARATOR, build_tree};
pub use distance_matrix::{DistanceMatrix, LabelPair};
