//! Agglomerative clustering of sequences into a [PhyloTree].

use crate::cluster::distance_matrix::DistanceMatrix;
use crate::error::PhyloError;
use crate::model::sequence::{Sequence, sequence_distance};
use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::vertex::BranchLength;
use tracing::{debug, trace};

/// Separator between the two child labels in the label of a merged cluster.
pub const LABEL_SEPARATOR: char = '+';

// =#========================================================================#=
// CLUSTER BUILDER
// =#========================================================================#=
/// Builds a [PhyloTree] by weighted average-linkage clustering.
///
/// Starting from one leaf cluster per sequence, the builder repeatedly merges
/// the two live clusters with the smallest distance into a new internal
/// vertex, until a single cluster, the root, remains.
///
/// For a merge of `A` and `B` at distance `d`:
/// - the lexicographically smaller label becomes the **right** child, the
///   larger one the **left** child, and the new label is `smaller+larger`;
/// - the branch length to both children is `d / 2`;
/// - the distance of the new cluster to any other live cluster `C` is the
///   leaf-count-weighted average of `d(A, C)` and `d(B, C)`.
///
/// Ties in the minimum distance are broken by the lexicographically smallest
/// label pair (see [DistanceMatrix]). Each merge scans all live matrix
/// entries, so building takes `O(n³)` time for `n` sequences.
///
/// # Example
/// ```
/// use phyloclust::cluster::ClusterBuilder;
/// use phyloclust::model::Sequence;
///
/// let builder = ClusterBuilder::new(vec![
///     Sequence::new("A", "ACGT"),
///     Sequence::new("B", "ACGA"),
///     Sequence::new("C", "TCGT"),
/// ])?;
/// let tree = builder.build()?;
///
/// assert_eq!(tree.root().label(), "A+B+C");
/// assert_eq!(tree.height(), 2);
/// # Ok::<(), phyloclust::PhyloError>(())
/// ```
#[derive(Debug)]
pub struct ClusterBuilder {
    /// Tree under construction, holding all vertices created so far
    tree: PhyloTree,
    /// Currently live clusters
    forest: Vec<VertexIndex>,
    /// Distances between live clusters, keyed by label
    distances: DistanceMatrix<String>,
}

impl ClusterBuilder {
    /// Creates a builder with one leaf per sequence and the distance of
    /// every pair of sequences.
    ///
    /// # Errors
    /// * [PhyloError::EmptyInput] - if `sequences` is empty
    /// * [PhyloError::AlignmentMismatch] - if two sequences differ in length
    /// * [PhyloError::DuplicateLabel] - if two sequences share a name
    ///
    /// Names containing [LABEL_SEPARATOR] are accepted here, but may later make
    /// [build](ClusterBuilder::build) fail (e.g. `A`, `B+C`, `A+B`, `C`).
    pub fn new(sequences: Vec<Sequence>) -> Result<Self, PhyloError> {
        if sequences.is_empty() {
            return Err(PhyloError::EmptyInput);
        }

        let mut distances = DistanceMatrix::new();
        for (i, a) in sequences.iter().enumerate() {
            for b in &sequences[i + 1..] {
                let distance = sequence_distance(a, b)?;
                distances.put(a.name().to_string(), b.name().to_string(), distance);
            }
        }

        let mut tree = PhyloTree::with_capacity(sequences.len());
        let mut forest = Vec::with_capacity(sequences.len());
        for sequence in sequences {
            forest.push(tree.add_leaf(sequence)?);
        }

        debug!(
            "Initialized {} clusters with {} pairwise distances",
            forest.len(),
            distances.len()
        );

        Ok(ClusterBuilder {
            tree,
            forest,
            distances,
        })
    }

    /// Returns the number of currently live clusters.
    pub fn num_clusters(&self) -> usize {
        self.forest.len()
    }

    /// Returns the current distances between live clusters.
    pub fn distances(&self) -> &DistanceMatrix<String> {
        &self.distances
    }

    /// Merges clusters until one remains and returns the finished tree.
    ///
    /// # Errors
    /// * [PhyloError::DuplicateLabel] - if a merged label collides with an existing label,
    ///   which can only happen if sequence names contain [LABEL_SEPARATOR]
    pub fn build(mut self) -> Result<PhyloTree, PhyloError> {
        let num_leaves = self.forest.len();
        let mut num_merges = 0;

        while self.forest.len() > 1 {
            self.merge_nearest()?;
            num_merges += 1;
        }
        debug_assert_eq!(num_merges + 1, num_leaves);

        let root = self.forest[0];
        self.tree.set_root(root);
        debug!(
            "Built tree with {} leaves in {} merges, root '{}'",
            num_leaves,
            num_merges,
            self.tree.root().label()
        );

        Ok(self.tree)
    }

    /// Merges the two nearest live clusters and returns the index of the new cluster.
    ///
    /// # Errors
    /// * [PhyloError::DuplicateLabel] - if the merged label is already in use
    /// * [PhyloError::InconsistentDistances] - if the matrix misses a live pair,
    ///   which includes calling this when only one cluster is left
    pub fn merge_nearest(&mut self) -> Result<VertexIndex, PhyloError> {
        let (smaller, larger, min_distance) = match self.distances.min_entry() {
            Some((pair, distance)) => (pair.first().clone(), pair.second().clone(), distance),
            None => {
                return Err(PhyloError::InconsistentDistances(format!(
                    "no distance left for {} live clusters",
                    self.forest.len()
                )));
            }
        };

        let right = self.live_index(&smaller)?;
        let left = self.live_index(&larger)?;

        let label = format!("{smaller}{LABEL_SEPARATOR}{larger}");
        let merged = self.tree.add_internal_vertex(
            label.clone(),
            (left, right),
            BranchLength::new(min_distance / 2.0),
        )?;
        trace!("Merged '{}' and '{}' at distance {}", larger, smaller, min_distance);

        let left_count = self.tree[left].leaf_count() as f64;
        let right_count = self.tree[right].leaf_count() as f64;

        self.forest.retain(|&index| index != left && index != right);
        for &other in &self.forest {
            let other_label = self.tree[other].label();

            let to_left = self
                .distances
                .remove(larger.clone(), other_label.to_string())
                .ok_or_else(|| missing_distance(&larger, other_label))?;
            let to_right = self
                .distances
                .remove(smaller.clone(), other_label.to_string())
                .ok_or_else(|| missing_distance(&smaller, other_label))?;

            let distance =
                (left_count * to_left + right_count * to_right) / (left_count + right_count);
            self.distances
                .put(label.clone(), other_label.to_string(), distance);
        }

        self.distances.remove(smaller, larger);
        self.forest.push(merged);

        Ok(merged)
    }

    fn live_index(&self, label: &str) -> Result<VertexIndex, PhyloError> {
        self.tree
            .index_of(label)
            .filter(|index| self.forest.contains(index))
            .ok_or_else(|| {
                PhyloError::InconsistentDistances(format!("'{label}' is not a live cluster"))
            })
    }
}

fn missing_distance(first: &str, second: &str) -> PhyloError {
    PhyloError::InconsistentDistances(format!(
        "no distance between '{first}' and '{second}'"
    ))
}

/// Builds the tree for the given sequences in one call.
///
/// See [ClusterBuilder] for the clustering rules.
///
/// # Errors
/// See [ClusterBuilder::new] and [ClusterBuilder::build]. Sequence names
/// should not contain [LABEL_SEPARATOR]: merged labels of unique names like
/// `A+B` and `C` then can collide with those of `A` and `B+C`.
pub fn build_tree(sequences: Vec<Sequence>) -> Result<PhyloTree, PhyloError> {
    ClusterBuilder::new(sequences)?.build()
}
