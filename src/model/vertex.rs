//! Vertex module for phylogenetic tree representation.

use crate::model::sequence::Sequence;
use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (cluster) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Leaf**: One input [Sequence]; labelled by the sequence name
/// - **Internal**: Result of merging two clusters; labelled by the combination
///   of its children's labels
///
/// The root is the one vertex without parent; it is an internal vertex unless
/// the tree was built from a single sequence.
///
/// # Invariants
/// - `index` is index in arena
/// - `parent` is set at most once, when the vertex gets merged, and never on the root
/// - Internal vertices have exactly two children (left, right)
/// - `distance_to_child` is the [BranchLength] to **each** of the two children
/// - `leaf_count` equals the sum of the children's leaf counts
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Internal vertex created by a merge (two children, no sequence)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Label derived from the children's labels
        label: String,
        /// Index of the parent vertex, `None` for the root (and during construction)
        parent: Option<VertexIndex>,
        /// Indices of the two child vertices (left, right)
        children: (VertexIndex, VertexIndex),
        /// Branch length to each child
        distance_to_child: BranchLength,
        /// Number of leaves in the subtree rooted here
        leaf_count: usize,
    },
    /// Leaf vertex holding one input sequence
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex, `None` for a single-leaf tree (and during construction)
        parent: Option<VertexIndex>,
        /// The sequence represented by this leaf
        sequence: Sequence,
    },
}

impl Vertex {
    /// Creates a new internal vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `label` - Label of the merged cluster
    /// * `children` - Tuple of child indices (left, right)
    /// * `distance_to_child` - Branch length to each child
    /// * `leaf_count` - Number of leaves below this vertex
    pub fn new_internal(
        index: VertexIndex,
        label: String,
        children: (VertexIndex, VertexIndex),
        distance_to_child: BranchLength,
        leaf_count: usize,
    ) -> Self {
        Vertex::Internal {
            index,
            label,
            parent: None,
            children,
            distance_to_child,
            leaf_count,
        }
    }

    /// Creates a new leaf vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `sequence` - The sequence this leaf stands for
    pub fn new_leaf(index: VertexIndex, sequence: Sequence) -> Self {
        Vertex::Leaf {
            index,
            parent: None,
            sequence,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Internal { index, .. } | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the label of this vertex.
    pub fn label(&self) -> &str {
        match self {
            Vertex::Internal { label, .. } => label,
            Vertex::Leaf { sequence, .. } => sequence.name(),
        }
    }

    /// Returns the sequence if this is a leaf, else `None`.
    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            Vertex::Leaf { sequence, .. } => Some(sequence),
            Vertex::Internal { .. } => None,
        }
    }

    /// Returns the branch length to the children if this is an internal vertex, else `None`.
    pub fn distance_to_child(&self) -> Option<BranchLength> {
        match self {
            Vertex::Internal {
                distance_to_child, ..
            } => Some(*distance_to_child),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the number of leaves in the subtree of this vertex (1 for leaves).
    pub fn leaf_count(&self) -> usize {
        match self {
            Vertex::Internal { leaf_count, .. } => *leaf_count,
            Vertex::Leaf { .. } => 1,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns the children (left, right) if this is an internal vertex, else `None`.
    pub fn children(&self) -> Option<(VertexIndex, VertexIndex)> {
        match self {
            Vertex::Internal { children, .. } => Some(*children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the left child if this is an internal vertex, else `None`.
    pub fn left(&self) -> Option<VertexIndex> {
        self.children().map(|(left, _)| left)
    }

    /// Returns the right child if this is an internal vertex, else `None`.
    pub fn right(&self) -> Option<VertexIndex> {
        self.children().map(|(_, right)| right)
    }

    /// Sets the parent of this vertex.
    ///
    /// Only called once per vertex, when it gets merged into a new cluster.
    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => {
                debug_assert!(p.is_none(), "parent of vertex set twice");
                *p = Some(parent);
            }
        }
    }

    /// Returns the index of the parent, or `None` for the root.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
