//! Provides the phylogenetic tree built by clustering.
//!
//! Provides core data structures for representing the inferred tree:
//! * [PhyloTree] - Strictly binary tree using the arena pattern,
//!   with a by-label lookup of all vertices
//! * [VertexIndex] as type used to index vertices in tree
//! * [VisualLayout] configuring the indented text rendering

use crate::error::PhyloError;
use crate::model::sequence::Sequence;
use crate::model::vertex::{BranchLength, Vertex};
use crate::newick;
use crate::newick::NewickStyle;
use std::collections::HashMap;

/// Float comparison tolerance
const EPSILON: f64 = 1e-7;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A strictly binary phylogenetic tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Leaves come first (one per input sequence, in input order),
/// followed by the internal vertices in the order they were merged; the root
/// is the last vertex.
///
/// # Structure
/// - Internal vertices own their two children by index; the parent link is a
///   plain, non-owning index.
/// - Every vertex is registered under its unique label, so lookups by label
///   do not traverse the tree.
/// - For `n` leaves there are exactly `n - 1` internal vertices.
///
/// # Phases
/// A tree is only assembled by the [ClusterBuilder](crate::cluster::ClusterBuilder).
/// Once handed out it offers no mutation, so it can be shared freely across
/// threads for concurrent queries.
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Number of leaves this tree is built for
    num_leaves_init: usize,

    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Vertex index by label
    by_label: HashMap<String, VertexIndex>,
}

// ============================================================================
// Construction (crate only)
// ============================================================================
impl PhyloTree {
    /// Creates an empty tree with capacity for a binary tree with `num_leaves` leaves.
    pub(crate) fn with_capacity(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        PhyloTree {
            num_leaves_init: num_leaves,
            vertices: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
            by_label: HashMap::with_capacity(capacity),
        }
    }

    /// Adds a leaf for the given sequence and registers it under the sequence name.
    ///
    /// # Errors
    /// Returns [PhyloError::DuplicateLabel] if the name is already in use.
    pub(crate) fn add_leaf(&mut self, sequence: Sequence) -> Result<VertexIndex, PhyloError> {
        let index = self.vertices.len();
        self.register_label(sequence.name(), index)?;
        self.vertices.push(Vertex::new_leaf(index, sequence));
        Ok(index)
    }

    /// Adds an internal vertex above the two given children, registers it
    /// under `label` and sets it as parent of both children.
    ///
    /// # Errors
    /// Returns [PhyloError::DuplicateLabel] if the label is already in use.
    pub(crate) fn add_internal_vertex(
        &mut self,
        label: String,
        children: (VertexIndex, VertexIndex),
        distance_to_child: BranchLength,
    ) -> Result<VertexIndex, PhyloError> {
        let index = self.vertices.len();
        self.register_label(&label, index)?;

        let leaf_count = self[children.0].leaf_count() + self[children.1].leaf_count();
        self.vertices.push(Vertex::new_internal(
            index,
            label,
            children,
            distance_to_child,
            leaf_count,
        ));

        self.vertices[children.0].set_parent(index);
        self.vertices[children.1].set_parent(index);

        Ok(index)
    }

    /// Marks the vertex at `index` as root, finishing construction.
    pub(crate) fn set_root(&mut self, index: VertexIndex) {
        debug_assert!(!self.vertices[index].has_parent());
        self.root_index = index;
    }

    fn register_label(&mut self, label: &str, index: VertexIndex) -> Result<(), PhyloError> {
        if self.by_label.contains_key(label) {
            return Err(PhyloError::DuplicateLabel(label.to_string()));
        }
        self.by_label.insert(label.to_string(), index);
        Ok(())
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl PhyloTree {
    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the vertex with the given label, or `None` if no such vertex exists.
    pub fn find_by_label(&self, label: &str) -> Option<&Vertex> {
        self.index_of(label).map(|index| &self[index])
    }

    /// Returns the index of the vertex with the given label, or `None` if unknown.
    pub fn index_of(&self, label: &str) -> Option<VertexIndex> {
        self.by_label.get(label).copied()
    }

    /// Returns the number of leaves this tree was initialized to hold.
    pub fn num_leaves_init(&self) -> usize {
        self.num_leaves_init
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices (including the root) in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of species, i.e. the leaf count of the root.
    pub fn count_all_species(&self) -> usize {
        self.root().leaf_count()
    }

    /// Returns the length of the branch above the vertex at `index`,
    /// i.e. the distance its parent stores to its children,
    /// or `None` for the root.
    pub fn branch_length(&self, index: VertexIndex) -> Option<BranchLength> {
        self[index]
            .parent()
            .and_then(|parent| self[parent].distance_to_child())
    }

    /// Returns the sequences of all leaves.
    ///
    /// Order is left subtree before right subtree; in-, pre- and post-order
    /// coincide for leaves of a strictly binary tree.
    pub fn all_leaf_sequences(&self) -> Vec<&Sequence> {
        self.pre_order_iter()
            .filter_map(|vertex| vertex.sequence())
            .collect()
    }
}

// ============================================================================
// Height & depth (pub)
// ============================================================================
impl PhyloTree {
    /// Returns the number of edges on a longest path from the root to a leaf.
    ///
    /// A tree consisting of a single leaf has height 0.
    pub fn height(&self) -> usize {
        let mut heights = vec![0usize; self.num_vertices()];

        for vertex in self.post_order_iter() {
            if let Some((left, right)) = vertex.children() {
                heights[vertex.index()] = 1 + heights[left].max(heights[right]);
            }
        }

        heights[self.root_index]
    }

    /// Returns the largest sum of branch lengths on a path from the root to a leaf.
    ///
    /// At each internal vertex, its branch length is added to the larger of the
    /// weighted heights of its two subtrees.
    pub fn weighted_height(&self) -> f64 {
        let mut heights: Vec<f64> = vec![0.0; self.num_vertices()];

        for vertex in self.post_order_iter() {
            if let Vertex::Internal {
                index,
                children: (left, right),
                distance_to_child,
                ..
            } = vertex
            {
                heights[*index] = heights[*left].max(heights[*right]) + **distance_to_child;
            }
        }

        heights[self.root_index]
    }

    /// Returns the number of edges from the vertex with the given label up to the root,
    /// or `None` if the label is unknown.
    pub fn depth(&self, label: &str) -> Option<usize> {
        self.index_of(label).map(|index| self.depth_of(index))
    }

    /// Returns the number of edges from the vertex at `index` up to the root.
    pub fn depth_of(&self, index: VertexIndex) -> usize {
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self[current].parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Returns the sum of branch lengths from the vertex with the given label up
    /// to the root, or `None` if the label is unknown.
    pub fn weighted_depth(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|index| self.weighted_depth_of(index))
    }

    /// Returns the sum of branch lengths from the vertex at `index` up to the root.
    pub fn weighted_depth_of(&self, index: VertexIndex) -> f64 {
        self.path_length_to_ancestor(index, self.root_index)
    }
}

// ============================================================================
// Ancestors & distances (pub)
// ============================================================================
impl PhyloTree {
    /// Returns the least common ancestor of the vertices with the given labels,
    /// or `None` if either label is unknown.
    ///
    /// If one vertex is an ancestor of the other, that vertex is returned.
    ///
    /// # Example
    /// ```
    /// use phyloclust::build_tree;
    /// use phyloclust::model::Sequence;
    ///
    /// let tree = build_tree(vec![
    ///     Sequence::new("A", "ACGT"),
    ///     Sequence::new("B", "ACGA"),
    ///     Sequence::new("C", "TCGT"),
    /// ]).unwrap();
    ///
    /// assert_eq!(tree.least_common_ancestor("A", "B").unwrap().label(), "A+B");
    /// assert_eq!(tree.least_common_ancestor("B", "C").unwrap().label(), "A+B+C");
    /// assert!(tree.least_common_ancestor("A", "Moa").is_none());
    /// ```
    pub fn least_common_ancestor(&self, label1: &str, label2: &str) -> Option<&Vertex> {
        let first = self.index_of(label1)?;
        let second = self.index_of(label2)?;
        self.lca_below(self.root_index, first, second)
            .map(|index| &self[index])
    }

    /// Searches the subtree of `current` for `first` and `second`.
    ///
    /// Returns `current` if it is one of the targets or if the targets lie in
    /// different subtrees below it; otherwise whatever was found below.
    fn lca_below(
        &self,
        current: VertexIndex,
        first: VertexIndex,
        second: VertexIndex,
    ) -> Option<VertexIndex> {
        if current == first || current == second {
            return Some(current);
        }

        let (left, right) = self[current].children()?;
        let found_left = self.lca_below(left, first, second);
        let found_right = self.lca_below(right, first, second);

        match (found_left, found_right) {
            (Some(_), Some(_)) => Some(current),
            (Some(found), None) | (None, Some(found)) => Some(found),
            (None, None) => None,
        }
    }

    /// Returns the evolutionary distance between the vertices with the given
    /// labels, that is, the sum of branch lengths on the path between them.
    ///
    /// Returns `0.0` for the same vertex and [f64::INFINITY] if either label is unknown.
    ///
    /// # Example
    /// ```
    /// use phyloclust::build_tree;
    /// use phyloclust::model::Sequence;
    ///
    /// let tree = build_tree(vec![
    ///     Sequence::new("A", "ACGT"),
    ///     Sequence::new("B", "ACGA"),
    ///     Sequence::new("C", "TCGT"),
    /// ]).unwrap();
    ///
    /// assert_eq!(tree.evolutionary_distance("A", "B"), 0.25);
    /// assert_eq!(tree.evolutionary_distance("A", "C"), 0.5);
    /// assert_eq!(tree.evolutionary_distance("A", "Moa"), f64::INFINITY);
    /// ```
    pub fn evolutionary_distance(&self, label1: &str, label2: &str) -> f64 {
        let (Some(first), Some(second)) = (self.index_of(label1), self.index_of(label2)) else {
            return f64::INFINITY;
        };

        if first == second {
            return 0.0;
        }

        let Some(ancestor) = self.lca_below(self.root_index, first, second) else {
            return f64::INFINITY;
        };

        // Contributes zero from a side that is the ancestor itself
        self.path_length_to_ancestor(first, ancestor)
            + self.path_length_to_ancestor(second, ancestor)
    }

    /// Returns the distance at which the clusters of the two labelled vertices
    /// got merged, that is, twice the branch length below their least common
    /// ancestor, or `None` if either label is unknown.
    ///
    /// Unlike [evolutionary_distance](PhyloTree::evolutionary_distance) this
    /// always forms an ultrametric on the leaves.
    pub fn cophenetic_distance(&self, label1: &str, label2: &str) -> Option<f64> {
        let ancestor = self.least_common_ancestor(label1, label2)?;
        Some(ancestor.distance_to_child().map_or(0.0, |bl| 2.0 * *bl))
    }

    /// Returns the evolutionary distance for each ordered pair of leaves,
    /// in leaf order (see [all_leaf_sequences](PhyloTree::all_leaf_sequences)).
    pub fn evolutionary_distances(&self) -> Vec<(&str, &str, f64)> {
        let leaves = self.all_leaf_sequences();
        let mut distances = Vec::with_capacity(leaves.len() * leaves.len());

        for first in &leaves {
            for second in &leaves {
                distances.push((
                    first.name(),
                    second.name(),
                    self.evolutionary_distance(first.name(), second.name()),
                ));
            }
        }

        distances
    }

    /// Sums the branch lengths on the way from `index` up to `ancestor`.
    fn path_length_to_ancestor(&self, index: VertexIndex, ancestor: VertexIndex) -> f64 {
        let mut distance = 0.0;
        let mut current = index;

        while current != ancestor {
            let Some(parent) = self[current].parent() else {
                break;
            };
            distance += self[parent].distance_to_child().map_or(0.0, |bl| *bl);
            current = parent;
        }

        distance
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl PhyloTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All children point back to their parent and vice versa
    /// - Leaf counts add up and the root covers all leaves
    /// - Every label maps to its vertex
    /// - For `n` leaves, there are `n - 1` internal vertices
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || self.root().has_parent() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if self.index_of(vertex.label()) != Some(index) {
                return false;
            }

            if let Some((left, right)) = vertex.children() {
                if left >= self.vertices.len() || right >= self.vertices.len() || left == right {
                    return false;
                }

                if self[left].parent() != Some(index) || self[right].parent() != Some(index) {
                    return false;
                }

                if vertex.leaf_count() != self[left].leaf_count() + self[right].leaf_count() {
                    return false;
                }
            }

            match vertex.parent() {
                None if index != self.root_index => return false,
                Some(parent) => {
                    let is_child = self
                        .vertices
                        .get(parent)
                        .and_then(|p| p.children())
                        .is_some_and(|(left, right)| left == index || right == index);
                    if !is_child {
                        return false;
                    }
                }
                None => {}
            }
        }

        let num_leaves = self.num_leaves();
        num_leaves == self.num_leaves_init
            && self.num_internal() + 1 == num_leaves
            && self.root().leaf_count() == num_leaves
            && self.by_label.len() == self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
/// Layout of the indented text rendering of a tree
/// (see [PhyloTree::to_visual_string]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualLayout {
    /// Number of fill characters in front of the deepest vertex
    pub printing_depth: usize,
    /// Character used for indentation
    pub fill: char,
}

impl VisualLayout {
    /// Creates a layout with the given printing depth and the default fill character.
    pub fn with_depth(printing_depth: usize) -> Self {
        Self {
            printing_depth,
            ..Self::default()
        }
    }
}

impl Default for VisualLayout {
    fn default() -> Self {
        Self {
            printing_depth: 100,
            fill: '.',
        }
    }
}

impl PhyloTree {
    /// Convenience method to convert this tree to a Newick string.
    pub fn to_newick(&self, style: &NewickStyle) -> String {
        newick::to_newick(style, self)
    }

    /// Returns an indented, one-vertex-per-line rendering of this tree.
    ///
    /// Vertices are listed in reversed in-order (right subtree, vertex, left
    /// subtree). Each line is indented proportionally to the weighted depth of
    /// its vertex, scaled so that a vertex at the weighted height of the tree
    /// gets `printing_depth` fill characters.
    ///
    /// # Example Output
    /// ```text
    /// ..........A
    /// ......A+B
    /// ..........B
    /// A+B+C
    /// ......C
    /// ```
    pub fn to_visual_string(&self, layout: &VisualLayout) -> String {
        let weighted_depths = self.weighted_depths();
        let max_depth = self.weighted_height();

        let mut visual = String::new();
        self.build_visual(
            self.root_index,
            layout,
            &weighted_depths,
            max_depth,
            &mut visual,
        );
        visual
    }

    /// Recursive helper for [to_visual_string](PhyloTree::to_visual_string).
    fn build_visual(
        &self,
        index: VertexIndex,
        layout: &VisualLayout,
        weighted_depths: &[f64],
        max_depth: f64,
        visual: &mut String,
    ) {
        let vertex = &self[index];

        if let Some(right) = vertex.right() {
            self.build_visual(right, layout, weighted_depths, max_depth, visual);
        }

        let indent = if max_depth > 0.0 {
            let scaled = layout.printing_depth as f64 * weighted_depths[index] / max_depth;
            (scaled - EPSILON).ceil().max(0.0) as usize
        } else {
            0
        };
        visual.extend(std::iter::repeat_n(layout.fill, indent));
        visual.push_str(vertex.label());
        visual.push('\n');

        if let Some(left) = vertex.left() {
            self.build_visual(left, layout, weighted_depths, max_depth, visual);
        }
    }

    /// Weighted depth of every vertex, by index, in one pre-order pass.
    fn weighted_depths(&self) -> Vec<f64> {
        let mut depths: Vec<f64> = vec![0.0; self.num_vertices()];

        for vertex in self.pre_order_iter() {
            if let Vertex::Internal {
                index,
                children: (left, right),
                distance_to_child,
                ..
            } = vertex
            {
                depths[*left] = depths[*index] + **distance_to_child;
                depths[*right] = depths[*index] + **distance_to_child;
            }
        }

        depths
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is useful for computing heights, aggregating data from leaves upward, etc.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children,
    /// left subtree before right subtree.
    /// This is useful for propagating data from root to leaves.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));

            // Push right first, so left is processed first
            if let Some((left, right)) = vertex.children() {
                self.stack.push((right, false));
                self.stack.push((left, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        if let Some((left, right)) = vertex.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(vertex)
    }
}
