//! Newick writer for clustered trees.
//!
//! This module provides [to_newick] and [write_newick_file] to serialize a
//! [PhyloTree](crate::model::PhyloTree) in the nested-parenthesis format.
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex ',' vertex ')' [branch_length]`
//! * `leaf ::= label branch_length`
//! * `branch_length ::= ':' number`
//!
//! The root carries no branch length. Children are written right before left,
//! that is, the child with the lexicographically smaller label comes first.

pub mod writer;

pub use self::writer::{DEFAULT_DECIMALS, NewickStyle, to_newick, write_newick_file};
