//! Newick format writing for clustered trees.

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::vertex::BranchLength;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Number of decimals used by [NewickStyle::default]
pub const DEFAULT_DECIMALS: usize = 5;

/// Style for serializing a tree to Newick format,
/// controlling how branch lengths are represented in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewickStyle {
    /// Fixed number of decimals, e.g. `Fixed(5)` writes `0.12500`
    Fixed(usize),
    /// Shortest representation that reads back to the same value, e.g. `0.125`
    Shortest,
}

impl Default for NewickStyle {
    fn default() -> Self {
        NewickStyle::Fixed(DEFAULT_DECIMALS)
    }
}

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file(file: File, trees: &[PhyloTree], style: &NewickStyle) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(style, tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// An internal vertex is written as `(right,left)`, followed by `:length`
/// unless it is the root; a leaf is written as `label:length`. The length is
/// that of the branch above the vertex. Leaf labels are escaped if necessary.
///
/// # Example
/// ```
/// use phyloclust::build_tree;
/// use phyloclust::model::Sequence;
/// use phyloclust::newick::NewickStyle;
///
/// let tree = build_tree(vec![
///     Sequence::new("A", "ACGT"),
///     Sequence::new("B", "ACGA"),
///     Sequence::new("C", "TCGT"),
/// ]).unwrap();
///
/// assert_eq!(
///     tree.to_newick(&NewickStyle::default()),
///     "((A:0.12500,B:0.12500):0.18750,C:0.18750);"
/// );
/// assert_eq!(tree.to_newick(&NewickStyle::Shortest), "((A:0.125,B:0.125):0.1875,C:0.1875);");
/// ```
pub fn to_newick(style: &NewickStyle, tree: &PhyloTree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(style, tree));

    build_newick(tree, &mut newick, tree.root_index(), style);
    newick.push(';');

    newick
}

// Recursive helper for building the Newick string
fn build_newick(tree: &PhyloTree, newick: &mut String, index: VertexIndex, style: &NewickStyle) {
    let vertex = &tree[index];

    match vertex.children() {
        None => newick.push_str(&escape_label(vertex.label())),
        Some((left, right)) => {
            newick.push('(');
            build_newick(tree, newick, right, style);
            newick.push(',');
            build_newick(tree, newick, left, style);
            newick.push(')');
        }
    }

    if let Some(branch_length) = tree.branch_length(index) {
        push_branch_length(newick, branch_length, style);
    }
}

fn push_branch_length(newick: &mut String, branch_length: BranchLength, style: &NewickStyle) {
    newick.push(':');
    match style {
        NewickStyle::Fixed(decimals) => {
            newick.push_str(&format!("{:.*}", *decimals, *branch_length));
        }
        NewickStyle::Shortest => newick.push_str(&branch_length.to_string()),
    }
}

/// Estimates the length of the Newick string of a tree, to pre-allocate.
fn estimate_newick_len(style: &NewickStyle, tree: &PhyloTree) -> usize {
    // Each internal vertex: "(,)"
    const INTERNAL_VERTEX_CHARS: usize = 3;
    // ':' and "0." in front of the decimals
    const BRANCH_PREFIX_CHARS: usize = 3;
    // Typical shortest representation, e.g. ":0.1875" up to ":0.009529961339106089"
    const SHORTEST_BRANCH_CHARS: usize = 12;

    let label_capacity: usize = tree
        .pre_order_iter()
        .filter(|v| v.is_leaf())
        .map(|v| v.label().len())
        .sum();
    let structure_capacity = tree.num_internal() * INTERNAL_VERTEX_CHARS;
    let branch_chars = match style {
        NewickStyle::Fixed(decimals) => BRANCH_PREFIX_CHARS + decimals,
        NewickStyle::Shortest => SHORTEST_BRANCH_CHARS,
    };
    let branch_capacity = tree.num_vertices().saturating_sub(1) * branch_chars;

    label_capacity + structure_capacity + branch_capacity + BUFFER_CHARS
}

/// Escapes a leaf label for Newick.
///
/// Labels containing Newick punctuation are wrapped in single quotes, with
/// internal single quotes doubled; otherwise spaces become underscores.
fn escape_label(label: &str) -> String {
    let needs_quotes = label.chars().any(|c| {
        matches!(
            c,
            ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\''
        )
    });

    if needs_quotes {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::escape_label;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("Pukeko"), "Pukeko");
        assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
        assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
        assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
    }
}
