//! Aligned biological sequences and their pairwise dissimilarity.
//!
//! - [Sequence]: named, immutable sequence of single-byte symbols.
//! - [sequence_distance]: fraction of differing positions of two aligned sequences.

use thiserror::Error;

// =#========================================================================#=
// SEQUENCE
// =#========================================================================#=
/// A named biological sequence taken from an alignment.
///
/// Symbols are stored as raw bytes (e.g. `b'A'`, `b'-'`), one token per
/// alignment column. All sequences of one alignment share the same length.
///
/// # Example
/// ```
/// use phyloclust::model::Sequence;
///
/// let seq = Sequence::new("Kiwi", "ACGT");
/// assert_eq!(seq.name(), "Kiwi");
/// assert_eq!(seq.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    /// Unique name of this sequence (becomes the leaf label)
    name: String,
    /// Aligned symbols
    symbols: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence from a name and its aligned symbols.
    ///
    /// # Arguments
    /// * `name` - Unique identifier of the sequence
    /// * `symbols` - Aligned symbols, anything convertible to bytes
    pub fn new<N: Into<String>, S: AsRef<[u8]>>(name: N, symbols: S) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.as_ref().to_vec(),
        }
    }

    /// Returns the name of this sequence.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the aligned symbols of this sequence.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Returns the number of alignment columns.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the sequence has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// =#========================================================================#=
// DISTANCE
// =#========================================================================#=
/// Two sequences compared for distance are not of equal length,
/// i.e. they do not stem from the same alignment.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "sequences must already be aligned: '{first}' has {first_len} symbols, '{second}' has {second_len}"
)]
pub struct AlignmentMismatchError {
    /// Name of the first sequence
    pub first: String,
    /// Name of the second sequence
    pub second: String,
    /// Length of the first sequence
    pub first_len: usize,
    /// Length of the second sequence
    pub second_len: usize,
}

/// Returns the fraction of alignment columns in which `a` and `b` differ.
///
/// The result lies in `[0, 1]`, is symmetric, and is `0.0` exactly when both
/// sequences are identical (including two empty sequences).
///
/// # Errors
/// Returns [AlignmentMismatchError] if the sequences differ in length.
///
/// # Example
/// ```
/// use phyloclust::model::{Sequence, sequence_distance};
///
/// let a = Sequence::new("A", "ACGT");
/// let b = Sequence::new("B", "ACGA");
/// assert_eq!(sequence_distance(&a, &b).unwrap(), 0.25);
/// ```
pub fn sequence_distance(a: &Sequence, b: &Sequence) -> Result<f64, AlignmentMismatchError> {
    if a.len() != b.len() {
        return Err(AlignmentMismatchError {
            first: a.name.clone(),
            second: b.name.clone(),
            first_len: a.len(),
            second_len: b.len(),
        });
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let num_diffs = a
        .symbols
        .iter()
        .zip(b.symbols.iter())
        .filter(|(x, y)| x != y)
        .count();

    Ok(num_diffs as f64 / a.len() as f64)
}
