//! Symmetric sparse distance storage keyed by unordered pairs.
//!
//! - [LabelPair]: normalized unordered pair of keys.
//! - [DistanceMatrix]: distance per pair, with a deterministic global minimum.

use std::collections::BTreeMap;

// =#========================================================================#=
// LABEL PAIR
// =#========================================================================#=
/// An unordered pair of keys, stored normalized so that `first <= second`.
///
/// Since `{a, b}` and `{b, a}` produce the same value, the pair can be used
/// directly as map key. The derived order is lexicographic on `(first, second)`.
///
/// # Example
/// ```
/// use phyloclust::cluster::LabelPair;
///
/// assert_eq!(LabelPair::new("Kea", "Kaka"), LabelPair::new("Kaka", "Kea"));
/// assert_eq!(LabelPair::new("Kea", "Kaka").first(), &"Kaka");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelPair<K> {
    first: K,
    second: K,
}

impl<K: Ord> LabelPair<K> {
    /// Creates the unordered pair `{k1, k2}`.
    pub fn new(k1: K, k2: K) -> Self {
        if k1 <= k2 {
            LabelPair {
                first: k1,
                second: k2,
            }
        } else {
            LabelPair {
                first: k2,
                second: k1,
            }
        }
    }

    /// Returns the smaller key.
    pub fn first(&self) -> &K {
        &self.first
    }

    /// Returns the larger key.
    pub fn second(&self) -> &K {
        &self.second
    }

    /// Returns `true` if `key` is one of the two keys.
    pub fn contains(&self, key: &K) -> bool {
        self.first == *key || self.second == *key
    }

    /// Consumes the pair, returning `(smaller, larger)`.
    pub fn into_keys(self) -> (K, K) {
        (self.first, self.second)
    }
}

// =#========================================================================#=
// DISTANCE MATRIX
// =#========================================================================#=
/// Symmetric mapping from unordered key pairs to distances.
///
/// Only pairs that were explicitly stored are present, so the matrix shrinks
/// as clusters get merged away.
///
/// # Tie-break
/// Entries are kept ordered by [LabelPair]. [min_entry](DistanceMatrix::min_entry)
/// returns the lexicographically smallest pair among all pairs holding the
/// minimum value, which makes clustering reproducible.
///
/// # Example
/// ```
/// use phyloclust::cluster::DistanceMatrix;
///
/// let mut matrix = DistanceMatrix::new();
/// matrix.put("A", "C", 0.25);
/// matrix.put("B", "A", 0.25);
/// matrix.put("C", "B", 0.5);
///
/// assert_eq!(matrix.get("A", "B"), Some(0.25));
/// let (pair, value) = matrix.min_entry().unwrap();
/// assert_eq!((*pair.first(), *pair.second(), value), ("A", "B", 0.25));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix<K> {
    entries: BTreeMap<LabelPair<K>, f64>,
}

impl<K: Ord> DistanceMatrix<K> {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        DistanceMatrix {
            entries: BTreeMap::new(),
        }
    }

    /// Stores `value` for `{k1, k2}`, replacing any previous value for the pair
    /// regardless of the key order it was stored with.
    pub fn put(&mut self, k1: K, k2: K, value: f64) {
        debug_assert!(value >= 0.0, "distances must be non-negative, got {value}");
        self.entries.insert(LabelPair::new(k1, k2), value);
    }

    /// Returns the value stored for `{k1, k2}`, or `None` if there is none.
    pub fn get(&self, k1: K, k2: K) -> Option<f64> {
        self.entries.get(&LabelPair::new(k1, k2)).copied()
    }

    /// Returns `true` if a value is stored for `{k1, k2}`.
    pub fn contains(&self, k1: K, k2: K) -> bool {
        self.entries.contains_key(&LabelPair::new(k1, k2))
    }

    /// Removes and returns the value for `{k1, k2}`; no-op if absent.
    pub fn remove(&mut self, k1: K, k2: K) -> Option<f64> {
        self.entries.remove(&LabelPair::new(k1, k2))
    }

    /// Returns the pair with the smallest value together with that value,
    /// or `None` if the matrix is empty.
    ///
    /// Ties are broken by the smallest pair (see [DistanceMatrix] docs).
    /// Scans all entries.
    pub fn min_entry(&self) -> Option<(&LabelPair<K>, f64)> {
        let mut min: Option<(&LabelPair<K>, f64)> = None;

        // Iteration is in pair order, so only a strictly smaller value replaces
        for (pair, &value) in &self.entries {
            if min.is_none_or(|(_, min_value)| value < min_value) {
                min = Some((pair, value));
            }
        }

        min
    }

    /// Returns the number of stored pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all pairs and values, in pair order.
    pub fn iter(&self) -> impl Iterator<Item = (&LabelPair<K>, f64)> {
        self.entries.iter().map(|(pair, &value)| (pair, value))
    }
}
