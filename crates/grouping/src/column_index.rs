//! Per-column first-owner index.
//!
//! Column `i` maps each value seen there to the first record that presented
//! it. Later records with the same value only need to be joined with that
//! owner: once joined they share a root, so everyone after them joins the
//! same set.

use rustc_hash::FxHashMap;

/// Hash key for a parsed field value: the exact `f64` bit pattern.
///
/// No numeric tolerance. `0.0` and `-0.0` are distinct keys, and all `NaN`s
/// the parser produces share one pattern and therefore match each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueKey(u64);

impl ValueKey {
    pub fn new(value: f64) -> Self {
        Self(value.to_bits())
    }
}

#[derive(Debug, Default)]
pub struct ColumnIndex {
    columns: Vec<FxHashMap<ValueKey, usize>>,
}

impl ColumnIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns seen so far (the widest record's field count,
    /// ignoring trailing nulls).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[cfg(test)]
    fn distinct_values(&self, column: usize) -> usize {
        self.columns.get(column).map_or(0, |c| c.len())
    }

    #[cfg(test)]
    fn owner(&self, column: usize, value: f64) -> Option<usize> {
        self.columns.get(column)?.get(&ValueKey::new(value)).copied()
    }

    /// Claim `value` in `column` for `record`.
    ///
    /// Returns the earlier owner if the value was already claimed, leaving it
    /// in place. Otherwise records `record` as owner and returns `None`.
    pub fn claim(&mut self, column: usize, value: f64, record: usize) -> Option<usize> {
        if column >= self.columns.len() {
            self.columns.resize_with(column + 1, FxHashMap::default);
        }
        let map = &mut self.columns[column];
        match map.get(&ValueKey::new(value)) {
            Some(&owner) => Some(owner),
            None => {
                map.insert(ValueKey::new(value), record);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_wins() {
        let mut index = ColumnIndex::new();
        assert_eq!(index.claim(0, 1.0, 0), None);
        assert_eq!(index.claim(0, 1.0, 1), Some(0));
        assert_eq!(index.claim(0, 1.0, 2), Some(0));
        assert_eq!(index.owner(0, 1.0), Some(0));
        assert_eq!(index.distinct_values(0), 1);
    }

    #[test]
    fn columns_are_independent() {
        let mut index = ColumnIndex::new();
        assert_eq!(index.claim(0, 7.0, 0), None);
        assert_eq!(index.claim(1, 7.0, 1), None);
        assert_eq!(index.owner(0, 7.0), Some(0));
        assert_eq!(index.owner(1, 7.0), Some(1));
    }

    #[test]
    fn grows_lazily_to_widest_column() {
        let mut index = ColumnIndex::new();
        assert_eq!(index.width(), 0);
        index.claim(4, 1.0, 0);
        assert_eq!(index.width(), 5);
        assert_eq!(index.distinct_values(2), 0);
        assert_eq!(index.owner(9, 1.0), None);
        index.claim(1, 1.0, 1);
        assert_eq!(index.width(), 5);
    }

    #[test]
    fn keys_compare_by_bit_pattern() {
        let mut index = ColumnIndex::new();
        assert_eq!(index.claim(0, 0.0, 0), None);
        assert_eq!(index.claim(0, -0.0, 1), None);
        assert_eq!(index.claim(0, f64::NAN, 2), None);
        assert_eq!(index.claim(0, "NaN".parse::<f64>().unwrap(), 3), Some(2));
        assert_eq!(index.claim(0, 1.0, 4), None);
        assert_eq!(index.claim(0, 1.0000000000000002, 5), None);
    }

    #[test]
    fn value_key_is_bit_exact() {
        assert_eq!(ValueKey::new(3.0), ValueKey::new(3.0));
        assert_ne!(ValueKey::new(0.0), ValueKey::new(-0.0));
        assert_eq!(ValueKey::new(f64::NAN), ValueKey::new(f64::NAN));
    }
}
