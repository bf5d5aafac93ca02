//! Symbol frequency counting.
//!
//! A symbol is a single Unicode code point. Counting performs no
//! normalization or case folding: `'a'` and `'A'` are distinct symbols.

use std::collections::BTreeMap;

/// Occurrence count of every symbol in a text.
///
/// Keys are unique and iterate in ascending code-point order, which gives the
/// tree builder a deterministic input order for equal counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every code point of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of code points counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending code-point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            if count > 0 {
                *counts.entry(symbol).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}
