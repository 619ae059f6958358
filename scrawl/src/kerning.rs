//! Pair kerning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One kerning entry: move `right` by `value` design units when it follows
/// `left`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KernPair {
    pub left: char,
    pub right: char,
    pub value: f64,
}

/// Signed spacing adjustments for ordered character pairs.
///
/// Absence means zero. Iteration is in pair order, which keeps everything
/// built from the table deterministic. The persisted form is a list of
/// [`KernPair`] entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<KernPair>", into = "Vec<KernPair>")]
pub struct KerningTable {
    pairs: BTreeMap<(char, char), f64>,
}

impl KerningTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// The adjustment for `right` following `left`; zero when the pair has
    /// no entry.
    pub fn adjustment(&self, left: char, right: char) -> f64 {
        self.pairs.get(&(left, right)).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, left: char, right: char, value: f64) {
        self.pairs.insert((left, right), value);
    }

    pub fn remove(&mut self, left: char, right: char) -> Option<f64> {
        self.pairs.remove(&(left, right))
    }

    pub fn iter(&self) -> impl Iterator<Item = ((char, char), f64)> + '_ {
        self.pairs.iter().map(|(pair, value)| (*pair, *value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Vec<KernPair>> for KerningTable {
    fn from(entries: Vec<KernPair>) -> Self {
        let mut table = KerningTable::new();
        for entry in entries {
            table.set(entry.left, entry.right, entry.value);
        }
        table
    }
}

impl From<KerningTable> for Vec<KernPair> {
    fn from(table: KerningTable) -> Self {
        table
            .iter()
            .map(|((left, right), value)| KernPair { left, right, value })
            .collect()
    }
}
