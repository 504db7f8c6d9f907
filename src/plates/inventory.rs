//! Finite plate inventories - the plates a lifter actually owns

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::plates::PlateError;
use crate::units::Weight;

/// Owned plates by size. Counts are totals across both sleeves; the
/// allocator only ever spends them in pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateInventory {
    counts: BTreeMap<Weight, u32>,
}

impl PlateInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw (size, count) pairs, rejecting sizes that are not
    /// positive finite weights.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PlateError>
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        let mut inventory = PlateInventory::new();
        for (size, count) in pairs {
            if !size.is_finite() || size <= 0.0 {
                return Err(PlateError::InvalidPlateSize(size));
            }
            let size = Weight::from_f64(size).map_err(|_| PlateError::InvalidPlateSize(size))?;
            inventory.add(size, count)?;
        }
        Ok(inventory)
    }

    /// Add `count` plates of `size`, on top of any already recorded.
    pub fn add(&mut self, size: Weight, count: u32) -> Result<(), PlateError> {
        if size.is_zero() {
            return Err(PlateError::InvalidPlateSize(size.to_f64()));
        }
        *self.counts.entry(size).or_insert(0) += count;
        Ok(())
    }

    /// Sizes present, heaviest first - the order the allocator walks.
    pub fn sizes_desc(&self) -> impl Iterator<Item = Weight> + '_ {
        self.counts.keys().rev().copied()
    }

    /// (size, owned count) pairs, heaviest first.
    pub fn entries_desc(&self) -> impl Iterator<Item = (Weight, u32)> + '_ {
        self.counts.iter().rev().map(|(size, count)| (*size, *count))
    }

    /// Owned count for a size; absent sizes count as zero.
    pub fn count(&self, size: Weight) -> u32 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_plates(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl FromStr for PlateInventory {
    type Err = PlateError;

    /// Parse the CLI shorthand `"45x4,25x2,10x2"` (counts are both sides
    /// combined).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (size, count) = part
                .split_once(['x', 'X'])
                .ok_or_else(|| PlateError::InvalidPlateList(part.to_string()))?;
            let size: f64 = size
                .trim()
                .parse()
                .map_err(|_| PlateError::InvalidPlateList(part.to_string()))?;
            let count: u32 = count
                .trim()
                .parse()
                .map_err(|_| PlateError::InvalidPlateList(part.to_string()))?;
            pairs.push((size, count));
        }
        PlateInventory::from_pairs(pairs)
    }
}

/// Wire form for inventory files: a list of `{"size": 45, "count": 4}`.
#[derive(Serialize, Deserialize)]
struct PlateEntry {
    size: f64,
    count: u32,
}

impl Serialize for PlateInventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.counts.iter().map(|(size, count)| PlateEntry {
            size: size.to_f64(),
            count: *count,
        }))
    }
}

impl<'de> Deserialize<'de> for PlateInventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<PlateEntry>::deserialize(deserializer)?;
        PlateInventory::from_pairs(entries.into_iter().map(|e| (e.size, e.count)))
            .map_err(serde::de::Error::custom)
    }
}
