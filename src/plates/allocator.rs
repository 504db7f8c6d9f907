//! Greedy per-side plate allocation

use std::fmt;

use crate::plates::{PlateError, PlateInventory};
use crate::units::{Unit, Weight};

/// Plate supply backing a rack: the canonical unbounded table, or a finite
/// owned inventory.
#[derive(Debug, Clone)]
enum Supply {
    Unlimited(Vec<Weight>),
    Counted(PlateInventory),
}

/// A bar and the plates available to load it. Every surface that needs a
/// plate breakdown builds one rack and calls [`Rack::load`]; there is no
/// other plate math in the crate.
#[derive(Debug, Clone)]
pub struct Rack {
    bar_weight: Weight,
    supply: Supply,
}

impl Rack {
    /// Canonical plates and the default bar for a unit.
    pub fn standard(unit: Unit) -> Self {
        Rack {
            bar_weight: unit.bar_weight(),
            supply: Supply::Unlimited(unit.plate_sizes().to_vec()),
        }
    }

    /// Canonical plates with an overridden bar (women's bar, trap bar, ...).
    pub fn with_bar(unit: Unit, bar_weight: Weight) -> Self {
        Rack {
            bar_weight,
            supply: Supply::Unlimited(unit.plate_sizes().to_vec()),
        }
    }

    /// Finite inventory: usable sizes come from the inventory keys, and no
    /// size is spent beyond the pairs its count allows.
    pub fn from_inventory(bar_weight: Weight, inventory: PlateInventory) -> Self {
        Rack {
            bar_weight,
            supply: Supply::Counted(inventory),
        }
    }

    /// Custom size table without counts. Sizes are validated like inventory
    /// keys and sorted heaviest first.
    pub fn custom(bar_weight: Weight, mut sizes: Vec<Weight>) -> Result<Self, PlateError> {
        for size in &sizes {
            if size.is_zero() {
                return Err(PlateError::InvalidPlateSize(size.to_f64()));
            }
        }
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();
        Ok(Rack {
            bar_weight,
            supply: Supply::Unlimited(sizes),
        })
    }

    pub fn bar_weight(&self) -> Weight {
        self.bar_weight
    }

    /// Compute the plates for one sleeve of the bar at `target` total
    /// weight, greedy largest-first.
    ///
    /// Targets at or below the bar weight produce a bar-only loadout, and a
    /// remainder no available size can cover is left on
    /// [`Loadout::leftover`] - neither is an error. Under an inventory, a
    /// size whose remaining count drops below a pair is abandoned outright:
    /// a lone plate on one sleeve would unbalance the bar.
    pub fn load(&self, target: Weight) -> Loadout {
        let per_side_target = if target <= self.bar_weight {
            Weight::ZERO
        } else {
            Weight::from_hundredths((target.hundredths() - self.bar_weight.hundredths()) / 2)
        };

        let mut remaining = per_side_target;
        let mut per_side = Vec::new();

        match &self.supply {
            Supply::Unlimited(sizes) => {
                for &size in sizes {
                    while remaining >= size {
                        per_side.push(size);
                        remaining = remaining - size;
                    }
                }
            }
            Supply::Counted(inventory) => {
                for (size, owned) in inventory.entries_desc() {
                    // Working copy; the caller's inventory is never touched.
                    let mut available = owned;
                    while remaining >= size {
                        if available < 2 {
                            break;
                        }
                        available -= 2;
                        per_side.push(size);
                        remaining = remaining - size;
                    }
                }
            }
        }

        Loadout {
            bar_weight: self.bar_weight,
            per_side,
            leftover: remaining,
        }
    }
}

/// Result of one allocation: the plates for one sleeve, heaviest first.
/// The bar is loaded symmetrically, so the total is the bar plus twice the
/// per-side sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadout {
    bar_weight: Weight,
    per_side: Vec<Weight>,
    leftover: Weight,
}

impl Loadout {
    /// Plates for one sleeve, in the order they go on: heaviest closest to
    /// the collar.
    pub fn per_side(&self) -> &[Weight] {
        &self.per_side
    }

    /// Per-side remainder no available size could cover. Zero on an exact
    /// match.
    pub fn leftover(&self) -> Weight {
        self.leftover
    }

    pub fn bar_weight(&self) -> Weight {
        self.bar_weight
    }

    /// Total weight on the bar: the bar plus both loaded sleeves.
    pub fn total(&self) -> Weight {
        let side: Weight = self.per_side.iter().copied().sum();
        self.bar_weight + side + side
    }

    pub fn is_bar_only(&self) -> bool {
        self.per_side.is_empty()
    }

    /// Per-side plates grouped into (size, count) runs, heaviest first -
    /// what a set row renders as "2x45 1x25".
    pub fn grouped(&self) -> Vec<(Weight, usize)> {
        let mut grouped: Vec<(Weight, usize)> = Vec::new();
        for &size in &self.per_side {
            match grouped.last_mut() {
                Some((current, count)) if *current == size => *count += 1,
                _ => grouped.push((size, 1)),
            }
        }
        grouped
    }
}

impl fmt::Display for Loadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.per_side.is_empty() {
            return write!(f, "empty bar");
        }
        let plates: Vec<String> = self.per_side.iter().map(Weight::to_string).collect();
        write!(f, "{}", plates.join(" "))
    }
}
