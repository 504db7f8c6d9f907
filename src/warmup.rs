//! Warmup pyramid: ramp sets from the empty bar up to the work weight,
//! each with its own plate breakdown.

use crate::plates::{Loadout, Rack};
use crate::units::{Unit, Weight};

/// Default ramp as (percent of work weight, reps). The 0% entry is the
/// empty bar.
pub const WARMUP_SCHEME: &[(u32, u32)] = &[(0, 10), (40, 5), (60, 3), (80, 2)];

/// One ramp set: the rounded target and the plates that reach it.
#[derive(Debug, Clone)]
pub struct WarmupSet {
    pub percent: u32,
    pub reps: u32,
    pub target: Weight,
    pub loadout: Loadout,
}

/// Ramp sets for `work` using the default scheme.
pub fn warmup_sets(rack: &Rack, unit: Unit, work: Weight) -> Vec<WarmupSet> {
    warmup_sets_with(rack, unit, work, WARMUP_SCHEME)
}

/// Ramp sets for `work` using a custom `(percent, reps)` scheme.
///
/// Each target is rounded to the unit's smallest loadable increment and
/// floored at the bar weight. Consecutive steps that land on the same
/// target collapse into the earlier set, so a light work weight can shrink
/// the ramp down to a single bar set.
pub fn warmup_sets_with(
    rack: &Rack,
    unit: Unit,
    work: Weight,
    scheme: &[(u32, u32)],
) -> Vec<WarmupSet> {
    let mut sets: Vec<WarmupSet> = Vec::new();
    for &(percent, reps) in scheme {
        let raw = work.hundredths() as u64 * percent as u64 / 100;
        let raw = Weight::from_hundredths(raw.min(u32::MAX as u64) as u32);
        let mut target = raw.round_to(unit.increment());
        if target < rack.bar_weight() {
            target = rack.bar_weight();
        }
        if sets.last().is_some_and(|prev| prev.target == target) {
            continue;
        }
        sets.push(WarmupSet {
            percent,
            reps,
            target,
            loadout: rack.load(target),
        });
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(value: f64) -> Weight {
        Weight::from_f64(value).unwrap()
    }

    fn targets(sets: &[WarmupSet]) -> Vec<f64> {
        sets.iter().map(|s| s.target.to_f64()).collect()
    }

    #[test]
    fn test_standard_lbs_pyramid() {
        let rack = Rack::standard(Unit::Lbs);
        let sets = warmup_sets(&rack, Unit::Lbs, w(225.0));
        assert_eq!(targets(&sets), vec![45.0, 90.0, 135.0, 180.0]);
        assert_eq!(
            sets.iter().map(|s| s.reps).collect::<Vec<_>>(),
            vec![10, 5, 3, 2]
        );
        assert!(sets[0].loadout.is_bar_only(), "0% step is the empty bar");
        assert_eq!(
            sets[1].loadout.per_side(),
            &[w(10.0), w(10.0), w(2.5)],
            "90 lbs is 22.5 per side"
        );
    }

    #[test]
    fn test_kg_pyramid() {
        let rack = Rack::standard(Unit::Kg);
        let sets = warmup_sets(&rack, Unit::Kg, w(100.0));
        assert_eq!(targets(&sets), vec![20.0, 40.0, 60.0, 80.0]);
        assert_eq!(sets[3].loadout.per_side(), &[w(25.0), w(5.0)]);
    }

    #[test]
    fn test_targets_round_to_increment() {
        // 147 lbs: 58.8 / 88.2 / 117.6 land on the nearest 5
        let rack = Rack::standard(Unit::Lbs);
        let sets = warmup_sets(&rack, Unit::Lbs, w(147.0));
        assert_eq!(targets(&sets), vec![45.0, 60.0, 90.0, 120.0]);
    }

    #[test]
    fn test_light_work_collapses_to_bar() {
        let rack = Rack::standard(Unit::Lbs);
        let sets = warmup_sets(&rack, Unit::Lbs, w(55.0));
        assert_eq!(sets.len(), 1, "every step floors to the bar");
        assert_eq!(sets[0].target, w(45.0));
        assert_eq!(sets[0].reps, 10);
    }

    #[test]
    fn test_duplicate_targets_merge_partially() {
        // 65 lbs: 40% and 60% both floor to the bar, 80% survives at 50
        let rack = Rack::standard(Unit::Lbs);
        let sets = warmup_sets(&rack, Unit::Lbs, w(65.0));
        assert_eq!(targets(&sets), vec![45.0, 50.0]);
        assert_eq!(sets[1].reps, 2);
    }

    #[test]
    fn test_custom_scheme() {
        let rack = Rack::standard(Unit::Lbs);
        let sets = warmup_sets_with(&rack, Unit::Lbs, w(225.0), &[(50, 8)]);
        assert_eq!(targets(&sets), vec![115.0], "112.5 rounds up to 115");
        assert_eq!(sets[0].reps, 8);
    }

    #[test]
    fn test_inventory_rack_carries_through() {
        let inventory =
            crate::plates::PlateInventory::from_pairs([(25.0, 2), (10.0, 2)]).unwrap();
        let rack = Rack::from_inventory(w(45.0), inventory);
        let sets = warmup_sets(&rack, Unit::Lbs, w(225.0));
        // 180 wants 67.5 per side but only 25 + 10 are available
        let last = sets.last().unwrap();
        assert_eq!(last.target, w(180.0));
        assert_eq!(last.loadout.per_side(), &[w(25.0), w(10.0)]);
        assert_eq!(last.loadout.leftover(), w(32.5));
    }
}
