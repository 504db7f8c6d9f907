//! Stats module - volume, frequency, and strength estimates over logged sets

use crate::db::WorkoutSet;
use crate::units::{Unit, Weight};

/// Maximum reps for which e1RM formulas are considered reliable.
const MAX_RELIABLE_REPS: i32 = 15;

/// Estimated 1RM from weight and reps, averaging the Epley, Brzycki, and
/// Lander formulas.
///
/// One rep is already a max and is returned as-is. Reps beyond
/// [`MAX_RELIABLE_REPS`] are capped, the formulas lose meaning past that.
pub fn one_rep_max(weight: Weight, reps: i32) -> Weight {
    if weight.is_zero() || reps <= 0 {
        return Weight::ZERO;
    }
    if reps == 1 {
        return weight;
    }

    let r = reps.min(MAX_RELIABLE_REPS) as f64;
    let w = weight.to_f64();

    // Epley: w * (1 + r/30)
    let epley = w * (1.0 + r / 30.0);
    // Brzycki: w * 36 / (37 - r)
    let brzycki = w * 36.0 / (37.0 - r);
    // Lander: w * 100 / (101.3 - 2.67 * r)
    let lander = w * 100.0 / (101.3 - 2.67 * r);

    let avg = (epley + brzycki + lander) / 3.0;
    Weight::from_f64(avg).unwrap_or(weight)
}

/// Training analytics over a list of logged sets, newest first
pub struct Analytics {
    sets: Vec<WorkoutSet>,
}

impl Analytics {
    pub fn new(sets: Vec<WorkoutSet>) -> Self {
        Self { sets }
    }

    /// Calculate total volume (sets * reps) for an exercise
    pub fn total_volume(&self, exercise: &str) -> i32 {
        self.sets
            .iter()
            .filter(|s| s.exercise.to_lowercase().contains(&exercise.to_lowercase()))
            .map(|s| s.sets * s.reps)
            .sum()
    }

    /// Get logging frequency (sets per week)
    pub fn weekly_frequency(&self) -> f64 {
        if self.sets.is_empty() {
            return 0.0;
        }

        let dates: Vec<_> = self.sets.iter().map(|s| s.date.date_naive()).collect();
        if dates.len() < 2 {
            return 0.0;
        }

        let first = dates.last().unwrap();
        let last = dates.first().unwrap();
        let days = (*last - *first).num_days() as f64;

        if days == 0.0 {
            return self.sets.len() as f64;
        }

        (self.sets.len() as f64 / days) * 7.0
    }

    /// Heaviest set logged for an exercise
    pub fn best_set(&self, exercise: &str) -> Option<&WorkoutSet> {
        self.sets
            .iter()
            .filter(|s| s.exercise.to_lowercase().contains(&exercise.to_lowercase()))
            .max_by_key(|s| s.weight)
    }

    /// Best estimated 1RM for an exercise across all logged sets
    pub fn estimated_one_rep_max(&self, exercise: &str) -> Option<Weight> {
        self.sets
            .iter()
            .filter(|s| s.exercise.to_lowercase().contains(&exercise.to_lowercase()))
            .map(|s| one_rep_max(s.weight, s.reps))
            .max()
    }

    /// Suggest next load (recent average plus one loadable increment)
    pub fn suggest_next_load(&self, exercise: &str) -> Option<(Weight, Unit)> {
        let recent: Vec<_> = self
            .sets
            .iter()
            .filter(|s| s.exercise.to_lowercase().contains(&exercise.to_lowercase()))
            .take(5)
            .collect();

        if recent.is_empty() {
            return None;
        }

        // The most recent set decides the unit; mixed-unit history would
        // average apples and oranges
        let unit = recent[0].unit;
        let same_unit: Vec<_> = recent.iter().filter(|s| s.unit == unit).collect();

        let total: u64 = same_unit.iter().map(|s| s.weight.hundredths() as u64).sum();
        let avg = Weight::from_hundredths((total / same_unit.len() as u64) as u32);

        // Slight progression suggestion
        Some((avg.round_to(unit.increment()) + unit.increment(), unit))
    }
}
