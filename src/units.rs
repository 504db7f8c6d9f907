//! Units and weights - fixed-point weight math and the canonical plate tables

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when turning raw numbers or text into a [`Weight`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    #[error("invalid weight '{0}': expected a number like 185 or 102.5")]
    Unparseable(String),
    #[error("invalid weight {0}: must be finite and non-negative")]
    OutOfRange(f64),
}

/// Measurement system for bar weights and plate sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Lbs,
    Kg,
}

impl Unit {
    /// Default bar weight for the unit (standard 45 lbs / 20 kg bar)
    pub fn bar_weight(self) -> Weight {
        match self {
            Unit::Lbs => BAR_WEIGHT_LBS,
            Unit::Kg => BAR_WEIGHT_KG,
        }
    }

    /// Canonical plate sizes for the unit, heaviest first
    pub fn plate_sizes(self) -> &'static [Weight] {
        match self {
            Unit::Lbs => &PLATES_LBS,
            Unit::Kg => &PLATES_KG,
        }
    }

    /// Smallest step between loadable totals: one pair of the smallest
    /// canonical plates (5 lbs or 2.5 kg)
    pub fn increment(self) -> Weight {
        match self {
            Unit::Lbs => Weight::from_hundredths(500),
            Unit::Kg => Weight::from_hundredths(250),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Lbs => write!(f, "lbs"),
            Unit::Kg => write!(f, "kg"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" => Ok(Unit::Lbs),
            "kg" | "kgs" => Ok(Unit::Kg),
            _ => Err(format!("invalid unit '{s}': expected 'lbs' or 'kg'")),
        }
    }
}

/// Weight stored as hundredths of a unit, so fractional plate sizes like
/// 1.25 stay exact and repeated subtraction cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Weight(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Convert from a raw number, rejecting anything that is not a finite,
    /// non-negative weight representable in hundredths.
    pub fn from_f64(value: f64) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange(value));
        }
        let hundredths = (value * 100.0).round();
        if hundredths > f64::from(u32::MAX) {
            return Err(WeightError::OutOfRange(value));
        }
        Ok(Weight(hundredths as u32))
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Round to the nearest multiple of `step` (half rounds up). Used to
    /// snap warm-up targets onto loadable totals.
    pub fn round_to(self, step: Weight) -> Weight {
        if step.0 == 0 {
            return self;
        }
        Weight((self.0 + step.0 / 2) / step.0 * step.0)
    }

    pub fn saturating_sub(self, other: Weight) -> Weight {
        Weight(self.0.saturating_sub(other.0))
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

impl AddAssign for Weight {
    fn add_assign(&mut self, rhs: Weight) {
        self.0 += rhs.0;
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0 - rhs.0)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, |acc, w| acc + w)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

impl FromStr for Weight {
    type Err = WeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| WeightError::Unparseable(s.to_string()))?;
        Weight::from_f64(value)
    }
}

// Weights cross JSON as plain numbers (225, 102.5), not as hundredths.
impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Weight::from_f64(value).map_err(serde::de::Error::custom)
    }
}

/// Canonical pound plates per side, heaviest first
pub const PLATES_LBS: [Weight; 6] = [
    Weight::from_hundredths(4500),
    Weight::from_hundredths(3500),
    Weight::from_hundredths(2500),
    Weight::from_hundredths(1000),
    Weight::from_hundredths(500),
    Weight::from_hundredths(250),
];

/// Canonical kilogram plates per side, heaviest first
pub const PLATES_KG: [Weight; 7] = [
    Weight::from_hundredths(2500),
    Weight::from_hundredths(2000),
    Weight::from_hundredths(1500),
    Weight::from_hundredths(1000),
    Weight::from_hundredths(500),
    Weight::from_hundredths(250),
    Weight::from_hundredths(125),
];

/// Standard 45 lbs bar
pub const BAR_WEIGHT_LBS: Weight = Weight::from_hundredths(4500);

/// Standard 20 kg bar
pub const BAR_WEIGHT_KG: Weight = Weight::from_hundredths(2000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_from_str() {
        assert_eq!("225".parse::<Weight>().unwrap().hundredths(), 22500);
        assert_eq!("102.5".parse::<Weight>().unwrap().hundredths(), 10250);
        assert_eq!("2.5".parse::<Weight>().unwrap().hundredths(), 250);
        assert_eq!(" 45 ".parse::<Weight>().unwrap().hundredths(), 4500);
        assert_eq!("0".parse::<Weight>().unwrap(), Weight::ZERO);
    }

    #[test]
    fn test_weight_from_str_rejects_garbage() {
        assert!(matches!(
            "heavy".parse::<Weight>(),
            Err(WeightError::Unparseable(_))
        ));
        assert!(matches!(
            "-5".parse::<Weight>(),
            Err(WeightError::OutOfRange(_))
        ));
        assert!(matches!(
            "inf".parse::<Weight>(),
            Err(WeightError::OutOfRange(_))
        ));
        assert!(matches!(
            "NaN".parse::<Weight>(),
            Err(WeightError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_weight_display_trims_zeros() {
        assert_eq!(Weight::from_hundredths(4500).to_string(), "45");
        assert_eq!(Weight::from_hundredths(250).to_string(), "2.5");
        assert_eq!(Weight::from_hundredths(10250).to_string(), "102.5");
        assert_eq!(Weight::from_hundredths(25).to_string(), "0.25");
        assert_eq!(Weight::from_hundredths(10005).to_string(), "100.05");
    }

    #[test]
    fn test_weight_fractional_sum_is_exact() {
        // 1.25 + 1.25 must be exactly 2.5, no float drift
        let micro = Weight::from_hundredths(125);
        assert_eq!(micro + micro, Weight::from_hundredths(250));
        let total: Weight = [micro, micro, micro, micro].into_iter().sum();
        assert_eq!(total.to_string(), "5");
    }

    #[test]
    fn test_weight_round_to_increment() {
        let step = Unit::Lbs.increment(); // 5 lbs
        assert_eq!(Weight::from_hundredths(8300).round_to(step).to_string(), "85");
        assert_eq!(Weight::from_hundredths(8200).round_to(step).to_string(), "80");
        // Half rounds up
        assert_eq!(Weight::from_hundredths(8250).round_to(step).to_string(), "85");
        assert_eq!(Weight::ZERO.round_to(step), Weight::ZERO);
    }

    #[test]
    fn test_weight_serde_as_number() {
        let w: Weight = serde_json::from_str("102.5").unwrap();
        assert_eq!(w.hundredths(), 10250);
        assert_eq!(serde_json::to_string(&w).unwrap(), "102.5");
        assert!(serde_json::from_str::<Weight>("-3").is_err());
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("lbs".parse::<Unit>().unwrap(), Unit::Lbs);
        assert_eq!("LB".parse::<Unit>().unwrap(), Unit::Lbs);
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kg);
        assert!("stone".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_defaults() {
        assert_eq!(Unit::Lbs.bar_weight().to_string(), "45");
        assert_eq!(Unit::Kg.bar_weight().to_string(), "20");
        assert_eq!(Unit::Lbs.increment().to_string(), "5");
        assert_eq!(Unit::Kg.increment().to_string(), "2.5");
    }

    #[test]
    fn test_canonical_tables_descend() {
        for unit in [Unit::Lbs, Unit::Kg] {
            let sizes = unit.plate_sizes();
            for pair in sizes.windows(2) {
                assert!(pair[0] > pair[1], "{unit} table out of order: {pair:?}");
            }
        }
    }
}
