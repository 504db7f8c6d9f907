//! barload - Barbell loading companion
//!
//! Plate math for the bar in front of you: greedy per-side breakdowns,
//! warmup ramps, set logging, and rest timing.

pub mod db;
pub mod plates;
pub mod stats;
pub mod timer;
pub mod tui;
pub mod units;
pub mod warmup;

pub use db::Database;
pub use plates::Rack;
