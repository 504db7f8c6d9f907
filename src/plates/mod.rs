//! Plate math - the one allocator every surface loads plates through
//!
//! Features:
//! - Greedy largest-first per-side allocation
//! - Finite plate inventories with pair-aware caps
//! - Best-effort results that surface the unloadable remainder

pub mod allocator;
pub mod inventory;

pub use allocator::{Loadout, Rack};
pub use inventory::PlateInventory;

use thiserror::Error;

/// Errors raised at the plate-configuration boundary. Allocation itself
/// never fails; bad sizes are rejected before a rack exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlateError {
    #[error("invalid plate size {0}: plate sizes must be positive, finite weights")]
    InvalidPlateSize(f64),
    #[error("invalid plate list '{0}': expected entries like \"45x4,25x2\"")]
    InvalidPlateList(String),
}
