//! pvt-core: shared foundation for the pressure-volume diagram workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, specific volume helpers)
//! - numeric (Real + float helpers for axis rounding and interpolation)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PvtError, PvtResult};
pub use numeric::*;
pub use units::*;
