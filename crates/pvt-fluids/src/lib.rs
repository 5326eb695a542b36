//! pvt-fluids: the property oracle behind the pressure-volume diagram.
//!
//! Provides:
//! - Species definitions for pure fluids with a liquid-vapor dome
//! - The `PropertyOracle` trait: state queries from two known variables plus named constants
//! - CoolProp backend (via `rfluids`)
//! - A canned backend with recorded queries for tests
//! - Unit-aware parsing of text inputs
//!
//! # Example
//!
//! ```no_run
//! use pvt_core::units::{degc, pa_value};
//! use pvt_fluids::{CoolPropOracle, KnownVar, PropertyOracle, Species};
//!
//! let oracle = CoolPropOracle::new();
//! let p_sat = oracle
//!     .pressure(Species::H2O, KnownVar::Temperature(degc(100.0)), KnownVar::Quality(0.0))
//!     .unwrap();
//! println!("Saturation pressure: {} Pa", pa_value(p_sat));
//! ```

pub mod canned;
pub mod coolprop;
pub mod error;
pub mod oracle;
pub mod species;
pub mod units;

// Re-exports for ergonomics
pub use canned::{CannedOracle, Query};
pub use coolprop::CoolPropOracle;
pub use error::{FluidError, FluidResult};
pub use oracle::{FluidConstant, KnownVar, Property, PropertyOracle};
pub use species::Species;
pub use units::{Quantity, UnitError, parse_quantity};
