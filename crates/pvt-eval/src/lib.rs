//! pvt-eval: pressure as a function of volume for the pressure-volume diagram.
//!
//! Three policies share one reference object built once from the property oracle:
//! - `SaturationCurve`: the liquid-vapor dome in raw specific volume, flat across a
//!   tolerance band at the critical volume
//! - `RealIsotherm`: real-fluid isotherm in log-volume coordinates
//! - `IdealIsotherm`: `P = R T / v` in the same coordinates
//!
//! `Curve` samples any of them over a `Domain` for plotting.

pub mod curve;
pub mod error;
pub mod isotherm;
pub mod log_volume;
pub mod reference;
pub mod saturation;

pub use curve::{Curve, Domain, PressureCurve, sample_curve};
pub use error::{EvalError, EvalResult};
pub use isotherm::{IdealIsotherm, IsothermMarkers, RealIsotherm};
pub use log_volume::{from_log_volume, to_log_volume};
pub use reference::{FluidReference, ReferenceConditions};
pub use saturation::{FlatBand, SaturationBranch, SaturationCurve};
