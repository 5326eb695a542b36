//! Saturation pressure as a function of specific volume.

use crate::curve::PressureCurve;
use crate::error::{EvalError, EvalResult};
use crate::reference::FluidReference;
use pvt_core::units::{SpecVolume, density_from_volume, pa_value};
use pvt_fluids::{KnownVar, PropertyOracle};
use serde::{Deserialize, Serialize};

/// Fractional band around the critical volume where the dome is held at pmax.
///
/// The oracle struggles to converge near the critical point. The band is deliberately
/// asymmetric: it extends `liquid` below vcrit and `vapor` above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatBand {
    pub liquid: f64,
    pub vapor: f64,
}

impl Default for FlatBand {
    fn default() -> Self {
        Self {
            liquid: 0.11,
            vapor: 0.00,
        }
    }
}

impl FlatBand {
    pub fn validate(&self) -> EvalResult<()> {
        if !self.liquid.is_finite() || !(0.0..1.0).contains(&self.liquid) {
            return Err(EvalError::InvalidArg {
                what: format!("liquid band fraction must be in [0, 1), got {}", self.liquid),
            });
        }
        if !self.vapor.is_finite() || self.vapor < 0.0 {
            return Err(EvalError::InvalidArg {
                what: format!("vapor band fraction must be >= 0, got {}", self.vapor),
            });
        }
        Ok(())
    }

    /// Volumes bounding the band, `((1 - liquid) vcrit, (1 + vapor) vcrit)`.
    pub fn bounds(&self, v_crit: SpecVolume) -> (SpecVolume, SpecVolume) {
        ((1.0 - self.liquid) * v_crit, (1.0 + self.vapor) * v_crit)
    }
}

/// Which side of the dome a volume falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationBranch {
    /// Saturated liquid, queried at quality 0
    Liquid,
    /// Inside the flat band, pinned to the critical pressure
    CriticalBand,
    /// Saturated vapor, queried at quality 1
    Vapor,
}

/// The liquid-vapor dome `p(v)` in raw specific volume.
pub struct SaturationCurve<'a> {
    oracle: &'a dyn PropertyOracle,
    reference: &'a FluidReference,
    band: FlatBand,
}

impl<'a> SaturationCurve<'a> {
    pub fn new(
        oracle: &'a dyn PropertyOracle,
        reference: &'a FluidReference,
        band: FlatBand,
    ) -> EvalResult<Self> {
        band.validate()?;
        Ok(Self {
            oracle,
            reference,
            band,
        })
    }

    pub fn band(&self) -> FlatBand {
        self.band
    }

    pub fn branch(&self, v: SpecVolume) -> SaturationBranch {
        let (lower, upper) = self.band.bounds(self.reference.v_crit());
        if v < lower {
            SaturationBranch::Liquid
        } else if v > upper {
            SaturationBranch::Vapor
        } else {
            SaturationBranch::CriticalBand
        }
    }

    /// Saturation pressure [Pa] at specific volume `v`.
    pub fn pressure_at(&self, v: SpecVolume) -> EvalResult<f64> {
        if !v.is_finite() || v <= 0.0 {
            return Err(EvalError::InvalidArg {
                what: format!("specific volume must be positive and finite, got {v}"),
            });
        }

        let quality = match self.branch(v) {
            SaturationBranch::Liquid => 0.0,
            SaturationBranch::Vapor => 1.0,
            SaturationBranch::CriticalBand => return Ok(self.reference.p_max_pa()),
        };
        let p = self.oracle.pressure(
            self.reference.species(),
            KnownVar::Density(density_from_volume(v)),
            KnownVar::Quality(quality),
        )?;
        Ok(pa_value(p))
    }
}

impl PressureCurve for SaturationCurve<'_> {
    fn pressure(&self, v: f64) -> EvalResult<f64> {
        self.pressure_at(v)
    }
}
