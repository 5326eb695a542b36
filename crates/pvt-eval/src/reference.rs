//! Fluid reference constants for the diagram, computed once from the oracle.

use crate::error::{EvalError, EvalResult};
use crate::log_volume::{from_log_volume, to_log_volume};
use pvt_core::units::{
    Pressure, SpecVolume, Temperature, k, k_value, pa, pa_value, volume_from_density,
};
use pvt_fluids::{KnownVar, PropertyOracle, Species};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Conditions that pin the ends of the plotted dome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConditions {
    /// Temperature whose saturation pressure is the lowest plotted pressure [K]
    pub boiling_temperature_k: f64,
    /// The vapor end of the dome sits at `pmin / vapor_pressure_divisor`
    pub vapor_pressure_divisor: f64,
}

impl Default for ReferenceConditions {
    fn default() -> Self {
        Self {
            boiling_temperature_k: 373.15,
            vapor_pressure_divisor: 5.0,
        }
    }
}

/// Immutable reference constants shared by every evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluidReference {
    species: Species,
    p_min_pa: f64,
    p_max_pa: f64,
    t_crit_k: f64,
    v_min: SpecVolume,
    v_max: SpecVolume,
    v_crit: SpecVolume,
    r_specific: f64,
}

impl FluidReference {
    /// Query the oracle for the reference constants of `species`.
    ///
    /// - pmin: saturation pressure at the boiling temperature
    /// - pmax: critical pressure; Tmax: critical temperature
    /// - vmin: saturated liquid at pmin
    /// - vmax: saturated vapor at pmin / divisor
    /// - vcrit: state at (pmax, Tmax)
    /// - R: molar gas constant / molar mass
    pub fn from_oracle(
        oracle: &dyn PropertyOracle,
        species: Species,
        conditions: &ReferenceConditions,
    ) -> EvalResult<Self> {
        if !conditions.vapor_pressure_divisor.is_finite() || conditions.vapor_pressure_divisor < 1.0
        {
            return Err(EvalError::InvalidArg {
                what: format!(
                    "vapor pressure divisor must be >= 1, got {}",
                    conditions.vapor_pressure_divisor
                ),
            });
        }

        let p_min = oracle.pressure(
            species,
            KnownVar::Temperature(k(conditions.boiling_temperature_k)),
            KnownVar::Quality(0.0),
        )?;
        let p_max = oracle.critical_pressure(species)?;
        let t_crit = oracle.critical_temperature(species)?;

        let rho_min = oracle.density(species, KnownVar::Pressure(p_min), KnownVar::Quality(0.0))?;
        let p_vapor_end = pa(pa_value(p_min) / conditions.vapor_pressure_divisor);
        let rho_max = oracle.density(
            species,
            KnownVar::Pressure(p_vapor_end),
            KnownVar::Quality(1.0),
        )?;
        let rho_crit = oracle.density(
            species,
            KnownVar::Pressure(p_max),
            KnownVar::Temperature(t_crit),
        )?;
        let r_specific = oracle.specific_gas_constant(species)?;

        let reference = Self::from_values(
            species,
            pa_value(p_min),
            pa_value(p_max),
            k_value(t_crit),
            volume_from_density(rho_min),
            volume_from_density(rho_max),
            volume_from_density(rho_crit),
            r_specific,
        )?;

        info!(
            oracle = oracle.name(),
            fluid = species.display_name(),
            p_min_pa = reference.p_min_pa,
            p_max_pa = reference.p_max_pa,
            t_crit_k = reference.t_crit_k,
            v_min = reference.v_min,
            v_crit = reference.v_crit,
            v_max = reference.v_max,
            r_specific = reference.r_specific,
            "reference constants computed"
        );
        Ok(reference)
    }

    /// Build from known values, checking that they describe a dome.
    #[allow(clippy::too_many_arguments)]
    pub fn from_values(
        species: Species,
        p_min_pa: f64,
        p_max_pa: f64,
        t_crit_k: f64,
        v_min: SpecVolume,
        v_max: SpecVolume,
        v_crit: SpecVolume,
        r_specific: f64,
    ) -> EvalResult<Self> {
        let values = [
            ("pmin", p_min_pa),
            ("pmax", p_max_pa),
            ("Tcrit", t_crit_k),
            ("vmin", v_min),
            ("vmax", v_max),
            ("vcrit", v_crit),
            ("R", r_specific),
        ];
        if let Some((name, value)) = values
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(EvalError::Reference {
                what: format!("{name} must be positive and finite, got {value}"),
            });
        }
        if !(v_min < v_crit && v_crit < v_max) {
            return Err(EvalError::Reference {
                what: format!("expected vmin < vcrit < vmax, got {v_min} / {v_crit} / {v_max}"),
            });
        }
        if p_min_pa >= p_max_pa {
            return Err(EvalError::Reference {
                what: format!("expected pmin < pmax, got {p_min_pa} / {p_max_pa}"),
            });
        }

        Ok(Self {
            species,
            p_min_pa,
            p_max_pa,
            t_crit_k,
            v_min,
            v_max,
            v_crit,
            r_specific,
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn p_min(&self) -> Pressure {
        pa(self.p_min_pa)
    }

    /// Critical pressure.
    pub fn p_max(&self) -> Pressure {
        pa(self.p_max_pa)
    }

    pub fn p_min_pa(&self) -> f64 {
        self.p_min_pa
    }

    pub fn p_max_pa(&self) -> f64 {
        self.p_max_pa
    }

    pub fn t_crit(&self) -> Temperature {
        k(self.t_crit_k)
    }

    pub fn t_crit_k(&self) -> f64 {
        self.t_crit_k
    }

    pub fn v_min(&self) -> SpecVolume {
        self.v_min
    }

    pub fn v_max(&self) -> SpecVolume {
        self.v_max
    }

    pub fn v_crit(&self) -> SpecVolume {
        self.v_crit
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn r_specific(&self) -> f64 {
        self.r_specific
    }

    /// `log10(v / vmin)`
    pub fn log_volume(&self, v: SpecVolume) -> f64 {
        to_log_volume(v, self.v_min)
    }

    /// Inverse of [`FluidReference::log_volume`].
    pub fn volume_from_log(&self, x: f64) -> SpecVolume {
        from_log_volume(x, self.v_min)
    }
}
