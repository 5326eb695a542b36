//! Real and ideal isotherms in log-volume coordinates.

use crate::curve::{Domain, PressureCurve};
use crate::error::{EvalError, EvalResult};
use crate::reference::FluidReference;
use pvt_core::units::{
    SpecVolume, Temperature, density_from_volume, k_value, pa_value, volume_from_density,
};
use pvt_fluids::{KnownVar, PropertyOracle};
use serde::Serialize;
use tracing::debug;

fn check_log_volume(x: f64) -> EvalResult<()> {
    if !x.is_finite() {
        return Err(EvalError::InvalidArg {
            what: format!("log-volume must be finite, got {x}"),
        });
    }
    Ok(())
}

fn check_temperature(t: Temperature) -> EvalResult<f64> {
    let t_k = k_value(t);
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(EvalError::InvalidArg {
            what: format!("isotherm temperature must be positive, got {t_k} K"),
        });
    }
    Ok(t_k)
}

/// Real-fluid isotherm `P(x, T)` with `x = log10(v / vmin)`.
pub struct RealIsotherm<'a> {
    oracle: &'a dyn PropertyOracle,
    reference: &'a FluidReference,
    temperature: Temperature,
}

impl<'a> RealIsotherm<'a> {
    pub fn new(
        oracle: &'a dyn PropertyOracle,
        reference: &'a FluidReference,
        temperature: Temperature,
    ) -> EvalResult<Self> {
        check_temperature(temperature)?;
        Ok(Self {
            oracle,
            reference,
            temperature,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn pressure_at(&self, x: f64) -> EvalResult<f64> {
        check_log_volume(x)?;
        let v = self.reference.volume_from_log(x);
        let p = self.oracle.pressure(
            self.reference.species(),
            KnownVar::Density(density_from_volume(v)),
            KnownVar::Temperature(self.temperature),
        )?;
        Ok(pa_value(p))
    }
}

impl PressureCurve for RealIsotherm<'_> {
    fn pressure(&self, x: f64) -> EvalResult<f64> {
        self.pressure_at(x)
    }
}

/// Ideal-gas isotherm `P = R T / v` with `v = 10^x vmin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealIsotherm {
    r_specific: f64,
    temperature_k: f64,
    v_min: SpecVolume,
}

impl IdealIsotherm {
    pub fn new(reference: &FluidReference, temperature: Temperature) -> EvalResult<Self> {
        let temperature_k = check_temperature(temperature)?;
        Ok(Self {
            r_specific: reference.r_specific(),
            temperature_k,
            v_min: reference.v_min(),
        })
    }

    pub fn pressure_at(&self, x: f64) -> EvalResult<f64> {
        check_log_volume(x)?;
        let v = crate::log_volume::from_log_volume(x, self.v_min);
        Ok(self.r_specific * self.temperature_k / v)
    }

    /// Full ideal-isotherm domain, `[log10(vcrit/vmin), log10(vmax/vmin)]`.
    pub fn domain(reference: &FluidReference) -> EvalResult<Domain> {
        Domain::new(
            "ideal isotherm",
            reference.log_volume(reference.v_crit()),
            reference.log_volume(reference.v_max()),
        )
    }
}

impl PressureCurve for IdealIsotherm {
    fn pressure(&self, x: f64) -> EvalResult<f64> {
        self.pressure_at(x)
    }
}

/// Break points of the real isotherm, in raw specific volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsothermMarkers {
    /// Compressed liquid at (T, pmax); start of the plotted isotherm
    pub v_start: SpecVolume,
    /// Saturated liquid at T
    pub v_liquid: SpecVolume,
    /// Saturated vapor at T
    pub v_vapor: SpecVolume,
    /// End of the plotted isotherm (vmax)
    pub v_end: SpecVolume,
    /// Saturation pressure at T [Pa]
    pub p_sat_pa: f64,
}

impl IsothermMarkers {
    /// Query the markers for a subcritical isotherm.
    pub fn from_oracle(
        oracle: &dyn PropertyOracle,
        reference: &FluidReference,
        temperature: Temperature,
    ) -> EvalResult<Self> {
        let t_k = check_temperature(temperature)?;
        if t_k >= reference.t_crit_k() {
            return Err(EvalError::InvalidArg {
                what: format!(
                    "isotherm at {t_k} K is not below the critical temperature {} K",
                    reference.t_crit_k()
                ),
            });
        }

        let species = reference.species();
        let t = KnownVar::Temperature(temperature);
        let rho_start = oracle.density(species, t, KnownVar::Pressure(reference.p_max()))?;
        let rho_liquid = oracle.density(species, t, KnownVar::Quality(0.0))?;
        let rho_vapor = oracle.density(species, t, KnownVar::Quality(1.0))?;
        let p_sat = oracle.pressure(species, t, KnownVar::Quality(0.0))?;

        let markers = Self {
            v_start: volume_from_density(rho_start),
            v_liquid: volume_from_density(rho_liquid),
            v_vapor: volume_from_density(rho_vapor),
            v_end: reference.v_max(),
            p_sat_pa: pa_value(p_sat),
        };
        if !(markers.v_start < markers.v_liquid
            && markers.v_liquid < markers.v_vapor
            && markers.v_vapor < markers.v_end)
        {
            return Err(EvalError::Reference {
                what: format!(
                    "isotherm markers out of order: {} / {} / {} / {}",
                    markers.v_start, markers.v_liquid, markers.v_vapor, markers.v_end
                ),
            });
        }

        debug!(
            t_k,
            v_start = markers.v_start,
            v_liquid = markers.v_liquid,
            v_vapor = markers.v_vapor,
            p_sat_pa = markers.p_sat_pa,
            "isotherm markers"
        );
        Ok(markers)
    }

    /// Compressed liquid, two-phase and superheated vapor segments in log-volume.
    pub fn segments(&self, reference: &FluidReference) -> EvalResult<[Domain; 3]> {
        let [start, liquid, vapor, end] = [self.v_start, self.v_liquid, self.v_vapor, self.v_end]
            .map(|v| reference.log_volume(v));
        Ok([
            Domain::new("compressed liquid isotherm", start, liquid)?,
            Domain::new("two-phase isotherm", liquid, vapor)?,
            Domain::new("vapor isotherm", vapor, end)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceConditions;
    use pvt_core::units::{degc, k};
    use pvt_fluids::canned::pseudo_water;
    use pvt_fluids::{CannedOracle, FluidConstant, Property, Species};
    use proptest::prelude::*;

    fn simple_reference() -> FluidReference {
        FluidReference::from_values(Species::H2O, 100.0, 5000.0, 600.0, 1e-3, 10.0, 3e-3, 461.5)
            .unwrap()
    }

    fn water_reference(oracle: &CannedOracle) -> FluidReference {
        FluidReference::from_oracle(oracle, Species::H2O, &ReferenceConditions::default()).unwrap()
    }

    #[test]
    fn real_isotherm_queries_density_and_temperature() {
        let oracle = CannedOracle::new(Species::H2O, |q| match q.output {
            Property::Pressure => Some(q.known("D")? * q.known("T")?),
            _ => None,
        })
        .with_constant(FluidConstant::CriticalPressure, 5000.0);
        let reference = simple_reference();
        let isotherm = RealIsotherm::new(&oracle, &reference, k(500.0)).unwrap();

        // x = 1 -> v = 10 vmin = 1e-2 -> rho = 100
        let p = isotherm.pressure_at(1.0).unwrap();
        assert!((p - 50_000.0).abs() < 1e-6);

        let query = oracle.queries()[0];
        assert!((query.known("D").unwrap() - 100.0).abs() < 1e-10);
        assert_eq!(query.known("T"), Some(500.0));
    }

    #[test]
    fn real_isotherm_rejects_non_finite_input() {
        let oracle = pseudo_water::oracle();
        let reference = water_reference(&oracle);
        oracle.clear_queries();
        let isotherm = RealIsotherm::new(&oracle, &reference, degc(300.0)).unwrap();
        assert!(isotherm.pressure_at(f64::INFINITY).is_err());
        assert!(oracle.queries().is_empty());
    }

    #[test]
    fn ideal_isotherm_at_minimum_volume() {
        let reference = simple_reference();
        let ideal = IdealIsotherm::new(&reference, k(400.0)).unwrap();
        let p = ideal.pressure_at(0.0).unwrap();
        assert!((p - 461.5 * 400.0 / 1e-3).abs() < 1e-6);
    }

    #[test]
    fn ideal_isotherm_domain_spans_vcrit_to_vmax() {
        let reference = simple_reference();
        let domain = IdealIsotherm::domain(&reference).unwrap();
        assert!((domain.start() - 3.0f64.log10()).abs() < 1e-12);
        assert!((domain.end() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_temperature() {
        let reference = simple_reference();
        assert!(IdealIsotherm::new(&reference, k(0.0)).is_err());
        assert!(IdealIsotherm::new(&reference, k(f64::NAN)).is_err());
    }

    #[test]
    fn markers_follow_pseudo_water() {
        let oracle = pseudo_water::oracle();
        let reference = water_reference(&oracle);
        let t = 573.15;
        let markers = IsothermMarkers::from_oracle(&oracle, &reference, k(t)).unwrap();

        let p_sat = pseudo_water::saturation_pressure(t);
        assert!((markers.p_sat_pa - p_sat).abs() < 1e-6 * p_sat);
        assert!((markers.v_liquid - pseudo_water::liquid_volume(p_sat)).abs() < 1e-12);
        assert!((markers.v_vapor - pseudo_water::vapor_volume(p_sat)).abs() < 1e-9);
        assert_eq!(markers.v_end, reference.v_max());
        assert!(markers.v_start < markers.v_liquid);

        let [liquid, two_phase, vapor] = markers.segments(&reference).unwrap();
        assert_eq!(liquid.end(), two_phase.start());
        assert_eq!(two_phase.end(), vapor.start());
        assert!((vapor.end() - reference.log_volume(reference.v_max())).abs() < 1e-12);
    }

    #[test]
    fn markers_reject_supercritical_isotherm() {
        let oracle = pseudo_water::oracle();
        let reference = water_reference(&oracle);
        let err = IsothermMarkers::from_oracle(&oracle, &reference, k(700.0)).unwrap_err();
        assert!(matches!(err, EvalError::InvalidArg { .. }));
    }

    #[test]
    fn real_isotherm_is_flat_between_markers() {
        let oracle = pseudo_water::oracle();
        let reference = water_reference(&oracle);
        let markers = IsothermMarkers::from_oracle(&oracle, &reference, degc(300.0)).unwrap();
        let isotherm = RealIsotherm::new(&oracle, &reference, degc(300.0)).unwrap();
        let [_, two_phase, vapor] = markers.segments(&reference).unwrap();

        for x in two_phase.points(8).unwrap() {
            let p = isotherm.pressure_at(x).unwrap();
            assert!((p - markers.p_sat_pa).abs() < 1e-6 * markers.p_sat_pa);
        }
        let tail: Vec<f64> = vapor
            .points(20)
            .unwrap()
            .into_iter()
            .map(|x| isotherm.pressure_at(x).unwrap())
            .collect();
        assert!(tail.windows(2).all(|w| w[1] <= w[0]));
    }

    proptest! {
        #[test]
        fn ideal_gas_law_holds(x in -1.0f64..5.0, t in 200.0f64..1000.0) {
            let reference = simple_reference();
            let ideal = IdealIsotherm::new(&reference, k(t)).unwrap();
            let p = ideal.pressure_at(x).unwrap();
            let v = reference.volume_from_log(x);
            let rt = reference.r_specific() * t;
            prop_assert!((p * v - rt).abs() <= 1e-9 * rt);
        }
    }
}
