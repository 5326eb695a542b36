//! Deterministic oracle answering from caller-supplied responders.
//!
//! Used by tests and offline previews to decouple evaluator logic from CoolProp.
//! Every query is recorded so callers can assert which state was asked for.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, KnownVar, Property, PropertyOracle, validation};
use crate::species::Species;
use std::collections::HashMap;
use std::sync::Mutex;

/// A state query as seen by the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub species: Species,
    pub output: Property,
    pub first: KnownVar,
    pub second: KnownVar,
}

impl Query {
    /// SI value of the known variable with the given key ("P", "T", "D", "Q").
    pub fn known(&self, key: &str) -> Option<f64> {
        [self.first, self.second]
            .into_iter()
            .find(|var| var.key() == key)
            .map(|var| var.si_value())
    }
}

type Responder = Box<dyn Fn(&Query) -> Option<f64> + Send + Sync>;

/// Canned property oracle for a single species.
pub struct CannedOracle {
    species: Species,
    constants: HashMap<FluidConstant, f64>,
    responder: Responder,
    log: Mutex<Vec<Query>>,
}

impl CannedOracle {
    /// Create an oracle for `species` answering state queries with `responder`.
    ///
    /// A responder returning `None` makes the query fail with a backend error.
    pub fn new(
        species: Species,
        responder: impl Fn(&Query) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            species,
            constants: HashMap::new(),
            responder: Box::new(responder),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_constant(mut self, constant: FluidConstant, value: f64) -> Self {
        self.constants.insert(constant, value);
        self
    }

    /// All state queries answered so far, in order.
    pub fn queries(&self) -> Vec<Query> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn clear_queries(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

/// Coarse analytic dome with water's critical point and boiling point.
///
/// Liquid line `P = pc (v/vc)^5`, vapor line `P = pc (vc/v)^0.9`, saturation pressure
/// `pc exp(7.3 (1 - Tc/T))`. Not a property model: it only has the right shape and
/// magnitudes for exercising callers without CoolProp.
pub mod pseudo_water {
    use super::*;

    pub const P_CRIT: f64 = 22.064e6;
    pub const T_CRIT: f64 = 647.096;
    pub const V_CRIT: f64 = 1.0 / 322.0;
    pub const MOLAR_MASS: f64 = 0.018_015_268;
    const LIQUID_EXPONENT: f64 = 5.0;
    const VAPOR_EXPONENT: f64 = 0.9;
    const VAPOR_PRESSURE_SLOPE: f64 = 7.3;
    /// Compressed-liquid stiffness [Pa]
    const LIQUID_STIFFNESS: f64 = 50.0 * P_CRIT;

    pub fn saturation_pressure(t: f64) -> f64 {
        P_CRIT * (VAPOR_PRESSURE_SLOPE * (1.0 - T_CRIT / t)).exp()
    }

    pub fn liquid_pressure(v: f64) -> f64 {
        P_CRIT * (v / V_CRIT).powf(LIQUID_EXPONENT)
    }

    pub fn vapor_pressure(v: f64) -> f64 {
        P_CRIT * (V_CRIT / v).powf(VAPOR_EXPONENT)
    }

    pub fn liquid_volume(p: f64) -> f64 {
        V_CRIT * (p / P_CRIT).powf(1.0 / LIQUID_EXPONENT)
    }

    pub fn vapor_volume(p: f64) -> f64 {
        V_CRIT * (P_CRIT / p).powf(1.0 / VAPOR_EXPONENT)
    }

    fn r_specific() -> f64 {
        pvt_core::constants::MOLAR_GAS_CONSTANT / MOLAR_MASS
    }

    /// Compressibility at the critical point, so the supercritical branch passes through it.
    fn z_crit() -> f64 {
        P_CRIT * V_CRIT / (r_specific() * T_CRIT)
    }

    fn volume_at(p: f64, t: f64) -> f64 {
        if t >= T_CRIT {
            return z_crit() * r_specific() * t / p;
        }
        let p_sat = saturation_pressure(t);
        if p > p_sat {
            liquid_volume(p_sat) * (1.0 - (p - p_sat) / LIQUID_STIFFNESS)
        } else {
            vapor_volume(p_sat) * p_sat / p
        }
    }

    fn pressure_at(v: f64, t: f64) -> f64 {
        if t >= T_CRIT {
            return z_crit() * r_specific() * t / v;
        }
        let p_sat = saturation_pressure(t);
        let v_l = liquid_volume(p_sat);
        let v_g = vapor_volume(p_sat);
        if v < v_l {
            p_sat + LIQUID_STIFFNESS * (v_l - v) / v_l
        } else if v <= v_g {
            p_sat
        } else {
            p_sat * v_g / v
        }
    }

    fn saturated_volume(p: f64, quality: f64) -> Option<f64> {
        if quality == 0.0 {
            Some(liquid_volume(p))
        } else if quality == 1.0 {
            Some(vapor_volume(p))
        } else {
            None
        }
    }

    fn answer(q: &Query) -> Option<f64> {
        let (p, t, d, x) = (q.known("P"), q.known("T"), q.known("D"), q.known("Q"));
        match q.output {
            Property::Pressure => match (d, t, x) {
                (Some(d), None, Some(x)) if x == 0.0 => Some(liquid_pressure(1.0 / d)),
                (Some(d), None, Some(x)) if x == 1.0 => Some(vapor_pressure(1.0 / d)),
                (None, Some(t), Some(_)) if t < T_CRIT => Some(saturation_pressure(t)),
                (Some(d), Some(t), None) => Some(pressure_at(1.0 / d, t)),
                _ => None,
            },
            Property::Density => match (p, t, x) {
                (Some(p), None, Some(x)) => saturated_volume(p, x).map(|v| 1.0 / v),
                (None, Some(t), Some(x)) if t < T_CRIT => {
                    saturated_volume(saturation_pressure(t), x).map(|v| 1.0 / v)
                }
                (Some(p), Some(t), None) => Some(1.0 / volume_at(p, t)),
                _ => None,
            },
        }
    }

    /// Canned oracle for [`Species::H2O`] backed by the pseudo-water dome.
    pub fn oracle() -> CannedOracle {
        CannedOracle::new(Species::H2O, answer)
            .with_constant(FluidConstant::CriticalPressure, P_CRIT)
            .with_constant(FluidConstant::CriticalTemperature, T_CRIT)
            .with_constant(
                FluidConstant::GasConstant,
                pvt_core::constants::MOLAR_GAS_CONSTANT,
            )
            .with_constant(FluidConstant::MolarMass, MOLAR_MASS)
    }
}

impl PropertyOracle for CannedOracle {
    fn name(&self) -> &str {
        "Canned"
    }

    fn supports(&self, species: Species) -> bool {
        species == self.species
    }

    fn query(
        &self,
        species: Species,
        output: Property,
        first: KnownVar,
        second: KnownVar,
    ) -> FluidResult<f64> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: "species not loaded in canned oracle",
            });
        }
        validation::validate_known_pair(&first, &second)?;

        let query = Query {
            species,
            output,
            first,
            second,
        };
        if let Ok(mut log) = self.log.lock() {
            log.push(query);
        }

        (self.responder)(&query).ok_or_else(|| FluidError::Backend {
            message: format!(
                "no canned answer for {:?} at {}={}, {}={}",
                output,
                first.key(),
                first.si_value(),
                second.key(),
                second.si_value()
            ),
        })
    }

    fn constant(&self, species: Species, constant: FluidConstant) -> FluidResult<f64> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: "species not loaded in canned oracle",
            });
        }
        self.constants
            .get(&constant)
            .copied()
            .ok_or(FluidError::NotSupported {
                what: "constant not loaded in canned oracle",
            })
    }
}
