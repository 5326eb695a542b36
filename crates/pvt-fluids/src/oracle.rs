//! Property oracle trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use pvt_core::units::{Density, Pressure, Temperature, k, kgpm3, kgpm3_value, k_value, pa, pa_value};

/// A known state variable handed to the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownVar {
    Pressure(Pressure),
    Temperature(Temperature),
    Density(Density),
    /// Vapor mass fraction, 0 = saturated liquid, 1 = saturated vapor.
    Quality(f64),
}

impl KnownVar {
    /// Value in canonical SI units.
    pub fn si_value(&self) -> f64 {
        match self {
            Self::Pressure(p) => pa_value(*p),
            Self::Temperature(t) => k_value(*t),
            Self::Density(rho) => kgpm3_value(*rho),
            Self::Quality(q) => *q,
        }
    }

    /// Short CoolProp-style key ("P", "T", "D", "Q").
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pressure(_) => "P",
            Self::Temperature(_) => "T",
            Self::Density(_) => "D",
            Self::Quality(_) => "Q",
        }
    }

    fn same_kind(&self, other: &KnownVar) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Output property requested from a state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Pressure,
    Density,
}

/// State-independent constant of a fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidConstant {
    /// Critical pressure [Pa]
    CriticalPressure,
    /// Critical temperature [K]
    CriticalTemperature,
    /// Molar gas constant [J/(mol·K)]
    GasConstant,
    /// Molar mass [kg/mol]
    MolarMass,
}

/// Narrow capability over a thermodynamic property database.
///
/// `query` and `constant` return canonical SI values; the typed helpers validate the
/// result before wrapping it in a uom quantity.
pub trait PropertyOracle: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this oracle can answer queries for the species.
    fn supports(&self, species: Species) -> bool;

    /// Query `output` at the state fixed by two known variables.
    fn query(
        &self,
        species: Species,
        output: Property,
        first: KnownVar,
        second: KnownVar,
    ) -> FluidResult<f64>;

    /// Query a named constant.
    fn constant(&self, species: Species, constant: FluidConstant) -> FluidResult<f64>;

    fn pressure(&self, species: Species, first: KnownVar, second: KnownVar) -> FluidResult<Pressure> {
        let p = pa(self.query(species, Property::Pressure, first, second)?);
        validation::validate_pressure(p)?;
        Ok(p)
    }

    fn density(&self, species: Species, first: KnownVar, second: KnownVar) -> FluidResult<Density> {
        let rho = kgpm3(self.query(species, Property::Density, first, second)?);
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn critical_pressure(&self, species: Species) -> FluidResult<Pressure> {
        let p = pa(self.constant(species, FluidConstant::CriticalPressure)?);
        validation::validate_pressure(p)?;
        Ok(p)
    }

    fn critical_temperature(&self, species: Species) -> FluidResult<Temperature> {
        let t = k(self.constant(species, FluidConstant::CriticalTemperature)?);
        validation::validate_temperature(t)?;
        Ok(t)
    }

    /// Specific gas constant R = R_molar / M [J/(kg·K)].
    fn specific_gas_constant(&self, species: Species) -> FluidResult<f64> {
        let r_molar = self.constant(species, FluidConstant::GasConstant)?;
        let molar_mass = self.constant(species, FluidConstant::MolarMass)?;
        validation::validate_positive(r_molar, "gas constant must be positive and finite")?;
        validation::validate_positive(molar_mass, "molar mass must be positive and finite")?;
        Ok(r_molar / molar_mass)
    }
}

/// Validation helpers for oracle inputs and outputs.
pub mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        validate_positive(pa_value(p), "pressure must be positive and finite")
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        validate_positive(k_value(t), "temperature must be positive and finite")
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        validate_positive(kgpm3_value(rho), "density must be positive and finite")
    }

    pub fn validate_positive(value: f64, what: &'static str) -> FluidResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }

    /// Check a pair of known variables before it reaches a backend.
    pub fn validate_known_pair(first: &KnownVar, second: &KnownVar) -> FluidResult<()> {
        if first.same_kind(second) {
            return Err(FluidError::InvalidArg {
                what: "known variables must be of different kinds",
            });
        }
        for var in [first, second] {
            match var {
                KnownVar::Pressure(p) => validate_pressure(*p)?,
                KnownVar::Temperature(t) => validate_temperature(*t)?,
                KnownVar::Density(rho) => validate_density(*rho)?,
                KnownVar::Quality(q) => {
                    if !q.is_finite() || !(0.0..=1.0).contains(q) {
                        return Err(FluidError::InvalidArg {
                            what: "quality must be within [0, 1]",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(kgpm3(958.0)).is_ok());
        assert!(validate_density(kgpm3(-1.0)).is_err());
        assert!(validate_density(kgpm3(f64::INFINITY)).is_err());
    }

    #[test]
    fn known_pair_rejects_duplicates_and_bad_quality() {
        let rho = KnownVar::Density(kgpm3(10.0));
        assert!(validate_known_pair(&rho, &KnownVar::Quality(1.0)).is_ok());
        assert!(validate_known_pair(&rho, &KnownVar::Density(kgpm3(5.0))).is_err());
        assert!(matches!(
            validate_known_pair(&rho, &KnownVar::Quality(1.2)),
            Err(FluidError::InvalidArg { .. })
        ));
        assert!(matches!(
            validate_known_pair(&rho, &KnownVar::Quality(f64::NAN)),
            Err(FluidError::InvalidArg { .. })
        ));
        assert!(matches!(
            validate_known_pair(&KnownVar::Density(kgpm3(-1.0)), &KnownVar::Quality(0.0)),
            Err(FluidError::NonPhysical { .. })
        ));
    }

    #[test]
    fn known_var_si_values() {
        assert_eq!(KnownVar::Pressure(pa(5e5)).si_value(), 5e5);
        assert_eq!(KnownVar::Temperature(k(300.0)).si_value(), 300.0);
        assert_eq!(KnownVar::Quality(0.25).si_value(), 0.25);
        assert_eq!(KnownVar::Density(kgpm3(2.0)).key(), "D");
    }
}
