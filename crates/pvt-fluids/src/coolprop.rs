//! CoolProp-based property oracle.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, KnownVar, Property, PropertyOracle, validation};
use crate::species::Species;
use rfluids::prelude::*;
use tracing::trace;

/// CoolProp backend for the property oracle.
///
/// Thread-safe: rfluids Fluid instances are created per query and never shared.
pub struct CoolPropOracle {}

impl CoolPropOracle {
    /// Create a new CoolProp oracle.
    pub fn new() -> Self {
        Self {}
    }

    fn fluid_input(var: KnownVar) -> FluidInput {
        match var {
            KnownVar::Pressure(_) => FluidInput::pressure(var.si_value()),
            KnownVar::Temperature(_) => FluidInput::temperature(var.si_value()),
            KnownVar::Density(_) => FluidInput::density(var.si_value()),
            KnownVar::Quality(q) => FluidInput::quality(q),
        }
    }

    /// Create a Fluid instance at the state fixed by the two known variables.
    fn fluid_in_state(&self, species: Species, first: KnownVar, second: KnownVar) -> FluidResult<Fluid> {
        Fluid::from(species.rfluids_pure())
            .in_state(Self::fluid_input(first), Self::fluid_input(second))
            .map_err(|e| FluidError::Backend {
                message: format!(
                    "rfluids error for {} at {}={}, {}={}: {}",
                    species.coolprop_name(),
                    first.key(),
                    first.si_value(),
                    second.key(),
                    second.si_value(),
                    e
                ),
            })
    }
}

impl Default for CoolPropOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyOracle for CoolPropOracle {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _species: Species) -> bool {
        // Every Species variant maps to an rfluids pure fluid
        true
    }

    fn query(
        &self,
        species: Species,
        output: Property,
        first: KnownVar,
        second: KnownVar,
    ) -> FluidResult<f64> {
        validation::validate_known_pair(&first, &second)?;

        let mut fluid = self.fluid_in_state(species, first, second)?;
        let value = match output {
            Property::Pressure => fluid.pressure(),
            Property::Density => fluid.density(),
        }
        .map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting {:?}: {}", output, e),
        })?;

        trace!(
            fluid = species.coolprop_name(),
            ?output,
            first = first.key(),
            first_value = first.si_value(),
            second = second.key(),
            second_value = second.si_value(),
            value,
            "coolprop query"
        );
        Ok(value)
    }

    fn constant(&self, species: Species, constant: FluidConstant) -> FluidResult<f64> {
        let backend = |e: &dyn std::fmt::Display| FluidError::Backend {
            message: format!(
                "rfluids error getting {:?} for {}: {}",
                constant,
                species.coolprop_name(),
                e
            ),
        };

        // The molar gas constant belongs to each equation of state, not to CODATA.
        let mut fluid = Fluid::from(species.rfluids_pure());
        let value = match constant {
            FluidConstant::GasConstant => {
                CoolProp::props1_si("GAS_CONSTANT", species.coolprop_name()).map_err(|e| backend(&e))
            }
            FluidConstant::CriticalPressure => fluid.critical_pressure().map_err(|e| backend(&e)),
            FluidConstant::CriticalTemperature => {
                fluid.critical_temperature().map_err(|e| backend(&e))
            }
            FluidConstant::MolarMass => fluid.molar_mass().map_err(|e| backend(&e)),
        }?;

        validation::validate_positive(value, "fluid constant must be positive and finite")?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvt_core::units::kgpm3;

    #[test]
    fn oracle_name() {
        let oracle = CoolPropOracle::new();
        assert_eq!(oracle.name(), "CoolProp");
    }

    #[test]
    fn supports_every_species() {
        let oracle = CoolPropOracle::new();
        assert!(Species::ALL.iter().all(|s| oracle.supports(*s)));
    }

    #[test]
    fn rejects_duplicate_known_variables() {
        let oracle = CoolPropOracle::new();
        let err = oracle
            .query(
                Species::H2O,
                Property::Pressure,
                KnownVar::Density(kgpm3(1.0)),
                KnownVar::Density(kgpm3(2.0)),
            )
            .expect_err("duplicate kinds should fail before the backend");
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }

    #[test]
    fn gas_constant_comes_from_the_water_equation_of_state() {
        let oracle = CoolPropOracle::new();
        let r = oracle
            .constant(Species::H2O, FluidConstant::GasConstant)
            .unwrap();
        // IAPWS-95 fixes R = 8.314371357587, not the CODATA 8.314462618
        assert!((r - 8.314_371_357_587).abs() < 1e-9);
        assert_ne!(r, pvt_core::constants::MOLAR_GAS_CONSTANT);
    }
}
