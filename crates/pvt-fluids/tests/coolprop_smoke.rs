//! CoolProp integration tests.
//!
//! Broad tolerances avoid backend version issues while still enforcing physical plausibility.

use pvt_core::units::{degc, k, k_value, kgpm3, kgpm3_value, pa, pa_value};
use pvt_fluids::{CoolPropOracle, FluidConstant, KnownVar, PropertyOracle, Species};

#[test]
fn water_boils_near_one_atmosphere_at_100c() {
    let oracle = CoolPropOracle::new();
    let p = oracle
        .pressure(
            Species::H2O,
            KnownVar::Temperature(degc(100.0)),
            KnownVar::Quality(0.0),
        )
        .unwrap();

    assert!(
        (pa_value(p) - 101_325.0).abs() < 500.0,
        "p_sat = {} Pa",
        pa_value(p)
    );
}

#[test]
fn water_critical_constants() {
    let oracle = CoolPropOracle::new();
    let pc = pa_value(oracle.critical_pressure(Species::H2O).unwrap());
    let tc = k_value(oracle.critical_temperature(Species::H2O).unwrap());
    let m = oracle
        .constant(Species::H2O, FluidConstant::MolarMass)
        .unwrap();

    assert!((pc - 22.064e6).abs() < 1e4, "pcrit = {} Pa", pc);
    assert!((tc - 647.096).abs() < 0.1, "Tcrit = {} K", tc);
    assert!((m - 0.018_015).abs() < 1e-5, "M = {} kg/mol", m);

    let r = oracle.specific_gas_constant(Species::H2O).unwrap();
    assert!((r - 461.5).abs() < 0.5, "R = {} J/(kg K)", r);
}

#[test]
fn saturated_liquid_is_denser_than_vapor() {
    let oracle = CoolPropOracle::new();
    let p = KnownVar::Pressure(pa(101_325.0));

    let rho_l = oracle
        .density(Species::H2O, p, KnownVar::Quality(0.0))
        .unwrap();
    let rho_v = oracle
        .density(Species::H2O, p, KnownVar::Quality(1.0))
        .unwrap();

    assert!(kgpm3_value(rho_l) > 900.0 && kgpm3_value(rho_l) < 1000.0);
    assert!(kgpm3_value(rho_v) > 0.3 && kgpm3_value(rho_v) < 1.0);
}

#[test]
fn density_quality_recovers_saturation_pressure() {
    let oracle = CoolPropOracle::new();
    let p_in = pa(1.0e6);
    let rho_v = oracle
        .density(Species::H2O, KnownVar::Pressure(p_in), KnownVar::Quality(1.0))
        .unwrap();

    let p_out = oracle
        .pressure(Species::H2O, KnownVar::Density(rho_v), KnownVar::Quality(1.0))
        .unwrap();

    let rel = (pa_value(p_out) - 1.0e6).abs() / 1.0e6;
    assert!(rel < 1e-3, "round-trip pressure error {}", rel);
}

#[test]
fn isotherm_pressure_falls_with_volume_in_vapor() {
    let oracle = CoolPropOracle::new();
    let t = KnownVar::Temperature(k(700.0));

    let p1 = oracle
        .pressure(Species::H2O, KnownVar::Density(kgpm3(10.0)), t)
        .unwrap();
    let p2 = oracle
        .pressure(Species::H2O, KnownVar::Density(kgpm3(5.0)), t)
        .unwrap();

    assert!(pa_value(p1) > pa_value(p2));
}

#[test]
fn invalid_quality_is_rejected() {
    let oracle = CoolPropOracle::new();
    let result = oracle.pressure(
        Species::H2O,
        KnownVar::Density(kgpm3(10.0)),
        KnownVar::Quality(2.0),
    );
    assert!(result.is_err());
}
