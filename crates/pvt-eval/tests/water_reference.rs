//! Water dome and isotherms against CoolProp.

use pvt_core::units::{degc, density_from_volume, pa_value};
use pvt_eval::{
    FlatBand, FluidReference, IdealIsotherm, IsothermMarkers, RealIsotherm, ReferenceConditions,
    SaturationCurve,
};
use pvt_fluids::{CoolPropOracle, KnownVar, PropertyOracle, Species};

fn setup() -> (CoolPropOracle, FluidReference) {
    let oracle = CoolPropOracle::new();
    let reference =
        FluidReference::from_oracle(&oracle, Species::H2O, &ReferenceConditions::default())
            .expect("water reference constants");
    (oracle, reference)
}

#[test]
fn reference_constants_are_plausible() {
    let (_, reference) = setup();

    assert!((reference.p_min_pa() - 101_418.0).abs() < 500.0);
    assert!((reference.p_max_pa() - 22.064e6).abs() < 1e4);
    assert!((reference.v_min() - 1.0435e-3).abs() < 1e-5);
    assert!((reference.v_crit() - 3.106e-3).abs() < 1e-4);
    assert!(reference.v_max() > 7.0 && reference.v_max() < 9.0);
}

#[test]
fn dome_endpoints_match_oracle() {
    let (oracle, reference) = setup();
    let dome = SaturationCurve::new(&oracle, &reference, FlatBand::default()).unwrap();

    let p_liquid = oracle
        .pressure(
            Species::H2O,
            KnownVar::Density(density_from_volume(reference.v_min())),
            KnownVar::Quality(0.0),
        )
        .unwrap();
    let rel = (dome.pressure_at(reference.v_min()).unwrap() - pa_value(p_liquid)).abs()
        / pa_value(p_liquid);
    assert!(rel < 1e-9);

    assert_eq!(
        dome.pressure_at(reference.v_crit()).unwrap(),
        reference.p_max_pa()
    );

    let p_vapor = oracle
        .pressure(
            Species::H2O,
            KnownVar::Density(density_from_volume(reference.v_max())),
            KnownVar::Quality(1.0),
        )
        .unwrap();
    let rel = (dome.pressure_at(reference.v_max()).unwrap() - pa_value(p_vapor)).abs()
        / pa_value(p_vapor);
    assert!(rel < 1e-9);
}

#[test]
fn dome_ends_near_boiling_pressures() {
    let (oracle, reference) = setup();
    let dome = SaturationCurve::new(&oracle, &reference, FlatBand::default()).unwrap();

    let p0 = dome.pressure_at(reference.v_min()).unwrap();
    assert!((p0 - reference.p_min_pa()).abs() / reference.p_min_pa() < 1e-2);

    let p1 = dome.pressure_at(reference.v_max()).unwrap();
    let expected = reference.p_min_pa() / 5.0;
    assert!((p1 - expected).abs() / expected < 1e-2);
}

#[test]
fn isotherm_at_300c_crosses_the_dome() {
    let (oracle, reference) = setup();
    let t = degc(300.0);
    let markers = IsothermMarkers::from_oracle(&oracle, &reference, t).unwrap();
    assert!((markers.p_sat_pa - 8.5858e6).abs() < 5e4);

    let real = RealIsotherm::new(&oracle, &reference, t).unwrap();
    let [liquid, two_phase, vapor] = markers.segments(&reference).unwrap();

    let start = real.pressure_at(liquid.start()).unwrap();
    assert!((start - reference.p_max_pa()).abs() / reference.p_max_pa() < 1e-3);

    let mid = 0.5 * (two_phase.start() + two_phase.end());
    let flat = real.pressure_at(mid).unwrap();
    assert!((flat - markers.p_sat_pa).abs() / markers.p_sat_pa < 1e-3);

    // Far into the vapor the real and ideal isotherms agree
    let ideal = IdealIsotherm::new(&reference, t).unwrap();
    let ratio = ideal.pressure_at(vapor.end()).unwrap() / real.pressure_at(vapor.end()).unwrap();
    assert!((ratio - 1.0).abs() < 1e-2, "P_ideal / P_real = {ratio}");
}
