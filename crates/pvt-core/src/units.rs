// pvt-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Specific volume [m³/kg].
///
/// Kept as plain f64 like the other specific quantities; curves sample it directly.
pub type SpecVolume = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    k(v + constants::ZERO_CELSIUS_K)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_value(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn k_value(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn kgpm3_value(rho: Density) -> f64 {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    rho.get::<kilogram_per_cubic_meter>()
}

/// Specific volume of a state with the given density.
#[inline]
pub fn volume_from_density(rho: Density) -> SpecVolume {
    1.0 / kgpm3_value(rho)
}

/// Density of a state with the given specific volume.
#[inline]
pub fn density_from_volume(v: SpecVolume) -> Density {
    kgpm3(1.0 / v)
}

pub mod constants {
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    /// Molar gas constant [J/(mol·K)], CODATA 2018.
    pub const MOLAR_GAS_CONSTANT: f64 = 8.314_462_618;
}
