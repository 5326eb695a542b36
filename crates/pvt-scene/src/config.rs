//! Scene configuration file (YAML).

use crate::error::{SceneError, SceneResult};
use pvt_core::constants::ZERO_CELSIUS_K;
use pvt_eval::{FlatBand, ReferenceConditions};
use pvt_fluids::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to build and time the scene. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fluid: Species,
    pub reference: ReferenceConditions,
    pub band: FlatBand,
    /// Temperature of both isotherms [K]
    pub isotherm_temperature_k: f64,
    pub sampling: SamplingConfig,
    pub axes: AxesConfig,
    pub timing: TimingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fluid: Species::H2O,
            reference: ReferenceConditions::default(),
            band: FlatBand::default(),
            isotherm_temperature_k: 300.0 + ZERO_CELSIUS_K,
            sampling: SamplingConfig::default(),
            axes: AxesConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

/// Boiling and isotherm temperatures [K] that give each fluid a complete dome.
///
/// The boiling temperature keeps `pmin / 5` above the triple-point pressure, and the
/// isotherm sits below the critical temperature.
fn fluid_temperatures_k(fluid: Species) -> (f64, f64) {
    match fluid {
        Species::H2O => (373.15, 300.0 + ZERO_CELSIUS_K),
        Species::N2 => (77.35, 110.0),
        Species::Ar => (110.0, 140.0),
        Species::CO2 => (270.0, 295.0),
        Species::CH4 => (111.7, 170.0),
        Species::Ammonia => (239.8, 360.0),
        Species::Propane => (231.0, 330.0),
        Species::R134a => (247.1, 330.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Intervals per dome branch
    pub dome_intervals: usize,
    /// Intervals per real isotherm segment
    pub isotherm_intervals: usize,
    pub ideal_intervals: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            dome_intervals: 1000,
            isotherm_intervals: 200,
            ideal_intervals: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// The pressure axis tops out at pmax rounded up to this step [Pa]
    pub pressure_step_pa: f64,
    /// Plot box size in view units; arc lengths along curves are measured in it
    pub width: f64,
    pub height: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            pressure_step_pa: 5e6,
            width: 12.0,
            height: 6.0,
        }
    }
}

/// Durations in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub run_time_s: f64,
    pub wait_s: f64,
    /// Duration of each leg of the dot tour
    pub dot_leg_s: f64,
    /// Camera scale while following the dot
    pub camera_zoom: f64,
    /// Pause after the ideal isotherm is drawn
    pub ideal_hold_s: f64,
    /// Pause at the end of the scene
    pub closing_hold_s: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            run_time_s: 1.0,
            wait_s: 1.0,
            dot_leg_s: 1.5,
            camera_zoom: 0.5,
            ideal_hold_s: 2.0,
            closing_hold_s: 5.0,
        }
    }
}

fn check_positive(field: &str, value: f64) -> SceneResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SceneError::invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn check_intervals(field: &str, value: usize) -> SceneResult<()> {
    if value == 0 {
        return Err(SceneError::invalid(field, value, "must be at least 1"));
    }
    Ok(())
}

impl SceneConfig {
    /// Switch to `fluid` and reset the boiling and isotherm temperatures to its defaults.
    pub fn set_fluid(&mut self, fluid: Species) {
        let (boiling_k, isotherm_k) = fluid_temperatures_k(fluid);
        self.fluid = fluid;
        self.reference.boiling_temperature_k = boiling_k;
        self.isotherm_temperature_k = isotherm_k;
    }

    pub fn validate(&self) -> SceneResult<()> {
        check_positive("isotherm_temperature_k", self.isotherm_temperature_k)?;
        check_positive(
            "reference.boiling_temperature_k",
            self.reference.boiling_temperature_k,
        )?;
        let divisor = self.reference.vapor_pressure_divisor;
        if !divisor.is_finite() || divisor < 1.0 {
            return Err(SceneError::invalid(
                "reference.vapor_pressure_divisor",
                divisor,
                "must be >= 1",
            ));
        }
        self.band.validate()?;

        check_intervals("sampling.dome_intervals", self.sampling.dome_intervals)?;
        check_intervals("sampling.isotherm_intervals", self.sampling.isotherm_intervals)?;
        check_intervals("sampling.ideal_intervals", self.sampling.ideal_intervals)?;

        check_positive("axes.pressure_step_pa", self.axes.pressure_step_pa)?;
        check_positive("axes.width", self.axes.width)?;
        check_positive("axes.height", self.axes.height)?;

        let timing = &self.timing;
        check_positive("timing.run_time_s", timing.run_time_s)?;
        check_positive("timing.wait_s", timing.wait_s)?;
        check_positive("timing.dot_leg_s", timing.dot_leg_s)?;
        check_positive("timing.camera_zoom", timing.camera_zoom)?;
        check_positive("timing.ideal_hold_s", timing.ideal_hold_s)?;
        check_positive("timing.closing_hold_s", timing.closing_hold_s)?;
        Ok(())
    }
}

pub fn load_yaml(path: &Path) -> SceneResult<SceneConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn from_yaml_str(content: &str) -> SceneResult<SceneConfig> {
    let config: SceneConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &SceneConfig) -> SceneResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.fluid, Species::H2O);
        assert_eq!(config.reference.boiling_temperature_k, 373.15);
        assert_eq!(config.reference.vapor_pressure_divisor, 5.0);
        assert_eq!(config.band.liquid, 0.11);
        assert_eq!(config.band.vapor, 0.0);
        assert!((config.isotherm_temperature_k - 573.15).abs() < 1e-12);
        assert_eq!(config.sampling.dome_intervals, 1000);
        assert_eq!(config.axes.pressure_step_pa, 5e6);
        assert_eq!(config.timing.dot_leg_s, 1.5);
        assert_eq!(config.timing.camera_zoom, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn set_fluid_resets_temperatures() {
        let mut config = SceneConfig::default();
        config.set_fluid(Species::CO2);
        assert_eq!(config.fluid, Species::CO2);
        assert_eq!(config.reference.boiling_temperature_k, 270.0);
        assert_eq!(config.isotherm_temperature_k, 295.0);

        config.set_fluid(Species::H2O);
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn every_fluid_isotherm_is_hotter_than_its_boiling_point() {
        for fluid in Species::ALL {
            let (boiling, isotherm) = fluid_temperatures_k(fluid);
            assert!(boiling < isotherm, "{fluid}");
        }
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = SceneConfig::default();
        config.fluid = Species::CO2;
        config.isotherm_temperature_k = 280.0;
        config.timing.closing_hold_s = 3.0;

        let text = serde_yaml::to_string(&config).unwrap();
        let back = from_yaml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = from_yaml_str("fluid: CO2\ntiming:\n  wait_s: 0.5\n").unwrap();
        assert_eq!(config.fluid, Species::CO2);
        assert_eq!(config.timing.wait_s, 0.5);
        assert_eq!(config.timing.run_time_s, 1.0);
        assert_eq!(config.band, FlatBand::default());
    }

    #[test]
    fn unknown_fluid_is_rejected() {
        assert!(from_yaml_str("fluid: Unobtainium\n").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = from_yaml_str("sampling:\n  dome_intervals: 0\n").unwrap_err();
        assert!(matches!(err, SceneError::InvalidValue { ref field, .. } if field == "sampling.dome_intervals"));

        assert!(from_yaml_str("timing:\n  run_time_s: -1.0\n").is_err());
        assert!(from_yaml_str("band:\n  liquid: 1.5\n").is_err());
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join(format!("pvt-scene-{}.yaml", std::process::id()));
        let config = SceneConfig::default();
        save_yaml(&path, &config).unwrap();
        let loaded = load_yaml(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
