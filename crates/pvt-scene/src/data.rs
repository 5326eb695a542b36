//! Curves and axes computed once from the oracle before the scene plays.

use crate::config::SceneConfig;
use crate::error::SceneResult;
use pvt_core::ceil_to_step;
use pvt_core::units::k;
use pvt_eval::{
    Curve, Domain, FluidReference, IdealIsotherm, IsothermMarkers, RealIsotherm, SaturationCurve,
    sample_curve,
};
use pvt_fluids::PropertyOracle;
use serde::Serialize;
use tracing::info;

/// Plot axes in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    /// Plot box size in view units
    pub width: f64,
    pub height: f64,
}

impl Axes {
    pub fn center(&self) -> [f64; 2] {
        [
            0.5 * (self.x_range[0] + self.x_range[1]),
            0.5 * (self.y_range[0] + self.y_range[1]),
        ]
    }

    /// Distance between two data points measured in view units.
    pub fn view_distance(&self, a: [f64; 2], b: [f64; 2]) -> f64 {
        let sx = self.width / (self.x_range[1] - self.x_range[0]);
        let sy = self.height / (self.y_range[1] - self.y_range[0]);
        ((b[0] - a[0]) * sx).hypot((b[1] - a[1]) * sy)
    }
}

/// Everything the director animates.
#[derive(Debug, Clone, Serialize)]
pub struct SceneData {
    pub reference: FluidReference,
    pub isotherm_temperature_k: f64,
    pub axes: Axes,
    /// Liquid branch `[vmin, vcrit]` then vapor branch `[vcrit, vmax]`, raw volume
    pub dome: [Curve; 2],
    pub markers: IsothermMarkers,
    /// Compressed liquid, two-phase and vapor segments in log-volume
    pub isotherm: [Curve; 3],
    pub ideal: Curve,
}

impl SceneData {
    pub fn build(oracle: &dyn PropertyOracle, config: &SceneConfig) -> SceneResult<Self> {
        config.validate()?;
        let reference = FluidReference::from_oracle(oracle, config.fluid, &config.reference)?;
        let axes = Axes {
            x_range: [reference.v_min(), reference.v_max()],
            y_range: [
                0.0,
                ceil_to_step(reference.p_max_pa(), config.axes.pressure_step_pa)?,
            ],
            width: config.axes.width,
            height: config.axes.height,
        };

        let saturation = SaturationCurve::new(oracle, &reference, config.band)?;
        let dome_intervals = config.sampling.dome_intervals;
        let dome = [
            sample_curve(
                "saturated liquid",
                &saturation,
                Domain::new("saturated liquid", reference.v_min(), reference.v_crit())?,
                dome_intervals,
            )?,
            sample_curve(
                "saturated vapor",
                &saturation,
                Domain::new("saturated vapor", reference.v_crit(), reference.v_max())?,
                dome_intervals,
            )?,
        ];

        let temperature = k(config.isotherm_temperature_k);
        let markers = IsothermMarkers::from_oracle(oracle, &reference, temperature)?;
        let real = RealIsotherm::new(oracle, &reference, temperature)?;
        let [liquid, two_phase, vapor] = markers.segments(&reference)?;
        let isotherm_intervals = config.sampling.isotherm_intervals;
        let isotherm = [
            sample_curve("compressed liquid", &real, liquid, isotherm_intervals)?,
            sample_curve("two-phase", &real, two_phase, isotherm_intervals)?,
            sample_curve("superheated vapor", &real, vapor, isotherm_intervals)?,
        ];

        let ideal = sample_curve(
            "ideal gas",
            &IdealIsotherm::new(&reference, temperature)?,
            IdealIsotherm::domain(&reference)?,
            config.sampling.ideal_intervals,
        )?;

        info!(
            fluid = config.fluid.display_name(),
            isotherm_k = config.isotherm_temperature_k,
            p_axis_max = axes.y_range[1],
            dome_samples = dome[0].len() + dome[1].len(),
            isotherm_samples = isotherm.iter().map(Curve::len).sum::<usize>(),
            "scene data built"
        );

        Ok(Self {
            reference,
            isotherm_temperature_k: config.isotherm_temperature_k,
            axes,
            dome,
            markers,
            isotherm,
            ideal,
        })
    }
}
