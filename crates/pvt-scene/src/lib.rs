//! pvt-scene: the timed presentation of the pressure-volume diagram.
//!
//! - `SceneConfig`: YAML scene file with the reference scene as defaults
//! - `SceneData`: axes and every curve, sampled once from the oracle
//! - `Script`: the ordered steps, each playing animations together
//! - `Timeline::frame_at`: what is on screen at any time

pub mod config;
pub mod data;
pub mod error;
pub mod frame;
pub mod rate;
pub mod script;
pub mod timeline;
pub mod transform;

pub use config::{AxesConfig, SamplingConfig, SceneConfig, TimingConfig, load_yaml, save_yaml};
pub use data::{Axes, SceneData};
pub use error::{SceneError, SceneResult};
pub use frame::{Camera, CurveFrame, DotFrame, Frame, LabelFrame};
pub use rate::RateFunction;
pub use script::{Action, Animation, CurveGroup, DomeBranch, Placement, Script, Step, TextSlot};
pub use timeline::Timeline;
pub use transform::PointTransform;

use pvt_fluids::PropertyOracle;

/// Build the data and the standard script for `config`.
pub fn build_timeline(oracle: &dyn PropertyOracle, config: &SceneConfig) -> SceneResult<Timeline> {
    let data = SceneData::build(oracle, config)?;
    let script = Script::standard(&config.timing, data.reference.v_min().log10());
    Timeline::new(data, script)
}
