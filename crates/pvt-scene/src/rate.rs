//! Rate functions mapping linear progress in [0, 1] to eased progress.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Steepness of [`RateFunction::Smooth`] at its midpoint.
const SMOOTH_INFLECTION: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFunction {
    Linear,
    /// Logistic S-curve rescaled to hit 0 and 1 exactly
    Smooth,
    EaseInSine,
    EaseOutSine,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl RateFunction {
    /// Eased progress; `t` is clamped to [0, 1] and both ends map exactly.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Smooth => {
                let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
                ((sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error))
                    .clamp(0.0, 1.0)
            }
            Self::EaseInSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::EaseOutSine => (t * FRAC_PI_2).sin(),
        }
    }
}
