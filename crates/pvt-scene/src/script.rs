//! The timed sequence of animation steps.
//!
//! A step plays its animations together for `duration` seconds; a step with no
//! animations is a pause.

use crate::config::TimingConfig;
use crate::rate::RateFunction;
use crate::transform::PointTransform;
use serde::Serialize;

/// Curves animated as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveGroup {
    Dome,
    RealIsotherm,
    IdealIsotherm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomeBranch {
    Liquid,
    Vapor,
}

/// On-screen text slots; writing to an occupied slot replaces its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSlot {
    XLabel,
    YLabel,
    Assumption,
    RealLaw,
    IdealLaw,
    Limit,
}

/// Where text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Below the right end of the x axis, nudged by `(dx, dy)` view units
    XAxis { dx: f64, dy: f64 },
    YAxis,
    /// Left edge at `(x, y)` in view units from the view center, y up
    View { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Action {
    CreateAxes,
    Write {
        slot: TextSlot,
        text: String,
        placement: Placement,
    },
    Unwrite {
        slot: TextSlot,
    },
    /// Curves of the group are drawn one after another
    CreateCurves {
        group: CurveGroup,
    },
    /// Dot appears at the first point of the liquid branch
    CreateDot,
    /// Save the camera, then zoom onto the dot
    ZoomToDot {
        scale: f64,
    },
    /// Dot travels the branch by arc length; the camera follows it
    MoveDot {
        branch: DomeBranch,
    },
    RestoreCamera,
    UncreateDot,
    /// Applied pointwise to every dome curve
    TransformDome {
        transform: PointTransform,
    },
}

impl Action {
    pub fn default_rate(&self) -> RateFunction {
        match self {
            Self::Write { .. } | Self::Unwrite { .. } => RateFunction::Linear,
            _ => RateFunction::Smooth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub action: Action,
    pub rate: RateFunction,
}

impl Animation {
    pub fn new(action: Action) -> Self {
        let rate = action.default_rate();
        Self { action, rate }
    }

    pub fn with_rate(mut self, rate: RateFunction) -> Self {
        self.rate = rate;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub label: String,
    pub duration: f64,
    pub animations: Vec<Animation>,
}

impl Step {
    pub fn play(label: &str, duration: f64, animations: Vec<Animation>) -> Self {
        Self {
            label: label.to_string(),
            duration,
            animations,
        }
    }

    pub fn wait(duration: f64) -> Self {
        Self {
            label: "wait".to_string(),
            duration,
            animations: Vec::new(),
        }
    }

    pub fn is_wait(&self) -> bool {
        self.animations.is_empty()
    }
}

pub const X_LABEL_LINEAR: &str = "v";
pub const X_LABEL_LOG: &str = "log10(v)";
pub const X_LABEL_SHIFTED: &str = "log10(v/v0)";
pub const Y_LABEL: &str = "P";
pub const ASSUMPTION: &str = "Let's say T = cte";
pub const REAL_LAW: &str = "P_real = P_real(v, T)";
pub const IDEAL_LAW: &str = "P_ideal = RT/v";
pub const LIMIT: &str = "lim P→0 P_ideal / P_real = 1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

fn write(slot: TextSlot, text: &str, placement: Placement) -> Animation {
    Animation::new(Action::Write {
        slot,
        text: text.to_string(),
        placement,
    })
}

fn unwrite(slot: TextSlot) -> Animation {
    Animation::new(Action::Unwrite { slot })
}

impl Script {
    /// The pressure-volume walkthrough.
    ///
    /// `log_v_min` is `log10(vmin)`, subtracted to bring the log-transformed dome into
    /// `log10(v / vmin)` coordinates.
    pub fn standard(timing: &TimingConfig, log_v_min: f64) -> Self {
        let run = timing.run_time_s;
        let wait = timing.wait_s;
        let view = |x, y| Placement::View { x, y };
        let x_axis = Placement::XAxis { dx: 0.0, dy: 0.0 };

        let steps = vec![
            // Axes
            Step::play("create axes", run, vec![Animation::new(Action::CreateAxes)]),
            Step::play(
                "write x label",
                run,
                vec![write(TextSlot::XLabel, X_LABEL_LINEAR, x_axis)],
            ),
            Step::play(
                "write y label",
                run,
                vec![write(TextSlot::YLabel, Y_LABEL, Placement::YAxis)],
            ),
            Step::wait(wait),
            // Linear dome
            Step::play(
                "create dome",
                run,
                vec![Animation::new(Action::CreateCurves {
                    group: CurveGroup::Dome,
                })],
            ),
            Step::wait(wait),
            // Dot tour
            Step::play("create dot", run, vec![Animation::new(Action::CreateDot)]),
            Step::play(
                "zoom to dot",
                run,
                vec![Animation::new(Action::ZoomToDot {
                    scale: timing.camera_zoom,
                })],
            ),
            Step::play(
                "follow liquid branch",
                timing.dot_leg_s,
                vec![
                    Animation::new(Action::MoveDot {
                        branch: DomeBranch::Liquid,
                    })
                    .with_rate(RateFunction::EaseInSine),
                ],
            ),
            Step::play(
                "follow vapor branch",
                timing.dot_leg_s,
                vec![
                    Animation::new(Action::MoveDot {
                        branch: DomeBranch::Vapor,
                    })
                    .with_rate(RateFunction::EaseOutSine),
                ],
            ),
            Step::play(
                "restore camera",
                run,
                vec![
                    Animation::new(Action::RestoreCamera),
                    Animation::new(Action::UncreateDot),
                ],
            ),
            Step::wait(wait),
            // Log transform
            Step::play("remove x label", run, vec![unwrite(TextSlot::XLabel)]),
            Step::play(
                "write log x label",
                run,
                vec![write(TextSlot::XLabel, X_LABEL_LOG, x_axis)],
            ),
            Step::wait(wait),
            Step::play(
                "log transform",
                run,
                vec![Animation::new(Action::TransformDome {
                    transform: PointTransform::Log10X,
                })],
            ),
            Step::wait(wait),
            // Shift back
            Step::play("remove x label", run, vec![unwrite(TextSlot::XLabel)]),
            Step::play(
                "write shifted x label",
                run,
                vec![write(
                    TextSlot::XLabel,
                    X_LABEL_SHIFTED,
                    Placement::XAxis { dx: -0.3, dy: -0.1 },
                )],
            ),
            Step::wait(wait),
            Step::play(
                "shift back",
                run,
                vec![Animation::new(Action::TransformDome {
                    transform: PointTransform::ShiftX(-log_v_min),
                })],
            ),
            Step::wait(wait),
            // Real isotherm
            Step::play(
                "write assumption",
                run,
                vec![write(TextSlot::Assumption, ASSUMPTION, view(2.5, 3.3))],
            ),
            Step::wait(wait),
            Step::play(
                "create real isotherm",
                run,
                vec![
                    Animation::new(Action::CreateCurves {
                        group: CurveGroup::RealIsotherm,
                    }),
                    write(TextSlot::RealLaw, REAL_LAW, view(2.5, 1.8)),
                ],
            ),
            Step::wait(wait),
            // Ideal isotherm
            Step::play(
                "create ideal isotherm",
                run,
                vec![
                    Animation::new(Action::CreateCurves {
                        group: CurveGroup::IdealIsotherm,
                    }),
                    write(TextSlot::IdealLaw, IDEAL_LAW, view(2.5, 0.3)),
                ],
            ),
            Step::wait(timing.ideal_hold_s),
            Step::play(
                "write limit",
                run,
                vec![write(TextSlot::Limit, LIMIT, view(2.5, -1.2))],
            ),
            Step::wait(timing.closing_hold_s),
        ];

        Self { steps }
    }

    pub fn duration(&self) -> f64 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Start time of each step.
    pub fn start_times(&self) -> Vec<f64> {
        self.steps
            .iter()
            .scan(0.0, |t, step| {
                let start = *t;
                *t += step.duration;
                Some(start)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_script_timing() {
        let script = Script::standard(&TimingConfig::default(), -3.0);
        assert_eq!(script.steps.len(), 30);
        assert!((script.duration() - 36.0).abs() < 1e-12);

        let waits: f64 = script
            .steps
            .iter()
            .filter(|s| s.is_wait())
            .map(|s| s.duration)
            .sum();
        assert!((waits - 16.0).abs() < 1e-12);
    }

    #[test]
    fn start_times_accumulate() {
        let script = Script::standard(&TimingConfig::default(), -3.0);
        let starts = script.start_times();
        assert_eq!(starts[0], 0.0);
        assert_eq!(starts[1], 1.0);
        let last = script.steps.len() - 1;
        assert!((starts[last] + script.steps[last].duration - script.duration()).abs() < 1e-12);
    }

    #[test]
    fn shift_uses_log_minimum_volume() {
        let script = Script::standard(&TimingConfig::default(), -2.98);
        let shift = script
            .steps
            .iter()
            .flat_map(|s| &s.animations)
            .find_map(|a| match a.action {
                Action::TransformDome {
                    transform: PointTransform::ShiftX(dx),
                } => Some(dx),
                _ => None,
            });
        assert_eq!(shift, Some(2.98));
    }

    #[test]
    fn dot_legs_use_sine_easing() {
        let script = Script::standard(&TimingConfig::default(), -3.0);
        let rates: Vec<_> = script
            .steps
            .iter()
            .flat_map(|s| &s.animations)
            .filter(|a| matches!(a.action, Action::MoveDot { .. }))
            .map(|a| a.rate)
            .collect();
        assert_eq!(rates, [RateFunction::EaseInSine, RateFunction::EaseOutSine]);
    }

    #[test]
    fn shifted_x_label_is_nudged_left_and_down() {
        let script = Script::standard(&TimingConfig::default(), -3.0);
        let placements: Vec<_> = script
            .steps
            .iter()
            .flat_map(|s| &s.animations)
            .filter_map(|a| match &a.action {
                Action::Write {
                    slot: TextSlot::XLabel,
                    text,
                    placement,
                } => Some((text.as_str(), *placement)),
                _ => None,
            })
            .collect();
        let centered = Placement::XAxis { dx: 0.0, dy: 0.0 };
        assert_eq!(
            placements,
            [
                (X_LABEL_LINEAR, centered),
                (X_LABEL_LOG, centered),
                (X_LABEL_SHIFTED, Placement::XAxis { dx: -0.3, dy: -0.1 }),
            ]
        );
    }

    #[test]
    fn text_defaults_to_linear_rate() {
        let anim = write(TextSlot::Limit, LIMIT, Placement::XAxis { dx: 0.0, dy: 0.0 });
        assert_eq!(anim.rate, RateFunction::Linear);
        assert_eq!(Animation::new(Action::CreateAxes).rate, RateFunction::Smooth);
    }
}
