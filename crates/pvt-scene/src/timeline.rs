//! Evaluating the script at an arbitrary time.
//!
//! `frame_at` replays every step up to `t` on a fresh state: completed steps are applied
//! at full progress and the step in flight at its partial progress. Frames are therefore
//! a pure function of `t`, so playback can seek in either direction.

use crate::data::SceneData;
use crate::error::{SceneError, SceneResult};
use crate::frame::{
    Camera, CurveFrame, DotFrame, Frame, LabelFrame, partial_polyline, written_prefix,
};
use crate::script::{Action, Animation, CurveGroup, DomeBranch, Placement, Script, TextSlot};
use tracing::debug;

#[derive(Debug, Clone)]
struct CurveState {
    group: CurveGroup,
    label: String,
    points: Vec<[f64; 2]>,
    reveal: f64,
}

#[derive(Debug, Clone)]
struct LabelState {
    slot: TextSlot,
    placement: Placement,
    text: String,
    progress: f64,
}

#[derive(Debug, Clone)]
struct SceneState {
    axes: f64,
    curves: Vec<CurveState>,
    labels: Vec<LabelState>,
    dot: Option<DotFrame>,
    camera: Camera,
    saved_camera: Option<Camera>,
}

pub struct Timeline {
    data: SceneData,
    script: Script,
    starts: Vec<f64>,
    duration: f64,
    home: Camera,
}

impl Timeline {
    pub fn new(data: SceneData, script: Script) -> SceneResult<Self> {
        if script.steps.is_empty() {
            return Err(SceneError::invalid("script", "empty", "needs at least one step"));
        }
        for step in &script.steps {
            if !step.duration.is_finite() || step.duration <= 0.0 {
                return Err(SceneError::invalid(
                    &format!("step '{}' duration", step.label),
                    step.duration,
                    "must be positive and finite",
                ));
            }
        }

        let starts = script.start_times();
        let duration = script.duration();
        let home = Camera {
            center: data.axes.center(),
            scale: 1.0,
        };
        debug!(steps = script.steps.len(), duration, "timeline ready");
        Ok(Self {
            data,
            script,
            starts,
            duration,
            home,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn data(&self) -> &SceneData {
        &self.data
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// `(start, step)` pairs in playing order.
    pub fn steps(&self) -> impl Iterator<Item = (f64, &crate::script::Step)> {
        self.starts.iter().copied().zip(&self.script.steps)
    }

    /// Index of the step playing at `t`; `t` is clamped to the scene.
    pub fn step_index_at(&self, t: f64) -> usize {
        let t = t.clamp(0.0, self.duration);
        let count = self.starts.partition_point(|start| *start <= t);
        count.saturating_sub(1).min(self.script.steps.len() - 1)
    }

    fn initial_state(&self) -> SceneState {
        let groups = [
            (CurveGroup::Dome, &self.data.dome[..]),
            (CurveGroup::RealIsotherm, &self.data.isotherm[..]),
            (CurveGroup::IdealIsotherm, std::slice::from_ref(&self.data.ideal)),
        ];
        let curves = groups
            .into_iter()
            .flat_map(|(group, curves)| {
                curves.iter().map(move |curve| CurveState {
                    group,
                    label: curve.label.clone(),
                    points: curve.points.clone(),
                    reveal: 0.0,
                })
            })
            .collect();

        SceneState {
            axes: 0.0,
            curves,
            labels: Vec::new(),
            dot: None,
            camera: self.home,
            saved_camera: None,
        }
    }

    /// The visible scene at time `t` seconds; `t` is clamped to `[0, duration]`.
    pub fn frame_at(&self, t: f64) -> Frame {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, self.duration) };
        let mut state = self.initial_state();

        // A step at zero progress leaves no trace, so boundaries show the completed state
        for (start, step) in self.steps() {
            if t <= start {
                break;
            }
            let alpha = ((t - start) / step.duration).min(1.0);
            for animation in &step.animations {
                self.apply(&mut state, animation, alpha);
            }
        }

        let step = self.step_index_at(t);
        Frame {
            time: t,
            step,
            step_label: self.script.steps[step].label.clone(),
            axes_progress: state.axes,
            x_range: self.data.axes.x_range,
            y_range: self.data.axes.y_range,
            curves: state
                .curves
                .into_iter()
                .filter(|c| c.reveal > 0.0)
                .map(|c| CurveFrame {
                    points: partial_polyline(&c.points, c.reveal),
                    group: c.group,
                    label: c.label,
                    reveal: c.reveal,
                })
                .collect(),
            labels: state
                .labels
                .into_iter()
                .map(|l| LabelFrame {
                    text: written_prefix(&l.text, l.progress),
                    slot: l.slot,
                    placement: l.placement,
                    progress: l.progress,
                })
                .collect(),
            dot: state.dot,
            camera: state.camera,
        }
    }

    fn apply(&self, state: &mut SceneState, animation: &Animation, alpha: f64) {
        let eased = animation.rate.apply(alpha);
        match &animation.action {
            Action::CreateAxes => state.axes = eased,
            Action::Write {
                slot,
                text,
                placement,
            } => {
                let label = LabelState {
                    slot: *slot,
                    placement: *placement,
                    text: text.clone(),
                    progress: eased,
                };
                match state.labels.iter_mut().find(|l| l.slot == *slot) {
                    Some(existing) => *existing = label,
                    None => state.labels.push(label),
                }
            }
            Action::Unwrite { slot } => {
                if alpha >= 1.0 {
                    state.labels.retain(|l| l.slot != *slot);
                } else if let Some(label) = state.labels.iter_mut().find(|l| l.slot == *slot) {
                    label.progress = 1.0 - eased;
                }
            }
            Action::CreateCurves { group } => {
                // Curves of a group are drawn back to back within the step
                let members = state.curves.iter().filter(|c| c.group == *group).count();
                for (i, curve) in state
                    .curves
                    .iter_mut()
                    .filter(|c| c.group == *group)
                    .enumerate()
                {
                    let sub = alpha * members as f64 - i as f64;
                    curve.reveal = animation.rate.apply(sub);
                }
            }
            Action::CreateDot => {
                if let Some(position) = self.branch_start(state) {
                    state.dot = Some(DotFrame {
                        position,
                        visibility: eased,
                    });
                }
            }
            Action::ZoomToDot { scale } => {
                if let Some(dot) = state.dot {
                    let start = state.camera;
                    state.saved_camera = Some(start);
                    let target = Camera {
                        center: dot.position,
                        scale: *scale,
                    };
                    state.camera = start.lerp(&target, eased);
                }
            }
            Action::MoveDot { branch } => {
                let position = self.point_along_branch(state, *branch, eased);
                if let (Some(dot), Some(position)) = (state.dot.as_mut(), position) {
                    dot.position = position;
                    state.camera.center = position;
                }
            }
            Action::RestoreCamera => {
                let target = state.saved_camera.unwrap_or(self.home);
                state.camera = state.camera.lerp(&target, eased);
                if alpha >= 1.0 {
                    state.saved_camera = None;
                }
            }
            Action::UncreateDot => {
                if alpha >= 1.0 {
                    state.dot = None;
                } else if let Some(dot) = state.dot.as_mut() {
                    dot.visibility = 1.0 - eased;
                }
            }
            Action::TransformDome { transform } => {
                for curve in state.curves.iter_mut().filter(|c| c.group == CurveGroup::Dome) {
                    for point in curve.points.iter_mut() {
                        *point = transform.interpolate(*point, eased);
                    }
                }
            }
        }
    }

    fn dome_branch<'s>(&self, state: &'s SceneState, branch: DomeBranch) -> Option<&'s CurveState> {
        let index = match branch {
            DomeBranch::Liquid => 0,
            DomeBranch::Vapor => 1,
        };
        state
            .curves
            .iter()
            .filter(|c| c.group == CurveGroup::Dome)
            .nth(index)
    }

    fn branch_start(&self, state: &SceneState) -> Option<[f64; 2]> {
        self.dome_branch(state, DomeBranch::Liquid)?
            .points
            .first()
            .copied()
    }

    /// Point at fraction `s` of the branch's arc length, measured in view units.
    fn point_along_branch(&self, state: &SceneState, branch: DomeBranch, s: f64) -> Option<[f64; 2]> {
        let points = &self.dome_branch(state, branch)?.points;
        let first = *points.first()?;
        let axes = &self.data.axes;

        let lengths: Vec<f64> = points
            .windows(2)
            .map(|w| axes.view_distance(w[0], w[1]))
            .collect();
        let total: f64 = lengths.iter().sum();
        if total <= 0.0 || s <= 0.0 {
            return Some(first);
        }
        if s >= 1.0 {
            return points.last().copied();
        }

        let target = s * total;
        let mut walked = 0.0;
        for (w, length) in points.windows(2).zip(&lengths) {
            if walked + length >= target && *length > 0.0 {
                let f = (target - walked) / length;
                return Some([
                    pvt_core::lerp(w[0][0], w[1][0], f),
                    pvt_core::lerp(w[0][1], w[1][1], f),
                ]);
            }
            walked += length;
        }
        points.last().copied()
    }
}
