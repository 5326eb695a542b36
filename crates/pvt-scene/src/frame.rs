//! A snapshot of what is visible at one instant.

use crate::script::{CurveGroup, Placement, TextSlot};
use serde::Serialize;

/// Camera view in data coordinates; scale 1 shows the whole axes box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: [f64; 2],
    pub scale: f64,
}

impl Camera {
    pub fn lerp(&self, target: &Camera, alpha: f64) -> Camera {
        if alpha >= 1.0 {
            return *target;
        }
        Camera {
            center: [
                pvt_core::lerp(self.center[0], target.center[0], alpha),
                pvt_core::lerp(self.center[1], target.center[1], alpha),
            ],
            scale: pvt_core::lerp(self.scale, target.scale, alpha),
        }
    }

    /// Visible `[x_min, x_max]` and `[y_min, y_max]` given the full axes ranges.
    pub fn bounds(&self, x_range: [f64; 2], y_range: [f64; 2]) -> ([f64; 2], [f64; 2]) {
        let half_w = 0.5 * (x_range[1] - x_range[0]) * self.scale;
        let half_h = 0.5 * (y_range[1] - y_range[0]) * self.scale;
        (
            [self.center[0] - half_w, self.center[0] + half_w],
            [self.center[1] - half_h, self.center[1] + half_h],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveFrame {
    pub group: CurveGroup,
    pub label: String,
    /// Fraction of the curve drawn so far
    pub reveal: f64,
    /// The drawn part, ending at an interpolated point when partially revealed
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelFrame {
    pub slot: TextSlot,
    pub placement: Placement,
    /// Characters written so far
    pub text: String,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DotFrame {
    pub position: [f64; 2],
    /// 0 while appearing or disappearing, 1 when fully shown
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    /// Index of the step playing at `time`; the last step once the scene is over
    pub step: usize,
    pub step_label: String,
    pub axes_progress: f64,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub curves: Vec<CurveFrame>,
    pub labels: Vec<LabelFrame>,
    pub dot: Option<DotFrame>,
    pub camera: Camera,
}

impl Frame {
    pub fn label(&self, slot: TextSlot) -> Option<&LabelFrame> {
        self.labels.iter().find(|l| l.slot == slot)
    }

    pub fn curves_in(&self, group: CurveGroup) -> impl Iterator<Item = &CurveFrame> {
        self.curves.iter().filter(move |c| c.group == group)
    }
}

/// Drawn prefix of a polyline at `reveal` in [0, 1], by segment count.
pub(crate) fn partial_polyline(points: &[[f64; 2]], reveal: f64) -> Vec<[f64; 2]> {
    if points.is_empty() || reveal <= 0.0 {
        return Vec::new();
    }
    if reveal >= 1.0 || points.len() == 1 {
        return points.to_vec();
    }

    let segments = (points.len() - 1) as f64;
    let position = reveal * segments;
    let whole = position.floor() as usize;
    let fraction = position - whole as f64;

    let mut drawn = points[..=whole].to_vec();
    if fraction > 0.0 {
        let (a, b) = (points[whole], points[whole + 1]);
        drawn.push([
            pvt_core::lerp(a[0], b[0], fraction),
            pvt_core::lerp(a[1], b[1], fraction),
        ]);
    }
    drawn
}

/// Written prefix of `text` at `progress` in [0, 1].
pub(crate) fn written_prefix(text: &str, progress: f64) -> String {
    let count = text.chars().count();
    let shown = if progress >= 1.0 {
        count
    } else {
        ((progress.max(0.0) * count as f64).floor() as usize).min(count)
    };
    text.chars().take(shown).collect()
}
