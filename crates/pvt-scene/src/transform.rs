//! Pointwise transforms applied to the dome while it is on screen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointTransform {
    /// `(x, y) -> (log10 x, y)`; points with `x <= 0` are left alone
    Log10X,
    /// `(x, y) -> (x + dx, y)`
    ShiftX(f64),
}

impl PointTransform {
    pub fn apply(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        match self {
            Self::Log10X if x > 0.0 => [x.log10(), y],
            Self::Log10X => [x, y],
            Self::ShiftX(dx) => [x + dx, y],
        }
    }

    /// Point partway between `point` and its image; `alpha >= 1` yields the image exactly.
    pub fn interpolate(&self, point: [f64; 2], alpha: f64) -> [f64; 2] {
        let target = self.apply(point);
        if alpha >= 1.0 {
            return target;
        }
        [
            pvt_core::lerp(point[0], target[0], alpha),
            pvt_core::lerp(point[1], target[1], alpha),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_leaves_non_positive_points() {
        let t = PointTransform::Log10X;
        assert_eq!(t.apply([100.0, 3.0]), [2.0, 3.0]);
        assert_eq!(t.apply([0.0, 3.0]), [0.0, 3.0]);
        assert_eq!(t.apply([-2.0, 1.0]), [-2.0, 1.0]);
    }

    #[test]
    fn shift_moves_only_x() {
        assert_eq!(PointTransform::ShiftX(2.5).apply([1.0, 7.0]), [3.5, 7.0]);
    }

    #[test]
    fn interpolation_hits_both_ends() {
        let t = PointTransform::Log10X;
        assert_eq!(t.interpolate([10.0, 1.0], 0.0), [10.0, 1.0]);
        assert_eq!(t.interpolate([10.0, 1.0], 1.0), [1.0, 1.0]);
        assert_eq!(t.interpolate([10.0, 1.0], 0.5), [5.5, 1.0]);
    }
}
