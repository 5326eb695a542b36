//! Sampled curves.

use crate::error::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pressure [Pa] as a function of a single abscissa.
///
/// The abscissa is raw specific volume for the dome and log-volume for the isotherms.
pub trait PressureCurve {
    fn pressure(&self, x: f64) -> EvalResult<f64>;
}

impl<F> PressureCurve for F
where
    F: Fn(f64) -> EvalResult<f64>,
{
    fn pressure(&self, x: f64) -> EvalResult<f64> {
        self(x)
    }
}

/// Closed interval `[start, end]` of the abscissa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    start: f64,
    end: f64,
}

impl Domain {
    /// `what` names the curve in the error when the interval is empty or non-finite.
    pub fn new(what: &str, start: f64, end: f64) -> EvalResult<Self> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(EvalError::Domain {
                what: what.to_string(),
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.start..=self.end).contains(&x)
    }

    /// `intervals + 1` evenly spaced abscissae; the last one is exactly `end`.
    pub fn points(&self, intervals: usize) -> EvalResult<Vec<f64>> {
        if intervals == 0 {
            return Err(EvalError::InvalidArg {
                what: "a domain needs at least one sampling interval".to_string(),
            });
        }

        let delta = (self.end - self.start) / intervals as f64;
        let mut points: Vec<f64> = (0..=intervals)
            .map(|i| self.start + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[intervals] = self.end;
        Ok(points)
    }
}

/// Ordered `(x, pressure)` samples of one curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub label: String,
    pub domain: Domain,
    pub points: Vec<[f64; 2]>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<[f64; 2]> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<[f64; 2]> {
        self.points.last().copied()
    }
}

/// Evaluate `curve` at every sample point of `domain`.
///
/// Fails on the first oracle error; a partially sampled curve is never returned.
pub fn sample_curve(
    label: impl Into<String>,
    curve: &dyn PressureCurve,
    domain: Domain,
    intervals: usize,
) -> EvalResult<Curve> {
    let label = label.into();
    let points = domain
        .points(intervals)?
        .into_iter()
        .map(|x| curve.pressure(x).map(|p| [x, p]))
        .collect::<EvalResult<Vec<_>>>()?;

    debug!(
        curve = %label,
        start = domain.start,
        end = domain.end,
        samples = points.len(),
        "sampled curve"
    );
    Ok(Curve {
        label,
        domain,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn domain_rejects_empty_and_reversed() {
        assert!(Domain::new("c", 1.0, 1.0).is_err());
        assert!(Domain::new("c", 2.0, 1.0).is_err());
        assert!(Domain::new("c", f64::NAN, 1.0).is_err());
        let err = Domain::new("dome", 3.0, 1.0).unwrap_err();
        assert!(matches!(err, EvalError::Domain { ref what, .. } if what == "dome"));
    }

    #[test]
    fn points_include_both_ends() {
        let domain = Domain::new("c", 0.1, 0.7).unwrap();
        let points = domain.points(3).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], 0.1);
        assert_eq!(points[3], 0.7);
        assert!((points[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_intervals_rejected() {
        let domain = Domain::new("c", 0.0, 1.0).unwrap();
        assert!(domain.points(0).is_err());
    }

    #[test]
    fn sample_curve_evaluates_each_point() {
        let line = |x: f64| -> EvalResult<f64> { Ok(2.0 * x + 1.0) };
        let domain = Domain::new("line", 0.0, 1.0).unwrap();
        let curve = sample_curve("line", &line, domain, 4).unwrap();

        assert_eq!(curve.label, "line");
        assert_eq!(curve.len(), 5);
        assert_eq!(curve.first(), Some([0.0, 1.0]));
        assert_eq!(curve.last(), Some([1.0, 3.0]));
    }

    #[test]
    fn sample_curve_propagates_first_error() {
        let failing = |x: f64| -> EvalResult<f64> {
            if x > 0.5 {
                Err(EvalError::InvalidArg {
                    what: "past half".to_string(),
                })
            } else {
                Ok(x)
            }
        };
        let domain = Domain::new("failing", 0.0, 1.0).unwrap();
        assert!(sample_curve("failing", &failing, domain, 10).is_err());
    }

    proptest! {
        #[test]
        fn points_are_increasing(start in -10.0f64..10.0, width in 1e-3f64..100.0, n in 1usize..500) {
            let domain = Domain::new("p", start, start + width).unwrap();
            let points = domain.points(n).unwrap();
            prop_assert_eq!(points.len(), n + 1);
            prop_assert!(points.windows(2).all(|w| w[1] > w[0]));
            prop_assert!(points.iter().all(|x| domain.contains(*x)));
        }
    }
}
