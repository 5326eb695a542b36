use crate::PvtError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PvtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PvtError::NonFinite { what, value: v })
    }
}

/// Round `value` up to the next multiple of `step` (`step` must be positive).
pub fn ceil_to_step(value: Real, step: Real) -> Result<Real, PvtError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(PvtError::InvalidArg {
            what: format!("rounding step must be positive and finite, got {step}"),
        });
    }
    let value = ensure_finite(value, "rounded value")?;
    Ok((value / step).ceil() * step)
}

/// Linear interpolation between `a` and `b` at fraction `alpha`.
#[inline]
pub fn lerp(a: Real, b: Real, alpha: Real) -> Real {
    a + (b - a) * alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ceil_to_step_rounds_up_critical_pressure() {
        // Water pcrit ≈ 22.064 MPa rounds to a 25 MPa axis top
        let top = ceil_to_step(22.064e6, 5e6).unwrap();
        assert_eq!(top, 25e6);
        assert_eq!(ceil_to_step(10e6, 5e6).unwrap(), 10e6);
        assert!(ceil_to_step(1.0, 0.0).is_err());
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn nearly_integer(x: Real) -> bool {
        (x - x.round()).abs() < 1e-6
    }

    proptest! {
        #[test]
        fn ceil_to_step_is_smallest_multiple_above(value in 0.0f64..1e9, step in 1.0f64..1e7) {
            let top = ceil_to_step(value, step).unwrap();
            let slack = 1e-12 * value.max(step);
            prop_assert!(top >= value - slack);
            prop_assert!(top - step < value + slack);
            prop_assert!(nearly_integer(top / step));
        }
    }
}
