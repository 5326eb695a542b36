//! Log-volume coordinate: `x = log10(v / vmin)`.

use pvt_core::units::SpecVolume;

#[inline]
pub fn to_log_volume(v: SpecVolume, v_min: SpecVolume) -> f64 {
    (v / v_min).log10()
}

#[inline]
pub fn from_log_volume(x: f64, v_min: SpecVolume) -> SpecVolume {
    10f64.powf(x) * v_min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_volume_maps_to_zero() {
        assert_eq!(to_log_volume(1.0435e-3, 1.0435e-3), 0.0);
        assert_eq!(from_log_volume(0.0, 1.0435e-3), 1.0435e-3);
    }

    #[test]
    fn decade_steps() {
        assert!((to_log_volume(1.0, 1e-3) - 3.0).abs() < 1e-12);
        assert!((from_log_volume(2.0, 1e-3) - 0.1).abs() < 1e-15);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trip_recovers_volume(v in 1e-4_f64..1e3, v_min in 1e-4_f64..1e-1) {
            let back = from_log_volume(to_log_volume(v, v_min), v_min);
            prop_assert!((back - v).abs() <= 1e-12 * v);
        }
    }
}
