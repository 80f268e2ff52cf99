//! Butterworth low pass design.
//!
//! The design starts from the analog Butterworth prototype, whose poles sit
//! evenly on the left half of the unit circle in the s-plane. The prototype
//! is scaled to a pre-warped cutoff and mapped to the z-plane with the
//! bilinear transform, which places every zero at z = -1 (the Nyquist
//! frequency) and keeps every pole inside the unit circle.

use crate::filter::FilterSpec;
use crate::util::math::poly;
use crate::util::DspError;
use num::Complex;
use std::f64::consts::PI;

/// Sample rate the normalized design is carried out at.
const DESIGN_RATE: f64 = 2.0;

/// Designs a digital Butterworth low pass filter.
///
/// The cutoff is normalized against the Nyquist frequency of
/// `sample_rate_hz` and must land strictly inside (0, 1). The returned
/// numerator and denominator both hold `order + 1` coefficients with
/// `a[0] == 1`.
///
/// # Arguments
///
/// * `cutoff_hz` - -3 dB frequency of the filter in Hz.
/// * `sample_rate_hz` - Sample rate of the data the filter will run on.
/// * `order` - Filter order, at least one.
///
/// # Examples
///
/// ```
/// use velocity_dsp::filter::design::butter_lowpass;
///
/// let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
/// assert_eq!(spec.b.len(), 3);
/// assert_eq!(spec.a[0], 1.0);
/// ```
pub fn butter_lowpass(
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
) -> Result<FilterSpec, DspError> {
    if order < 1 {
        return Err(DspError::Domain("filter order must be at least 1".to_string()));
    }
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(DspError::Domain(format!(
            "sample rate must be positive, got {} Hz",
            sample_rate_hz
        )));
    }
    let nyquist = 0.5 * sample_rate_hz;
    let normalized_cutoff = cutoff_hz / nyquist;
    if !(normalized_cutoff > 0.0 && normalized_cutoff < 1.0) {
        return Err(DspError::Domain(format!(
            "cutoff of {} Hz must lie strictly between 0 and the Nyquist frequency of {} Hz",
            cutoff_hz, nyquist
        )));
    }
    Ok(butter_normalized(order, normalized_cutoff))
}

/// Butterworth low pass at a cutoff already normalized to Nyquist.
fn butter_normalized(order: usize, normalized_cutoff: f64) -> FilterSpec {
    let n = order as f64;

    // Analog prototype with a 1 rad/s cutoff, then moved to the pre-warped
    // cutoff so the digital -3 dB point lands exactly on `normalized_cutoff`.
    let warped = 2.0 * DESIGN_RATE * (PI * normalized_cutoff / DESIGN_RATE).tan();
    let analog_poles: Vec<Complex<f64>> = (0..order)
        .map(|k| {
            let theta = PI * (2.0 * k as f64 - n + 1.0) / (2.0 * n);
            -Complex::from_polar(&1.0, &theta) * warped
        })
        .collect();
    let analog_gain = warped.powi(order as i32);

    // Bilinear transform.
    let fs2 = Complex::new(2.0 * DESIGN_RATE, 0.0);
    let poles: Vec<Complex<f64>> =
        analog_poles.iter().map(|p| (fs2 + p) / (fs2 - p)).collect();
    let zeros = vec![Complex::new(-1.0, 0.0); order];
    let denominator: Complex<f64> = analog_poles.iter().map(|p| fs2 - p).product();
    let gain = (Complex::new(analog_gain, 0.0) / denominator).re;

    let b = poly(&zeros).iter().map(|c| gain * c.re).collect();
    let a = poly(&poles).iter().map(|c| c.re).collect();
    FilterSpec { b, a }
}

#[cfg(test)]
mod test {
    use crate::analysis::{freqz, is_stable, tf2zpk};
    use crate::filter::design::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_second_order_coefficients() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let b_truth = [3.913020539914434e-05, 7.826041079828868e-05, 3.913020539914434e-05];
        let a_truth = [1.0, -1.9822289297925284, 0.9823854506141251];
        for (b, truth) in spec.b.iter().zip(b_truth.iter()) {
            assert_approx_eq!(b, truth, 1e-12);
        }
        for (a, truth) in spec.a.iter().zip(a_truth.iter()) {
            assert_approx_eq!(a, truth, 1e-10);
        }
    }

    #[test]
    fn test_third_order_coefficients() {
        // 0.2 of Nyquist
        let spec = butter_lowpass(10.0, 100.0, 3).unwrap();
        let b_truth = [0.018098933007514428, 0.05429679902254328, 0.05429679902254328, 0.018098933007514428];
        let a_truth = [1.0, -1.7600418803431688, 1.1828932620378307, -0.2780599176345464];
        for (b, truth) in spec.b.iter().zip(b_truth.iter()) {
            assert_approx_eq!(b, truth, 1e-10);
        }
        for (a, truth) in spec.a.iter().zip(a_truth.iter()) {
            assert_approx_eq!(a, truth, 1e-10);
        }
    }

    #[test]
    fn test_first_order_half_band() {
        let spec = butter_lowpass(125.0, 500.0, 1).unwrap();
        assert_approx_eq!(spec.b[0], 0.5, 1e-12);
        assert_approx_eq!(spec.b[1], 0.5, 1e-12);
        assert_approx_eq!(spec.a[1], 0.0, 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let first = butter_lowpass(1.0, 500.0, 2).unwrap();
        let second = butter_lowpass(1.0, 500.0, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(butter_lowpass(1.0, 500.0, 0).is_err());
        assert!(butter_lowpass(250.0, 500.0, 2).is_err());
        assert!(butter_lowpass(300.0, 500.0, 2).is_err());
        assert!(butter_lowpass(0.0, 500.0, 2).is_err());
        assert!(butter_lowpass(-1.0, 500.0, 2).is_err());
        assert!(butter_lowpass(1.0, 0.0, 2).is_err());
        assert!(butter_lowpass(std::f64::NAN, 500.0, 2).is_err());
    }

    #[test]
    fn test_poles_inside_unit_circle() {
        for order in 1..=6 {
            for &cutoff in [1.0, 10.0, 60.0, 125.0, 200.0, 245.0].iter() {
                let spec = butter_lowpass(cutoff, 500.0, order).unwrap();
                assert_eq!(spec.b.len(), order + 1);
                assert_eq!(spec.a.len(), order + 1);
                let zpk = tf2zpk(&spec).unwrap();
                assert_eq!(zpk.poles.len(), order);
                assert_eq!(zpk.zeros.len(), order);
                for pole in zpk.poles.iter() {
                    assert!(pole.norm() < 1.0, "order {} cutoff {}", order, cutoff);
                }
            }
        }
    }

    #[test]
    fn test_designs_are_stable() {
        for order in 1..=10 {
            for &cutoff in [5.0, 10.0, 60.0, 125.0, 200.0, 245.0].iter() {
                let spec = butter_lowpass(cutoff, 500.0, order).unwrap();
                assert!(is_stable(&spec), "order {} cutoff {}", order, cutoff);
            }
        }
        for order in 1..=4 {
            for &cutoff in [0.1, 0.5, 1.0, 249.0].iter() {
                let spec = butter_lowpass(cutoff, 500.0, order).unwrap();
                assert!(is_stable(&spec), "order {} cutoff {}", order, cutoff);
            }
        }
    }

    #[test]
    fn test_minus_3db_at_cutoff() {
        let spec = butter_lowpass(50.0, 500.0, 4).unwrap();
        // 50 Hz is 0.2 of Nyquist, bin 0.2 * 1000 of a 1000 point grid.
        let response = freqz(&spec, 1000).unwrap();
        let mag = response.magnitude_db();
        assert_approx_eq!(mag[0], 0.0, 1e-9);
        assert_approx_eq!(mag[200], -3.0103, 1e-3);
    }
}
