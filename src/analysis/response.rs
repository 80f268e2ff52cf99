use crate::filter::iir::{lfilter, unit_impulse};
use crate::filter::FilterSpec;
use crate::util::math::polyval;
use crate::util::DspError;
use num::Complex;
use std::f64::consts::PI;

/// Impulse response horizon used when characterizing a session's filter.
pub const DEFAULT_IMPULSE_LEN: usize = 30;
/// Impulse response horizon for a standalone pole-zero inspection.
pub const ZPLANE_IMPULSE_LEN: usize = 20;
/// Frequency bins evaluated by `freqz` when no resolution is requested.
pub const DEFAULT_FREQZ_POINTS: usize = 512;

/// Response of a filter to a unit impulse of length `len`.
///
/// Goes through `lfilter`, so the result uses the same zero initial state
/// as bulk filtering.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::impulse_response;
/// use velocity_dsp::filter::FilterSpec;
///
/// let avg = FilterSpec::moving_average(2).unwrap();
/// assert_eq!(impulse_response(&avg, 4).unwrap(), vec![0.5, 0.5, 0.0, 0.0]);
/// ```
pub fn impulse_response(spec: &FilterSpec, len: usize) -> Result<Vec<f64>, DspError> {
    lfilter(spec, &unit_impulse(len))
}

/// Complex frequency response of a filter.
#[derive(Clone, Debug)]
pub struct FrequencyResponse {
    /// Frequencies in radians per sample.
    pub w: Vec<f64>,
    /// H(e^jw) at each frequency.
    pub h: Vec<Complex<f64>>,
}

impl FrequencyResponse {
    /// Frequencies as a fraction of Nyquist.
    pub fn normalized_frequency(&self) -> Vec<f64> {
        self.w.iter().map(|w| w / PI).collect()
    }

    /// Magnitude in dB, `20 log10 |H|`.
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.h.iter().map(|h| 20.0 * h.norm().log10()).collect()
    }

    /// Phase in degrees with 2 pi discontinuities removed.
    pub fn phase_deg(&self) -> Vec<f64> {
        let wrapped: Vec<f64> = self.h.iter().map(|h| h.arg()).collect();
        unwrap(&wrapped).iter().map(|p| p.to_degrees()).collect()
    }
}

/// Evaluates the frequency response of a filter on `n_points` evenly
/// spaced frequencies in [0, pi).
///
/// Each bin is `B(e^-jw) / A(e^-jw)` with both polynomials taken in powers
/// of z^-1.
///
/// # Arguments
///
/// * `spec` - Filter coefficients.
/// * `n_points` - Number of frequency bins, `DEFAULT_FREQZ_POINTS` is a
///   reasonable default.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::freqz;
/// use velocity_dsp::filter::FilterSpec;
///
/// let avg = FilterSpec::moving_average(2).unwrap();
/// let response = freqz(&avg, 4).unwrap();
/// assert_eq!(response.w.len(), 4);
/// assert!((response.h[0].re - 1.0).abs() < 1e-12);
/// ```
pub fn freqz(spec: &FilterSpec, n_points: usize) -> Result<FrequencyResponse, DspError> {
    if n_points == 0 {
        return Err(DspError::Domain(
            "frequency response needs at least one point".to_string(),
        ));
    }

    // Coefficients in powers of z^-1 read highest first are the reversed
    // polynomial in z^-1.
    let b: Vec<f64> = spec.b.iter().rev().cloned().collect();
    let a: Vec<f64> = spec.a.iter().rev().cloned().collect();

    let w: Vec<f64> = (0..n_points)
        .map(|k| PI * k as f64 / n_points as f64)
        .collect();
    let h = w
        .iter()
        .map(|&w| {
            let z_inv = Complex::from_polar(&1.0, &-w);
            polyval(&b, z_inv) / polyval(&a, z_inv)
        })
        .collect();
    Ok(FrequencyResponse { w, h })
}

/// Unwraps a phase sequence in radians.
///
/// Whenever consecutive samples jump by more than pi, a multiple of 2 pi is
/// added to the rest of the sequence so that the jump becomes smaller than
/// pi.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::unwrap;
/// use std::f64::consts::PI;
///
/// let unwrapped = unwrap(&[3.0, -3.0]);
/// assert!((unwrapped[1] - (2.0 * PI - 3.0)).abs() < 1e-12);
/// ```
pub fn unwrap(phase: &[f64]) -> Vec<f64> {
    let mut output = Vec::with_capacity(phase.len());
    let mut correction = 0.0;
    for (ix, &p) in phase.iter().enumerate() {
        if ix > 0 {
            let delta = p - phase[ix - 1];
            if delta.abs() > PI {
                let mut wrapped = (delta + PI).rem_euclid(2.0 * PI) - PI;
                // A jump of exactly -pi after wrapping keeps the sign of the
                // raw difference.
                if wrapped == -PI && delta > 0.0 {
                    wrapped = PI;
                }
                correction += wrapped - delta;
            }
        }
        output.push(p + correction);
    }
    output
}

#[cfg(test)]
mod test {
    use crate::analysis::response::*;
    use crate::filter::design::butter_lowpass;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_impulse_matches_lfilter() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let impulse = impulse_response(&spec, DEFAULT_IMPULSE_LEN).unwrap();
        assert_eq!(impulse.len(), 30);
        let truth = [
            3.913020539914434e-05,
            0.0001558254359691964,
            0.00030957094811115697,
            0.00046055984803749557,
        ];
        for (y, t) in impulse.iter().zip(truth.iter()) {
            assert_approx_eq!(y, t, 1e-12);
        }
        assert_eq!(impulse_response(&spec, ZPLANE_IMPULSE_LEN).unwrap().len(), 20);
    }

    #[test]
    fn test_dc_gain() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let response = freqz(&spec, DEFAULT_FREQZ_POINTS).unwrap();
        assert_eq!(response.w.len(), 512);
        assert_eq!(response.h.len(), 512);
        let dc = spec.b.iter().sum::<f64>() / spec.a.iter().sum::<f64>();
        assert_approx_eq!(response.h[0].re, dc, 1e-9);
        assert_approx_eq!(response.h[0].im, 0.0, 1e-12);

        let mag = response.magnitude_db();
        assert_approx_eq!(mag[0], 0.0, 1e-6);
        // Strictly decaying past DC for a Butterworth low pass.
        for pair in mag.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert!(mag[100] < -60.0);
    }

    #[test]
    fn test_normalized_frequency() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let response = freqz(&spec, 4).unwrap();
        let normalized = response.normalized_frequency();
        for (f, truth) in normalized.iter().zip([0.0, 0.25, 0.5, 0.75].iter()) {
            assert_approx_eq!(f, truth, 1e-15);
        }
        assert!(freqz(&spec, 0).is_err());
    }

    #[test]
    fn test_phase_is_continuous() {
        let spec = butter_lowpass(60.0, 500.0, 4).unwrap();
        let phase = freqz(&spec, DEFAULT_FREQZ_POINTS).unwrap().phase_deg();
        assert_approx_eq!(phase[0], 0.0, 1e-9);
        for pair in phase.windows(2) {
            assert!((pair[1] - pair[0]).abs() < 180.0);
        }
        // Four poles contribute close to -360 degrees by Nyquist.
        assert!(phase[phase.len() - 1] < -300.0);
    }

    #[test]
    fn test_unwrap() {
        let wrapped: Vec<f64> = (0..50)
            .map(|k| {
                let p = -0.3 * k as f64;
                (p + PI).rem_euclid(2.0 * PI) - PI
            })
            .collect();
        let unwrapped = unwrap(&wrapped);
        for (k, p) in unwrapped.iter().enumerate() {
            assert_approx_eq!(p, -0.3 * k as f64, 1e-9);
        }
        assert!(unwrap(&[]).is_empty());
    }
}
