use crate::filter::FilterSpec;
use crate::util::math::roots;
use crate::util::DspError;
use num::Complex;

/// Zeros, poles and gain of a transfer function.
///
/// Root order is whatever the root finder settled on; compare as sets.
#[derive(Clone, Debug)]
pub struct ZeroPoleGain {
    pub zeros: Vec<Complex<f64>>,
    pub poles: Vec<Complex<f64>>,
    pub gain: f64,
}

/// Converts a numerator/denominator pair into zeros, poles and gain.
///
/// Zeros are the roots of `b` and poles the roots of `a`, both read as
/// polynomials in z with the first coefficient on the highest power. The
/// gain is the ratio of the leading nonzero coefficients, which reduces to
/// `b[0] / a[0]` for designed filters.
///
/// # Arguments
///
/// * `spec` - Filter coefficients.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::tf2zpk;
/// use velocity_dsp::filter::FilterSpec;
///
/// let spec = FilterSpec::new(vec![2.0, 1.0], vec![1.0, -0.5]).unwrap();
/// let zpk = tf2zpk(&spec).unwrap();
/// assert_eq!(zpk.gain, 2.0);
/// assert_eq!(zpk.zeros[0].re, -0.5);
/// assert_eq!(zpk.poles[0].re, 0.5);
/// ```
pub fn tf2zpk(spec: &FilterSpec) -> Result<ZeroPoleGain, DspError> {
    let a_lead = leading(&spec.a).ok_or_else(|| {
        DspError::Domain("denominator has no nonzero coefficient".to_string())
    })?;
    let b_lead = leading(&spec.b).ok_or_else(|| {
        DspError::Domain("numerator has no nonzero coefficient".to_string())
    })?;

    Ok(ZeroPoleGain {
        zeros: roots(&spec.b)?,
        poles: roots(&spec.a)?,
        gain: b_lead / a_lead,
    })
}

fn leading(coeffs: &[f64]) -> Option<f64> {
    coeffs.iter().cloned().find(|&c| c != 0.0)
}

/// Half width of a square pole-zero plot that holds the unit circle and
/// every root with some margin.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::{zplane_extent, ZeroPoleGain};
/// use num::Complex;
///
/// let zpk = ZeroPoleGain {
///     zeros: vec![Complex::new(-2.0, 0.0)],
///     poles: vec![Complex::new(0.5, 0.5)],
///     gain: 1.0,
/// };
/// assert_eq!(zplane_extent(&zpk), 3.0);
/// ```
pub fn zplane_extent(zpk: &ZeroPoleGain) -> f64 {
    let largest = zpk
        .zeros
        .iter()
        .chain(zpk.poles.iter())
        .map(|root| root.norm())
        .fold(1.0, f64::max);
    1.5 * largest
}

#[cfg(test)]
mod test {
    use crate::analysis::zpk::*;
    use crate::filter::design::butter_lowpass;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_designed_filter_zpk() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let zpk = tf2zpk(&spec).unwrap();
        assert_eq!(zpk.zeros.len(), 2);
        assert_eq!(zpk.poles.len(), 2);
        assert_approx_eq!(zpk.gain, spec.b[0], 1e-15);

        for zero in zpk.zeros.iter() {
            assert!((zero - Complex::new(-1.0, 0.0)).norm() < 1e-6);
        }

        // Conjugate pair at radius sqrt(a[2]).
        let radius = spec.a[2].sqrt();
        for pole in zpk.poles.iter() {
            assert_approx_eq!(pole.norm(), radius, 1e-9);
        }
        assert_approx_eq!(zpk.poles[0].im, -zpk.poles[1].im, 1e-9);
        assert_approx_eq!(zplane_extent(&zpk), 1.5, 1e-6);
    }

    #[test]
    fn test_leading_zero_gain() {
        let spec = FilterSpec::new(vec![0.0, 3.0, 1.5], vec![2.0, 0.0, -0.5]).unwrap();
        let zpk = tf2zpk(&spec).unwrap();
        assert_approx_eq!(zpk.gain, 1.5);
        assert_eq!(zpk.zeros.len(), 1);
        assert_eq!(zpk.poles.len(), 2);
        assert_approx_eq!(zpk.zeros[0].re, -0.5);
    }

    #[test]
    fn test_extent_grows_with_outer_pole() {
        let spec = FilterSpec::new(vec![1.0], vec![1.0, -1.5]).unwrap();
        let zpk = tf2zpk(&spec).unwrap();
        assert_approx_eq!(zpk.poles[0].re, 1.5);
        assert_approx_eq!(zplane_extent(&zpk), 2.25);
    }

    #[test]
    fn test_zero_denominator() {
        let spec = FilterSpec::new(vec![1.0], vec![0.0, 0.0]).unwrap();
        assert!(tf2zpk(&spec).is_err());
    }
}
