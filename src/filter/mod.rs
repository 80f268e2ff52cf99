//! Designing and applying digital filters.
//!
//! There are two primary categories of digital filters in signal processing:
//!
//! * Finite Impulse Response (FIR) Filters
//! * Infinite Impulse Response (IIR) Filters
//!
//! FIR filters are feedforward based systems, meaning they can't become
//! unstable regardless of the input data. The moving average preset in this
//! module is one, expressed with a trivial denominator.
//!
//! IIR filters are feedback based systems, and have all the caveats associated
//! with any feedback system. If poorly designed they can be unstable and
//! unpredictable. The phase and group delay responses are non-linear.
//!
//! With those drawbacks noted, a well designed IIR filter is extremely
//! efficient. A second order Butterworth low pass is enough to take the
//! sensor noise off a motor velocity trace sampled at a few hundred hertz.
//!
//! Both kinds are described by a `FilterSpec`, the numerator and denominator
//! of a rational transfer function in powers of z^-1:
//!
//! ```text
//!          b[0] + b[1] z^-1 + ... + b[M] z^-M
//! H(z) = --------------------------------------
//!          a[0] + a[1] z^-1 + ... + a[N] z^-N
//! ```
use crate::util::DspError;

pub mod design;
pub mod iir;

/// Numerator and denominator coefficients of a discrete-time transfer
/// function.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl FilterSpec {
    /// Creates a new `FilterSpec` from raw coefficients.
    ///
    /// Both coefficient vectors must be non-empty. The leading denominator
    /// coefficient is not checked here since `lfilter` reports a zero
    /// normalization at the point of use.
    ///
    /// # Arguments
    ///
    /// * `b` - Numerator coefficients, ascending powers of z^-1.
    /// * `a` - Denominator coefficients, ascending powers of z^-1.
    ///
    /// # Examples
    ///
    /// ```
    /// use velocity_dsp::filter::FilterSpec;
    ///
    /// let spec = FilterSpec::new(vec![0.5, 0.5], vec![1.0]).unwrap();
    /// assert_eq!(spec.order(), 1);
    /// ```
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<FilterSpec, DspError> {
        if b.is_empty() || a.is_empty() {
            return Err(DspError::Domain(
                "filter coefficients must not be empty".to_string(),
            ));
        }
        Ok(FilterSpec { b, a })
    }

    /// An N-point moving average, `b = [1/N; N]` and `a = [1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use velocity_dsp::filter::FilterSpec;
    ///
    /// let avg = FilterSpec::moving_average(4).unwrap();
    /// assert_eq!(avg.b, vec![0.25; 4]);
    /// ```
    pub fn moving_average(taps: usize) -> Result<FilterSpec, DspError> {
        if taps == 0 {
            return Err(DspError::Domain(
                "moving average needs at least one tap".to_string(),
            ));
        }
        FilterSpec::new(vec![1.0 / taps as f64; taps], vec![1.0])
    }

    /// Order of the transfer function, the highest delay on either side.
    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()).saturating_sub(1)
    }
}

#[cfg(test)]
mod test {
    use crate::filter::FilterSpec;

    #[test]
    fn test_filter_spec_validation() {
        assert!(FilterSpec::new(vec![], vec![1.0]).is_err());
        assert!(FilterSpec::new(vec![1.0], vec![]).is_err());
        assert!(FilterSpec::moving_average(0).is_err());
    }

    #[test]
    fn test_order() {
        let spec = FilterSpec::new(vec![1.0, 2.0, 1.0], vec![1.0, -0.5]).unwrap();
        assert_eq!(spec.order(), 2);
        assert_eq!(FilterSpec::moving_average(3).unwrap().order(), 2);
    }
}
