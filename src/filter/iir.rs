//! Direct form recursive filtering of whole sample sequences.
//!
//! Assumes an initial state of 0's: every input and output sample before
//! the start of the sequence is treated as zero. Impulse responses and bulk
//! filtering go through the same routine so the two always agree.

use crate::filter::FilterSpec;
use crate::util::DspError;

/// Runs a sequence of samples through the filter described by `spec`.
///
/// Implements
///
/// ```text
/// y[n] = (sum_i b[i] x[n-i] - sum_{j>=1} a[j] y[n-j]) / a[0]
/// ```
///
/// and returns exactly one output per input sample.
///
/// # Arguments
///
/// * `spec` - Filter coefficients. `b` and `a` may differ in length.
/// * `input` - Samples to be filtered.
///
/// # Examples
///
/// ```
/// use velocity_dsp::filter::FilterSpec;
/// use velocity_dsp::filter::iir::lfilter;
///
/// // y[n] = x[n] + 0.5 y[n-1]
/// let spec = FilterSpec::new(vec![1.0], vec![1.0, -0.5]).unwrap();
/// let output = lfilter(&spec, &[1.0, 0.0, 0.0]).unwrap();
/// assert_eq!(output, vec![1.0, 0.5, 0.25]);
/// ```
pub fn lfilter(spec: &FilterSpec, input: &[f64]) -> Result<Vec<f64>, DspError> {
    let a0 = match spec.a.first() {
        Some(&a0) if a0 != 0.0 => a0,
        _ => {
            return Err(DspError::Domain(
                "leading denominator coefficient must be nonzero".to_string(),
            ))
        }
    };

    let mut output: Vec<f64> = Vec::with_capacity(input.len());
    for n in 0..input.len() {
        let feedforward: f64 = spec
            .b
            .iter()
            .take(n + 1)
            .enumerate()
            .map(|(i, b)| b * input[n - i])
            .sum();
        let feedback: f64 = spec
            .a
            .iter()
            .enumerate()
            .skip(1)
            .take(n)
            .map(|(j, a)| a * output[n - j])
            .sum();
        output.push((feedforward - feedback) / a0);
    }
    Ok(output)
}

/// A unit impulse of the given length, one at index zero and zeros after.
pub fn unit_impulse(len: usize) -> Vec<f64> {
    (0..len).map(|ix| if ix == 0 { 1.0 } else { 0.0 }).collect()
}
