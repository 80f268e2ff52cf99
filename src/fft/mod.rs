//! Magnitude spectra of real sample sequences.
//!
//! Used to compare how much high frequency content the low pass filter
//! removes from the sensed velocity.

use num_traits::Zero;
use rustfft::num_complex::Complex as FFTComplex;
use rustfft::{FFTplanner, FFT};
use std::sync::Arc;

/// Batch based wrapper of the FFT implementation provided by
/// [RustFFT](https://github.com/awelkie/RustFFT).
///
/// The transform size is fixed at construction. Real samples are promoted
/// to complex samples with a zero imaginary part before the transform.
pub struct BatchFFT {
    pub fft: Arc<dyn FFT<f64>>,
    pub fft_size: usize,
}

impl BatchFFT {
    /// Creates a new forward `BatchFFT` of the given size.
    ///
    /// # Examples
    ///
    /// ```
    /// use velocity_dsp::fft::BatchFFT;
    ///
    /// let batch_fft = BatchFFT::new(1024);
    /// assert_eq!(batch_fft.fft_size, 1024);
    /// ```
    pub fn new(fft_size: usize) -> BatchFFT {
        let mut planner = FFTplanner::new(false);
        let fft = planner.plan_fft(fft_size);
        BatchFFT { fft, fft_size }
    }

    /// Runs the `BatchFFT` over `data`.
    ///
    /// Input shorter than the transform size is zero padded and longer input
    /// is truncated.
    pub fn run_fft(&self, data: &[f64]) -> Vec<FFTComplex<f64>> {
        let mut input: Vec<FFTComplex<f64>> = data
            .iter()
            .take(self.fft_size)
            .map(|&x| FFTComplex::new(x, 0.0))
            .collect();
        input.resize(self.fft_size, FFTComplex::zero());
        let mut output: Vec<FFTComplex<f64>> =
            vec![FFTComplex::zero(); self.fft_size];
        self.fft.process(&mut input[..], &mut output[..]);
        output
    }
}

/// Magnitude spectrum of a sample sequence.
///
/// Bins are in transform order: non-negative frequencies first, then the
/// negative frequencies.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    /// Bin frequencies in Hz.
    pub freqs: Vec<f64>,
    /// `20 log10 |X[k]|` per bin.
    pub magnitude_db: Vec<f64>,
}

/// Frequencies of the bins of an `n` point transform at `sample_rate` Hz.
///
/// # Examples
///
/// ```
/// use velocity_dsp::fft::fft_freqs;
///
/// assert_eq!(fft_freqs(4, 100.0), vec![0.0, 25.0, -50.0, -25.0]);
/// assert_eq!(fft_freqs(5, 100.0), vec![0.0, 20.0, 40.0, -40.0, -20.0]);
/// ```
pub fn fft_freqs(n: usize, sample_rate: f64) -> Vec<f64> {
    let positive = (n + 1) / 2;
    (0..n)
        .map(|k| {
            let bin = if k < positive {
                k as f64
            } else {
                k as f64 - n as f64
            };
            bin * sample_rate / n as f64
        })
        .collect()
}

/// Full length magnitude spectrum of `samples` sampled at `sample_rate` Hz.
pub fn spectrum(samples: &[f64], sample_rate: f64) -> Spectrum {
    if samples.is_empty() {
        return Spectrum::default();
    }
    let batch_fft = BatchFFT::new(samples.len());
    let magnitude_db = batch_fft
        .run_fft(samples)
        .iter()
        .map(|x| 20.0 * x.norm().log10())
        .collect();
    Spectrum {
        freqs: fft_freqs(samples.len(), sample_rate),
        magnitude_db,
    }
}

#[cfg(test)]
mod test {
    use crate::fft::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_tone_peak() {
        let sample_rate = 500.0;
        let samples: Vec<f64> = (0..500)
            .map(|n| (2.0 * PI * 25.0 * n as f64 / sample_rate).sin())
            .collect();
        let result = spectrum(&samples, sample_rate);
        assert_eq!(result.freqs.len(), 500);
        assert_eq!(result.magnitude_db.len(), 500);

        let (peak, _) = result
            .magnitude_db
            .iter()
            .enumerate()
            .take(250)
            .fold((0, std::f64::NEG_INFINITY), |best, (ix, &m)| {
                if m > best.1 {
                    (ix, m)
                } else {
                    best
                }
            });
        assert_approx_eq!(result.freqs[peak], 25.0);
        // A unit sine over N samples puts N/2 in its bin.
        assert_approx_eq!(result.magnitude_db[peak], 20.0 * 250.0_f64.log10(), 1e-6);
    }

    #[test]
    fn test_dc_bin() {
        let result = spectrum(&[2.0; 8], 8.0);
        assert_approx_eq!(result.magnitude_db[0], 20.0 * 16.0_f64.log10(), 1e-9);
        assert_eq!(result.freqs[0], 0.0);
    }

    #[test]
    fn test_empty() {
        let result = spectrum(&[], 500.0);
        assert!(result.freqs.is_empty());
        assert!(result.magnitude_db.is_empty());
    }

    #[test]
    fn test_zero_padding() {
        let batch_fft = BatchFFT::new(8);
        let output = batch_fft.run_fft(&[1.0]);
        assert_eq!(output.len(), 8);
        for x in output {
            assert_approx_eq!(x.re, 1.0);
            assert_approx_eq!(x.im, 0.0);
        }
    }
}
