//! Presentation of analysis results.
//!
//! The numeric side of the crate never holds drawing state. Everything a
//! chart needs is handed to a `Renderer` as plain values, and what the
//! renderer does with them (log, write files, show a window) is up to the
//! implementation.

pub mod svg;

pub use self::svg::SvgRenderer;

use crate::analysis::{Characterization, ZeroPoleGain};
use crate::fft::Spectrum;
use crate::util::DspError;
use log::info;

/// Consumer of analysis artifacts.
pub trait Renderer {
    /// Pole-zero plot scaled to `[-extent, extent]` on both axes.
    fn zplane(&mut self, zpk: &ZeroPoleGain, extent: f64) -> Result<(), DspError>;

    /// Stem plot of an impulse response.
    fn impulse(&mut self, impulse: &[f64]) -> Result<(), DspError>;

    /// Magnitude response against frequency normalized to Nyquist.
    fn magnitude(&mut self, frequency: &[f64], magnitude_db: &[f64]) -> Result<(), DspError>;

    /// Unwrapped phase response against frequency normalized to Nyquist.
    fn phase(&mut self, frequency: &[f64], phase_deg: &[f64]) -> Result<(), DspError>;

    /// Raw and filtered velocity, each against the commanded velocity.
    fn velocity(
        &mut self,
        sensed: &[f64],
        commanded: &[f64],
        filtered: &[f64],
    ) -> Result<(), DspError>;

    /// A signal and its magnitude spectrum.
    fn spectrum(
        &mut self,
        title: &str,
        samples: &[f64],
        spectrum: &Spectrum,
    ) -> Result<(), DspError>;
}

/// Sends every view of a characterized filter to `renderer`.
pub fn render_characterization(
    renderer: &mut dyn Renderer,
    characterization: &Characterization,
) -> Result<(), DspError> {
    let frequency = characterization.response.normalized_frequency();
    renderer.zplane(&characterization.zpk, characterization.extent)?;
    renderer.impulse(&characterization.impulse)?;
    renderer.magnitude(&frequency, &characterization.response.magnitude_db())?;
    renderer.phase(&frequency, &characterization.response.phase_deg())
}

/// Renderer that only reports a summary of each artifact to the log.
#[derive(Clone, Debug, Default)]
pub struct LogRenderer;

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold((std::f64::INFINITY, std::f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

impl Renderer for LogRenderer {
    fn zplane(&mut self, zpk: &ZeroPoleGain, extent: f64) -> Result<(), DspError> {
        info!(
            "Pole-zero plot: {} zeros, {} poles, gain {:e}, axes +/-{:.3}",
            zpk.zeros.len(),
            zpk.poles.len(),
            zpk.gain,
            extent
        );
        Ok(())
    }

    fn impulse(&mut self, impulse: &[f64]) -> Result<(), DspError> {
        let (lo, hi) = bounds(impulse);
        info!(
            "Impulse response: {} samples in [{:e}, {:e}]",
            impulse.len(),
            lo,
            hi
        );
        Ok(())
    }

    fn magnitude(&mut self, frequency: &[f64], magnitude_db: &[f64]) -> Result<(), DspError> {
        let (lo, hi) = bounds(magnitude_db);
        info!(
            "Frequency response: {} bins, {:.1} dB to {:.1} dB",
            frequency.len(),
            lo,
            hi
        );
        Ok(())
    }

    fn phase(&mut self, frequency: &[f64], phase_deg: &[f64]) -> Result<(), DspError> {
        let (lo, hi) = bounds(phase_deg);
        info!(
            "Phase response: {} bins, {:.1} to {:.1} degrees",
            frequency.len(),
            lo,
            hi
        );
        Ok(())
    }

    fn velocity(
        &mut self,
        sensed: &[f64],
        _commanded: &[f64],
        filtered: &[f64],
    ) -> Result<(), DspError> {
        let (sensed_lo, sensed_hi) = bounds(sensed);
        let (filtered_lo, filtered_hi) = bounds(filtered);
        info!(
            "Velocity: sensed in [{:.1}, {:.1}] rpm, filtered in [{:.1}, {:.1}] rpm",
            sensed_lo, sensed_hi, filtered_lo, filtered_hi
        );
        Ok(())
    }

    fn spectrum(
        &mut self,
        title: &str,
        samples: &[f64],
        spectrum: &Spectrum,
    ) -> Result<(), DspError> {
        let (_, peak) = bounds(&spectrum.magnitude_db);
        info!("{}: {} samples, peak {:.1} dB", title, samples.len(), peak);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::analysis::Characterization;
    use crate::filter::design::butter_lowpass;
    use crate::render::*;

    #[test]
    fn test_bounds_skip_non_finite() {
        let (lo, hi) = bounds(&[1.0, std::f64::NEG_INFINITY, -2.0, 5.0]);
        assert_eq!(lo, -2.0);
        assert_eq!(hi, 5.0);
    }

    #[test]
    fn test_log_renderer() {
        let spec = butter_lowpass(1.0, 500.0, 2).unwrap();
        let characterization = Characterization::new(&spec, 30, 512).unwrap();
        let mut renderer = LogRenderer;
        render_characterization(&mut renderer, &characterization).unwrap();
    }
}
