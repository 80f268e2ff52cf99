//! The analysis session: one velocity log, its sample rate and the filter
//! currently designed for it.

use crate::analysis::{Characterization, DEFAULT_FREQZ_POINTS, DEFAULT_IMPULSE_LEN};
use crate::fft::spectrum;
use crate::filter::design::butter_lowpass;
use crate::filter::iir::lfilter;
use crate::filter::FilterSpec;
use crate::io::{load_velocity_csv, VelocityRecords};
use crate::render::{render_characterization, Renderer};
use crate::util::DspError;
use log::{debug, info};

use std::path::Path;

/// Sample rate of the motor test stand logs, in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 500.0;
pub const DEFAULT_CUTOFF_HZ: f64 = 1.0;
pub const DEFAULT_ORDER: usize = 2;

/// Knobs for a complete design, filter and characterize run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub sample_rate: f64,
    pub cutoff_hz: f64,
    pub order: usize,
    pub impulse_len: usize,
    pub freqz_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            order: DEFAULT_ORDER,
            impulse_len: DEFAULT_IMPULSE_LEN,
            freqz_points: DEFAULT_FREQZ_POINTS,
        }
    }
}

/// Output of `Session::design_and_apply`.
#[derive(Clone, Debug)]
pub struct FilteredResult {
    pub spec: FilterSpec,
    pub filtered: Vec<f64>,
}

/// Owns the sensed and commanded velocity of one log and the current
/// filter design.
#[derive(Clone, Debug)]
pub struct Session {
    sample_rate: f64,
    sensed: Vec<f64>,
    commanded: Vec<f64>,
    filter: Option<FilterSpec>,
}

impl Session {
    /// Creates a session from aligned sensed and commanded sequences at the
    /// default sample rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use velocity_dsp::session::Session;
    ///
    /// let session = Session::new(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap();
    /// assert_eq!(session.sample_rate(), 500.0);
    /// assert!(session.filter().is_none());
    ///
    /// assert!(Session::new(vec![0.0], vec![]).is_err());
    /// ```
    pub fn new(sensed: Vec<f64>, commanded: Vec<f64>) -> Result<Session, DspError> {
        if sensed.len() != commanded.len() {
            return Err(DspError::DataAlignment {
                sensed: sensed.len(),
                commanded: commanded.len(),
            });
        }
        Ok(Session {
            sample_rate: DEFAULT_SAMPLE_RATE,
            sensed,
            commanded,
            filter: None,
        })
    }

    pub fn from_records(records: VelocityRecords) -> Result<Session, DspError> {
        Session::new(records.sensed, records.commanded)
    }

    /// Loads a session from a velocity log on disk.
    ///
    /// An empty path is a configuration error and nothing is opened.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Session, DspError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DspError::Configuration(
                "no data file given, set the path to a velocity log".to_string(),
            ));
        }
        let session = Session::from_records(load_velocity_csv(path)?)?;
        info!(
            "Loaded {} samples from {}",
            session.sensed.len(),
            path.display()
        );
        Ok(session)
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Session {
        self.sample_rate = sample_rate;
        self
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn sensed(&self) -> &[f64] {
        &self.sensed
    }

    pub fn commanded(&self) -> &[f64] {
        &self.commanded
    }

    /// The most recently designed filter, if any.
    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Designs a Butterworth low pass at `cutoff_hz` and runs the sensed
    /// velocity through it.
    ///
    /// The new filter replaces the stored one only when both steps succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use velocity_dsp::session::Session;
    ///
    /// let mut session = Session::new(vec![10.0; 100], vec![10.0; 100]).unwrap();
    /// let result = session.design_and_apply(1.0, 2).unwrap();
    /// assert_eq!(result.filtered.len(), 100);
    /// assert_eq!(session.filter(), Some(&result.spec));
    ///
    /// assert!(session.design_and_apply(250.0, 2).is_err());
    /// assert_eq!(session.filter(), Some(&result.spec));
    /// ```
    pub fn design_and_apply(
        &mut self,
        cutoff_hz: f64,
        order: usize,
    ) -> Result<FilteredResult, DspError> {
        let spec = butter_lowpass(cutoff_hz, self.sample_rate, order)?;
        let filtered = lfilter(&spec, &self.sensed)?;
        info!(
            "Designed order {} low pass at {} Hz ({} Hz sampling)",
            order, cutoff_hz, self.sample_rate
        );
        debug!("b = {:?}, a = {:?}", spec.b, spec.a);
        self.filter = Some(spec.clone());
        Ok(FilteredResult { spec, filtered })
    }

    /// Runs every analysis view on the stored filter.
    pub fn characterize(
        &self,
        impulse_len: usize,
        freqz_points: usize,
    ) -> Result<Characterization, DspError> {
        let spec = self.filter.as_ref().ok_or_else(|| {
            DspError::Configuration("no filter has been designed yet".to_string())
        })?;
        Characterization::new(spec, impulse_len, freqz_points)
    }

    /// Hands the velocity traces, their spectra and the characterization of
    /// the stored filter to `renderer`.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        result: &FilteredResult,
        config: &AnalysisConfig,
    ) -> Result<(), DspError> {
        renderer.velocity(&self.sensed, &self.commanded, &result.filtered)?;
        renderer.spectrum(
            "Noisy Velocity FFT",
            &self.sensed,
            &spectrum(&self.sensed, self.sample_rate),
        )?;
        renderer.spectrum(
            "Filtered Velocity FFT",
            &result.filtered,
            &spectrum(&result.filtered, self.sample_rate),
        )?;
        let characterization = self.characterize(config.impulse_len, config.freqz_points)?;
        render_characterization(renderer, &characterization)
    }
}
