//! Linear system analysis of a `FilterSpec`.
//!
//! Every view here is a stateless function of the filter coefficients:
//!
//! * `tf2zpk` - zeros, poles and gain of the transfer function
//! * `impulse_response` - the filter's response to a unit impulse
//! * `freqz` - complex frequency response over [0, pi)
//! * `zplane_extent` - axis extent for a pole-zero plot
//! * `is_stable` - exact stability test on the denominator
//!
//! Signal spectra of sample sequences live in `crate::fft`.

pub mod response;
pub mod stability;
pub mod zpk;

pub use self::response::{
    freqz, impulse_response, unwrap, FrequencyResponse, DEFAULT_FREQZ_POINTS,
    DEFAULT_IMPULSE_LEN, ZPLANE_IMPULSE_LEN,
};
pub use self::stability::is_stable;
pub use self::zpk::{tf2zpk, zplane_extent, ZeroPoleGain};

use crate::filter::FilterSpec;
use crate::util::DspError;

/// Everything derived from a single filter, gathered for a renderer.
#[derive(Clone, Debug)]
pub struct Characterization {
    pub zpk: ZeroPoleGain,
    pub extent: f64,
    pub impulse: Vec<f64>,
    pub response: FrequencyResponse,
}

impl Characterization {
    /// Runs every analysis view on `spec`.
    ///
    /// # Arguments
    ///
    /// * `spec` - Filter to characterize.
    /// * `impulse_len` - Number of impulse response samples.
    /// * `freqz_points` - Number of frequency bins over [0, pi).
    pub fn new(
        spec: &FilterSpec,
        impulse_len: usize,
        freqz_points: usize,
    ) -> Result<Characterization, DspError> {
        let zpk = tf2zpk(spec)?;
        let extent = zplane_extent(&zpk);
        Ok(Characterization {
            extent,
            zpk,
            impulse: impulse_response(spec, impulse_len)?,
            response: freqz(spec, freqz_points)?,
        })
    }
}
