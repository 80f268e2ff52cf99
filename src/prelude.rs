//! This module provides an easy single import for those using this crate.

pub use crate::analysis::{
    freqz, impulse_response, tf2zpk, zplane_extent, Characterization, FrequencyResponse,
    ZeroPoleGain,
};
pub use crate::filter::design::butter_lowpass;
pub use crate::filter::iir::lfilter;
pub use crate::filter::FilterSpec;
pub use crate::render::{LogRenderer, Renderer, SvgRenderer};
pub use crate::session::{AnalysisConfig, FilteredResult, Session};
pub use crate::util::DspError;
