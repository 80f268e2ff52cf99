//! Butterworth low-pass design, filtering and linear system analysis for
//! velocity-control logs.
//!
//! A `session::Session` holds one log's sensed and commanded velocity.
//! Designing a filter stores its coefficients on the session and runs the
//! sensed velocity through it. The stored filter can then be characterized
//! (poles, zeros, gain, impulse and frequency response) and every artifact
//! handed to a `render::Renderer`.

pub mod analysis;
pub mod fft;
pub mod filter;
pub mod io;
pub mod prelude;
pub mod render;
pub mod session;
pub mod util;

pub use crate::util::DspError;
