//! Shared error type and the numeric helpers used throughout the crate.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DspError {
    /// Missing or unusable setup, e.g. no data file or no designed filter.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A parameter outside the domain of the requested operation.
    #[error("Domain error: {0}")]
    Domain(String),
    #[error(
        "Data alignment error: {sensed} sensed samples but {commanded} commanded samples"
    )]
    DataAlignment { sensed: usize, commanded: usize },
    #[error("Convergence error: {0}")]
    Convergence(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Render error: {0}")]
    Render(String),
}

/// Polynomial evaluation, expansion and root finding.
pub mod math;
