//! Reading and writing velocity-control logs.
//!
//! A log is a CSV file with one row per sample. Two columns matter to the
//! analysis, the sensed velocity and the commanded velocity, both in rpm.
//! Rows are assumed to be evenly spaced at the session's sample rate.

pub mod synthetic;
pub mod velocity_log;

pub use self::synthetic::VelocitySynth;

pub use self::velocity_log::{
    load_velocity_csv, read_velocity_csv, write_velocity_csv, VelocityRecords,
    VelocitySample, COMMANDED_COLUMN, SENSED_COLUMN, TIME_COLUMN,
};
