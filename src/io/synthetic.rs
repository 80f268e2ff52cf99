use rand::distributions::Normal;
use rand::rngs::StdRng;
use rand::{FromEntropy, Rng, SeedableRng};

use crate::io::VelocitySample;
use crate::util::DspError;

/// Command levels cycled through by the synthetic profile, in rpm.
pub const STEP_LEVELS: [f64; 4] = [0.0, 1000.0, 2500.0, 500.0];
/// Seconds between command steps.
pub const STEP_PERIOD_S: f64 = 2.0;
/// Time constant of the simulated motor, in seconds.
pub const MOTOR_TIME_CONSTANT_S: f64 = 0.15;

/// Generates a stepped velocity command and a noisy first-order-lag
/// response to it, one sample at a time.
///
/// # Examples
///
/// ```
/// use velocity_dsp::io::VelocitySynth;
///
/// let mut synth = VelocitySynth::new(500.0, 25.0, Some(7)).unwrap();
/// let log = synth.generate(1000);
/// assert_eq!(log.len(), 1000);
/// assert_eq!(log[1].time_s, 0.002);
/// ```
pub struct VelocitySynth {
    rng: StdRng,
    noise: Normal,
    sample_rate: f64,
    alpha: f64,
}

impl VelocitySynth {
    /// Creates a generator at `sample_rate` Hz adding Gaussian noise with a
    /// standard deviation of `noise_rpm`. A `seed` makes the output
    /// reproducible; without one the generator is seeded from entropy.
    pub fn new(
        sample_rate: f64,
        noise_rpm: f64,
        seed: Option<u64>,
    ) -> Result<VelocitySynth, DspError> {
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(DspError::Configuration(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if !(noise_rpm >= 0.0) || !noise_rpm.is_finite() {
            return Err(DspError::Configuration(format!(
                "noise level must be non-negative, got {}",
                noise_rpm
            )));
        }
        let rng = match seed {
            Some(seed) => {
                let mut bytes = [0u8; 32];
                bytes[..8].copy_from_slice(&seed.to_le_bytes());
                StdRng::from_seed(bytes)
            }
            None => StdRng::from_entropy(),
        };
        let dt = 1.0 / sample_rate;
        Ok(VelocitySynth {
            rng,
            noise: Normal::new(0.0, noise_rpm),
            sample_rate,
            alpha: dt / (MOTOR_TIME_CONSTANT_S + dt),
        })
    }

    /// Commanded velocity at time `t`.
    pub fn command(t: f64) -> f64 {
        let step = (t / STEP_PERIOD_S).floor() as usize;
        STEP_LEVELS[step % STEP_LEVELS.len()]
    }

    /// Produces `len` evenly spaced samples starting at rest at t = 0.
    pub fn generate(&mut self, len: usize) -> Vec<VelocitySample> {
        let mut velocity = 0.0;
        let mut samples = Vec::with_capacity(len);
        for n in 0..len {
            let time_s = n as f64 / self.sample_rate;
            let commanded = VelocitySynth::command(time_s);
            velocity += self.alpha * (commanded - velocity);
            let sensed = velocity + self.rng.sample(&self.noise);
            samples.push(VelocitySample {
                time_s,
                commanded,
                sensed,
            });
        }
        samples
    }
}

#[cfg(test)]
mod test {
    use crate::io::synthetic::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_command_profile() {
        assert_eq!(VelocitySynth::command(0.0), 0.0);
        assert_eq!(VelocitySynth::command(2.5), 1000.0);
        assert_eq!(VelocitySynth::command(4.0), 2500.0);
        assert_eq!(VelocitySynth::command(7.9), 500.0);
        assert_eq!(VelocitySynth::command(8.0), 0.0);
    }

    #[test]
    fn test_noiseless_lag() {
        let mut synth = VelocitySynth::new(500.0, 0.0, Some(1)).unwrap();
        let log = synth.generate(2000);
        assert_eq!(log.len(), 2000);
        assert_eq!(log[999].sensed, 0.0);

        // The response rises without overshooting and settles within the
        // two-second step.
        let step: Vec<f64> = log[1000..2000].iter().map(|s| s.sensed).collect();
        assert!(step.windows(2).all(|w| w[1] >= w[0]));
        assert!(step.iter().all(|&v| v <= 1000.0));
        assert_approx_eq!(step[999], 1000.0, 1e-2);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let first = VelocitySynth::new(500.0, 25.0, Some(42)).unwrap().generate(100);
        let second = VelocitySynth::new(500.0, 25.0, Some(42)).unwrap().generate(100);
        let a: Vec<f64> = first.iter().map(|s| s.sensed).collect();
        let b: Vec<f64> = second.iter().map(|s| s.sensed).collect();
        assert_eq!(a, b);
        assert!(a.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_bad_parameters() {
        assert!(VelocitySynth::new(0.0, 1.0, None).is_err());
        assert!(VelocitySynth::new(500.0, -1.0, None).is_err());
        assert!(VelocitySynth::new(std::f64::NAN, 1.0, None).is_err());
    }
}
