//! Periodic and stochastic signal sources.
//!
//! Sources have no input signal; `step` produces the next sample. Random
//! sources accept an optional seed so test runs and scenario replays are
//! reproducible.

use std::f64::consts::TAU;

use fl_core::{Block, ControlError, ControlResult, Scalar, lit};
use rand::SeedableRng;
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand_distr::{Normal, StandardNormal};

/// Sine wave: `amplitude * sin(2π * frequency * t + phase)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SineWave<T> {
    amplitude: T,
    frequency: T,
    phase: T,
    output: T,
}

impl<T: Scalar> SineWave<T> {
    /// # Arguments
    ///
    /// * `amplitude` - Peak value
    /// * `frequency` - Frequency in Hz
    /// * `phase` - Phase shift in radians
    pub fn new(amplitude: T, frequency: T, phase: T) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            output: T::zero(),
        }
    }

    /// Reconfigure the waveform; the current output is kept until the next step.
    pub fn setup(&mut self, amplitude: T, frequency: T, phase: T) {
        self.amplitude = amplitude;
        self.frequency = frequency;
        self.phase = phase;
    }

    /// Sample the wave at absolute time `time` (seconds).
    pub fn step(&mut self, time: T) -> T {
        let omega: T = lit::<T>(TAU) * self.frequency;
        self.output = self.amplitude * (omega * time + self.phase).sin();
        self.output
    }

    /// `(amplitude, frequency, phase)`
    pub fn params(&self) -> (T, T, T) {
        (self.amplitude, self.frequency, self.phase)
    }
}

impl<T: Scalar> Default for SineWave<T> {
    fn default() -> Self {
        Self::new(T::one(), T::one(), T::zero())
    }
}

impl<T: Scalar> Block for SineWave<T> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.output = T::zero();
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Uniform random source producing samples in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct UniformNoise<T> {
    rng: StdRng,
    output: T,
}

impl<T: Scalar> UniformNoise<T>
where
    Standard: Distribution<T>,
{
    /// Create a source, seeded for reproducibility or from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
            output: T::zero(),
        }
    }

    pub fn step(&mut self) -> T {
        self.output = Standard.sample(&mut self.rng);
        self.output
    }

    /// Restart the sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<T: Scalar> Block for UniformNoise<T>
where
    Standard: Distribution<T>,
{
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    // Does not reseed; the sequence continues where it left off.
    fn reset(&mut self) {
        self.output = T::zero();
    }
}

/// Gaussian white noise with configurable mean and standard deviation.
#[derive(Debug, Clone)]
pub struct WhiteNoise<T>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
{
    rng: StdRng,
    distribution: Normal<T>,
    output: T,
}

impl<T> WhiteNoise<T>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
{
    /// # Errors
    ///
    /// Returns a configuration error if `std_dev` is negative or not finite.
    pub fn new(mean: T, std_dev: T, seed: Option<u64>) -> ControlResult<Self> {
        Ok(Self {
            rng: make_rng(seed),
            distribution: normal(mean, std_dev)?,
            output: T::zero(),
        })
    }

    pub fn step(&mut self) -> T {
        self.output = self.distribution.sample(&mut self.rng);
        self.output
    }

    /// Change the distribution. On error the previous distribution stays in effect.
    pub fn set_params(&mut self, mean: T, std_dev: T) -> ControlResult<()> {
        self.distribution = normal(mean, std_dev)?;
        Ok(())
    }

    pub fn mean(&self) -> T {
        self.distribution.mean()
    }

    pub fn std_dev(&self) -> T {
        self.distribution.std_dev()
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

fn normal<T>(mean: T, std_dev: T) -> ControlResult<Normal<T>>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
{
    if !mean.is_finite() {
        return Err(ControlError::Configuration {
            what: "noise mean must be finite",
        });
    }
    // `Normal::new` accepts a negative deviation and mirrors the distribution.
    if !std_dev.is_finite() || std_dev < T::zero() {
        return Err(ControlError::Configuration {
            what: "noise standard deviation must be finite and non-negative",
        });
    }
    Normal::new(mean, std_dev).map_err(|_| ControlError::Configuration {
        what: "noise standard deviation must be finite and non-negative",
    })
}

impl<T> Block for WhiteNoise<T>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
{
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.output = T::zero();
    }
}
