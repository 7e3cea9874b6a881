//! Sampling policies for inter-arrival and service times.
//!
//! All randomised variants draw from a shared [`RandomSource`] handle given
//! at construction, so one seed drives a whole topology.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::random::RandomSource;
use crate::traits::Distribution;

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Distribution for Constant {
    fn sample(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Exponential {
    mean: f64,
    random: RandomSource,
}

impl Exponential {
    pub fn new(mean: f64, random: &RandomSource) -> Self {
        Self { mean, random: random.clone() }
    }
}

impl Distribution for Exponential {
    fn sample(&self) -> f64 {
        // 1 - u keeps the argument of ln in (0, 1]
        let u = 1.0 - self.random.sample();
        -u.ln() * self.mean
    }
}

/// Box-Muller normal sample, floored at [`Normal::MIN_VALUE`].
///
/// The second parameter scales the standard normal directly, it is the
/// spread of the timing rather than a squared quantity.
#[derive(Debug, Clone)]
pub struct Normal {
    mean: f64,
    variance: f64,
    random: RandomSource,
}

impl Normal {
    /// Timings never drop below this, so a scheduled interval stays positive.
    pub const MIN_VALUE: f64 = 0.01;

    pub fn new(mean: f64, variance: f64, random: &RandomSource) -> Self {
        Self { mean, variance, random: random.clone() }
    }
}

impl Distribution for Normal {
    fn sample(&self) -> f64 {
        let u = 1.0 - self.random.sample();
        let v = self.random.sample();
        let x = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        (x * self.variance + self.mean).max(Self::MIN_VALUE)
    }
}

#[derive(Debug, Clone)]
pub struct Uniform {
    min: f64,
    max: f64,
    random: RandomSource,
}

impl Uniform {
    pub fn new(min: f64, max: f64, random: &RandomSource) -> Self {
        Self { min, max, random: random.clone() }
    }
}

impl Distribution for Uniform {
    fn sample(&self) -> f64 {
        self.min + self.random.sample() * (self.max - self.min)
    }
}

/// Serializable description of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionConfig {
    Constant { value: f64 },
    Exponential { mean: f64 },
    Normal { mean: f64, variance: f64 },
    Uniform { min: f64, max: f64 },
}

impl DistributionConfig {
    pub fn build(&self, random: &RandomSource) -> Box<dyn Distribution> {
        match *self {
            Self::Constant { value } => Box::new(Constant::new(value)),
            Self::Exponential { mean } => Box::new(Exponential::new(mean, random)),
            Self::Normal { mean, variance } => Box::new(Normal::new(mean, variance, random)),
            Self::Uniform { min, max } => Box::new(Uniform::new(min, max, random)),
        }
    }
}
