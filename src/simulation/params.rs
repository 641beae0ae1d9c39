//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G`,
//! - softening and time-scale exponents (the actual divisor and step are
//!   `10^exponent`, so a linear control spans a wide dynamic range),
//! - the random seed used for initialization and respawns

use std::ops::RangeInclusive;

/// Range the softening exponent is clamped to by [`Parameters::adjust_softening`]
pub const SOFTENING_EXPONENT_RANGE: RangeInclusive<f64> = 5.0..=12.0;

/// Range the time-scale exponent is clamped to by [`Parameters::adjust_time_scale`]
pub const TIME_SCALE_EXPONENT_RANGE: RangeInclusive<f64> = 1.0..=5.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub softening_exponent: f64, // soften = 10^softening_exponent
    pub time_scale_exponent: f64, // dt = 10^time_scale_exponent
    pub seed: u64, // deterministic seed
}

impl Parameters {
    /// Smoothing divisor applied to r^2 in the force law
    pub fn soften(&self) -> f64 {
        10f64.powf(self.softening_exponent)
    }

    /// Physics step size
    pub fn dt(&self) -> f64 {
        10f64.powf(self.time_scale_exponent)
    }

    pub fn adjust_softening(&mut self, delta: f64) {
        self.softening_exponent = clamp_to(self.softening_exponent + delta, &SOFTENING_EXPONENT_RANGE);
    }

    pub fn adjust_time_scale(&mut self, delta: f64) {
        self.time_scale_exponent = clamp_to(self.time_scale_exponent + delta, &TIME_SCALE_EXPONENT_RANGE);
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}
