//! Random initial conditions for new and respawned bodies.
//!
//! One sampler serves both initialization and boundary respawns. The random
//! stream is always passed in explicitly so a fixed seed reproduces the same
//! sequence of bodies.

use std::f64::consts::FRAC_PI_2;

use rand::Rng;

use crate::error::SimError;
use crate::simulation::states::{Body, NVec2, Rgba};

#[derive(Debug, Clone)]
pub struct BodySampler {
    min_mass: f64,
    max_mass: f64,
    max_init_distance: f64, // radius of the spawn disc
    max_init_velocity: f64, // orbital speed given to a body at the disc edge
}

impl BodySampler {
    pub fn new(
        min_mass: f64,
        max_mass: f64,
        max_init_distance: f64,
        max_init_velocity: f64,
    ) -> Result<Self, SimError> {
        if !(min_mass > 0.0 && min_mass.is_finite()) {
            return Err(SimError::invalid("min_mass", format!("must be positive and finite, got {min_mass}")));
        }
        if !(max_mass >= min_mass && max_mass.is_finite()) {
            return Err(SimError::invalid("max_mass", format!("must be finite and >= min_mass ({min_mass}), got {max_mass}")));
        }
        if !(max_init_distance > 0.0 && max_init_distance.is_finite()) {
            return Err(SimError::invalid("max_init_distance", format!("must be positive and finite, got {max_init_distance}")));
        }
        if !(max_init_velocity >= 0.0 && max_init_velocity.is_finite()) {
            return Err(SimError::invalid("max_init_velocity", format!("must be non-negative and finite, got {max_init_velocity}")));
        }
        Ok(Self {
            min_mass,
            max_mass,
            max_init_distance,
            max_init_velocity,
        })
    }

    pub fn max_init_distance(&self) -> f64 {
        self.max_init_distance
    }

    pub fn mass_range(&self) -> (f64, f64) {
        (self.min_mass, self.max_mass)
    }

    /// Draw one body. Draw order is mass, angle, radius, hue.
    ///
    /// - mass is log-uniform in `[min_mass, max_mass]`
    /// - position is polar: uniform angle, radius uniform in `[0, max_init_distance)`
    /// - velocity is perpendicular to the radius vector, its magnitude mapped
    ///   linearly from radius onto `[0, max_init_velocity]`
    /// - colour has a random hue; saturation and value grow with mass
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Body {
        let (ln_min, ln_max) = (self.min_mass.ln(), self.max_mass.ln());
        let mass = rng.gen_range(ln_min..=ln_max).exp().clamp(self.min_mass, self.max_mass);

        let theta = rng.gen::<f64>() * std::f64::consts::TAU;
        let radius = rng.gen::<f64>() * self.max_init_distance;
        let position = NVec2::new(radius * theta.cos(), radius * theta.sin());

        let speed = map_clamped(radius, 0.0, self.max_init_distance, 0.0, self.max_init_velocity);
        let phi = theta + FRAC_PI_2;
        let velocity = NVec2::new(speed * phi.cos(), speed * phi.sin());

        let hue = rng.gen::<f64>() * 360.0;
        let weight = self.mass_weight(mass);
        let color = Rgba::from_hsv(hue, weight, 0.2 + 0.8 * weight, 1.0);

        // mass is clamped into the range checked by `new`
        Body::with_checked_mass(mass, position, velocity, color)
    }

    /// Position of `mass` within the mass range on a log scale, in `[0, 1]`
    pub fn mass_weight(&self, mass: f64) -> f64 {
        map_clamped(
            mass.ln(),
            self.min_mass.ln(),
            self.max_mass.ln(),
            0.0,
            1.0,
        )
    }
}

/// Linear map of `value` from `[a0, a1]` to `[b0, b1]`, clamped to the target range.
/// A degenerate source range maps everything to `b1`.
pub fn map_clamped(value: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    if a1 == a0 {
        return b1;
    }
    let t = ((value - a0) / (a1 - a0)).clamp(0.0, 1.0);
    b0 + t * (b1 - b0)
}
