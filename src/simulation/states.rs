//! Core state types for the gravitation simulation.
//!
//! - `Body`   point mass with position, velocity, per-step force and colour
//! - `System` fixed-size slot list of bodies, the optional central attractor
//!   and the current simulation time `t`
//!
//! Slots are never removed or inserted after construction; escaped bodies are
//! overwritten in place by the boundary policy.

use nalgebra::Vector2;

use crate::error::SimError;

pub type NVec2 = Vector2<f64>;

/// Straight RGBA colour, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert hue (degrees), saturation and value (both `[0, 1]`) to RGBA
    pub fn from_hsv(hue: f64, saturation: f64, value: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let c = v * s; // chroma
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self { r: r + m, g: g + m, b: b + m, a: alpha }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: f64, // mass, always > 0
    pub position: NVec2,
    pub velocity: NVec2,
    pub force: NVec2, // scratch, recomputed every step
    pub color: Rgba,
}

impl Body {
    /// Create a body with a zeroed force. Rejects zero, negative, NaN and infinite masses.
    pub fn new(mass: f64, position: NVec2, velocity: NVec2, color: Rgba) -> Result<Self, SimError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SimError::NonPositiveMass(mass));
        }
        Ok(Self {
            mass,
            position,
            velocity,
            force: NVec2::zeros(),
            color,
        })
    }

    /// Caller guarantees `mass` is positive and finite
    pub(crate) fn with_checked_mass(mass: f64, position: NVec2, velocity: NVec2, color: Rgba) -> Self {
        debug_assert!(mass > 0.0 && mass.is_finite());
        Self {
            mass,
            position,
            velocity,
            force: NVec2::zeros(),
            color,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Distance from the origin of the simulation space
    pub fn radius(&self) -> f64 {
        self.position.norm()
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // fixed-size slot list
    pub attractor: Option<Body>, // fixed at origin, never a force target
    pub t: f64, // accumulated simulation time
}

impl System {
    /// The attractor is pinned to the origin at rest, wherever it was given
    pub fn new(bodies: Vec<Body>, attractor: Option<Body>) -> Self {
        let attractor = attractor.map(|mut a| {
            a.position = NVec2::zeros();
            a.velocity = NVec2::zeros();
            a.force = NVec2::zeros();
            a
        });
        Self {
            bodies,
            attractor,
            t: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Mass-weighted mean position of the bodies (attractor excluded)
    pub fn center_of_mass(&self) -> NVec2 {
        let total: f64 = self.bodies.iter().map(Body::mass).sum();
        if total == 0.0 {
            return NVec2::zeros();
        }
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.position * b.mass())
            / total
    }

    /// Total linear momentum of the bodies (attractor excluded)
    pub fn momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.velocity * b.mass())
    }
}
