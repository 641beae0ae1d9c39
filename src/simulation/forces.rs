//! Force contributors for the gravitation engine
//!
//! Forces use a softened law
//!
//! ```text
//! F = G * m_i * m_j / (r^2 * soften),   soften = 10^softening_exponent
//! ```
//!
//! The softening term is a divisor, not a minimum-distance clamp: the force
//! still diverges as r -> 0, only more slowly. Coincident bodies (r == 0) and
//! any non-finite result contribute nothing.

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Collection of force terms (pairwise gravity, central attractor, ...)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Pairwise gravity plus the central attractor pull
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity).with(AttractorGravity)
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute net forces for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - every term reads the same `sys`, so no body sees a neighbour that
    ///   has already moved this step
    pub fn accumulate_forces(&self, sys: &System, params: &Parameters, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(sys, params, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::gravity()
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, sys: &System, params: &Parameters, out: &mut [NVec2]);
}

/// Softened gravitational pull of `source` on `target`.
///
/// Returns zero when the bodies coincide or the result is not finite.
#[allow(non_snake_case)]
pub fn gravitational_force(target: &Body, source: &Body, G: f64, soften: f64) -> NVec2 {
    let d = source.position - target.position;
    let r2 = d.norm_squared();
    if r2 == 0.0 {
        return NVec2::zeros();
    }

    // Divide before multiplying so heavy bodies do not overflow the product
    let r = r2.sqrt();
    let scalar = (G / soften) * (target.mass() / r) * (source.mass() / r);
    let f = (d / r) * scalar;

    if f.x.is_finite() && f.y.is_finite() {
        f
    } else {
        NVec2::zeros()
    }
}

/// Net force on body `index` from every other body and the attractor.
pub fn net_force(index: usize, sys: &System, params: &Parameters) -> NVec2 {
    let soften = params.soften();
    let target = &sys.bodies[index];

    let mut total = sys
        .bodies
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .fold(NVec2::zeros(), |acc, (_, source)| {
            acc + gravitational_force(target, source, params.G, soften)
        });

    if let Some(attractor) = &sys.attractor {
        total += gravitational_force(target, attractor, params.G, soften);
    }
    total
}

/// Pairwise body-body gravity (direct n^2 sum)
pub struct NewtonianGravity;

impl Force for NewtonianGravity {
    fn force(&self, sys: &System, params: &Parameters, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n < 2 { // nothing to pair
            return;
        }
        let soften = params.soften();

        // Each unordered pair (i, j) with i < j is evaluated once; j feels
        // exactly the opposite of what i feels
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let f = gravitational_force(bi, &sys.bodies[j], params.G, soften);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Pull of the fixed central attractor, if the system has one
pub struct AttractorGravity;

impl Force for AttractorGravity {
    fn force(&self, sys: &System, params: &Parameters, out: &mut [NVec2]) {
        let Some(attractor) = &sys.attractor else {
            return;
        };
        let soften = params.soften();

        for (f, body) in out.iter_mut().zip(sys.bodies.iter()) {
            *f += gravitational_force(body, attractor, params.G, soften);
        }
    }
}
