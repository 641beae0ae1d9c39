//! Escape boundary: bodies that wander past `max_radius` are replaced in
//! their slot by a freshly sampled body, so the slot list never changes size.

use rand::Rng;
use tracing::debug;

use super::spawn::BodySampler;
use super::states::{Body, System};

#[derive(Debug, Clone, Copy)]
pub struct BoundaryPolicy {
    pub max_radius: Option<f64>, // `None` disables respawning
}

impl BoundaryPolicy {
    pub fn new(max_radius: Option<f64>) -> Self {
        Self { max_radius }
    }

    pub fn disabled() -> Self {
        Self { max_radius: None }
    }

    /// Strictly beyond `max_radius` from the origin
    pub fn has_escaped(&self, body: &Body) -> bool {
        match self.max_radius {
            Some(max) => body.radius() > max,
            None => false,
        }
    }

    /// Overwrite every escaped slot with a new body and return the replaced indices.
    pub fn apply<R: Rng + ?Sized>(&self, sys: &mut System, sampler: &BodySampler, rng: &mut R) -> Vec<usize> {
        let mut replaced = Vec::new();
        if self.max_radius.is_none() {
            return replaced;
        }

        for (i, slot) in sys.bodies.iter_mut().enumerate() {
            if self.has_escaped(slot) {
                debug!(slot = i, radius = slot.radius(), "removed body too far");
                *slot = sampler.sample(rng);
                replaced.push(i);
            }
        }
        replaced
    }
}
