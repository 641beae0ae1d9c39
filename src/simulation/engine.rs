//! Per-frame simulation driver
//!
//! A `Simulation` owns the system state, the force terms, the boundary policy
//! and the seeded random stream. One call to [`Simulation::step`] runs
//! boundary respawns, the force pass and the integration pass, in that order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::boundary::BoundaryPolicy;
use super::forces::ForceSet;
use super::integrator::semi_implicit_euler;
use super::params::Parameters;
use super::spawn::BodySampler;
use super::states::{Body, System};

/// Frame-rate reports are emitted every this many ticks
const FRAME_REPORT_INTERVAL: u64 = 50;

/// Host time that must pass before frame-rate reports start, in seconds
const FRAME_REPORT_WARMUP: f64 = 0.5;

/// Outcome of one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub respawned: Vec<usize>, // slots overwritten by the boundary policy
}

pub struct Simulation {
    pub system: System,
    pub parameters: Parameters,
    forces: ForceSet,
    boundary: BoundaryPolicy,
    sampler: BodySampler,
    rng: ChaCha8Rng,
    frames: u64, // ticks received from the host
    host_seconds: f64, // wall time reported by the host
}

impl Simulation {
    /// Sample `count` bodies from a stream seeded with `parameters.seed`
    pub fn seeded(
        count: usize,
        attractor: Option<Body>,
        parameters: Parameters,
        sampler: BodySampler,
        boundary: BoundaryPolicy,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(parameters.seed);
        let bodies = (0..count).map(|_| sampler.sample(&mut rng)).collect();
        Self::from_parts(System::new(bodies, attractor), parameters, sampler, boundary, rng)
    }

    /// Use explicit initial bodies; the seeded stream only feeds respawns
    pub fn with_bodies(
        bodies: Vec<Body>,
        attractor: Option<Body>,
        parameters: Parameters,
        sampler: BodySampler,
        boundary: BoundaryPolicy,
    ) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(parameters.seed);
        Self::from_parts(System::new(bodies, attractor), parameters, sampler, boundary, rng)
    }

    fn from_parts(
        system: System,
        parameters: Parameters,
        sampler: BodySampler,
        boundary: BoundaryPolicy,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            system,
            parameters,
            forces: ForceSet::gravity(),
            boundary,
            sampler,
            rng,
            frames: 0,
            host_seconds: 0.0,
        }
    }

    /// Replace the force terms
    pub fn with_forces(mut self, forces: ForceSet) -> Self {
        self.forces = forces;
        self
    }

    /// Throw away every body and resample the system from the configured seed
    pub fn reseed(&mut self) {
        let count = self.system.len();
        self.rng = ChaCha8Rng::seed_from_u64(self.parameters.seed);
        self.system.bodies = (0..count).map(|_| self.sampler.sample(&mut self.rng)).collect();
        self.system.t = 0.0;
    }

    /// Advance the system by one physics step of `parameters.dt()`
    pub fn step(&mut self) -> StepReport {
        let respawned = self.boundary.apply(&mut self.system, &self.sampler, &mut self.rng);
        semi_implicit_euler(&mut self.system, &self.forces, &self.parameters);
        StepReport { respawned }
    }

    /// Host frame callback. The physics step does not depend on `delta_seconds`;
    /// it only feeds the periodic frame-rate report.
    pub fn on_tick(&mut self, delta_seconds: f64) -> StepReport {
        self.frames += 1;
        self.host_seconds += delta_seconds;

        if self.frames % FRAME_REPORT_INTERVAL == 0
            && self.host_seconds > FRAME_REPORT_WARMUP
            && delta_seconds > 0.0
        {
            debug!(frame = self.frames, fps = (1.0 / delta_seconds).round(), "frame rate");
        }

        self.step()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
