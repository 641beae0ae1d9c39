//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the `Simulation` (system at t = 0, parameters, forces, boundary, rng)
//! - the view settings used by renderers

use tracing::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig, ViewConfig};
use crate::error::SimError;
use crate::simulation::boundary::BoundaryPolicy;
use crate::simulation::engine::Simulation;
use crate::simulation::params::Parameters;
use crate::simulation::spawn::BodySampler;
use crate::simulation::states::{Body, NVec2, Rgba};

pub struct Scenario {
    pub simulation: Simulation,
    pub view: ViewConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            softening_exponent: p_cfg.softening_exponent,
            time_scale_exponent: p_cfg.time_scale_exponent,
            seed: p_cfg.seed,
        };

        let s_cfg = &cfg.spawn;
        let sampler = BodySampler::new(
            s_cfg.min_mass,
            s_cfg.max_mass,
            s_cfg.max_init_distance,
            s_cfg.max_init_velocity,
        )?;
        let boundary = BoundaryPolicy::new(p_cfg.max_radius);

        // Central attractor: fixed at the origin, drawn in the view's attractor colour
        let attractor = if cfg.engine.central_attractor {
            let [r, g, b, a] = cfg.view.attractor_color;
            Some(Body::new(s_cfg.attractor_mass, NVec2::zeros(), NVec2::zeros(), Rgba::new(r, g, b, a))?)
        } else {
            None
        };

        let simulation = if cfg.bodies.is_empty() {
            Simulation::seeded(s_cfg.body_count, attractor, parameters, sampler, boundary)
        } else {
            let bodies = cfg
                .bodies
                .iter()
                .map(body_from_config)
                .collect::<Result<Vec<_>, _>>()?;
            Simulation::with_bodies(bodies, attractor, parameters, sampler, boundary)
        };

        info!(
            bodies = simulation.system.len(),
            attractor = simulation.system.attractor.is_some(),
            seed = simulation.parameters.seed,
            "built scenario"
        );

        Ok(Self {
            simulation,
            view: cfg.view,
        })
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body, SimError> {
    let color = bc
        .color
        .map(|[r, g, b, a]| Rgba::new(r, g, b, a))
        .unwrap_or(Rgba::WHITE);
    Body::new(
        bc.m,
        NVec2::new(bc.x[0], bc.x[1]),
        NVec2::new(bc.v[0], bc.v[1]),
        color,
    )
}
