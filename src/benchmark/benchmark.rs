use std::time::Instant;

use crate::configuration::config::ScenarioConfig;
use crate::error::SimError;
use crate::simulation::forces::{Force, NewtonianGravity};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

/// Time the pairwise force pass alone against a full frame step
/// (respawns + forces with attractor + integration), for growing N.
/// Prints CSV: `N,forces_ms,step_ms`
pub fn bench_step(base: &ScenarioConfig) -> Result<(), SimError> {
    let ns = [125, 250, 500, 1000, 2000, 4000];

    println!("N,forces_ms,step_ms");

    for n in ns {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 1000 { 10 } else { 2 };

        let mut cfg = base.clone();
        cfg.bodies.clear();
        cfg.spawn.body_count = n;
        let mut sim = Scenario::build_scenario(cfg)?.simulation;

        // Pairwise gravity only, no attractor
        let mut out = vec![NVec2::zeros(); n];
        NewtonianGravity.force(&sim.system, &sim.parameters, &mut out); // warm-up

        let t0 = Instant::now();
        for _ in 0..steps {
            NewtonianGravity.force(&sim.system, &sim.parameters, &mut out);
        }
        let ms_forces = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        // Full step: gravity + attractor, boundary, integration
        sim.step(); // warm-up

        let t1 = Instant::now();
        for _ in 0..steps {
            sim.step();
        }
        let ms_step = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_forces, ms_step);
    }
    Ok(())
}
