//! Fixed-step semi-implicit Euler integration
//!
//! `v' = v + dt * F / m`, then `p' = p + dt * v'`. The position update uses
//! the already-updated velocity.

use super::forces::ForceSet;
use super::params::Parameters;
use super::states::{Body, NVec2, System};

/// Advance one body by `dt` using the force already stored in `body.force`
pub fn euler_step(body: &mut Body, dt: f64) {
    body.velocity += body.force * (dt / body.mass());
    body.position += body.velocity * dt;
}

/// Advance the whole system by one step of `params.dt()`
///
/// Two phases: every force is computed from the frozen positions first,
/// then every body is integrated. Advances `sys.t`.
pub fn semi_implicit_euler(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }
    let dt = params.dt();

    // Staged accumulator, one slot per body
    let mut staged = vec![NVec2::zeros(); n];
    forces.accumulate_forces(&*sys, params, &mut staged);

    for (b, f) in sys.bodies.iter_mut().zip(staged) {
        b.force = f;
        euler_step(b, dt);
    }

    sys.t += dt;
}
