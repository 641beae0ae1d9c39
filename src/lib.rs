pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{Body, System, NVec2, Rgba};
pub use simulation::params::Parameters;
pub use simulation::forces::{Force, ForceSet, NewtonianGravity, AttractorGravity, gravitational_force, net_force};
pub use simulation::integrator::{euler_step, semi_implicit_euler};
pub use simulation::spawn::BodySampler;
pub use simulation::boundary::BoundaryPolicy;
pub use simulation::engine::{Simulation, StepReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, SpawnConfig, ViewConfig, BodyConfig, ScenarioConfig};

pub use visualization::screen::ScreenMap;
#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;

pub use benchmark::benchmark::bench_step;
