//! Configuration types for loading gravitation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – structural options (central attractor on/off)
//! - [`ParametersConfig`] – physical constants, exponents, seed, escape radius
//! - [`SpawnConfig`]      – body count and the random initial-condition ranges
//! - [`ViewConfig`]       – window size and zoom of the viewer
//! - [`BodyConfig`]       – optional explicit initial bodies
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every field has a default, so `{}` is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   central_attractor: true
//!
//! parameters:
//!   seed: 3
//!   G: 6.674e-11              # gravitational constant
//!   softening_exponent: 9.0   # soften = 10^9
//!   time_scale_exponent: 2.5  # dt = 10^2.5
//!   max_radius: 3.0e9         # `~` disables respawning
//!
//! spawn:
//!   body_count: 500
//!   min_mass: 1.98892e28
//!   max_mass: 1.98892e33
//!   attractor_mass: 1.98892e36
//!   max_init_distance: 1.0e9
//!   max_init_velocity: 3.0e4
//!
//! view:
//!   width: 1080
//!   height: 800
//!   screen_zoom: 3.0e9
//!   attractor_color: [ 0.45, 0.25, 0.75, 1.0 ]
//!
//! bodies:                     # optional, replaces sampling at start
//!   - x: [ 1.0e8, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0e30
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;

/// Gravitational constant in SI units
pub const G_SI: f64 = 6.674e-11;

/// One solar mass in kg
pub const SOLAR_MASS: f64 = 1.98892e30;

/// Structure of the simulated system
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub central_attractor: bool, // `true` - add a fixed massive body at the origin
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { central_attractor: true }
    }
}

/// Physical constants and step controls
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub seed: u64,                // deterministic seed to make runs reproducible
    pub G: f64,                   // gravitational constant
    pub softening_exponent: f64,  // divisor on r^2 is 10^softening_exponent
    pub time_scale_exponent: f64, // step size is 10^time_scale_exponent
    pub max_radius: Option<f64>,  // escape radius, `None` disables the boundary
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            seed: 3,
            G: G_SI,
            softening_exponent: 9.0,
            time_scale_exponent: 2.5,
            max_radius: Some(DEFAULT_MAX_INIT_DISTANCE * 3.0),
        }
    }
}

const DEFAULT_MAX_INIT_DISTANCE: f64 = 1.0e9;

/// Initial-condition ranges shared by startup sampling and respawns
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub body_count: usize,
    pub min_mass: f64,
    pub max_mass: f64,
    pub attractor_mass: f64,
    pub max_init_distance: f64, // spawn disc radius
    pub max_init_velocity: f64, // tangential speed at the disc edge
}

impl Default for SpawnConfig {
    fn default() -> Self {
        let max_mass = SOLAR_MASS * 1.0e3;
        Self {
            body_count: 500,
            min_mass: SOLAR_MASS / 100.0,
            max_mass,
            attractor_mass: max_mass * 1.0e3,
            max_init_distance: DEFAULT_MAX_INIT_DISTANCE,
            max_init_velocity: 3.0e4,
        }
    }
}

const DEFAULT_ATTRACTOR_COLOR: [f64; 4] = [0.45, 0.25, 0.75, 1.0];

/// Viewer window and simulation-to-screen zoom
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub screen_zoom: f64, // simulation half-extent shown on screen
    pub attractor_color: [f64; 4], // RGBA, kept off the black background
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 800,
            screen_zoom: DEFAULT_MAX_INIT_DISTANCE * 3.0,
            attractor_color: DEFAULT_ATTRACTOR_COLOR,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    #[serde(default = "zero_vec")]
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass
    #[serde(default)]
    pub color: Option<[f64; 4]>, // RGBA, white when omitted
}

fn zero_vec() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub spawn: SpawnConfig,
    pub view: ViewConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, SimError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        Ok(cfg)
    }

    /// Check the preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.parameters;
        let s = &self.spawn;
        let v = &self.view;

        positive("parameters.G", p.G)?;
        finite("parameters.softening_exponent", p.softening_exponent)?;
        finite("parameters.time_scale_exponent", p.time_scale_exponent)?;
        if let Some(r) = p.max_radius {
            positive("parameters.max_radius", r)?;
        }

        if self.bodies.is_empty() && s.body_count == 0 {
            return Err(SimError::invalid("spawn.body_count", "must be > 0 when no bodies are listed"));
        }
        positive("spawn.min_mass", s.min_mass)?;
        positive("spawn.max_mass", s.max_mass)?;
        if s.max_mass < s.min_mass {
            return Err(SimError::invalid(
                "spawn.max_mass",
                format!("{} is below min_mass {}", s.max_mass, s.min_mass),
            ));
        }
        if self.engine.central_attractor {
            positive("spawn.attractor_mass", s.attractor_mass)?;
        }
        positive("spawn.max_init_distance", s.max_init_distance)?;
        if !(s.max_init_velocity >= 0.0 && s.max_init_velocity.is_finite()) {
            return Err(SimError::invalid(
                "spawn.max_init_velocity",
                format!("must be non-negative and finite, got {}", s.max_init_velocity),
            ));
        }

        if v.width == 0 || v.height == 0 {
            return Err(SimError::invalid("view", "width and height must be > 0"));
        }
        positive("view.screen_zoom", v.screen_zoom)?;
        if v.attractor_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(SimError::invalid("view.attractor_color", "components must be in [0, 1]"));
        }
        if self.engine.central_attractor && v.attractor_color[..3].iter().all(|&c| c == 0.0) {
            return Err(SimError::invalid("view.attractor_color", "black is the background colour"));
        }

        for (index, b) in self.bodies.iter().enumerate() {
            if b.x.len() != 2 {
                return Err(SimError::BadVector { index, field: "x", len: b.x.len() });
            }
            if b.v.len() != 2 {
                return Err(SimError::BadVector { index, field: "v", len: b.v.len() });
            }
            positive(&format!("bodies[{index}].m"), b.m)?;
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be positive and finite, got {value}")))
    }
}

fn finite(field: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be finite, got {value}")))
    }
}
