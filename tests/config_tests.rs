use std::path::PathBuf;

use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gravitation::configuration::config::{ScenarioConfig, SOLAR_MASS};
use gravitation::simulation::scenario::Scenario;
use gravitation::simulation::spawn::{map_clamped, BodySampler};
use gravitation::simulation::states::{NVec2, Rgba};
use gravitation::visualization::screen::ScreenMap;
use gravitation::SimError;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

// ==================================================================================
// Config tests
// ==================================================================================

#[test]
fn empty_mapping_uses_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();

    assert!(cfg.engine.central_attractor);
    assert_eq!(cfg.parameters.seed, 3);
    assert_eq!(cfg.parameters.softening_exponent, 9.0);
    assert_eq!(cfg.parameters.time_scale_exponent, 2.5);
    assert_eq!(cfg.parameters.max_radius, Some(3.0e9));
    assert_eq!(cfg.spawn.body_count, 500);
    assert_relative_eq!(cfg.spawn.min_mass, SOLAR_MASS / 100.0);
    assert_relative_eq!(cfg.spawn.attractor_mass, SOLAR_MASS * 1.0e6, max_relative = 1e-12);
    assert_eq!((cfg.view.width, cfg.view.height), (1080, 800));
    assert!(cfg.bodies.is_empty());
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_yaml_overrides_only_given_fields() {
    let cfg = ScenarioConfig::from_yaml_str(
        "parameters:\n  seed: 9\n  max_radius: ~\nspawn:\n  body_count: 12\n",
    )
    .unwrap();

    assert_eq!(cfg.parameters.seed, 9);
    assert_eq!(cfg.parameters.max_radius, None);
    assert_eq!(cfg.parameters.softening_exponent, 9.0);
    assert_eq!(cfg.spawn.body_count, 12);
    assert_eq!(cfg.spawn.max_init_velocity, 3.0e4);
}

#[test]
fn malformed_yaml_is_an_error() {
    let res = ScenarioConfig::from_yaml_str("spawn:\n  body_count: many\n");
    assert!(matches!(res, Err(SimError::Yaml(_))));
}

#[test]
fn validation_rejects_bad_masses() {
    let mut cfg = ScenarioConfig::default();
    cfg.spawn.min_mass = -1.0;
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig { field, .. }) if field == "spawn.min_mass"));

    let mut cfg = ScenarioConfig::default();
    cfg.spawn.max_mass = cfg.spawn.min_mass / 2.0;
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig { field, .. }) if field == "spawn.max_mass"));
}

#[test]
fn validation_requires_bodies() {
    let mut cfg = ScenarioConfig::default();
    cfg.spawn.body_count = 0;
    assert!(cfg.validate().is_err());
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn validation_rejects_bad_vectors_and_masses() {
    let cfg = ScenarioConfig::from_yaml_str("bodies:\n  - x: [1.0, 2.0, 3.0]\n    m: 1.0\n").unwrap();
    assert!(matches!(cfg.validate(), Err(SimError::BadVector { index: 0, field: "x", len: 3 })));

    let cfg = ScenarioConfig::from_yaml_str("bodies:\n  - x: [1.0, 2.0]\n    m: 0.0\n").unwrap();
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig { .. })));
}

#[test]
fn validation_rejects_non_positive_radius_and_zoom() {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.max_radius = Some(0.0);
    assert!(cfg.validate().is_err());

    let mut cfg = ScenarioConfig::default();
    cfg.view.screen_zoom = 0.0;
    assert!(cfg.validate().is_err());
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn default_scenario_file_builds() {
    let cfg = ScenarioConfig::from_path(&scenario_path("default.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let sys = &scenario.simulation.system;

    assert_eq!(sys.len(), 500);
    let attractor = sys.attractor.as_ref().unwrap();
    assert_eq!(attractor.position, NVec2::zeros());
    assert_eq!(attractor.color, Rgba::new(0.45, 0.25, 0.75, 1.0));
    assert_ne!(attractor.color, Rgba::BLACK);
}

#[test]
fn attractor_color_comes_from_view() {
    let cfg = ScenarioConfig::from_yaml_str(
        "spawn:\n  body_count: 3\nview:\n  attractor_color: [1.0, 0.5, 0.0, 1.0]\n",
    )
    .unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let attractor = scenario.simulation.system.attractor.unwrap();
    assert_eq!(attractor.color, Rgba::new(1.0, 0.5, 0.0, 1.0));
}

#[test]
fn attractor_color_must_show_on_background() {
    let mut cfg = ScenarioConfig::default();
    cfg.view.attractor_color = [0.0, 0.0, 0.0, 1.0];
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig { field, .. }) if field == "view.attractor_color"));

    // no attractor, nothing to draw
    cfg.engine.central_attractor = false;
    assert!(cfg.validate().is_ok());

    let mut cfg = ScenarioConfig::default();
    cfg.view.attractor_color = [1.5, 0.0, 0.0, 1.0];
    assert!(cfg.validate().is_err());
}

#[test]
fn free_cluster_scenario_file_builds() {
    let cfg = ScenarioConfig::from_path(&scenario_path("free_cluster.yaml")).unwrap();
    assert!(cfg.validate().is_ok());
    let mut sim = Scenario::build_scenario(cfg).unwrap().simulation;

    assert_eq!(sim.system.len(), 500);
    assert!(sim.system.attractor.is_none());
    for b in &sim.system.bodies {
        assert!(b.radius() <= 1.0e9);
        assert!(b.velocity.norm() <= 8.0e3 * (1.0 + 1e-12));
    }

    sim.step();
    assert_eq!(sim.system.len(), 500);
    assert!(sim.system.bodies.iter().all(|b| b.position.x.is_finite() && b.position.y.is_finite()));
}

#[test]
fn explicit_bodies_replace_sampling() {
    let cfg = ScenarioConfig::from_path(&scenario_path("two_body.yaml")).unwrap();
    let mut sim = Scenario::build_scenario(cfg).unwrap().simulation;

    assert_eq!(sim.system.len(), 2);
    assert!(sim.system.attractor.is_none());
    assert_eq!(sim.system.bodies[0].position, NVec2::new(5.0e8, 0.0));
    assert_eq!(sim.system.bodies[1].color, Rgba::new(0.2, 0.6, 1.0, 1.0));

    sim.step();
    assert!(sim.system.bodies[0].velocity.x < 0.0);
    assert!(sim.system.bodies[1].velocity.x > 0.0);
}

#[test]
fn missing_scenario_file_is_io_error() {
    let res = ScenarioConfig::from_path(&scenario_path("does_not_exist.yaml"));
    assert!(matches!(res, Err(SimError::Io(_))));
}

#[test]
fn same_config_builds_same_system() {
    let build = || {
        let mut cfg = ScenarioConfig::default();
        cfg.spawn.body_count = 50;
        Scenario::build_scenario(cfg).unwrap().simulation
    };
    let (mut a, mut b) = (build(), build());
    for _ in 0..100 {
        a.step();
        b.step();
    }
    assert_eq!(a.system.bodies, b.system.bodies);
}

// ==================================================================================
// Screen mapping tests
// ==================================================================================

#[test]
fn screen_map_spans_window() {
    let map = ScreenMap::new(1080.0, 800.0, 3.0e9);

    assert_eq!(map.to_screen(NVec2::new(-3.0e9, -3.0e9)), NVec2::new(0.0, 0.0));
    assert_eq!(map.to_screen(NVec2::new(3.0e9, 3.0e9)), NVec2::new(1080.0, 800.0));
    assert_eq!(map.to_screen(NVec2::zeros()), NVec2::new(540.0, 400.0));

    assert!(map.is_visible(map.to_screen(NVec2::new(1.0e9, -2.0e9))));
    assert!(!map.is_visible(map.to_screen(NVec2::new(4.0e9, 0.0))));
}

#[test]
fn screen_map_from_view_config() {
    let cfg = ScenarioConfig::default();
    let map = ScreenMap::from_view(&cfg.view);
    assert_eq!(map, ScreenMap::new(1080.0, 800.0, 3.0e9));
}

// ==================================================================================
// Sampler tests
// ==================================================================================

#[test]
fn map_clamped_limits_to_target_range() {
    assert_eq!(map_clamped(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
    assert_eq!(map_clamped(20.0, 0.0, 10.0, 0.0, 1.0), 1.0);
    assert_eq!(map_clamped(-3.0, 0.0, 10.0, 0.2, 1.0), 0.2);
}

#[test]
fn sampler_rejects_bad_ranges() {
    assert!(BodySampler::new(0.0, 1.0, 1.0, 1.0).is_err());
    assert!(BodySampler::new(2.0, 1.0, 1.0, 1.0).is_err());
    assert!(BodySampler::new(1.0, 2.0, 0.0, 1.0).is_err());
    assert!(BodySampler::new(1.0, 2.0, 1.0, -1.0).is_err());
    assert!(BodySampler::new(1.0, 1.0, 1.0, 0.0).is_ok());
}

#[test]
fn heavier_bodies_are_brighter() {
    let sampler = BodySampler::new(1.0, 1000.0, 1.0, 1.0).unwrap();
    assert_eq!(sampler.mass_weight(1.0), 0.0);
    assert_eq!(sampler.mass_weight(1000.0), 1.0);
    assert_relative_eq!(sampler.mass_weight(10f64.powf(1.5)), 0.5, max_relative = 1e-12);
}

proptest! {
    #[test]
    fn sampled_bodies_respect_ranges(seed in any::<u64>()) {
        let sampler = BodySampler::new(1.0e28, 1.0e33, 1.0e9, 3.0e4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..20 {
            let b = sampler.sample(&mut rng);
            let (min, max) = sampler.mass_range();

            prop_assert!(b.mass() >= min && b.mass() <= max);
            prop_assert!(b.radius() <= 1.0e9);
            prop_assert!(b.velocity.norm() <= 3.0e4 * (1.0 + 1e-12));

            // tangential: velocity is perpendicular to the radius vector
            let scale = b.position.norm() * b.velocity.norm();
            prop_assert!(b.position.dot(&b.velocity).abs() <= 1e-9 * scale + 1e-12);

            for c in [b.color.r, b.color.g, b.color.b] {
                prop_assert!((0.0..=1.0 + 1e-12).contains(&c));
            }
        }
    }
}
