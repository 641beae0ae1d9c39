use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgba};
use crate::visualization::screen::ScreenMap;

#[derive(Component)]
struct BodyIndex(pub usize);

/// On-screen radius of a body, in pixels
const POINT_RADIUS: f32 = 1.5;

/// On-screen radius of the central attractor, in pixels
const ATTRACTOR_RADIUS: f32 = 5.0;

/// Exponent change per frame while an arrow key is held
const EXPONENT_STEP: f64 = 0.05;

#[derive(Resource)]
struct ViewerState {
    scenario: Scenario,
    screen: ScreenMap,
    respawned: Vec<usize>, // slots whose colour must be refreshed
    recolor_all: bool,
}

pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting 2D viewer with {} bodies", scenario.simulation.system.len());

    let screen = ScreenMap::from_view(&scenario.view);
    let resolution = WindowResolution::new(scenario.view.width as f32, scenario.view.height as f32);

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(ViewerState {
            scenario,
            screen,
            respawned: Vec::new(),
            recolor_all: false,
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "gravitation".into(),
                        resolution,
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                // the binary owns the global tracing subscriber
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (controls_system, physics_step_system, sync_bodies_system).chain())
        .run();
}

fn setup_bodies_system(mut commands: Commands, state: Res<ViewerState>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera centred on the window
    commands.spawn(Camera2dBundle::default());

    // The attractor never moves, so it is drawn once and never synced
    if let Some(attractor) = &state.scenario.simulation.system.attractor {
        let screen = state.screen.to_screen(attractor.position);
        commands.spawn(MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(ATTRACTOR_RADIUS))),
            material: materials.add(ColorMaterial::from(to_color(attractor.color))),
            transform: Transform::from_translation(to_world(&state.screen, screen)),
            ..Default::default()
        });
    }

    let mesh = Mesh2dHandle(meshes.add(Circle::new(POINT_RADIUS)));

    for (i, body) in state.scenario.simulation.system.bodies.iter().enumerate() {
        let screen = state.screen.to_screen(body.position);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.clone(),
                material: materials.add(ColorMaterial::from(to_color(body.color))),
                transform: Transform::from_translation(to_world(&state.screen, screen)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn controls_system(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<ViewerState>) {
    let state = &mut *state;
    let sim = &mut state.scenario.simulation;
    let before = (sim.parameters.softening_exponent, sim.parameters.time_scale_exponent);

    if keys.pressed(KeyCode::ArrowUp) {
        sim.parameters.adjust_time_scale(EXPONENT_STEP);
    }
    if keys.pressed(KeyCode::ArrowDown) {
        sim.parameters.adjust_time_scale(-EXPONENT_STEP);
    }
    if keys.pressed(KeyCode::ArrowRight) {
        sim.parameters.adjust_softening(EXPONENT_STEP);
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        sim.parameters.adjust_softening(-EXPONENT_STEP);
    }

    let after = (sim.parameters.softening_exponent, sim.parameters.time_scale_exponent);
    if after != before {
        debug!(softening_exponent = after.0, time_scale_exponent = after.1, "controls changed");
    }

    if keys.just_pressed(KeyCode::KeyR) {
        info!(seed = sim.parameters.seed, "reseeding system");
        sim.reseed();
        state.recolor_all = true;
    }
}

fn physics_step_system(time: Res<Time>, mut state: ResMut<ViewerState>) {
    let report = state.scenario.simulation.on_tick(time.delta_seconds_f64());
    state.respawned.extend(report.respawned);
}

fn sync_bodies_system(
    mut state: ResMut<ViewerState>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&BodyIndex, &mut Transform, &mut Visibility, &Handle<ColorMaterial>)>,
) {
    let state = &mut *state;
    let recolor_all = std::mem::take(&mut state.recolor_all);
    let respawned = std::mem::take(&mut state.respawned);
    let bodies = &state.scenario.simulation.system.bodies;

    for (BodyIndex(i), mut transform, mut visibility, material) in &mut query {
        let Some(b) = bodies.get(*i) else {
            continue;
        };

        let screen = state.screen.to_screen(b.position);
        transform.translation = to_world(&state.screen, screen);
        *visibility = if state.screen.is_visible(screen) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        if recolor_all || respawned.contains(i) {
            if let Some(m) = materials.get_mut(material) {
                m.color = to_color(b.color);
            }
        }
    }
}

/// Screen pixels (origin top-left, y down) to camera world space (origin centre, y up)
fn to_world(map: &ScreenMap, screen: NVec2) -> Vec3 {
    Vec3::new(
        (screen.x - 0.5 * map.width) as f32,
        (0.5 * map.height - screen.y) as f32,
        0.0,
    )
}

fn to_color(c: Rgba) -> Color {
    Color::srgba(c.r as f32, c.g as f32, c.b as f32, c.a as f32)
}
