//! End-to-end runs of the bundled scenes against the tracing backend.

use peltast::app::App;
use peltast::assets::Assets;
use peltast::camera::Camera;
use peltast::device::{DeviceHandle, TraceDevice, UniformValue};
use peltast::scene::Scene;
use peltast::scenes::{Forest, SolarSystem, WhackAMole};
use peltast::Vec3;

#[test]
fn solar_system_frame_has_expected_traffic() {
    let trace = TraceDevice::shared();
    let device: DeviceHandle = trace.clone();

    let mut scene = SolarSystem::new();
    scene.init(&device, &Assets::embedded());
    let mut camera = Camera::new(Vec3::new(0.0, 5.0, 20.0));
    scene.attach_to_camera(&mut camera);

    trace.borrow_mut().clear();
    scene.update(0.016, 0.016);
    scene.draw(&camera);

    let trace = trace.borrow();
    // Sun, two planets, one moon.
    assert_eq!(trace.draws().len(), 4);
    assert_eq!(trace.uniform_writes("model").len(), 4);
    assert_eq!(trace.uniform_writes("objectColor").len(), 4);
    // Uniforms are observer-driven; a quiet camera uploads nothing.
    assert!(trace.uniform_writes("view").is_empty());
}

#[test]
fn camera_movement_reaches_every_scene_shader() {
    let trace = TraceDevice::shared();
    let device: DeviceHandle = trace.clone();

    let mut scene = SolarSystem::new();
    scene.init(&device, &Assets::embedded());
    let mut camera = Camera::new(Vec3::ZERO);
    scene.attach_to_camera(&mut camera);

    trace.borrow_mut().clear();
    camera.set_position(Vec3::new(0.0, 2.0, 10.0));

    // Two distinct programs (flat, phong) each receive the new view.
    assert_eq!(trace.borrow().uniform_writes("view").len(), 2);
}

#[test]
fn forest_is_deterministic_per_seed() {
    let model_positions = |seed: u64| -> Vec<Vec3> {
        let device: DeviceHandle = TraceDevice::shared();
        let mut scene = Forest::new(seed);
        scene.init(&device, &Assets::embedded());
        scene
            .stage()
            .drawables()
            .iter()
            .map(|d| {
                scene
                    .stage()
                    .transforms
                    .matrix(d.transform)
                    .w_axis
                    .truncate()
            })
            .collect()
    };

    assert_eq!(model_positions(42), model_positions(42));
    assert_ne!(model_positions(42), model_positions(43));
}

#[test]
fn firefly_motion_reuploads_the_light_array() {
    let trace = TraceDevice::shared();
    let device: DeviceHandle = trace.clone();

    let mut scene = Forest::new(42);
    scene.init(&device, &Assets::embedded());

    trace.borrow_mut().clear();
    scene.update(0.016, 5.0);

    // Two lit programs each re-upload the two-light array.
    let writes = trace.borrow().uniform_writes("numLights");
    assert_eq!(writes, vec![UniformValue::Int(2), UniformValue::Int(2)]);
    assert_eq!(trace.borrow().uniform_writes("lights[1].position").len(), 2);
}

#[test]
fn whack_a_mole_scores_over_a_played_game() {
    let device: DeviceHandle = TraceDevice::shared();
    let mut scene = WhackAMole::new(9);
    scene.init(&device, &Assets::embedded());

    let mut hits = 0;
    let mut time = 0.0;
    for _ in 0..3000 {
        time += 0.016;
        scene.update(0.016, time);
        for index in 0..9 {
            if scene.is_up(index) && scene.whack(index) {
                hits += 1;
            }
        }
    }
    assert!(hits > 0);
    assert_eq!(scene.score(), hits);
}

#[test]
fn app_cycles_scenes_without_leaking_observers() {
    let device: DeviceHandle = TraceDevice::shared();
    let mut app = App::new(device);
    app.register_scene(Box::new(SolarSystem::new()));
    app.register_scene(Box::new(Forest::new(1)));
    app.register_scene(Box::new(WhackAMole::new(1)));
    app.init(&Assets::embedded());
    app.activate("solar_system");

    for _ in 0..6 {
        app.next_scene();
        app.run_frames(10, 0.016);
    }

    // Only the active scene's shaders may remain attached; a full cycle
    // must not accumulate stale observers.
    assert!(app.camera().observer_count() <= 3);
}
