//! Observer-protocol behavior across the public API.

use std::cell::RefCell;
use std::rc::Rc;

use peltast::assets::Assets;
use peltast::camera::Camera;
use peltast::device::{DeviceHandle, TraceDevice};
use peltast::observe::{ChangeType, Observer, ObserverHandle, SubjectRef};
use peltast::scene::SceneManager;
use peltast::scenes::{Forest, SolarSystem};
use peltast::transform::{BezierCurve, TransformGraph};
use peltast::Vec3;

#[derive(Default)]
struct Counter {
    views: u32,
    projections: u32,
}

impl Observer for Counter {
    fn on_notify(&mut self, _subject: SubjectRef<'_>, change: ChangeType) {
        match change {
            ChangeType::View => self.views += 1,
            ChangeType::Projection => self.projections += 1,
        }
    }
}

#[test]
fn attaching_twice_doubles_delivery() {
    let counter = Rc::new(RefCell::new(Counter::default()));
    let handle: ObserverHandle = counter.clone();

    let mut camera = Camera::new(Vec3::ZERO);
    camera.attach(&handle);
    camera.attach(&handle);

    camera.set_position(Vec3::X);
    assert_eq!(counter.borrow().views, 2);

    camera.detach(&handle);
    camera.set_position(Vec3::Y);
    assert_eq!(counter.borrow().views, 2);
}

#[test]
fn fov_and_aspect_changes_are_projection_tagged() {
    let counter = Rc::new(RefCell::new(Counter::default()));
    let handle: ObserverHandle = counter.clone();

    let mut camera = Camera::new(Vec3::ZERO);
    camera.attach(&handle);

    camera.process_mouse_scroll(3.0);
    camera.update_aspect_ratio(1920.0, 1080.0);
    assert_eq!(counter.borrow().projections, 2);
    assert_eq!(counter.borrow().views, 0);
}

#[test]
fn scene_switch_moves_camera_observers_over() {
    let device: DeviceHandle = TraceDevice::shared();
    let mut manager = SceneManager::new();
    manager.register(Box::new(SolarSystem::new()));
    manager.register(Box::new(Forest::new(5)));
    manager.init_all(&device, &Assets::embedded());

    let mut camera = Camera::new(Vec3::ZERO);
    manager.set_active("solar_system", &mut camera);
    // Solar system: flat + phong.
    assert_eq!(camera.observer_count(), 2);

    manager.switch_to("forest");
    assert!(manager.update(&mut camera));
    // Forest: lambert + phong + flat; the old scene's programs are gone.
    assert_eq!(camera.observer_count(), 3);
}

#[test]
fn multi_segment_curve_drives_a_composed_chain() {
    let mut graph = TransformGraph::new();

    // Two cubic segments sharing control point 3.
    let curve = BezierCurve::from_points(vec![
        Vec3::ZERO,
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(4.0, -2.0, 0.0),
        Vec3::new(5.0, -2.0, 0.0),
        Vec3::new(6.0, 0.0, 0.0),
    ]);
    let rider = graph.bezier(curve);
    let size = graph.uniform_scale(0.5);
    let chain = graph.compose(&[rider, size]);

    // Halfway through the whole path is exactly the shared joint.
    graph.set_param(rider, 0.5);
    let at_joint = graph.matrix(chain).w_axis.truncate();
    assert!((at_joint - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);

    graph.set_param(rider, 1.0);
    let at_end = graph.matrix(chain).w_axis.truncate();
    assert!((at_end - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-4);

    // Scale still applies around the curve position.
    assert!((graph.matrix(chain).x_axis.x - 0.5).abs() < 1e-6);
}
