//! The application shell: device, camera, scene registry and clock.
//!
//! Frames are stepped explicitly with a caller-supplied delta, so a
//! headless run with a fixed step is exactly reproducible. The wall clock
//! is only consulted for reporting.

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::DeviceHandle;
use crate::scene::{Scene, SceneManager};
use crate::timer::Timer;

use glam::Vec3;

pub struct App {
    device: DeviceHandle,
    camera: Camera,
    manager: SceneManager,
    timer: Timer,
    frame: u64,
    time: f32,
}

impl App {
    pub fn new(device: DeviceHandle) -> Self {
        Self {
            device,
            camera: Camera::new(Vec3::new(0.0, 4.0, 18.0)),
            manager: SceneManager::new(),
            timer: Timer::new(),
            frame: 0,
            time: 0.0,
        }
    }

    pub fn register_scene(&mut self, scene: Box<dyn Scene>) {
        self.manager.register(scene);
    }

    /// Initialize every registered scene against the device.
    pub fn init(&mut self, assets: &Assets) {
        self.manager.init_all(&self.device, assets);
    }

    /// Make `name` the active scene immediately, rewiring camera observers.
    pub fn activate(&mut self, name: &str) {
        self.manager.set_active(name, &mut self.camera);
    }

    /// Queue a switch, applied at the top of the next step.
    pub fn switch_to(&mut self, name: &str) {
        self.manager.switch_to(name);
    }

    /// Queue a switch to the next registered scene, wrapping around.
    pub fn next_scene(&mut self) {
        self.manager.next_scene();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn manager(&self) -> &SceneManager {
        &self.manager
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulation time accumulated over the steps taken so far.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Seconds of wall time since the app was built.
    pub fn wall_secs(&self) -> f32 {
        self.timer.elapsed_secs()
    }

    /// Advance one frame: apply any pending scene switch, tick the active
    /// scene's animation, emit its draw pass.
    pub fn step(&mut self, dt: f32) {
        self.frame += 1;
        self.time += dt;

        if self.manager.update(&mut self.camera) {
            log::debug!(
                "scene switch applied at frame {}: {}",
                self.frame,
                self.manager.active_name().unwrap_or("<none>")
            );
        }

        let camera = &self.camera;
        if let Some(scene) = self.manager.active_scene_mut() {
            scene.update(dt, self.time);
            scene.draw(camera);
        }
    }

    pub fn run_frames(&mut self, frames: u64, dt: f32) {
        for _ in 0..frames {
            self.step(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::TraceDevice;
    use crate::scenes::SolarSystem;

    #[test]
    fn step_draws_the_active_scene() {
        let trace = TraceDevice::shared();
        let device: DeviceHandle = trace.clone();
        let mut app = App::new(device);
        app.register_scene(Box::new(SolarSystem::new()));
        app.init(&Assets::embedded());
        app.activate("solar_system");

        trace.borrow_mut().clear();
        app.run_frames(3, 0.016);
        assert_eq!(trace.borrow().draws().len(), 12);
        assert_eq!(app.frame(), 3);
    }

    #[test]
    fn queued_switch_applies_on_next_step() {
        let device: DeviceHandle = TraceDevice::shared();
        let mut app = App::new(device);
        app.register_scene(Box::new(SolarSystem::new()));
        app.register_scene(Box::new(crate::scenes::Forest::new(1)));
        app.init(&Assets::embedded());
        app.activate("solar_system");

        app.switch_to("forest");
        assert_eq!(app.manager().active_name(), Some("solar_system"));
        app.step(0.016);
        assert_eq!(app.manager().active_name(), Some("forest"));
    }
}
