//! Scene composition and management.
//!
//! A scene owns a [`Stage`]: its transform graph, its drawable bindings and
//! its lights. The stage drives the per-frame draw pass and wires the
//! scene's shaders into the camera's notification list. The
//! [`SceneManager`] keeps a registry of scenes and switches the camera's
//! observer traffic over when the active scene changes.

mod manager;
mod stage;

pub use manager::SceneManager;
pub use stage::{Drawable, Stage};

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::DeviceHandle;

/// A self-contained scene: build resources in `init`, advance animation in
/// `update`, emit the frame in `draw`.
pub trait Scene {
    fn name(&self) -> &str;

    /// Create shaders, models, lights and static transform chains. Called
    /// once, off the steady-state frame path.
    fn init(&mut self, device: &DeviceHandle, assets: &Assets);

    /// Advance animation parameters from the caller's clock. Transforms
    /// never animate themselves.
    fn update(&mut self, _dt: f32, _time: f32) {}

    fn stage(&self) -> &Stage;

    fn stage_mut(&mut self) -> &mut Stage;

    /// Emit one frame. The default pass covers scenes without per-object
    /// uniform work.
    fn draw(&mut self, _camera: &Camera) {
        self.stage().draw();
    }

    /// Subscribe this scene's shaders to camera notifications and force one
    /// full upload so the first draw sees populated uniforms.
    fn attach_to_camera(&mut self, camera: &mut Camera) {
        self.stage().attach_to_camera(camera);
    }

    /// Unsubscribe this scene's shaders; stale scenes must not keep
    /// receiving camera traffic.
    fn detach_from_camera(&mut self, camera: &mut Camera) {
        self.stage().detach_from_camera(camera);
    }
}
