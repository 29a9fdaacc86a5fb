//! Scene registry and switching.

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::DeviceHandle;

use super::Scene;

/// Owns the registered scenes and moves the camera's observer traffic over
/// when the active scene changes.
///
/// Switch requests are queued and processed at the start of the next frame,
/// so a scene can request its own replacement mid-draw without the pass
/// changing under it.
pub struct SceneManager {
    scenes: Vec<Box<dyn Scene>>,
    active: Option<usize>,
    pending_switch: Option<usize>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            active: None,
            pending_switch: None,
        }
    }

    /// Register a scene. Registration order defines the cycling order.
    pub fn register(&mut self, scene: Box<dyn Scene>) {
        self.scenes.push(scene);
    }

    /// Initialize every registered scene's resources.
    pub fn init_all(&mut self, device: &DeviceHandle, assets: &Assets) {
        for scene in &mut self.scenes {
            scene.init(device, assets);
        }
    }

    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.iter().map(|s| s.name()).collect()
    }

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.active.map(|i| self.scenes[i].as_ref())
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut dyn Scene> {
        match self.active {
            Some(i) => Some(self.scenes[i].as_mut()),
            None => None,
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active_scene().map(|s| s.name())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name() == name)
    }

    /// Make `name` active immediately, attaching its shaders to the camera.
    /// Unknown names log a warning and leave the active scene unchanged.
    pub fn set_active(&mut self, name: &str, camera: &mut Camera) {
        match self.index_of(name) {
            Some(index) => self.activate(index, camera),
            None => log::warn!("scene '{name}' not found"),
        }
    }

    /// Queue a switch to `name`, processed at the start of the next frame.
    pub fn switch_to(&mut self, name: &str) {
        match self.index_of(name) {
            Some(index) => self.pending_switch = Some(index),
            None => log::warn!("scene '{name}' not found"),
        }
    }

    /// Queue a switch to the next scene in registration order, wrapping.
    pub fn next_scene(&mut self) {
        if self.scenes.is_empty() {
            return;
        }
        let next = match self.active {
            Some(index) => (index + 1) % self.scenes.len(),
            None => 0,
        };
        self.pending_switch = Some(next);
    }

    /// Process a pending switch, if any. Returns true when the active scene
    /// changed.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let Some(target) = self.pending_switch.take() else {
            return false;
        };
        if Some(target) == self.active {
            return false;
        }
        self.activate(target, camera);
        true
    }

    fn activate(&mut self, index: usize, camera: &mut Camera) {
        if let Some(current) = self.active {
            self.scenes[current].detach_from_camera(camera);
        }
        self.scenes[index].attach_to_camera(camera);
        self.active = Some(index);
        log::info!("scene '{}' active", self.scenes[index].name());
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
