//! Shader programs as notification observers.
//!
//! A [`ShaderProgram`] wraps a device program handle and reacts to subject
//! notifications: camera changes push view/projection uniforms, light changes
//! re-upload the whole light array. Uploads happen only in response to a
//! notification — never unconditionally per frame — except for the explicit
//! [`ShaderProgram::update_all_lights`] bulk pass scenes run at init or when
//! the light count changes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::device::{DeviceHandle, RenderDevice, ShaderId, UniformValue};
use crate::light::Light;
use crate::observe::{ChangeType, Observer, SubjectRef};

/// Shared handle to a shader program; the form under which programs are
/// referenced by drawables and attached to subjects.
pub type ShaderHandle = Rc<RefCell<ShaderProgram>>;

pub struct ShaderProgram {
    id: ShaderId,
    device: DeviceHandle,
    lights: Vec<Rc<RefCell<Light>>>,
    auto_update_camera: bool,
    auto_update_light: bool,
}

impl ShaderProgram {
    /// Build a program from source text.
    ///
    /// Compile/link failure is logged and yields an unusable program rather
    /// than an error: a scene with a broken shader keeps running with an
    /// invisible object, it does not crash the loop.
    pub fn from_sources(device: &DeviceHandle, vertex_src: &str, fragment_src: &str) -> Self {
        let id = match device.borrow_mut().create_program(vertex_src, fragment_src) {
            Ok(id) => id,
            Err(err) => {
                log::error!("shader program creation failed: {err}");
                ShaderId::INVALID
            }
        };
        Self {
            id,
            device: device.clone(),
            lights: Vec::new(),
            auto_update_camera: true,
            auto_update_light: true,
        }
    }

    /// Convenience: build and wrap in a [`ShaderHandle`].
    pub fn shared(device: &DeviceHandle, vertex_src: &str, fragment_src: &str) -> ShaderHandle {
        Rc::new(RefCell::new(Self::from_sources(
            device,
            vertex_src,
            fragment_src,
        )))
    }

    pub fn id(&self) -> ShaderId {
        self.id
    }

    /// Make this the active program.
    pub fn use_program(&self) {
        self.device.borrow_mut().use_program(self.id);
    }

    /// Deactivate whatever program is current.
    pub fn clear_program(&self) {
        self.device.borrow_mut().clear_program();
    }

    /// Push one named uniform.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        self.device.borrow_mut().set_uniform(self.id, name, value);
    }

    /// Register a light this program serves. Call
    /// [`ShaderProgram::update_all_lights`] afterwards so `numLights` and the
    /// array slots reflect the new count.
    pub fn add_light(&mut self, light: Rc<RefCell<Light>>) {
        self.lights.push(light);
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Suppress automatic camera-uniform uploads (bulk-setup batching).
    pub fn set_auto_update_camera(&mut self, value: bool) {
        self.auto_update_camera = value;
    }

    /// Suppress automatic light-array uploads (bulk-setup batching).
    pub fn set_auto_update_light(&mut self, value: bool) {
        self.auto_update_light = value;
    }

    /// Re-upload the entire light array unconditionally.
    pub fn update_all_lights(&self) {
        self.upload_lights(None);
    }

    fn upload_camera(&self, camera: &crate::camera::Camera, change: ChangeType) {
        let mut device = self.device.borrow_mut();
        device.use_program(self.id);
        device.set_uniform(self.id, "view", UniformValue::Mat4(camera.view_matrix()));
        device.set_uniform(self.id, "viewPos", UniformValue::Vec3(camera.position()));
        if change == ChangeType::Projection {
            device.set_uniform(
                self.id,
                "projection",
                UniformValue::Mat4(camera.projection_matrix()),
            );
        }
        device.clear_program();
    }

    /// Upload `numLights` and every array slot.
    ///
    /// `notifying` carries the light that triggered this pass, if any. That
    /// light's cell is mutably borrowed for the duration of the notification
    /// (its setter is still on the stack), so it must be read through the
    /// delivered reference instead of its cell.
    fn upload_lights(&self, notifying: Option<&Light>) {
        let mut device = self.device.borrow_mut();
        device.use_program(self.id);
        device.set_uniform(
            self.id,
            "numLights",
            UniformValue::Int(self.lights.len() as i32),
        );
        for (index, slot) in self.lights.iter().enumerate() {
            match notifying {
                Some(light) if std::ptr::eq(RefCell::as_ptr(slot.as_ref()), light) => {
                    Self::upload_light(&mut *device, self.id, index, light);
                }
                _ => Self::upload_light(&mut *device, self.id, index, &slot.borrow()),
            }
        }
        device.clear_program();
    }

    fn upload_light(device: &mut dyn RenderDevice, id: ShaderId, index: usize, light: &Light) {
        let base = format!("lights[{index}]");
        let set = |device: &mut dyn RenderDevice, field: &str, value: UniformValue| {
            device.set_uniform(id, &format!("{base}.{field}"), value);
        };
        set(device, "position", UniformValue::Vec3(light.position()));
        set(device, "direction", UniformValue::Vec3(light.direction()));
        set(device, "color", UniformValue::Vec3(light.color()));
        set(device, "ambient", UniformValue::Float(light.ambient()));
        set(device, "diffuse", UniformValue::Float(light.diffuse()));
        set(device, "specular", UniformValue::Float(light.specular()));
        set(device, "type", UniformValue::Int(light.light_type() as i32));
        set(
            device,
            "cutOff",
            UniformValue::Float(light.cutoff().to_radians().cos()),
        );
        set(
            device,
            "outerCutOff",
            UniformValue::Float(light.outer_cutoff().to_radians().cos()),
        );
        set(device, "constant", UniformValue::Float(light.constant()));
        set(device, "linear", UniformValue::Float(light.linear()));
        set(device, "quadratic", UniformValue::Float(light.quadratic()));
    }
}

impl Observer for ShaderProgram {
    fn on_notify(&mut self, subject: SubjectRef<'_>, change: ChangeType) {
        match subject {
            SubjectRef::Camera(camera) => {
                if self.auto_update_camera {
                    self.upload_camera(camera, change);
                }
            }
            SubjectRef::Light(light) => {
                if self.auto_update_light {
                    self.upload_lights(Some(light));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::device::TraceDevice;
    use crate::observe::ObserverHandle;
    use glam::Vec3;

    const VS: &str = "void main() {}";
    const FS: &str = "void main() {}";

    fn setup() -> (Rc<RefCell<TraceDevice>>, DeviceHandle) {
        let trace = TraceDevice::shared();
        let device: DeviceHandle = trace.clone();
        (trace, device)
    }

    #[test]
    fn camera_move_uploads_view_but_not_projection() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        let mut camera = Camera::new(Vec3::ZERO);
        let handle: ObserverHandle = shader.clone();
        camera.attach(&handle);

        trace.borrow_mut().clear();
        camera.set_position(Vec3::new(0.0, 1.0, 0.0));

        let trace = trace.borrow();
        assert_eq!(trace.uniform_writes("view").len(), 1);
        assert_eq!(trace.uniform_writes("viewPos").len(), 1);
        assert!(trace.uniform_writes("projection").is_empty());
    }

    #[test]
    fn projection_change_uploads_projection_too() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        let mut camera = Camera::new(Vec3::ZERO);
        let handle: ObserverHandle = shader.clone();
        camera.attach(&handle);

        trace.borrow_mut().clear();
        camera.process_mouse_scroll(5.0);

        let trace = trace.borrow();
        assert_eq!(trace.uniform_writes("view").len(), 1);
        assert_eq!(trace.uniform_writes("projection").len(), 1);
    }

    #[test]
    fn auto_update_flag_suppresses_uploads() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        shader.borrow_mut().set_auto_update_camera(false);

        let mut camera = Camera::new(Vec3::ZERO);
        let handle: ObserverHandle = shader.clone();
        camera.attach(&handle);

        trace.borrow_mut().clear();
        camera.set_position(Vec3::X);
        assert!(trace.borrow().calls.is_empty());
    }

    #[test]
    fn light_auto_update_flag_suppresses_uploads() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        let light = Rc::new(RefCell::new(Light::point(Vec3::ZERO, Vec3::ONE)));
        shader.borrow_mut().add_light(light.clone());
        shader.borrow_mut().set_auto_update_light(false);
        let handle: ObserverHandle = shader.clone();
        light.borrow_mut().attach(&handle);

        trace.borrow_mut().clear();
        light.borrow_mut().set_position(Vec3::X);
        assert!(trace.borrow().calls.is_empty());

        // Re-enabling restores the re-upload path.
        shader.borrow_mut().set_auto_update_light(true);
        light.borrow_mut().set_position(Vec3::Y);
        assert_eq!(trace.borrow().uniform_writes("numLights").len(), 1);
    }

    #[test]
    fn update_all_lights_uploads_count_and_slots() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        let key = Rc::new(RefCell::new(Light::point(Vec3::ZERO, Vec3::ONE)));
        let fill = Rc::new(RefCell::new(Light::directional(Vec3::NEG_Y, Vec3::ONE)));
        shader.borrow_mut().add_light(key.clone());
        shader.borrow_mut().add_light(fill.clone());
        assert_eq!(shader.borrow().light_count(), 2);

        trace.borrow_mut().clear();
        shader.borrow().update_all_lights();

        let trace = trace.borrow();
        assert_eq!(
            trace.uniform_writes("numLights"),
            vec![UniformValue::Int(2)]
        );
        assert_eq!(trace.uniform_writes("lights[0].position").len(), 1);
        assert_eq!(
            trace.uniform_writes("lights[1].type"),
            vec![UniformValue::Int(1)]
        );
    }

    #[test]
    fn light_setter_reuploads_array_without_reborrow_panic() {
        let (trace, device) = setup();
        let shader = ShaderProgram::shared(&device, VS, FS);
        let light = Rc::new(RefCell::new(Light::point(Vec3::ZERO, Vec3::ONE)));
        shader.borrow_mut().add_light(light.clone());
        let handle: ObserverHandle = shader.clone();
        light.borrow_mut().attach(&handle);

        trace.borrow_mut().clear();
        // The setter runs while the light's cell is mutably borrowed; the
        // shader must read the notifying light through the notification.
        light.borrow_mut().set_position(Vec3::new(3.0, 0.0, 0.0));

        let writes = trace.borrow().uniform_writes("lights[0].position");
        assert_eq!(writes, vec![UniformValue::Vec3(Vec3::new(3.0, 0.0, 0.0))]);
    }

    #[test]
    fn broken_shader_degrades_to_invalid_program() {
        let (trace, device) = setup();
        let shader = ShaderProgram::from_sources(&device, "", FS);
        assert!(!shader.id().is_valid());
        // Uniform pushes against the broken program still go through the
        // device without failing.
        shader.set_uniform("model", UniformValue::Float(1.0));
        assert_eq!(trace.borrow().uniform_writes("model").len(), 1);
    }
}
