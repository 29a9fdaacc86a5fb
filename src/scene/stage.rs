//! Drawable bindings and the per-frame draw pass.

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::Camera;
use crate::device::{DeviceHandle, ModelId, PrimitiveMode, TextureId, UniformValue};
use crate::light::Light;
use crate::material::Material;
use crate::observe::ObserverHandle;
use crate::shader::ShaderHandle;
use crate::transform::{TransformGraph, TransformId};

/// One draw-call binding: which model, through which shader, where.
pub struct Drawable {
    pub model: ModelId,
    pub shader: ShaderHandle,
    pub transform: TransformId,
    pub texture: Option<TextureId>,
    pub material: Material,
}

/// Per-scene owner of transforms, drawables and lights.
///
/// Shader and texture handles are shared freely across bindings (fifty trees
/// can reference one model and one of three shaders); the stage outlives all
/// of its bindings, so no further lifetime bookkeeping is needed.
pub struct Stage {
    device: DeviceHandle,
    pub transforms: TransformGraph,
    drawables: Vec<Drawable>,
    lights: Vec<Rc<RefCell<Light>>>,
}

impl Stage {
    pub fn new(device: &DeviceHandle) -> Self {
        Self {
            device: device.clone(),
            transforms: TransformGraph::new(),
            drawables: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    /// Append an untextured binding with the default material. Returns the
    /// binding index for later transform swaps.
    pub fn add_object(
        &mut self,
        model: ModelId,
        shader: ShaderHandle,
        transform: TransformId,
    ) -> usize {
        self.add_object_with(model, shader, transform, None, Material::default())
    }

    /// Append a fully specified binding.
    pub fn add_object_with(
        &mut self,
        model: ModelId,
        shader: ShaderHandle,
        transform: TransformId,
        texture: Option<TextureId>,
        material: Material,
    ) -> usize {
        self.drawables.push(Drawable {
            model,
            shader,
            transform,
            texture,
            material,
        });
        self.drawables.len() - 1
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn drawable_mut(&mut self, index: usize) -> Option<&mut Drawable> {
        self.drawables.get_mut(index)
    }

    /// Point a binding at a different transform node. The established
    /// pattern for animated objects is to rebuild a fresh chain each frame
    /// and re-point the binding here.
    pub fn set_transform(&mut self, index: usize, transform: TransformId) {
        if let Some(drawable) = self.drawables.get_mut(index) {
            drawable.transform = transform;
        }
    }

    pub fn add_light(&mut self, light: Rc<RefCell<Light>>) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Rc<RefCell<Light>>] {
        &self.lights
    }

    /// The distinct shader programs referenced by the current bindings, in
    /// first-use order.
    pub fn unique_shaders(&self) -> Vec<ShaderHandle> {
        let mut unique: Vec<ShaderHandle> = Vec::new();
        for drawable in &self.drawables {
            if !unique.iter().any(|s| Rc::ptr_eq(s, &drawable.shader)) {
                unique.push(drawable.shader.clone());
            }
        }
        unique
    }

    /// Attach every distinct shader to the camera, then force one full
    /// notification so view and projection uniforms are populated before
    /// the first draw.
    pub fn attach_to_camera(&self, camera: &mut Camera) {
        for shader in self.unique_shaders() {
            let handle: ObserverHandle = shader;
            camera.attach(&handle);
        }
        camera.update_observers();
    }

    pub fn detach_from_camera(&self, camera: &mut Camera) {
        for shader in self.unique_shaders() {
            let handle: ObserverHandle = shader;
            camera.detach(&handle);
        }
    }

    /// The per-binding draw pass: activate the shader, push material and
    /// texture state, push the composed model matrix, issue the draw call.
    pub fn draw(&self) {
        self.draw_with(|_, _| {});
    }

    /// [`Stage::draw`] with a per-binding hook, run right after the shader
    /// is activated. Scenes use it to push per-object uniforms such as
    /// `objectColor`.
    pub fn draw_with(&self, extra: impl Fn(usize, &Drawable)) {
        for (index, drawable) in self.drawables.iter().enumerate() {
            let shader = drawable.shader.borrow();
            shader.use_program();
            extra(index, drawable);

            shader.set_uniform(
                "material.shininess",
                UniformValue::Float(drawable.material.shininess),
            );
            shader.set_uniform(
                "material.ambient",
                UniformValue::Float(drawable.material.ambient),
            );
            shader.set_uniform(
                "material.diffuse",
                UniformValue::Float(drawable.material.diffuse),
            );
            shader.set_uniform(
                "material.specular",
                UniformValue::Float(drawable.material.specular),
            );

            if let Some(texture) = drawable.texture {
                self.device.borrow_mut().bind_texture(texture, 0);
                shader.set_uniform("textureSampler", UniformValue::Int(0));
                shader.set_uniform("useTexture", UniformValue::Bool(true));
            } else {
                shader.set_uniform("useTexture", UniformValue::Bool(false));
            }

            let model = self.transforms.matrix(drawable.transform);
            shader.set_uniform("model", UniformValue::Mat4(model));
            self.device
                .borrow_mut()
                .draw(drawable.model, PrimitiveMode::Triangles);

            if drawable.texture.is_some() {
                self.device.borrow_mut().unbind_texture(0);
            }
        }
        self.device.borrow_mut().clear_program();
    }
}
