//! The opaque-resource boundary between the scene core and whatever actually
//! renders.
//!
//! The core never touches a GPU API. It talks to a [`RenderDevice`]: create
//! programs/models/textures, activate a program, push uniforms, issue draw
//! calls. Two implementations ship with the crate — [`TraceDevice`] records
//! every call for tests, [`StatsDevice`] just counts them for the headless
//! demo binary — and a real backend slots in behind the same trait.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::{Error, Result};

/// Handle to a compiled shader program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub(crate) u32);

impl ShaderId {
    /// A program that failed to build. Device calls against it are harmless
    /// no-ops on a real backend: the object draws as nothing instead of
    /// taking the application down.
    pub const INVALID: ShaderId = ShaderId(u32::MAX);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// Handle to an uploaded model/mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(pub(crate) u32);

/// Handle to a bound-able texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

/// A value pushed to a named shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Primitive topology for a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    Triangles,
}

/// Rendering backend contract.
///
/// Per-frame code assumes handles returned by the `create_*` calls stay
/// valid for the device's lifetime; resource loading happens at scene init,
/// never on the steady-state path.
pub trait RenderDevice {
    /// Compile and link a program from vertex/fragment source text.
    ///
    /// Empty source is a compile failure. Callers are expected to degrade
    /// (see [`crate::shader::ShaderProgram::from_sources`]), not propagate.
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<ShaderId>;

    /// Upload a model, identified by name for diagnostics.
    fn create_model(&mut self, name: &str) -> ModelId;

    /// Upload a texture, identified by name for diagnostics.
    fn create_texture(&mut self, name: &str) -> TextureId;

    fn use_program(&mut self, shader: ShaderId);
    fn clear_program(&mut self);
    fn set_uniform(&mut self, shader: ShaderId, name: &str, value: UniformValue);
    fn bind_texture(&mut self, texture: TextureId, slot: u32);
    fn unbind_texture(&mut self, slot: u32);
    fn draw(&mut self, model: ModelId, mode: PrimitiveMode);
}

/// Shared single-threaded device handle.
///
/// Shader programs hold a clone so they can push uniforms at notification
/// time; scenes hold one for the draw pass. Borrows are taken per call and
/// never held across observer dispatch.
pub type DeviceHandle = Rc<RefCell<dyn RenderDevice>>;

/// One recorded device call.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall {
    CreateProgram(ShaderId),
    CreateModel(ModelId, String),
    CreateTexture(TextureId, String),
    UseProgram(ShaderId),
    ClearProgram,
    SetUniform(ShaderId, String, UniformValue),
    BindTexture(TextureId, u32),
    UnbindTexture(u32),
    Draw(ModelId, PrimitiveMode),
}

/// Records every device call, in order. Test backend.
#[derive(Default)]
pub struct TraceDevice {
    pub calls: Vec<DeviceCall>,
    next_id: u32,
}

impl TraceDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh trace device in a shared handle.
    pub fn shared() -> Rc<RefCell<TraceDevice>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Recorded draw calls, in order.
    pub fn draws(&self) -> Vec<(ModelId, PrimitiveMode)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::Draw(model, mode) => Some((*model, *mode)),
                _ => None,
            })
            .collect()
    }

    /// Values recorded for one uniform name, in order.
    pub fn uniform_writes(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::SetUniform(_, n, v) if n == name => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderDevice for TraceDevice {
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<ShaderId> {
        if vertex_src.trim().is_empty() {
            return Err(Error::Shader("empty vertex source".into()));
        }
        if fragment_src.trim().is_empty() {
            return Err(Error::Shader("empty fragment source".into()));
        }
        let id = ShaderId(self.next());
        self.calls.push(DeviceCall::CreateProgram(id));
        Ok(id)
    }

    fn create_model(&mut self, name: &str) -> ModelId {
        let id = ModelId(self.next());
        self.calls.push(DeviceCall::CreateModel(id, name.to_owned()));
        id
    }

    fn create_texture(&mut self, name: &str) -> TextureId {
        let id = TextureId(self.next());
        self.calls.push(DeviceCall::CreateTexture(id, name.to_owned()));
        id
    }

    fn use_program(&mut self, shader: ShaderId) {
        self.calls.push(DeviceCall::UseProgram(shader));
    }

    fn clear_program(&mut self) {
        self.calls.push(DeviceCall::ClearProgram);
    }

    fn set_uniform(&mut self, shader: ShaderId, name: &str, value: UniformValue) {
        self.calls
            .push(DeviceCall::SetUniform(shader, name.to_owned(), value));
    }

    fn bind_texture(&mut self, texture: TextureId, slot: u32) {
        self.calls.push(DeviceCall::BindTexture(texture, slot));
    }

    fn unbind_texture(&mut self, slot: u32) {
        self.calls.push(DeviceCall::UnbindTexture(slot));
    }

    fn draw(&mut self, model: ModelId, mode: PrimitiveMode) {
        self.calls.push(DeviceCall::Draw(model, mode));
    }
}

/// Counts device traffic without retaining it. Demo/benchmark backend.
#[derive(Default, Debug)]
pub struct StatsDevice {
    pub programs_created: u64,
    pub models_created: u64,
    pub textures_created: u64,
    pub uniform_writes: u64,
    pub draw_calls: u64,
    pub texture_binds: u64,
    next_id: u32,
}

impl StatsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<StatsDevice>> {
        Rc::new(RefCell::new(Self::new()))
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderDevice for StatsDevice {
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<ShaderId> {
        if vertex_src.trim().is_empty() || fragment_src.trim().is_empty() {
            return Err(Error::Shader("empty shader source".into()));
        }
        self.programs_created += 1;
        Ok(ShaderId(self.next()))
    }

    fn create_model(&mut self, _name: &str) -> ModelId {
        self.models_created += 1;
        ModelId(self.next())
    }

    fn create_texture(&mut self, _name: &str) -> TextureId {
        self.textures_created += 1;
        TextureId(self.next())
    }

    fn use_program(&mut self, _shader: ShaderId) {}

    fn clear_program(&mut self) {}

    fn set_uniform(&mut self, _shader: ShaderId, _name: &str, _value: UniformValue) {
        self.uniform_writes += 1;
    }

    fn bind_texture(&mut self, _texture: TextureId, _slot: u32) {
        self.texture_binds += 1;
    }

    fn unbind_texture(&mut self, _slot: u32) {}

    fn draw(&mut self, _model: ModelId, _mode: PrimitiveMode) {
        self.draw_calls += 1;
    }
}
