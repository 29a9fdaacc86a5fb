//! Light sources as notification subjects.
//!
//! Any setter triggers a synchronous notify pass; attached shader programs
//! respond with a full light-array re-upload (uploads are idempotent, so the
//! lack of batching only costs redundant writes, never correctness).

use glam::Vec3;

use crate::observe::{ObserverHandle, Subject, SubjectRef};

/// Uniform-encoding order: the integer value of the variant is what shaders
/// receive in `lights[i].type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightType {
    Point = 0,
    Directional = 1,
    Spotlight = 2,
}

/// A point, directional or spot light.
pub struct Light {
    subject: Subject,

    position: Vec3,
    direction: Vec3,
    color: Vec3,
    light_type: LightType,

    ambient: f32,
    diffuse: f32,
    specular: f32,

    // Spot cone, degrees.
    cutoff: f32,
    outer_cutoff: f32,

    // Attenuation coefficients.
    constant: f32,
    linear: f32,
    quadratic: f32,
}

impl Light {
    pub fn new(position_or_direction: Vec3, color: Vec3, light_type: LightType) -> Self {
        Self {
            subject: Subject::new(),
            position: position_or_direction,
            direction: position_or_direction.normalize_or(Vec3::NEG_Z),
            color,
            light_type,
            ambient: 0.2,
            diffuse: 0.8,
            specular: 1.0,
            cutoff: 12.5,
            outer_cutoff: 17.5,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }

    pub fn point(position: Vec3, color: Vec3) -> Self {
        Self::new(position, color, LightType::Point)
    }

    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self::new(direction, color, LightType::Directional)
    }

    pub fn spotlight(position: Vec3, color: Vec3) -> Self {
        Self::new(position, color, LightType::Spotlight)
    }

    // --- Observer plumbing -------------------------------------------------

    pub fn attach(&mut self, observer: &ObserverHandle) {
        self.subject.attach(observer);
    }

    pub fn detach(&mut self, observer: &ObserverHandle) {
        self.subject.detach(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }

    fn notify(&self) {
        self.subject.notify(SubjectRef::Light(self));
    }

    /// Force one notification pass without mutating anything.
    pub fn update_observers(&self) {
        self.notify();
    }

    // --- Mutation entry points ---------------------------------------------

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.notify();
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize_or(Vec3::NEG_Z);
        self.notify();
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
        self.notify();
    }

    pub fn set_ambient(&mut self, ambient: f32) {
        self.ambient = ambient;
        self.notify();
    }

    pub fn set_diffuse(&mut self, diffuse: f32) {
        self.diffuse = diffuse;
        self.notify();
    }

    pub fn set_specular(&mut self, specular: f32) {
        self.specular = specular;
        self.notify();
    }

    pub fn set_cutoff(&mut self, degrees: f32) {
        self.cutoff = degrees;
        self.notify();
    }

    pub fn set_outer_cutoff(&mut self, degrees: f32) {
        self.outer_cutoff = degrees;
        self.notify();
    }

    // --- Accessors ----------------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn diffuse(&self) -> f32 {
        self.diffuse
    }

    pub fn specular(&self) -> f32 {
        self.specular
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn outer_cutoff(&self) -> f32 {
        self.outer_cutoff
    }

    pub fn constant(&self) -> f32 {
        self.constant
    }

    pub fn linear(&self) -> f32 {
        self.linear
    }

    pub fn quadratic(&self) -> f32 {
        self.quadratic
    }
}
