//! Free-look perspective camera, acting as a notification subject.
//!
//! The camera owns its observer list: every mutation entry point tags the
//! change as [`ChangeType::View`] or [`ChangeType::Projection`] and notifies
//! synchronously, so attached shader programs refresh their view/projection
//! uniforms without per-frame polling.

use glam::{Mat4, Vec3};

use crate::observe::{ChangeType, ObserverHandle, Subject, SubjectRef};

pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const FOV: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

const DEFAULT_YAW: f32 = -90.0;
const PITCH_LIMIT: f32 = 89.0;

/// Direction for [`Camera::process_keyboard`], decoupled from any concrete
/// input backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Yaw/pitch free-look camera with a perspective projection.
pub struct Camera {
    subject: Subject,

    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    fov: f32,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, 0.0)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            subject: Subject::new(),
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            fov: FOV,
            aspect_ratio: 800.0 / 600.0,
            near_plane: NEAR_PLANE,
            far_plane: FAR_PLANE,
        };
        camera.update_vectors();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
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

    pub fn last_change(&self) -> ChangeType {
        self.subject.last_change()
    }

    fn notify(&self) {
        self.subject.notify(SubjectRef::Camera(self));
    }

    fn mutated(&mut self, change: ChangeType) {
        self.subject.set_last_change(change);
        self.notify();
    }

    /// Force one full notification pass, tagged [`ChangeType::Projection`]
    /// so observers upload projection state as well as view state.
    ///
    /// Scenes call this right after attaching their shaders so the first
    /// draw sees populated uniforms.
    pub fn update_observers(&mut self) {
        self.mutated(ChangeType::Projection);
    }

    // --- Mutation entry points ---------------------------------------------

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.mutated(ChangeType::View);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_vectors();
        self.mutated(ChangeType::View);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
        self.mutated(ChangeType::View);
    }

    /// Move in a camera-relative direction scaled by delta time.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.up * velocity,
            CameraMovement::Down => self.position -= self.up * velocity,
        }
        self.mutated(ChangeType::View);
    }

    /// Apply a mouse delta to yaw/pitch, optionally constraining pitch to
    /// avoid flipping over the poles.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
        self.mutated(ChangeType::View);
    }

    /// Zoom via scroll wheel; fov stays within `[1, 45]` degrees.
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(1.0, FOV);
        self.mutated(ChangeType::Projection);
    }

    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
        self.mutated(ChangeType::Projection);
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
