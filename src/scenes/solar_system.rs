//! Orbiting bodies built from per-frame composite chains.
//!
//! Nothing here animates a stored transform in place. Every frame the scene
//! truncates the graph back to its init-time watermark and rebuilds each
//! body's chain from the current clock: parent orbit rotations and
//! translations, then the body's own spin and scale. Moons simply extend
//! their planet's placement chain.

use glam::Vec3;

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::{DeviceHandle, UniformValue};
use crate::light::Light;
use crate::material::Material;
use crate::scene::{Scene, Stage};
use crate::shader::ShaderProgram;
use crate::transform::TransformId;

use std::cell::RefCell;
use std::rc::Rc;

struct Body {
    binding: usize,
    color: Vec3,
    orbit_radius: f32,
    /// Degrees per second around the parent.
    orbit_speed: f32,
    /// Degrees per second around the body's own axis.
    spin_speed: f32,
    scale: f32,
    /// Index of the body this one orbits; `None` for the sun.
    parent: Option<usize>,
}

pub struct SolarSystem {
    stage: Option<Stage>,
    bodies: Vec<Body>,
    /// Graph length after init; everything past it is rebuilt each frame.
    watermark: usize,
    time: f32,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            stage: None,
            bodies: Vec::new(),
            watermark: 0,
            time: 0.0,
        }
    }

    fn rebuild_chains(&mut self) {
        let time = self.time;
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        stage.transforms.truncate(self.watermark);

        // Placement chains (orbit rotation + offset) accumulate down the
        // parent links; bodies are ordered parents-first.
        let mut placements: Vec<Vec<TransformId>> = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            let mut chain = match body.parent {
                Some(parent) => placements[parent].clone(),
                None => Vec::new(),
            };
            if body.orbit_radius > 0.0 {
                chain.push(stage.transforms.rotation(body.orbit_speed * time, Vec3::Y));
                chain.push(
                    stage
                        .transforms
                        .translation(Vec3::new(body.orbit_radius, 0.0, 0.0)),
                );
            }
            placements.push(chain);
        }

        for (body, placement) in self.bodies.iter().zip(&placements) {
            let mut chain = placement.clone();
            chain.push(stage.transforms.rotation(body.spin_speed * time, Vec3::Y));
            chain.push(stage.transforms.uniform_scale(body.scale));
            let root = stage.transforms.compose(&chain);
            stage.set_transform(body.binding, root);
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SolarSystem {
    fn name(&self) -> &str {
        "solar_system"
    }

    fn init(&mut self, device: &DeviceHandle, assets: &Assets) {
        let mut stage = Stage::new(device);

        let vertex_src =
            assets.shader_source("vertex.glsl", include_str!("../shaders/vertex.glsl"));
        let flat = ShaderProgram::shared(
            device,
            &vertex_src,
            &assets.shader_source("frag_flat.glsl", include_str!("../shaders/frag_flat.glsl")),
        );
        let phong = ShaderProgram::shared(
            device,
            &vertex_src,
            &assets.shader_source("frag_phong.glsl", include_str!("../shaders/frag_phong.glsl")),
        );

        // The sun itself is the only light source, sitting at the origin.
        let sun_light = Rc::new(RefCell::new(Light::point(Vec3::ZERO, Vec3::ONE)));
        phong.borrow_mut().add_light(sun_light.clone());
        phong.borrow().update_all_lights();
        let handle: crate::observe::ObserverHandle = phong.clone();
        sun_light.borrow_mut().attach(&handle);
        stage.add_light(sun_light);

        let sphere = device.borrow_mut().create_model("sphere");

        let specs: [(Vec3, f32, f32, f32, f32, Option<usize>, bool, Material); 4] = [
            // color, orbit radius, orbit speed, spin speed, scale, parent, emissive, material
            (
                Vec3::new(1.0, 0.85, 0.3),
                0.0,
                0.0,
                8.0,
                2.0,
                None,
                true,
                Material::gold(),
            ),
            (
                Vec3::new(0.8, 0.45, 0.2),
                4.0,
                48.0,
                90.0,
                0.4,
                Some(0),
                false,
                Material::metal(),
            ),
            (
                Vec3::new(0.3, 0.5, 0.9),
                8.0,
                20.0,
                60.0,
                0.8,
                Some(0),
                false,
                Material::plastic(),
            ),
            (
                Vec3::new(0.7, 0.7, 0.7),
                1.6,
                120.0,
                30.0,
                0.25,
                Some(2),
                false,
                Material::stone(),
            ),
        ];

        for (color, orbit_radius, orbit_speed, spin_speed, scale, parent, emissive, material) in
            specs
        {
            let placeholder = stage.transforms.identity();
            let shader = if emissive { flat.clone() } else { phong.clone() };
            let binding = stage.add_object_with(sphere, shader, placeholder, None, material);
            self.bodies.push(Body {
                binding,
                color,
                orbit_radius,
                orbit_speed,
                spin_speed,
                scale,
                parent,
            });
        }

        self.watermark = stage.transforms.len();
        self.stage = Some(stage);
        self.rebuild_chains();
    }

    fn update(&mut self, _dt: f32, time: f32) {
        self.time = time;
        self.rebuild_chains();
    }

    fn stage(&self) -> &Stage {
        self.stage.as_ref().expect("scene drawn before init")
    }

    fn stage_mut(&mut self) -> &mut Stage {
        self.stage.as_mut().expect("scene drawn before init")
    }

    fn draw(&mut self, _camera: &Camera) {
        let colors: Vec<Vec3> = self.bodies.iter().map(|body| body.color).collect();
        self.stage().draw_with(|index, drawable| {
            drawable
                .shader
                .borrow()
                .set_uniform("objectColor", UniformValue::Vec3(colors[index]));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::TraceDevice;

    fn init_scene() -> (SolarSystem, std::rc::Rc<RefCell<TraceDevice>>) {
        let trace = TraceDevice::shared();
        let device: DeviceHandle = trace.clone();
        let mut scene = SolarSystem::new();
        scene.init(&device, &Assets::embedded());
        (scene, trace)
    }

    #[test]
    fn draws_one_call_per_body() {
        let (mut scene, trace) = init_scene();
        trace.borrow_mut().clear();
        let camera = Camera::new(Vec3::new(0.0, 5.0, 20.0));
        scene.draw(&camera);
        assert_eq!(trace.borrow().draws().len(), 4);
        assert_eq!(trace.borrow().uniform_writes("objectColor").len(), 4);

        // The gold sun and metal inner planet carry their presets through.
        let shininess = trace.borrow().uniform_writes("material.shininess");
        assert!(shininess.contains(&UniformValue::Float(Material::gold().shininess)));
        assert!(shininess.contains(&UniformValue::Float(Material::metal().shininess)));
    }

    #[test]
    fn planet_starts_on_positive_x() {
        let (mut scene, _trace) = init_scene();
        scene.update(0.0, 0.0);
        let binding = scene.bodies[2].binding;
        let id = scene.stage().drawables()[binding].transform;
        let position = scene.stage().transforms.matrix(id).w_axis;
        assert!((position.x - 8.0).abs() < 1e-4);
        assert!(position.y.abs() < 1e-4 && position.z.abs() < 1e-4);
    }

    #[test]
    fn moon_orbits_its_planet_not_the_sun() {
        let (mut scene, _trace) = init_scene();
        scene.update(0.0, 0.0);
        let moon = scene.bodies[3].binding;
        let planet = scene.bodies[2].binding;
        let moon_pos = scene
            .stage()
            .transforms
            .matrix(scene.stage().drawables()[moon].transform)
            .w_axis
            .truncate();
        let planet_pos = scene
            .stage()
            .transforms
            .matrix(scene.stage().drawables()[planet].transform)
            .w_axis
            .truncate();
        assert!((moon_pos.distance(planet_pos) - 1.6).abs() < 1e-4);
    }

    #[test]
    fn graph_does_not_grow_across_frames() {
        let (mut scene, _trace) = init_scene();
        scene.update(0.016, 0.016);
        let len = scene.stage().transforms.len();
        for frame in 2..60 {
            let t = frame as f32 * 0.016;
            scene.update(0.016, t);
        }
        assert_eq!(scene.stage().transforms.len(), len);
    }
}
