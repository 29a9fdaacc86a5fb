//! A seeded static scatter plus one curve-driven light.
//!
//! All vegetation transforms are built once at init from a deterministic
//! stream, so two runs with the same seed place every bush identically. The
//! only animation is the firefly: a flat-shaded glow riding a closed
//! multi-segment Bézier loop, dragging a point light through the trees.

use glam::Vec3;

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::{DeviceHandle, UniformValue};
use crate::light::Light;
use crate::material::Material;
use crate::rng::SplitMix64;
use crate::scene::{Scene, Stage};
use crate::shader::ShaderProgram;
use crate::transform::{BezierCurve, Transform, TransformId};

use std::cell::RefCell;
use std::rc::Rc;

const BUSH_COUNT: usize = 50;
const TREE_COUNT: usize = 50;
/// Fraction of the loop the firefly covers per second.
const FIREFLY_SPEED: f32 = 0.08;

pub struct Forest {
    seed: u64,
    stage: Option<Stage>,
    /// Per-binding flat colors, pushed during the draw pass.
    colors: Vec<Vec3>,
    firefly_node: Option<TransformId>,
    firefly_light: Option<Rc<RefCell<Light>>>,
}

impl Forest {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stage: None,
            colors: Vec::new(),
            firefly_node: None,
            firefly_light: None,
        }
    }

    /// A closed two-lobe loop weaving between the trees; first and last
    /// control points coincide so param 1.0 lands back on param 0.0.
    fn firefly_loop() -> BezierCurve {
        let points = vec![
            Vec3::new(-6.0, 1.0, 0.0),
            Vec3::new(-6.0, 2.5, 6.0),
            Vec3::new(6.0, 2.5, 6.0),
            Vec3::new(6.0, 1.0, 0.0),
            Vec3::new(6.0, 0.5, -6.0),
            Vec3::new(2.0, 3.0, -8.0),
            Vec3::new(-2.0, 2.0, -6.0),
            Vec3::new(-5.0, 1.0, -4.0),
            Vec3::new(-6.5, 0.8, -2.0),
            Vec3::new(-6.0, 1.0, 0.0),
        ];
        BezierCurve::from_points(points)
    }
}

impl Scene for Forest {
    fn name(&self) -> &str {
        "forest"
    }

    fn init(&mut self, device: &DeviceHandle, assets: &Assets) {
        let mut stage = Stage::new(device);
        let mut rng = SplitMix64::new(self.seed);

        let vertex_src =
            assets.shader_source("vertex.glsl", include_str!("../shaders/vertex.glsl"));
        let lambert = ShaderProgram::shared(
            device,
            &vertex_src,
            &assets.shader_source(
                "frag_lambert.glsl",
                include_str!("../shaders/frag_lambert.glsl"),
            ),
        );
        let phong = ShaderProgram::shared(
            device,
            &vertex_src,
            &assets.shader_source("frag_phong.glsl", include_str!("../shaders/frag_phong.glsl")),
        );
        let flat = ShaderProgram::shared(
            device,
            &vertex_src,
            &assets.shader_source("frag_flat.glsl", include_str!("../shaders/frag_flat.glsl")),
        );

        let moonlight = Rc::new(RefCell::new(Light::directional(
            Vec3::new(-0.3, -1.0, -0.2),
            Vec3::new(0.35, 0.4, 0.55),
        )));
        let firefly = Rc::new(RefCell::new(Light::point(
            Vec3::new(-6.0, 1.0, 0.0),
            Vec3::new(1.0, 0.95, 0.5),
        )));
        for shader in [&lambert, &phong] {
            shader.borrow_mut().add_light(moonlight.clone());
            shader.borrow_mut().add_light(firefly.clone());
            shader.borrow().update_all_lights();
            let handle: crate::observe::ObserverHandle = shader.clone();
            moonlight.borrow_mut().attach(&handle);
            firefly.borrow_mut().attach(&handle);
        }
        stage.add_light(moonlight);
        stage.add_light(firefly.clone());
        self.firefly_light = Some(firefly);

        let plane = device.borrow_mut().create_model("plane");
        let bush = device.borrow_mut().create_model("bush");
        let tree = device.borrow_mut().create_model("tree");
        let sphere = device.borrow_mut().create_model("sphere");

        // Ground plane, stretched and dropped below the origin.
        let ground = {
            let translate = stage.transforms.translation(Vec3::new(0.0, -1.0, 0.0));
            let scale = stage.transforms.scale(Vec3::new(20.0, 1.0, 20.0));
            stage.transforms.compose(&[translate, scale])
        };
        stage.add_object_with(plane, lambert.clone(), ground, None, Material::stone());
        self.colors.push(Vec3::new(0.15, 0.3, 0.12));

        for _ in 0..BUSH_COUNT {
            let x = rng.range(-20.0, 20.0);
            let z = rng.range(-20.0, 20.0);
            let angle = rng.range(0.0, 360.0);
            let size = 0.3 + rng.range(0.0, 0.5);

            let translate = stage.transforms.translation(Vec3::new(x, -1.0, z));
            let rotate = stage.transforms.rotation(angle, Vec3::Y);
            let scale = stage.transforms.uniform_scale(size);
            let chain = stage.transforms.compose(&[translate, rotate, scale]);
            stage.add_object_with(bush, phong.clone(), chain, None, Material::rubber());
            self.colors.push(Vec3::new(0.2, 0.45, 0.15));
        }

        for _ in 0..TREE_COUNT {
            let x = rng.range(-20.0, 20.0);
            let z = rng.range(-20.0, 20.0);
            let angle = rng.range(0.0, 360.0);
            let size = 0.5 + rng.range(0.0, 0.7);

            let translate = stage.transforms.translation(Vec3::new(x, -1.0, z));
            let rotate = stage.transforms.rotation(angle, Vec3::Y);
            let scale = stage.transforms.uniform_scale(size);
            let chain = stage.transforms.compose(&[translate, rotate, scale]);
            stage.add_object_with(tree, phong.clone(), chain, None, Material::rubber());
            self.colors.push(Vec3::new(0.35, 0.25, 0.12));
        }

        // The firefly glow rides the Bézier node directly; its light is
        // repositioned from the same curve each update.
        let curve_node = stage.transforms.bezier(Self::firefly_loop());
        let glow_scale = stage.transforms.uniform_scale(0.08);
        let glow = stage.transforms.compose(&[curve_node, glow_scale]);
        stage.add_object(sphere, flat, glow);
        self.colors.push(Vec3::new(1.0, 0.95, 0.5));
        self.firefly_node = Some(curve_node);

        self.stage = Some(stage);
    }

    fn update(&mut self, _dt: f32, time: f32) {
        let (Some(stage), Some(node), Some(light)) = (
            self.stage.as_mut(),
            self.firefly_node,
            self.firefly_light.as_ref(),
        ) else {
            return;
        };

        let t = (time * FIREFLY_SPEED).fract();
        stage.transforms.set_param(node, t);

        if let Some(Transform::Bezier(curve)) = stage.transforms.get(node) {
            light.borrow_mut().set_position(curve.position_on_curve());
        }
    }

    fn stage(&self) -> &Stage {
        self.stage.as_ref().expect("scene drawn before init")
    }

    fn stage_mut(&mut self) -> &mut Stage {
        self.stage.as_mut().expect("scene drawn before init")
    }

    fn draw(&mut self, _camera: &Camera) {
        let colors = std::mem::take(&mut self.colors);
        self.stage().draw_with(|index, drawable| {
            drawable
                .shader
                .borrow()
                .set_uniform("objectColor", UniformValue::Vec3(colors[index]));
        });
        self.colors = colors;
    }
}
