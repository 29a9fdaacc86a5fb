//! A mole grid on interpolated pop-up paths, with scoring.
//!
//! Each mole owns a [`LinearPath`] between its burrow and its popped
//! position. Rather than mutating graph nodes in place, every frame the
//! graph is truncated to its init-time watermark and each mole gets a
//! fresh composite rooted at the path's current point — the same rebuild
//! pattern the orbit scene uses, here fed from `position_on_path`. Pop and
//! hide times come from the scene's seeded stream, so a given seed replays
//! the same game.

use glam::Vec3;

use crate::assets::Assets;
use crate::camera::Camera;
use crate::device::{DeviceHandle, UniformValue};
use crate::light::Light;
use crate::material::Material;
use crate::rng::SplitMix64;
use crate::scene::{Scene, Stage};
use crate::shader::ShaderProgram;
use crate::transform::{LinearPath, TransformId};

use std::cell::RefCell;
use std::rc::Rc;

const GRID: usize = 3;
const CELL_SPACING: f32 = 2.0;
const BURROW_Y: f32 = -0.8;
const POPPED_Y: f32 = 0.3;
/// Path parameter per second while rising or ducking.
const MOLE_SPEED: f32 = 4.0;
/// A mole counts as whackable above this much of its path.
const HITTABLE_PARAM: f32 = 0.5;

enum MoleState {
    Down { pop_at: f32 },
    Rising,
    Up { hide_at: f32 },
    Falling,
}

struct Mole {
    binding: usize,
    path: LinearPath,
    param: f32,
    state: MoleState,
}

pub struct WhackAMole {
    rng: SplitMix64,
    stage: Option<Stage>,
    moles: Vec<Mole>,
    /// Shared scale node below the watermark, referenced by every rebuilt
    /// mole composite.
    mole_size: Option<TransformId>,
    watermark: usize,
    mole_color: Vec3,
    mound_color: Vec3,
    score: u32,
    misses: u32,
}

impl WhackAMole {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            stage: None,
            moles: Vec::new(),
            mole_size: None,
            watermark: 0,
            mole_color: Vec3::new(0.45, 0.3, 0.2),
            mound_color: Vec3::new(0.3, 0.22, 0.15),
            score: 0,
            misses: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Whether a mole is currently far enough out of its burrow to hit.
    pub fn is_up(&self, index: usize) -> bool {
        self.moles
            .get(index)
            .is_some_and(|mole| mole.param >= HITTABLE_PARAM)
    }

    /// Attempt a hit on one mole. A connecting hit sends it back down
    /// immediately; anything else counts as a miss.
    pub fn whack(&mut self, index: usize) -> bool {
        let Some(mole) = self.moles.get_mut(index) else {
            self.misses += 1;
            return false;
        };
        if mole.param >= HITTABLE_PARAM {
            self.score += 1;
            mole.state = MoleState::Falling;
            true
        } else {
            self.misses += 1;
            false
        }
    }

    /// Re-root every mole's composite at its path's current point.
    fn rebuild_moles(&mut self) {
        let (Some(stage), Some(size)) = (self.stage.as_mut(), self.mole_size) else {
            return;
        };
        stage.transforms.truncate(self.watermark);
        for mole in &mut self.moles {
            mole.path.set_param(mole.param);
            let at = stage.transforms.translation(mole.path.position_on_path());
            let chain = stage.transforms.compose(&[at, size]);
            stage.set_transform(mole.binding, chain);
        }
    }
}

impl Scene for WhackAMole {
    fn name(&self) -> &str {
        "whack_a_mole"
    }

    fn init(&mut self, device: &DeviceHandle, assets: &Assets) {
        let mut stage = Stage::new(device);

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

        // One spotlight over the board; the falloff cone frames the grid.
        let lamp = Rc::new(RefCell::new(Light::spotlight(
            Vec3::new(0.0, 6.0, 0.0),
            Vec3::new(1.0, 0.95, 0.85),
        )));
        lamp.borrow_mut().set_direction(Vec3::NEG_Y);
        lamp.borrow_mut().set_cutoff(30.0);
        lamp.borrow_mut().set_outer_cutoff(40.0);
        lambert.borrow_mut().add_light(lamp.clone());
        lambert.borrow().update_all_lights();
        let handle: crate::observe::ObserverHandle = lambert.clone();
        lamp.borrow_mut().attach(&handle);
        stage.add_light(lamp);

        let mound = device.borrow_mut().create_model("mound");
        let mole_model = device.borrow_mut().create_model("mole");
        let mole_material = assets.material("mole.mtl");

        let size = stage.transforms.uniform_scale(0.6);
        self.mole_size = Some(size);

        let half = (GRID as f32 - 1.0) / 2.0;
        for row in 0..GRID {
            for col in 0..GRID {
                let x = (col as f32 - half) * CELL_SPACING;
                let z = (row as f32 - half) * CELL_SPACING;

                let mound_at = stage.transforms.translation(Vec3::new(x, -0.5, z));
                stage.add_object_with(mound, lambert.clone(), mound_at, None, Material::stone());

                let placeholder = stage.transforms.identity();
                let binding = stage.add_object_with(
                    mole_model,
                    lambert.clone(),
                    placeholder,
                    None,
                    mole_material,
                );

                self.moles.push(Mole {
                    binding,
                    path: LinearPath::new(
                        Vec3::new(x, BURROW_Y, z),
                        Vec3::new(x, POPPED_Y, z),
                    ),
                    param: 0.0,
                    state: MoleState::Down {
                        pop_at: self.rng.range(0.5, 3.0),
                    },
                });
            }
        }

        self.watermark = stage.transforms.len();
        self.stage = Some(stage);
        self.rebuild_moles();
    }

    fn update(&mut self, dt: f32, time: f32) {
        for mole in &mut self.moles {
            match mole.state {
                MoleState::Down { pop_at } => {
                    if time >= pop_at {
                        mole.state = MoleState::Rising;
                    }
                }
                MoleState::Rising => {
                    mole.param = (mole.param + MOLE_SPEED * dt).min(1.0);
                    if mole.param >= 1.0 {
                        mole.state = MoleState::Up {
                            hide_at: time + self.rng.range(0.8, 2.0),
                        };
                    }
                }
                MoleState::Up { hide_at } => {
                    if time >= hide_at {
                        mole.state = MoleState::Falling;
                    }
                }
                MoleState::Falling => {
                    mole.param = (mole.param - MOLE_SPEED * dt).max(0.0);
                    if mole.param <= 0.0 {
                        mole.state = MoleState::Down {
                            pop_at: time + self.rng.range(0.5, 3.0),
                        };
                    }
                }
            }
        }
        self.rebuild_moles();
    }

    fn stage(&self) -> &Stage {
        self.stage.as_ref().expect("scene drawn before init")
    }

    fn stage_mut(&mut self) -> &mut Stage {
        self.stage.as_mut().expect("scene drawn before init")
    }

    fn draw(&mut self, _camera: &Camera) {
        let mole_color = self.mole_color;
        let mound_color = self.mound_color;
        self.stage().draw_with(|index, drawable| {
            // Bindings alternate mound, mole per cell.
            let color = if index % 2 == 0 { mound_color } else { mole_color };
            drawable
                .shader
                .borrow()
                .set_uniform("objectColor", UniformValue::Vec3(color));
        });
    }
}
