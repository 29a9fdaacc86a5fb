//! # peltast
//!
//! A small scene-graph and shader-notification playground.
//!
//! The core is a composable transform system — translations, rotations,
//! scales, Bézier curves and linear paths, assembled into ordered composite
//! chains in an insert-only graph — and an observer protocol that keeps
//! shader uniforms in sync with camera and light state without per-frame
//! re-uploads. Rendering itself happens behind the [`device::RenderDevice`]
//! trait; the bundled backends trace or count calls, which is what the demo
//! binary and the test suite run against.
//!
//! ```no_run
//! use peltast::app::App;
//! use peltast::assets::Assets;
//! use peltast::device::{DeviceHandle, StatsDevice};
//! use peltast::scenes::SolarSystem;
//!
//! let device: DeviceHandle = StatsDevice::shared();
//! let mut app = App::new(device);
//! app.register_scene(Box::new(SolarSystem::new()));
//! app.init(&Assets::embedded());
//! app.activate("solar_system");
//! app.run_frames(300, 1.0 / 60.0);
//! ```

pub mod app;
pub mod assets;
pub mod camera;
pub mod device;
pub mod error;
pub mod light;
pub mod material;
pub mod observe;
pub mod rng;
pub mod scene;
pub mod scenes;
pub mod shader;
pub mod timer;
pub mod transform;

pub use error::{Error, Result};

// Math types are part of the public surface; re-export them so downstream
// code matches versions automatically.
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
