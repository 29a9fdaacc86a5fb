//! The bundled demo scenes.
//!
//! Each scene exercises a different slice of the transform graph: orbit
//! chains rebuilt every frame (solar system), a large static scatter with
//! one curve-driven light (forest), and interpolated pop-up paths with
//! scoring (whack-a-mole).

mod forest;
mod solar_system;
mod whack_a_mole;

pub use forest::Forest;
pub use solar_system::SolarSystem;
pub use whack_a_mole::WhackAMole;
