pub mod error;
pub mod shapes;

pub use gfx_maths::{Vec2, Vec3};
