//! Fixed-point raycaster: ray construction and DDA ([`ray`]), projection
//! and texturing ([`column`]), and the column cursor ([`engine`]).

pub mod column;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod ray;
pub mod types;

pub use column::{NEAR_CLIP, Raycaster, texture_index, texture_x, wall_offset};
pub use engine::Engine;
pub use ray::{Ray, camera_x, cast_column, cast_ray};
pub use types::{ColumnInfo, RayHit, Side};
