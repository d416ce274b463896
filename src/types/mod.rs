//! Core value types shared by the document model and the geometry engine

pub mod color;
pub mod distance_unit;
pub mod transform;
pub mod vector;

pub use color::{Color, COLOR_BY_BLOCK, COLOR_BY_LAYER, DEFAULT_COLOR_INDEX};
pub use distance_unit::DistanceUnit;
pub use transform::Transform2D;
pub use vector::{Vector2, Vector3, POINT_TOLERANCE};
