//! Flattening a block tree into styled 2D primitives

pub mod flatten;
pub mod primitive;
pub mod resolve;

pub use flatten::{FlattenOptions, FlattenReport, Flattened, ELLIPSE_ARC_ROTATION_OFFSET_DEG};
pub use primitive::{Primitive, RenderItem};
pub use resolve::{dash_pattern, ResolutionContext};
