//! Closed-form geometry used when flattening: bulge arcs, elliptical arc
//! sampling, polyline expansion and block placement.

pub mod block_transform;
pub mod bulge;
pub mod elliptical_arc;
pub mod polyline;

pub use block_transform::block_transform;
pub use bulge::arc_from_bulge;
pub use elliptical_arc::{ArcSamples, EllipticalArc, MAX_SAMPLE_STEP_DEG};
pub use polyline::{needs_closing, vertex_list, PolyVertex, WidthVertex, NUMBER_OF_GRADS};
