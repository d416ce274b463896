//! Output records handed to a vector renderer

use crate::types::{Color, Transform2D, Vector2};

/// A 2D drawing primitive in the local frame of its [`RenderItem`]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight segment
    Segment { start: Vector2, end: Vector2 },
    /// Elliptical arc.
    ///
    /// Angles are in degrees with the sign flipped relative to the drawing,
    /// so a counter-clockwise DXF arc has a negative sweep.
    Arc {
        center: Vector2,
        radius_x: f64,
        radius_y: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Open or closed path. When `closed` is set the last vertex repeats
    /// the first.
    Polyline { vertices: Vec<Vector2>, closed: bool },
    /// Closed outline of a face, never dashed
    Polygon { vertices: Vec<Vector2> },
}

impl Primitive {
    pub fn segment(start: Vector2, end: Vector2) -> Self {
        Primitive::Segment { start, end }
    }

    /// Full circle
    pub fn circle(center: Vector2, radius: f64) -> Self {
        Primitive::Arc {
            center,
            radius_x: radius,
            radius_y: radius,
            start_angle: 0.0,
            sweep: -360.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Segment { .. } => "segment",
            Primitive::Arc { .. } => "arc",
            Primitive::Polyline { .. } => "polyline",
            Primitive::Polygon { .. } => "polygon",
        }
    }

    /// Defining points: segment ends, path vertices, or the arc center
    pub fn points(&self) -> Vec<Vector2> {
        match self {
            Primitive::Segment { start, end } => vec![*start, *end],
            Primitive::Arc { center, .. } => vec![*center],
            Primitive::Polyline { vertices, .. } | Primitive::Polygon { vertices } => {
                vertices.clone()
            }
        }
    }
}

/// A primitive with its resolved style and placement
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub primitive: Primitive,
    /// Concrete color index
    pub color: Color,
    /// Alternating on/off lengths; empty for solid strokes
    pub dash: Vec<f64>,
    /// Local-to-world transform
    pub transform: Transform2D,
    /// Factor to multiply a base stroke width by
    pub stroke_scale: f64,
}

impl RenderItem {
    /// Defining points mapped to world coordinates
    pub fn world_points(&self) -> Vec<Vector2> {
        self.primitive
            .points()
            .into_iter()
            .map(|p| self.transform.apply(p))
            .collect()
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}
