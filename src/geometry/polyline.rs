//! Polyline vertex expansion: bulge segments become sampled arcs

use super::arc_from_bulge;
use crate::types::{Vector2, Vector3};

/// Angular step, in degrees, used to tessellate bulge arcs and ellipses
pub const NUMBER_OF_GRADS: f64 = 5.0;

/// A 2D polyline vertex with segment widths and the bulge of the segment
/// that starts here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolyVertex {
    pub location: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
}

impl PolyVertex {
    pub fn new(x: f64, y: f64) -> Self {
        PolyVertex {
            location: Vector3::new(x, y, 0.0),
            ..Default::default()
        }
    }

    pub fn with_bulge(mut self, bulge: f64) -> Self {
        self.bulge = bulge;
        self
    }

    pub fn with_widths(mut self, start_width: f64, end_width: f64) -> Self {
        self.start_width = start_width;
        self.end_width = end_width;
        self
    }

    pub fn position(&self) -> Vector2 {
        self.location.xy()
    }

    pub fn has_width(&self) -> bool {
        self.start_width > 0.0 || self.end_width > 0.0
    }
}

/// A point of an expanded polyline with the stroke widths at that point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthVertex {
    pub position: Vector2,
    pub start_width: f64,
    pub end_width: f64,
}

impl WidthVertex {
    fn plain(position: Vector2) -> Self {
        WidthVertex {
            position,
            start_width: 0.0,
            end_width: 0.0,
        }
    }
}

impl From<&PolyVertex> for WidthVertex {
    fn from(vertex: &PolyVertex) -> Self {
        WidthVertex {
            position: vertex.position(),
            start_width: vertex.start_width,
            end_width: vertex.end_width,
        }
    }
}

/// Expand polyline vertices into one ordered point list.
///
/// Each vertex opens a segment to the next one. A segment with a bulge is
/// replaced by arc samples taken every [`NUMBER_OF_GRADS`] degrees. When
/// `closed` is set the last vertex also connects back to the first, so
/// `[A, B, C]` becomes `[A, B, C, A]`. The first point of every segment
/// replaces the last point of the previous one.
///
/// With `has_width`, widths along an arc are interpolated linearly from the
/// segment's start width towards its end width.
pub fn vertex_list(vertices: &[PolyVertex], closed: bool, has_width: bool) -> Vec<WidthVertex> {
    let len = vertices.len();
    let mut points: Vec<WidthVertex> = Vec::with_capacity(len + 1);
    if len == 0 {
        return points;
    }

    let segments = if closed || len == 1 { len } else { len - 1 };
    for (i, v1) in vertices.iter().take(segments).enumerate() {
        let v2 = &vertices[(i + 1) % len];
        points.pop();

        match arc_from_bulge(v1.bulge, v1.position(), v2.position()) {
            None => {
                points.push(WidthVertex::from(v1));
                points.push(WidthVertex::from(v2));
            }
            Some(arc) => {
                let mut samples: Vec<Vector2> = arc.sample(NUMBER_OF_GRADS).collect();
                if v1.bulge < 0.0 {
                    samples.reverse();
                }
                points.extend(arc_widths(&samples, v1, has_width));
            }
        }
    }

    points
}

fn arc_widths<'a>(
    samples: &'a [Vector2],
    v1: &PolyVertex,
    has_width: bool,
) -> impl Iterator<Item = WidthVertex> + 'a {
    let increase = (v1.end_width - v1.start_width) / samples.len() as f64;
    let start = v1.start_width;

    samples.iter().enumerate().map(move |(n, &position)| {
        if has_width {
            WidthVertex {
                position,
                start_width: start + increase * n as f64,
                end_width: start + increase * (n + 1) as f64,
            }
        } else {
            WidthVertex::plain(position)
        }
    })
}

/// True when a polyline with its closed flag set still needs a closing
/// segment, i.e. its first and last vertices are not the same point.
pub fn needs_closing(closed_flag: bool, first: Vector2, last: Vector2) -> bool {
    closed_flag && !first.same_point(&last)
}
