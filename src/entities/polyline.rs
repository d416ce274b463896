//! Heavy polyline entity (POLYLINE followed by VERTEX records)

use super::{read_normal, read_point, Entity, EntityCommon, Vertex};
use crate::geometry::{needs_closing, PolyVertex};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

bitflags::bitflags! {
    /// Polyline flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: i32 {
        /// Closed polyline, or closed in M for a polygon mesh
        const CLOSED = 1;
        /// Curve-fit vertices added
        const CURVE_FIT = 2;
        /// Spline-fit vertices added
        const SPLINE_FIT = 4;
        /// 3D polyline
        const POLYLINE_3D = 8;
        /// 3D polygon mesh
        const POLYGON_MESH = 16;
        /// Polygon mesh closed in N
        const MESH_CLOSED_N = 32;
        /// Polyface mesh
        const POLYFACE_MESH = 64;
        /// Continuous line type pattern around vertices
        const CONTINUOUS_LINETYPE = 128;
    }
}

/// A polyline whose vertices arrive as separate VERTEX records.
///
/// Attached vertices are sorted by their flags: spline control points,
/// 3D/mesh vertices kept as plain points, and 2D vertices promoted to
/// [`PolyVertex`] with widths and bulge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Elevation point (codes 10/20/30)
    pub elevation: Vector3,
    pub thickness: f64,
    pub flags: PolylineFlags,
    /// Default start width (code 40)
    pub start_width: f64,
    /// Default end width (code 41)
    pub end_width: f64,
    /// Smooth surface type (code 75)
    pub surface_type: i32,
    pub normal: Vector3,
    /// Spline frame control points
    pub control_points: Vec<Vertex>,
    /// Vertices of 3D polylines and meshes
    pub vertices: Vec<Vertex>,
    /// Vertices of 2D polylines
    pub poly_vertices: Vec<PolyVertex>,
    /// Whether any 2D vertex carries a width
    pub has_width: bool,
}

impl Polyline {
    pub fn new(common: EntityCommon) -> Self {
        Polyline {
            common,
            elevation: Vector3::ZERO,
            thickness: 0.0,
            flags: PolylineFlags::empty(),
            start_width: 0.0,
            end_width: 0.0,
            surface_type: 0,
            normal: Vector3::UNIT_Z,
            control_points: Vec::new(),
            vertices: Vec::new(),
            poly_vertices: Vec::new(),
            has_width: false,
        }
    }

    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Polyline {
            elevation: read_point(pairs, 10),
            thickness: pairs.f64_or(39, 0.0),
            flags: PolylineFlags::from_bits_retain(pairs.i32_or(70, 0)),
            start_width: pairs.f64_or(40, 0.0),
            end_width: pairs.f64_or(41, 0.0),
            surface_type: pairs.i32_or(75, 0),
            normal: read_normal(pairs),
            ..Self::new(common)
        }
    }

    /// Sort an attached vertex into the matching list
    pub fn add_vertex(&mut self, vertex: Vertex) {
        if vertex.is_control_point() {
            self.control_points.push(vertex);
        } else if !vertex.is_2d() {
            self.vertices.push(vertex);
        } else {
            let poly_vertex = PolyVertex {
                location: vertex.location,
                start_width: vertex.start_width,
                end_width: vertex.end_width,
                bulge: vertex.bulge,
            };
            self.has_width |= poly_vertex.has_width();
            self.poly_vertices.push(poly_vertex);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    /// Without the 3D bit the polyline is drawn from its 2D vertices
    pub fn is_2d(&self) -> bool {
        !self.flags.contains(PolylineFlags::POLYLINE_3D)
    }

    /// Fewer than two vertices in the list that will be drawn
    pub fn is_degenerate(&self) -> bool {
        if self.is_2d() {
            self.poly_vertices.len() < 2
        } else {
            self.vertices.len() < 2
        }
    }

    /// Closed flag set and the end points not already coincident
    pub fn needs_closing(&self) -> bool {
        if self.is_2d() {
            match (self.poly_vertices.first(), self.poly_vertices.last()) {
                (Some(first), Some(last)) => {
                    needs_closing(self.is_closed(), first.position(), last.position())
                }
                _ => false,
            }
        } else {
            match (self.vertices.first(), self.vertices.last()) {
                (Some(first), Some(last)) => {
                    needs_closing(self.is_closed(), first.location.xy(), last.location.xy())
                }
                _ => false,
            }
        }
    }
}

impl Entity for Polyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn is_container(&self) -> bool {
        true
    }
}
