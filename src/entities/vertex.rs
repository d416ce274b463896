//! Polyline vertex and polyface face records

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

bitflags::bitflags! {
    /// Vertex flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VertexFlags: i32 {
        /// Extra vertex created by curve fitting
        const CURVE_FIT_EXTRA = 1;
        /// Curve-fit tangent defined
        const CURVE_FIT_TANGENT = 2;
        /// Spline vertex created by spline fitting
        const SPLINE_VERTEX = 8;
        /// Spline frame control point
        const CONTROL_POINT = 16;
        /// 3D polyline vertex
        const POLYLINE_3D = 32;
        /// 3D polygon mesh vertex
        const POLYGON_MESH = 64;
        /// Polyface mesh vertex
        const POLYFACE_MESH = 128;
    }
}

/// A VERTEX record
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub common: EntityCommon,
    pub location: Vector3,
    /// Start width (code 40)
    pub start_width: f64,
    /// End width (code 41)
    pub end_width: f64,
    /// Bulge of the segment starting here (code 42)
    pub bulge: f64,
    pub flags: VertexFlags,
}

impl Vertex {
    pub fn new(common: EntityCommon, location: Vector3) -> Self {
        Vertex {
            common,
            location,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            flags: VertexFlags::empty(),
        }
    }

    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Vertex {
            location: read_point(pairs, 10),
            start_width: pairs.f64_or(40, 0.0),
            end_width: pairs.f64_or(41, 0.0),
            bulge: pairs.f64_or(42, 0.0),
            flags: VertexFlags::from_bits_retain(pairs.i32_or(70, 0)),
            common,
        }
    }

    pub fn is_control_point(&self) -> bool {
        self.flags.contains(VertexFlags::CONTROL_POINT)
    }

    /// A plain 2D vertex: none of the 3D, mesh or polyface bits are set
    pub fn is_2d(&self) -> bool {
        self.flags.bits() < VertexFlags::POLYLINE_3D.bits()
    }
}

impl_entity!(Vertex);

/// Shape of a polyface face, from its number of vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceType {
    Point,
    Line,
    Triangle,
    Quad,
    Undefined,
}

/// A polyface face definition: a VERTEX record with vertex indices in
/// codes 71 to 74.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDef {
    pub common: EntityCommon,
    /// 1-based indices into the mesh's vertex list
    pub indices: Vec<i32>,
}

impl FaceDef {
    pub fn new(common: EntityCommon, indices: Vec<i32>) -> Self {
        FaceDef { common, indices }
    }

    /// Indices stop at the first missing or zero one. A negative index
    /// marks the edge starting there as invisible; only its magnitude is kept.
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        let indices = (71..=74)
            .map(|code| pairs.i32_or(code, 0))
            .take_while(|&index| index != 0)
            .map(i32::abs)
            .collect();
        FaceDef { common, indices }
    }

    pub fn face_type(&self) -> FaceType {
        match self.indices.len() {
            1 => FaceType::Point,
            2 => FaceType::Line,
            3 => FaceType::Triangle,
            4 => FaceType::Quad,
            _ => FaceType::Undefined,
        }
    }
}

impl_entity!(FaceDef);
