//! Face3D entity (3D face)

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::{Vector2, Vector3};

bitflags::bitflags! {
    /// Invisible edge flags for Face3D (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: i32 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

/// A three or four sided face
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    pub common: EntityCommon,
    /// Corners from codes 10, 11, 12 and 13
    pub corners: [Vector3; 4],
    pub invisible_edges: InvisibleEdgeFlags,
}

impl Face3D {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Face3D {
            corners: [
                read_point(pairs, 10),
                read_point(pairs, 11),
                read_point(pairs, 12),
                read_point(pairs, 13),
            ],
            invisible_edges: InvisibleEdgeFlags::from_bits_retain(pairs.i32_or(70, 0)),
            common,
        }
    }

    /// A face whose fourth corner repeats the third is a triangle
    pub fn is_triangle(&self) -> bool {
        self.corners[3] == self.corners[2]
    }

    /// Outline of the face in the XY plane
    pub fn outline(&self) -> Vec<Vector2> {
        let count = if self.is_triangle() { 3 } else { 4 };
        self.corners[..count].iter().map(Vector3::xy).collect()
    }
}

impl_entity!(Face3D);
