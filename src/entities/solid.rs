//! Solid and trace entities

use super::{read_normal, read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::{Vector2, Vector3};

/// A filled triangle or quadrilateral; TRACE records decode to the same shape.
///
/// Corners are stored in file order, which zig-zags: the outline runs
/// 1, 2, 4, 3.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    pub corners: [Vector3; 4],
    pub thickness: f64,
    pub normal: Vector3,
}

impl Solid {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Solid {
            corners: [
                read_point(pairs, 10),
                read_point(pairs, 11),
                read_point(pairs, 12),
                read_point(pairs, 13),
            ],
            thickness: pairs.f64_or(39, 0.0),
            normal: read_normal(pairs),
            common,
        }
    }

    pub fn is_triangle(&self) -> bool {
        self.corners[3] == self.corners[2]
    }

    /// Corners in drawing order
    pub fn outline(&self) -> Vec<Vector2> {
        let c = &self.corners;
        if self.is_triangle() {
            vec![c[0].xy(), c[1].xy(), c[2].xy()]
        } else {
            vec![c[0].xy(), c[1].xy(), c[3].xy(), c[2].xy()]
        }
    }
}

impl_entity!(Solid);
