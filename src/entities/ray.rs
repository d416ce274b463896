//! Ray entity (semi-infinite line)

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::{Vector2, Vector3};

/// Length a ray is drawn with, in drawing units
pub const RAY_DRAW_LENGTH: f64 = 300.0;

/// A line starting at a base point and running along a direction
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: EntityCommon,
    /// Start point (code 10)
    pub base_point: Vector3,
    /// Unit direction (code 11)
    pub direction: Vector3,
}

impl Ray {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Ray {
            base_point: read_point(pairs, 10),
            direction: read_point(pairs, 11),
            common,
        }
    }

    /// Finite stand-in segment: base point to base point + length along the direction
    pub fn segment(&self) -> (Vector2, Vector2) {
        let base = self.base_point.xy();
        (base, base + self.direction.xy() * RAY_DRAW_LENGTH)
    }
}

impl_entity!(Ray);
