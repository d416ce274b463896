//! XLine entity (construction line, infinite in both directions)

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::{Vector2, Vector3};

/// Half length an xline is drawn with on each side of its base point
pub const XLINE_HALF_LENGTH: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct XLine {
    pub common: EntityCommon,
    /// Point on the line (code 10)
    pub base_point: Vector3,
    /// Unit direction (code 11)
    pub direction: Vector3,
}

impl XLine {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        XLine {
            base_point: read_point(pairs, 10),
            direction: read_point(pairs, 11),
            common,
        }
    }

    pub fn segment(&self) -> (Vector2, Vector2) {
        let base = self.base_point.xy();
        let offset = self.direction.xy() * XLINE_HALF_LENGTH;
        (base - offset, base + offset)
    }
}

impl_entity!(XLine);
