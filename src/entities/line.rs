//! Line entity

use super::{read_normal, read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

/// A line entity defined by two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector3,
    /// End point of the line
    pub end: Vector3,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Normal vector
    pub normal: Vector3,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new(common: EntityCommon) -> Self {
        Line {
            common,
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Create a new line between two points
    pub fn from_points(common: EntityCommon, start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new(common)
        }
    }

    /// Decode start (10/20/30) and end (11/21/31)
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Line {
            start: read_point(pairs, 10),
            end: read_point(pairs, 11),
            thickness: pairs.f64_or(39, 0.0),
            normal: read_normal(pairs),
            common,
        }
    }
}

impl_entity!(Line);
