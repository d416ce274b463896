//! Circle entity

use super::{read_normal, read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    pub normal: Vector3,
}

impl Circle {
    pub fn new(common: EntityCommon, center: Vector3, radius: f64) -> Self {
        Circle {
            common,
            center,
            radius,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Circle {
            center: read_point(pairs, 10),
            radius: pairs.f64_or(40, 0.0),
            thickness: pairs.f64_or(39, 0.0),
            normal: read_normal(pairs),
            common,
        }
    }
}

impl_entity!(Circle);
