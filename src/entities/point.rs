//! Point entity

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

/// A point marker. It is decoded and kept but draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    pub location: Vector3,
    pub thickness: f64,
}

impl Point {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Point {
            location: read_point(pairs, 10),
            thickness: pairs.f64_or(39, 0.0),
            common,
        }
    }
}

impl_entity!(Point);
