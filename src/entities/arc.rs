//! Arc entity

use super::{read_normal, read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

/// A circular arc, counter-clockwise from start angle to end angle
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Normal vector
    pub normal: Vector3,
}

impl Arc {
    pub fn new(common: EntityCommon, center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            common,
            center,
            radius,
            start_angle,
            end_angle,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Decode codes 10/20/30, 40, 50, 51, 39 and the extrusion
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Arc {
            center: read_point(pairs, 10),
            radius: pairs.f64_or(40, 0.0),
            start_angle: pairs.f64_or(50, 0.0),
            end_angle: pairs.f64_or(51, 0.0),
            thickness: pairs.f64_or(39, 0.0),
            normal: read_normal(pairs),
            common,
        }
    }

    /// Swept angle in degrees, in `[0, 360)` unless start equals end
    pub fn sweep(&self) -> f64 {
        let sweep = self.end_angle - self.start_angle;
        if self.end_angle < self.start_angle {
            sweep + 360.0
        } else {
            sweep
        }
    }
}

impl_entity!(Arc);
