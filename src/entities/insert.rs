//! Insert entity (block reference)

use super::{read_point, Entity, EntityCommon};
use crate::geometry::block_transform;
use crate::io::dxf::PairContainer;
use crate::types::{Transform2D, Vector3};

/// A reference placing a named block at a position, scale and rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Name of the referenced block (code 2)
    pub block_name: String,
    /// Insertion point in the parent frame
    pub insert_point: Vector3,
    /// X scale factor (code 41)
    pub x_scale: f64,
    /// Y scale factor (code 42)
    pub y_scale: f64,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
}

impl Insert {
    pub fn new(common: EntityCommon, block_name: impl Into<String>, insert_point: Vector3) -> Self {
        Insert {
            common,
            block_name: block_name.into(),
            insert_point,
            x_scale: 1.0,
            y_scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Insert {
            block_name: pairs.value_or(2, "").to_string(),
            insert_point: read_point(pairs, 10),
            x_scale: pairs.f64_or(41, 1.0),
            y_scale: pairs.f64_or(42, 1.0),
            rotation: pairs.f64_or(50, 0.0),
            common,
        }
    }

    /// Placement of the block in the parent frame and the stroke factor
    pub fn block_transform(&self) -> (Transform2D, f64) {
        block_transform(self.insert_point.xy(), self.x_scale, self.y_scale, self.rotation)
    }

    /// False when the block name is missing or blank
    pub fn has_block_name(&self) -> bool {
        !self.block_name.trim().is_empty()
    }
}

impl_entity!(Insert);
