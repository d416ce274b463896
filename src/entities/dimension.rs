//! Dimension entity

use super::{Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::Vector2;

/// Subclass marker holding the dimension geometry
pub const DIMENSION_SUBCLASS: &str = "AcDbDimension";

/// A dimension. Its graphics live in an anonymous block named by code 2,
/// which is drawn untransformed in the referencing frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub common: EntityCommon,
    /// Definition point (codes 10/20)
    pub definition_point: Vector2,
    /// Text middle point (codes 11/21)
    pub text_point: Vector2,
    /// Text override (code 1)
    pub text: Option<String>,
    /// Name of the block holding the dimension graphics (code 2)
    pub block_name: Option<String>,
    /// Dimension style name (code 3)
    pub style_name: Option<String>,
    /// Measurement (code 42)
    pub measurement: f64,
    /// Text rotation in degrees (code 53)
    pub text_rotation: f64,
    /// Horizontal direction in degrees (code 51)
    pub horizontal_direction: f64,
}

impl Dimension {
    /// Fields come from the `AcDbDimension` subclass, or from the whole
    /// record when that marker is missing.
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        let subclass = pairs.subclass(DIMENSION_SUBCLASS);
        let fields = subclass.as_ref().unwrap_or(pairs);
        let text = |code| fields.first_value(code).map(str::to_string);

        Dimension {
            definition_point: Vector2::new(fields.f64_or(10, 0.0), fields.f64_or(20, 0.0)),
            text_point: Vector2::new(fields.f64_or(11, 0.0), fields.f64_or(21, 0.0)),
            text: text(1),
            block_name: text(2),
            style_name: text(3),
            measurement: fields.f64_or(42, 0.0),
            text_rotation: fields.f64_or(53, 0.0),
            horizontal_direction: fields.f64_or(51, 0.0),
            common,
        }
    }
}

impl_entity!(Dimension);
