//! Viewport entity

use super::{read_point, Entity, EntityCommon};
use crate::io::dxf::PairContainer;
use crate::types::{Transform2D, Vector2};

/// A paper-space window onto model space. Stored for queries; it draws
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub common: EntityCommon,
    /// Center in paper space (codes 10/20)
    pub center: Vector2,
    /// Width in paper space (code 40)
    pub width: f64,
    /// Height in paper space (code 41)
    pub height: f64,
    /// View center in model space (codes 12/22)
    pub view_center: Vector2,
    /// View height in model space (code 45)
    pub view_height: f64,
    /// Viewport id (code 69)
    pub id: i32,
}

impl Viewport {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Viewport {
            center: read_point(pairs, 10).xy(),
            width: pairs.f64_or(40, 0.0),
            height: pairs.f64_or(41, 0.0),
            view_center: read_point(pairs, 12).xy(),
            view_height: pairs.f64_or(45, 0.0),
            id: pairs.i32_or(69, 0),
            common,
        }
    }

    /// Paper units per model unit; 1 when either height is zero
    pub fn scale_factor(&self) -> f64 {
        if self.height == 0.0 || self.view_height == 0.0 {
            1.0
        } else {
            self.height / self.view_height
        }
    }

    /// Width of the model-space view
    pub fn view_width(&self) -> f64 {
        self.width / self.scale_factor()
    }

    /// Model space to paper space: translate so the view center lands on
    /// the viewport center, then scale.
    pub fn view_transform(&self) -> Transform2D {
        let s = self.scale_factor();
        let offset = self.center - self.view_center * s;
        Transform2D::from_scaling(s, s).compose(&Transform2D::from_translation(offset.x, offset.y))
    }

    /// Lower-left and upper-right corners in paper space
    pub fn bounds(&self) -> (Vector2, Vector2) {
        let half = Vector2::new(self.width / 2.0, self.height / 2.0);
        (self.center - half, self.center + half)
    }
}

impl_entity!(Viewport);
