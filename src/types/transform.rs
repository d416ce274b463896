//! 2D affine transforms
//!
//! Wraps a homogeneous 3x3 matrix so block-reference placement can be
//! composed and handed to the rendering side as six coefficients.

use crate::types::Vector2;
use nalgebra::{Matrix3, Point2};
use std::ops::Mul;

/// 2D affine transform (rotation, scale, shear and translation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Homogeneous matrix, last row is always `[0, 0, 1]`
    pub matrix: Matrix3<f64>,
}

impl Transform2D {
    /// Create identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Counter-clockwise rotation about the origin
    pub fn from_rotation_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            matrix: Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Non-uniform scaling about the origin
    pub fn from_scaling(sx: f64, sy: f64) -> Self {
        Self {
            matrix: Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Pure translation
    pub fn from_translation(tx: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Overwrite the translation column, leaving the linear part untouched
    pub fn with_translation(mut self, tx: f64, ty: f64) -> Self {
        self.matrix[(0, 2)] = tx;
        self.matrix[(1, 2)] = ty;
        self
    }

    /// Translation part of the transform
    pub fn translation(&self) -> Vector2 {
        Vector2::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    /// Combine with another transform (other transform applied first)
    pub fn compose(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Combine with another transform (this transform applied first)
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        other.compose(self)
    }

    /// Apply transform to a point
    pub fn apply(&self, point: Vector2) -> Vector2 {
        let p = self.matrix.transform_point(&Point2::new(point.x, point.y));
        Vector2::new(p.x, p.y)
    }

    /// Check if transform is identity
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix3::identity()
    }

    /// Coefficients in `[mxx, mxy, tx, myx, myy, ty]` order
    pub fn coefficients(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m[(0, 0)], m[(0, 1)], m[(0, 2)], m[(1, 0)], m[(1, 1)], m[(1, 2)]]
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector2, b: Vector2) {
        assert!((a.x - b.x).abs() < 1e-10, "{} != {}", a, b);
        assert!((a.y - b.y).abs() < 1e-10, "{} != {}", a, b);
    }

    #[test]
    fn test_identity() {
        let t = Transform2D::identity();
        assert!(t.is_identity());
        assert_eq!(t.coefficients(), [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rotation() {
        let t = Transform2D::from_rotation_degrees(90.0);
        assert_close(t.apply(Vector2::new(1.0, 0.0)), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_composition_order() {
        let scale = Transform2D::from_scaling(2.0, 2.0);
        let shift = Transform2D::from_translation(10.0, 0.0);
        // scale first, then shift
        let t = scale.then(&shift);
        assert_close(t.apply(Vector2::new(1.0, 1.0)), Vector2::new(12.0, 2.0));
        assert_eq!(t, shift * scale);
    }

    #[test]
    fn test_with_translation_keeps_linear_part() {
        let t = Transform2D::from_rotation_degrees(90.0).with_translation(5.0, 6.0);
        assert_eq!(t.translation(), Vector2::new(5.0, 6.0));
        assert_close(t.apply(Vector2::new(1.0, 0.0)), Vector2::new(5.0, 7.0));
    }
}
