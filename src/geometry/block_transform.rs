//! Placement of a referenced block in its parent frame

use crate::types::{Transform2D, Vector2};

/// Transform and stroke-scale factor for a block reference.
///
/// Rotation and scale are combined first; the insertion point is then written
/// into the translation column, so it is never pushed through the rotation.
/// The stroke factor is `1 / avg(sx, sy)`, which keeps line weights constant
/// under uniform scaling. A zero average falls back to 1.
pub fn block_transform(insertion: Vector2, sx: f64, sy: f64, rotation_deg: f64) -> (Transform2D, f64) {
    let transform = Transform2D::from_rotation_degrees(rotation_deg % 360.0)
        .compose(&Transform2D::from_scaling(sx, sy))
        .with_translation(insertion.x, insertion.y);

    let average = (sx + sy) / 2.0;
    let stroke = if average == 0.0 { 1.0 } else { 1.0 / average };

    (transform, stroke)
}
