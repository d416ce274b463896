//! Circular arc recovered from a polyline bulge

use super::EllipticalArc;
use crate::types::Vector2;

/// Arc replacing the straight segment `start`→`end` for a given bulge.
///
/// The bulge is the tangent of a quarter of the included angle; its sign
/// gives the winding, so a negative bulge swaps the start and end angles.
/// Returns `None` when the bulge is zero at single precision or the segment
/// has no length.
pub fn arc_from_bulge(bulge: f64, start: Vector2, end: Vector2) -> Option<EllipticalArc> {
    if bulge as f32 == 0.0 || start.same_point(&end) {
        return None;
    }

    let cotan = 0.5 * (1.0 / bulge - bulge);
    let center = Vector2::new(
        0.5 * ((start.x + end.x) - (end.y - start.y) * cotan),
        0.5 * ((end.y + start.y) + (end.x - start.x) * cotan),
    );
    let radius = center.distance(&start);

    let mut start_angle = angle_about(center, start);
    let mut end_angle = angle_about(center, end);
    if bulge < 0.0 {
        std::mem::swap(&mut start_angle, &mut end_angle);
    }

    Some(EllipticalArc::circular(center, radius, start_angle, end_angle))
}

/// Angle of `point` around `center` in degrees, in `[0, 360)`.
///
/// Built from `atan` of the slope, which only covers (-90°, 90°), and
/// corrected by quadrant.
fn angle_about(center: Vector2, point: Vector2) -> f64 {
    let dx = point.x - center.x;
    let angle = ((point.y - center.y) / dx).atan().to_degrees();
    if dx < 0.0 {
        180.0 + angle
    } else if angle < 0.0 {
        360.0 + angle
    } else {
        angle
    }
}
