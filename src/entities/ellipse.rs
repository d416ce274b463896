//! Ellipse entity

use super::{read_normal, read_point, Entity, EntityCommon};
use crate::geometry::EllipticalArc;
use crate::io::dxf::PairContainer;
use crate::types::{Vector2, Vector3};

/// An ellipse or elliptical arc.
///
/// The file stores the parameter angles in radians; they are kept here in
/// degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point (code 10)
    pub center: Vector3,
    /// End of the major axis, relative to the center (code 11)
    pub major_axis: Vector3,
    /// Minor to major axis ratio (code 40)
    pub ratio: f64,
    /// Start parameter in degrees (code 41)
    pub start_angle: f64,
    /// End parameter in degrees (code 42)
    pub end_angle: f64,
    pub normal: Vector3,
}

impl Ellipse {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        Ellipse {
            center: read_point(pairs, 10),
            major_axis: read_point(pairs, 11),
            ratio: pairs.f64_or(40, 1.0),
            start_angle: pairs.f64_or(41, 0.0).to_degrees(),
            end_angle: pairs.f64_or(42, std::f64::consts::TAU).to_degrees(),
            normal: read_normal(pairs),
            common,
        }
    }

    /// True when the parameter range covers a full turn
    pub fn is_closed(&self) -> bool {
        self.end_angle - self.start_angle >= 360.0
    }

    /// True when minor and major axes have the same length
    pub fn is_circular(&self) -> bool {
        self.ratio == 1.0
    }

    pub fn major_radius(&self) -> f64 {
        self.major_axis.xy().length()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.ratio
    }

    /// Angle of the major axis against the X axis, in degrees
    pub fn rotation(&self) -> f64 {
        self.major_axis.xy().angle_degrees()
    }

    /// The major axis turned a quarter counter-clockwise and scaled by the ratio
    pub fn minor_axis(&self) -> Vector2 {
        let major = self.major_axis.xy();
        Vector2::new(-major.y * self.ratio, major.x * self.ratio)
    }

    /// Arc in drawing coordinates, ready for sampling
    pub fn to_arc(&self) -> EllipticalArc {
        EllipticalArc::new(
            self.center.xy(),
            self.major_axis.xy(),
            self.minor_axis(),
            self.start_angle,
            self.end_angle,
        )
    }
}

impl_entity!(Ellipse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityKind;

    fn ellipse(pairs: &[(i32, &str)]) -> Ellipse {
        let pc: PairContainer = pairs.iter().map(|&(c, v)| (c, v.to_string())).collect();
        Ellipse::from_pairs(EntityCommon::new(EntityKind::Ellipse), &pc)
    }

    #[test]
    fn test_full_ellipse_defaults() {
        let e = ellipse(&[(10, "5"), (20, "5"), (11, "0"), (21, "4"), (40, "0.5")]);
        assert!(e.is_closed());
        assert!(!e.is_circular());
        assert_eq!(e.major_radius(), 4.0);
        assert_eq!(e.minor_radius(), 2.0);
        assert!((e.rotation() - 90.0).abs() < 1e-12);
        assert_eq!(e.minor_axis(), Vector2::new(-2.0, 0.0));
    }

    #[test]
    fn test_partial_ellipse_angles_in_degrees() {
        let e = ellipse(&[(11, "2"), (40, "1"), (41, "0"), (42, "1.5707963267948966")]);
        assert!(!e.is_closed());
        assert!((e.end_angle - 90.0).abs() < 1e-12);
    }
}
