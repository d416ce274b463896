//! Elliptical arc shared by circles, ellipses and bulge segments

use crate::types::Vector2;

/// Largest angular step used when sampling, in degrees
pub const MAX_SAMPLE_STEP_DEG: f64 = 20.0;

/// An arc of an ellipse given by its center and the end points of its two
/// semi-axes, relative to the center.
///
/// A point at parameter angle `a` (degrees) is
/// `center + major_axis * cos(a) + minor_axis * sin(a)`, so circles, rotated
/// ellipses and bulge arcs all sample through the same routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub center: Vector2,
    pub major_axis: Vector2,
    pub minor_axis: Vector2,
    /// Start parameter angle in degrees
    pub start_angle: f64,
    /// End parameter angle in degrees
    pub end_angle: f64,
}

impl EllipticalArc {
    pub fn new(
        center: Vector2,
        major_axis: Vector2,
        minor_axis: Vector2,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        EllipticalArc {
            center,
            major_axis,
            minor_axis,
            start_angle,
            end_angle,
        }
    }

    /// Circular arc with axes along X and Y
    pub fn circular(center: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        EllipticalArc::new(
            center,
            Vector2::new(radius, 0.0),
            Vector2::new(0.0, radius),
            start_angle,
            end_angle,
        )
    }

    /// Swept angle, `end - start` plus 360 when the arc wraps past zero
    pub fn total_sweep(&self) -> f64 {
        let sweep = self.end_angle - self.start_angle;
        if self.end_angle < self.start_angle {
            sweep + 360.0
        } else {
            sweep
        }
    }

    /// Point at parameter angle `degrees`
    pub fn point_at(&self, degrees: f64) -> Vector2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.center + self.major_axis * cos + self.minor_axis * sin
    }

    /// Sample the arc from start to end with roughly `step_degrees` between
    /// consecutive points.
    ///
    /// The step is capped at [`MAX_SAMPLE_STEP_DEG`]; a step that is zero at
    /// single precision becomes 1°. The sweep is limited to one full turn,
    /// and a non-finite sweep samples as a single point repeated. At least
    /// two points are produced and the actual step divides the sweep evenly.
    pub fn sample(&self, step_degrees: f64) -> ArcSamples {
        let step = if step_degrees as f32 == 0.0 {
            1.0
        } else {
            step_degrees.min(MAX_SAMPLE_STEP_DEG)
        };
        let sweep = match self.total_sweep() {
            sweep if sweep.is_finite() => sweep.clamp(0.0, 360.0),
            _ => 0.0,
        };
        let count = ((sweep / step).round() as usize).saturating_add(1).max(2);

        ArcSamples {
            arc: *self,
            remaining: count,
            step: sweep / (count - 1) as f64,
            angle: self.start_angle,
        }
    }
}

/// Iterator over sampled arc points, produced by [`EllipticalArc::sample`]
#[derive(Debug, Clone)]
pub struct ArcSamples {
    arc: EllipticalArc,
    remaining: usize,
    step: f64,
    angle: f64,
}

impl Iterator for ArcSamples {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.angle %= 360.0;
        let point = self.arc.point_at(self.angle);
        self.angle += self.step;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ArcSamples {}
