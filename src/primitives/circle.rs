//! Circles parameterised by phase.

use crate::errors::{GeometryError, Result};
use crate::float_types::{Real, TAU};
use crate::frame::Frame;
use nalgebra::Point3;

/// A circle of fixed radius around `center`; its plane comes from the
/// [`Frame`] passed at sampling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point3<Real>,
    pub radius: Real,
}

impl Circle {
    pub const fn new(center: Point3<Real>, radius: Real) -> Self {
        Circle { center, radius }
    }

    /// Point at `phase` (radians) in `frame`.
    #[inline]
    pub fn point(&self, phase: Real, frame: &Frame) -> Point3<Real> {
        frame.point(&self.center, self.radius, phase)
    }

    /// `count` points evenly spaced in phase from `from` to `to`, both ends
    /// included. `to < from` walks clockwise.
    pub fn points_in_phase_range(
        &self,
        from: Real,
        to: Real,
        count: usize,
        frame: &Frame,
    ) -> Result<Vec<Point3<Real>>> {
        if count < 2 {
            return Err(GeometryError::TooFewPoints { expected: 2, found: count });
        }
        let step = (to - from) / (count - 1) as Real;
        Ok((0..count)
            .map(|i| {
                // hit the end phase exactly rather than accumulating the step
                let phase = if i == count - 1 { to } else { from + step * i as Real };
                self.point(phase, frame)
            })
            .collect())
    }

    /// `count` points around the full circle, counter-clockwise in `frame`
    /// starting at phase 0, without repeating the first point.
    pub fn points_around(&self, count: usize, frame: &Frame) -> Result<Vec<Point3<Real>>> {
        if count < 3 {
            return Err(GeometryError::TooFewPoints { expected: 3, found: count });
        }
        Ok((0..count)
            .map(|i| self.point(TAU * i as Real / count as Real, frame))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::{FRAC_PI_2, PI};

    #[test]
    fn phase_range_includes_both_ends() {
        let c = Circle::new(Point3::new(1.0, 1.0, 0.0), 2.0);
        let pts = c.points_in_phase_range(PI, FRAC_PI_2, 5, &Frame::xy()).unwrap();
        assert_eq!(pts.len(), 5);
        assert!((pts[0] - Point3::new(-1.0, 1.0, 0.0)).norm() < 1e-12);
        assert!((pts[4] - Point3::new(1.0, 3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn too_few_points_is_an_error() {
        let c = Circle::new(Point3::origin(), 1.0);
        assert_eq!(
            c.points_in_phase_range(0.0, 1.0, 1, &Frame::xy()),
            Err(GeometryError::TooFewPoints { expected: 2, found: 1 })
        );
        assert!(c.points_around(2, &Frame::xy()).is_err());
    }

    #[test]
    fn points_around_stay_on_the_circle() {
        let c = Circle::new(Point3::new(0.0, 0.0, 3.0), 0.5);
        for p in c.points_around(12, &Frame::xy()).unwrap() {
            assert!(((p - c.center).norm() - 0.5).abs() < 1e-12);
        }
    }
}
