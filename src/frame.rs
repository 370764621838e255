//! Coordinate frame convention.
//!
//! All geometry lives in one right-handed space with **Y up**. Flat ornament
//! (walls, tracery, rosettes) is drawn in the XY plane at `z = 0` and extruded
//! along +Z, so the visible front face looks towards -Z. Phase `0` of a circle
//! points along `+X` and phase `π/2` along `+Y`.
//!
//! Curves that need a different plane take a [`Frame`] explicitly instead of
//! reaching for shared basis vectors.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// An orthonormal 2D basis embedded in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub u: Vector3<Real>,
    pub v: Vector3<Real>,
}

impl Frame {
    /// The drawing plane of all flat ornament: `u = +X`, `v = +Y`.
    pub fn xy() -> Self {
        Frame { u: Vector3::x(), v: Vector3::y() }
    }

    /// Build a frame from two directions; `v` is re-orthogonalised against `u`.
    /// Returns `None` when the directions are (nearly) parallel.
    pub fn new(u: Vector3<Real>, v: Vector3<Real>) -> Option<Self> {
        let u = u.try_normalize(Real::EPSILON)?;
        let v = (v - u * u.dot(&v)).try_normalize(Real::EPSILON)?;
        Some(Frame { u, v })
    }

    /// Point at `phase` on the circle of `radius` around `center`.
    #[inline]
    pub fn point(&self, center: &Point3<Real>, radius: Real, phase: Real) -> Point3<Real> {
        center + (self.u * phase.cos() + self.v * phase.sin()) * radius
    }

    pub fn normal(&self) -> Vector3<Real> {
        self.u.cross(&self.v)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::xy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::FRAC_PI_2;

    #[test]
    fn xy_frame_is_y_up() {
        let f = Frame::xy();
        let p = f.point(&Point3::origin(), 2.0, FRAC_PI_2);
        assert!((p - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
        assert_eq!(f.normal(), Vector3::z());
    }

    #[test]
    fn new_orthogonalises() {
        let f = Frame::new(Vector3::x(), Vector3::new(1.0, 1.0, 0.0)).expect("not parallel");
        assert!(f.u.dot(&f.v).abs() < 1e-12);
        assert!(Frame::new(Vector3::x(), Vector3::x() * 3.0).is_none());
    }
}
