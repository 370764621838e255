//! Helices with varying radius and pitch, wound around the +Y axis.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A helix around the Y axis. `radius(t)` is the distance from the axis at
/// turning parameter `t` (radians); `pitch(t)` is the height gained per radian
/// at `t`.
#[derive(Debug, Clone, Copy)]
pub struct Helix<A, B> {
    pub radius: A,
    pub pitch: B,
}

/// One sample of a helix walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixSample {
    /// Turning parameter in radians.
    pub t: Real,
    /// Point on the helix.
    pub position: Point3<Real>,
    /// Unit direction from the axis towards `position`, in the XZ plane.
    pub radial: Vector3<Real>,
}

impl<A, B> Helix<A, B>
where
    A: Fn(Real) -> Real,
    B: Fn(Real) -> Real,
{
    pub fn new(radius: A, pitch: B) -> Self {
        Helix { radius, pitch }
    }

    /// Walk the helix from `t = 0` in `steps` steps of `step_size` radians,
    /// returning `steps + 1` samples.
    ///
    /// Height is integrated step by step, each step gaining
    /// `pitch(t_end) * step_size`.
    pub fn walk(&self, steps: usize, step_size: Real) -> Vec<HelixSample> {
        let mut height = 0.0;
        (0..=steps)
            .map(|k| {
                let t = k as Real * step_size;
                if k > 0 {
                    height += (self.pitch)(t) * step_size;
                }
                let radial = Vector3::new(t.cos(), 0.0, t.sin());
                let position = Point3::new(0.0, height, 0.0) + radial * (self.radius)(t);
                HelixSample { t, position, radial }
            })
            .collect()
    }
}
