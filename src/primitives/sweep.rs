//! Sweeping a circular cross-section along a helix into a tube.

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::frame::Frame;
use crate::mesh::Mesh;
use crate::primitives::{Circle, Helix, LoopKind, join_points};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use tracing::debug;

/// Sweep a circle along `helix` in `steps` fixed angular steps of
/// `step_size` radians, producing an open tube with `steps + 1` rings of
/// `segments` points each.
///
/// The cross-section at turning parameter `t` lies in the plane spanned by the
/// helix's radial direction and the +Y axis, centred on the helix, with radius
/// `section_radius(t)`. Rings of zero radius collapse to a point and the
/// degenerate triangles they would produce are dropped.
///
/// No self-intersection check is made: a nearly flat helix (tiny pitch) with
/// large cross-sections yields overlapping turns, which is the caller's to
/// avoid.
pub fn sweep_circle_along_helix<A, B, R, S>(
    helix: &Helix<A, B>,
    section_radius: R,
    steps: usize,
    step_size: Real,
    segments: usize,
    metadata: Option<S>,
) -> Result<Mesh<S>>
where
    A: Fn(Real) -> Real,
    B: Fn(Real) -> Real,
    R: Fn(Real) -> Real,
    S: Clone + Send + Sync + Debug,
{
    if steps == 0 {
        return Err(GeometryError::TooFewPoints { expected: 2, found: 1 });
    }
    if !(step_size.is_finite() && step_size > 0.0) {
        return Err(GeometryError::invalid("step_size", step_size, "must be positive"));
    }

    let rings = helix
        .walk(steps, step_size)
        .into_iter()
        .map(|sample| {
            let frame = Frame { u: sample.radial, v: Vector3::y() };
            Circle::new(sample.position, section_radius(sample.t)).points_around(segments, &frame)
        })
        .collect::<Result<Vec<Vec<Point3<Real>>>>>()?;

    let polygons = join_points(&rings, LoopKind::Closed, &metadata)?;
    debug!(steps, segments, triangles = polygons.len(), "swept helix tube");

    Ok(Mesh::from_polygons(polygons, metadata))
}
