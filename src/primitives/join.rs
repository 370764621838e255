//! Triangulating the band between boundary loops by index correspondence.

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use nalgebra::Point3;

/// Whether the last point of each loop connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Rings: the band wraps around.
    Closed,
    /// Open arcs: the band stops at the last index.
    Open,
}

/// Split the quad `a b c d` into the triangles `a b c` and `a c d`.
/// Degenerate halves (collapsed edges) are dropped.
pub fn quad_to_triangles<S: Clone + Send + Sync>(
    a: Point3<Real>,
    b: Point3<Real>,
    c: Point3<Real>,
    d: Point3<Real>,
    metadata: &Option<S>,
) -> Vec<Polygon<S>> {
    [
        Polygon::triangle(a, b, c, metadata.clone()),
        Polygon::triangle(a, c, d, metadata.clone()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Join each pair of consecutive loops with a strip of triangles, pairing
/// point `i` of one loop with point `i` of the next.
///
/// Every loop must have the same number of points; a mismatch is reported as
/// [`GeometryError::CardinalityMismatch`] before any triangle is built.
pub fn join_points<S, L>(
    loops: &[L],
    kind: LoopKind,
    metadata: &Option<S>,
) -> Result<Vec<Polygon<S>>>
where
    S: Clone + Send + Sync,
    L: AsRef<[Point3<Real>]>,
{
    if loops.len() < 2 {
        return Err(GeometryError::TooFewPoints { expected: 2, found: loops.len() });
    }
    let n = loops[0].as_ref().len();
    let min = match kind {
        LoopKind::Closed => 3,
        LoopKind::Open => 2,
    };
    if n < min {
        return Err(GeometryError::TooFewPoints { expected: min, found: n });
    }
    if let Some(bad) = loops.iter().find(|l| l.as_ref().len() != n) {
        return Err(GeometryError::CardinalityMismatch { outer: n, inner: bad.as_ref().len() });
    }

    let edges = match kind {
        LoopKind::Closed => n,
        LoopKind::Open => n - 1,
    };
    let mut out = Vec::with_capacity(2 * edges * (loops.len() - 1));
    for pair in loops.windows(2) {
        let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
        for i in 0..edges {
            let j = (i + 1) % n;
            out.extend(quad_to_triangles(from[i], from[j], to[j], to[i], metadata));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: Real) -> Vec<Point3<Real>> {
        let h = side / 2.0;
        vec![
            Point3::new(-h, -h, 0.0),
            Point3::new(h, -h, 0.0),
            Point3::new(h, h, 0.0),
            Point3::new(-h, h, 0.0),
        ]
    }

    #[test]
    fn closed_band_covers_the_ring_area() {
        let tris = join_points(&[square(2.0), square(1.0)], LoopKind::Closed, &None::<()>).unwrap();
        assert_eq!(tris.len(), 8);
        let area: Real = tris.iter().map(|t| t.area()).sum();
        assert!((area - 3.0).abs() < 1e-12);
    }

    #[test]
    fn open_band_stops_at_the_last_index() {
        let outer = vec![
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let inner = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let tris = join_points(&[outer, inner], LoopKind::Open, &None::<()>).unwrap();
        assert_eq!(tris.len(), 4);
    }

    #[test]
    fn unequal_loops_fail_fast() {
        let mut inner = square(1.0);
        inner.pop();
        let err = join_points(&[square(2.0), inner], LoopKind::Closed, &None::<()>).unwrap_err();
        assert_eq!(err, GeometryError::CardinalityMismatch { outer: 4, inner: 3 });
    }

    #[test]
    fn collapsed_loop_drops_degenerate_halves() {
        let apex = vec![Point3::origin(); 4];
        let tris = join_points(&[apex, square(1.0)], LoopKind::Closed, &None::<()>).unwrap();
        assert_eq!(tris.len(), 4);
    }
}
