//! Turning a triangulated front face plus its boundary loops into a solid.

use crate::errors::{GeometryError, Result};
use crate::float_types::{Real, tolerance};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::outline::{Outline, Winding};
use nalgebra::Vector3;
use std::fmt::Debug;
use tracing::trace;

/// A flat face ready for extrusion.
///
/// - `front`: triangles covering the face (solid area only, holes left open)
/// - `outer`: perimeter loops of the face
/// - `inner`: hole loops of the face
/// - `metadata`: material tag copied onto every generated polygon
#[derive(Debug, Clone)]
pub struct ExtrusionFace<S: Clone> {
    pub front: Vec<Polygon<S>>,
    pub outer: Vec<Outline>,
    pub inner: Vec<Outline>,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> ExtrusionFace<S> {
    /// Sweep the face along `depth`, producing front, back and side walls.
    ///
    /// The front face ends up facing away from `depth` and the back face
    /// towards it, whatever the winding of the given triangles. Side walls face
    /// outwards provided perimeters and holes lie in the XY plane; loop
    /// orientation is normalised here, so callers may pass either winding.
    pub fn extrude(&self, depth: Vector3<Real>) -> Result<Mesh<S>> {
        if depth.norm() <= tolerance() {
            return Err(GeometryError::invalid(
                "depth",
                depth.norm(),
                "extrusion depth must be non-zero",
            ));
        }
        for outline in self.outer.iter().chain(&self.inner) {
            if outline.len() < 3 {
                return Err(GeometryError::TooFewPoints { expected: 3, found: outline.len() });
            }
        }

        let mut polygons = Vec::with_capacity(2 * self.front.len());

        for tri in &self.front {
            let mut front = tri.clone();
            if front.plane.normal.dot(&depth) > 0.0 {
                front.flip();
            }
            let mut back = Polygon::new(
                front
                    .vertices
                    .iter()
                    .rev()
                    .map(|v| {
                        let mut v = *v;
                        v.pos += depth;
                        v
                    })
                    .collect(),
                front.metadata.clone(),
            );
            if back.plane.normal.dot(&depth) < 0.0 {
                back.flip();
            }
            polygons.push(front);
            polygons.push(back);
        }

        // (b - a) x depth points away from the material for a perimeter that
        // winds counter-clockwise when seen from the tip of `depth`.
        let (perimeter, hole) = if depth.z >= 0.0 {
            (Winding::CounterClockwise, Winding::Clockwise)
        } else {
            (Winding::Clockwise, Winding::CounterClockwise)
        };
        let loops = self
            .outer
            .iter()
            .map(|o| o.clone().oriented(perimeter))
            .chain(self.inner.iter().map(|o| o.clone().oriented(hole)));

        for outline in loops {
            let pts = outline.closed();
            for w in pts.windows(2) {
                let (a, b) = (w[0], w[1]);
                polygons.extend(crate::primitives::quad_to_triangles(
                    a,
                    b,
                    b + depth,
                    a + depth,
                    &self.metadata,
                ));
            }
        }

        trace!(
            front = self.front.len(),
            loops = self.outer.len() + self.inner.len(),
            polygons = polygons.len(),
            "extruded face"
        );
        Ok(Mesh::from_polygons(polygons, self.metadata.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{LoopKind, join_points};
    use crate::traits::GeometryOps;
    use nalgebra::Point3;

    fn ring(side: Real) -> Outline {
        let h = side / 2.0;
        Outline::new([
            Point3::new(-h, -h, 0.0),
            Point3::new(h, -h, 0.0),
            Point3::new(h, h, 0.0),
            Point3::new(-h, h, 0.0),
        ])
    }

    #[test]
    fn framed_square_becomes_a_closed_solid() {
        let outer = ring(2.0);
        let inner = ring(1.0);
        let front =
            join_points(&[outer.points(), inner.points()], LoopKind::Closed, &None::<()>).unwrap();
        let face = ExtrusionFace { front, outer: vec![outer], inner: vec![inner], metadata: None };
        let solid = face.extrude(Vector3::new(0.0, 0.0, 0.5)).unwrap();

        // 8 front + 8 back + 2 * 4 outer sides + 2 * 4 inner sides
        assert_eq!(solid.polygons.len(), 32);
        let bb = solid.bounding_box();
        assert!((bb.maxs.z - 0.5).abs() < 1e-12);
        assert!((bb.mins.x + 1.0).abs() < 1e-12);

        // every face points away from the solid's material
        for poly in &solid.polygons {
            let c = poly.vertices.iter().fold(Vector3::zeros(), |acc, v| acc + v.pos.coords) / 3.0;
            let n = poly.plane.normal;
            if n.z.abs() > 0.5 {
                assert_eq!(n.z > 0.0, c.z > 0.25);
            } else {
                let outward_on_perimeter = c.x.abs().max(c.y.abs()) > 0.75;
                assert_eq!(n.dot(&Vector3::new(c.x, c.y, 0.0)) > 0.0, outward_on_perimeter);
            }
        }
    }

    #[test]
    fn zero_depth_is_rejected() {
        let face: ExtrusionFace<()> =
            ExtrusionFace { front: vec![], outer: vec![ring(1.0)], inner: vec![], metadata: None };
        assert!(matches!(
            face.extrude(Vector3::zeros()),
            Err(GeometryError::InvalidParameter { name: "depth", .. })
        ));
    }
}
