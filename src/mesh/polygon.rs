//! Struct and functions for working with planar `Polygon`s.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type (the material tag of the generators).
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for normals
    pub plane: Plane,

    /// Lazily‑computed axis‑aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices. The plane is fitted to the vertex
    /// loop and every vertex gets the plane normal.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        let normal = plane.normal();
        let vertices = vertices
            .into_iter()
            .map(|v| Vertex::new(v.pos, normal))
            .collect();

        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Build a triangle from three positions, or `None` when its area is
    /// below the crate tolerance (collapsed apexes, coincident samples).
    pub fn triangle(
        a: Point3<Real>,
        b: Point3<Real>,
        c: Point3<Real>,
        metadata: Option<S>,
    ) -> Option<Self> {
        let doubled_area = (b - a).cross(&(c - a)).norm();
        if doubled_area <= tolerance() * tolerance() {
            return None;
        }
        let n = Vector3::zeros();
        Some(Polygon::new(
            vec![Vertex::new(a, n), Vertex::new(b, n), Vertex::new(c, n)],
            metadata,
        ))
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins.x = mins.x.min(v.pos.x);
                mins.y = mins.y.min(v.pos.y);
                mins.z = mins.z.min(v.pos.z);
                maxs.x = maxs.x.max(v.pos.x);
                maxs.y = maxs.y.max(v.pos.y);
                maxs.z = maxs.z.max(v.pos.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
        self.bounding_box = OnceLock::new();
    }

    /// Fan-triangulate this (convex) polygon.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|w| [anchor, w[0], w[1]])
            .collect()
    }

    /// Area of the (planar) polygon.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| 0.5 * (b.pos - a.pos).cross(&(c.pos - a.pos)).norm())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_triangle_is_rejected() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        assert!(Polygon::<()>::triangle(a, b, a, None).is_none());
        assert!(Polygon::<()>::triangle(a, b, Point3::new(2.0, 0.0, 0.0), None).is_none());
    }

    #[test]
    fn flip_reverses_winding_and_normal() {
        let mut tri = Polygon::<()>::triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            None,
        )
        .expect("non-degenerate");
        assert!((tri.plane.normal - Vector3::z()).norm() < 1e-12);
        tri.flip();
        assert!((tri.plane.normal + Vector3::z()).norm() < 1e-12);
        assert_eq!(tri.vertices[0].pos, Point3::new(0.0, 1.0, 0.0));
        assert!((tri.area() - 0.5).abs() < 1e-12);
    }
}
