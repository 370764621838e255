//! `Mesh` struct and implementations of the `GeometryOps` trait for `Mesh`

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::traits::GeometryOps;
use nalgebra::{Matrix4, Point3, partial_max, partial_min};
use std::{fmt::Debug, sync::OnceLock};

pub mod plane;
pub mod polygon;
pub mod vertex;

use polygon::Polygon;
use vertex::Vertex;

/// A triangle soup: every generator in this crate hands back one of these.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// Planar polygons (triangles, for everything this crate builds)
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon<S>>, metadata: Option<S>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Helper to collect all vertices from the Mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Total triangle count after fan-triangulating every polygon.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// Positions of every triangle, in polygon order.
    pub fn triangles(&self) -> Vec<[Point3<Real>; 3]> {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| [a.pos, b.pos, c.pos])
            .collect()
    }

    /// Total surface area.
    pub fn area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Move the polygons of `other` into this mesh. No boolean operation is
    /// performed: overlapping pieces simply coexist.
    pub fn append(&mut self, mut other: Mesh<S>) {
        self.polygons.append(&mut other.polygons);
        self.invalidate_bounding_box();
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    pub fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}

impl<S: Clone + Send + Sync + Debug> GeometryOps for Mesh<S> {
    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Polygons are rebuilt from the transformed positions, so normals follow
    /// the new winding; a mirroring transform therefore turns solids inside out
    /// and callers should follow it with [`Mesh::inverse`].
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let polygons = self
            .polygons
            .iter()
            .map(|poly| {
                let vertices = poly
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(mat.transform_point(&v.pos), v.normal))
                    .collect();
                Polygon::new(vertices, poly.metadata.clone())
            })
            .collect();

        Mesh::from_polygons(polygons, self.metadata.clone())
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for poly in &self.polygons {
                for v in &poly.vertices {
                    min_x = *partial_min(&min_x, &v.pos.x).unwrap_or(&min_x);
                    min_y = *partial_min(&min_y, &v.pos.y).unwrap_or(&min_y);
                    min_z = *partial_min(&min_z, &v.pos.z).unwrap_or(&min_z);

                    max_x = *partial_max(&max_x, &v.pos.x).unwrap_or(&max_x);
                    max_y = *partial_max(&max_y, &v.pos.y).unwrap_or(&max_y);
                    max_z = *partial_max(&max_z, &v.pos.z).unwrap_or(&max_z);
                }
            }

            // No polygons: a trivial AABB at the origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(
                Point3::new(min_x, min_y, min_z),
                Point3::new(max_x, max_y, max_z),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh<()> {
        let tri = Polygon::triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            None,
        )
        .expect("non-degenerate");
        Mesh::from_polygons(vec![tri], None)
    }

    #[test]
    fn empty_mesh_has_origin_bounds() {
        let mesh: Mesh<()> = Mesh::new();
        let bb = mesh.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::origin());
    }

    #[test]
    fn append_invalidates_bounds() {
        let mut mesh = unit_triangle();
        assert_eq!(mesh.bounding_box().maxs.x, 1.0);
        mesh.append(unit_triangle().translate(2.0, 0.0, 0.0));
        assert_eq!(mesh.bounding_box().maxs.x, 3.0);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn inverse_flips_normals() {
        let mesh = unit_triangle().inverse();
        assert!(mesh.polygons[0].plane.normal.z < 0.0);
    }
}
