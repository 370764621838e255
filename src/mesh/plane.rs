//! Supporting plane of a polygon.

use crate::float_types::Real;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A plane in 3D space, `normal · p = w`.
///
/// The normal is unit length unless the defining points were degenerate, in
/// which case it is the zero vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and a point on it.
    pub fn from_normal_and_point(normal: Vector3<Real>, point: &Point3<Real>) -> Self {
        let normal = normal.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros);
        let w = normal.dot(&point.coords);
        Plane { normal, w }
    }

    /// Best-fit plane through a vertex loop using Newell's method, which stays
    /// stable for slightly non-planar or partially collinear loops.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let n = vertices.len();
        if n < 3 {
            return Plane { normal: Vector3::zeros(), w: 0.0 };
        }

        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for i in 0..n {
            let a = vertices[i].pos;
            let b = vertices[(i + 1) % n].pos;
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
            centroid += a.coords;
        }
        centroid /= n as Real;

        Self::from_normal_and_point(normal, &Point3::from(centroid))
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_triangle_faces_plus_z() {
        let verts = [
            Vertex::new(Point3::new(0.0, 0.0, 2.0), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 2.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 2.0), Vector3::z()),
        ];
        let plane = Plane::from_vertices(&verts);
        assert!((plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((plane.w - 2.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_give_zero_normal() {
        let verts = [
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(2.0, 0.0, 0.0), Vector3::z()),
        ];
        assert_eq!(Plane::from_vertices(&verts).normal, Vector3::zeros());
    }
}
