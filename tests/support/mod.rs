//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use ornament::{
    float_types::Real,
    mesh::{Mesh, polygon::Polygon},
};
use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt::Debug;

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for v in polygons.iter().flat_map(|p| &p.vertices) {
        for axis in 0..3 {
            bb[axis] = bb[axis].min(v.pos[axis]);
            bb[axis + 3] = bb[axis + 3].max(v.pos[axis]);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

fn key(p: &Point3<Real>) -> [u64; 3] {
    [p.x.to_bits() as u64, p.y.to_bits() as u64, p.z.to_bits() as u64]
}

/// Number of directed triangle edges without a twin running the other way.
/// Zero for a closed, consistently oriented surface.
pub fn open_edges<S: Clone + Send + Sync + Debug>(mesh: &Mesh<S>) -> usize {
    let mut edges: HashMap<([u64; 3], [u64; 3]), usize> = HashMap::new();
    for [a, b, c] in mesh.triangles() {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            *edges.entry((key(&from), key(&to))).or_default() += 1;
        }
    }
    edges
        .iter()
        .filter(|((from, to), count)| edges.get(&(*to, *from)).copied().unwrap_or(0) != **count)
        .count()
}

/// Sum of the areas of the polygons facing -Z, the front of flat ornament.
pub fn front_area<S: Clone + Send + Sync + Debug>(mesh: &Mesh<S>) -> Real {
    mesh.polygons
        .iter()
        .filter(|p| p.plane.normal.z < -0.5)
        .map(|p| p.area())
        .sum()
}
