//! A tiny scene graph for composing generated pieces.
//!
//! Pieces are unioned by simply grouping them; no boolean operation is ever
//! performed. Repeated pieces (the foils of a rosette, say) are built once and
//! placed with [`Node::Instance`], which shares the geometry behind an `Arc`
//! instead of copying it.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::traits::GeometryOps;
use nalgebra::Matrix4;
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Node<S: Clone + Send + Sync + Debug> {
    Triangle(Polygon<S>),
    Group(Vec<Node<S>>),
    Instance {
        node: Arc<Node<S>>,
        transform: Matrix4<Real>,
    },
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    pub const fn group(children: Vec<Node<S>>) -> Self {
        Node::Group(children)
    }

    pub const fn instance(node: Arc<Node<S>>, transform: Matrix4<Real>) -> Self {
        Node::Instance { node, transform }
    }

    /// Number of triangles after expanding every instance.
    pub fn triangle_count(&self) -> usize {
        match self {
            Node::Triangle(_) => 1,
            Node::Group(children) => children.iter().map(Node::triangle_count).sum(),
            Node::Instance { node, .. } => node.triangle_count(),
        }
    }

    /// Flatten into a single mesh, applying instance transforms.
    pub fn to_mesh(&self) -> Mesh<S> {
        let mut polygons = Vec::with_capacity(self.triangle_count());
        self.collect(&Matrix4::identity(), &mut polygons);
        Mesh::from_polygons(polygons, None)
    }

    fn collect(&self, transform: &Matrix4<Real>, out: &mut Vec<Polygon<S>>) {
        match self {
            Node::Triangle(tri) => {
                if *transform == Matrix4::identity() {
                    out.push(tri.clone());
                } else {
                    let moved = Mesh::from_polygons(vec![tri.clone()], None).transform(transform);
                    out.extend(moved.polygons);
                }
            },
            Node::Group(children) => {
                for child in children {
                    child.collect(transform, out);
                }
            },
            Node::Instance { node, transform: local } => {
                node.collect(&(transform * local), out);
            },
        }
    }
}

impl<S: Clone + Send + Sync + Debug> From<Mesh<S>> for Node<S> {
    fn from(mesh: Mesh<S>) -> Self {
        let triangles = mesh
            .polygons
            .into_iter()
            .flat_map(|poly| {
                if poly.vertices.len() == 3 {
                    vec![poly]
                } else {
                    poly.triangulate()
                        .into_iter()
                        .map(|tri| Polygon::new(tri.to_vec(), poly.metadata.clone()))
                        .collect()
                }
            })
            .map(Node::Triangle)
            .collect();
        Node::Group(triangles)
    }
}

impl<S: Clone + Send + Sync + Debug> GeometryOps for Node<S> {
    /// Wraps the node in an instance; nested instances collapse into one.
    fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        match self {
            Node::Instance { node, transform } => Node::Instance {
                node: Arc::clone(node),
                transform: matrix * transform,
            },
            other => Node::Instance {
                node: Arc::new(other.clone()),
                transform: *matrix,
            },
        }
    }

    fn bounding_box(&self) -> Aabb {
        self.to_mesh().bounding_box()
    }
}
