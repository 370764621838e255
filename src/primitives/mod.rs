//! The small geometry toolkit the ornament generators are written against:
//! phase-parameterised circles, helices, index-based loop joining, extrusion of
//! a front face into a solid, and sweeping a circle along a helix.

pub mod circle;
pub mod extrude;
pub mod helix;
pub mod join;
pub mod sweep;

pub use circle::Circle;
pub use extrude::ExtrusionFace;
pub use helix::Helix;
pub use join::{LoopKind, join_points, quad_to_triangles};
pub use sweep::sweep_circle_along_helix;
