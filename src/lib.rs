//! Procedural ornament as triangle meshes: **Gothic arch windows**, window
//! **tracery** with foiled **rosettes**, and **seashells** after Raup's model
//! of shell coiling.
//!
//! Every generator is a pure function from a plain parameter struct to a
//! [`Mesh`] or a [`Node`] scene graph, reporting infeasible parameters as a
//! [`GeometryError`]. Flat ornament is drawn in the XY plane and extruded
//! along +Z, Y is up ([`frame`]).
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build batches of walls concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod frame;
pub mod gothic;
pub mod mesh;
pub mod outline;
pub mod primitives;
pub mod scene;
pub mod shell;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{GeometryError, Result};
pub use float_types::Real;
pub use mesh::Mesh;
pub use outline::{Outline, Winding};
pub use scene::Node;
pub use shell::{ShellParams, generate_shell};
pub use traits::GeometryOps;
