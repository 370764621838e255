//! Rosettes: a plain ring with `n` foil lobes packed inside its rim.

use crate::errors::{GeometryError, Result};
use crate::float_types::{FRAC_PI_2, PI, Real, TAU};
use crate::frame::Frame;
use crate::gothic::arch::arc_point_count;
use crate::mesh::Mesh;
use crate::outline::Outline;
use crate::primitives::{Circle, ExtrusionFace, LoopKind, join_points};
use crate::scene::Node;
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Where the first foil sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoilOrientation {
    /// A foil points straight up.
    #[default]
    Standing,
    /// Two foils share the top, the layout turned by half a foil.
    Lying,
}

impl FoilOrientation {
    fn start_angle(self, alpha: Real) -> Real {
        match self {
            FoilOrientation::Standing => FRAC_PI_2,
            FoilOrientation::Lying => FRAC_PI_2 + alpha / 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RosetteParams<S: Clone> {
    pub metadata: Option<S>,
    pub center: Point3<Real>,
    /// Outer radius of the ring
    pub radius: Real,
    /// Width of the ring and of every foil band
    pub width: Real,
    pub depth: Real,
    /// Samples per quarter circle
    pub resolution: usize,
    pub num_foils: usize,
    pub orientation: FoilOrientation,
}

impl<S: Clone> Default for RosetteParams<S> {
    fn default() -> Self {
        RosetteParams {
            metadata: None,
            center: Point3::origin(),
            radius: 1.0,
            width: 0.1,
            depth: 0.1,
            resolution: 16,
            num_foils: 4,
            orientation: FoilOrientation::Standing,
        }
    }
}

/// Where the foils of a rosette go.
#[derive(Debug, Clone, PartialEq)]
pub struct RosetteLayout {
    /// Angular spacing `2π / n`.
    pub alpha: Real,
    /// Radius of every foil circle.
    pub foil_radius: Real,
    /// Radius of the circle the foil centres lie on.
    pub packing_radius: Real,
    /// Placement angle of each foil.
    pub placements: Vec<Real>,
}

impl RosetteLayout {
    pub fn foil_center(&self, center: &Point3<Real>, k: usize) -> Point3<Real> {
        Frame::xy().point(center, self.packing_radius, self.placements[k])
    }
}

/// Radius of `n` mutually tangent circles packed inside a circle of
/// `outer_radius`, each touching it: `rF = sin(α/2)·R / (sin(α/2) + 1)`.
pub fn foil_radius(outer_radius: Real, num_foils: usize) -> Real {
    let half = (PI / num_foils as Real).sin();
    half * outer_radius / (half + 1.0)
}

impl<S: Clone> RosetteParams<S> {
    fn validate(&self) -> Result<()> {
        if self.num_foils < 2 {
            return Err(GeometryError::invalid(
                "num_foils",
                self.num_foils as Real,
                "a rosette needs at least two foils",
            ));
        }
        if self.resolution == 0 {
            return Err(GeometryError::invalid("resolution", 0.0, "must be at least 1"));
        }
        if self.width.is_nan() || self.width <= 0.0 {
            return Err(GeometryError::invalid("width", self.width, "must be positive"));
        }
        if self.radius <= self.width {
            return Err(GeometryError::invalid(
                "radius",
                self.radius,
                "ring must be wider than its band",
            ));
        }
        Ok(())
    }

    pub fn layout(&self) -> Result<RosetteLayout> {
        self.validate()?;
        let n = self.num_foils;
        let alpha = TAU / n as Real;
        let rf = foil_radius(self.radius, n);
        if rf <= self.width {
            return Err(GeometryError::DegenerateFoil { foil_radius: rf, width: self.width });
        }
        let start = self.orientation.start_angle(alpha);
        Ok(RosetteLayout {
            alpha,
            foil_radius: rf,
            packing_radius: self.radius - rf,
            placements: (0..n).map(|k| start + k as Real * alpha).collect(),
        })
    }
}

/// Returns a rosette: the ring plus its foils.
///
/// One foil is extruded at the first placement; the others are instances of
/// it rotated about the rosette centre.
#[instrument(skip(params), fields(num_foils = params.num_foils, radius = params.radius))]
pub fn rosette<S: Clone + Send + Sync + Debug>(params: &RosetteParams<S>) -> Result<Node<S>> {
    let layout = params.layout()?;
    let depth = Vector3::new(0.0, 0.0, params.depth);
    let md = &params.metadata;
    let frame = Frame::xy();

    let around = 4 * params.resolution;
    let outer = Circle::new(params.center, params.radius).points_around(around, &frame)?;
    let inner =
        Circle::new(params.center, params.radius - params.width).points_around(around, &frame)?;
    let ring = ExtrusionFace {
        front: join_points(&[&outer, &inner], LoopKind::Closed, md)?,
        outer: vec![Outline::new(outer.iter().copied())],
        inner: vec![Outline::new(inner.iter().rev().copied())],
        metadata: md.clone(),
    }
    .extrude(depth)?;

    let foil = Arc::new(Node::from(foil(params, &layout, depth)?));
    let axis = Vector3::z_axis();
    let to_origin = Translation3::from(-params.center.coords).to_homogeneous();
    let back = Translation3::from(params.center.coords).to_homogeneous();

    let mut children = Vec::with_capacity(layout.placements.len() + 1);
    children.push(Node::from(ring));
    for k in 0..layout.placements.len() {
        let turn = Rotation3::from_axis_angle(&axis, k as Real * layout.alpha).to_homogeneous();
        let transform: Matrix4<Real> = back * turn * to_origin;
        children.push(Node::instance(Arc::clone(&foil), transform));
    }

    debug!(
        foil_radius = layout.foil_radius,
        packing_radius = layout.packing_radius,
        "laid out rosette"
    );
    Ok(Node::group(children))
}

/// The foil at the first placement: a band between two concentric arcs
/// spanning `π + α` around the placement angle.
fn foil<S: Clone + Send + Sync + Debug>(
    params: &RosetteParams<S>,
    layout: &RosetteLayout,
    depth: Vector3<Real>,
) -> Result<Mesh<S>> {
    let frame = Frame::xy();
    let beta = layout.placements[0];
    let half_span = (PI + layout.alpha) / 2.0;
    let (from, to) = (beta - half_span, beta + half_span);
    let count = arc_point_count(PI + layout.alpha, params.resolution);

    let center = layout.foil_center(&params.center, 0);
    let outer = Circle::new(center, layout.foil_radius)
        .points_in_phase_range(from, to, count, &frame)?;
    let inner = Circle::new(center, layout.foil_radius - params.width)
        .points_in_phase_range(from, to, count, &frame)?;

    let outline = Outline::new(outer.iter().chain(inner.iter().rev()).copied());
    ExtrusionFace {
        front: join_points(&[&outer, &inner], LoopKind::Open, &params.metadata)?,
        outer: vec![outline],
        inner: Vec::new(),
        metadata: params.metadata.clone(),
    }
    .extrude(depth)
}
