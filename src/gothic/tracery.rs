//! Window tracery: hollow arch frames, two lights and a rosette above them.

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::gothic::arch::{Arch, ROUND_EXCESS, arc_centers};
use crate::gothic::rosette::{FoilOrientation, RosetteParams, rosette};
use crate::mesh::Mesh;
use crate::outline::Outline;
use crate::primitives::{ExtrusionFace, LoopKind, join_points};
use crate::scene::Node;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// One hollow arch frame: the window outline and a copy of it shrunk by
/// `offset`, with the band between them filled.
#[derive(Debug, Clone)]
pub struct EmptyArchTraceryParams<S: Clone> {
    pub metadata: Option<S>,
    /// Centre offset over window width, `>= 0.5`
    pub excess: Real,
    /// Width of the frame, measured inwards
    pub offset: Real,
    pub depth: Real,
    /// Springing points
    pub p_left: Point3<Real>,
    pub p_right: Point3<Real>,
    /// Bottom corners of the window
    pub bottom_left: Point3<Real>,
    pub bottom_right: Point3<Real>,
    /// Samples per quarter circle
    pub resolution: usize,
}

/// Both boundaries of a hollow frame. The two outlines have the same number
/// of points and are paired by index.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceryFrame {
    pub outer_arch: Arch,
    pub inner_arch: Arch,
    pub outer: Outline,
    pub inner: Outline,
}

impl<S: Clone> EmptyArchTraceryParams<S> {
    fn validate(&self) -> Result<()> {
        if !self.excess.is_finite() || self.excess < ROUND_EXCESS {
            return Err(GeometryError::invalid(
                "excess",
                self.excess,
                "must be finite and at least 0.5",
            ));
        }
        if self.offset.is_nan() || self.offset <= 0.0 {
            return Err(GeometryError::invalid("offset", self.offset, "must be positive"));
        }
        let chord = (self.p_right - self.p_left).norm();
        if 2.0 * self.offset >= chord {
            return Err(GeometryError::invalid(
                "offset",
                self.offset,
                "frame is wider than half the window",
            ));
        }
        let springing = self.p_left.y.min(self.p_right.y);
        let height = springing - self.bottom_left.y.max(self.bottom_right.y);
        if self.offset >= height {
            return Err(GeometryError::invalid(
                "offset",
                self.offset,
                "frame is taller than the window jambs",
            ));
        }
        Ok(())
    }

    /// Solve both boundaries.
    ///
    /// The inner arch keeps the outer arch's centres, so each inner arc is a
    /// concentric offset of its outer arc. It sweeps a smaller angle and is
    /// resampled to the outer arc's point count.
    pub fn frame(&self) -> Result<TraceryFrame> {
        self.validate()?;
        let (ml, mr) = arc_centers(self.p_left, self.p_right, self.excess);
        let outer_arch = Arch::solve(self.p_left, self.p_right, ml, mr, self.resolution)?;

        let dx = Vector3::new(self.offset, 0.0, 0.0);
        let up = Vector3::new(0.0, self.offset, 0.0);
        let ipl = self.p_left + dx;
        let ipr = self.p_right - dx;
        let ibpl = self.bottom_left + dx + up;
        let ibpr = self.bottom_right - dx + up;
        let inner_arch = Arch::solve_with_count(ipl, ipr, ml, mr, outer_arch.arc_len())?;

        let outer = outer_arch.outline(self.bottom_right, self.bottom_left);
        let inner = inner_arch.outline(ibpr, ibpl);
        if outer.len() != inner.len() {
            return Err(GeometryError::CardinalityMismatch {
                outer: outer.len(),
                inner: inner.len(),
            });
        }
        Ok(TraceryFrame { outer_arch, inner_arch, outer, inner })
    }
}

/// Returns the hollow outline frame of one arch window.
pub fn empty_arch_window_tracery<S: Clone + Send + Sync + Debug>(
    params: &EmptyArchTraceryParams<S>,
) -> Result<Mesh<S>> {
    let frame = params.frame()?;
    let front = join_points(
        &[frame.outer.points(), frame.inner.points()],
        LoopKind::Closed,
        &params.metadata,
    )?;
    ExtrusionFace {
        front,
        outer: vec![frame.outer],
        inner: vec![frame.inner],
        metadata: params.metadata.clone(),
    }
    .extrude(Vector3::new(0.0, 0.0, params.depth))
}

#[derive(Debug, Clone)]
pub struct ArchWindowTraceryParams<S: Clone> {
    pub metadata: Option<S>,
    /// Centre offset over window width, `>= 0.5`
    pub excess: Real,
    /// Width of the main frame
    pub outer_width: Real,
    /// Width of the lights and the rosette
    pub inner_width: Real,
    /// How far the lights spring below the main arch
    pub vertical_offset: Real,
    pub depth: Real,
    pub p_left: Point3<Real>,
    pub p_right: Point3<Real>,
    pub bottom_left: Point3<Real>,
    pub bottom_right: Point3<Real>,
    /// Samples per quarter circle
    pub resolution: usize,
    /// Foils of the rosette; `0` leaves the rosette out
    pub num_foils: usize,
    pub orientation: FoilOrientation,
}

impl<S: Clone> Default for ArchWindowTraceryParams<S> {
    fn default() -> Self {
        ArchWindowTraceryParams {
            metadata: None,
            excess: 1.0,
            outer_width: 0.05,
            inner_width: 0.03,
            vertical_offset: 0.2,
            depth: 0.05,
            p_left: Point3::new(0.0, 1.0, 0.0),
            p_right: Point3::new(1.0, 1.0, 0.0),
            bottom_left: Point3::new(0.0, 0.0, 0.0),
            bottom_right: Point3::new(1.0, 0.0, 0.0),
            resolution: 16,
            num_foils: 4,
            orientation: FoilOrientation::Standing,
        }
    }
}

/// Every piece of a tracery window, ready to build.
#[derive(Debug, Clone)]
pub struct TraceryLayout<S: Clone> {
    pub main: EmptyArchTraceryParams<S>,
    pub left: EmptyArchTraceryParams<S>,
    pub right: EmptyArchTraceryParams<S>,
    pub rosette: Option<RosetteParams<S>>,
}

impl<S: Clone> ArchWindowTraceryParams<S> {
    fn validate(&self) -> Result<()> {
        if self.inner_width.is_nan() || self.inner_width <= 0.0 {
            return Err(GeometryError::invalid("inner_width", self.inner_width, "must be positive"));
        }
        if self.inner_width > self.outer_width {
            return Err(GeometryError::invalid(
                "inner_width",
                self.inner_width,
                "must not exceed outer_width",
            ));
        }
        if self.vertical_offset.is_nan() || self.vertical_offset < 0.0 {
            return Err(GeometryError::invalid(
                "vertical_offset",
                self.vertical_offset,
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Place the main frame, both lights and the rosette.
    pub fn layout(&self) -> Result<TraceryLayout<S>> {
        self.validate()?;
        let main = EmptyArchTraceryParams {
            metadata: self.metadata.clone(),
            excess: self.excess,
            offset: self.outer_width,
            depth: self.depth,
            p_left: self.p_left,
            p_right: self.p_right,
            bottom_left: self.bottom_left,
            bottom_right: self.bottom_right,
            resolution: self.resolution,
        };

        let inset = Vector3::new(self.outer_width - self.inner_width, 0.0, 0.0);
        let half_mullion = Vector3::new(self.inner_width / 2.0, 0.0, 0.0);
        let drop = Vector3::new(0.0, -self.vertical_offset, 0.0);
        let pm = self.p_left + (self.p_right - self.p_left) * 0.5 + drop;
        let bpm = self.bottom_left + (self.bottom_right - self.bottom_left) * 0.5;

        let left = EmptyArchTraceryParams {
            offset: self.inner_width,
            p_left: self.p_left + drop + inset,
            p_right: pm + half_mullion,
            bottom_left: self.bottom_left + inset,
            bottom_right: bpm + half_mullion,
            ..main.clone()
        };
        let right = EmptyArchTraceryParams {
            offset: self.inner_width,
            p_left: pm - half_mullion,
            p_right: self.p_right + drop - inset,
            bottom_left: bpm - half_mullion,
            bottom_right: self.bottom_right - inset,
            ..main.clone()
        };

        let rosette = if self.num_foils == 0 {
            None
        } else {
            let (center, radius) = self.rosette_placement(&left, pm)?;
            Some(RosetteParams {
                metadata: self.metadata.clone(),
                center,
                radius,
                width: self.inner_width,
                depth: self.depth,
                resolution: self.resolution,
                num_foils: self.num_foils,
                orientation: self.orientation,
            })
        };
        Ok(TraceryLayout { main, left, right, rosette })
    }

    /// Largest circle on the symmetry axis touching the inside of the main
    /// frame and the outside of the left light.
    ///
    /// Its centre is `rR - ρ` from the main right-arc centre `mR` and
    /// `rLR + ρ` from the light's right-arc centre `mLR`, so it lies on the
    /// ellipse with foci `mR`, `mLR` and major axis `rR + rLR`.
    fn rosette_placement(
        &self,
        left: &EmptyArchTraceryParams<S>,
        pm: Point3<Real>,
    ) -> Result<(Point3<Real>, Real)> {
        let (_, mr) = arc_centers(self.p_left, self.p_right, self.excess);
        let rr = (mr - self.p_right).norm() - self.outer_width;
        let (_, mlr) = arc_centers(left.p_left, left.p_right, self.excess);
        let rlr = (mlr - left.p_right).norm();

        let foci = mlr - mr;
        let a = (rr + rlr) / 2.0;
        let c = foci.norm() / 2.0;
        if a <= c {
            return Err(GeometryError::NegativeDomain {
                what: "rosette ellipse",
                value: a * a - c * c,
            });
        }
        let b = (a * a - c * c).sqrt();
        let origin = mr + foci * 0.5;

        // the major axis is along the foci; with both foci coincident any
        // direction serves
        let u = foci.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::x);
        let v = Vector3::new(-u.y, u.x, 0.0);
        let x = pm.x - origin.x;
        let (a2, b2) = (a * a, b * b);
        let qa = u.y * u.y / a2 + v.y * v.y / b2;
        let qb = 2.0 * x * (u.x * u.y / a2 + v.x * v.y / b2);
        let qc = x * x * (u.x * u.x / a2 + v.x * v.x / b2) - 1.0;
        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant < 0.0 {
            return Err(GeometryError::NegativeDomain { what: "rosette axis", value: discriminant });
        }
        let y = (-qb + discriminant.sqrt()) / (2.0 * qa);

        let center = Point3::new(pm.x, origin.y + y, self.p_left.z);
        let radius = rr - (center - mr).norm();
        debug!(x = center.x, y = center.y, radius, "placed rosette");
        Ok((center, radius))
    }
}

/// Returns a two-light tracery window: the main frame, a hollow arch over
/// each light and, unless `num_foils == 0`, a rosette between them.
///
/// The pieces are grouped side by side without any boolean union.
#[instrument(skip(params), fields(excess = params.excess, num_foils = params.num_foils))]
pub fn arch_window_tracery<S: Clone + Send + Sync + Debug>(
    params: &ArchWindowTraceryParams<S>,
) -> Result<Node<S>> {
    let layout = params.layout()?;
    let mut pieces = vec![
        Node::from(empty_arch_window_tracery(&layout.main)?),
        Node::from(empty_arch_window_tracery(&layout.left)?),
        Node::from(empty_arch_window_tracery(&layout.right)?),
    ];
    if let Some(rosette_params) = &layout.rosette {
        pieces.push(rosette(rosette_params)?);
    }
    Ok(Node::group(pieces))
}
