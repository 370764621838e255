//! Seashells after Raup's model of shell coiling.
//!
//! A circular generating curve is swept along a logarithmic helix. Three
//! numbers shape the result (names as in Dawkins, *Climbing Mount
//! Improbable*):
//!
//! - `flare` (Raup's `W`): the distance of the generating curve from the
//!   coiling axis grows by this factor every turn; `> 1`.
//! - `verm` (Raup's `D`): ratio of the inner to the outer edge of the shell
//!   cavity, measured from the axis; `0 <= D < 1`.
//! - `spire` (Raup's `T`): tangent of the coiling angle, how far each turn
//!   climbs relative to how far it widens.
//!
//! With `spire` close to zero the coil lies almost flat and consecutive turns
//! run through each other. That geometry is returned as is; only a warning is
//! logged.

use crate::errors::{GeometryError, Result};
use crate::float_types::{PI, Real, TAU, tolerance};
use crate::mesh::Mesh;
use crate::primitives::{Helix, sweep_circle_along_helix};
use std::fmt::Debug;
use tracing::{debug, instrument, warn};

/// Sweep steps per full turn.
pub const STEPS_PER_WINDING: usize = 64;
/// Angle advanced per sweep step.
pub const STEP_SIZE: Real = PI / 32.0;

#[derive(Debug, Clone)]
pub struct ShellParams<S: Clone> {
    pub metadata: Option<S>,
    pub flare: Real,
    pub verm: Real,
    pub spire: Real,
    pub windings: usize,
    /// Points on each cross-section circle
    pub segments: usize,
}

impl<S: Clone> Default for ShellParams<S> {
    fn default() -> Self {
        ShellParams {
            metadata: None,
            flare: 2.0,
            verm: 0.0,
            spire: 3.0,
            windings: 3,
            segments: 100,
        }
    }
}

impl<S: Clone> ShellParams<S> {
    pub fn validate(&self) -> Result<()> {
        if self.flare.is_nan() || self.flare <= 1.0 {
            return Err(GeometryError::invalid("flare", self.flare, "must be greater than 1"));
        }
        if !(0.0..1.0).contains(&self.verm) {
            return Err(GeometryError::invalid("verm", self.verm, "must lie in [0, 1)"));
        }
        if !self.spire.is_finite() {
            return Err(GeometryError::invalid("spire", self.spire, "must be finite"));
        }
        if self.windings == 0 {
            return Err(GeometryError::invalid("windings", 0.0, "must be at least 1"));
        }
        if self.segments < 3 {
            return Err(GeometryError::invalid(
                "segments",
                self.segments as Real,
                "cross-section needs at least 3 points",
            ));
        }
        Ok(())
    }

    /// Number of sweep steps.
    pub const fn step_count(&self) -> usize {
        STEPS_PER_WINDING * self.windings
    }

    /// Distance of the generating curve's centre from the axis:
    /// `a(t) = W^(t/2π) - 1`.
    pub fn spiral_radius(&self, t: Real) -> Real {
        self.flare.powf(t / TAU) - 1.0
    }

    /// Height gained per radian at `t`, so that a full turn climbs `T` times
    /// the widening over that turn. The first turn widens from zero.
    pub fn pitch(&self, t: Real) -> Real {
        let previous = if t > TAU { self.spiral_radius(t - TAU) } else { 0.0 };
        self.spire * (self.spiral_radius(t) - previous).abs() / TAU
    }

    /// Radius of the generating circle, `(1 - D) / (1 + D) · a(t)`.
    pub fn section_radius(&self, t: Real) -> Real {
        (1.0 - self.verm) / (1.0 + self.verm) * self.spiral_radius(t)
    }
}

/// Returns the shell as an open tube, closed only where the first
/// cross-section collapses to a point at the apex.
#[instrument(
    skip(params),
    fields(
        flare = params.flare,
        verm = params.verm,
        spire = params.spire,
        windings = params.windings
    )
)]
pub fn generate_shell<S: Clone + Send + Sync + Debug>(params: &ShellParams<S>) -> Result<Mesh<S>> {
    params.validate()?;
    if params.spire.abs() <= tolerance() {
        warn!(spire = params.spire, "flat coil, turns may intersect");
    }

    let helix = Helix::new(|t: Real| params.spiral_radius(t), |t: Real| params.pitch(t));
    let steps = params.step_count();
    let mesh = sweep_circle_along_helix(
        &helix,
        |t| params.section_radius(t),
        steps,
        STEP_SIZE,
        params.segments,
        params.metadata.clone(),
    )?;
    debug!(steps, triangles = mesh.polygons.len(), "generated shell");
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GeometryOps;

    fn small(windings: usize) -> ShellParams<()> {
        ShellParams { windings, segments: 12, ..Default::default() }
    }

    #[test]
    fn three_windings_take_192_steps() {
        let params = ShellParams::<()>::default();
        assert_eq!(params.step_count(), 192);
        assert!((STEP_SIZE * STEPS_PER_WINDING as Real - TAU).abs() < 1e-12);
    }

    #[test]
    fn first_ring_collapses_into_the_apex() {
        let params = small(1);
        let mesh = generate_shell(&params).unwrap();
        let steps = params.step_count();
        assert_eq!(mesh.polygons.len(), params.segments * (2 * steps - 1));
    }

    #[test]
    fn spiral_grows_by_flare_each_turn() {
        let params = ShellParams::<()>::default();
        let t = 1.3;
        let ratio = (params.spiral_radius(t + TAU) + 1.0) / (params.spiral_radius(t) + 1.0);
        assert!((ratio - params.flare).abs() < 1e-12);
        assert_eq!(params.spiral_radius(0.0), 0.0);
        assert!((params.section_radius(t) - params.spiral_radius(t)).abs() < 1e-12);
    }

    #[test]
    fn height_increases_with_windings() {
        let heights: Vec<Real> = (1..=3)
            .map(|w| {
                let bb = generate_shell(&small(w)).unwrap().bounding_box();
                bb.maxs.y - bb.mins.y
            })
            .collect();
        assert!(heights[0] < heights[1] && heights[1] < heights[2], "{heights:?}");
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let bad = [
            ShellParams::<()> { flare: 1.0, ..Default::default() },
            ShellParams::<()> { verm: 1.0, ..Default::default() },
            ShellParams::<()> { windings: 0, ..Default::default() },
            ShellParams::<()> { segments: 2, ..Default::default() },
        ];
        for params in &bad {
            assert!(matches!(generate_shell(params), Err(GeometryError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn flat_shell_is_still_built() {
        let params = ShellParams::<()> { spire: 0.0, ..small(1) };
        assert!(generate_shell(&params).is_ok());
    }
}
