//! Solving the two circular arcs of a pointed (or round) arch.
//!
//! Construction after Havemann & Fellner, *Generative Parametric Design of
//! Gothic Window Tracery*. An arch springs from `pL` and `pR`; its left arc is
//! drawn around `mL` and its right arc around `mR`, both with radius
//! `r = |mL - pL|`. The centres sit on the chord, `excess · d` away from the
//! springing point on the opposite side, so `excess = 0.5` gives a round arch,
//! `1.0` an equilateral one and anything above a lancet.

use crate::errors::{GeometryError, Result};
use crate::float_types::{FRAC_PI_2, PI, Real, tolerance};
use crate::frame::Frame;
use crate::outline::Outline;
use crate::primitives::Circle;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Excess of a semicircular arch.
pub const ROUND_EXCESS: Real = 0.5;
/// Excess of the classic equilateral Gothic arch (`r == d`).
pub const EQUILATERAL_EXCESS: Real = 1.0;

/// The two arcs of an arch, sharing the apex.
///
/// `left` runs from the left springing point up to the apex, `right` from
/// the apex down to the right springing point, so `left.last() ==
/// right.first()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arch {
    pub left: Vec<Point3<Real>>,
    pub right: Vec<Point3<Real>>,
    pub left_center: Point3<Real>,
    pub right_center: Point3<Real>,
    pub radius: Real,
    /// Angle swept by each arc, in radians.
    pub sweep: Real,
}

/// Number of samples for an arc sweeping `sweep` radians when a quarter
/// circle gets `resolution` samples. Never less than the two endpoints.
pub fn arc_point_count(sweep: Real, resolution: usize) -> usize {
    let scaled = resolution as Real * sweep / FRAC_PI_2;
    // shave off rounding noise so a full quarter maps to exactly `resolution`
    ((scaled - tolerance()).ceil().max(0.0) as usize).max(2)
}

/// Arc centres for springing points `pl`, `pr` and the given excess.
pub fn arc_centers(
    pl: Point3<Real>,
    pr: Point3<Real>,
    excess: Real,
) -> (Point3<Real>, Point3<Real>) {
    let chord = pr - pl;
    (pl + chord * excess, pr - chord * excess)
}

impl Arch {
    /// Solve the arch with `resolution` samples per quarter circle.
    pub fn solve(
        pl: Point3<Real>,
        pr: Point3<Real>,
        ml: Point3<Real>,
        mr: Point3<Real>,
        resolution: usize,
    ) -> Result<Arch> {
        if resolution == 0 {
            return Err(GeometryError::invalid("resolution", 0.0, "must be at least 1"));
        }
        let solved = Solved::new(pl, pr, ml, mr)?;
        let count = arc_point_count(solved.sweep, resolution);
        Ok(solved.sample(count))
    }

    /// Solve the arch with exactly `count` samples on each arc.
    ///
    /// Used for offset arches, which sweep a smaller angle than the arch they
    /// are offset from but must pair up with it point for point.
    pub fn solve_with_count(
        pl: Point3<Real>,
        pr: Point3<Real>,
        ml: Point3<Real>,
        mr: Point3<Real>,
        count: usize,
    ) -> Result<Arch> {
        if count < 2 {
            return Err(GeometryError::TooFewPoints { expected: 2, found: count });
        }
        Ok(Solved::new(pl, pr, ml, mr)?.sample(count))
    }

    /// The shared top point of both arcs.
    pub fn apex(&self) -> Point3<Real> {
        self.right[0]
    }

    /// Samples per arc (apex included in both).
    pub fn arc_len(&self) -> usize {
        self.left.len()
    }

    /// Apex height above the springing line.
    pub fn rise(&self) -> Real {
        self.apex().y - self.left[0].y
    }

    /// Left arc bottom to top, then right arc top to bottom, apex once.
    pub fn points(&self) -> impl Iterator<Item = Point3<Real>> + '_ {
        self.left.iter().chain(self.right.iter().skip(1)).copied()
    }

    /// Closed window outline `[pR, bottom_right, bottom_left, pL, ..arch..]`,
    /// clockwise for a window whose bottom lies below the springing line.
    pub fn outline(&self, bottom_right: Point3<Real>, bottom_left: Point3<Real>) -> Outline {
        let pr = self.right[self.right.len() - 1];
        Outline::new(
            [pr, bottom_right, bottom_left]
                .into_iter()
                .chain(self.points()),
        )
    }
}

/// Intermediate solution: apex and swept angle, before sampling.
struct Solved {
    left_center: Point3<Real>,
    right_center: Point3<Real>,
    radius: Real,
    apex: Point3<Real>,
    sweep: Real,
}

impl Solved {
    fn new(pl: Point3<Real>, pr: Point3<Real>, ml: Point3<Real>, mr: Point3<Real>) -> Result<Self> {
        if let Some(bad) = [pl, pr, ml, mr]
            .iter()
            .flat_map(|p| p.coords.iter().copied())
            .find(|c| !c.is_finite())
        {
            return Err(GeometryError::invalid("point", bad, "coordinates must be finite"));
        }

        let eps = tolerance();
        let span = pr - pl;
        let chord = span.norm();
        if chord <= eps {
            return Err(GeometryError::invalid("chord", chord, "springing points coincide"));
        }

        let radius = (ml - pl).norm();
        let right_radius = (mr - pr).norm();
        if (radius - right_radius).abs() > eps * radius.max(1.0) {
            return Err(GeometryError::invalid(
                "right_radius",
                right_radius,
                "both arcs must have the same radius",
            ));
        }

        let discriminant = radius - chord / 4.0;
        if discriminant < -eps {
            return Err(GeometryError::ArchInfeasible { radius, chord });
        }

        // centre offset along the chord, as a fraction of it
        let excess = (ml - pl).dot(&span) / (chord * chord);
        if excess < ROUND_EXCESS - eps {
            return Err(GeometryError::invalid(
                "excess",
                excess,
                "arc centres must lie at or beyond the chord midpoint",
            ));
        }
        let rise = (chord * discriminant.max(0.0)).sqrt();
        if !(chord.is_finite() && radius.is_finite() && rise.is_finite()) {
            return Err(GeometryError::NegativeDomain { what: "arch apex height", value: rise });
        }

        let mid = pl + span * 0.5;
        let apex = mid + Vector3::new(0.0, rise, 0.0);
        let sweep = rise.atan2((mid - ml).norm());

        debug!(chord, radius, rise, sweep, "solved arch apex");
        Ok(Solved { left_center: ml, right_center: mr, radius, apex, sweep })
    }

    fn sample(self, count: usize) -> Arch {
        let frame = Frame::xy();
        let left = Circle::new(self.left_center, self.radius);
        let right = Circle::new(self.right_center, self.radius);

        // count >= 2 was checked by both callers
        let mut left_arc: Vec<Point3<Real>> = (0..count)
            .map(|i| left.point(PI - self.sweep * i as Real / (count - 1) as Real, &frame))
            .collect();
        let mut right_arc: Vec<Point3<Real>> = (0..count)
            .rev()
            .map(|i| right.point(self.sweep * i as Real / (count - 1) as Real, &frame))
            .collect();

        // both arcs end exactly on the apex, not merely within rounding of it
        left_arc[count - 1] = self.apex;
        right_arc[0] = self.apex;

        Arch {
            left: left_arc,
            right: right_arc,
            left_center: self.left_center,
            right_center: self.right_center,
            radius: self.radius,
            sweep: self.sweep,
        }
    }
}

/// The parameters that pin down one arch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchParameters {
    /// Left springing point.
    pub p_left: Point3<Real>,
    /// Right springing point.
    pub p_right: Point3<Real>,
    /// Centre offset over chord length, `>= 0.5`.
    pub excess: Real,
    /// Samples per quarter circle.
    pub resolution: usize,
}

impl Default for ArchParameters {
    fn default() -> Self {
        ArchParameters {
            p_left: Point3::new(0.25, 1.333, 0.0),
            p_right: Point3::new(0.75, 1.333, 0.0),
            excess: 1.25,
            resolution: 16,
        }
    }
}

impl ArchParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.excess.is_finite() || self.excess < ROUND_EXCESS {
            return Err(GeometryError::invalid(
                "excess",
                self.excess,
                "must be finite and at least 0.5",
            ));
        }
        Ok(())
    }

    pub fn centers(&self) -> (Point3<Real>, Point3<Real>) {
        arc_centers(self.p_left, self.p_right, self.excess)
    }

    pub fn radius(&self) -> Real {
        (self.p_right - self.p_left).norm() * self.excess
    }

    pub fn solve(&self) -> Result<Arch> {
        self.validate()?;
        let (ml, mr) = self.centers();
        Arch::solve(self.p_left, self.p_right, ml, mr, self.resolution)
    }
}
