//! A rectangular wall with an arch-shaped window cut through it.

use crate::errors::{GeometryError, Result};
use crate::float_types::{Real, tolerance};
use crate::gothic::arch::{Arch, EQUILATERAL_EXCESS, ROUND_EXCESS, arc_centers};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::outline::Outline;
use crate::primitives::{ExtrusionFace, quad_to_triangles};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct ArchWindowWallParams<S: Clone> {
    pub metadata: Option<S>,
    /// Corners from lower left to upper left, counter-clockwise
    pub rect: [Point3<Real>; 4],
    /// Centre offset over window width, `>= 0.5`
    pub excess: Real,
    /// Distance between the wall's sides and the window jambs
    pub x_padding: Real,
    /// Height of the window sill
    pub bottom_padding: Real,
    /// Extrusion depth along +Z
    pub depth: Real,
    /// Height of the springing points
    pub spring_height: Real,
    /// Samples per quarter circle
    pub resolution: usize,
}

impl<S: Clone> Default for ArchWindowWallParams<S> {
    fn default() -> Self {
        ArchWindowWallParams {
            metadata: None,
            rect: [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            excess: 1.25,
            x_padding: 0.25,
            bottom_padding: 0.25,
            depth: 0.1,
            spring_height: 1.333,
            resolution: 16,
        }
    }
}

/// The window laid out in the wall, before triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowLayout {
    pub p_left: Point3<Real>,
    pub p_right: Point3<Real>,
    pub bottom_left: Point3<Real>,
    pub bottom_right: Point3<Real>,
    /// Where the sill line meets the wall sides.
    pub sill_left: Point3<Real>,
    pub sill_right: Point3<Real>,
    /// Where the springing line meets the wall sides.
    pub spring_left: Point3<Real>,
    pub spring_right: Point3<Real>,
    /// Midpoint of the wall top, shared by both corner fans.
    pub top_mid: Point3<Real>,
    pub arch: Arch,
    /// Wall perimeter, counter-clockwise, through every point the front
    /// triangles place on it.
    pub wall: Outline,
    /// Window opening, clockwise.
    pub window: Outline,
}

impl<S: Clone> ArchWindowWallParams<S> {
    /// Same wall with a round-headed window.
    pub fn rounded(mut self) -> Self {
        self.excess = ROUND_EXCESS;
        self
    }

    /// Same wall with an equilateral pointed window.
    pub fn equilateral(mut self) -> Self {
        self.excess = EQUILATERAL_EXCESS;
        self
    }

    fn validate(&self) -> Result<()> {
        let [llhc, lrhc, urhc, _] = self.rect;
        let width = lrhc.x - llhc.x;
        let top = urhc.y;
        if width <= tolerance() {
            return Err(GeometryError::invalid("rect", width, "wall must have positive width"));
        }
        if !self.excess.is_finite() || self.excess < ROUND_EXCESS {
            return Err(GeometryError::invalid(
                "excess",
                self.excess,
                "must be finite and at least 0.5",
            ));
        }
        if !(0.0..width / 2.0).contains(&self.x_padding) {
            return Err(GeometryError::invalid(
                "x_padding",
                self.x_padding,
                "must leave a window of positive width",
            ));
        }
        if !(llhc.y..self.spring_height).contains(&self.bottom_padding) {
            return Err(GeometryError::invalid(
                "bottom_padding",
                self.bottom_padding,
                "sill must lie between the wall bottom and the springing line",
            ));
        }
        if self.spring_height >= top {
            return Err(GeometryError::invalid(
                "spring_height",
                self.spring_height,
                "springing line must lie below the wall top",
            ));
        }
        Ok(())
    }

    /// Solve the window geometry.
    pub fn layout(&self) -> Result<WindowLayout> {
        self.validate()?;
        let [llhc, lrhc, urhc, ulhc] = self.rect;
        let z = llhc.z;
        let left_x = llhc.x + self.x_padding;
        let right_x = lrhc.x - self.x_padding;

        let p_left = Point3::new(left_x, self.spring_height, z);
        let p_right = Point3::new(right_x, self.spring_height, z);
        let bottom_left = Point3::new(left_x, self.bottom_padding, z);
        let bottom_right = Point3::new(right_x, self.bottom_padding, z);

        let (ml, mr) = arc_centers(p_left, p_right, self.excess);
        let arch = Arch::solve(p_left, p_right, ml, mr, self.resolution)?;
        if arch.apex().y >= urhc.y {
            return Err(GeometryError::invalid(
                "spring_height",
                self.spring_height,
                "arch apex would break through the wall top",
            ));
        }

        let sill_left = Point3::new(llhc.x, self.bottom_padding, z);
        let sill_right = Point3::new(lrhc.x, self.bottom_padding, z);
        let spring_left = Point3::new(llhc.x, self.spring_height, z);
        let spring_right = Point3::new(lrhc.x, self.spring_height, z);
        let top_mid = ulhc + (urhc - ulhc) * 0.5;

        let window = arch.outline(bottom_right, bottom_left);
        let wall = Outline::new([
            llhc,
            lrhc,
            sill_right,
            spring_right,
            urhc,
            top_mid,
            ulhc,
            spring_left,
            sill_left,
        ]);
        Ok(WindowLayout {
            p_left,
            p_right,
            bottom_left,
            bottom_right,
            sill_left,
            sill_right,
            spring_left,
            spring_right,
            top_mid,
            arch,
            wall,
            window,
        })
    }
}

/// Returns a rectangular wall with an arch window in it.
///
/// The front face is covered by a fan under the sill, two quads beside the
/// lower, straight part of the window and two triangle fans above the
/// springing line, one from each upper wall corner over its half of the arch.
/// Both upper fans end on the midpoint of the wall top, so they meet there
/// regardless of how many arc samples were taken. Every front vertex on the
/// wall edge is also on the wall outline, so the solid has no T-junctions.
#[instrument(skip(params), fields(excess = params.excess, resolution = params.resolution))]
pub fn arch_window_wall<S: Clone + Send + Sync + Debug>(
    params: &ArchWindowWallParams<S>,
) -> Result<Mesh<S>> {
    let layout = params.layout()?;
    let [llhc, lrhc, urhc, ulhc] = params.rect;
    let md = &params.metadata;
    let arch = &layout.arch;
    // the window outline springs from the sampled arc ends
    let arc_left = arch.left[0];
    let arc_right = arch.right[arch.arc_len() - 1];

    let below_sill = [
        lrhc,
        layout.sill_right,
        layout.bottom_right,
        layout.bottom_left,
        layout.sill_left,
    ];
    let mut front = fan(llhc, &below_sill, md);
    front.extend(quad_to_triangles(
        layout.sill_left,
        layout.bottom_left,
        arc_left,
        layout.spring_left,
        md,
    ));
    front.extend(quad_to_triangles(
        layout.bottom_right,
        layout.sill_right,
        layout.spring_right,
        arc_right,
        md,
    ));

    let left_fan: Vec<Point3<Real>> = std::iter::once(layout.spring_left)
        .chain(arch.left.iter().copied())
        .chain(std::iter::once(layout.top_mid))
        .collect();
    let right_fan: Vec<Point3<Real>> = std::iter::once(layout.top_mid)
        .chain(arch.right.iter().copied())
        .chain(std::iter::once(layout.spring_right))
        .collect();
    front.extend(fan(ulhc, &left_fan, md));
    front.extend(fan(urhc, &right_fan, md));

    debug!(
        arc_points = layout.arch.arc_len(),
        front = front.len(),
        window_points = layout.window.len(),
        "triangulated wall front"
    );

    ExtrusionFace {
        front,
        outer: vec![layout.wall],
        inner: vec![layout.window],
        metadata: params.metadata.clone(),
    }
    .extrude(Vector3::new(0.0, 0.0, params.depth))
}

/// Wall with a semicircular window head.
pub fn rounded_arch_window_wall<S: Clone + Send + Sync + Debug>(
    params: &ArchWindowWallParams<S>,
) -> Result<Mesh<S>> {
    arch_window_wall(&params.clone().rounded())
}

/// Wall with an equilateral pointed window head.
pub fn equilateral_arch_window_wall<S: Clone + Send + Sync + Debug>(
    params: &ArchWindowWallParams<S>,
) -> Result<Mesh<S>> {
    arch_window_wall(&params.clone().equilateral())
}

/// Build many independent walls.
#[cfg(not(feature = "parallel"))]
pub fn arch_window_walls<S: Clone + Send + Sync + Debug>(
    params: &[ArchWindowWallParams<S>],
) -> Vec<Result<Mesh<S>>> {
    params.iter().map(arch_window_wall).collect()
}

/// Build many independent walls, one rayon task per wall.
#[cfg(feature = "parallel")]
pub fn arch_window_walls<S: Clone + Send + Sync + Debug>(
    params: &[ArchWindowWallParams<S>],
) -> Vec<Result<Mesh<S>>> {
    params.par_iter().map(arch_window_wall).collect()
}

fn fan<S: Clone + Send + Sync>(
    hub: Point3<Real>,
    rim: &[Point3<Real>],
    metadata: &Option<S>,
) -> Vec<Polygon<S>> {
    rim.windows(2)
        .filter_map(|w| Polygon::triangle(hub, w[0], w[1], metadata.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::Winding;
    use crate::traits::GeometryOps;

    #[test]
    fn window_is_a_hole_in_the_wall() {
        let layout = ArchWindowWallParams::<()>::default().layout().unwrap();
        assert_eq!(layout.wall.winding(), Some(Winding::CounterClockwise));
        assert_eq!(layout.window.winding(), Some(Winding::Clockwise));
        let closed = layout.window.closed();
        assert_eq!(closed.first(), closed.last());
        assert_eq!(closed[0], layout.p_right);
    }

    #[test]
    fn front_face_covers_the_wall_minus_the_window() {
        let params = ArchWindowWallParams::<()>::default();
        let layout = params.layout().unwrap();
        let wall = arch_window_wall(&params).unwrap();

        let front_area: Real = wall
            .polygons
            .iter()
            .filter(|p| p.plane.normal.z < -0.5)
            .map(|p| p.area())
            .sum();
        let expected = layout.wall.signed_area() + layout.window.signed_area();
        assert!((front_area - expected).abs() < 1e-9, "{front_area} vs {expected}");
    }

    #[test]
    fn wall_is_extruded_to_depth() {
        let wall = arch_window_wall(&ArchWindowWallParams::<()>::default()).unwrap();
        let bb = wall.bounding_box();
        assert!((bb.maxs.z - 0.1).abs() < 1e-12);
        assert!((bb.maxs.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn apex_through_the_top_is_rejected() {
        let params = ArchWindowWallParams::<()> { spring_height: 1.9, ..Default::default() };
        assert!(matches!(
            params.layout(),
            Err(GeometryError::InvalidParameter { name: "spring_height", .. })
        ));
    }

    #[test]
    fn infinite_excess_is_rejected() {
        let params = ArchWindowWallParams::<()> { excess: Real::INFINITY, ..Default::default() };
        assert!(matches!(
            arch_window_wall(&params),
            Err(GeometryError::InvalidParameter { name: "excess", .. })
        ));
    }

    #[test]
    fn presets_only_change_excess() {
        let base = ArchWindowWallParams::<()>::default();
        assert_eq!(base.clone().rounded().excess, ROUND_EXCESS);
        assert_eq!(base.clone().equilateral().excess, EQUILATERAL_EXCESS);
        assert!(rounded_arch_window_wall(&base).is_ok());
        assert!(equilateral_arch_window_wall(&base).is_ok());
    }

    #[test]
    fn batch_matches_single_calls() {
        let params = vec![
            ArchWindowWallParams::<()>::default(),
            ArchWindowWallParams::<()>::default().rounded(),
            ArchWindowWallParams::<()> { excess: 0.2, ..Default::default() },
        ];
        let walls = arch_window_walls(&params);
        assert_eq!(walls.len(), 3);
        assert_eq!(
            walls[0].as_ref().map(|m| m.polygons.len()).ok(),
            arch_window_wall(&params[0]).map(|m| m.polygons.len()).ok()
        );
        assert!(walls[2].is_err());
    }
}
