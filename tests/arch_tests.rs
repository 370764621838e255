use ornament::{
    GeometryError,
    float_types::Real,
    gothic::{Arch, ArchParameters, EQUILATERAL_EXCESS, ROUND_EXCESS, arch::arc_centers},
};
use nalgebra::Point3;

mod support;

use crate::support::approx_eq;

#[test]
fn unit_window_apex_sits_on_the_axis() {
    let arch = ArchParameters::default().solve().unwrap();
    assert!(approx_eq(arch.apex().x, 0.5, 1e-12));
    assert!(arch.apex().y > 1.333);
    assert_eq!(arch.left.last(), arch.right.first());
}

#[test]
fn arcs_approach_the_apex_from_their_own_side() {
    for excess in [0.5, 0.75, 1.0, 1.25, 3.0] {
        let params = ArchParameters { excess, ..Default::default() };
        let arch = params.solve().unwrap();
        let apex = arch.apex();
        assert!(arch.left.iter().all(|p| p.x <= apex.x), "excess {excess}");
        assert!(arch.right.iter().all(|p| p.x >= apex.x), "excess {excess}");
        for w in arch.left.windows(2) {
            assert!(w[1].x > w[0].x && w[1].y > w[0].y, "excess {excess}");
        }
        for w in arch.right.windows(2) {
            assert!(w[1].x > w[0].x && w[1].y < w[0].y, "excess {excess}");
        }
    }
}

#[test]
fn presets_reproduce_the_apex_height_formula() {
    let pl = Point3::new(-1.0, 2.0, 0.0);
    let pr = Point3::new(2.0, 2.0, 0.0);
    let d = (pr - pl).norm();
    for excess in [ROUND_EXCESS, EQUILATERAL_EXCESS] {
        let (ml, mr) = arc_centers(pl, pr, excess);
        let arch = Arch::solve(pl, pr, ml, mr, 12).unwrap();
        let r = excess * d;
        let expected: Real = (d * (r - d / 4.0)).sqrt();
        assert!(approx_eq(arch.rise(), expected, 1e-12), "excess {excess}");
    }
}

#[test]
fn round_arch_is_a_semicircle() {
    let params = ArchParameters { excess: ROUND_EXCESS, ..Default::default() };
    let arch = params.solve().unwrap();
    let center = Point3::new(0.5, 1.333, 0.0);
    for p in arch.points() {
        assert!(approx_eq((p - center).norm(), 0.25, 1e-12));
    }
}

#[test]
fn springing_points_must_differ() {
    let p = Point3::new(1.0, 1.0, 0.0);
    assert!(matches!(
        Arch::solve(p, p, p, p, 8),
        Err(GeometryError::InvalidParameter { name: "chord", .. })
    ));
}
