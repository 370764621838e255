//! Closed planar outlines.
//!
//! Orientation carries meaning downstream: a counter-clockwise outline bounds
//! solid material (an outer perimeter) and a clockwise outline bounds a void
//! (a hole). Orientation is judged in the XY drawing plane, see [`crate::frame`].

use crate::float_types::{Real, tolerance};
use geo::{Area, Coord, LineString, Polygon as GeoPolygon};
use nalgebra::Point3;

/// Winding of a closed outline seen from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Perimeter of solid material.
    CounterClockwise,
    /// Boundary of a hole.
    Clockwise,
}

/// An ordered, closed sequence of points. The closing edge from the last
/// point back to the first is implicit; use [`Outline::closed`] to get the
/// wrapped list.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Point3<Real>>,
}

impl Outline {
    /// Build an outline, dropping consecutive duplicates and a trailing copy
    /// of the first point.
    pub fn new(points: impl IntoIterator<Item = Point3<Real>>) -> Self {
        let eps = tolerance();
        let mut out: Vec<Point3<Real>> = Vec::new();
        for p in points {
            if out.last().is_some_and(|q| (q - p).norm() <= eps) {
                continue;
            }
            out.push(p);
        }
        while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= eps {
            out.pop();
        }
        Outline { points: out }
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points with the first one repeated at the end.
    pub fn closed(&self) -> Vec<Point3<Real>> {
        let mut pts = self.points.clone();
        if let Some(first) = self.points.first() {
            pts.push(*first);
        }
        pts
    }

    /// Same loop, opposite orientation.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Outline { points }
    }

    /// Projection onto the XY plane as a `geo` ring.
    pub fn to_line_string(&self) -> LineString<Real> {
        LineString::new(
            self.closed()
                .iter()
                .map(|p| Coord { x: p.x, y: p.y })
                .collect(),
        )
    }

    /// Signed area in the XY plane, positive for counter-clockwise.
    pub fn signed_area(&self) -> Real {
        GeoPolygon::new(self.to_line_string(), vec![]).signed_area()
    }

    /// `None` for a degenerate (zero-area) outline.
    pub fn winding(&self) -> Option<Winding> {
        let area = self.signed_area();
        if area.abs() <= tolerance() {
            None
        } else if area > 0.0 {
            Some(Winding::CounterClockwise)
        } else {
            Some(Winding::Clockwise)
        }
    }

    /// Returns this outline oriented as requested.
    pub fn oriented(self, winding: Winding) -> Self {
        match self.winding() {
            Some(w) if w != winding => self.reversed(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Outline {
        Outline::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn duplicates_are_collapsed() {
        let o = Outline::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        assert_eq!(o.len(), 3);
        let closed = o.closed();
        assert_eq!(closed.first(), closed.last());
    }

    #[test]
    fn winding_follows_signed_area() {
        let ccw = square();
        assert!((ccw.signed_area() - 1.0).abs() < 1e-12);
        assert_eq!(ccw.winding(), Some(Winding::CounterClockwise));
        assert_eq!(ccw.reversed().winding(), Some(Winding::Clockwise));
        assert_eq!(
            ccw.clone().oriented(Winding::Clockwise).winding(),
            Some(Winding::Clockwise)
        );
    }
}
