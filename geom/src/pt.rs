use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{trim_f64, Angle, EPSILON_DIST};

/// A point in screen space, measured in pixels from the top-left corner of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn zero() -> Pt2D {
        Pt2D::new(0.0, 0.0)
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> f64 {
        ((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt()
    }

    pub fn approx_eq(self, other: Pt2D, threshold: f64) -> bool {
        self.dist_to(other) <= threshold
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        // DON'T invert y here
        Angle::new_rads((to.y - self.y).atan2(to.x - self.x))
    }

    pub fn project_away(self, dist: f64, theta: Angle) -> Pt2D {
        let (sin, cos) = theta.radians().sin_cos();
        Pt2D::new(self.x + dist * cos, self.y + dist * sin)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    pub fn rotate_around(self, angle: Angle, pivot: Pt2D) -> Pt2D {
        let (sin, cos) = angle.radians().sin_cos();
        let (dx, dy) = (self.x - pivot.x, self.y - pivot.y);
        Pt2D::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + dx * sin + dy * cos,
        )
    }

    pub fn center(pts: &[Pt2D]) -> Pt2D {
        if pts.is_empty() {
            return Pt2D::zero();
        }
        let len = pts.len() as f64;
        Pt2D::new(
            pts.iter().map(|pt| pt.x).sum::<f64>() / len,
            pts.iter().map(|pt| pt.y).sum::<f64>() / len,
        )
    }

    /// Drops consecutive points that are basically the same.
    pub fn dedupe(pts: Vec<Pt2D>) -> Vec<Pt2D> {
        let mut result: Vec<Pt2D> = Vec::new();
        for pt in pts {
            if result
                .last()
                .map(|last| last.approx_eq(pt, EPSILON_DIST))
                .unwrap_or(false)
            {
                continue;
            }
            result.push(pt);
        }
        result
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", trim_f64(self.x), trim_f64(self.y))
    }
}

impl From<Pt2D> for geo::Point<f64> {
    fn from(pt: Pt2D) -> Self {
        geo::Point::new(pt.x, pt.y)
    }
}
