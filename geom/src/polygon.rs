use std::fmt;

use geo::Contains;
use serde::{Deserialize, Serialize};

use crate::{Angle, Bounds, Pt2D};

/// A simple polygon without holes. The ring is implicitly closed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pts: Vec<Pt2D>,
}

impl Polygon {
    pub fn new(pts: Vec<Pt2D>) -> Polygon {
        Polygon { pts }
    }

    /// An axis-aligned rectangle centered on a point.
    pub fn rectangle_centered(center: Pt2D, width: f64, height: f64) -> Polygon {
        let (dx, dy) = (width / 2.0, height / 2.0);
        Polygon::new(vec![
            center.offset(-dx, -dy),
            center.offset(dx, -dy),
            center.offset(dx, dy),
            center.offset(-dx, dy),
        ])
    }

    pub fn rotate_around(&self, angle: Angle, pivot: Pt2D) -> Polygon {
        Polygon::new(
            self.pts
                .iter()
                .map(|pt| pt.rotate_around(angle, pivot))
                .collect(),
        )
    }

    pub fn rotate(&self, angle: Angle) -> Polygon {
        self.rotate_around(angle, self.center())
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Polygon {
        Polygon::new(self.pts.iter().map(|pt| pt.offset(dx, dy)).collect())
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn center(&self) -> Pt2D {
        Pt2D::center(&self.pts)
    }

    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        if self.pts.len() < 3 {
            return false;
        }
        self.to_geo().contains(&geo::Point::from(pt))
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    fn to_geo(&self) -> geo::Polygon<f64> {
        let mut coords: Vec<(f64, f64)> = self.pts.iter().map(|pt| (pt.x(), pt.y())).collect();
        if let Some(first) = coords.first().cloned() {
            coords.push(first);
        }
        geo::Polygon::new(geo::LineString::from(coords), Vec::new())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Polygon with {} points", self.pts.len())?;
        for pt in &self.pts {
            writeln!(f, "  {}", pt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Polygon;
    use crate::{Angle, Pt2D};

    #[test]
    fn test_rotated_rectangle() {
        let rect = Polygon::rectangle_centered(Pt2D::new(100.0, 100.0), 40.0, 10.0);
        assert!(rect.contains_pt(Pt2D::new(118.0, 100.0)));
        assert!(!rect.contains_pt(Pt2D::new(100.0, 118.0)));

        let rotated = rect.rotate(Angle::degrees(90.0));
        assert!(!rotated.contains_pt(Pt2D::new(118.0, 100.0)));
        assert!(rotated.contains_pt(Pt2D::new(100.0, 118.0)));
        assert!(rotated.center().approx_eq(Pt2D::new(100.0, 100.0), 1e-9));
    }
}
