use std::fmt;

use anyhow::Result;
use geo::EuclideanDistance;
use serde::{Deserialize, Serialize};

use crate::{Angle, Bounds, Pt2D};

/// An ordered sequence of at least two distinct points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        let pts = Pt2D::dedupe(pts);
        if pts.len() < 2 {
            bail!("Need at least two distinct points for a PolyLine, got {:?}", pts);
        }
        Ok(PolyLine { pts })
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        self.pts[self.pts.len() - 1]
    }

    /// The direction of the first segment.
    pub fn first_angle(&self) -> Angle {
        self.pts[0].angle_to(self.pts[1])
    }

    pub fn length(&self) -> f64 {
        self.pts.windows(2).map(|pair| pair[0].dist_to(pair[1])).sum()
    }

    /// The shortest distance from a point to any segment of this line.
    pub fn dist_to_pt(&self, pt: Pt2D) -> f64 {
        geo::Point::from(pt).euclidean_distance(&self.to_geo())
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    fn to_geo(&self) -> geo::LineString<f64> {
        geo::LineString::from(
            self.pts
                .iter()
                .map(|pt| (pt.x(), pt.y()))
                .collect::<Vec<_>>(),
        )
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}
