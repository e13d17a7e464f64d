use serde::{Deserialize, Serialize};

use geom::{trim_f64, Pt2D};

/// ScreenPt is in units of logical pixels, relative to the top-left of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPt {
    pub x: f64,
    pub y: f64,
}

impl ScreenPt {
    pub fn new(x: f64, y: f64) -> ScreenPt {
        ScreenPt { x, y }
    }

    // The geom layer works in pixels too, so this is just a change of type.
    pub fn to_pt(self) -> Pt2D {
        Pt2D::new(self.x, self.y)
    }
}

impl From<Pt2D> for ScreenPt {
    fn from(pt: Pt2D) -> ScreenPt {
        ScreenPt::new(pt.x(), pt.y())
    }
}

/// ScreenDims is in units of logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenDims {
    pub width: f64,
    pub height: f64,
}

impl ScreenDims {
    pub fn new(width: f64, height: f64) -> ScreenDims {
        ScreenDims {
            width: trim_f64(width),
            height: trim_f64(height),
        }
    }

    pub fn zero() -> Self {
        ScreenDims {
            width: 0.0,
            height: 0.0,
        }
    }

    /// A surface that hasn't been laid out yet measures as zero in some direction.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Pt2D {
        Pt2D::new(self.width / 2.0, self.height / 2.0)
    }
}
