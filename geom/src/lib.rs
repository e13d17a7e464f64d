//! Geometry for drawing and hit-testing one intersection: points and shapes in screen pixels,
//! WGS84 coordinates, and the spherical Mercator projection that maps between them.

#[macro_use]
extern crate anyhow;

mod angle;
mod bounds;
mod circle;
mod gps;
mod polygon;
mod polyline;
mod projection;
mod pt;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::circle::Circle;
pub use crate::gps::{GPSBounds, LonLat};
pub use crate::polygon::Polygon;
pub use crate::polyline::PolyLine;
pub use crate::projection::{zoom_to_scale, Mercator, TILE_SIZE};
pub use crate::pt::Pt2D;

/// Points closer than this many pixels are considered the same.
pub const EPSILON_DIST: f64 = 0.01;

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading). Ideally we'd use some kind of proper
/// fixed-precision type instead of f64.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
