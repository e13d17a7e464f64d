use serde::{Deserialize, Serialize};

use geom::{zoom_to_scale, Bounds, GPSBounds, LonLat, Mercator, Pt2D};

use crate::ScreenDims;

/// A projection centered on one vertex, and the part of the world it shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub projection: Mercator,
    pub extent: GPSBounds,
    pub dims: ScreenDims,
}

impl Viewport {
    pub fn new(dims: ScreenDims, center: LonLat, zoom: f64) -> Viewport {
        let projection = Mercator::new().with_scale(zoom_to_scale(zoom));
        let projected = projection.project(center);
        let middle = dims.center();
        let projection = projection
            .with_translate(middle.x() - projected.x(), middle.y() - projected.y())
            .with_clip_extent(Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: dims.width,
                max_y: dims.height,
            });

        // Bottom-left and top-right of the surface
        let extent = GPSBounds::from_corners(
            projection.invert(Pt2D::new(0.0, dims.height)),
            projection.invert(Pt2D::new(dims.width, 0.0)),
        );

        Viewport {
            projection,
            extent,
            dims,
        }
    }

    pub fn clip(&self) -> Option<&Bounds> {
        self.projection.clip_extent()
    }

    pub fn center(&self) -> Pt2D {
        self.dims.center()
    }
}
