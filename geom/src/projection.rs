use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Bounds, LonLat, Pt2D};

/// Width of one slippy-map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// The projection scale that shows the world at some slippy-map zoom level.
pub fn zoom_to_scale(zoom: f64) -> f64 {
    TILE_SIZE * 2.0_f64.powf(zoom) / (2.0 * PI)
}

/// Raw spherical Mercator, scaled and translated into screen pixels. Unlike a map-wide
/// projection, there's no notion of the bounds of the whole map; callers translate the one point
/// they care about into the middle of a small surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mercator {
    scale: f64,
    translate: (f64, f64),
    clip_extent: Option<Bounds>,
}

impl Mercator {
    pub fn new() -> Mercator {
        Mercator {
            scale: 512.0 / PI,
            translate: (0.0, 0.0),
            clip_extent: None,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Mercator {
        self.scale = scale;
        self
    }

    pub fn with_translate(mut self, x: f64, y: f64) -> Mercator {
        self.translate = (x, y);
        self
    }

    pub fn with_clip_extent(mut self, clip: Bounds) -> Mercator {
        self.clip_extent = Some(clip);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translation(&self) -> (f64, f64) {
        self.translate
    }

    pub fn clip_extent(&self) -> Option<&Bounds> {
        self.clip_extent.as_ref()
    }

    pub fn project(&self, gps: LonLat) -> Pt2D {
        let lambda = gps.longitude.to_radians();
        let phi = gps.latitude.to_radians();
        let y = (PI / 4.0 + phi / 2.0).tan().ln();
        Pt2D::new(
            lambda * self.scale + self.translate.0,
            self.translate.1 - y * self.scale,
        )
    }

    pub fn invert(&self, pt: Pt2D) -> LonLat {
        let x = (pt.x() - self.translate.0) / self.scale;
        let y = (self.translate.1 - pt.y()) / self.scale;
        let phi = 2.0 * y.exp().atan() - PI / 2.0;
        LonLat::new(x.to_degrees(), phi.to_degrees())
    }

    /// True if the point is inside the clip extent, or if there's no clip extent.
    pub fn is_visible(&self, pt: Pt2D) -> bool {
        self.clip_extent
            .as_ref()
            .map(|clip| clip.contains(pt))
            .unwrap_or(true)
    }
}

impl Default for Mercator {
    fn default() -> Self {
        Mercator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{zoom_to_scale, Mercator};
    use crate::{LonLat, Pt2D};

    #[test]
    fn test_zoom_to_scale() {
        // Zoom 0 fits the whole world into one tile
        let proj = Mercator::new().with_scale(zoom_to_scale(0.0));
        let west = proj.project(LonLat::new(-180.0, 0.0));
        let east = proj.project(LonLat::new(180.0, 0.0));
        assert!((east.x() - west.x() - 256.0).abs() < 1e-6);

        assert!((zoom_to_scale(24.0) / zoom_to_scale(23.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_and_invert() {
        let proj = Mercator::new()
            .with_scale(zoom_to_scale(17.0))
            .with_translate(100.0, 250.0);
        for gps in [
            LonLat::new(-122.3036, 47.6394),
            LonLat::new(0.0, 0.0),
            LonLat::new(151.2093, -33.8688),
        ] {
            let pt = proj.project(gps);
            assert!(proj.invert(pt).approx_eq(gps, 1e-9));
        }

        // North is up
        let south = proj.project(LonLat::new(0.0, -0.001));
        let north = proj.project(LonLat::new(0.0, 0.001));
        assert!(north.y() < south.y());
        assert!(proj.project(LonLat::new(0.0, 0.0)).approx_eq(Pt2D::new(100.0, 250.0), 1e-9));
    }
}
