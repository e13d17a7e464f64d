use serde::{Deserialize, Serialize};

use crate::ScreenDims;

/// Tunable knobs for drawing the intersection. Everything has a default, so a JSON file only
/// needs to mention what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Slippy-map zoom level. Close enough to see a single intersection.
    pub zoom: f64,
    /// How far from the vertex to draw each turn, in pixels, toward the destination node.
    pub turn_offset: f64,
    pub turn_hit_width: f64,
    pub turn_hit_height: f64,
    pub vertex_radius: f64,
    /// How far from the center of a way-line a click still counts, times two.
    pub way_hit_width: f64,
    /// Used when the surface hasn't been laid out yet.
    pub fallback_dims: ScreenDims,
}

impl Default for FieldOptions {
    fn default() -> Self {
        FieldOptions {
            zoom: 24.0,
            turn_offset: 60.0,
            turn_hit_width: 44.0,
            turn_hit_height: 24.0,
            vertex_radius: 8.0,
            way_hit_width: 16.0,
            fallback_dims: ScreenDims::new(400.0, 300.0),
        }
    }
}

impl FieldOptions {
    pub fn load(path: &str) -> anyhow::Result<FieldOptions> {
        abstutil::read_json(path)
    }
}
