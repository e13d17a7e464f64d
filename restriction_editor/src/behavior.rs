//! Ambient effects attached to the drawing surface.

use instant::Instant;

use crate::world::{HitTarget, Scene};

pub const HOVERED: &str = "hover";

/// Slowly pulses whatever's selected, so people notice it. Clicking anywhere restarts the cycle.
pub struct Breathe {
    started: Option<Instant>,
    restarts: usize,
}

impl Breathe {
    /// One full cycle of the pulse, in seconds
    const PERIOD: f64 = 2.0;

    pub fn new() -> Breathe {
        Breathe {
            started: None,
            restarts: 0,
        }
    }

    pub fn attach(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn off(&mut self) {
        self.started = None;
    }

    pub fn restart(&mut self) {
        if self.started.is_some() {
            self.started = Some(Instant::now());
            self.restarts += 1;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.started.is_some()
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// How opaque selected things should be drawn right now, between 0.3 and 1.
    pub fn opacity(&self) -> f64 {
        let started = match self.started {
            Some(x) => x,
            None => {
                return 1.0;
            }
        };
        let phase = started.elapsed().as_secs_f64() / Breathe::PERIOD * std::f64::consts::TAU;
        0.65 + 0.35 * phase.cos()
    }
}

impl Default for Breathe {
    fn default() -> Self {
        Breathe::new()
    }
}

/// Highlights the primitive under the cursor, along with everything else representing the same
/// thing.
pub struct Hover {
    attached: bool,
    hovering: Option<String>,
}

impl Hover {
    pub fn new() -> Hover {
        Hover {
            attached: false,
            hovering: None,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn hovering(&self) -> Option<&String> {
        self.hovering.as_ref()
    }

    pub fn update(&mut self, scene: &mut Scene, target: Option<&HitTarget>) {
        if !self.attached {
            return;
        }
        let key = target.map(|t| t.key());
        if key == self.hovering {
            return;
        }
        scene.clear_class(HOVERED);
        if let Some(ref key) = key {
            scene.set_class(HOVERED, true, |p| &p.target.key() == key);
        }
        self.hovering = key;
    }

    pub fn off(&mut self, scene: &mut Scene) {
        scene.clear_class(HOVERED);
        self.hovering = None;
        self.attached = false;
    }
}

impl Default for Hover {
    fn default() -> Self {
        Hover::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Breathe, Hover, HOVERED};
    use crate::intersection::Vertex;
    use crate::osm::NodeID;
    use crate::world::{HitTarget, Layer, Scene, Shape};
    use geom::{Circle, LonLat, Pt2D};

    #[test]
    fn test_breathe() {
        let mut breathe = Breathe::new();
        assert_eq!(1.0, breathe.opacity());
        // Not attached yet, so nothing to restart
        breathe.restart();
        assert_eq!(0, breathe.restarts());

        breathe.attach();
        breathe.attach();
        breathe.restart();
        assert_eq!(1, breathe.restarts());
        let opacity = breathe.opacity();
        assert!((0.3..=1.0).contains(&opacity));

        breathe.off();
        assert!(!breathe.is_attached());
    }

    #[test]
    fn test_hover() {
        let vertex = HitTarget::Vertex(Vertex {
            id: NodeID(1),
            loc: LonLat::new(0.0, 0.0),
        });
        let mut scene = Scene::new();
        scene.replace_layer(
            Layer::Vertices,
            vec![(
                vertex.clone(),
                Shape::Circle(Circle::new(Pt2D::new(10.0, 10.0), 5.0)),
                Vec::new(),
            )],
        );

        let mut hover = Hover::new();
        hover.update(&mut scene, Some(&vertex));
        assert_eq!(0, scene.with_class(HOVERED).count());

        hover.attach();
        hover.update(&mut scene, Some(&vertex));
        assert_eq!(1, scene.with_class(HOVERED).count());
        assert_eq!(Some(&"n1".to_string()), hover.hovering());
        hover.update(&mut scene, None);
        assert_eq!(0, scene.with_class(HOVERED).count());

        hover.update(&mut scene, Some(&vertex));
        hover.off(&mut scene);
        assert_eq!(0, scene.with_class(HOVERED).count());
        assert!(!hover.is_attached());
    }
}
