//! Everything drawn on the surface, with enough information to figure out what's under the
//! cursor. Each primitive remembers the entity it represents, so hit-testing hands back that
//! entity directly.

use std::collections::{BTreeMap, BTreeSet};

use aabb_quadtree::QuadTree;

use geom::{Bounds, Circle, PolyLine, Polygon, Pt2D};

use crate::intersection::{Turn, Vertex, Way};

/// What a primitive stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum HitTarget {
    Vertex(Vertex),
    Way(Way),
    Turn(Turn),
}

impl HitTarget {
    /// Primitives with the same key represent the same thing.
    pub fn key(&self) -> String {
        match self {
            HitTarget::Vertex(v) => v.id.to_string(),
            HitTarget::Way(w) => w.key(),
            HitTarget::Turn(t) => t.key(),
        }
    }
}

/// Layers are drawn in this order, so later layers win hit-tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Lines,
    Vertices,
    Turns,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveID(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(Circle),
    /// A stroked line; anything within half the width counts as a hit.
    Line { line: PolyLine, width: f64 },
    Polygon(Polygon),
}

impl Shape {
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        match self {
            Shape::Circle(c) => c.contains_pt(pt),
            Shape::Line { line, width } => line.dist_to_pt(pt) <= width / 2.0,
            Shape::Polygon(p) => p.contains_pt(pt),
        }
    }

    pub fn get_bounds(&self) -> Bounds {
        match self {
            Shape::Circle(c) => c.get_bounds(),
            Shape::Line { line, width } => line.get_bounds().padded(width / 2.0),
            Shape::Polygon(p) => p.get_bounds(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Primitive {
    pub id: PrimitiveID,
    pub layer: Layer,
    pub target: HitTarget,
    pub shape: Shape,
    /// Styling flags, like `selected` or the key of a way
    pub classes: BTreeSet<String>,
}

impl Primitive {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Somewhere a click would land on this primitive. For lines, that's `dist` pixels along
    /// from whichever end is closest to `near`.
    pub fn click_point(&self, near: Pt2D, dist: f64) -> Pt2D {
        match &self.shape {
            Shape::Circle(c) => c.center,
            Shape::Polygon(p) => p.center(),
            Shape::Line { line, .. } => {
                let mut pts = line.points().clone();
                if line.last_pt().dist_to(near) < line.first_pt().dist_to(near) {
                    pts.reverse();
                }
                walk_along(&pts, dist)
            }
        }
    }
}

fn walk_along(pts: &[Pt2D], mut dist: f64) -> Pt2D {
    for pair in pts.windows(2) {
        let len = pair[0].dist_to(pair[1]);
        if dist <= len {
            return pair[0].project_away(dist, pair[0].angle_to(pair[1]));
        }
        dist -= len;
    }
    pts[pts.len() - 1]
}

/// The primitives currently on the surface.
pub struct Scene {
    primitives: BTreeMap<PrimitiveID, Primitive>,
    next_id: usize,
    // Rebuilt whenever primitives change. The quadtree can't handle negative coordinates, so
    // everything is shifted by origin first.
    quadtree: Option<QuadTree<PrimitiveID>>,
    origin: Pt2D,
    generation: usize,
}

impl Scene {
    pub fn new() -> Scene {
        Scene {
            primitives: BTreeMap::new(),
            next_id: 0,
            quadtree: None,
            origin: Pt2D::zero(),
            generation: 0,
        }
    }

    /// Throws away everything in one layer and draws new primitives there.
    pub fn replace_layer(&mut self, layer: Layer, items: Vec<(HitTarget, Shape, Vec<String>)>) {
        self.primitives.retain(|_, p| p.layer != layer);
        for (target, shape, classes) in items {
            let id = PrimitiveID(self.next_id);
            self.next_id += 1;
            self.primitives.insert(
                id,
                Primitive {
                    id,
                    layer,
                    target,
                    shape,
                    classes: classes.into_iter().collect(),
                },
            );
        }
        self.rebuild_index();
    }

    /// Counts how many full render passes have happened.
    pub fn finish_pass(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The topmost primitive under a point.
    pub fn hit_test(&self, pt: Pt2D) -> Option<&Primitive> {
        let quadtree = self.quadtree.as_ref()?;
        let query = Bounds::from(&[pt]).padded(1.0).as_bbox(self.origin);
        let mut hits: Vec<&Primitive> = Vec::new();
        for &(id, _, _) in &quadtree.query(query) {
            if let Some(p) = self.primitives.get(id) {
                if p.shape.contains_pt(pt) {
                    hits.push(p);
                }
            }
        }
        hits.into_iter().max_by_key(|p| (p.layer, p.id))
    }

    pub fn target_at(&self, pt: Pt2D) -> Option<&HitTarget> {
        self.hit_test(pt).map(|p| &p.target)
    }

    pub fn get(&self, id: PrimitiveID) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.values()
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> {
        self.primitives.values().filter(move |p| p.layer == layer)
    }

    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.primitives.values().filter(move |p| p.has_class(class))
    }

    pub fn find<F: Fn(&Primitive) -> bool>(&self, pred: F) -> Option<&Primitive> {
        self.primitives.values().find(|p| pred(p))
    }

    /// Turns a class on or off for every primitive matching a predicate. Returns how many
    /// matched.
    pub fn set_class<F: Fn(&Primitive) -> bool>(
        &mut self,
        class: &str,
        on: bool,
        pred: F,
    ) -> usize {
        let mut count = 0;
        for p in self.primitives.values_mut() {
            if !pred(p) {
                continue;
            }
            count += 1;
            if on {
                p.classes.insert(class.to_string());
            } else {
                p.classes.remove(class);
            }
        }
        count
    }

    pub fn clear_class(&mut self, class: &str) {
        self.set_class(class, false, |_| true);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn rebuild_index(&mut self) {
        if self.primitives.is_empty() {
            self.quadtree = None;
            return;
        }
        let mut bounds = Bounds::new();
        for p in self.primitives.values() {
            bounds.union(p.shape.get_bounds());
        }
        let bounds = bounds.padded(1.0);
        self.origin = Pt2D::new(bounds.min_x, bounds.min_y);

        let mut quadtree = QuadTree::default(bounds.as_bbox(self.origin));
        for p in self.primitives.values() {
            quadtree.insert_with_box(p.id, p.shape.get_bounds().as_bbox(self.origin));
        }
        self.quadtree = Some(quadtree);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{HitTarget, Layer, Scene, Shape};
    use crate::intersection::{Turn, TurnLeg, Vertex, Way};
    use crate::osm::{NodeID, Tags, WayID};
    use geom::{Circle, LonLat, PolyLine, Polygon, Pt2D};

    fn vertex() -> Vertex {
        Vertex {
            id: NodeID(1),
            loc: LonLat::new(0.0, 0.0),
        }
    }

    fn way() -> Way {
        Way {
            id: WayID(5),
            split: None,
            nodes: vec![NodeID(1), NodeID(2)],
            tags: Tags::empty(),
        }
    }

    fn turn() -> Turn {
        let leg = TurnLeg {
            node: NodeID(2),
            way: WayID(5),
        };
        Turn {
            from: leg,
            via: NodeID(1),
            to: leg,
            u: true,
            restriction: None,
            indirect: false,
        }
    }

    fn line_shape() -> Shape {
        Shape::Line {
            line: PolyLine::new(vec![Pt2D::new(-50.0, 100.0), Pt2D::new(300.0, 100.0)]).unwrap(),
            width: 16.0,
        }
    }

    #[test]
    fn test_topmost_wins() {
        let mut scene = Scene::new();
        scene.replace_layer(
            Layer::Lines,
            vec![(HitTarget::Way(way()), line_shape(), vec!["w5".to_string()])],
        );
        scene.replace_layer(
            Layer::Vertices,
            vec![(
                HitTarget::Vertex(vertex()),
                Shape::Circle(Circle::new(Pt2D::new(100.0, 100.0), 8.0)),
                Vec::new(),
            )],
        );
        scene.replace_layer(
            Layer::Turns,
            vec![(
                HitTarget::Turn(turn()),
                Shape::Polygon(Polygon::rectangle_centered(Pt2D::new(160.0, 100.0), 44.0, 24.0)),
                Vec::new(),
            )],
        );

        assert!(matches!(scene.target_at(Pt2D::new(100.0, 103.0)), Some(HitTarget::Vertex(_))));
        assert!(matches!(scene.target_at(Pt2D::new(170.0, 100.0)), Some(HitTarget::Turn(_))));
        assert!(matches!(scene.target_at(Pt2D::new(-20.0, 105.0)), Some(HitTarget::Way(_))));
        assert!(scene.target_at(Pt2D::new(100.0, 200.0)).is_none());
    }

    #[test]
    fn test_replace_and_classes() {
        let mut scene = Scene::new();
        for _ in 0..3 {
            scene.replace_layer(
                Layer::Lines,
                vec![(HitTarget::Way(way()), line_shape(), vec!["w5".to_string()])],
            );
        }
        // No accumulation
        assert_eq!(1, scene.len());

        assert_eq!(1, scene.set_class("selected", true, |p| p.has_class("w5")));
        assert_eq!(1, scene.with_class("selected").count());
        scene.clear_class("selected");
        assert_eq!(0, scene.with_class("selected").count());

        scene.replace_layer(Layer::Lines, Vec::new());
        assert!(scene.is_empty());
        assert!(scene.hit_test(Pt2D::new(0.0, 100.0)).is_none());
    }

    #[test]
    fn test_click_point() {
        let mut scene = Scene::new();
        scene.replace_layer(
            Layer::Lines,
            vec![(HitTarget::Way(way()), line_shape(), Vec::new())],
        );
        let line = scene.layer(Layer::Lines).next().unwrap();
        let pt = line.click_point(Pt2D::new(290.0, 100.0), 30.0);
        assert!(pt.approx_eq(Pt2D::new(270.0, 100.0), 1e-9));
        assert!(matches!(scene.target_at(pt), Some(HitTarget::Way(_))));
    }
}
