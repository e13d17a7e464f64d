//! Draws one intersection into a scene: the vertex, every way meeting there, and the turns from
//! the selected way. Each primitive keeps a reference to what it represents.

use geom::{Angle, Circle, PolyLine, Polygon, Pt2D};

use crate::context::EditorContext;
use crate::intersection::{Intersection, Turn};
use crate::osm::{EntityID, NodeID, HIGHWAY, ONEWAY};
use crate::restriction::is_only_restriction;
use crate::viewport::Viewport;
use crate::world::{HitTarget, Layer, Scene, Shape};
use crate::FieldOptions;

pub fn draw_vertices(
    scene: &mut Scene,
    intersection: &Intersection,
    viewport: &Viewport,
    opts: &FieldOptions,
) {
    let vertex = &intersection.vertex;
    let center = viewport.projection.project(vertex.loc);
    scene.replace_layer(
        Layer::Vertices,
        vec![(
            HitTarget::Vertex(vertex.clone()),
            Shape::Circle(Circle::new(center, opts.vertex_radius)),
            vec![
                "vertex".to_string(),
                "selectable".to_string(),
                vertex.id.to_string(),
            ],
        )],
    );
}

pub fn draw_lines(
    scene: &mut Scene,
    intersection: &Intersection,
    viewport: &Viewport,
    opts: &FieldOptions,
) {
    let mut items = Vec::new();
    for way in &intersection.ways {
        let pts: Vec<Pt2D> = intersection
            .way_points(way)
            .into_iter()
            .map(|gps| viewport.projection.project(gps))
            .collect();
        let line = match PolyLine::new(pts) {
            Ok(line) => line,
            Err(err) => {
                warn!("Not drawing {}: {}", way.key(), err);
                continue;
            }
        };

        let mut classes = vec!["way".to_string(), "line".to_string(), way.key()];
        if way.split.is_some() {
            // So the whole underlying way can be styled together too
            classes.push(way.id.to_string());
        }
        for key in [HIGHWAY, ONEWAY] {
            if let Some(value) = way.tags.get(key) {
                classes.push(format!("tag-{}", key));
                classes.push(format!("tag-{}-{}", key, value));
            }
        }
        items.push((
            HitTarget::Way(way.clone()),
            Shape::Line {
                line,
                width: opts.way_hit_width,
            },
            classes,
        ));
    }
    scene.replace_layer(Layer::Lines, items);
}

/// Draws every turn starting from the highway ending at `from`. With no `from`, this just clears
/// the old turns.
pub fn draw_turns<C: EditorContext>(
    scene: &mut Scene,
    ctx: &C,
    intersection: &Intersection,
    from: Option<NodeID>,
    viewport: &Viewport,
    opts: &FieldOptions,
) {
    let mut items = Vec::new();
    let vertex = viewport.projection.project(intersection.vertex.loc);
    for turn in intersection.turns(from) {
        let to = match intersection.location(turn.to.node) {
            Some(gps) => viewport.projection.project(gps),
            None => {
                warn!("{} goes to a node that isn't part of the intersection", turn);
                continue;
            }
        };
        let angle = if to.approx_eq(vertex, geom::EPSILON_DIST) {
            Angle::ZERO
        } else {
            vertex.angle_to(to)
        };
        let center = if turn.u {
            vertex
        } else {
            vertex.project_away(opts.turn_offset, angle)
        };
        let shape = Polygon::rectangle_centered(center, opts.turn_hit_width, opts.turn_hit_height)
            .rotate(angle);

        let mut classes = vec!["turn".to_string(), turn.key(), icon(ctx, &turn)];
        if turn.is_restricted() {
            classes.push("restricted".to_string());
        }
        if turn.indirect {
            classes.push("indirect".to_string());
        }
        items.push((HitTarget::Turn(turn), Shape::Polygon(shape), classes));
    }
    scene.replace_layer(Layer::Turns, items);
}

/// Like `turn-no-u` or `turn-only`
pub fn icon<C: EditorContext>(ctx: &C, turn: &Turn) -> String {
    let kind = match turn.restriction {
        None => "yes",
        // Only-restrictions to some other way still ban this one
        Some(_) if turn.indirect => "no",
        Some(r) => match ctx.tags(EntityID::Relation(r)) {
            Some(tags) if is_only_restriction(tags) => "only",
            _ => "no",
        },
    };
    if turn.u {
        format!("turn-{}-u", kind)
    } else {
        format!("turn-{}", kind)
    }
}
