//! The turn restriction editor itself. Pick a vertex, click one of the roads meeting there, then
//! click the turns from that road to ban or allow them.

use geom::Mercator;

use crate::behavior::{Breathe, Hover};
use crate::context::{EditorContext, HISTORY_CHANGE, RESIZE};
use crate::intersection::{Intersection, Turn};
use crate::osm::{EntityID, NodeID};
use crate::render::{draw_lines, draw_turns, draw_vertices};
use crate::surface::{Surface, CLICK, HOVER, LEAVE};
use crate::viewport::Viewport;
use crate::world::{HitTarget, Layer, Scene};
use crate::{Dispatch, FieldOptions, ScreenPt};

/// Handlers and subscriptions are all registered under this name, so binding again replaces the
/// old ones.
pub const NAMESPACE: &str = "restrictions";
/// The topic on `RestrictionsField::on_change`
pub const CHANGE: &str = "change";
pub const SELECTED: &str = "selected";

pub enum Event {
    Click(ScreenPt),
    Hover(ScreenPt),
    Leave,
    /// The host's graph changed
    GraphChanged,
    /// The container holding the surface changed size
    Resized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    /// The scene was drawn again
    Rendered,
    /// An action was sent to the host
    Performed,
    /// Just the help text changed
    Help,
}

/// Sent to `on_change` listeners after asking the host to toggle a turn.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange {
    pub turn: Turn,
    /// True if the turn was just restricted, false if a restriction was removed
    pub restricted: bool,
    pub annotation: String,
}

pub type ChangeListener = Box<dyn FnMut(&FieldChange)>;

/// What was last drawn
pub struct Rendered {
    pub viewport: Viewport,
    pub intersection: Intersection,
}

pub struct RestrictionsField {
    opts: FieldOptions,
    vertex_id: Option<NodeID>,
    // The highway ending here is the "from" way
    from_node_id: Option<NodeID>,
    initialized: bool,
    breathe: Breathe,
    hover: Hover,
    change: Dispatch<ChangeListener>,
    rendered: Option<Rendered>,
    renders: usize,
}

impl RestrictionsField {
    pub fn new(opts: FieldOptions) -> RestrictionsField {
        RestrictionsField {
            opts,
            vertex_id: None,
            from_node_id: None,
            initialized: false,
            breathe: Breathe::new(),
            hover: Hover::new(),
            change: Dispatch::new(),
            rendered: None,
            renders: 0,
        }
    }

    /// Points the editor at a vertex. Choosing a different vertex forgets the selected road.
    pub fn set_entity(&mut self, id: NodeID) {
        if self.vertex_id != Some(id) {
            self.from_node_id = None;
        }
        self.vertex_id = Some(id);
    }

    /// Restrictions aren't tags, so there's nothing to do here.
    pub fn tags(&mut self) {}

    pub fn focus(&mut self) {}

    pub fn on_change(&mut self, namespace: &str, listener: ChangeListener) {
        self.change.on(CHANGE, namespace, listener);
    }

    pub fn off_change(&mut self, namespace: &str) -> bool {
        self.change.off(CHANGE, namespace)
    }

    /// Draws everything from scratch and makes sure handlers and subscriptions are bound.
    /// Returns true if anything was drawn. When the surface isn't showing, detaches instead.
    pub fn render<C: EditorContext>(&mut self, ctx: &mut C, surface: &mut Surface) -> bool {
        if !surface.in_display_tree() || ctx.inspector_hidden() {
            self.off(ctx, surface);
            return false;
        }
        let vertex_id = match self.vertex_id {
            Some(id) => id,
            None => {
                return false;
            }
        };
        let vertex = match ctx.vertex(vertex_id) {
            Some(v) => v,
            None => {
                debug!("{} is gone, not drawing anything", vertex_id);
                return false;
            }
        };
        let intersection = match ctx.analyze_intersection(vertex_id) {
            Some(i) => i,
            None => {
                warn!("Couldn't figure out the intersection at {}", vertex_id);
                return false;
            }
        };

        let dims = surface.dims(self.opts.fallback_dims);
        let viewport = Viewport::new(dims, vertex.loc, self.opts.zoom);

        let scene = surface.scene_mut();
        draw_vertices(scene, &intersection, &viewport, &self.opts);
        draw_lines(scene, &intersection, &viewport, &self.opts);
        draw_turns(
            scene,
            &*ctx,
            &intersection,
            self.from_node_id,
            &viewport,
            &self.opts,
        );

        // Attach behaviors once. After a detach, they come back on the next render.
        if !self.breathe.is_attached() {
            self.breathe.attach();
        }
        if !self.hover.is_attached() {
            self.hover.attach();
        }
        self.initialized = true;

        apply_selected(scene, &intersection, self.from_node_id);
        scene.finish_pass();

        let handlers = surface.handlers_mut();
        for topic in [CLICK, HOVER, LEAVE] {
            handlers.on(topic, NAMESPACE, ());
        }
        ctx.history().on(HISTORY_CHANGE, NAMESPACE, ());
        ctx.resize_events().on(RESIZE, NAMESPACE, ());

        self.rendered = Some(Rendered {
            viewport,
            intersection,
        });
        self.renders += 1;
        let help = self.neutral_help(&*ctx);
        surface.set_help(help);
        true
    }

    pub fn event<C: EditorContext>(
        &mut self,
        ctx: &mut C,
        surface: &mut Surface,
        ev: Event,
    ) -> Outcome {
        match ev {
            Event::Click(pt) => self.click(ctx, surface, pt),
            Event::Hover(pt) => {
                let target = surface.scene().target_at(pt.to_pt()).cloned();
                self.hover.update(surface.scene_mut(), target.as_ref());
                let help = match target {
                    Some(HitTarget::Turn(turn)) => self.turn_help(&*ctx, &turn),
                    _ => self.neutral_help(&*ctx),
                };
                surface.set_help(help);
                Outcome::Help
            }
            Event::Leave => {
                self.hover.update(surface.scene_mut(), None);
                let help = self.neutral_help(&*ctx);
                surface.set_help(help);
                Outcome::Help
            }
            Event::GraphChanged => {
                let still_exists = self
                    .vertex_id
                    .map(|id| ctx.has_entity(EntityID::Node(id)))
                    .unwrap_or(false);
                if still_exists && self.render(ctx, surface) {
                    Outcome::Rendered
                } else {
                    Outcome::Nothing
                }
            }
            Event::Resized => {
                surface.forget_dims();
                if self.render(ctx, surface) {
                    Outcome::Rendered
                } else {
                    Outcome::Nothing
                }
            }
        }
    }

    /// Unbinds everything and stops the behaviors. Does nothing if the editor never drew
    /// anything.
    pub fn off<C: EditorContext>(&mut self, ctx: &mut C, surface: &mut Surface) {
        if !self.initialized {
            return;
        }
        let handlers = surface.handlers_mut();
        for topic in [CLICK, HOVER, LEAVE] {
            handlers.off(topic, NAMESPACE);
        }
        ctx.history().off(HISTORY_CHANGE, NAMESPACE);
        ctx.resize_events().off(RESIZE, NAMESPACE);
        self.breathe.off();
        self.hover.off(surface.scene_mut());
    }

    fn click<C: EditorContext>(
        &mut self,
        ctx: &mut C,
        surface: &mut Surface,
        pt: ScreenPt,
    ) -> Outcome {
        self.breathe.restart();

        let target = match surface.scene().target_at(pt.to_pt()) {
            Some(t) => t.clone(),
            None => {
                return Outcome::Nothing;
            }
        };
        match target {
            HitTarget::Way(way) => {
                let adjacent = self
                    .rendered
                    .as_ref()
                    .and_then(|r| r.intersection.adjacent_node_id(&way));
                if adjacent.is_none() {
                    warn!("Clicked {}, but it isn't part of the intersection", way.key());
                }
                self.from_node_id = adjacent;
                self.render(ctx, surface);
                Outcome::Rendered
            }
            HitTarget::Turn(turn) => {
                let projection = match self.rendered {
                    Some(ref r) => r.viewport.projection.clone(),
                    None => {
                        return Outcome::Nothing;
                    }
                };
                self.toggle(ctx, turn, &projection);
                Outcome::Performed
            }
            // The vertex isn't adjacent to itself, so this clears the selection
            HitTarget::Vertex(_) => {
                self.from_node_id = None;
                self.render(ctx, surface);
                Outcome::Rendered
            }
        }
    }

    fn toggle<C: EditorContext>(&mut self, ctx: &mut C, turn: Turn, projection: &Mercator) {
        let restricted = !turn.is_restricted();
        let annotation = if turn.is_restricted() {
            let action = ctx.unrestrict_turn(&turn, projection);
            let annotation = ctx.t("operations.restriction.annotation.delete", &[]);
            ctx.perform(action, annotation.clone());
            annotation
        } else {
            let action = ctx.restrict_turn(&turn, projection);
            let annotation = ctx.t("operations.restriction.annotation.create", &[]);
            ctx.perform(action, annotation.clone());
            annotation
        };
        info!("{}: {}", annotation, turn);

        let change = FieldChange {
            turn,
            restricted,
            annotation,
        };
        for listener in self.change.listeners_mut(CHANGE) {
            listener(&change);
        }
    }

    fn turn_help<C: EditorContext>(&self, ctx: &C, turn: &Turn) -> String {
        if let Some(r) = turn.restriction {
            let name = match ctx.match_preset(r) {
                Some(preset) => preset.name,
                None => {
                    warn!("No preset matches {}", r);
                    r.to_string()
                }
            };
            return ctx.t(
                "operations.restriction.help.toggle_off",
                &[("restriction", name.as_str())],
            );
        }

        let projection = match self.rendered {
            Some(ref r) => &r.viewport.projection,
            None => {
                return self.neutral_help(ctx);
            }
        };
        let key = ctx.infer_restriction_type(turn, projection).preset_key();
        let name = match ctx.preset_item(&key) {
            Some(preset) => preset.name,
            None => {
                warn!("No preset named {}", key);
                key
            }
        };
        ctx.t(
            "operations.restriction.help.toggle_on",
            &[("restriction", name.as_str())],
        )
    }

    fn neutral_help<C: EditorContext>(&self, ctx: &C) -> String {
        if self.from_node_id.is_some() {
            ctx.t("operations.restriction.help.toggle", &[])
        } else {
            ctx.t("operations.restriction.help.select", &[])
        }
    }

    pub fn vertex_id(&self) -> Option<NodeID> {
        self.vertex_id
    }

    pub fn from_node_id(&self) -> Option<NodeID> {
        self.from_node_id
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn rendered(&self) -> Option<&Rendered> {
        self.rendered.as_ref()
    }

    /// How many times the scene has been drawn
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn breathe(&self) -> &Breathe {
        &self.breathe
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }

    pub fn options(&self) -> &FieldOptions {
        &self.opts
    }
}

/// Only the lines of the "from" highway are selected. If it disappeared, nothing is.
fn apply_selected(scene: &mut Scene, intersection: &Intersection, from: Option<NodeID>) {
    scene.clear_class(SELECTED);
    if let Some(way) = from.and_then(|n| intersection.highway(n)) {
        let key = way.key();
        scene.set_class(SELECTED, true, |p| {
            p.layer == Layer::Lines && p.has_class(&key)
        });
    }
}
