//! Stands in for the host's event loop: owns the context, the surface, and the editor, passes
//! pointer events to whatever handlers are bound, and delivers queued notifications.

use geom::Pt2D;

use crate::context::{EditorContext, HISTORY_CHANGE, RESIZE};
use crate::field::{Event, Outcome, RestrictionsField, NAMESPACE};
use crate::osm::NodeID;
use crate::surface::{Surface, CLICK, HOVER, LEAVE};
use crate::world::{HitTarget, Layer};
use crate::{FieldOptions, ScreenDims, ScreenPt};

pub struct Session<C: EditorContext> {
    pub ctx: C,
    pub surface: Surface,
    pub field: RestrictionsField,
}

impl<C: EditorContext> Session<C> {
    pub fn new(ctx: C, dims: ScreenDims, opts: FieldOptions) -> Session<C> {
        Session {
            ctx,
            surface: Surface::new(dims),
            field: RestrictionsField::new(opts),
        }
    }

    /// Shows the editor for a vertex.
    pub fn select(&mut self, vertex: NodeID) -> bool {
        self.field.set_entity(vertex);
        let drawn = self.field.render(&mut self.ctx, &mut self.surface);
        self.pump();
        drawn
    }

    pub fn render(&mut self) -> bool {
        let drawn = self.field.render(&mut self.ctx, &mut self.surface);
        self.pump();
        drawn
    }

    pub fn click(&mut self, pt: ScreenPt) -> Outcome {
        self.pointer(CLICK, Event::Click(pt))
    }

    pub fn hover(&mut self, pt: ScreenPt) -> Outcome {
        self.pointer(HOVER, Event::Hover(pt))
    }

    pub fn leave(&mut self) -> Outcome {
        self.pointer(LEAVE, Event::Leave)
    }

    /// The host laid the container out again.
    pub fn resize(&mut self, dims: ScreenDims) {
        self.surface.set_measured(dims);
        self.ctx.resize_events().emit(RESIZE);
        self.pump();
    }

    /// Changes something in the host, like undoing, then delivers whatever that caused.
    pub fn update<F: FnOnce(&mut C)>(&mut self, f: F) {
        f(&mut self.ctx);
        self.pump();
    }

    /// The host is done with the editor.
    pub fn detach(&mut self) {
        self.field.off(&mut self.ctx, &mut self.surface);
    }

    /// Delivers every queued history and resize notification to the editor, including the ones
    /// triggered along the way. Returns how many were delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            let mut events = Vec::new();
            for note in self.ctx.history().drain() {
                if note.topic == HISTORY_CHANGE && note.includes(NAMESPACE) {
                    events.push(Event::GraphChanged);
                }
            }
            for note in self.ctx.resize_events().drain() {
                if note.topic == RESIZE && note.includes(NAMESPACE) {
                    events.push(Event::Resized);
                }
            }
            if events.is_empty() {
                return delivered;
            }
            for ev in events {
                self.field.event(&mut self.ctx, &mut self.surface, ev);
                delivered += 1;
            }
        }
    }

    pub fn help(&self) -> &str {
        self.surface.help()
    }

    /// Somewhere to click on a highway, identified like `w5` or `w5-a`. Aims a little way out
    /// from the vertex, so the click doesn't land on the vertex or a turn.
    pub fn locate_way(&self, key: &str) -> Option<ScreenPt> {
        let center = self.vertex_pt()?;
        let line = self.surface.scene().find(|p| {
            p.layer == Layer::Lines && matches!(&p.target, HitTarget::Way(w) if w.key() == key)
        })?;
        Some(line.click_point(center, 30.0).into())
    }

    /// The middle of the turn from the selected highway onto the one ending at `to`.
    pub fn locate_turn(&self, to: NodeID) -> Option<ScreenPt> {
        let turn = self.surface.scene().find(|p| {
            matches!(&p.target, HitTarget::Turn(t) if t.to.node == to)
        })?;
        Some(turn.click_point(Pt2D::zero(), 0.0).into())
    }

    fn vertex_pt(&self) -> Option<Pt2D> {
        let rendered = self.field.rendered()?;
        Some(
            rendered
                .viewport
                .projection
                .project(rendered.intersection.vertex.loc),
        )
    }

    fn pointer(&mut self, topic: &str, ev: Event) -> Outcome {
        if !self.surface.handlers().is_subscribed(topic, NAMESPACE) {
            debug!("Nothing's listening for {}", topic);
            return Outcome::Nothing;
        }
        let outcome = self.field.event(&mut self.ctx, &mut self.surface, ev);
        self.pump();
        outcome
    }
}
