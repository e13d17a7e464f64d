use anyhow::Result;

use geom::Mercator;

use crate::context::{EditorContext, HISTORY_CHANGE};
use crate::intersection::{Intersection, Turn, Vertex};
use crate::locale::Translations;
use crate::memory::actions::MemoryAction;
use crate::memory::analyze::analyze;
use crate::memory::graph::MemoryGraph;
use crate::memory::infer::infer_restriction;
use crate::osm::{EntityID, NodeID, RelationID, Tags};
use crate::presets::{Preset, Presets};
use crate::{Dispatch, RestrictionType};

/// An editor host keeping everything in memory, with unlimited undo.
pub struct MemoryContext {
    // Every version of the graph. Undoing just moves back through these.
    versions: Vec<MemoryGraph>,
    current: usize,
    performed: Vec<(MemoryAction, String)>,
    presets: Presets,
    history: Dispatch,
    resize_events: Dispatch,
    inspector_hidden: bool,
}

impl MemoryContext {
    pub fn new(graph: MemoryGraph) -> MemoryContext {
        MemoryContext {
            versions: vec![graph],
            current: 0,
            performed: Vec::new(),
            presets: Presets::restrictions(Translations::english()),
            history: Dispatch::new(),
            resize_events: Dispatch::new(),
            inspector_hidden: false,
        }
    }

    pub fn load(path: &str) -> Result<MemoryContext> {
        Ok(MemoryContext::new(MemoryGraph::load(path)?))
    }

    pub fn graph(&self) -> &MemoryGraph {
        &self.versions[self.current]
    }

    /// Every action successfully performed, with its description, even ones later undone.
    pub fn performed(&self) -> &Vec<(MemoryAction, String)> {
        &self.performed
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.versions.len()
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current -= 1;
        self.history.emit(HISTORY_CHANGE);
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current += 1;
        self.history.emit(HISTORY_CHANGE);
        true
    }

    pub fn delete_node(&mut self, id: NodeID) {
        let annotation = self.t("operations.delete.annotation.point", &[]);
        self.perform(MemoryAction::DeleteNode(id), annotation);
    }

    pub fn set_inspector_hidden(&mut self, hidden: bool) {
        self.inspector_hidden = hidden;
    }

    /// How many restriction relations exist right now
    pub fn num_restrictions(&self) -> usize {
        self.graph()
            .relations
            .values()
            .filter(|r| r.is_restriction())
            .count()
    }
}

impl EditorContext for MemoryContext {
    type Action = MemoryAction;

    fn has_entity(&self, id: EntityID) -> bool {
        self.graph().has_entity(id)
    }

    fn vertex(&self, id: NodeID) -> Option<Vertex> {
        self.graph()
            .nodes
            .get(&id)
            .map(|n| Vertex { id, loc: n.loc })
    }

    fn tags(&self, id: EntityID) -> Option<&Tags> {
        self.graph().tags(id)
    }

    fn analyze_intersection(&self, vertex: NodeID) -> Option<Intersection> {
        analyze(self.graph(), vertex)
    }

    fn infer_restriction_type(&self, turn: &Turn, projection: &Mercator) -> RestrictionType {
        let nodes = &self.graph().nodes;
        let pt = |id: NodeID| nodes.get(&id).map(|n| projection.project(n.loc));
        match (pt(turn.from.node), pt(turn.via), pt(turn.to.node)) {
            (Some(from), Some(via), Some(to)) => {
                infer_restriction(from, via, to, turn.from.way == turn.to.way, turn.u)
            }
            _ => {
                warn!("{} uses missing nodes, guessing it goes straight", turn);
                RestrictionType::NoStraightOn
            }
        }
    }

    fn restrict_turn(&self, turn: &Turn, projection: &Mercator) -> MemoryAction {
        MemoryAction::RestrictTurn {
            turn: turn.clone(),
            restriction: self.infer_restriction_type(turn, projection),
        }
    }

    fn unrestrict_turn(&self, turn: &Turn, _: &Mercator) -> MemoryAction {
        MemoryAction::UnrestrictTurn { turn: turn.clone() }
    }

    fn perform(&mut self, action: MemoryAction, annotation: String) {
        let graph = match action.apply(self.graph()) {
            Ok(g) => g,
            Err(err) => {
                warn!("{} failed: {}", annotation, err);
                return;
            }
        };
        // Doing something new forgets anything that could've been redone
        self.versions.truncate(self.current + 1);
        self.versions.push(graph);
        self.current += 1;
        info!("{}", annotation);
        self.performed.push((action, annotation));
        self.history.emit(HISTORY_CHANGE);
    }

    fn match_preset(&self, relation: RelationID) -> Option<Preset> {
        let tags = self.graph().tags(EntityID::Relation(relation))?;
        self.presets.match_relation(tags).cloned()
    }

    fn preset_item(&self, key: &str) -> Option<Preset> {
        self.presets.item(key).cloned()
    }

    fn history(&mut self) -> &mut Dispatch {
        &mut self.history
    }

    fn resize_events(&mut self) -> &mut Dispatch {
        &mut self.resize_events
    }

    fn inspector_hidden(&self) -> bool {
        self.inspector_hidden
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryContext;
    use crate::context::{EditorContext, HISTORY_CHANGE};
    use crate::memory::MemoryGraph;
    use crate::osm::{EntityID, NodeID, RelationID};

    fn ctx() -> MemoryContext {
        MemoryContext::new(
            MemoryGraph::parse(
                br#"{
                    "nodes": [
                        {"id": 1, "lon": 0.0, "lat": 0.0},
                        {"id": 2, "lon": 0.0, "lat": 0.001}
                    ],
                    "ways": [{"id": 10, "nodes": [2, 1], "tags": {"highway": "residential"}}],
                    "relations": [{
                        "id": 5,
                        "tags": {"type": "restriction", "restriction": "no_u_turn"},
                        "members": [
                            {"type": "way", "ref": 10, "role": "from"},
                            {"type": "node", "ref": 1, "role": "via"},
                            {"type": "way", "ref": 10, "role": "to"}
                        ]
                    }]
                }"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_undo_redo() {
        let mut ctx = ctx();
        ctx.history().on(HISTORY_CHANGE, "test", ());
        assert!(!ctx.undo());

        ctx.delete_node(NodeID(1));
        assert!(!ctx.has_entity(EntityID::Node(NodeID(1))));
        assert_eq!(1, ctx.performed().len());
        assert_eq!("Deleted a point.", ctx.performed()[0].1);

        assert!(ctx.undo());
        assert!(ctx.has_entity(EntityID::Node(NodeID(1))));
        assert!(ctx.redo());
        assert!(!ctx.redo());
        assert!(!ctx.has_entity(EntityID::Node(NodeID(1))));
        assert_eq!(3, ctx.history().drain().len());

        // Failures don't change anything or notify anyone
        ctx.delete_node(NodeID(1));
        assert_eq!(1, ctx.performed().len());
        assert!(ctx.history().drain().is_empty());
    }

    #[test]
    fn test_presets() {
        let ctx = ctx();
        assert_eq!("No U-turn", ctx.match_preset(RelationID(5)).unwrap().name);
        assert!(ctx.match_preset(RelationID(6)).is_none());
        assert_eq!(
            "Only Left Turn",
            ctx.preset_item("type/restriction/only_left_turn").unwrap().name
        );
        assert_eq!(1, ctx.num_restrictions());
    }
}
