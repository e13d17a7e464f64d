use geom::Mercator;

use crate::intersection::{Intersection, Turn, Vertex};
use crate::osm::{EntityID, NodeID, RelationID, Tags};
use crate::presets::Preset;
use crate::{Dispatch, RestrictionType};

/// The topic on `EditorContext::history` fired after every change to the graph.
pub const HISTORY_CHANGE: &str = "change";
/// The topic on `EditorContext::resize_events` fired when the widget's container changes size.
pub const RESIZE: &str = "resize";

/// Everything the restriction editor needs from the map editor hosting it. The editor never
/// changes the graph directly; it asks the host to `perform` undoable actions.
pub trait EditorContext {
    /// Something the host knows how to apply and undo.
    type Action;

    fn has_entity(&self, id: EntityID) -> bool;
    fn vertex(&self, id: NodeID) -> Option<Vertex>;
    fn tags(&self, id: EntityID) -> Option<&Tags>;

    /// Describes the highways and turns at a vertex, or `None` if the vertex doesn't exist.
    fn analyze_intersection(&self, vertex: NodeID) -> Option<Intersection>;
    /// Guesses what kind of restriction a turn would need, judging by its shape on screen.
    fn infer_restriction_type(&self, turn: &Turn, projection: &Mercator) -> RestrictionType;
    fn restrict_turn(&self, turn: &Turn, projection: &Mercator) -> Self::Action;
    fn unrestrict_turn(&self, turn: &Turn, projection: &Mercator) -> Self::Action;
    /// Applies an action, recording it in the undo history with a description.
    fn perform(&mut self, action: Self::Action, annotation: String);

    fn match_preset(&self, relation: RelationID) -> Option<Preset>;
    fn preset_item(&self, key: &str) -> Option<Preset>;

    /// Emits `HISTORY_CHANGE` after every change to the graph.
    fn history(&mut self) -> &mut Dispatch;
    /// Emits `RESIZE` when the container holding the widget changes size.
    fn resize_events(&mut self) -> &mut Dispatch;

    /// When the inspector panel holding the widget is hidden, the widget shouldn't draw.
    fn inspector_hidden(&self) -> bool {
        false
    }

    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        crate::locale::t(key, params)
    }
}
