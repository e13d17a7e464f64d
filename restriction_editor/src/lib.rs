//! An interactive editor for the turn restrictions at one intersection, meant to be embedded in
//! a bigger map editor.
//!
//! The host picks a vertex and hands over an `EditorContext`. The editor draws the ways meeting
//! there; clicking one selects it as the "from" way and shows every turn from it. Clicking a turn
//! asks the host to add or remove a restriction relation, and the editor redraws once the host
//! reports the change.
//!
//! The `memory` module is a complete host keeping everything in memory, used by the tests and
//! the command-line tool.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod behavior;
mod context;
mod dispatch;
mod field;
mod intersection;
pub mod locale;
pub mod memory;
mod options;
pub mod osm;
mod presets;
mod render;
mod restriction;
mod screen_geom;
mod session;
mod surface;
mod viewport;
mod world;

pub use crate::behavior::{Breathe, Hover};
pub use crate::context::{EditorContext, HISTORY_CHANGE, RESIZE};
pub use crate::dispatch::{Dispatch, Notification, Token};
pub use crate::field::{
    ChangeListener, Event, FieldChange, Outcome, Rendered, RestrictionsField, CHANGE, NAMESPACE,
    SELECTED,
};
pub use crate::intersection::{Intersection, Split, Turn, TurnLeg, Vertex, Way};
pub use crate::options::FieldOptions;
pub use crate::osm::{EntityID, NodeID, RelationID, Tags, WayID};
pub use crate::presets::{Preset, Presets, GENERIC_RESTRICTION};
pub use crate::render::icon;
pub use crate::restriction::{is_only_restriction, RestrictionType};
pub use crate::screen_geom::{ScreenDims, ScreenPt};
pub use crate::session::Session;
pub use crate::surface::{Surface, CLICK, HOVER, LEAVE};
pub use crate::viewport::Viewport;
pub use crate::world::{HitTarget, Layer, Primitive, PrimitiveID, Scene, Shape};
