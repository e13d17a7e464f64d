//! A snapshot of one intersection: the vertex, the highways meeting there, and every turn that
//! could be restricted. Hosts build these; the editor only reads them, and rebuilds them after
//! every change to the graph.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::osm::{NodeID, RelationID, Tags, WayID, ONEWAY};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: NodeID,
    pub loc: LonLat,
}

/// When a way passes through the vertex instead of ending there, the snapshot treats the two
/// halves as separate highways.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Split {
    A,
    B,
}

/// One highway incident to the vertex. This might only be part of the underlying way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: WayID,
    pub split: Option<Split>,
    pub nodes: Vec<NodeID>,
    pub tags: Tags,
}

impl Way {
    /// Unique per highway in one snapshot, like `w5` or `w5-b`. Scene primitives of this way are
    /// tagged with this.
    pub fn key(&self) -> String {
        match self.split {
            None => self.id.to_string(),
            Some(Split::A) => format!("{}-a", self.id),
            Some(Split::B) => format!("{}-b", self.id),
        }
    }

    pub fn first(&self) -> Option<NodeID> {
        self.nodes.first().cloned()
    }

    pub fn last(&self) -> Option<NodeID> {
        self.nodes.last().cloned()
    }

    pub fn is_oneway_forwards(&self) -> bool {
        self.tags.is(ONEWAY, "yes")
    }

    pub fn is_oneway_backwards(&self) -> bool {
        self.tags.is(ONEWAY, "-1")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnLeg {
    pub node: NodeID,
    /// Always the full way, never a split half
    pub way: WayID,
}

/// A maneuver from one highway, through the vertex, onto another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub from: TurnLeg,
    pub via: NodeID,
    pub to: TurnLeg,
    /// Going back the way you came
    pub u: bool,
    /// The restriction relation that bans this turn, if any
    pub restriction: Option<RelationID>,
    /// The restriction is an only-restriction to some other way, so it bans this turn
    /// indirectly.
    pub indirect: bool,
}

impl Turn {
    /// Unique per turn in one snapshot.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.from.node, self.via, self.to.node)
    }

    pub fn is_restricted(&self) -> bool {
        self.restriction.is_some()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}) -> {} -> {} ({})",
            self.from.node, self.from.way, self.via, self.to.node, self.to.way
        )?;
        if let Some(r) = self.restriction {
            write!(f, " restricted by {}", r)?;
            if self.indirect {
                write!(f, " (indirectly)")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub vertex: Vertex,
    /// Everything to draw as a line
    pub ways: Vec<Way>,
    /// The location of every node of every way
    pub locations: BTreeMap<NodeID, LonLat>,
    /// Keyed by the node adjacent to the vertex along each highway
    pub highways: BTreeMap<NodeID, Way>,
    /// Every turn, grouped by the adjacent node of the highway it starts from
    pub turns_from: BTreeMap<NodeID, Vec<Turn>>,
}

impl Intersection {
    /// Every turn starting from one highway. Nothing if there's no "from" highway.
    pub fn turns(&self, from: Option<NodeID>) -> Vec<Turn> {
        from.and_then(|n| self.turns_from.get(&n))
            .cloned()
            .unwrap_or_else(Vec::new)
    }

    /// The node adjacent to the vertex along this highway, if it's part of the intersection.
    pub fn adjacent_node_id(&self, way: &Way) -> Option<NodeID> {
        let key = way.key();
        self.highways
            .iter()
            .find(|(_, w)| w.key() == key)
            .map(|(n, _)| *n)
    }

    pub fn highway(&self, adjacent: NodeID) -> Option<&Way> {
        self.highways.get(&adjacent)
    }

    /// The locations along a way, skipping nodes the snapshot doesn't know about.
    pub fn way_points(&self, way: &Way) -> Vec<LonLat> {
        way.nodes
            .iter()
            .filter_map(|n| self.locations.get(n).cloned())
            .collect()
    }

    pub fn location(&self, node: NodeID) -> Option<LonLat> {
        self.locations.get(&node).cloned()
    }
}
