//! Changes to a `MemoryGraph`. Each one either applies completely or fails without touching
//! anything.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::intersection::Turn;
use crate::memory::graph::{Member, MemoryGraph, Relation, Way};
use crate::osm::{EntityID, NodeID, Tags, WayID, RESTRICTION, TYPE};
use crate::RestrictionType;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MemoryAction {
    RestrictTurn {
        turn: Turn,
        restriction: RestrictionType,
    },
    UnrestrictTurn {
        turn: Turn,
    },
    DeleteNode(NodeID),
}

impl MemoryAction {
    /// The turn this is about, if any
    pub fn turn(&self) -> Option<&Turn> {
        match self {
            MemoryAction::RestrictTurn { turn, .. } => Some(turn),
            MemoryAction::UnrestrictTurn { turn } => Some(turn),
            MemoryAction::DeleteNode(_) => None,
        }
    }

    /// Produces a modified copy of the graph.
    pub fn apply(&self, graph: &MemoryGraph) -> Result<MemoryGraph> {
        let mut graph = graph.clone();
        match self {
            MemoryAction::RestrictTurn { turn, restriction } => {
                let from = split_for_turn(&mut graph, turn.from.way, turn.via, turn.from.node)?;
                // Splitting for the from leg may have moved the to leg onto a new way
                let to_way = leg_way(&graph, turn.to.way, turn.via, turn.to.node)?;
                let to = split_for_turn(&mut graph, to_way, turn.via, turn.to.node)?;

                let mut tags = Tags::empty();
                tags.insert(TYPE, RESTRICTION);
                tags.insert(RESTRICTION, restriction.as_str());
                let id = graph.new_relation_id();
                graph.relations.insert(
                    id,
                    Relation {
                        tags,
                        members: vec![
                            Member {
                                obj: EntityID::Way(from),
                                role: "from".to_string(),
                            },
                            Member {
                                obj: EntityID::Node(turn.via),
                                role: "via".to_string(),
                            },
                            Member {
                                obj: EntityID::Way(to),
                                role: "to".to_string(),
                            },
                        ],
                    },
                );
                debug!("Created {} for {}", id, turn);
            }
            MemoryAction::UnrestrictTurn { turn } => {
                let id = match turn.restriction {
                    Some(id) => id,
                    None => bail!("{} isn't restricted", turn),
                };
                // An only-restriction banning this turn indirectly goes away entirely.
                if graph.relations.remove(&id).is_none() {
                    bail!("{} restricts {}, but doesn't exist", id, turn);
                }
            }
            MemoryAction::DeleteNode(id) => {
                if graph.nodes.remove(id).is_none() {
                    bail!("Can't delete {}, it doesn't exist", id);
                }
                for way in graph.ways.values_mut() {
                    way.nodes.retain(|n| n != id);
                }
                graph.ways.retain(|_, w| w.nodes.len() >= 2);
                let ways = graph.ways.clone();
                for r in graph.relations.values_mut() {
                    r.members.retain(|m| match m.obj {
                        EntityID::Node(n) => n != *id,
                        EntityID::Way(w) => ways.contains_key(&w),
                        EntityID::Relation(_) => true,
                    });
                }
                graph.relations.retain(|_, r| !r.members.is_empty());
            }
        }
        Ok(graph)
    }
}

/// Finds the way currently connecting `via` to its neighbor `node`, starting with `id`.
fn leg_way(graph: &MemoryGraph, id: WayID, via: NodeID, node: NodeID) -> Result<WayID> {
    let connects = |id: &WayID| {
        graph
            .ways
            .get(id)
            .map(|w| {
                w.nodes
                    .windows(2)
                    .any(|pair| pair == [via, node] || pair == [node, via])
            })
            .unwrap_or(false)
    };
    if connects(&id) {
        return Ok(id);
    }
    match graph.parent_ways(via).into_iter().find(connects) {
        Some(found) => Ok(found),
        None => bail!("No way connects {} to {}", via, node),
    }
}

/// Restrictions need ways that start or end at the via node. If the way passes through, split it
/// there, and return whichever half contains `keep`.
fn split_for_turn(graph: &mut MemoryGraph, id: WayID, via: NodeID, keep: NodeID) -> Result<WayID> {
    let way = match graph.ways.get(&id) {
        Some(w) => w.clone(),
        None => bail!("{} doesn't exist", id),
    };
    let idx = match way.nodes.iter().position(|n| *n == via) {
        Some(idx) => idx,
        None => bail!("{} doesn't go through {}", id, via),
    };
    if way.is_closed() {
        bail!("Splitting closed ways like {} isn't supported", id);
    }
    if idx == 0 || idx == way.nodes.len() - 1 {
        return Ok(id);
    }

    let new_id = graph.new_way_id();
    let first_half = way.nodes[..=idx].to_vec();
    let second_half = way.nodes[idx..].to_vec();
    graph.ways.insert(
        id,
        Way {
            nodes: first_half,
            tags: way.tags.clone(),
        },
    );
    graph.ways.insert(
        new_id,
        Way {
            nodes: second_half.clone(),
            tags: way.tags,
        },
    );
    debug!("Split {} at {}, creating {}", id, via, new_id);

    // Existing relations keep pointing at the first half, unless their via node only touches the
    // second.
    for r in graph.relations.values_mut() {
        let moves = r
            .via_node()
            .map(|n| n != via && second_half.contains(&n))
            .unwrap_or(false);
        if !moves {
            continue;
        }
        for m in &mut r.members {
            if m.obj == EntityID::Way(id) {
                m.obj = EntityID::Way(new_id);
            }
        }
    }

    if second_half.contains(&keep) && keep != via {
        Ok(new_id)
    } else {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryAction;
    use crate::intersection::{Turn, TurnLeg};
    use crate::memory::MemoryGraph;
    use crate::osm::{NodeID, RelationID, WayID};
    use crate::RestrictionType;

    fn graph() -> MemoryGraph {
        MemoryGraph::parse(
            br#"{
                "nodes": [
                    {"id": 1, "lon": 0.0, "lat": 0.0},
                    {"id": 2, "lon": 0.0, "lat": 0.001},
                    {"id": 3, "lon": 0.001, "lat": 0.0},
                    {"id": 4, "lon": 0.0, "lat": -0.001}
                ],
                "ways": [
                    {"id": 10, "nodes": [2, 1, 4], "tags": {"highway": "primary"}},
                    {"id": 11, "nodes": [1, 3], "tags": {"highway": "residential"}}
                ]
            }"#,
        )
        .unwrap()
    }

    fn turn(from: (i64, i64), to: (i64, i64)) -> Turn {
        Turn {
            from: TurnLeg {
                node: NodeID(from.0),
                way: WayID(from.1),
            },
            via: NodeID(1),
            to: TurnLeg {
                node: NodeID(to.0),
                way: WayID(to.1),
            },
            u: false,
            restriction: None,
            indirect: false,
        }
    }

    #[test]
    fn test_restrict_splits_through_way() {
        let action = MemoryAction::RestrictTurn {
            turn: turn((3, 11), (4, 10)),
            restriction: RestrictionType::NoRightTurn,
        };
        let after = action.apply(&graph()).unwrap();
        assert_eq!(vec![NodeID(2), NodeID(1)], after.ways[&WayID(10)].nodes);
        assert_eq!(vec![NodeID(1), NodeID(4)], after.ways[&WayID(12)].nodes);

        let r = &after.relations[&RelationID(1)];
        assert_eq!(Some(WayID(11)), r.way("from"));
        assert_eq!(Some(NodeID(1)), r.via_node());
        assert_eq!(Some(WayID(12)), r.way("to"));
    }

    #[test]
    fn test_restrict_straight_along_through_way() {
        let action = MemoryAction::RestrictTurn {
            turn: turn((2, 10), (4, 10)),
            restriction: RestrictionType::NoStraightOn,
        };
        let after = action.apply(&graph()).unwrap();
        assert_eq!(vec![NodeID(2), NodeID(1)], after.ways[&WayID(10)].nodes);
        assert_eq!(vec![NodeID(1), NodeID(4)], after.ways[&WayID(12)].nodes);

        let r = &after.relations[&RelationID(1)];
        assert_eq!(Some(WayID(10)), r.way("from"));
        assert_eq!(Some(WayID(12)), r.way("to"));

        // And the other direction
        let action = MemoryAction::RestrictTurn {
            turn: turn((4, 10), (2, 10)),
            restriction: RestrictionType::NoStraightOn,
        };
        let after = action.apply(&graph()).unwrap();
        let r = &after.relations[&RelationID(1)];
        assert_eq!(Some(WayID(12)), r.way("from"));
        assert_eq!(Some(WayID(10)), r.way("to"));
    }

    #[test]
    fn test_unrestrict_and_delete() {
        let restricted = MemoryAction::RestrictTurn {
            turn: turn((2, 10), (3, 11)),
            restriction: RestrictionType::NoLeftTurn,
        }
        .apply(&graph())
        .unwrap();

        let mut t = turn((2, 10), (3, 11));
        assert!(MemoryAction::UnrestrictTurn { turn: t.clone() }
            .apply(&restricted)
            .is_err());
        t.restriction = Some(RelationID(1));
        let unrestricted = MemoryAction::UnrestrictTurn { turn: t }
            .apply(&restricted)
            .unwrap();
        assert!(unrestricted.relations.is_empty());

        let deleted = MemoryAction::DeleteNode(NodeID(1)).apply(&restricted).unwrap();
        assert!(!deleted.nodes.contains_key(&NodeID(1)));
        // Every way touching 1 only had 2 nodes after the split
        assert!(deleted.ways.is_empty());
        assert!(deleted.relations.is_empty());
        assert!(MemoryAction::DeleteNode(NodeID(1)).apply(&deleted).is_err());
    }
}
