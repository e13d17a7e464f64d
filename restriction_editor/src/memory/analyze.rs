//! Figures out which highways meet at a vertex and every turn between them.

use std::collections::{BTreeMap, BTreeSet};

use crate::intersection::{Intersection, Split, Turn, TurnLeg, Vertex, Way};
use crate::memory::graph::{self, MemoryGraph};
use crate::osm::{NodeID, WayID, AREA, HIGHWAY};
use crate::restriction::is_only_restriction;

pub fn analyze(graph: &MemoryGraph, vertex_id: NodeID) -> Option<Intersection> {
    let node = graph.nodes.get(&vertex_id)?;
    let vertex = Vertex {
        id: vertex_id,
        loc: node.loc,
    };

    let mut ways = Vec::new();
    for id in graph.parent_ways(vertex_id) {
        let way = &graph.ways[&id];
        if !way.tags.contains_key(HIGHWAY) || way.tags.is(AREA, "yes") {
            continue;
        }
        ways.extend(split_at(id, way, vertex_id));
    }

    // Two highways reaching the vertex from the same adjacent node overlap. Neither one can be
    // told apart from the other, so leave both out.
    let mut highways: BTreeMap<NodeID, Way> = BTreeMap::new();
    let mut coincident = BTreeSet::new();
    for way in &ways {
        let adjacent = match adjacent_node(way, vertex_id) {
            Some(n) => n,
            None => continue,
        };
        if highways.contains_key(&adjacent) {
            coincident.insert(adjacent);
        } else {
            highways.insert(adjacent, way.clone());
        }
    }
    for adjacent in coincident {
        debug!("Ways overlap between {} and {}", vertex_id, adjacent);
        highways.remove(&adjacent);
        ways.retain(|w| adjacent_node(w, vertex_id) != Some(adjacent));
    }

    let mut locations = BTreeMap::new();
    for way in &ways {
        for n in &way.nodes {
            if let Some(node) = graph.nodes.get(n) {
                locations.insert(*n, node.loc);
            }
        }
    }

    let mut turns_from: BTreeMap<NodeID, Vec<Turn>> = BTreeMap::new();
    for (from_node, from) in &highways {
        if !enters(from, vertex_id) {
            continue;
        }
        let mut turns = Vec::new();
        for (to_node, to) in &highways {
            if !leaves(to, vertex_id) {
                continue;
            }
            let u = from_node == to_node;
            if u && (from.is_oneway_forwards() || from.is_oneway_backwards()) {
                continue;
            }
            let (restriction, indirect) = match find_restriction(graph, vertex_id, from.id, to.id)
            {
                Some(pair) => (Some(pair.0), pair.1),
                None => (None, false),
            };
            turns.push(Turn {
                from: TurnLeg {
                    node: *from_node,
                    way: from.id,
                },
                via: vertex_id,
                to: TurnLeg {
                    node: *to_node,
                    way: to.id,
                },
                u,
                restriction,
                indirect,
            });
        }
        turns_from.insert(*from_node, turns);
    }

    Some(Intersection {
        vertex,
        ways,
        locations,
        highways,
        turns_from,
    })
}

/// A way passing through the vertex becomes two halves, each ending at the vertex. A closed way
/// is cut in half, with the vertex at both ends.
fn split_at(id: WayID, way: &graph::Way, vertex: NodeID) -> Vec<Way> {
    let piece = |split, nodes: &[NodeID]| Way {
        id,
        split,
        nodes: nodes.to_vec(),
        tags: way.tags.clone(),
    };
    let nodes = &way.nodes;
    let idx = match nodes.iter().position(|n| *n == vertex) {
        Some(idx) => idx,
        None => {
            return Vec::new();
        }
    };

    if way.is_closed() {
        let ring = &nodes[..nodes.len() - 1];
        let mut rotated: Vec<NodeID> = ring[idx..]
            .iter()
            .chain(ring[..idx].iter())
            .cloned()
            .collect();
        rotated.push(vertex);
        let mid = rotated.len() / 2;
        return vec![
            piece(Some(Split::A), &rotated[..=mid]),
            piece(Some(Split::B), &rotated[mid..]),
        ];
    }
    if idx == 0 || idx == nodes.len() - 1 {
        return vec![piece(None, nodes)];
    }
    vec![
        piece(Some(Split::A), &nodes[..=idx]),
        piece(Some(Split::B), &nodes[idx..]),
    ]
}

fn adjacent_node(way: &Way, vertex: NodeID) -> Option<NodeID> {
    if way.nodes.len() < 2 {
        return None;
    }
    if way.first() == Some(vertex) {
        Some(way.nodes[1])
    } else if way.last() == Some(vertex) {
        Some(way.nodes[way.nodes.len() - 2])
    } else {
        None
    }
}

/// Can traffic along this highway reach the vertex?
fn enters(way: &Way, vertex: NodeID) -> bool {
    !((way.first() == Some(vertex) && way.is_oneway_forwards())
        || (way.last() == Some(vertex) && way.is_oneway_backwards()))
}

/// Can traffic leave the vertex along this highway?
fn leaves(way: &Way, vertex: NodeID) -> bool {
    !((way.first() != Some(vertex) && way.is_oneway_forwards())
        || (way.last() != Some(vertex) && way.is_oneway_backwards()))
}

/// A restriction exactly matching the turn wins. Otherwise an only-restriction from the same way
/// to somewhere else bans this turn indirectly.
fn find_restriction(
    graph: &MemoryGraph,
    via: NodeID,
    from: WayID,
    to: WayID,
) -> Option<(crate::osm::RelationID, bool)> {
    let candidates = graph.restrictions_via(via);
    if let Some((id, _)) = candidates
        .iter()
        .find(|(_, r)| r.way("from") == Some(from) && r.way("to") == Some(to))
    {
        return Some((*id, false));
    }
    candidates
        .iter()
        .find(|(_, r)| {
            is_only_restriction(&r.tags) && r.way("from") == Some(from) && r.way("to") != Some(to)
        })
        .map(|(id, _)| (*id, true))
}

#[cfg(test)]
mod tests {
    use super::analyze;
    use crate::intersection::Split;
    use crate::memory::MemoryGraph;
    use crate::osm::{NodeID, RelationID, WayID};

    fn graph(ways: &str, relations: &str) -> MemoryGraph {
        let raw = format!(
            r#"{{
                "nodes": [
                    {{"id": 1, "lon": 0.0, "lat": 0.0}},
                    {{"id": 2, "lon": 0.0, "lat": 0.001}},
                    {{"id": 3, "lon": 0.001, "lat": 0.0}},
                    {{"id": 4, "lon": 0.0, "lat": -0.001}}
                ],
                "ways": {},
                "relations": {}
            }}"#,
            ways, relations
        );
        MemoryGraph::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_through_way_splits() {
        let g = graph(
            r#"[
                {"id": 10, "nodes": [2, 1, 4], "tags": {"highway": "primary", "oneway": "yes"}},
                {"id": 11, "nodes": [1, 3], "tags": {"highway": "residential"}},
                {"id": 12, "nodes": [1, 3], "tags": {"building": "yes"}}
            ]"#,
            "[]",
        );
        let i = analyze(&g, NodeID(1)).unwrap();
        assert_eq!(3, i.ways.len());
        assert_eq!(Some(Split::A), i.highways[&NodeID(2)].split);
        assert_eq!("w10-b", i.highways[&NodeID(4)].key());

        // Going south from 2, you can continue south or turn onto 11
        let tos: Vec<NodeID> = i.turns(Some(NodeID(2))).iter().map(|t| t.to.node).collect();
        assert_eq!(vec![NodeID(3), NodeID(4)], tos);
        // Nothing comes north from 4
        assert!(i.turns(Some(NodeID(4))).is_empty());
        // From 11, there's a u-turn, but no going the wrong way up 10
        let tos: Vec<NodeID> = i.turns(Some(NodeID(3))).iter().map(|t| t.to.node).collect();
        assert_eq!(vec![NodeID(3), NodeID(4)], tos);
        assert!(i.turns(Some(NodeID(3)))[0].u);
        assert!(i.turns(None).is_empty());
    }

    #[test]
    fn test_direct_and_indirect_restrictions() {
        let g = graph(
            r#"[
                {"id": 10, "nodes": [2, 1], "tags": {"highway": "residential"}},
                {"id": 11, "nodes": [1, 3], "tags": {"highway": "residential"}},
                {"id": 12, "nodes": [4, 1], "tags": {"highway": "residential"}}
            ]"#,
            r#"[{
                "id": 100,
                "tags": {"type": "restriction", "restriction": "only_straight_on"},
                "members": [
                    {"type": "way", "ref": 10, "role": "from"},
                    {"type": "node", "ref": 1, "role": "via"},
                    {"type": "way", "ref": 12, "role": "to"}
                ]
            }]"#,
        );
        let i = analyze(&g, NodeID(1)).unwrap();
        for turn in i.turns(Some(NodeID(2))) {
            assert_eq!(Some(RelationID(100)), turn.restriction);
            assert_eq!(turn.to.way != WayID(12), turn.indirect);
        }
        assert!(i
            .turns(Some(NodeID(3)))
            .iter()
            .all(|t| t.restriction.is_none()));
        assert!(analyze(&g, NodeID(99)).is_none());
    }
}
