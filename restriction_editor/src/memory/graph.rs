use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::osm::{EntityID, NodeID, RelationID, Tags, WayID, RESTRICTION, TYPE};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub loc: LonLat,
    pub tags: Tags,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub nodes: Vec<NodeID>,
    pub tags: Tags,
}

impl Way {
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 2 && self.nodes.first() == self.nodes.last()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub obj: EntityID,
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub tags: Tags,
    pub members: Vec<Member>,
}

impl Relation {
    pub fn is_restriction(&self) -> bool {
        self.tags.is(TYPE, RESTRICTION)
    }

    /// The first way with some role
    pub fn way(&self, role: &str) -> Option<WayID> {
        self.members.iter().find_map(|m| match m.obj {
            EntityID::Way(w) if m.role == role => Some(w),
            _ => None,
        })
    }

    /// The via node. Restrictions with a via way don't have one.
    pub fn via_node(&self) -> Option<NodeID> {
        self.members.iter().find_map(|m| match m.obj {
            EntityID::Node(n) if m.role == "via" => Some(n),
            _ => None,
        })
    }
}

/// A tiny OSM-like graph, enough to hold a few intersections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGraph {
    pub nodes: BTreeMap<NodeID, Node>,
    pub ways: BTreeMap<WayID, Way>,
    pub relations: BTreeMap<RelationID, Relation>,
}

impl MemoryGraph {
    pub fn load(path: &str) -> Result<MemoryGraph> {
        let fixture: Fixture = abstutil::read_json(path)?;
        fixture.into_graph()
    }

    pub fn parse(raw: &[u8]) -> Result<MemoryGraph> {
        let fixture: Fixture = abstutil::from_json(raw)?;
        fixture.into_graph()
    }

    pub fn has_entity(&self, id: EntityID) -> bool {
        match id {
            EntityID::Node(n) => self.nodes.contains_key(&n),
            EntityID::Way(w) => self.ways.contains_key(&w),
            EntityID::Relation(r) => self.relations.contains_key(&r),
        }
    }

    pub fn tags(&self, id: EntityID) -> Option<&Tags> {
        match id {
            EntityID::Node(n) => self.nodes.get(&n).map(|x| &x.tags),
            EntityID::Way(w) => self.ways.get(&w).map(|x| &x.tags),
            EntityID::Relation(r) => self.relations.get(&r).map(|x| &x.tags),
        }
    }

    /// Every way using a node, in ID order
    pub fn parent_ways(&self, node: NodeID) -> Vec<WayID> {
        self.ways
            .iter()
            .filter(|(_, w)| w.nodes.contains(&node))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Every restriction relation with a via node
    pub fn restrictions_via(&self, node: NodeID) -> Vec<(RelationID, &Relation)> {
        self.relations
            .iter()
            .filter(|(_, r)| r.is_restriction() && r.via_node() == Some(node))
            .map(|(id, r)| (*id, r))
            .collect()
    }

    pub fn new_way_id(&self) -> WayID {
        WayID(self.ways.keys().last().map(|w| w.0 + 1).unwrap_or(1))
    }

    pub fn new_relation_id(&self) -> RelationID {
        RelationID(self.relations.keys().last().map(|r| r.0 + 1).unwrap_or(1))
    }
}

/// How a graph is written in JSON files.
#[derive(Serialize, Deserialize)]
struct Fixture {
    #[serde(default)]
    nodes: Vec<FixtureNode>,
    #[serde(default)]
    ways: Vec<FixtureWay>,
    #[serde(default)]
    relations: Vec<FixtureRelation>,
}

#[derive(Serialize, Deserialize)]
struct FixtureNode {
    id: i64,
    lon: f64,
    lat: f64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize)]
struct FixtureWay {
    id: i64,
    nodes: Vec<i64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize)]
struct FixtureRelation {
    id: i64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    members: Vec<FixtureMember>,
}

#[derive(Serialize, Deserialize)]
struct FixtureMember {
    #[serde(rename = "type")]
    member_type: String,
    #[serde(rename = "ref")]
    id: i64,
    role: String,
}

impl Fixture {
    fn into_graph(self) -> Result<MemoryGraph> {
        let mut graph = MemoryGraph::default();
        for n in self.nodes {
            graph.nodes.insert(
                NodeID(n.id),
                Node {
                    loc: LonLat::new(n.lon, n.lat),
                    tags: Tags::new(n.tags),
                },
            );
        }
        for w in self.ways {
            let nodes: Vec<NodeID> = w.nodes.into_iter().map(NodeID).collect();
            if nodes.len() < 2 {
                bail!("w{} has fewer than 2 nodes", w.id);
            }
            if let Some(n) = nodes.iter().find(|n| !graph.nodes.contains_key(*n)) {
                bail!("w{} uses {}, which doesn't exist", w.id, n);
            }
            graph.ways.insert(
                WayID(w.id),
                Way {
                    nodes,
                    tags: Tags::new(w.tags),
                },
            );
        }
        for r in self.relations {
            let mut members = Vec::new();
            for m in r.members {
                let obj = match m.member_type.as_ref() {
                    "node" => EntityID::Node(NodeID(m.id)),
                    "way" => EntityID::Way(WayID(m.id)),
                    "relation" => EntityID::Relation(RelationID(m.id)),
                    x => bail!("r{} has a member of unknown type {}", r.id, x),
                };
                members.push(Member { obj, role: m.role });
            }
            graph.relations.insert(
                RelationID(r.id),
                Relation {
                    tags: Tags::new(r.tags),
                    members,
                },
            );
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryGraph;
    use crate::osm::{EntityID, NodeID, RelationID, WayID};

    const RAW: &str = r#"{
        "nodes": [
            {"id": 1, "lon": 0.0, "lat": 0.0},
            {"id": 2, "lon": 0.0, "lat": 0.001},
            {"id": 3, "lon": 0.001, "lat": 0.0}
        ],
        "ways": [
            {"id": 10, "nodes": [2, 1], "tags": {"highway": "residential"}},
            {"id": 11, "nodes": [1, 3], "tags": {"highway": "residential"}}
        ],
        "relations": [
            {
                "id": 100,
                "tags": {"type": "restriction", "restriction": "no_left_turn"},
                "members": [
                    {"type": "way", "ref": 10, "role": "from"},
                    {"type": "node", "ref": 1, "role": "via"},
                    {"type": "way", "ref": 11, "role": "to"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_fixture() {
        let graph = MemoryGraph::parse(RAW.as_bytes()).unwrap();
        assert_eq!(3, graph.nodes.len());
        assert!(graph.has_entity(EntityID::Way(WayID(11))));
        assert_eq!(vec![WayID(10), WayID(11)], graph.parent_ways(NodeID(1)));

        let restrictions = graph.restrictions_via(NodeID(1));
        assert_eq!(1, restrictions.len());
        let (id, r) = restrictions[0];
        assert_eq!(RelationID(100), id);
        assert_eq!(Some(WayID(10)), r.way("from"));
        assert_eq!(Some(WayID(11)), r.way("to"));

        assert_eq!(WayID(12), graph.new_way_id());
        assert_eq!(RelationID(101), graph.new_relation_id());
    }

    #[test]
    fn test_bad_fixtures() {
        let missing_node = r#"{"nodes": [], "ways": [{"id": 1, "nodes": [1, 2]}]}"#;
        assert!(MemoryGraph::parse(missing_node.as_bytes()).is_err());

        let bad_member = r#"{"relations": [
            {"id": 1, "members": [{"type": "area", "ref": 1, "role": "from"}]}
        ]}"#;
        assert!(MemoryGraph::parse(bad_member.as_bytes()).is_err());
    }
}
