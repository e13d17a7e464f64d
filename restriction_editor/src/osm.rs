//! Identifiers and tags for the OSM-like entities this editor touches.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// These are common OSM keys. Keys used in just one place don't need to be defined here.
pub const HIGHWAY: &str = "highway";
pub const ONEWAY: &str = "oneway";
pub const TYPE: &str = "type";
pub const RESTRICTION: &str = "restriction";
pub const AREA: &str = "area";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeID(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WayID(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationID(pub i64);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for WayID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl fmt::Display for RelationID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityID {
    Node(NodeID),
    Way(WayID),
    Relation(RelationID),
}

impl fmt::Display for EntityID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityID::Node(id) => write!(f, "{}", id),
            EntityID::Way(id) => write!(f, "{}", id),
            EntityID::Relation(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for EntityID {
    type Err = anyhow::Error;

    /// Parses the short form used throughout the editor, like `n42`, `w7`, or `r3`.
    fn from_str(raw: &str) -> Result<EntityID> {
        if raw.len() < 2 {
            bail!("{:?} isn't an entity ID", raw);
        }
        let (prefix, num) = raw.split_at(1);
        let num: i64 = num
            .parse()
            .map_err(|err| anyhow!("{:?} isn't an entity ID: {}", raw, err))?;
        match prefix {
            "n" => Ok(EntityID::Node(NodeID(num))),
            "w" => Ok(EntityID::Way(WayID(num))),
            "r" => Ok(EntityID::Relation(RelationID(num))),
            _ => bail!("{:?} has an unknown entity prefix", raw),
        }
    }
}

impl NodeID {
    pub fn parse(raw: &str) -> Result<NodeID> {
        match raw.parse::<EntityID>()? {
            EntityID::Node(id) => Ok(id),
            other => bail!("{} isn't a node", other),
        }
    }
}

impl WayID {
    pub fn parse(raw: &str) -> Result<WayID> {
        match raw.parse::<EntityID>()? {
            EntityID::Way(id) => Ok(id),
            other => bail!("{} isn't a way", other),
        }
    }
}

/// A bag of OSM key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new(map: BTreeMap<String, String>) -> Tags {
        Tags(map)
    }

    pub fn empty() -> Tags {
        Tags(BTreeMap::new())
    }

    pub fn get(&self, k: &str) -> Option<&String> {
        self.0.get(k)
    }

    pub fn contains_key(&self, k: &str) -> bool {
        self.0.contains_key(k)
    }

    pub fn is(&self, k: &str, v: &str) -> bool {
        self.0.get(k).map(|x| x == v).unwrap_or(false)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, k: K, v: V) {
        self.0.insert(k.into(), v.into());
    }

    pub fn remove(&mut self, k: &str) -> Option<String> {
        self.0.remove(k)
    }

    pub fn inner(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Tags(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityID, NodeID, RelationID, Tags, WayID};

    #[test]
    fn test_parse_entity_ids() {
        assert_eq!(EntityID::Node(NodeID(42)), "n42".parse().unwrap());
        assert_eq!(EntityID::Way(WayID(-7)), "w-7".parse().unwrap());
        assert_eq!(EntityID::Relation(RelationID(3)), "r3".parse().unwrap());
        assert_eq!("r3", EntityID::Relation(RelationID(3)).to_string());

        assert!("x3".parse::<EntityID>().is_err());
        assert!("n".parse::<EntityID>().is_err());
        assert!("nfoo".parse::<EntityID>().is_err());
        assert!(NodeID::parse("w3").is_err());
        assert_eq!(WayID(3), WayID::parse("w3").unwrap());
    }

    #[test]
    fn test_tags() {
        let mut tags: Tags = vec![("highway", "residential"), ("oneway", "yes")]
            .into_iter()
            .collect();
        assert!(tags.is("oneway", "yes"));
        assert!(!tags.is("oneway", "-1"));
        tags.remove("oneway");
        assert!(!tags.contains_key("oneway"));
        assert_eq!(Some(&"residential".to_string()), tags.get("highway"));
    }
}
