use std::fmt;

use serde::{Deserialize, Serialize};

use crate::osm::{Tags, RESTRICTION};

/// The values of the `restriction` tag this editor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    NoLeftTurn,
    NoRightTurn,
    NoStraightOn,
    NoUTurn,
    OnlyLeftTurn,
    OnlyRightTurn,
    OnlyStraightOn,
}

impl RestrictionType {
    pub fn all() -> Vec<RestrictionType> {
        vec![
            RestrictionType::NoLeftTurn,
            RestrictionType::NoRightTurn,
            RestrictionType::NoStraightOn,
            RestrictionType::NoUTurn,
            RestrictionType::OnlyLeftTurn,
            RestrictionType::OnlyRightTurn,
            RestrictionType::OnlyStraightOn,
        ]
    }

    pub fn new(restriction: &str) -> Option<RestrictionType> {
        // There are many more possibilities, with conditions and vehicle types:
        // https://taginfo.openstreetmap.org/keys/restriction#values
        RestrictionType::all()
            .into_iter()
            .find(|rt| rt.as_str() == restriction)
    }

    /// Reads the `restriction` tag of a relation.
    pub fn from_tags(tags: &Tags) -> Option<RestrictionType> {
        tags.get(RESTRICTION).and_then(|x| RestrictionType::new(x))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RestrictionType::NoLeftTurn => "no_left_turn",
            RestrictionType::NoRightTurn => "no_right_turn",
            RestrictionType::NoStraightOn => "no_straight_on",
            RestrictionType::NoUTurn => "no_u_turn",
            RestrictionType::OnlyLeftTurn => "only_left_turn",
            RestrictionType::OnlyRightTurn => "only_right_turn",
            RestrictionType::OnlyStraightOn => "only_straight_on",
        }
    }

    /// Only-restrictions forbid every other turn from the same way.
    pub fn is_only(self) -> bool {
        self.as_str().starts_with("only_")
    }

    /// The key of the matching preset, like `type/restriction/no_left_turn`
    pub fn preset_key(self) -> String {
        format!("type/restriction/{}", self.as_str())
    }
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True if a `restriction` tag value is some kind of only-restriction, even one this editor
/// doesn't otherwise understand.
pub fn is_only_restriction(tags: &Tags) -> bool {
    tags.get(RESTRICTION)
        .map(|x| x.starts_with("only_"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::RestrictionType;

    #[test]
    fn test_parse() {
        for rt in RestrictionType::all() {
            assert_eq!(Some(rt), RestrictionType::new(rt.as_str()));
        }
        assert_eq!(None, RestrictionType::new("no_entry"));
        assert!(RestrictionType::OnlyStraightOn.is_only());
        assert!(!RestrictionType::NoUTurn.is_only());
        assert_eq!(
            "type/restriction/no_u_turn",
            RestrictionType::NoUTurn.preset_key()
        );
    }
}
