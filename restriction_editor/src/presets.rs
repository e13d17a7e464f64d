use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::Translations;
use crate::osm::{Tags, RESTRICTION, TYPE};
use crate::RestrictionType;

pub const GENERIC_RESTRICTION: &str = "type/restriction";

/// How the host describes some kind of entity to people.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
}

/// The presets for restriction relations.
pub struct Presets {
    items: BTreeMap<String, Preset>,
}

impl Presets {
    pub fn restrictions(translations: &Translations) -> Presets {
        let mut keys = vec![GENERIC_RESTRICTION.to_string()];
        keys.extend(RestrictionType::all().into_iter().map(|rt| rt.preset_key()));

        let mut items = BTreeMap::new();
        for id in keys {
            let name = translations.t(&format!("presets.{}", id), &[]);
            items.insert(id.clone(), Preset { id, name });
        }
        Presets { items }
    }

    pub fn item(&self, id: &str) -> Option<&Preset> {
        self.items.get(id)
    }

    /// The most specific preset for a relation: the exact restriction type if it's known,
    /// otherwise the generic restriction preset. Not a restriction at all means no match.
    pub fn match_relation(&self, tags: &Tags) -> Option<&Preset> {
        if !tags.is(TYPE, RESTRICTION) {
            return None;
        }
        tags.get(RESTRICTION)
            .and_then(|x| self.items.get(&format!("{}/{}", GENERIC_RESTRICTION, x)))
            .or_else(|| self.items.get(GENERIC_RESTRICTION))
    }
}

#[cfg(test)]
mod tests {
    use super::Presets;
    use crate::locale::Translations;
    use crate::osm::Tags;

    #[test]
    fn test_match_relation() {
        let presets = Presets::restrictions(Translations::english());
        let known: Tags = vec![("type", "restriction"), ("restriction", "no_left_turn")]
            .into_iter()
            .collect();
        assert_eq!("No Left Turn", presets.match_relation(&known).unwrap().name);

        let unknown: Tags = vec![("type", "restriction"), ("restriction", "no_entry")]
            .into_iter()
            .collect();
        assert_eq!("Restriction", presets.match_relation(&unknown).unwrap().name);

        let route: Tags = vec![("type", "route")].into_iter().collect();
        assert!(presets.match_relation(&route).is_none());

        assert_eq!(
            "No U-turn",
            presets.item("type/restriction/no_u_turn").unwrap().name
        );
    }
}
