//! Localized strings, looked up by dotted keys like `operations.restriction.help.select`.
//! Values can contain `{param}` placeholders.

use anyhow::Result;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref ENGLISH: Translations = Translations::parse(include_str!("../data/en.json"))
        .unwrap_or_else(|err| {
            warn!("Built-in English strings are broken: {}", err);
            Translations::empty()
        });
}

pub struct Translations {
    root: Value,
}

impl Translations {
    pub fn parse(raw: &str) -> Result<Translations> {
        let root: Value = serde_json::from_str(raw)?;
        if !root.is_object() {
            bail!("Translations must be a JSON object");
        }
        Ok(Translations { root })
    }

    pub fn load(path: &str) -> Result<Translations> {
        let root: Value = abstutil::read_json(path)?;
        if !root.is_object() {
            bail!("{} must contain a JSON object", path);
        }
        Ok(Translations { root })
    }

    pub fn empty() -> Translations {
        Translations {
            root: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn english() -> &'static Translations {
        &ENGLISH
    }

    /// Finds the raw string for a key. A key can also name a flat entry that itself contains
    /// dots or slashes, like `presets` -> `type/restriction`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut current = &self.root;
        let mut rest = key;
        loop {
            let obj = current.as_object()?;
            if let Some(Value::String(s)) = obj.get(rest) {
                return Some(s.as_str());
            }
            let (head, tail) = rest.split_once('.')?;
            current = obj.get(head)?;
            rest = tail;
        }
    }

    /// Looks up a key and substitutes parameters. Missing keys show up as the key itself, so
    /// they're easy to spot.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.get(key) {
            Some(raw) => substitute(raw, params),
            None => {
                warn!("Missing translation for {}", key);
                key.to_string()
            }
        }
    }
}

/// Looks up a key in the built-in English strings.
pub fn t(key: &str, params: &[(&str, &str)]) -> String {
    Translations::english().t(key, params)
}

fn substitute(raw: &str, params: &[(&str, &str)]) -> String {
    let mut result = raw.to_string();
    for (name, value) in params {
        result = result.replace(&format!("{{{}}}", name), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{t, Translations};

    #[test]
    fn test_english() {
        assert_eq!(
            "Click to select a road segment.",
            t("operations.restriction.help.select", &[])
        );
        assert_eq!(
            "Click to add a \"No Left Turn\" restriction.",
            t(
                "operations.restriction.help.toggle_on",
                &[("restriction", "No Left Turn")]
            )
        );
        assert_eq!(
            Some("No U-turn"),
            Translations::english().get("presets.type/restriction/no_u_turn")
        );
    }

    #[test]
    fn test_missing_and_custom() {
        assert_eq!("operations.nope", t("operations.nope", &[]));

        let custom = Translations::parse(
            r#"{"operations": {"restriction": {"help": {"toggle_off": "Quitar {restriction}"}}}}"#,
        )
        .unwrap();
        assert_eq!(
            "Quitar Sin giro",
            custom.t(
                "operations.restriction.help.toggle_off",
                &[("restriction", "Sin giro")]
            )
        );
        assert!(Translations::parse("[1, 2]").is_err());
    }
}
