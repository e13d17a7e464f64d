use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_json<T: Serialize>(obj: &T) -> String {
    // Only fails for maps with non-string keys, which nothing here uses
    serde_json::to_string_pretty(obj).unwrap_or_else(|err| format!("{{\"error\": \"{}\"}}", err))
}

pub fn from_json<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(raw)?)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs_err::read(path)?;
    from_json(&raw).with_context(|| format!("parsing {}", path))
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj))?;
    info!("Wrote {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    #[test]
    fn test_json_helpers() {
        let mut map = BTreeMap::new();
        map.insert("highway".to_string(), "residential".to_string());
        let raw = super::to_json(&map);
        let back: BTreeMap<String, String> = super::from_json(raw.as_bytes()).unwrap();
        assert_eq!(map, back);

        assert!(super::from_json::<BTreeMap<String, String>>(b"not json").is_err());
        assert!(super::read_json::<BTreeMap<String, String>>("/really/should/not/exist").is_err());
    }
}
