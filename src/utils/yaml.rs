use serde_yaml::{Mapping, Value};

/// Helpers for inspecting and updating collection entries in a requirements document.
pub struct YamlUtils;

impl YamlUtils {
    /// Extracts the `name` of a collection entry.
    pub fn extract_name(entry: &Value) -> Option<&str> {
        entry.as_mapping()?.get("name")?.as_str()
    }

    /// Extracts the pinned `version` when it is a string.
    ///
    /// Unquoted pins such as `1.0` load as numbers and never match a resolved
    /// version string, so they are always rewritten as strings.
    pub fn extract_version(entry: &Value) -> Option<String> {
        let version = entry.as_mapping()?.get("version")?;
        Self::string_value(version)
    }

    /// Describes whatever is pinned under `version`, for reporting only.
    pub fn describe_version(entry: &Value) -> Option<String> {
        let version = entry.as_mapping()?.get("version")?;
        match version {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => serde_yaml::to_string(other)
                .ok()
                .map(|s| s.trim_end().to_string()),
        }
    }

    /// Sets the entry's `version`, inserting the key when the entry was unpinned.
    /// Returns false when the entry is not a mapping.
    pub fn update_version(entry: &mut Value, new_version: &str) -> bool {
        match entry.as_mapping_mut() {
            Some(mapping) => {
                set_version(mapping, new_version);
                true
            }
            None => false,
        }
    }

    fn string_value(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Tagged(tagged) => Self::string_value(&tagged.value),
            _ => None,
        }
    }
}

fn set_version(mapping: &mut Mapping, new_version: &str) {
    // An existing key keeps its position; a new one is appended.
    mapping.insert(
        Value::String("version".to_string()),
        Value::String(new_version.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn extracts_name_and_string_version() {
        let item = entry("name: community.general\nversion: \"8.1.0\"\n");
        assert_eq!(YamlUtils::extract_name(&item), Some("community.general"));
        assert_eq!(YamlUtils::extract_version(&item).as_deref(), Some("8.1.0"));
    }

    #[test]
    fn numeric_version_is_not_a_string_pin() {
        let item = entry("name: a.b\nversion: 1.10\n");
        assert!(YamlUtils::extract_version(&item).is_none());
        assert!(YamlUtils::describe_version(&item).is_some());
    }

    #[test]
    fn unpinned_entry_has_no_version() {
        let item = entry("name: a.b\n");
        assert!(YamlUtils::extract_version(&item).is_none());
    }

    #[test]
    fn update_inserts_version_for_unpinned_entry() {
        let mut item = entry("name: a.b\nsource: https://galaxy.ansible.com\n");
        assert!(YamlUtils::update_version(&mut item, "2.0.0"));
        assert_eq!(YamlUtils::extract_version(&item).as_deref(), Some("2.0.0"));
        let keys: Vec<_> = item
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["name", "source", "version"]);
    }

    #[test]
    fn update_rejects_non_mapping_entry() {
        let mut item = Value::String("a.b".into());
        assert!(!YamlUtils::update_version(&mut item, "2.0.0"));
    }
}
