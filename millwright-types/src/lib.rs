use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Bundled defaults file

/// Shape of the bundled `default.json` planner defaults.
///
/// Values are kept exactly as written in the file. Missing keys and explicit
/// `null`s fall back to empty collections, `false` and no maximisation target.
/// Unknown keys are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DefaultSettingsFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_limits: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub weights: Map<String, Value>,

    #[serde(default, deserialize_with = "unique_in_order")]
    pub recipes_off: Vec<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Map<String, Value>,

    #[serde(default, deserialize_with = "falsy_as_none")]
    pub max_item: Option<String>,

    #[serde(
        rename = "checkbox_Nuclear Waste",
        default,
        deserialize_with = "null_as_default"
    )]
    pub checkbox_nuclear_waste: bool,
}

impl DefaultSettingsFile {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Disabled recipes form a set: repeats are dropped, first occurrence wins.
fn unique_in_order<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Vec<Value> = null_as_default(deserializer)?;
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

/// `max_item` treats every empty value (`""`, `0`, `false`, `[]`, `{}`) as unset.
/// Other values are kept as text: strings verbatim, everything else as JSON.
fn falsy_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(item)) if item.is_empty() => Ok(None),
        Some(Value::String(item)) => Ok(Some(item)),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Array(a)) if a.is_empty() => Ok(None),
        Some(Value::Object(o)) if o.is_empty() => Ok(None),
        Some(other) => Ok(Some(other.to_string())),
    }
}

// Response types
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DefaultSettingsResponse {
    pub id: i32,
    pub resource_limits: serde_json::Value,
    pub weights: serde_json::Value,
    pub recipes_off: serde_json::Value,
    pub inputs: serde_json::Value,
    pub outputs: serde_json::Value,
    pub max_item: Option<String>,
    pub checkbox_nuclear_waste: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SeedStatus {
    Created,
    AlreadySeeded,
    FileMissing,
    DatabaseNotReady,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SeedResponse {
    pub outcome: SeedStatus,
    pub settings_id: Option<i32>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_file() {
        let raw = br#"{
            "resource_limits": {"Iron Ore": 92100, "Water": 9007199254740993},
            "weights": {"Power": 1, "Resources": 0.5},
            "recipes_off": ["Alternate: Steel Rod", "Alternate: Cast Screw", "Alternate: Steel Rod"],
            "inputs": {"Coal": 240},
            "outputs": {"Computer": 2.5},
            "max_item": "Computer",
            "checkbox_Nuclear Waste": true,
            "theme": "dark"
        }"#;

        let file = DefaultSettingsFile::from_slice(raw).unwrap();

        assert_eq!(file.resource_limits["Iron Ore"], json!(92100));
        assert_eq!(file.resource_limits["Water"].as_u64(), Some(9007199254740993));
        assert_eq!(file.weights["Resources"], json!(0.5));
        assert_eq!(
            file.recipes_off,
            vec![json!("Alternate: Steel Rod"), json!("Alternate: Cast Screw")]
        );
        assert_eq!(file.outputs["Computer"], json!(2.5));
        assert_eq!(file.max_item.as_deref(), Some("Computer"));
        assert!(file.checkbox_nuclear_waste);
    }

    #[test]
    fn test_values_are_kept_as_written() {
        let file = DefaultSettingsFile::from_slice(
            br#"{"weights": {"Power": "1", "Item": [1, 2]}, "inputs": {"Coal": null}}"#,
        )
        .unwrap();

        assert_eq!(file.weights["Power"], json!("1"));
        assert_eq!(file.weights["Item"], json!([1, 2]));
        assert_eq!(file.inputs["Coal"], Value::Null);
        assert_eq!(
            serde_json::to_value(&file.weights).unwrap(),
            json!({"Power": "1", "Item": [1, 2]})
        );
    }

    #[test]
    fn test_missing_and_null_keys_use_defaults() {
        let file = DefaultSettingsFile::from_slice(b"{}").unwrap();
        assert_eq!(file, DefaultSettingsFile::default());

        let file = DefaultSettingsFile::from_slice(
            br#"{"weights": null, "recipes_off": null, "checkbox_Nuclear Waste": null}"#,
        )
        .unwrap();
        assert!(file.weights.is_empty());
        assert!(file.recipes_off.is_empty());
        assert!(!file.checkbox_nuclear_waste);
    }

    #[test]
    fn test_falsy_max_item() {
        for raw in [
            r#"{"max_item": null}"#,
            r#"{"max_item": ""}"#,
            r#"{"max_item": 0}"#,
            r#"{"max_item": 0.0}"#,
            r#"{"max_item": false}"#,
            r#"{"max_item": []}"#,
            r#"{"max_item": {}}"#,
        ] {
            let file = DefaultSettingsFile::from_slice(raw.as_bytes()).unwrap();
            assert_eq!(file.max_item, None, "{}", raw);
        }
    }

    #[test]
    fn test_truthy_max_item_keeps_text_form() {
        for (raw, expected) in [
            (r#"{"max_item": 42}"#, "42"),
            (r#"{"max_item": true}"#, "true"),
            (r#"{"max_item": ["Plastic"]}"#, r#"["Plastic"]"#),
            (r#"{"max_item": {"a": 1}}"#, r#"{"a":1}"#),
        ] {
            let file = DefaultSettingsFile::from_slice(raw.as_bytes()).unwrap();
            assert_eq!(file.max_item.as_deref(), Some(expected), "{}", raw);
        }
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(DefaultSettingsFile::from_slice(br#"{"weights": [1, 2]}"#).is_err());
        assert!(DefaultSettingsFile::from_slice(br#"{"recipes_off": "A"}"#).is_err());
        assert!(DefaultSettingsFile::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_nuclear_waste_key_round_trips_with_space() {
        let file = DefaultSettingsFile {
            checkbox_nuclear_waste: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["checkbox_Nuclear Waste"], json!(true));
    }

    #[test]
    fn test_seed_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&SeedStatus::DatabaseNotReady).unwrap(),
            "\"database_not_ready\""
        );
    }
}
