use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Clan {
    Single(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: Option<String>,
    pub affiliations: Option<Vec<String>>,
    pub clan: Option<Clan>,
    pub nature_types: Option<Vec<String>>,
    pub images: Vec<String>,
}

impl Character {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Reads a character field by field. A field with an unexpected shape is
    /// treated as absent so one odd record never sinks the whole list.
    pub fn from_value(value: &Value) -> Self {
        let personal = value.get("personal");
        Self {
            name: value.get("name").and_then(string_value),
            affiliations: personal
                .and_then(|p| p.get("affiliation"))
                .and_then(string_list),
            clan: personal.and_then(|p| p.get("clan")).and_then(clan_value),
            nature_types: value.get("natureType").and_then(string_list),
            images: value
                .get("images")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

fn clan_value(value: &Value) -> Option<Clan> {
    match value {
        Value::String(s) => Some(Clan::Single(s.clone())),
        Value::Array(_) => string_list(value).map(Clan::Many),
        _ => None,
    }
}
