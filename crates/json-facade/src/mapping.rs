//! Conversions between JSON Value Trees and plain nested mappings.
//!
//! This layer sits below the coercion codecs: JSON null is preserved as
//! `None` instead of being replaced with a zero value.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::error::JsonError;

pub type PlainMap = IndexMap<String, Option<PlainValue>>;
pub type PlainList = Vec<Option<PlainValue>>;

/// A non-null JSON value with containers expressed as plain collections.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Bool(bool),
    Number(Number),
    String(String),
    Map(PlainMap),
    List(PlainList),
}

impl From<bool> for PlainValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PlainValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for PlainValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PlainValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<PlainMap> for PlainValue {
    fn from(value: PlainMap) -> Self {
        Self::Map(value)
    }
}

impl From<PlainList> for PlainValue {
    fn from(value: PlainList) -> Self {
        Self::List(value)
    }
}

/// Recursively converts a tree; JSON null becomes `None`.
pub fn tree_to_mapping(tree: &Value) -> Option<PlainValue> {
    match tree {
        Value::Null => None,
        Value::Bool(b) => Some(PlainValue::Bool(*b)),
        Value::Number(n) => Some(PlainValue::Number(n.clone())),
        Value::String(s) => Some(PlainValue::String(s.clone())),
        Value::Array(items) => Some(PlainValue::List(items.iter().map(tree_to_mapping).collect())),
        Value::Object(map) => Some(PlainValue::Map(object_to_map(map))),
    }
}

/// Inverse of [`tree_to_mapping`]; `None` becomes JSON null.
pub fn mapping_to_tree(value: Option<&PlainValue>) -> Value {
    match value {
        None => Value::Null,
        Some(PlainValue::Bool(b)) => Value::Bool(*b),
        Some(PlainValue::Number(n)) => Value::Number(n.clone()),
        Some(PlainValue::String(s)) => Value::String(s.clone()),
        Some(PlainValue::Map(map)) => Value::Object(map_to_object(map)),
        Some(PlainValue::List(items)) => {
            Value::Array(items.iter().map(|v| mapping_to_tree(v.as_ref())).collect())
        }
    }
}

pub fn map_to_object(map: &PlainMap) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), mapping_to_tree(v.as_ref())))
        .collect()
}

fn object_to_map(map: &Map<String, Value>) -> PlainMap {
    map.iter()
        .map(|(k, v)| (k.clone(), tree_to_mapping(v)))
        .collect()
}

/// Converts a JSON object into a plain map.
pub fn to_map(tree: &Value) -> Result<PlainMap, JsonError> {
    match tree {
        Value::Object(map) => Ok(object_to_map(map)),
        other => Err(JsonError::mismatch("object", other)),
    }
}

/// Converts a JSON array into a plain list.
pub fn to_list(tree: &Value) -> Result<PlainList, JsonError> {
    match tree {
        Value::Array(items) => Ok(items.iter().map(tree_to_mapping).collect()),
        other => Err(JsonError::mismatch("array", other)),
    }
}

/// Converts the object stored under `key` into a plain map.
pub fn get_map(tree: &Value, key: &str) -> Result<PlainMap, JsonError> {
    let Value::Object(map) = tree else {
        return Err(JsonError::mismatch("object", tree));
    };
    let child = map.get(key).unwrap_or(&Value::Null);
    to_map(child).map_err(|err| err.in_field(key))
}

/// Flattens one level of an object into string values.
///
/// Strings are taken as-is, null becomes the empty string and everything
/// else is rendered as compact JSON text.
pub fn to_string_map(tree: &Value) -> Result<IndexMap<String, String>, JsonError> {
    let Value::Object(map) = tree else {
        return Err(JsonError::mismatch("object", tree));
    };
    Ok(map
        .iter()
        .map(|(k, v)| {
            let text = match v {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect())
}

/// True for an object with no keys.
pub fn is_empty_object(tree: &Value) -> bool {
    matches!(tree, Value::Object(map) if map.is_empty())
}
