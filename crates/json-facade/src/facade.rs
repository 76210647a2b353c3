//! Public text <-> object entry points.
//!
//! Every operation takes `exclude_marked`, which selects the
//! exclusion-aware codec set (`true`) or the normal one (`false`).

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::JsonError;
use crate::field::JsonField;
use crate::mapping::{map_to_object, PlainMap};
use crate::registry::{CodecRegistry, CodecSet};

/// Key holding the payload of an envelope document.
pub const ENVELOPE_KEY: &str = "data";

static GLOBAL: Lazy<JsonFacade> = Lazy::new(|| JsonFacade::new(CodecRegistry::global()));

#[derive(Debug, Clone)]
pub struct JsonFacade {
    registry: Arc<CodecRegistry>,
}

impl Default for JsonFacade {
    fn default() -> Self {
        Self::new(Arc::new(CodecRegistry::new()))
    }
}

impl JsonFacade {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    /// Facade over the process-wide registry.
    pub fn global() -> &'static JsonFacade {
        &GLOBAL
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    pub fn codecs(&self, exclude_marked: bool) -> &CodecSet {
        self.registry.codecs(exclude_marked)
    }

    /// Encodes `obj` as compact JSON text.
    pub fn encode<T: JsonField>(&self, obj: &T, exclude_marked: bool) -> Result<String, JsonError> {
        let tree = self.codecs(exclude_marked).encode(obj)?;
        Ok(tree.to_string())
    }

    pub fn decode<T: JsonField>(&self, text: &str, exclude_marked: bool) -> Result<T, JsonError> {
        let tree = parse(text)?;
        self.codecs(exclude_marked).decode(&tree)
    }

    /// Decodes a top-level JSON array element by element.
    ///
    /// Empty or blank text yields an empty vector without parsing.
    pub fn decode_list<T: JsonField>(
        &self,
        text: &str,
        exclude_marked: bool,
    ) -> Result<Vec<T>, JsonError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tree = parse(text)?;
        let Value::Array(items) = &tree else {
            return Err(JsonError::mismatch("array", &tree));
        };
        self.decode_items(items, exclude_marked)
    }

    /// Decodes the object at `data`, or at `data.<nested_key>`.
    pub fn decode_envelope<T: JsonField>(
        &self,
        text: &str,
        nested_key: Option<&str>,
        exclude_marked: bool,
    ) -> Result<T, JsonError> {
        let root = parse_envelope(text)?;
        let mut payload = object_at(&root, ENVELOPE_KEY, ENVELOPE_KEY)?;
        if let Some(key) = nested_key {
            let path = format!("{ENVELOPE_KEY}.{key}");
            payload = object_at(payload, key, &path)?;
        }
        tracing::trace!(nested_key, "decoding envelope payload");
        self.codecs(exclude_marked).decode(payload)
    }

    /// Decodes the array at `data`, or at `data.<list_key>`.
    pub fn decode_envelope_list<T: JsonField>(
        &self,
        text: &str,
        list_key: Option<&str>,
        exclude_marked: bool,
    ) -> Result<Vec<T>, JsonError> {
        let root = parse_envelope(text)?;
        let items = match list_key {
            None => array_at(&root, ENVELOPE_KEY, ENVELOPE_KEY)?,
            Some(key) => {
                let data = object_at(&root, ENVELOPE_KEY, ENVELOPE_KEY)?;
                array_at(data, key, &format!("{ENVELOPE_KEY}.{key}"))?
            }
        };
        tracing::trace!(list_key, len = items.len(), "decoding envelope list");
        self.decode_items(items, exclude_marked)
    }

    /// Value copy through an encode/decode round trip.
    ///
    /// Absent coercion-covered values come back as zero, and with
    /// `exclude_marked` set the marked fields come back at their default.
    pub fn deep_copy<T: JsonField>(&self, obj: &T, exclude_marked: bool) -> Result<T, JsonError> {
        let codecs = self.codecs(exclude_marked);
        let tree = codecs.encode(obj)?;
        codecs.decode(&tree)
    }

    /// Encodes an ordered string-keyed map.
    pub fn encode_map<V: JsonField>(
        &self,
        map: &IndexMap<String, V>,
        exclude_marked: bool,
    ) -> Result<String, JsonError> {
        self.encode(map, exclude_marked)
    }

    /// Builds a typed object from a plain mapping.
    pub fn decode_map<T: JsonField>(
        &self,
        map: &PlainMap,
        exclude_marked: bool,
    ) -> Result<T, JsonError> {
        let tree = Value::Object(map_to_object(map));
        self.codecs(exclude_marked).decode(&tree)
    }

    fn decode_items<T: JsonField>(
        &self,
        items: &[Value],
        exclude_marked: bool,
    ) -> Result<Vec<T>, JsonError> {
        let codecs = self.codecs(exclude_marked);
        items.iter().map(|item| codecs.decode(item)).collect()
    }
}

fn parse(text: &str) -> Result<Value, JsonError> {
    serde_json::from_str(text).map_err(JsonError::MalformedJson)
}

fn parse_envelope(text: &str) -> Result<Value, JsonError> {
    if text.trim().is_empty() {
        return Err(JsonError::envelope("empty document"));
    }
    let root = parse(text)?;
    if !root.is_object() {
        return Err(JsonError::envelope(format!(
            "document root must be an object, found {}",
            crate::error::shape_name(&root)
        )));
    }
    Ok(root)
}

fn child<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Value, JsonError> {
    parent
        .get(key)
        .ok_or_else(|| JsonError::envelope(format!("missing `{path}`")))
}

fn object_at<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Value, JsonError> {
    let value = child(parent, key, path)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(JsonError::envelope(format!(
            "`{path}` must be an object, found {}",
            crate::error::shape_name(value)
        )))
    }
}

fn array_at<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a [Value], JsonError> {
    match child(parent, key, path)? {
        Value::Array(items) => Ok(items),
        other => Err(JsonError::envelope(format!(
            "`{path}` must be an array, found {}",
            crate::error::shape_name(other)
        ))),
    }
}
