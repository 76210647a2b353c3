//! Declarative record descriptors.
//!
//! A record type lists its fields once, in declaration order, through
//! [`Record::builder`]. Each entry carries the JSON key, the
//! field's Rust type (which selects its codec) and the exclusion marker.
//! The structural walk reads only these descriptors; there is no runtime
//! introspection.
//!
//! ```
//! use json_facade::{JsonFacade, Record, RecordDescriptor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct MessageRecord {
//!     name: String,
//!     message: String,
//!     session: String,
//! }
//!
//! impl Record for MessageRecord {
//!     fn descriptor() -> RecordDescriptor<Self> {
//!         Self::builder("MessageRecord")
//!             .field("name", |m| &m.name, |m| &mut m.name)
//!             .field("message", |m| &m.message, |m| &mut m.message)
//!             .excluded_field("session", |m| &m.session, |m| &mut m.session)
//!             .build()
//!     }
//! }
//!
//! let facade = JsonFacade::global();
//! let record = MessageRecord {
//!     name: "a".into(),
//!     message: "b".into(),
//!     session: "s".into(),
//! };
//! let text = facade.encode(&record, true).unwrap();
//! assert_eq!(text, r#"{"name":"a","message":"b"}"#);
//!
//! let back: MessageRecord = facade.decode(r#"{"name":null,"session":"s"}"#, true).unwrap();
//! assert_eq!(back, MessageRecord::default());
//! ```

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::error::JsonError;
use crate::field::JsonField;
use crate::registry::CodecSet;

/// A structured type mapped field-by-field to a JSON object.
///
/// Decoding starts from `Default::default()`, so keys missing from the
/// input leave the field at its default.
pub trait Record: Default + 'static {
    fn descriptor() -> RecordDescriptor<Self>;

    /// Starts a descriptor for `Self`, so field accessors infer their
    /// receiver type.
    fn builder(name: &'static str) -> RecordBuilder<Self> {
        RecordDescriptor::builder(name)
    }
}

/// Static facts about one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub type_name: &'static str,
    /// Exclusion marker.
    pub excluded: bool,
}

type EncodeFn<T> = Box<dyn Fn(&T, &CodecSet) -> Result<Value, JsonError> + Send + Sync>;
type DecodeFn<T> = Box<dyn Fn(&mut T, &Value, &CodecSet) -> Result<(), JsonError> + Send + Sync>;

pub struct FieldDescriptor<T> {
    info: FieldInfo,
    encode: EncodeFn<T>,
    decode: DecodeFn<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    pub fn encode(&self, record: &T, codecs: &CodecSet) -> Result<Value, JsonError> {
        (self.encode)(record, codecs)
    }

    pub fn decode_into(
        &self,
        record: &mut T,
        value: &Value,
        codecs: &CodecSet,
    ) -> Result<(), JsonError> {
        (self.decode)(record, value, codecs)
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("info", &self.info)
            .finish()
    }
}

#[derive(Debug)]
pub struct RecordDescriptor<T> {
    name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> RecordDescriptor<T> {
    pub fn builder(name: &'static str) -> RecordBuilder<T> {
        RecordBuilder {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.info.name == name)
    }
}

pub struct RecordBuilder<T> {
    name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> RecordBuilder<T> {
    /// Declares a field that always participates.
    pub fn field<F: JsonField>(
        self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.push(name, false, get, get_mut)
    }

    /// Declares a field carrying the exclusion marker.
    pub fn excluded_field<F: JsonField>(
        self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.push(name, true, get, get_mut)
    }

    fn push<F: JsonField>(
        mut self,
        name: &'static str,
        excluded: bool,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        debug_assert!(
            self.fields.iter().all(|f| f.info.name != name),
            "duplicate field `{name}` in record `{}`",
            self.name
        );
        self.fields.push(FieldDescriptor {
            info: FieldInfo {
                name,
                type_name: type_name::<F>(),
                excluded,
            },
            encode: Box::new(move |record: &T, codecs: &CodecSet| {
                codecs.encode::<F>(get(record))
            }),
            decode: Box::new(move |record: &mut T, value: &Value, codecs: &CodecSet| {
                *get_mut(record) = codecs.decode::<F>(value)?;
                Ok(())
            }),
        });
        self
    }

    pub fn build(self) -> RecordDescriptor<T> {
        RecordDescriptor {
            name: self.name,
            fields: self.fields,
        }
    }
}

static DESCRIPTORS: Lazy<DashMap<TypeId, Arc<dyn Any + Send + Sync>>> = Lazy::new(DashMap::new);

/// Returns the descriptor of `T`, building it on first use.
pub fn descriptor_of<T: Record>() -> Arc<RecordDescriptor<T>> {
    let key = TypeId::of::<T>();
    let cached = DESCRIPTORS.get(&key).map(|entry| Arc::clone(entry.value()));
    let erased = match cached {
        Some(erased) => erased,
        None => {
            // Built outside the map lock: nested records resolve their own
            // descriptors lazily during the walk, never while building.
            let built: Arc<dyn Any + Send + Sync> = Arc::new(T::descriptor());
            Arc::clone(DESCRIPTORS.entry(key).or_insert(built).value())
        }
    };
    match erased.downcast::<RecordDescriptor<T>>() {
        Ok(descriptor) => descriptor,
        Err(_) => unreachable!("descriptor cache is keyed by TypeId"),
    }
}

pub(crate) fn encode_record<T: Record>(record: &T, codecs: &CodecSet) -> Result<Value, JsonError> {
    let descriptor = descriptor_of::<T>();
    let mut out = Map::with_capacity(descriptor.fields.len());
    for field in descriptor.fields() {
        if codecs.should_skip(field.info()) {
            continue;
        }
        let value = field
            .encode(record, codecs)
            .map_err(|err| err.in_field(field.info.name))?;
        out.insert(field.info.name.to_string(), value);
    }
    Ok(Value::Object(out))
}

pub(crate) fn decode_record<T: Record>(value: &Value, codecs: &CodecSet) -> Result<T, JsonError> {
    let descriptor = descriptor_of::<T>();
    let Value::Object(map) = value else {
        return Err(JsonError::mismatch(
            format!("object for {}", descriptor.name),
            value,
        ));
    };
    let mut record = T::default();
    for field in descriptor.fields() {
        if codecs.should_skip(field.info()) {
            continue;
        }
        if let Some(raw) = map.get(field.info.name) {
            field
                .decode_into(&mut record, raw, codecs)
                .map_err(|err| err.in_field(field.info.name))?;
        }
    }
    Ok(record)
}
