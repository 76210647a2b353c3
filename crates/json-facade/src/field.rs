//! Structural mapping for every type a record field may hold.
//!
//! [`CodecSet::encode`] and [`CodecSet::decode`] consult the registered
//! codec for a type first and fall back to the [`JsonField`] impl below.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::codecs::{Codec, DoubleCodec, InertSequenceCodec, IntegerCodec, LongCodec, StringCodec};
use crate::error::JsonError;
use crate::record::{decode_record, encode_record, Record};
use crate::registry::CodecSet;

/// A type with a JSON shape.
pub trait JsonField: Sized + 'static {
    fn to_json(&self, codecs: &CodecSet) -> Result<Value, JsonError>;
    fn from_json(value: &Value, codecs: &CodecSet) -> Result<Self, JsonError>;
}

// The four coercion-covered types always have a registered codec; these
// impls only matter for a set built without the built-ins, and keep the
// same semantics.

impl JsonField for String {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        StringCodec.encode(self)
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        StringCodec.decode(value)
    }
}

impl JsonField for i32 {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        IntegerCodec.encode(self)
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        IntegerCodec.decode(value)
    }
}

impl JsonField for i64 {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        LongCodec.encode(self)
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        LongCodec.decode(value)
    }
}

impl JsonField for f64 {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        DoubleCodec.encode(self)
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        DoubleCodec.decode(value)
    }
}

impl JsonField for bool {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        Ok(Value::Bool(*self))
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        value
            .as_bool()
            .ok_or_else(|| JsonError::mismatch("boolean", value))
    }
}

/// Opaque passthrough.
impl JsonField for Value {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        Ok(self.clone())
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        Ok(value.clone())
    }
}

/// Absence of a codec-covered `T` is normalized through that codec: the
/// coercion codecs write their zero value and read JSON null as
/// `Some(zero)`. Without a codec, `None` and JSON null map to each other.
impl<T: JsonField> JsonField for Option<T> {
    fn to_json(&self, codecs: &CodecSet) -> Result<Value, JsonError> {
        match self {
            Some(inner) => codecs.encode(inner),
            None => Ok(codecs.encode_absent::<T>()),
        }
    }

    fn from_json(value: &Value, codecs: &CodecSet) -> Result<Self, JsonError> {
        if codecs.covers::<T>() || !value.is_null() {
            codecs.decode::<T>(value).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Sequence fields are inert: see [`InertSequenceCodec`].
impl<T: JsonField> JsonField for Vec<T> {
    fn to_json(&self, _codecs: &CodecSet) -> Result<Value, JsonError> {
        InertSequenceCodec::<T>::new().encode(self)
    }

    fn from_json(value: &Value, _codecs: &CodecSet) -> Result<Self, JsonError> {
        InertSequenceCodec::<T>::new().decode(value)
    }
}

impl<V: JsonField> JsonField for IndexMap<String, V> {
    fn to_json(&self, codecs: &CodecSet) -> Result<Value, JsonError> {
        let mut out = Map::with_capacity(self.len());
        for (key, value) in self {
            let encoded = codecs.encode(value).map_err(|err| err.in_field(key))?;
            out.insert(key.clone(), encoded);
        }
        Ok(Value::Object(out))
    }

    fn from_json(value: &Value, codecs: &CodecSet) -> Result<Self, JsonError> {
        let Value::Object(map) = value else {
            return Err(JsonError::mismatch("object", value));
        };
        let mut out = IndexMap::with_capacity(map.len());
        for (key, raw) in map {
            let decoded = codecs.decode::<V>(raw).map_err(|err| err.in_field(key))?;
            out.insert(key.clone(), decoded);
        }
        Ok(out)
    }
}

impl<T: Record> JsonField for T {
    fn to_json(&self, codecs: &CodecSet) -> Result<Value, JsonError> {
        encode_record(self, codecs)
    }

    fn from_json(value: &Value, codecs: &CodecSet) -> Result<Self, JsonError> {
        decode_record(value, codecs)
    }
}
