//! Inert sequence codec.
//!
//! Sequence-typed fields are registered as coercion-covered but carry no
//! real mapping: encode always writes JSON null and decode always yields an
//! empty vector, whatever the input. Callers that need sequence fields to
//! round-trip must register an override for the exact `Vec<T>` type.

use std::marker::PhantomData;

use serde_json::Value;

use super::types::Codec;
use crate::error::JsonError;

pub struct InertSequenceCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for InertSequenceCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InertSequenceCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Codec<Vec<T>> for InertSequenceCodec<T> {
    fn id(&self) -> &'static str {
        "sequence"
    }

    fn encode(&self, _value: &Vec<T>) -> Result<Value, JsonError> {
        Ok(Value::Null)
    }

    fn decode(&self, _value: &Value) -> Result<Vec<T>, JsonError> {
        Ok(Vec::new())
    }
}
