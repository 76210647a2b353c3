//! Null-to-zero coercion codecs for string, integer, long and double.
//!
//! JSON null, the empty string and the literal string `"null"` are all read
//! as "no value" and decode to the type's zero. Anything else must convert
//! cleanly or the decode fails with [`JsonError::MalformedValue`].

use serde_json::{Number, Value};

use super::types::Codec;
use crate::error::JsonError;

/// True for the three interchangeable spellings of "no value".
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "null",
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn id(&self) -> &'static str {
        "string"
    }

    fn encode(&self, value: &String) -> Result<Value, JsonError> {
        Ok(Value::String(value.clone()))
    }

    fn decode(&self, value: &Value) -> Result<String, JsonError> {
        if is_absent(value) {
            return Ok(String::new());
        }
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(JsonError::mismatch("string", other)),
        }
    }

    fn encode_absent(&self) -> Option<Value> {
        Some(Value::String(String::new()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCodec;

impl Codec<i32> for IntegerCodec {
    fn id(&self) -> &'static str {
        "integer"
    }

    fn encode(&self, value: &i32) -> Result<Value, JsonError> {
        Ok(Value::from(*value))
    }

    fn decode(&self, value: &Value) -> Result<i32, JsonError> {
        if is_absent(value) {
            return Ok(0);
        }
        let wide = decode_integral(value, "integer")?;
        i32::try_from(wide).map_err(|_| JsonError::malformed("integer", raw_text(value)))
    }

    fn encode_absent(&self) -> Option<Value> {
        Some(Value::from(0_i32))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongCodec;

impl Codec<i64> for LongCodec {
    fn id(&self) -> &'static str {
        "long"
    }

    fn encode(&self, value: &i64) -> Result<Value, JsonError> {
        Ok(Value::from(*value))
    }

    fn decode(&self, value: &Value) -> Result<i64, JsonError> {
        if is_absent(value) {
            return Ok(0);
        }
        decode_integral(value, "long")
    }

    fn encode_absent(&self) -> Option<Value> {
        Some(Value::from(0_i64))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCodec;

impl Codec<f64> for DoubleCodec {
    fn id(&self) -> &'static str {
        "double"
    }

    fn encode(&self, value: &f64) -> Result<Value, JsonError> {
        Number::from_f64(*value)
            .map(Value::Number)
            .ok_or_else(|| JsonError::malformed("double", value.to_string()))
    }

    fn decode(&self, value: &Value) -> Result<f64, JsonError> {
        if is_absent(value) {
            return Ok(0.0);
        }
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(_) => None,
            other => return Err(JsonError::mismatch("double", other)),
        };
        parsed
            .filter(|f| f.is_finite())
            .ok_or_else(|| JsonError::malformed("double", raw_text(value)))
    }

    fn encode_absent(&self) -> Option<Value> {
        Some(Value::from(0.0_f64))
    }
}

/// Integral conversion shared by the integer and long codecs.
///
/// Fractional numbers truncate toward zero; numeric strings must parse as an
/// integer literal.
fn decode_integral(value: &Value, expected: &'static str) -> Result<i64, JsonError> {
    let malformed = || JsonError::malformed(expected, raw_text(value));
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(malformed());
            }
            match n.as_f64() {
                // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f.trunc() as i64)
                }
                _ => Err(malformed()),
            }
        }
        Value::String(s) => s.parse::<i64>().map_err(|_| malformed()),
        Value::Bool(_) => Err(malformed()),
        other => Err(JsonError::mismatch(expected, other)),
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
