//! Codec trait shared by built-in and caller-supplied codecs.

use serde_json::Value;

use crate::error::JsonError;

/// Encode/decode rule for one concrete Rust type.
///
/// A codec registered for `T` replaces the structural mapping of `T`
/// everywhere it appears in a record, including inside `Option<T>`.
pub trait Codec<T>: Send + Sync {
    fn id(&self) -> &'static str;
    fn encode(&self, value: &T) -> Result<Value, JsonError>;
    fn decode(&self, value: &Value) -> Result<T, JsonError>;

    /// JSON emitted for an absent (`None`) value of `T`.
    ///
    /// `None` here means the field is written as JSON null.
    fn encode_absent(&self) -> Option<Value> {
        None
    }
}
