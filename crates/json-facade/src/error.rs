//! Error taxonomy shared by every facade operation.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Record fields and map keys leading to a failing value, outermost first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    /// Renders `a.b: `, or nothing for an empty path. Segments that would
    /// be ambiguous in that form are written as JSON string literals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            if is_plain_segment(segment) {
                f.write_str(segment)?;
            } else {
                write!(f, "{}", Value::String(segment.clone()))?;
            }
        }
        f.write_str(": ")
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Error)]
pub enum JsonError {
    /// Input text is not valid JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    /// A coercion-covered value is present but cannot be converted.
    #[error("malformed {path}{expected} value `{raw}`")]
    MalformedValue {
        path: FieldPath,
        expected: String,
        raw: String,
    },
    /// The tree shape does not match the requested type.
    #[error("type mismatch: expected {path}{expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: String,
        found: &'static str,
    },
    /// A required envelope key is missing or has the wrong shape.
    #[error("envelope shape error: {0}")]
    EnvelopeShape(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    MalformedJson,
    MalformedValue,
    TypeMismatch,
    EnvelopeShape,
}

impl JsonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedJson(_) => ErrorKind::MalformedJson,
            Self::MalformedValue { .. } => ErrorKind::MalformedValue,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::EnvelopeShape(_) => ErrorKind::EnvelopeShape,
        }
    }

    pub fn malformed(expected: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedValue {
            path: FieldPath::default(),
            expected: expected.into(),
            raw: raw.into(),
        }
    }

    pub fn mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::TypeMismatch {
            path: FieldPath::default(),
            expected: expected.into(),
            found: shape_name(found),
        }
    }

    pub fn envelope(message: impl Into<String>) -> Self {
        Self::EnvelopeShape(message.into())
    }

    /// Field path of a value error; `None` for parse and envelope errors.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::MalformedValue { path, .. } | Self::TypeMismatch { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Prepends the record field or map key the error was raised in.
    ///
    /// Nested records call this on the way out, so the path reads from the
    /// outermost field (`profile.age: integer`).
    pub fn in_field(mut self, field: &str) -> Self {
        if let Self::MalformedValue { path, .. } | Self::TypeMismatch { path, .. } = &mut self {
            path.0.insert(0, field.to_string());
        }
        self
    }
}

/// Short name of a JSON value's shape, used in mismatch messages.
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_mapping_is_stable() {
        let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
        let cases = [
            (JsonError::MalformedJson(parse_err), ErrorKind::MalformedJson),
            (JsonError::malformed("integer", "abc"), ErrorKind::MalformedValue),
            (JsonError::mismatch("string", &json!([])), ErrorKind::TypeMismatch),
            (JsonError::envelope("missing `data`"), ErrorKind::EnvelopeShape),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn field_path_nests_with_dots() {
        let err = JsonError::mismatch("integer", &json!(true))
            .in_field("age")
            .in_field("profile");
        assert_eq!(
            err.to_string(),
            "type mismatch: expected profile.age: integer, found boolean"
        );
    }

    #[test]
    fn awkward_keys_are_quoted_in_the_path() {
        let err = JsonError::malformed("integer", "x")
            .in_field("c: d")
            .in_field("a b")
            .in_field("items");
        assert_eq!(
            err.path().unwrap().segments(),
            ["items", "a b", "c: d"]
        );
        assert_eq!(
            err.to_string(),
            r#"malformed items."a b"."c: d": integer value `x`"#
        );
    }

    #[test]
    fn envelope_errors_ignore_field_context() {
        let err = JsonError::envelope("missing `data`").in_field("x");
        assert_eq!(err.to_string(), "envelope shape error: missing `data`");
        assert!(err.path().is_none());
    }
}
