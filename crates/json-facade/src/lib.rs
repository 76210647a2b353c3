//! JSON text <-> object facade with per-type coercion and field exclusion.
//!
//! Record types describe their fields with a [`RecordDescriptor`]; the
//! [`JsonFacade`] maps them to and from JSON text through a [`CodecSet`]
//! selected per call:
//!
//! - the built-in codecs for `String`, `i32`, `i64` and `f64` read JSON
//!   null, `""` and `"null"` as the type's zero and never write null;
//! - the exclusion-aware set skips every field declared with
//!   [`RecordBuilder::excluded_field`], in both directions.
//!
//! Envelope helpers pull the payload out from under a top-level `data` key
//! before decoding.

pub mod codecs;
pub mod error;
pub mod exclusion;
pub mod facade;
pub mod field;
pub mod mapping;
pub mod record;
pub mod registry;

pub use codecs::Codec;
pub use error::{ErrorKind, FieldPath, JsonError};
pub use exclusion::ExclusionPolicy;
pub use facade::{JsonFacade, ENVELOPE_KEY};
pub use field::JsonField;
pub use mapping::{mapping_to_tree, tree_to_mapping, PlainList, PlainMap, PlainValue};
pub use record::{FieldDescriptor, FieldInfo, Record, RecordBuilder, RecordDescriptor};
pub use registry::{CodecOverrides, CodecRegistry, CodecSet};
