//! Codec sets and the registry that owns the canonical pair.
//!
//! A [`CodecSet`] bundles the per-type codecs with the active exclusion
//! policy. [`CodecRegistry`] lazily builds the "normal" and
//! "exclusion-aware" sets exactly once each and hands out shared references
//! for the rest of its lifetime.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use serde_json::Value;

use crate::codecs::{Codec, DoubleCodec, IntegerCodec, LongCodec, StringCodec};
use crate::error::JsonError;
use crate::exclusion::ExclusionPolicy;
use crate::field::JsonField;
use crate::record::FieldInfo;

/// Type-erased `Arc<dyn Codec<T>>`, keyed by `TypeId::of::<T>()`.
#[derive(Clone)]
struct CodecEntry {
    type_name: &'static str,
    id: &'static str,
    codec: Arc<dyn Any + Send + Sync>,
}

impl CodecEntry {
    fn new<T: 'static>(codec: Arc<dyn Codec<T>>) -> Self {
        Self {
            type_name: type_name::<T>(),
            id: codec.id(),
            codec: Arc::new(codec),
        }
    }
}

/// Caller-supplied codecs for types other than the four coercion-covered ones.
#[derive(Clone, Default)]
pub struct CodecOverrides {
    entries: Vec<(TypeId, CodecEntry)>,
}

impl CodecOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: 'static>(mut self, codec: impl Codec<T> + 'static) -> Self {
        let codec: Arc<dyn Codec<T>> = Arc::new(codec);
        self.entries.push((TypeId::of::<T>(), CodecEntry::new(codec)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CodecOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(_, e)| e.type_name))
            .finish()
    }
}

/// The codecs and exclusion policy active for one encode/decode call.
pub struct CodecSet {
    codecs: HashMap<TypeId, CodecEntry>,
    exclusion: ExclusionPolicy,
}

impl CodecSet {
    pub fn exclusion(&self) -> ExclusionPolicy {
        self.exclusion
    }

    pub fn should_skip(&self, field: &FieldInfo) -> bool {
        self.exclusion.should_skip(field)
    }

    /// Returns the codec registered for exactly `T`.
    pub fn lookup<T: 'static>(&self) -> Option<&dyn Codec<T>> {
        self.codecs
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.codec.downcast_ref::<Arc<dyn Codec<T>>>())
            .map(|codec| &**codec)
    }

    pub fn covers<T: 'static>(&self) -> bool {
        self.codecs.contains_key(&TypeId::of::<T>())
    }

    pub fn encode<T: JsonField>(&self, value: &T) -> Result<Value, JsonError> {
        match self.lookup::<T>() {
            Some(codec) => codec.encode(value),
            None => value.to_json(self),
        }
    }

    pub fn decode<T: JsonField>(&self, value: &Value) -> Result<T, JsonError> {
        match self.lookup::<T>() {
            Some(codec) => codec.decode(value),
            None => T::from_json(value, self),
        }
    }

    /// JSON written for an absent `T`; null unless a codec says otherwise.
    pub fn encode_absent<T: 'static>(&self) -> Value {
        self.lookup::<T>()
            .and_then(|codec| codec.encode_absent())
            .unwrap_or(Value::Null)
    }
}

impl fmt::Debug for CodecSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codecs: Vec<_> = self
            .codecs
            .values()
            .map(|e| (e.type_name, e.id))
            .collect();
        codecs.sort_unstable();
        f.debug_struct("CodecSet")
            .field("codecs", &codecs)
            .field("exclusion", &self.exclusion)
            .finish()
    }
}

static GLOBAL: Lazy<Arc<CodecRegistry>> = Lazy::new(|| Arc::new(CodecRegistry::new()));

/// Owner of the two canonical codec sets.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    overrides: CodecOverrides,
    normal: OnceCell<CodecSet>,
    exclusion_aware: OnceCell<CodecSet>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose canonical sets also carry `overrides`.
    pub fn with_overrides(overrides: CodecOverrides) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<CodecRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the canonical set, building it on first call.
    ///
    /// Concurrent first calls block on a single construction; every caller
    /// observes the same instance afterwards.
    pub fn codecs(&self, exclude_marked: bool) -> &CodecSet {
        let cell = if exclude_marked {
            &self.exclusion_aware
        } else {
            &self.normal
        };
        cell.get_or_init(|| {
            tracing::debug!(
                exclude_marked,
                overrides = self.overrides.len(),
                "building canonical codec set"
            );
            Self::build_codecs(self.overrides.clone(), exclude_marked)
        })
    }

    /// Builds a fresh, uncached set.
    ///
    /// Overrides are applied first and the built-in coercion codecs last, so
    /// an override for `String`, `i32`, `i64` or `f64` is shadowed.
    pub fn build_codecs(overrides: CodecOverrides, exclude_marked: bool) -> CodecSet {
        let mut codecs: HashMap<TypeId, CodecEntry> = overrides.entries.into_iter().collect();

        let builtins = [
            (TypeId::of::<String>(), CodecEntry::new::<String>(Arc::new(StringCodec))),
            (TypeId::of::<i32>(), CodecEntry::new::<i32>(Arc::new(IntegerCodec))),
            (TypeId::of::<i64>(), CodecEntry::new::<i64>(Arc::new(LongCodec))),
            (TypeId::of::<f64>(), CodecEntry::new::<f64>(Arc::new(DoubleCodec))),
        ];
        for (key, entry) in builtins {
            if let Some(shadowed) = codecs.insert(key, entry) {
                tracing::debug!(
                    type_name = shadowed.type_name,
                    codec = shadowed.id,
                    "override shadowed by built-in coercion codec"
                );
            }
        }

        CodecSet {
            codecs,
            exclusion: ExclusionPolicy::from_flag(exclude_marked),
        }
    }
}
