//! Flat JSON codec for [`Record`] types.
//!
//! Encoding merges declared fields and raw values into one object. Decoding
//! binds declared fields the usual serde way and then refills the record's raw
//! values with the complete input object, so keys consumed by declared fields
//! stay readable through [`Record::raw_values`] as well.

mod config;
mod hooks;

pub use config::{CodecConfig, OverlapPolicy};
pub use hooks::{BindHook, HookRegistry};

use crate::record::Record;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::any::type_name;
use std::io::{Read, Write};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
    hooks: HookRegistry,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            hooks: HookRegistry::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Declared fields unioned with raw values, overlaps resolved by the
    /// configured [`OverlapPolicy`].
    pub fn to_map<R: Record>(&self, record: &R) -> Result<Map<String, Value>> {
        let mut flat = record.declared_fields()?;

        for (key, raw) in record.raw_values() {
            let keep_declared = match self.config.overlap {
                OverlapPolicy::DeclaredWins => flat.get(key).is_some_and(|v| !v.is_null()),
                OverlapPolicy::AuxiliaryWins => false,
            };

            if keep_declared {
                trace!("Raw value '{}' shadowed by declared field", key);
            } else {
                flat.insert(key.clone(), raw.clone());
            }
        }

        debug!(
            "Encoded {} into {} keys ({} raw)",
            type_name::<R>(),
            flat.len(),
            record.raw_values().len()
        );
        Ok(flat)
    }

    pub fn to_value<R: Record>(&self, record: &R) -> Result<Value> {
        self.to_map(record).map(Value::Object)
    }

    pub fn to_string<R: Record>(&self, record: &R) -> Result<String> {
        let flat = self.to_map(record)?;
        serde_json::to_string(&flat).map_err(Error::Encode)
    }

    pub fn to_string_pretty<R: Record>(&self, record: &R) -> Result<String> {
        let flat = self.to_map(record)?;
        serde_json::to_string_pretty(&flat).map_err(Error::Encode)
    }

    pub fn to_vec<R: Record>(&self, record: &R) -> Result<Vec<u8>> {
        let flat = self.to_map(record)?;
        serde_json::to_vec(&flat).map_err(Error::Encode)
    }

    pub fn to_writer<R: Record, W: Write>(&self, writer: W, record: &R) -> Result<()> {
        let flat = self.to_map(record)?;
        serde_json::to_writer(writer, &flat).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::Encode(e)
            }
        })
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    pub fn from_str<R: Record>(&self, input: &str) -> Result<R> {
        trace!("Decoding {}: {}", type_name::<R>(), input);
        let tree: Value = serde_json::from_str(input).map_err(Error::Parse)?;
        self.from_value(tree)
    }

    pub fn from_slice<R: Record>(&self, input: &[u8]) -> Result<R> {
        let tree: Value = serde_json::from_slice(input).map_err(Error::Parse)?;
        self.from_value(tree)
    }

    pub fn from_reader<R: Record, Rd: Read>(&self, reader: Rd) -> Result<R> {
        let tree: Value = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::Parse(e)
            }
        })?;
        self.from_value(tree)
    }

    /// Binds an already parsed tree. Non-object trees are rejected before any
    /// hook runs.
    pub fn from_value<R: Record>(&self, tree: Value) -> Result<R> {
        let input = match tree {
            Value::Object(map) => map,
            other => return Err(Error::not_an_object(&other)),
        };

        let mut bindable = input.clone();
        if let Some(hook) = self.hooks.get::<R>() {
            debug!("Running bind hook for {}", type_name::<R>());
            hook.before_bind(&mut bindable).map_err(|message| Error::Hook {
                type_name: type_name::<R>(),
                message,
            })?;
        }

        let mut record: R =
            serde_json::from_value(Value::Object(bindable)).map_err(Error::bind::<R>)?;

        if self.config.capture_all {
            let key_count = input.len();
            record.raw_values_mut().replace(input);
            debug!(
                "Decoded {} and captured {} raw values",
                type_name::<R>(),
                key_count
            );
        } else {
            debug!("Decoded {} without raw value capture", type_name::<R>());
        }

        Ok(record)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Raw value keys that no declared field of `record` carries.
    pub fn unbound_keys<R: Record>(&self, record: &R) -> Result<Vec<String>> {
        let declared = record.declared_fields()?;
        Ok(record
            .raw_values()
            .keys()
            .filter(|key| !declared.contains_key(key.as_str()))
            .cloned()
            .collect())
    }
}

/// Compares two records by their declared fields only.
pub fn declared_eq<A: Record, B: Record>(a: &A, b: &B) -> Result<bool> {
    Ok(a.declared_fields()? == b.declared_fields()?)
}
