//! Custom-field codec for the Freshservice `type_fields` map
//!
//! Freshservice stores type-specific asset attributes in an open-ended JSON
//! map whose keys carry the owning asset type id as a suffix: a logical
//! field `owner` on asset type 123 is stored under `owner_123`. Values are
//! untyped JSON scalars.
//!
//! This module owns both directions of that mapping: suffixing plus
//! best-effort scalar coercion on write, suffix stripping plus
//! stringification on read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Vendor-side custom field map, keyed by `<field>_<asset_type_id>`.
pub type TypeFields = BTreeMap<String, FieldValue>;

/// A scalar value in the `type_fields` map.
///
/// The vendor API is untyped JSON here; modelling the scalars as an explicit
/// union keeps the coercion rules visible instead of burying them in
/// dynamically-typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// Best-effort coercion of a flat string value into the scalar type the
    /// vendor most likely expects.
    ///
    /// The attempt order is integer, float, bool, then string fallback, and
    /// is observable: `"42"` becomes an integer, never a float. The
    /// coercion is lossy for fields that genuinely want the string `"true"`;
    /// that ambiguity is inherent to the flat input map.
    pub fn coerce(raw: &str) -> FieldValue {
        if let Ok(v) = raw.parse::<i64>() {
            return FieldValue::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            return FieldValue::Float(v);
        }
        if let Ok(v) = raw.parse::<bool>() {
            return FieldValue::Bool(v);
        }
        FieldValue::Str(raw.to_string())
    }

    /// The string content, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

/// Vendor key for a logical field name under the given asset type.
pub fn suffixed(name: &str, asset_type_id: u64) -> String {
    format!("{name}_{asset_type_id}")
}

/// Recover the logical field name from a vendor key.
///
/// A no-op when the key does not end in `_<asset_type_id>`.
pub fn strip_suffix(key: &str, asset_type_id: u64) -> &str {
    key.strip_suffix(&format!("_{asset_type_id}")).unwrap_or(key)
}

/// Encode a flat logical field map into the vendor representation:
/// suffix every key with the asset type id and coerce every value.
pub fn encode_type_fields(flat: &BTreeMap<String, String>, asset_type_id: u64) -> TypeFields {
    flat.iter()
        .map(|(name, value)| (suffixed(name, asset_type_id), FieldValue::coerce(value)))
        .collect()
}

/// Decode a vendor `type_fields` map back into flat logical fields:
/// strip the asset type id suffix and stringify every value. Null entries
/// are dropped.
pub fn decode_type_fields(vendor: &TypeFields, asset_type_id: u64) -> BTreeMap<String, String> {
    vendor
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (strip_suffix(key, asset_type_id).to_string(), value.to_string()))
        .collect()
}
