//! Wire DTOs for the Freshservice asset API
//!
//! Response types mirror the vendor's JSON shapes; request payloads omit
//! absent optional fields from the serialized body, matching what the API
//! expects for partial documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::fields::TypeFields;

/// A tracked inventory item.
///
/// `id` is the vendor's internal identifier; `display_id` is the
/// human-facing sequential identifier the per-asset endpoints are keyed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub display_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub asset_type_id: u64,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub author_type: Option<String>,
    #[serde(default)]
    pub usage_type: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub location_id: Option<u64>,
    #[serde(default)]
    pub department_id: Option<u64>,
    #[serde(default)]
    pub agent_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub assigned_on: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(default)]
    pub created_by_source: Option<String>,
    #[serde(default)]
    pub last_updated_by_source: Option<String>,
    #[serde(default)]
    pub created_by_user: Option<u64>,
    #[serde(default)]
    pub last_updated_by_user: Option<u64>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub mac_addresses: Vec<String>,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub imei_number: Option<String>,
    #[serde(default)]
    pub type_fields: TypeFields,
}

/// A taxonomy category governing which custom fields an asset exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent_asset_type_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for asset create and update calls.
///
/// Also used by the cloud-account resources, which only ever populate
/// `name`, `description`, `asset_type_id`, and `type_fields`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub asset_type_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub type_fields: TypeFields,
}

/// Request body for asset type create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetTypePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_asset_type_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AssetEnvelope {
    pub asset: Asset,
}

#[derive(Debug, Deserialize)]
pub struct AssetListEnvelope {
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
pub struct AssetTypeEnvelope {
    pub asset_type: AssetType,
}

#[derive(Debug, Deserialize)]
pub struct AssetTypeListEnvelope {
    pub asset_types: Vec<AssetType>,
}
