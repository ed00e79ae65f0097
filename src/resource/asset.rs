//! Generic asset resource
//!
//! Manages arbitrary Freshservice assets. Type-specific attributes are
//! declared as a flat string map and run through the custom-field codec,
//! which suffixes every key with the asset type id and coerces values to
//! the scalar type the vendor most likely expects.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::fresh::client::FreshClient;
use crate::fresh::fields::{decode_type_fields, encode_type_fields};
use crate::fresh::model::{Asset, AssetEnvelope, AssetPayload};

/// Declared configuration for a generic asset.
///
/// `asset_type_id` is immutable after creation: custom-field keys are only
/// meaningful under the type id suffix they were written with, so changing
/// the type requires replacing the asset.
#[derive(Debug, Clone)]
pub struct AssetSpec {
    pub name: String,
    pub description: Option<String>,
    pub asset_type_id: u64,
    /// Impact level: low, medium, or high.
    pub impact: String,
    /// Usage type: permanent or loaner.
    pub usage_type: String,
    pub user_id: Option<u64>,
    pub location_id: Option<u64>,
    pub department_id: Option<u64>,
    pub agent_id: Option<u64>,
    pub group_id: Option<u64>,
    /// Logical custom-field names and values; keys are suffixed with the
    /// asset type id before they reach the API.
    pub type_fields: BTreeMap<String, String>,
}

impl AssetSpec {
    pub fn new(name: impl Into<String>, asset_type_id: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            asset_type_id,
            impact: "low".to_string(),
            usage_type: "permanent".to_string(),
            user_id: None,
            location_id: None,
            department_id: None,
            agent_id: None,
            group_id: None,
            type_fields: BTreeMap::new(),
        }
    }

    fn to_payload(&self) -> AssetPayload {
        AssetPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            asset_type_id: self.asset_type_id,
            impact: Some(self.impact.clone()),
            usage_type: Some(self.usage_type.clone()),
            user_id: self.user_id,
            location_id: self.location_id,
            department_id: self.department_id,
            agent_id: self.agent_id,
            group_id: self.group_id,
            type_fields: encode_type_fields(&self.type_fields, self.asset_type_id),
        }
    }
}

/// Observed state of an asset, as reported by the vendor.
#[derive(Debug, Clone, Serialize)]
pub struct AssetState {
    /// Resource identifier; equals the vendor's display id.
    pub display_id: u64,
    /// Vendor-internal numeric id, surfaced for reference only.
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub asset_type_id: u64,
    pub impact: Option<String>,
    pub usage_type: Option<String>,
    pub author_type: Option<String>,
    pub asset_tag: Option<String>,
    pub user_id: Option<u64>,
    pub location_id: Option<u64>,
    pub department_id: Option<u64>,
    pub agent_id: Option<u64>,
    pub group_id: Option<u64>,
    pub assigned_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_id: Option<u64>,
    pub created_by_source: Option<String>,
    pub last_updated_by_source: Option<String>,
    pub created_by_user: Option<u64>,
    pub last_updated_by_user: Option<u64>,
    pub sources: Vec<String>,
    pub serial_number: Option<String>,
    pub mac_addresses: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub uuid: Option<String>,
    pub item_id: Option<String>,
    pub imei_number: Option<String>,
    /// Custom fields with the asset type id suffix stripped back off.
    pub type_fields: BTreeMap<String, String>,
}

impl AssetState {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            display_id: asset.display_id,
            id: asset.id,
            name: asset.name.clone(),
            description: asset.description.clone(),
            asset_type_id: asset.asset_type_id,
            impact: asset.impact.clone(),
            usage_type: asset.usage_type.clone(),
            author_type: asset.author_type.clone(),
            asset_tag: asset.asset_tag.clone(),
            user_id: asset.user_id,
            location_id: asset.location_id,
            department_id: asset.department_id,
            agent_id: asset.agent_id,
            group_id: asset.group_id,
            assigned_on: asset.assigned_on.clone(),
            created_at: asset.created_at.to_rfc3339(),
            updated_at: asset.updated_at.to_rfc3339(),
            workspace_id: asset.workspace_id,
            created_by_source: asset.created_by_source.clone(),
            last_updated_by_source: asset.last_updated_by_source.clone(),
            created_by_user: asset.created_by_user,
            last_updated_by_user: asset.last_updated_by_user,
            sources: asset.sources.clone(),
            serial_number: asset.serial_number.clone(),
            mac_addresses: asset.mac_addresses.clone(),
            ip_addresses: asset.ip_addresses.clone(),
            uuid: asset.uuid.clone(),
            item_id: asset.item_id.clone(),
            imei_number: asset.imei_number.clone(),
            type_fields: decode_type_fields(&asset.type_fields, asset.asset_type_id),
        }
    }
}

/// Lifecycle handler for generic assets.
pub struct AssetHandler<'a> {
    client: &'a FreshClient,
}

impl<'a> AssetHandler<'a> {
    pub fn new(client: &'a FreshClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, spec: &AssetSpec) -> Result<AssetState> {
        tracing::debug!(name = %spec.name, asset_type_id = spec.asset_type_id, "Creating asset");
        let envelope: AssetEnvelope = self.client.post_json("/assets", &spec.to_payload()).await?;
        Ok(AssetState::from_asset(&envelope.asset))
    }

    /// Refresh the asset by display id. `Ok(None)` means the asset no
    /// longer exists and the caller should drop its tracking.
    pub async fn read(&self, display_id: u64) -> Result<Option<AssetState>> {
        let envelope: Option<AssetEnvelope> =
            self.client.get_json(&format!("/assets/{display_id}")).await?;
        Ok(envelope.map(|e| AssetState::from_asset(&e.asset)))
    }

    /// Replace the asset with the full declared state.
    pub async fn update(&self, display_id: u64, spec: &AssetSpec) -> Result<AssetState> {
        tracing::debug!(display_id, "Updating asset");
        let envelope: AssetEnvelope = self
            .client
            .put_json(&format!("/assets/{display_id}"), &spec.to_payload())
            .await?;
        Ok(AssetState::from_asset(&envelope.asset))
    }

    /// Delete by display id. Deleting an asset that is already gone
    /// succeeds.
    pub async fn delete(&self, display_id: u64) -> Result<()> {
        if !self.client.delete(&format!("/assets/{display_id}")).await? {
            tracing::debug!(display_id, "Asset already absent");
        }
        Ok(())
    }

    /// Import an existing asset by display id.
    pub async fn import(&self, display_id: u64) -> Result<AssetState> {
        self.read(display_id)
            .await?
            .with_context(|| format!("Asset {display_id} not found"))
    }
}
