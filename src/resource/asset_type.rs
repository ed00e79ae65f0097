//! Asset type resource
//!
//! Manages the asset type taxonomy. Asset types carry no display id; the
//! vendor's internal id is the resource identifier. The parent pointer is
//! a single-level hierarchy reference the vendor does not verify for
//! cycles, and this handler does not either.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fresh::client::FreshClient;
use crate::fresh::model::{AssetType, AssetTypeEnvelope, AssetTypePayload};

/// Declared configuration for an asset type.
#[derive(Debug, Clone)]
pub struct AssetTypeSpec {
    pub name: String,
    pub description: Option<String>,
    pub parent_asset_type_id: Option<u64>,
    /// Visibility flag; the vendor defaults new custom types to visible,
    /// so this is only sent when explicitly declared.
    pub visible: Option<bool>,
}

impl AssetTypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent_asset_type_id: None,
            visible: None,
        }
    }

    fn to_payload(&self) -> AssetTypePayload {
        AssetTypePayload {
            name: Some(self.name.clone()),
            parent_asset_type_id: self.parent_asset_type_id,
            description: self.description.clone(),
            visible: self.visible,
        }
    }
}

/// Observed state of an asset type.
#[derive(Debug, Clone, Serialize)]
pub struct AssetTypeState {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub parent_asset_type_id: Option<u64>,
    pub visible: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl AssetTypeState {
    pub fn from_asset_type(asset_type: &AssetType) -> Self {
        Self {
            id: asset_type.id,
            name: asset_type.name.clone(),
            description: asset_type.description.clone(),
            parent_asset_type_id: asset_type.parent_asset_type_id,
            visible: asset_type.visible,
            created_at: asset_type.created_at.to_rfc3339(),
            updated_at: asset_type.updated_at.to_rfc3339(),
        }
    }
}

/// Lifecycle handler for asset types.
pub struct AssetTypeHandler<'a> {
    client: &'a FreshClient,
}

impl<'a> AssetTypeHandler<'a> {
    pub fn new(client: &'a FreshClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, spec: &AssetTypeSpec) -> Result<AssetTypeState> {
        tracing::debug!(name = %spec.name, "Creating asset type");
        // The visibility flag is vendor-assigned on create.
        let payload = AssetTypePayload {
            visible: None,
            ..spec.to_payload()
        };
        let envelope: AssetTypeEnvelope = self.client.post_json("/asset_types", &payload).await?;
        Ok(AssetTypeState::from_asset_type(&envelope.asset_type))
    }

    pub async fn read(&self, id: u64) -> Result<Option<AssetTypeState>> {
        let envelope: Option<AssetTypeEnvelope> =
            self.client.get_json(&format!("/asset_types/{id}")).await?;
        Ok(envelope.map(|e| AssetTypeState::from_asset_type(&e.asset_type)))
    }

    /// Replace the asset type with the full declared state.
    pub async fn update(&self, id: u64, spec: &AssetTypeSpec) -> Result<AssetTypeState> {
        tracing::debug!(id, "Updating asset type");
        let envelope: AssetTypeEnvelope = self
            .client
            .put_json(&format!("/asset_types/{id}"), &spec.to_payload())
            .await?;
        Ok(AssetTypeState::from_asset_type(&envelope.asset_type))
    }

    /// Delete by id. Deleting an asset type that is already gone succeeds.
    pub async fn delete(&self, id: u64) -> Result<()> {
        if !self.client.delete(&format!("/asset_types/{id}")).await? {
            tracing::debug!(id, "Asset type already absent");
        }
        Ok(())
    }

    /// Import an existing asset type by id.
    pub async fn import(&self, id: u64) -> Result<AssetTypeState> {
        self.read(id)
            .await?
            .with_context(|| format!("Asset type {id} not found"))
    }
}
