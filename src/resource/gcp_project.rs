//! GCP project asset resource
//!
//! A specialized projection of the generic asset for Google Cloud
//! projects. The project name doubles as the asset name and is also
//! stored as a custom field alongside the project id.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fresh::client::FreshClient;
use crate::fresh::fields::{suffixed, TypeFields};
use crate::fresh::model::{Asset, AssetEnvelope, AssetPayload};

/// Asset type id Freshservice assigns to GCP project assets.
pub const DEFAULT_ASSET_TYPE_ID: u64 = 56000979438;

/// Declared configuration for a GCP project asset.
#[derive(Debug, Clone)]
pub struct GcpProjectSpec {
    pub project_name: String,
    pub project_id: String,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    /// Environment type, e.g. Production, Development, Test.
    pub environment: Option<String>,
    pub active: String,
    pub description: Option<String>,
    pub asset_type_id: u64,
}

impl GcpProjectSpec {
    pub fn new(project_name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_id: project_id.into(),
            po_number: None,
            owner: None,
            approver: None,
            environment: None,
            active: "Yes".to_string(),
            description: None,
            asset_type_id: DEFAULT_ASSET_TYPE_ID,
        }
    }

    fn type_fields(&self) -> TypeFields {
        let mut fields = TypeFields::new();
        let mut put = |name: &str, value: &str| {
            if !value.is_empty() {
                fields.insert(suffixed(name, self.asset_type_id), value.into());
            }
        };

        put("project_id", &self.project_id);
        put("project_name", &self.project_name);
        put("po", self.po_number.as_deref().unwrap_or_default());
        put("owner", self.owner.as_deref().unwrap_or_default());
        put("approved_by", self.approver.as_deref().unwrap_or_default());
        put("environment", self.environment.as_deref().unwrap_or_default());
        put("active", &self.active);

        fields
    }

    fn to_payload(&self) -> AssetPayload {
        AssetPayload {
            name: self.project_name.clone(),
            description: self.description.clone(),
            asset_type_id: self.asset_type_id,
            type_fields: self.type_fields(),
            ..Default::default()
        }
    }
}

/// Observed state of a GCP project asset.
#[derive(Debug, Clone, Serialize)]
pub struct GcpProjectState {
    /// Resource identifier; equals the vendor's display id.
    pub display_id: u64,
    pub project_name: String,
    pub project_id: Option<String>,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    pub environment: Option<String>,
    pub active: Option<String>,
    pub description: Option<String>,
    pub asset_type_id: u64,
    pub asset_tag: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_id: Option<u64>,
}

impl GcpProjectState {
    pub fn from_asset(asset: &Asset) -> Self {
        let field = |name: &str| {
            asset
                .type_fields
                .get(&suffixed(name, asset.asset_type_id))
                .filter(|value| !value.is_null())
                .map(|value| value.to_string())
        };
        Self {
            display_id: asset.display_id,
            project_name: asset.name.clone(),
            project_id: field("project_id"),
            po_number: field("po"),
            owner: field("owner"),
            approver: field("approved_by"),
            environment: field("environment"),
            active: field("active"),
            description: asset.description.clone(),
            asset_type_id: asset.asset_type_id,
            asset_tag: asset.asset_tag.clone(),
            created_at: asset.created_at.to_rfc3339(),
            updated_at: asset.updated_at.to_rfc3339(),
            workspace_id: asset.workspace_id,
        }
    }
}

/// Lifecycle handler for GCP project assets.
pub struct GcpProjectHandler<'a> {
    client: &'a FreshClient,
}

impl<'a> GcpProjectHandler<'a> {
    pub fn new(client: &'a FreshClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, spec: &GcpProjectSpec) -> Result<GcpProjectState> {
        tracing::debug!(
            project_name = %spec.project_name,
            asset_type_id = spec.asset_type_id,
            "Creating GCP project asset"
        );
        let envelope: AssetEnvelope = self.client.post_json("/assets", &spec.to_payload()).await?;
        Ok(GcpProjectState::from_asset(&envelope.asset))
    }

    pub async fn read(&self, display_id: u64) -> Result<Option<GcpProjectState>> {
        let envelope: Option<AssetEnvelope> =
            self.client.get_json(&format!("/assets/{display_id}")).await?;
        Ok(envelope.map(|e| GcpProjectState::from_asset(&e.asset)))
    }

    /// Replace the asset with the full declared field set.
    pub async fn update(&self, display_id: u64, spec: &GcpProjectSpec) -> Result<GcpProjectState> {
        tracing::debug!(display_id, "Updating GCP project asset");
        let envelope: AssetEnvelope = self
            .client
            .put_json(&format!("/assets/{display_id}"), &spec.to_payload())
            .await?;
        Ok(GcpProjectState::from_asset(&envelope.asset))
    }

    pub async fn delete(&self, display_id: u64) -> Result<()> {
        if !self.client.delete(&format!("/assets/{display_id}")).await? {
            tracing::debug!(display_id, "GCP project asset already absent");
        }
        Ok(())
    }

    pub async fn import(&self, display_id: u64) -> Result<GcpProjectState> {
        self.read(display_id)
            .await?
            .with_context(|| format!("GCP project asset {display_id} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_name_is_both_asset_name_and_custom_field() {
        let spec = GcpProjectSpec::new("analytics", "analytics-prod-1");
        let body = serde_json::to_value(spec.to_payload()).unwrap();

        assert_eq!(body["name"], json!("analytics"));
        assert_eq!(
            body["type_fields"]["project_name_56000979438"],
            json!("analytics")
        );
        assert_eq!(
            body["type_fields"]["project_id_56000979438"],
            json!("analytics-prod-1")
        );
        assert_eq!(body["type_fields"]["active_56000979438"], json!("Yes"));
    }
}
