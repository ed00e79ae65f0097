//! Azure subscription asset resource
//!
//! A specialized projection of the generic asset for Azure subscriptions.
//! Beyond the usual ownership fields it tracks the billing relationship
//! (`eacsp`), whether the subscription is active, and whether it is
//! scanned by Cloudockit.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fresh::client::FreshClient;
use crate::fresh::fields::{suffixed, TypeFields};
use crate::fresh::model::{Asset, AssetEnvelope, AssetPayload};

/// Asset type id Freshservice assigns to Azure subscription assets.
pub const DEFAULT_ASSET_TYPE_ID: u64 = 56000416566;

/// Declared configuration for an Azure subscription asset.
#[derive(Debug, Clone)]
pub struct AzureSubscriptionSpec {
    pub subscription_name: String,
    pub subscription_id: String,
    pub tenant_id: String,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    /// Environment type, e.g. Production, Development, Test.
    pub environment: Option<String>,
    /// Billing relationship: EA or CSP.
    pub eacsp: String,
    pub active: String,
    pub cloudockit: String,
    pub description: Option<String>,
    pub asset_type_id: u64,
}

impl AzureSubscriptionSpec {
    pub fn new(
        subscription_name: impl Into<String>,
        subscription_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            subscription_name: subscription_name.into(),
            subscription_id: subscription_id.into(),
            tenant_id: tenant_id.into(),
            po_number: None,
            owner: None,
            approver: None,
            environment: None,
            eacsp: "CSP".to_string(),
            active: "Yes".to_string(),
            cloudockit: "Yes".to_string(),
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

        put("tenant_id", &self.tenant_id);
        put("subscription_id", &self.subscription_id);
        put("po", self.po_number.as_deref().unwrap_or_default());
        put("owner", self.owner.as_deref().unwrap_or_default());
        put("approver_object", self.approver.as_deref().unwrap_or_default());
        put("environment", self.environment.as_deref().unwrap_or_default());
        put("eacsp", &self.eacsp);
        put("active", &self.active);
        put("cloudockit", &self.cloudockit);

        fields
    }

    fn to_payload(&self) -> AssetPayload {
        AssetPayload {
            name: self.subscription_name.clone(),
            description: self.description.clone(),
            asset_type_id: self.asset_type_id,
            type_fields: self.type_fields(),
            ..Default::default()
        }
    }
}

/// Observed state of an Azure subscription asset.
#[derive(Debug, Clone, Serialize)]
pub struct AzureSubscriptionState {
    /// Resource identifier; equals the vendor's display id.
    pub display_id: u64,
    pub subscription_name: String,
    pub subscription_id: Option<String>,
    pub tenant_id: Option<String>,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    pub environment: Option<String>,
    pub eacsp: Option<String>,
    pub active: Option<String>,
    pub cloudockit: Option<String>,
    pub description: Option<String>,
    pub asset_type_id: u64,
    pub asset_tag: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_id: Option<u64>,
}

impl AzureSubscriptionState {
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
            subscription_name: asset.name.clone(),
            subscription_id: field("subscription_id"),
            tenant_id: field("tenant_id"),
            po_number: field("po"),
            owner: field("owner"),
            approver: field("approver_object"),
            environment: field("environment"),
            eacsp: field("eacsp"),
            active: field("active"),
            cloudockit: field("cloudockit"),
            description: asset.description.clone(),
            asset_type_id: asset.asset_type_id,
            asset_tag: asset.asset_tag.clone(),
            created_at: asset.created_at.to_rfc3339(),
            updated_at: asset.updated_at.to_rfc3339(),
            workspace_id: asset.workspace_id,
        }
    }
}

/// Lifecycle handler for Azure subscription assets.
pub struct AzureSubscriptionHandler<'a> {
    client: &'a FreshClient,
}

impl<'a> AzureSubscriptionHandler<'a> {
    pub fn new(client: &'a FreshClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, spec: &AzureSubscriptionSpec) -> Result<AzureSubscriptionState> {
        tracing::debug!(
            subscription_name = %spec.subscription_name,
            asset_type_id = spec.asset_type_id,
            "Creating Azure subscription asset"
        );
        let envelope: AssetEnvelope = self.client.post_json("/assets", &spec.to_payload()).await?;
        Ok(AzureSubscriptionState::from_asset(&envelope.asset))
    }

    pub async fn read(&self, display_id: u64) -> Result<Option<AzureSubscriptionState>> {
        let envelope: Option<AssetEnvelope> =
            self.client.get_json(&format!("/assets/{display_id}")).await?;
        Ok(envelope.map(|e| AzureSubscriptionState::from_asset(&e.asset)))
    }

    /// Replace the asset with the full declared field set.
    pub async fn update(
        &self,
        display_id: u64,
        spec: &AzureSubscriptionSpec,
    ) -> Result<AzureSubscriptionState> {
        tracing::debug!(display_id, "Updating Azure subscription asset");
        let envelope: AssetEnvelope = self
            .client
            .put_json(&format!("/assets/{display_id}"), &spec.to_payload())
            .await?;
        Ok(AzureSubscriptionState::from_asset(&envelope.asset))
    }

    pub async fn delete(&self, display_id: u64) -> Result<()> {
        if !self.client.delete(&format!("/assets/{display_id}")).await? {
            tracing::debug!(display_id, "Azure subscription asset already absent");
        }
        Ok(())
    }

    pub async fn import(&self, display_id: u64) -> Result<AzureSubscriptionState> {
        self.read(display_id)
            .await?
            .with_context(|| format!("Azure subscription asset {display_id} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_written_into_type_fields() {
        let spec = AzureSubscriptionSpec::new("sub-prod", "0000-1111", "tenant-1");
        let body = serde_json::to_value(spec.to_payload()).unwrap();
        let fields = &body["type_fields"];

        assert_eq!(fields["subscription_id_56000416566"], json!("0000-1111"));
        assert_eq!(fields["tenant_id_56000416566"], json!("tenant-1"));
        assert_eq!(fields["eacsp_56000416566"], json!("CSP"));
        assert_eq!(fields["active_56000416566"], json!("Yes"));
        assert_eq!(fields["cloudockit_56000416566"], json!("Yes"));
        assert!(fields.get("po_56000416566").is_none());
    }

    #[test]
    fn payload_name_is_the_subscription_name() {
        let spec = AzureSubscriptionSpec::new("sub-prod", "0000-1111", "tenant-1");
        let body = serde_json::to_value(spec.to_payload()).unwrap();
        assert_eq!(body["name"], json!("sub-prod"));
        assert_eq!(body["asset_type_id"], json!(DEFAULT_ASSET_TYPE_ID));
    }
}
