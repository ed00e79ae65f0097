//! AWS account asset resource
//!
//! A specialized projection of the generic asset: a fixed set of logical
//! fields stored under the AWS-account asset type's custom-field keys.
//! The account id is stored numerically when it parses as a number, which
//! is how the vendor-side field is typed.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fresh::client::FreshClient;
use crate::fresh::fields::{suffixed, FieldValue, TypeFields};
use crate::fresh::model::{Asset, AssetEnvelope, AssetPayload};

/// Asset type id Freshservice assigns to AWS account assets.
pub const DEFAULT_ASSET_TYPE_ID: u64 = 56000947175;

/// Declared configuration for an AWS account asset.
#[derive(Debug, Clone)]
pub struct AwsAccountSpec {
    pub account_name: String,
    /// The 12-digit AWS account id. Kept as a string in the declaration;
    /// stored numerically on the vendor side when it parses as a number.
    pub account_id: String,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    /// Environment type, e.g. Production, Development, Test.
    pub environment: Option<String>,
    pub description: Option<String>,
    pub asset_type_id: u64,
}

impl AwsAccountSpec {
    pub fn new(account_name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            account_id: account_id.into(),
            po_number: None,
            owner: None,
            approver: None,
            environment: None,
            description: None,
            asset_type_id: DEFAULT_ASSET_TYPE_ID,
        }
    }

    fn type_fields(&self) -> TypeFields {
        let mut fields = TypeFields::new();

        let account_id = match self.account_id.parse::<i64>() {
            Ok(n) => FieldValue::Int(n),
            Err(_) => FieldValue::from(self.account_id.as_str()),
        };
        fields.insert(suffixed("account_id", self.asset_type_id), account_id);

        if let Some(po_number) = &self.po_number {
            fields.insert(suffixed("po", self.asset_type_id), po_number.as_str().into());
        }
        if let Some(owner) = &self.owner {
            fields.insert(suffixed("owner", self.asset_type_id), owner.as_str().into());
        }
        if let Some(approver) = &self.approver {
            fields.insert(
                suffixed("approved_by", self.asset_type_id),
                approver.as_str().into(),
            );
        }
        if let Some(environment) = &self.environment {
            fields.insert(
                suffixed("environment", self.asset_type_id),
                environment.as_str().into(),
            );
        }

        fields
    }

    fn to_payload(&self) -> AssetPayload {
        AssetPayload {
            name: self.account_name.clone(),
            description: self.description.clone(),
            asset_type_id: self.asset_type_id,
            type_fields: self.type_fields(),
            ..Default::default()
        }
    }
}

/// Observed state of an AWS account asset.
#[derive(Debug, Clone, Serialize)]
pub struct AwsAccountState {
    /// Resource identifier; equals the vendor's display id.
    pub display_id: u64,
    pub account_name: String,
    pub account_id: Option<String>,
    pub po_number: Option<String>,
    pub owner: Option<String>,
    pub approver: Option<String>,
    pub environment: Option<String>,
    pub description: Option<String>,
    pub asset_type_id: u64,
    pub asset_tag: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_id: Option<u64>,
}

impl AwsAccountState {
    pub fn from_asset(asset: &Asset) -> Self {
        let field = |name: &str| scalar_field(asset, name);
        Self {
            display_id: asset.display_id,
            account_name: asset.name.clone(),
            account_id: field("account_id"),
            po_number: field("po"),
            owner: field("owner"),
            approver: field("approved_by"),
            environment: field("environment"),
            description: asset.description.clone(),
            asset_type_id: asset.asset_type_id,
            asset_tag: asset.asset_tag.clone(),
            created_at: asset.created_at.to_rfc3339(),
            updated_at: asset.updated_at.to_rfc3339(),
            workspace_id: asset.workspace_id,
        }
    }
}

/// Read one logical field back from the suffixed custom-field map,
/// stringifying non-string scalars (the account id comes back numeric).
fn scalar_field(asset: &Asset, name: &str) -> Option<String> {
    asset
        .type_fields
        .get(&suffixed(name, asset.asset_type_id))
        .filter(|value| !value.is_null())
        .map(|value| value.to_string())
}

/// Lifecycle handler for AWS account assets.
pub struct AwsAccountHandler<'a> {
    client: &'a FreshClient,
}

impl<'a> AwsAccountHandler<'a> {
    pub fn new(client: &'a FreshClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, spec: &AwsAccountSpec) -> Result<AwsAccountState> {
        tracing::debug!(
            account_name = %spec.account_name,
            asset_type_id = spec.asset_type_id,
            "Creating AWS account asset"
        );
        let envelope: AssetEnvelope = self.client.post_json("/assets", &spec.to_payload()).await?;
        Ok(AwsAccountState::from_asset(&envelope.asset))
    }

    pub async fn read(&self, display_id: u64) -> Result<Option<AwsAccountState>> {
        let envelope: Option<AssetEnvelope> =
            self.client.get_json(&format!("/assets/{display_id}")).await?;
        Ok(envelope.map(|e| AwsAccountState::from_asset(&e.asset)))
    }

    /// Replace the asset with the full declared field set.
    pub async fn update(&self, display_id: u64, spec: &AwsAccountSpec) -> Result<AwsAccountState> {
        tracing::debug!(display_id, "Updating AWS account asset");
        let envelope: AssetEnvelope = self
            .client
            .put_json(&format!("/assets/{display_id}"), &spec.to_payload())
            .await?;
        Ok(AwsAccountState::from_asset(&envelope.asset))
    }

    pub async fn delete(&self, display_id: u64) -> Result<()> {
        if !self.client.delete(&format!("/assets/{display_id}")).await? {
            tracing::debug!(display_id, "AWS account asset already absent");
        }
        Ok(())
    }

    pub async fn import(&self, display_id: u64) -> Result<AwsAccountState> {
        self.read(display_id)
            .await?
            .with_context(|| format!("AWS account asset {display_id} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_account_id_is_stored_as_number() {
        let spec = AwsAccountSpec::new("prod", "123456789012");
        let body = serde_json::to_value(spec.to_payload()).unwrap();
        assert_eq!(
            body["type_fields"]["account_id_56000947175"],
            json!(123456789012i64)
        );
    }

    #[test]
    fn non_numeric_account_id_falls_back_to_string() {
        let spec = AwsAccountSpec::new("prod", "not-a-number");
        let body = serde_json::to_value(spec.to_payload()).unwrap();
        assert_eq!(
            body["type_fields"]["account_id_56000947175"],
            json!("not-a-number")
        );
    }

    #[test]
    fn absent_optionals_stay_out_of_type_fields() {
        let spec = AwsAccountSpec::new("prod", "123456789012");
        let fields = spec.type_fields();
        assert_eq!(fields.len(), 1);
    }
}
