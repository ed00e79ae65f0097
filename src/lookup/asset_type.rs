//! Asset type lookup
//!
//! Resolves an asset type either directly by id or by scanning the
//! listing endpoint for an exact name match. When both are supplied the
//! id wins; there is no other precedence logic.

use anyhow::{bail, Context, Result};

use crate::fresh::client::FreshClient;
use crate::fresh::model::{AssetType, AssetTypeEnvelope, AssetTypeListEnvelope};

/// Which asset type to resolve. Exactly one of the fields should be set;
/// `id` takes precedence when both are.
#[derive(Debug, Clone, Default)]
pub struct AssetTypeSelector {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Resolve an asset type by id or name.
pub async fn find_asset_type(
    client: &FreshClient,
    selector: &AssetTypeSelector,
) -> Result<AssetType> {
    if let Some(id) = selector.id {
        let envelope: Option<AssetTypeEnvelope> =
            client.get_json(&format!("/asset_types/{id}")).await?;
        return envelope
            .map(|e| e.asset_type)
            .with_context(|| format!("No asset type found with id {id}"));
    }

    if let Some(name) = &selector.name {
        tracing::debug!(name = %name, "Scanning asset type listing");
        let envelope: AssetTypeListEnvelope = client
            .get_json("/asset_types")
            .await?
            .context("Asset type listing not available")?;

        // First exact match in listing order; names are matched
        // case-sensitively.
        return envelope
            .asset_types
            .into_iter()
            .find(|asset_type| asset_type.name == *name)
            .with_context(|| format!("No asset type found with name: {name}"));
    }

    bail!("Either 'id' or 'name' must be provided")
}
