//! Asset search lookup
//!
//! Resolves an existing asset through the `/assets?search=` endpoint.
//! The lookup is strict about cardinality: zero matches and multiple
//! matches are both errors, never a silent pick-first.

use anyhow::{bail, Context, Result};

use crate::fresh::client::FreshClient;
use crate::fresh::model::{Asset, AssetListEnvelope};
use crate::fresh::query::AssetQuery;

/// Search for exactly one asset matching the query.
///
/// An empty query is rejected locally, before any HTTP call. Callers key
/// off the returned asset's `display_id`.
pub async fn search_asset(
    client: &FreshClient,
    query: &AssetQuery,
    trashed: bool,
) -> Result<Asset> {
    if query.is_empty() {
        bail!("At least one of 'name', 'display_id', or 'asset_tag' must be provided");
    }

    let expression = query.build();
    tracing::debug!(query = %expression, trashed, "Searching assets");

    let mut endpoint = format!("/assets?search={}", urlencoding::encode(&expression));
    if trashed {
        endpoint.push_str("&trashed=true");
    }

    let envelope: AssetListEnvelope = client
        .get_json(&endpoint)
        .await?
        .context("Asset search endpoint not available")?;

    let mut assets = envelope.assets;
    match assets.len() {
        1 => Ok(assets.remove(0)),
        0 => bail!("No assets found matching the search criteria"),
        n => bail!(
            "{n} assets match the search criteria; refine the search to return a single asset"
        ),
    }
}
