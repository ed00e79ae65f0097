//! Freshservice API interaction module
//!
//! This module provides the core functionality for talking to the
//! Freshservice v2 REST API: the authenticated HTTP client, the wire
//! data model, the custom-field codec, and the asset search query builder.
//!
//! # Module Structure
//!
//! - [`client`] - Authenticated HTTP client with the shared status-code policy
//! - [`model`] - Wire DTOs for assets and asset types
//! - [`fields`] - Codec for the type-suffixed `type_fields` custom-field map
//! - [`query`] - Builder for the `/assets?search=` query expression
//!
//! # Example
//!
//! ```ignore
//! use crate::fresh::client::FreshClient;
//! use crate::fresh::model::AssetEnvelope;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = FreshClient::new("api-key", "yourdomain")?;
//!     let asset: Option<AssetEnvelope> = client.get_json("/assets/42").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod fields;
pub mod model;
pub mod query;
