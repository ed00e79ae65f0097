//! Read-only lookups
//!
//! Query-style operations that resolve existing vendor records without
//! managing them:
//!
//! - [`asset_search`] - search assets by name, display id, or asset tag,
//!   requiring exactly one match
//! - [`asset_type`] - resolve an asset type by id or by exact name

pub mod asset_search;
pub mod asset_type;
