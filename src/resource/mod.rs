//! Resource handler layer
//!
//! One module per managed resource kind, each implementing the same
//! lifecycle quadruple against the Freshservice API: create, read by
//! identifier, full-payload update, and idempotent delete, plus an import
//! that is a read-by-identifier passthrough.
//!
//! All asset-kind resources are identified by the vendor's `display_id`;
//! asset types carry no display id and use the internal id. Reads answer
//! `Ok(None)` when the vendor reports the resource gone, and deleting an
//! already-absent resource succeeds.
//!
//! - [`asset`] - generic assets with free-form custom fields
//! - [`asset_type`] - the asset type taxonomy
//! - [`aws_account`] / [`azure_subscription`] / [`gcp_project`] - cloud
//!   account assets with a fixed custom-field layout

pub mod asset;
pub mod asset_type;
pub mod aws_account;
pub mod azure_subscription;
pub mod gcp_project;
