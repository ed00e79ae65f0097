//! Integration tests for the Freshservice client and resource handlers
//! using wiremock
//!
//! These tests verify the HTTP behavior against mocked endpoints: request
//! bodies and authentication headers, the 404 "absent" policy on read and
//! delete, error statuses, and the search cardinality rules.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use freshctl::fresh::client::FreshClient;
use freshctl::fresh::query::AssetQuery;
use freshctl::lookup::asset_search::search_asset;
use freshctl::lookup::asset_type::{find_asset_type, AssetTypeSelector};
use freshctl::resource::asset::{AssetHandler, AssetSpec};
use freshctl::resource::asset_type::{AssetTypeHandler, AssetTypeSpec};
use freshctl::resource::aws_account::{AwsAccountHandler, AwsAccountSpec};
use freshctl::resource::azure_subscription::{AzureSubscriptionHandler, AzureSubscriptionSpec};
use freshctl::resource::gcp_project::{GcpProjectHandler, GcpProjectSpec};

/// `Basic` credential for api key `test-key` with the `X` password slot.
const BASIC_AUTH: &str = "Basic dGVzdC1rZXk6WA==";

fn client_for(server: &MockServer) -> FreshClient {
    FreshClient::with_base_url("test-key", format!("{}/api/v2", server.uri()))
        .expect("client should build")
}

/// Vendor-shaped asset response body.
fn asset_body(display_id: u64, asset_type_id: u64, name: &str, type_fields: serde_json::Value) -> serde_json::Value {
    json!({
        "asset": {
            "id": display_id + 1000,
            "display_id": display_id,
            "name": name,
            "description": "managed account",
            "asset_type_id": asset_type_id,
            "impact": "low",
            "usage_type": "permanent",
            "asset_tag": format!("ASSET-{display_id}"),
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T11:30:00Z",
            "workspace_id": 2,
            "sources": ["API"],
            "type_fields": type_fields
        }
    })
}

mod asset_resource_tests {
    use super::*;

    /// Create sends the suffixed, coerced custom fields and keys the
    /// resulting state off the vendor's display id.
    #[tokio::test]
    async fn create_posts_suffixed_fields_and_returns_display_id() {
        let server = MockServer::start().await;

        let expected_request = json!({
            "name": "srv-1",
            "asset_type_id": 25,
            "impact": "low",
            "usage_type": "permanent",
            "type_fields": { "product_25": "XPS 13", "cores_25": 8 }
        });

        Mock::given(method("POST"))
            .and(path("/api/v2/assets"))
            .and(header("authorization", BASIC_AUTH))
            .and(header("accept", "application/json"))
            .and(body_json(&expected_request))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_body(
                42,
                25,
                "srv-1",
                json!({ "product_25": "XPS 13", "cores_25": 8 }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut spec = AssetSpec::new("srv-1", 25);
        spec.type_fields.insert("product".to_string(), "XPS 13".to_string());
        spec.type_fields.insert("cores".to_string(), "8".to_string());

        let state = AssetHandler::new(&client)
            .create(&spec)
            .await
            .expect("create should succeed");

        assert_eq!(state.display_id, 42);
        assert_eq!(state.type_fields["product"], "XPS 13");
        assert_eq!(state.type_fields["cores"], "8");
    }

    /// A 404 on read means the asset is gone, not that the read failed.
    #[tokio::test]
    async fn read_maps_404_to_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let state = AssetHandler::new(&client)
            .read(42)
            .await
            .expect("read should not fail on 404");

        assert!(state.is_none());
    }

    /// Statuses other than 404 surface as errors carrying the code.
    #[tokio::test]
    async fn read_surfaces_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets/42"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = AssetHandler::new(&client).read(42).await.unwrap_err();
        assert!(err.to_string().contains("500"), "unexpected error: {err}");
    }

    /// Update always PUTs the full declared state to the per-id endpoint.
    #[tokio::test]
    async fn update_puts_full_payload() {
        let server = MockServer::start().await;

        let expected_request = json!({
            "name": "srv-1-renamed",
            "asset_type_id": 25,
            "impact": "high",
            "usage_type": "permanent",
            "type_fields": { "product_25": "XPS 15" }
        });

        Mock::given(method("PUT"))
            .and(path("/api/v2/assets/42"))
            .and(body_json(&expected_request))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_body(
                42,
                25,
                "srv-1-renamed",
                json!({ "product_25": "XPS 15" }),
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut spec = AssetSpec::new("srv-1-renamed", 25);
        spec.impact = "high".to_string();
        spec.type_fields.insert("product".to_string(), "XPS 15".to_string());

        let state = AssetHandler::new(&client)
            .update(42, &spec)
            .await
            .expect("update should succeed");
        assert_eq!(state.name, "srv-1-renamed");
    }

    /// Deleting an already-absent asset succeeds.
    #[tokio::test]
    async fn delete_treats_404_as_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/assets/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        AssetHandler::new(&client)
            .delete(42)
            .await
            .expect("delete of an absent asset should succeed");
    }

    /// Any other delete failure is reported.
    #[tokio::test]
    async fn delete_surfaces_other_errors() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/assets/42"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = AssetHandler::new(&client).delete(42).await.unwrap_err();
        assert!(err.to_string().contains("403"), "unexpected error: {err}");
    }
}

mod cloud_account_tests {
    use super::*;

    /// Create-then-read round-trip for an AWS account: the logical field
    /// values written at create come back unchanged, with the numeric
    /// account id stringified on the way out.
    #[tokio::test]
    async fn aws_account_round_trip_preserves_logical_fields() {
        let server = MockServer::start().await;

        let vendor_fields = json!({
            "account_id_56000947175": 123456789012i64,
            "po_56000947175": "PO-77",
            "owner_56000947175": "platform-team",
            "approved_by_56000947175": "cto",
            "environment_56000947175": "Production"
        });

        Mock::given(method("POST"))
            .and(path("/api/v2/assets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_body(
                7,
                56000947175,
                "prod-account",
                vendor_fields.clone(),
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/assets/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_body(
                7,
                56000947175,
                "prod-account",
                vendor_fields,
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let handler = AwsAccountHandler::new(&client);

        let mut spec = AwsAccountSpec::new("prod-account", "123456789012");
        spec.po_number = Some("PO-77".to_string());
        spec.owner = Some("platform-team".to_string());
        spec.approver = Some("cto".to_string());
        spec.environment = Some("Production".to_string());

        let created = handler.create(&spec).await.expect("create should succeed");
        let read = handler
            .read(created.display_id)
            .await
            .expect("read should succeed")
            .expect("asset should exist");

        assert_eq!(read.account_name, "prod-account");
        assert_eq!(read.account_id.as_deref(), Some("123456789012"));
        assert_eq!(read.po_number.as_deref(), Some("PO-77"));
        assert_eq!(read.owner.as_deref(), Some("platform-team"));
        assert_eq!(read.approver.as_deref(), Some("cto"));
        assert_eq!(read.environment.as_deref(), Some("Production"));
    }

    /// Azure subscriptions write their declared defaults into the
    /// custom-field map and read them back.
    #[tokio::test]
    async fn azure_subscription_round_trip_preserves_defaults() {
        let server = MockServer::start().await;

        let vendor_fields = json!({
            "subscription_id_56000416566": "0000-1111",
            "tenant_id_56000416566": "tenant-1",
            "eacsp_56000416566": "CSP",
            "active_56000416566": "Yes",
            "cloudockit_56000416566": "Yes"
        });

        Mock::given(method("POST"))
            .and(path("/api/v2/assets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_body(
                8,
                56000416566,
                "sub-prod",
                vendor_fields.clone(),
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/assets/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_body(
                8,
                56000416566,
                "sub-prod",
                vendor_fields,
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let handler = AzureSubscriptionHandler::new(&client);

        let spec = AzureSubscriptionSpec::new("sub-prod", "0000-1111", "tenant-1");
        let created = handler.create(&spec).await.expect("create should succeed");
        let read = handler
            .read(created.display_id)
            .await
            .expect("read should succeed")
            .expect("asset should exist");

        assert_eq!(read.subscription_id.as_deref(), Some("0000-1111"));
        assert_eq!(read.tenant_id.as_deref(), Some("tenant-1"));
        assert_eq!(read.eacsp.as_deref(), Some("CSP"));
        assert_eq!(read.active.as_deref(), Some("Yes"));
        assert_eq!(read.cloudockit.as_deref(), Some("Yes"));
    }

    /// GCP projects store the project name both as the asset name and as
    /// a custom field.
    #[tokio::test]
    async fn gcp_project_round_trip_preserves_logical_fields() {
        let server = MockServer::start().await;

        let vendor_fields = json!({
            "project_id_56000979438": "analytics-prod-1",
            "project_name_56000979438": "analytics",
            "active_56000979438": "Yes"
        });

        Mock::given(method("POST"))
            .and(path("/api/v2/assets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_body(
                9,
                56000979438,
                "analytics",
                vendor_fields.clone(),
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/assets/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_body(
                9,
                56000979438,
                "analytics",
                vendor_fields,
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let handler = GcpProjectHandler::new(&client);

        let created = handler
            .create(&GcpProjectSpec::new("analytics", "analytics-prod-1"))
            .await
            .expect("create should succeed");
        let read = handler
            .read(created.display_id)
            .await
            .expect("read should succeed")
            .expect("asset should exist");

        assert_eq!(read.project_name, "analytics");
        assert_eq!(read.project_id.as_deref(), Some("analytics-prod-1"));
        assert_eq!(read.active.as_deref(), Some("Yes"));
    }
}

mod asset_type_tests {
    use super::*;

    fn asset_type_body(id: u64, name: &str) -> serde_json::Value {
        json!({
            "asset_type": {
                "id": id,
                "name": name,
                "parent_asset_type_id": null,
                "description": "cloud accounts",
                "visible": true,
                "created_at": "2024-01-10T09:00:00Z",
                "updated_at": "2024-01-10T09:00:00Z"
            }
        })
    }

    /// Create posts name and description; the visibility flag is
    /// vendor-assigned on create.
    #[tokio::test]
    async fn create_posts_declared_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/asset_types"))
            .and(body_json(json!({ "name": "Cloud", "description": "cloud accounts" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_type_body(77, "Cloud")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut spec = AssetTypeSpec::new("Cloud");
        spec.description = Some("cloud accounts".to_string());
        spec.visible = Some(false);

        let state = AssetTypeHandler::new(&client)
            .create(&spec)
            .await
            .expect("create should succeed");
        assert_eq!(state.id, 77);
        assert!(state.visible);
    }

    /// Asset types use the internal id as their identifier; 404 on read
    /// means absent.
    #[tokio::test]
    async fn read_maps_404_to_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types/77"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let state = AssetTypeHandler::new(&client)
            .read(77)
            .await
            .expect("read should not fail on 404");
        assert!(state.is_none());
    }

    /// Lookup by id goes straight to the per-id endpoint.
    #[tokio::test]
    async fn find_by_id_fetches_directly() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types/77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_type_body(77, "Cloud")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let selector = AssetTypeSelector {
            id: Some(77),
            name: None,
        };
        let asset_type = find_asset_type(&client, &selector)
            .await
            .expect("lookup should succeed");
        assert_eq!(asset_type.name, "Cloud");
    }

    /// Lookup by name scans the listing for the first exact match.
    #[tokio::test]
    async fn find_by_name_scans_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "asset_types": [
                    asset_type_body(1, "Hardware")["asset_type"],
                    asset_type_body(2, "Cloud")["asset_type"],
                    asset_type_body(3, "cloud")["asset_type"]
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let selector = AssetTypeSelector {
            id: None,
            name: Some("Cloud".to_string()),
        };
        let asset_type = find_asset_type(&client, &selector)
            .await
            .expect("lookup should succeed");

        // Case-sensitive, first match in listing order.
        assert_eq!(asset_type.id, 2);
    }

    /// A name with no exact match is an error.
    #[tokio::test]
    async fn find_by_unknown_name_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/asset_types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "asset_types": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let selector = AssetTypeSelector {
            id: None,
            name: Some("Nope".to_string()),
        };
        let err = find_asset_type(&client, &selector).await.unwrap_err();
        assert!(err.to_string().contains("Nope"), "unexpected error: {err}");
    }

    /// Neither id nor name is a local validation error.
    #[tokio::test]
    async fn find_without_selector_fails_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = find_asset_type(&client, &AssetTypeSelector::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'id' or 'name'"));

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty(), "no HTTP call expected");
    }
}

mod asset_search_tests {
    use super::*;

    /// An empty query is rejected before any HTTP call happens.
    #[tokio::test]
    async fn empty_query_is_rejected_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = search_asset(&client, &AssetQuery::default(), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("At least one of"));

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty(), "no HTTP call expected");
    }

    /// Exactly one match succeeds; the caller keys off the display id.
    #[tokio::test]
    async fn single_match_resolves_to_display_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets"))
            .and(query_param("search", "\"name:'Dell laptop'\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assets": [ asset_body(42, 25, "Dell laptop", json!({}))["asset"] ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = AssetQuery {
            name: Some("Dell laptop".to_string()),
            ..Default::default()
        };
        let asset = search_asset(&client, &query, false)
            .await
            .expect("search should succeed");
        assert_eq!(asset.display_id, 42);
    }

    /// The trashed flag is forwarded as a query parameter.
    #[tokio::test]
    async fn trashed_flag_is_forwarded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets"))
            .and(query_param("search", "\"display_id:5\""))
            .and(query_param("trashed", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assets": [ asset_body(5, 25, "old", json!({}))["asset"] ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = AssetQuery {
            display_id: Some(5),
            ..Default::default()
        };
        let asset = search_asset(&client, &query, true)
            .await
            .expect("search should succeed");
        assert_eq!(asset.display_id, 5);
    }

    /// Zero matches is an error, not an empty success.
    #[tokio::test]
    async fn zero_matches_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = AssetQuery {
            name: Some("ghost".to_string()),
            ..Default::default()
        };
        let err = search_asset(&client, &query, false).await.unwrap_err();
        assert!(err.to_string().contains("No assets found"));
    }

    /// Multiple matches are ambiguous and rejected, never pick-first.
    #[tokio::test]
    async fn multiple_matches_are_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assets": [
                    asset_body(1, 25, "dup", json!({}))["asset"],
                    asset_body(2, 25, "dup", json!({}))["asset"]
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = AssetQuery {
            name: Some("dup".to_string()),
            ..Default::default()
        };
        let err = search_asset(&client, &query, false).await.unwrap_err();
        assert!(
            err.to_string().contains("refine the search"),
            "unexpected error: {err}"
        );
    }
}
