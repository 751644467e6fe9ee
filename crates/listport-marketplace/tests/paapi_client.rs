//! Integration tests for `PaapiClient`.
//!
//! Each test stands up a `wiremock` server and points the client at it, so
//! request shape, signing headers and status mapping are checked without
//! real network traffic.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use listport_core::ListingId;
use listport_marketplace::types::{ITEM_RESOURCES, VARIATION_RESOURCES};
use listport_marketplace::{
    FetchedListing, ListingFetcher, MarketplaceApi, MarketplaceError, NoDelay, PaapiClient,
    PaapiConfig,
};

fn config() -> PaapiConfig {
    PaapiConfig {
        access_key: "AKIDEXAMPLE".to_owned(),
        secret_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_owned(),
        partner_tag: "listport-20".to_owned(),
        host: "webservices.amazon.com".to_owned(),
        region: "us-east-1".to_owned(),
        marketplace: "www.amazon.com".to_owned(),
    }
}

fn test_client(server: &MockServer) -> PaapiClient {
    PaapiClient::with_base_url(config(), 5, "listport-test/0.1", &server.uri())
        .expect("failed to build test PaapiClient")
}

fn id() -> ListingId {
    ListingId::new("B09BWFX1L6")
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_item_sends_signed_json_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .and(header(
            "x-amz-target",
            "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems",
        ))
        .and(header("content-encoding", "amz-1.0"))
        .and(header_exists("x-amz-date"))
        .and(header_exists("authorization"))
        .and(body_partial_json(json!({
            "ItemIds": ["B09BWFX1L6"],
            "PartnerTag": "listport-20",
            "PartnerType": "Associates",
            "Marketplace": "www.amazon.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemsResult": { "Items": [{ "ASIN": "B09BWFX1L6" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .expect("request should succeed");

    let items = response.items_result.expect("items result").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].asin, "B09BWFX1L6");
}

#[tokio::test]
async fn authorization_header_names_credential_scope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .expect("request should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    let auth = requests[0]
        .headers
        .get("authorization")
        .expect("authorization header")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"), "{auth}");
    assert!(auth.contains("/us-east-1/ProductAdvertisingAPI/aws4_request"), "{auth}");
}

#[tokio::test]
async fn get_variations_sends_page_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getvariations"))
        .and(header(
            "x-amz-target",
            "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetVariations",
        ))
        .and(body_partial_json(json!({ "ASIN": "B09BWFX1L6", "VariationPage": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "VariationsResult": {
                "Items": [],
                "VariationSummary": { "PageCount": 3, "VariationCount": 25 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = test_client(&server)
        .get_variations(&id(), VARIATION_RESOURCES, 3)
        .await
        .expect("request should succeed");

    let summary = response
        .variations_result
        .and_then(|r| r.variation_summary)
        .expect("summary");
    assert_eq!(summary.variation_count, Some(25));
}

// ---------------------------------------------------------------------------
// Status mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_429_is_rate_limited_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .unwrap_err();
    assert!(
        matches!(err, MarketplaceError::RateLimited { retry_after_secs: 7 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn status_401_is_unauthorized_with_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "Errors": [{ "Code": "InvalidSignature", "Message": "signature mismatch" }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .unwrap_err();
    assert!(
        matches!(err, MarketplaceError::Unauthorized { status: 401, ref message } if message == "signature mismatch"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn status_400_with_errors_body_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Errors": [{ "Code": "InvalidParameterValue", "Message": "bad ItemIds" }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .unwrap_err();
    assert!(
        matches!(err, MarketplaceError::Api { status: 400, ref code, .. } if code == "InvalidParameterValue"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn status_500_without_body_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_variations(&id(), VARIATION_RESOURCES, 1)
        .await
        .unwrap_err();
    assert!(
        matches!(err, MarketplaceError::UnexpectedStatus { status: 500, ref operation } if operation == "GetVariations"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_item(&id(), ITEM_RESOURCES)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Deserialize { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Fetcher over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetcher_reads_base_and_variations_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemsResult": { "Items": [{
                "ASIN": "B09BWFX1L6",
                "ItemInfo": { "Title": { "DisplayValue": "Widget" } }
            }] }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getvariations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "VariationsResult": {
                "Items": [{
                    "ASIN": "B000000001",
                    "VariationAttributes": [{ "Name": "size_name", "Value": "Small" }]
                }],
                "VariationSummary": {
                    "PageCount": 1,
                    "VariationCount": 1,
                    "VariationDimensions": [{ "Name": "size_name", "DisplayName": "Size", "Values": ["Small"] }]
                }
            }
        })))
        .mount(&server)
        .await;

    let fetcher = ListingFetcher::new(test_client(&server), NoDelay);
    let FetchedListing {
        product,
        variations,
        ..
    } = fetcher.fetch_listing(&id()).await.expect("fetch should succeed");

    assert_eq!(product.title, "Widget");
    let variations = variations.expect("variations should succeed");
    assert_eq!(variations.items.len(), 1);
    assert_eq!(variations.dimensions[0].source_name, "size_name");
}
