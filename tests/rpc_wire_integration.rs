//! End-to-end flow against a local HTTP server: login on a mock identity
//! endpoint, then betting calls on a mock JSON-RPC endpoint, all through
//! the real `reqwest` transport.

use std::path::PathBuf;
use std::sync::Arc;

use betfair_rpc::config::EndpointsConfig;
use betfair_rpc::params::{CatalogueOptions, ClearedOrdersQuery};
use betfair_rpc::transport::HttpTransport;
use betfair_rpc::types::{BetStatus, MarketSort, TimeGranularity};
use betfair_rpc::{BetfairClient, BetfairError, CancelInstruction, Credentials, MarketFilter};
use rust_decimal_macros::dec;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        username: "punter".to_string(),
        password: SecretString::new("secret".to_string()),
        app_key: "app-key".to_string(),
        cert_path: PathBuf::from("unused.crt"),
        cert_key_path: PathBuf::from("unused.key"),
    }
}

fn endpoints(server: &MockServer) -> EndpointsConfig {
    EndpointsConfig {
        identity_url: format!("{}/api/certlogin", server.uri()),
        betting_url: format!("{}/exchange/betting/json-rpc/v1", server.uri()),
        timeout_secs: 5,
        ..EndpointsConfig::default()
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/certlogin"))
        .and(header("X-Application", "app-key"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("username=punter&password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionToken": "wire-token",
            "loginStatus": "SUCCESS"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn logged_in_client(server: &MockServer) -> BetfairClient {
    mount_login(server).await;
    let endpoints = endpoints(server);
    let transport = Arc::new(HttpTransport::new(&endpoints).unwrap());
    BetfairClient::login(transport, &credentials(), &endpoints)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_market_catalogue_over_the_wire() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/exchange/betting/json-rpc/v1"))
        .and(header("X-Application", "app-key"))
        .and(header("X-Authentication", "wire-token"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "SportsAPING/v1.0/listMarketCatalogue",
            "params": { "sort": "MAXIMUM_TRADED", "maxResults": 25 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": [{ "marketId": "1.101", "marketName": "Match Odds" }],
            "id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CatalogueOptions {
        sort: Some(MarketSort::MaximumTraded),
        max_results: 25,
        ..CatalogueOptions::default()
    };
    let resp = client
        .list_market_catalogue(&MarketFilter::new().event_type_ids(["1"]), &options)
        .await
        .unwrap();

    assert_eq!(resp["result"][0]["marketId"], json!("1.101"));
}

#[tokio::test]
async fn test_cleared_orders_and_time_ranges_share_session() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(header("X-Authentication", "wire-token"))
        .and(body_partial_json(json!({
            "method": "SportsAPING/v1.0/listClearedOrders",
            "params": { "betStatus": "VOIDED" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "clearedOrders": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("X-Authentication", "wire-token"))
        .and(body_partial_json(json!({
            "method": "SportsAPING/v1.0/listTimeRanges",
            "params": { "granularity": "DAYS" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .list_cleared_orders(BetStatus::Voided, &ClearedOrdersQuery::default())
        .await
        .unwrap();
    client
        .list_time_ranges(&MarketFilter::new(), TimeGranularity::Days)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_orders_returns_parsed_report() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "SportsAPING/v1.0/cancelOrders",
            "params": {
                "marketId": "1.101",
                "instructions": [{ "betId": "1", "sizeReduction": 2.0 }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": { "status": "SUCCESS", "instructionReports": [] },
            "id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = client
        .cancel_orders("1.101", &[CancelInstruction::new("1", dec!(2.0))], None)
        .await
        .unwrap();

    assert_eq!(report["result"]["status"], json!("SUCCESS"));
}

#[tokio::test]
async fn test_betting_endpoint_error_status() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/exchange/betting/json-rpc/v1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client
        .list_countries(&MarketFilter::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, BetfairError::Status { status: 503, ref body } if body == "maintenance"));
}

#[tokio::test]
async fn test_login_rejected_over_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/certlogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loginStatus": "INVALID_USERNAME_OR_PASSWORD"
        })))
        .mount(&server)
        .await;

    let endpoints = endpoints(&server);
    let transport = Arc::new(HttpTransport::new(&endpoints).unwrap());
    let result = BetfairClient::login(transport, &credentials(), &endpoints).await;

    assert!(matches!(result, Err(BetfairError::Login(_))));
}
