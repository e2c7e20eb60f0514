//! End-to-end API tests driving the router directly

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use index_registry::api::create_app;
use index_registry::RebalanceEngine;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_app(Arc::new(RebalanceEngine::new()), false)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn create_index_body() -> Value {
    json!({
        "indexName": "INDEX_1",
        "indexMembers": [
            { "shareName": "A.OQ", "sharePrice": 10.0, "numberOfShares": 20.0 },
            { "shareName": "B.OQ", "sharePrice": 20.0, "numberOfShares": 30.0 },
            { "shareName": "C.OQ", "sharePrice": 30.0, "numberOfShares": 40.0 },
            { "shareName": "D.OQ", "sharePrice": 40.0, "numberOfShares": 50.0 }
        ]
    })
}

fn assert_close(value: f64, expected: f64) {
    assert!(
        (value - expected).abs() < 1e-6,
        "expected {expected}, got {value}"
    );
}

#[tokio::test]
async fn full_flow_create_add_delete_dividend() {
    let app = app();

    let (status, _) = send(&app, "POST", "/api/create", Some(create_index_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({
            "additionOperation": {
                "shareName": "E.OQ",
                "sharePrice": 10.0,
                "numberOfShares": 20.0,
                "indexName": "INDEX_1"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({
            "deletionOperation": { "shareName": "D.OQ", "indexName": "INDEX_1" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({
            "dividendOperation": { "shareName": "A.OQ", "dividend": 2.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/indexState", None).await;
    assert_eq!(status, StatusCode::OK);

    let details = body["indexDetails"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    let index = &details[0];
    assert_eq!(index["indexName"], "INDEX_1");
    assert_close(index["indexValue"].as_f64().unwrap(), 4000.0);

    let members = index["indexMembers"].as_array().unwrap();
    let names: Vec<&str> = members
        .iter()
        .map(|m| m["shareName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A.OQ", "B.OQ", "C.OQ", "E.OQ"]);
    assert_close(members[0]["sharePrice"].as_f64().unwrap(), 8.0);

    let weight_total: f64 = members
        .iter()
        .map(|m| m["indexWeightPct"].as_f64().unwrap())
        .sum();
    assert_close(weight_total, 100.0);
}

#[tokio::test]
async fn create_rejects_duplicate_name() {
    let app = app();

    let (status, _) = send(&app, "POST", "/api/create", Some(create_index_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/create", Some(create_index_body())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = app();

    // Fewer than two members
    let (status, _) = send(
        &app,
        "POST",
        "/api/create",
        Some(json!({
            "indexName": "SOLO",
            "indexMembers": [
                { "shareName": "A.OQ", "sharePrice": 10.0, "numberOfShares": 20.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Blank index name
    let (status, _) = send(
        &app,
        "POST",
        "/api/create",
        Some(json!({
            "indexName": "",
            "indexMembers": [
                { "shareName": "A.OQ", "sharePrice": 10.0, "numberOfShares": 20.0 },
                { "shareName": "B.OQ", "sharePrice": 20.0, "numberOfShares": 30.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive price
    let (status, _) = send(
        &app,
        "POST",
        "/api/create",
        Some(json!({
            "indexName": "NEG",
            "indexMembers": [
                { "shareName": "A.OQ", "sharePrice": -10.0, "numberOfShares": 20.0 },
                { "shareName": "B.OQ", "sharePrice": 20.0, "numberOfShares": 30.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate member names
    let (status, _) = send(
        &app,
        "POST",
        "/api/create",
        Some(json!({
            "indexName": "DUP",
            "indexMembers": [
                { "shareName": "A.OQ", "sharePrice": 10.0, "numberOfShares": 20.0 },
                { "shareName": "A.OQ", "sharePrice": 20.0, "numberOfShares": 30.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn addition_reports_duplicate_share_as_accepted() {
    let app = app();
    send(&app, "POST", "/api/create", Some(create_index_body())).await;

    let addition = json!({
        "additionOperation": {
            "shareName": "A.OQ",
            "sharePrice": 10.0,
            "numberOfShares": 20.0,
            "indexName": "INDEX_1"
        }
    });
    let (status, _) = send(&app, "POST", "/api/indexAdjustment", Some(addition)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn addition_to_unknown_index_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({
            "additionOperation": {
                "shareName": "A.OQ",
                "sharePrice": 10.0,
                "numberOfShares": 20.0,
                "indexName": "NOWHERE"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn deletion_below_member_minimum_is_conflict() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/create",
        Some(json!({
            "indexName": "SMALL",
            "indexMembers": [
                { "shareName": "A.OQ", "sharePrice": 10.0, "numberOfShares": 20.0 },
                { "shareName": "B.OQ", "sharePrice": 20.0, "numberOfShares": 30.0 }
            ]
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({
            "deletionOperation": { "shareName": "A.OQ", "indexName": "SMALL" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn dividend_errors_map_to_statuses() {
    let app = app();
    send(&app, "POST", "/api/create", Some(create_index_body())).await;

    // Unknown share anywhere
    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({ "dividendOperation": { "shareName": "ZZZ.OQ", "dividend": 1.0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Negative dividend
    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({ "dividendOperation": { "shareName": "A.OQ", "dividend": -1.0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Dividend above current price
    let (status, _) = send(
        &app,
        "POST",
        "/api/indexAdjustment",
        Some(json!({ "dividendOperation": { "shareName": "A.OQ", "dividend": 100.0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_adjustment_is_bad_request() {
    let app = app();
    let (status, _) = send(&app, "POST", "/api/indexAdjustment", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_single_index_state() {
    let app = app();
    send(&app, "POST", "/api/create", Some(create_index_body())).await;

    let (status, body) = send(&app, "GET", "/api/indexState/INDEX_1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["indexName"], "INDEX_1");
    assert_close(body["indexValue"].as_f64().unwrap(), 4000.0);
    let members = body["indexMembers"].as_array().unwrap();
    assert_eq!(members.len(), 4);

    let (status, _) = send(&app, "GET", "/api/indexState/MISSING", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "index-registry");
}
