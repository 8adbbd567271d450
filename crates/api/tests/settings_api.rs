//! HTTP-level integration tests for the settings endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use overlay_core::settings;
use serde_json::json;

#[tokio::test]
async fn get_on_empty_store_creates_defaults() {
    let store = common::test_store();
    let app = common::build_test_app(store.clone());
    let response = get(app, "/api/settings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert!(data["id"].is_string());
    assert_eq!(data["streamUrl"], "");
    assert_eq!(data["volume"].as_f64(), Some(0.8));
    assert_eq!(data["autoPlay"], false);
    assert_eq!(data["overlaysEnabled"], true);
    assert!(data["updatedAt"].is_string());

    assert_eq!(store.count(settings::COLLECTION).await, 1);
}

#[tokio::test]
async fn repeated_get_returns_the_same_document() {
    let store = common::test_store();
    let first = body_json(get(common::build_test_app(store.clone()), "/api/settings").await).await;
    let second = body_json(get(common::build_test_app(store.clone()), "/api/settings").await).await;

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(store.count(settings::COLLECTION).await, 1);
}

#[tokio::test]
async fn put_on_empty_store_creates_document() {
    let store = common::test_store();
    let app = common::build_test_app(store.clone());
    let response = put_json(
        app,
        "/api/settings",
        json!({"streamUrl": "rtsp://camera.local/live", "volume": 0.5}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["streamUrl"], "rtsp://camera.local/live");
    assert_eq!(json["data"]["volume"].as_f64(), Some(0.5));
    assert!(json["message"].is_string());
    assert_eq!(store.count(settings::COLLECTION).await, 1);
}

#[tokio::test]
async fn put_merges_into_existing_document() {
    let store = common::test_store();
    let created = body_json(get(common::build_test_app(store.clone()), "/api/settings").await).await;

    let app = common::build_test_app(store.clone());
    let response = put_json(app, "/api/settings", json!({"autoPlay": true})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["id"], created["data"]["id"]);
    assert_eq!(data["autoPlay"], true);
    assert_eq!(data["volume"].as_f64(), Some(0.8));
    assert_eq!(data["overlaysEnabled"], true);
    assert_eq!(store.count(settings::COLLECTION).await, 1);
}

#[tokio::test]
async fn volume_is_clamped() {
    let store = common::test_store();

    for (input, expected) in [(json!(1.5), 1.0), (json!(-0.3), 0.0), (json!("0.25"), 0.25)] {
        let app = common::build_test_app(store.clone());
        let response = put_json(app, "/api/settings", json!({"volume": input})).await;
        assert_eq!(response.status(), StatusCode::OK);

        let data = body_json(response).await["data"].clone();
        assert_eq!(data["volume"].as_f64(), Some(expected));
    }
}

#[tokio::test]
async fn non_numeric_volume_returns_400_and_keeps_settings() {
    let store = common::test_store();
    let app = common::build_test_app(store.clone());
    put_json(app, "/api/settings", json!({"volume": 0.4})).await;

    let app = common::build_test_app(store.clone());
    let response = put_json(
        app,
        "/api/settings",
        json!({"volume": "loud", "streamUrl": "rtsp://ignored"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "COERCION_ERROR");

    let app = common::build_test_app(store);
    let data = body_json(get(app, "/api/settings").await).await["data"].clone();
    assert_eq!(data["volume"].as_f64(), Some(0.4));
    assert_eq!(data["streamUrl"], "");
}

#[tokio::test]
async fn flags_are_coerced_to_booleans() {
    let app = common::build_test_app(common::test_store());
    let response = put_json(
        app,
        "/api/settings",
        json!({"autoPlay": "yes", "overlaysEnabled": 0}),
    )
    .await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["autoPlay"], true);
    assert_eq!(data["overlaysEnabled"], false);
}

#[tokio::test]
async fn put_with_empty_object_returns_400_and_creates_nothing() {
    let store = common::test_store();
    let app = common::build_test_app(store.clone());
    let response = put_json(app, "/api/settings", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "No data provided");
    assert_eq!(store.count(settings::COLLECTION).await, 0);
}

#[tokio::test]
async fn put_with_empty_object_keeps_existing_document() {
    let store = common::test_store();
    let created = body_json(get(common::build_test_app(store.clone()), "/api/settings").await).await;

    let app = common::build_test_app(store.clone());
    let response = put_json(app, "/api/settings", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = body_json(get(common::build_test_app(store), "/api/settings").await).await;
    assert_eq!(after["data"], created["data"]);
}
