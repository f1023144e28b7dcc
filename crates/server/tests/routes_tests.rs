//! HTTP surface tests.
//!
//! Exercises the router in process via `tower::ServiceExt::oneshot`. The
//! stub endpoints must return the fixed not-yet-implemented payload no
//! matter what body they receive; provision must reject malformed requests
//! with a 400 before touching the landscape.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

use icepanel_client::IcepanelClient;
use provisioner_server::{AppState, BASE_PATH, app};

/// Router backed by a client pointing at an unreachable address; stub
/// endpoints never dial it.
fn stub_app() -> Router {
    let icepanel = IcepanelClient::builder()
        .base_url("http://127.0.0.1:9".to_string())
        .landscape_id("land-1".to_string())
        .api_key(SecretString::new("test-key".into()))
        .build()
        .unwrap();
    app(Arc::new(AppState { icepanel }))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_not_yet_implemented(method: &str, path: &str, body: Body) {
    let response = stub_app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(format!("{BASE_PATH}{path}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Response not yet implemented"})
    );
}

#[tokio::test]
async fn test_validate_returns_not_yet_implemented_for_any_body() {
    assert_not_yet_implemented("POST", "/v1/validate", Body::from("anything at all")).await;
}

#[tokio::test]
async fn test_all_stub_endpoints_return_not_yet_implemented() {
    assert_not_yet_implemented("GET", "/v1/provision/token-1/status", Body::empty()).await;
    assert_not_yet_implemented("POST", "/v1/unprovision", Body::empty()).await;
    assert_not_yet_implemented("POST", "/v1/updateacl", Body::empty()).await;
    assert_not_yet_implemented("POST", "/v2/validate", Body::empty()).await;
    assert_not_yet_implemented("GET", "/v2/validate/token-1/status", Body::empty()).await;
}

#[tokio::test]
async fn test_provision_rejects_wrong_descriptor_kind() {
    let body = serde_json::json!({
        "descriptorKind": "DATAPRODUCT_DESCRIPTOR",
        "descriptor": "dataProduct: {}"
    });

    let response = stub_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("{BASE_PATH}/v1/provision"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await;
    let message = payload["errors"][0].as_str().unwrap();
    assert!(message.contains("COMPONENT_DESCRIPTOR"));
    assert!(message.contains("DATAPRODUCT_DESCRIPTOR"));
}

#[tokio::test]
async fn test_provision_rejects_unparseable_descriptor() {
    let body = serde_json::json!({
        "descriptorKind": "COMPONENT_DESCRIPTOR",
        "descriptor": "dataProduct: [unclosed"
    });

    let response = stub_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("{BASE_PATH}/v1/provision"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await;
    assert_eq!(payload["errors"][0], "Unable to parse the descriptor.");
}

#[tokio::test]
async fn test_routes_outside_base_path_do_not_exist() {
    let response = stub_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/validate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
