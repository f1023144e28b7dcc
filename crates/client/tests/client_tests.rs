//! IcePanel client endpoint tests.
//!
//! Covers the landscape export, create/update calls for model objects and
//! connections, and error mapping for non-success responses.
//!
//! # Invariants
//! - Every request carries the `Authorization: ApiKey ...` header
//! - Create calls return the id assigned by the API
//! - Update calls echo the id they addressed
//! - Non-2xx responses surface as `ClientError::Api` with status and URL

use std::collections::HashMap;

use secrecy::SecretString;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use icepanel_client::{ClientError, IcepanelClient, ModelConnection, ModelObject};

fn test_client(base_url: &str) -> IcepanelClient {
    IcepanelClient::builder()
        .base_url(base_url.to_string())
        .landscape_id("land-1".to_string())
        .api_key(SecretString::new("test-key".into()))
        .build()
        .unwrap()
}

fn sample_object(name: &str) -> ModelObject {
    ModelObject {
        caption: String::new(),
        description: "a component".to_string(),
        domain_id: "dom-1".to_string(),
        external: false,
        icon: None,
        id: "local-1".to_string(),
        links: HashMap::new(),
        name: name.to_string(),
        parent_id: Some("root-1".to_string()),
        parent_ids: Vec::new(),
        status: "live".to_string(),
        tag_ids: Vec::new(),
        team_ids: Vec::new(),
        technologies: HashMap::new(),
        object_type: "app".to_string(),
    }
}

#[tokio::test]
async fn test_export_landscape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/landscapes/land-1/versions/latest/export/json"))
        .and(header("Authorization", "ApiKey test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "domains": {
                "d1": {"id": "d1", "name": "Default domain"}
            },
            "flows": {},
            "modelConnections": {},
            "modelObjects": {
                "o1": {
                    "caption": "", "description": "", "domainId": "d1",
                    "external": false, "icon": null, "id": "o1", "links": {},
                    "name": "root", "parentId": null, "parentIds": [],
                    "status": "live", "tagIds": [], "teamIds": [],
                    "technologies": {}, "type": "root"
                }
            },
            "tagGroups": {},
            "tags": {},
            "teams": {}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let export = client.export_landscape().await.unwrap();

    assert_eq!(export.domains["d1"].name, "Default domain");
    assert_eq!(export.model_objects["o1"].object_type, "root");
    assert!(export.model_connections.is_empty());
}

#[tokio::test]
async fn test_create_object_returns_assigned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/landscapes/land-1/versions/latest/model/objects"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "modelObject": {"id": "remote-42", "name": "My Port"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let id = client.create_object(&sample_object("My Port")).await.unwrap();

    assert_eq!(id, "remote-42");
}

#[tokio::test]
async fn test_create_object_without_id_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/landscapes/land-1/versions/latest/model/objects"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .create_object(&sample_object("My Port"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_update_object_echoes_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/landscapes/land-1/versions/latest/model/objects/remote-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "modelObject": {"id": "remote-7"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let id = client
        .update_object("remote-7", &sample_object("My Port"))
        .await
        .unwrap();

    assert_eq!(id, "remote-7");
}

#[tokio::test]
async fn test_create_connection_returns_assigned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/landscapes/land-1/versions/latest/model/connections"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "modelConnection": {"id": "conn-9"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connection = ModelConnection {
        description: "dependsOn".to_string(),
        direction: "outgoing".to_string(),
        id: String::new(),
        name: "dependsOn".to_string(),
        origin_id: "remote-1".to_string(),
        status: "live".to_string(),
        tag_ids: Vec::new(),
        target_id: "remote-2".to_string(),
        technologies: HashMap::new(),
    };

    let client = test_client(&mock_server.uri());
    let id = client.create_connection(&connection).await.unwrap();

    assert_eq!(id, "conn-9");
}

#[tokio::test]
async fn test_api_error_carries_status_and_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/landscapes/land-1/versions/latest/export/json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.export_landscape().await.unwrap_err();

    match err {
        ClientError::Api { status, url, message } => {
            assert_eq!(status, 403);
            assert!(url.ends_with("/export/json"));
            assert_eq!(message, "forbidden");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
