//! Integration tests for HttpTransport
//!
//! A tiny axum server stands in for FwESI on an ephemeral port.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use esi_connect::{ConnectConfig, HttpTransport};
use esi_core_interface::{routes, RemoteTransport, TransportError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    puts: Arc<Mutex<Vec<Value>>>,
}

async fn active() -> Json<Value> {
    Json(json!({"scenarioId": 3, "scenarioName": "Wohnungsbrand"}))
}

async fn update_actor(State(state): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    state.puts.lock().unwrap().push(body);
    Json(json!({"answer": routes::ACTOR_UPDATED_ANSWER}))
}

async fn list_actors() -> Json<Value> {
    Json(json!({"operatorActors": []}))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn not_json() -> &'static str {
    "<html>FwESI</html>"
}

async fn spawn_server(state: Recorded) -> ConnectConfig {
    let app = Router::new()
        .route("/api/save-files/active", get(active))
        .route(
            "/api/operatoractors",
            get(list_actors).put(update_actor),
        )
        .route("/api/save-files", get(broken))
        .route("/api/not-json", get(not_json))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    ConnectConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_get_decodes_json() {
    let config = spawn_server(Recorded::default()).await;
    let transport = HttpTransport::new(&config).unwrap();

    let body = transport.get(routes::ACTIVE_SAVE).await.unwrap();
    assert_eq!(body["scenarioName"], json!("Wohnungsbrand"));
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let state = Recorded::default();
    let config = spawn_server(state.clone()).await;
    let transport = HttpTransport::new(&config).unwrap();

    let update = json!({"id": 12, "isVisible": false});
    let answer = transport
        .put(routes::OPERATOR_ACTORS, &update)
        .await
        .unwrap();

    assert_eq!(answer, json!({"answer": "actor has been updated"}));
    assert_eq!(state.puts.lock().unwrap().as_slice(), &[update]);
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let config = spawn_server(Recorded::default()).await;
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport.get(routes::SAVE_FILES).await.unwrap_err();
    match err {
        TransportError::Status { path, status } => {
            assert_eq!(path, "save-files");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let config = spawn_server(Recorded::default()).await;
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport.get("not-json").await.unwrap_err();
    assert!(matches!(err, TransportError::Decode { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Bind then drop so the port is very likely closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ConnectConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..Default::default()
    };
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport.get(routes::OPERATOR_ACTORS).await.unwrap_err();
    assert!(matches!(err, TransportError::Request { .. }));
    assert!(err.is_transient());
}
