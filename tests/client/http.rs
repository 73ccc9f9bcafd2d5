use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cc::{ClientConfig, ClientError, Operation, ScenarioDataClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;

fn satellites_of(id: &str) -> Value {
    json!([
        {"id": 12, "scenario": id, "stk_name": "Sat12", "plane_index": 1},
        {"id": 11, "scenario": id, "stk_name": "Sat11", "plane_index": 1}
    ])
}

async fn scenario(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "7" | "13" => Ok(Json(json!({"id": id, "name": format!("Walker {id}")}))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn scenario_satellites(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "7" => Ok(Json(satellites_of("7"))),
        "13" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn satellites(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("scenario_id") {
        Some(id) => Json(satellites_of(id)),
        None => Json(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
    }
}

/// Serves a small scenario backend on an ephemeral local port.
async fn serve_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/scenarios/", get(|| async { Json(json!([{"id": 7}, {"id": 13}])) }))
        .route("/api/scenarios/:id/", get(scenario))
        .route("/api/scenarios/:id/satellites/", get(scenario_satellites))
        .route("/api/satellites/", get(satellites));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ScenarioDataClient {
    crate::init_logger();
    ScenarioDataClient::new(
        &ClientConfig::builder()
            .base_url(format!("http://{addr}/api"))
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn bundle_over_http() {
    let client = client_for(serve_backend().await);

    assert_eq!(client.list_scenarios().await.unwrap().len(), 2);

    let bundle = client.get_scenario_bundle(&"7".into()).await.unwrap();
    assert_eq!(bundle.scenario, json!({"id": "7", "name": "Walker 7"}));
    assert_eq!(Value::Array(bundle.satellites), satellites_of("7"));
}

#[tokio::test]
async fn http_not_found() {
    let client = client_for(serve_backend().await);

    let err = client.get_scenario(&"42".into()).await.unwrap_err();
    match &err {
        ClientError::RemoteFetch {
            operation,
            status,
            status_text,
        } => {
            assert_eq!(*operation, Operation::GetScenario);
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("expected a remote fetch error, got {other:?}"),
    }
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn http_bundle_with_failing_satellites() {
    let client = client_for(serve_backend().await);

    let err = client.get_scenario_bundle(&"13".into()).await.unwrap_err();
    assert_eq!(err.operation(), Some(Operation::ListScenarioSatellites));
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"), "{err}");
}

#[tokio::test]
async fn http_satellite_filter() {
    let client = client_for(serve_backend().await);

    assert_eq!(client.list_satellites(None).await.unwrap().len(), 3);
    let filtered = client.list_satellites(Some(&"7".into())).await.unwrap();
    assert_eq!(Value::Array(filtered), satellites_of("7"));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Grab a free port, then close it so nothing listens there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.list_scenarios().await.unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::Transport {
                operation: Operation::ListScenarios,
                ..
            }
        ),
        "{err:?}"
    );
}
