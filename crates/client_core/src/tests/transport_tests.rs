use super::*;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ServerState {
    analyze_bodies: Arc<Mutex<Vec<Value>>>,
}

async fn handle_analyze(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .analyze_bodies
        .lock()
        .expect("lock")
        .push(body.clone());
    if body["steps"].as_array().is_some_and(|steps| steps.is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no step data received" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "summary": { "lead_time": 3.0, "va_ratio": 100.0, "total_wait_time": 0.0 },
            "steps": [{ "name": "Cut", "start_time": 0.0, "cost": 100.0 }],
            "timeline": [{ "name": "Cut", "wait": 0.0, "cycle": 3.0 }],
            "ai_report": "VSM report",
            "alerts": []
        })),
    )
}

async fn handle_analyze_step(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "step": body["name"], "predicted_wait_time": 0.5 }))
}

async fn handle_chat(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "response": format!("echo: {}", body["message"].as_str().unwrap_or_default()) }))
}

async fn spawn_backend() -> anyhow::Result<(String, ServerState)> {
    let state = ServerState::default();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(ANALYZE_PATH, post(handle_analyze))
        .route(ANALYZE_STEP_PATH, post(handle_analyze_step))
        .route(CHAT_PATH, post(handle_chat))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn cut_step() -> StepPayload {
    StepPayload {
        name: "Cut".to_string(),
        cycle_time: 3.0,
        cost: 100.0,
        value_added: true,
        depends_on: Vec::new(),
    }
}

#[test]
fn rejects_unparsable_server_url() {
    assert!(HttpBackend::new("not a url").is_err());
    let backend = HttpBackend::new("http://127.0.0.1:5000/").expect("url");
    assert_eq!(backend.server_url(), "http://127.0.0.1:5000");
}

#[tokio::test]
async fn analyze_posts_json_and_returns_raw_body() {
    let (server_url, state) = spawn_backend().await.expect("server");
    let backend = HttpBackend::new(&server_url).expect("url");

    let body = backend
        .analyze(&AnalyzeRequest {
            process_name: "Line".to_string(),
            steps: vec![cut_step()],
        })
        .await
        .expect("analyze");

    assert_eq!(body["summary"]["lead_time"], 3.0);
    let sent = state.analyze_bodies.lock().expect("lock");
    assert_eq!(sent[0]["process_name"], "Line");
    assert_eq!(sent[0]["steps"][0]["name"], "Cut");
    assert!(sent[0]["steps"][0].get("wait_time").is_none());
}

#[tokio::test]
async fn error_status_still_yields_error_body() {
    let (server_url, _state) = spawn_backend().await.expect("server");
    let backend = HttpBackend::new(&server_url).expect("url");

    let body = backend
        .analyze(&AnalyzeRequest {
            process_name: "Line".to_string(),
            steps: Vec::new(),
        })
        .await
        .expect("body despite 400");

    assert_eq!(body["error"], "no step data received");
}

#[tokio::test]
async fn chat_and_step_prediction_round_trip() {
    let (server_url, _state) = spawn_backend().await.expect("server");
    let backend = HttpBackend::new(&server_url).expect("url");

    let reply = backend
        .chat(&ChatRequest {
            message: "hi".to_string(),
        })
        .await
        .expect("chat");
    assert_eq!(reply.response, "echo: hi");

    let prediction = backend.analyze_step(&cut_step()).await.expect("predict");
    assert_eq!(prediction["step"], "Cut");
    assert_eq!(prediction["predicted_wait_time"], 0.5);
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = HttpBackend::new(&format!("http://{addr}")).expect("url");
    let err = backend
        .chat(&ChatRequest {
            message: "hi".to_string(),
        })
        .await
        .expect_err("connection refused");
    assert!(matches!(err, TransportError::Request(_)));
}

#[tokio::test]
async fn missing_backend_reports_unavailable() {
    let err = MissingBackend
        .analyze(&AnalyzeRequest {
            process_name: "Line".to_string(),
            steps: vec![cut_step()],
        })
        .await
        .expect_err("unavailable");
    assert!(matches!(err, TransportError::Unavailable(_)));
}
