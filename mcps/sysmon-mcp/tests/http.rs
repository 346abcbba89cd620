//! HTTP transport over a real socket

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use sysmon_mcp::http::{create_router, HttpConfig};

use common::{server, StubHost};

async fn spawn_server(api_key: Option<&str>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = create_router(
        server(StubHost::default()),
        HttpConfig {
            port: addr.port(),
            api_key: api_key.map(str::to_string),
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn initialize() -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})
}

#[tokio::test]
async fn test_health() {
    let addr = spawn_server(Some("secret")).await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "MCP System Monitor");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_post_without_configured_key() {
    let addr = spawn_server(None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .json(&initialize())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_api_key_gate() {
    let addr = spawn_server(Some("secret")).await;
    let client = reqwest::Client::new();

    let missing = client
        .post(format!("http://{}/messages", addr))
        .json(&initialize())
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = client
        .post(format!("http://{}/messages", addr))
        .header("x-api-key", "guess")
        .json(&initialize())
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let header = client
        .post(format!("http://{}/messages", addr))
        .header("x-api-key", "secret")
        .json(&initialize())
        .send()
        .await
        .unwrap();
    assert_eq!(header.status(), StatusCode::OK);

    let query = client
        .post(format!("http://{}/?apiKey=secret", addr))
        .json(&initialize())
        .send()
        .await
        .unwrap();
    assert_eq!(query.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_error_statuses() {
    let addr = spawn_server(None).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/", addr);

    let not_found = client
        .post(&url)
        .json(&json!({"jsonrpc": "2.0", "id": 2, "method": "unknown"}))
        .send()
        .await
        .unwrap();
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
    let body: Value = not_found.json().await.unwrap();
    assert_eq!(body["error"]["code"], -32601);

    let invalid = client
        .post(&url)
        .json(&json!({"id": 3, "method": "initialize"}))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let unparseable = client
        .post(&url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(unparseable.status(), StatusCode::BAD_REQUEST);
    let body: Value = unparseable.json().await.unwrap();
    assert_eq!(body["error"]["code"], -32700);

    let unknown_tool = client
        .post(&url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "nope"},
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_tool.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_tool_call_over_http() {
    let addr = spawn_server(None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "get_disk_info", "arguments": {"mountPoint": "/var"}},
        }))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    let disks: Value = serde_json::from_str(text).unwrap();
    assert_eq!(disks[0]["mount_point"], "/var");
}

#[tokio::test]
async fn test_sse_announces_endpoint() {
    let addr = spawn_server(None).await;

    let mut response = reqwest::get(format!("http://{}/sse", addr)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let expected = format!("data: http://localhost:{}/", addr.port());
    let mut received = String::new();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !received.contains(&expected) {
            match response.chunk().await.unwrap() {
                Some(chunk) => received.push_str(&String::from_utf8_lossy(&chunk)),
                None => break,
            }
        }
    })
    .await
    .unwrap();

    assert!(received.contains("event: endpoint"));
    assert!(received.contains(&expected));
}

#[tokio::test]
async fn test_sse_requires_key_when_configured() {
    let addr = spawn_server(Some("secret")).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
