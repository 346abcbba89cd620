//! HTTP transport: SSE endpoint announcement plus synchronous JSON-RPC over POST
//!
//! Routes:
//! - `GET /`, `GET /sse`: event stream announcing the POST endpoint, then heartbeats
//! - `POST /`, `POST /messages`: one JSON-RPC request per body, answered inline
//! - `GET /health`: liveness, never behind the API key
//!
//! Authentication is optional: without a configured key every request is allowed.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use futures_util::stream::{self, Stream, StreamExt};
use mcp_common::Dispatcher;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::info::iso_millis;
use crate::server::SysMonMcpServer;

/// Default listening port
pub const DEFAULT_PORT: u16 = 57996;

/// Service name reported by `/health`
pub const SERVICE_NAME: &str = "MCP System Monitor";

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
const API_KEY_HEADER: &str = "x-api-key";
const API_KEY_QUERY: &str = "apiKey";

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub port: u16,
    pub api_key: Option<String>,
}

#[derive(Clone)]
struct AppState {
    dispatcher: Dispatcher<SysMonMcpServer>,
    api_key: Option<Arc<str>>,
    port: u16,
}

/// Serve `server` on `0.0.0.0:<port>` until the process exits
pub async fn serve(server: SysMonMcpServer, config: HttpConfig) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("MCP System Monitor listening on http://localhost:{}", config.port);
    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    }

    axum::serve(listener, create_router(server, config)).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(server: SysMonMcpServer, config: HttpConfig) -> Router {
    let state = AppState {
        dispatcher: Dispatcher::new(Arc::new(server)),
        api_key: config.api_key.map(Arc::from),
        port: config.port,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mcp_routes = Router::new()
        .route("/", get(sse_handler).post(message_handler))
        .route("/sse", get(sse_handler))
        .route("/messages", post(message_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key_middleware));

    Router::new()
        .merge(mcp_routes)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rejects requests without the configured key, passes everything when none is set
async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let from_query = request.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| *name == API_KEY_QUERY)
            .map(|(_, value)| value.into_owned())
    });

    match from_header.or(from_query) {
        Some(provided) if provided == expected => next.run(request).await,
        Some(_) => {
            tracing::warn!("Invalid API key for {}", request.uri().path());
            unauthorized()
        }
        None => {
            tracing::warn!("Missing API key for {}", request.uri().path());
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let endpoint = format!("http://localhost:{}/", state.port);
    tracing::debug!("SSE client connected, announcing {}", endpoint);

    let opening: [Result<Event, Infallible>; 2] = [
        Ok(Event::default().event("endpoint").data(endpoint)),
        Ok(Event::default().comment("heartbeat")),
    ];
    let events = stream::iter(opening).chain(stream::pending());

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}

async fn message_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let response = state.dispatcher.handle_bytes(&body).await;
    let status =
        StatusCode::from_u16(response.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response)).into_response()
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": iso_millis(Utc::now()),
    }))
}
