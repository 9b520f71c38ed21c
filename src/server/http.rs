use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::future;
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::server::{SERVER_NAME, SERVER_VERSION};
use crate::tools::{ToolResult, ToolSet};

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolSet>,
    /// Flips to `true` once the server starts shutting down
    shutdown: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(tools: Arc<ToolSet>, shutdown: watch::Receiver<bool>) -> Self {
        AppState { tools, shutdown }
    }

    /// Resolves once shutdown starts
    fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut shutdown = self.shutdown.clone();
        async move {
            loop {
                if *shutdown.borrow_and_update() {
                    return;
                }
                if shutdown.changed().await.is_err() {
                    // sender dropped without signalling
                    future::pending::<()>().await;
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Tool entry of the hello response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub version: String,
    pub name: String,
    pub tools: Vec<ToolInfo>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/mcp/hello", post(hello))
        .route("/mcp/tools/{tool_name}", post(call_tool))
        .route("/mcp/sse", get(sse))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "BSC MCP HTTP/SSE Server is running"
}

async fn hello() -> Json<HelloResponse> {
    let tools = ToolSet::definitions()
        .into_iter()
        .map(|tool| ToolInfo {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        })
        .collect();

    Json(HelloResponse {
        version: SERVER_VERSION.to_string(),
        name: SERVER_NAME.to_string(),
        tools,
    })
}

async fn call_tool(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolResult>, ApiError> {
    if !state.tools.contains(&tool_name) {
        return Err(ApiError::not_found(format!(
            "Tool '{}' not found",
            tool_name
        )));
    }

    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            error!("Invalid JSON body for tool {}: {}", tool_name, e);
            ApiError::bad_request(format!("Invalid JSON body: {}", e))
        })?
    };

    state
        .tools
        .call(&tool_name, arguments)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Tool '{}' not found", tool_name)))
}

/// Logs when the SSE stream holding it is dropped
struct SseConnection;

impl Drop for SseConnection {
    fn drop(&mut self) {
        info!("Client disconnected from SSE");
    }
}

async fn sse(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Client connected to SSE");

    let connection = SseConnection;
    let connected = Event::default().data(json!({ "type": "connected" }).to_string());

    let events = stream::once(async move { Ok::<_, Infallible>(connected) })
        .chain(stream::pending())
        .take_until(state.closed())
        .map(move |event| {
            let _connection = &connection;
            event
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Bind and serve the HTTP/SSE surface until Ctrl-C
pub async fn serve(tools: Arc<ToolSet>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("BSC MCP HTTP/SSE server is running on port {}", port);
    info!("- Root endpoint: http://localhost:{}/", port);
    info!("- SSE endpoint: http://localhost:{}/mcp/sse", port);
    info!("- Hello endpoint: http://localhost:{}/mcp/hello", port);
    info!("- Tool calls: http://localhost:{}/mcp/tools/:toolName", port);

    serve_listener(listener, tools, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
    })
    .await
}

/// Serve on an already bound listener until `signal` resolves. Open SSE
/// streams are ended so the graceful shutdown can complete.
pub async fn serve_listener<F>(
    listener: TcpListener,
    tools: Arc<ToolSet>,
    signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    axum::serve(listener, router(AppState::new(tools, shutdown_rx)))
        .with_graceful_shutdown(async move {
            signal.await;
            shutdown_tx.send_replace(true);
        })
        .await
}
