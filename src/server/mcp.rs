use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

use crate::server::{SERVER_DESCRIPTION, SERVER_NAME, SERVER_VERSION};
use crate::tools::ToolSet;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 Request format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
    /// Absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 Response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        JsonRpcError {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, error: JsonRpcError) -> Self {
        JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn parse_error(details: String) -> Self {
        Self::failure(
            Value::Null,
            JsonRpcError {
                code: PARSE_ERROR,
                message: "Parse error".to_string(),
                data: Some(Value::String(details)),
            },
        )
    }
}

/// MCP server speaking JSON-RPC over a line-delimited stream
pub struct McpServer {
    tools: Arc<ToolSet>,
}

impl McpServer {
    pub fn new(tools: Arc<ToolSet>) -> Self {
        McpServer { tools }
    }

    /// Handle a JSON-RPC message. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(
            "Handling MCP request: {} with params: {:?}",
            request.method, request.params
        );

        let id = match request.id {
            Some(id) => id,
            None => {
                debug!("Received notification: {}", request.method);
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params).await,
            _ => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match response {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => JsonRpcResponse::failure(id, err),
        })
    }

    fn handle_initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        if let Some(client) = params.get("clientInfo") {
            info!("Client connected: {}", client);
        }

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            },
            "instructions": SERVER_DESCRIPTION
        })
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let tools = serde_json::to_value(ToolSet::definitions()).map_err(|e| {
            JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {}", e))
        })?;
        Ok(json!({ "tools": tools }))
    }

    async fn handle_tool_call(&self, params: &Value) -> Result<Value, JsonRpcError> {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                JsonRpcError::new(INVALID_PARAMS, "Missing or invalid 'name' parameter")
            })?;

        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self
            .tools
            .call(tool_name, arguments)
            .await
            .ok_or_else(|| {
                JsonRpcError::new(INVALID_PARAMS, format!("Tool not found: {}", tool_name))
            })?;

        serde_json::to_value(&result)
            .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {}", e)))
    }

    /// Serve newline-delimited JSON-RPC until the reader reaches EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            // Invalid UTF-8 falls through to the parse error reply
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => {
                    info!("Received request: {} (id: {:?})", request.method, request.id);
                    self.handle_request(request).await
                }
                Err(e) => {
                    error!("Failed to parse JSON-RPC request: {}", e);
                    Some(JsonRpcResponse::parse_error(e.to_string()))
                }
            };

            if let Some(response) = response {
                let response_json = serde_json::to_string(&response).map_err(io::Error::other)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input stream closed, shutting down");
        Ok(())
    }

    /// Serve over the process's stdin/stdout
    pub async fn serve_stdio(&self) -> io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }
}
