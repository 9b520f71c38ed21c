pub mod http;
pub mod mcp;

pub use mcp::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer};

pub const SERVER_NAME: &str = "BSC Explorer";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_DESCRIPTION: &str = "MCP server for interacting with Binance Smart Chain";
