pub mod config;
pub mod error;
pub mod logging;
pub mod precision;
pub mod rpc;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{BscError, Result};
pub use rpc::BscClient;
pub use server::McpServer;
pub use tools::{ToolResult, ToolSet};
