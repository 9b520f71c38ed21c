use bsc_mcp_server::logging::{self, LogTarget};
use bsc_mcp_server::{BscClient, Config, McpServer, ToolSet};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // .env may carry RUST_LOG / LOG_FORMAT
    dotenv::dotenv().ok();
    // stdout carries the protocol, so logs go to stderr
    logging::init(LogTarget::Stderr);

    info!("Starting BSC MCP server...");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Using BSC RPC URL: {}", config.rpc_url);
    if !config.has_signer() {
        info!("BSC_PRIVATE_KEY not set, token creation is disabled");
    }

    let client = BscClient::new(&config)?;
    let server = McpServer::new(Arc::new(ToolSet::new(client)));

    info!("BSC MCP server is running on stdio");

    if let Err(e) = server.serve_stdio().await {
        error!("Error running BSC MCP server: {}", e);
        return Err(e.into());
    }

    Ok(())
}
