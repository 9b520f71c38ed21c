use bsc_mcp_server::logging::{self, LogTarget};
use bsc_mcp_server::server::http;
use bsc_mcp_server::{BscClient, Config, ToolSet};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // .env may carry RUST_LOG / LOG_FORMAT
    dotenv::dotenv().ok();
    logging::init(LogTarget::Stdout);

    info!("Starting BSC MCP HTTP/SSE server...");

    let config = Config::from_env()
        .and_then(Config::with_port_from_env)
        .map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })?;

    info!("Using BSC RPC URL: {}", config.rpc_url);

    let client = BscClient::new(&config)?;
    let tools = Arc::new(ToolSet::new(client));

    http::serve(tools, config.port).await?;

    info!("BSC MCP HTTP/SSE server stopped");
    Ok(())
}
