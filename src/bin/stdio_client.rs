use bsc_mcp_server::server::{JsonRpcRequest, JsonRpcResponse};
use bsc_mcp_server::ToolResult;
use eyre::{eyre, WrapErr};
use serde_json::{json, Value};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

const BINANCE_HOT_WALLET: &str = "0x8894E0a0c962CB723c1976a4421c95949bE2D4E3";
const BUSD_TOKEN: &str = "0xe9e7CEA3DedcA5984780Bafc599bD69ADd087D56";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    println!("Starting BSC MCP client example...");

    let server_command = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bsc-mcp-server".to_string());

    let mut client = StdioClient::spawn(&server_command)?;

    let init = client
        .request(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "bsc-mcp-example-client", "version": "1.0.0" }
            }),
        )
        .await?;
    client.notify("notifications/initialized").await?;
    println!(
        "Connected to {} {}",
        init["serverInfo"]["name"], init["serverInfo"]["version"]
    );

    let tools = client.request("tools/list", json!({})).await?;
    if let Some(tools) = tools["tools"].as_array() {
        println!("\nAvailable tools:");
        for tool in tools {
            println!("  - {}: {}", tool["name"], tool["description"]);
        }
    }

    println!("\nGetting current block number:");
    client.call_tool("get-block-number", json!({})).await?;

    println!("\nGetting block details:");
    client
        .call_tool("get-block", json!({ "blockHashOrNumber": 1_000_000 }))
        .await?;

    println!("\nGetting balance for address {}:", BINANCE_HOT_WALLET);
    client
        .call_tool("get-balance", json!({ "address": BINANCE_HOT_WALLET }))
        .await?;

    println!(
        "\nGetting BUSD token balance for address {}:",
        BINANCE_HOT_WALLET
    );
    client
        .call_tool(
            "get-token-balance",
            json!({ "tokenAddress": BUSD_TOKEN, "walletAddress": BINANCE_HOT_WALLET }),
        )
        .await?;

    client.shutdown().await?;
    println!("\nDisconnected from BSC MCP server");
    Ok(())
}

struct StdioClient {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    request_id: u64,
}

impl StdioClient {
    fn spawn(command: &str) -> eyre::Result<Self> {
        let mut child = Command::new(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .wrap_err_with(|| format!("failed to start MCP server '{}'", command))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| eyre!("server stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| eyre!("server stdout unavailable"))?;

        Ok(StdioClient {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            request_id: 1,
        })
    }

    async fn send(&mut self, request: &JsonRpcRequest) -> eyre::Result<()> {
        let line = serde_json::to_string(request)?;
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    async fn request(&mut self, method: &str, params: Value) -> eyre::Result<Value> {
        let id = self.request_id;
        self.request_id += 1;

        self.send(&JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(id)),
        })
        .await?;

        let line = self
            .stdout
            .next_line()
            .await?
            .ok_or_else(|| eyre!("server closed the connection"))?;
        let response: JsonRpcResponse = serde_json::from_str(&line)?;

        if let Some(error) = response.error {
            return Err(eyre!("{} failed ({}): {}", method, error.code, error.message));
        }

        response
            .result
            .ok_or_else(|| eyre!("{} returned no result", method))
    }

    async fn notify(&mut self, method: &str) -> eyre::Result<()> {
        self.send(&JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params: Value::Null,
            id: None,
        })
        .await
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> eyre::Result<()> {
        let result = self
            .request("tools/call", json!({ "name": name, "arguments": arguments }))
            .await?;
        let result: ToolResult = serde_json::from_value(result)?;

        for content in &result.content {
            if result.is_error() {
                println!("⚠️  {}", content.text);
            } else {
                println!("{}", content.text);
            }
        }
        Ok(())
    }

    async fn shutdown(mut self) -> eyre::Result<()> {
        // Closing stdin makes the server exit on EOF
        drop(self.stdin);
        self.child.wait().await?;
        Ok(())
    }
}
