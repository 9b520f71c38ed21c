use serde_json::{json, Value};
use std::io::{self, Write};

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║   BSC MCP HTTP Server - Test Client v1.0             ║");
    println!("╚═══════════════════════════════════════════════════════╝\n");

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MCP_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let client = TestClient::new(base_url);

    println!("Getting server info from {}...", client.base_url);
    client.hello().await?;

    loop {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║ Available Commands:                                  ║");
        println!("║ 1. get-block-number        - Current block height   ║");
        println!("║ 2. get-block               - Block by hash/number   ║");
        println!("║ 3. get-transaction         - Transaction by hash    ║");
        println!("║ 4. get-transaction-receipt - Receipt by hash        ║");
        println!("║ 5. get-balance             - BNB balance            ║");
        println!("║ 6. get-token-balance       - BEP-20 balance         ║");
        println!("║ 7. create-four-meme-token  - Deploy a token         ║");
        println!("║ 8. hello                   - Server info            ║");
        println!("║ 9. exit                    - Quit                   ║");
        println!("╚═══════════════════════════════════════════════════════╝");

        let choice = prompt("\nEnter command number (1-9): ")?;

        let outcome = match choice.as_str() {
            "1" => client.call_tool("get-block-number", json!({})).await,
            "2" => {
                let block = prompt("Enter block hash or number (e.g. latest): ")?;
                let block = match block.parse::<u64>() {
                    Ok(number) => json!(number),
                    Err(_) => json!(block),
                };
                client
                    .call_tool("get-block", json!({ "blockHashOrNumber": block }))
                    .await
            }
            "3" => {
                let hash = prompt("Enter transaction hash (0x...): ")?;
                client
                    .call_tool("get-transaction", json!({ "txHash": hash }))
                    .await
            }
            "4" => {
                let hash = prompt("Enter transaction hash (0x...): ")?;
                client
                    .call_tool("get-transaction-receipt", json!({ "txHash": hash }))
                    .await
            }
            "5" => {
                let address = prompt("Enter BSC address (0x...): ")?;
                client
                    .call_tool("get-balance", json!({ "address": address }))
                    .await
            }
            "6" => {
                let token = prompt("Enter token address (0x...): ")?;
                let wallet = prompt("Enter wallet address (0x...): ")?;
                client
                    .call_tool(
                        "get-token-balance",
                        json!({ "tokenAddress": token, "walletAddress": wallet }),
                    )
                    .await
            }
            "7" => {
                let name = prompt("Enter token name: ")?;
                let symbol = prompt("Enter token symbol: ")?;
                let supply: f64 = prompt("Enter initial supply: ")?.parse().unwrap_or(0.0);
                let decimals: u8 = prompt("Enter decimals (default 18): ")?
                    .parse()
                    .unwrap_or(18);
                let owner = prompt("Enter owner address (0x...): ")?;
                client
                    .call_tool(
                        "create-four-meme-token",
                        json!({
                            "name": name,
                            "symbol": symbol,
                            "initialSupply": supply,
                            "decimals": decimals,
                            "ownerAddress": owner
                        }),
                    )
                    .await
            }
            "8" => client.hello().await,
            "9" => {
                println!("\nGoodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1-9.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("\n⚠️  Request failed: {}", e);
        }
    }

    Ok(())
}

fn prompt(message: &str) -> eyre::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

struct TestClient {
    base_url: String,
    http: reqwest::Client,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        TestClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> eyre::Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        println!(
            "\n→ POST {}\n{}",
            url,
            serde_json::to_string_pretty(&body)?
        );

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        println!("\n← Response received ({}):", status);
        Ok(body)
    }

    async fn hello(&self) -> eyre::Result<()> {
        let info = self.post("/mcp/hello", json!({})).await?;
        println!("{}", serde_json::to_string_pretty(&info)?);
        Ok(())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> eyre::Result<()> {
        let response = self.post(&format!("/mcp/tools/{}", name), arguments).await?;

        if let Some(error) = response.get("error").and_then(|e| e.as_str()) {
            println!("\n⚠️  Error: {}", error);
            return Ok(());
        }

        let is_error = response
            .get("isError")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let texts = response
            .get("content")
            .and_then(|c| c.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        for text in texts {
            if is_error {
                println!("\n⚠️  {}", text);
            } else {
                println!("{}", text);
            }
        }

        Ok(())
    }
}
