use alloy::primitives::{Address, B256};
use bsc_mcp_server::server::McpServer;
use bsc_mcp_server::{BscClient, Config, ToolResult, ToolSet};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

const WALLET: &str = "0x8894e0a0c962cb723c1976a4421c95949be2d4e3";
const BUSD: &str = "0xe9e7cea3dedca5984780bafc599bd69add087d56";

// Anvil's first development key.
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcb94d7e1e7d5d3e56";
const TEST_KEY_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

const BLOCK_NUMBER: &str = "0xf4240";
const DEPLOYED_TOKEN: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

fn block_hash() -> String {
    format!("0x{}", "11".repeat(32))
}

fn tx_hash() -> String {
    format!("0x{}", "ab".repeat(32))
}

fn bloom() -> String {
    format!("0x{}", "00".repeat(256))
}

fn word(value: u128) -> String {
    format!("{:064x}", value)
}

/// ABI encoding of a single dynamic `string` return value
fn abi_string(value: &str) -> String {
    let mut data = hex_encode(value.as_bytes());
    while data.len() % 64 != 0 || data.is_empty() {
        data.push('0');
    }
    format!("0x{}{}{}", word(0x20), word(value.len() as u128), data)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Answer canned results for the RPC methods exercised by the tools,
/// echoing each request id.
fn answer(request: &Value) -> Value {
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];

    let result = match method {
        "eth_blockNumber" => json!("0x10"),
        "eth_getBalance" => json!("0xde0b6b3a7640000"),
        "eth_getBlockByNumber" | "eth_getBlockByHash" => Value::Null,
        "eth_getTransactionByHash" | "eth_getTransactionReceipt" => Value::Null,
        "eth_call" => {
            let call = &params[0];
            let input = call["input"]
                .as_str()
                .or_else(|| call["data"].as_str())
                .unwrap_or_default();

            if input.starts_with("0x70a08231") {
                json!(format!("0x{}", word(1_234_500_000_000_000_000)))
            } else if input.starts_with("0x313ce567") {
                json!(format!("0x{}", word(18)))
            } else if input.starts_with("0x95d89b41") {
                json!(abi_string("BUSD"))
            } else {
                json!("0x")
            }
        }
        other => {
            return json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "error": { "code": -32601, "message": format!("unsupported method {}", other) }
            })
        }
    };

    json!({ "jsonrpc": "2.0", "id": request["id"], "result": result })
}

fn mined_block() -> Value {
    json!({
        "hash": block_hash(),
        "parentHash": format!("0x{}", "22".repeat(32)),
        "sha3Uncles": format!("0x{}", "33".repeat(32)),
        "miner": WALLET,
        "stateRoot": format!("0x{}", "44".repeat(32)),
        "transactionsRoot": format!("0x{}", "55".repeat(32)),
        "receiptsRoot": format!("0x{}", "66".repeat(32)),
        "logsBloom": bloom(),
        "difficulty": "0x2",
        "number": BLOCK_NUMBER,
        "gasLimit": "0x8f0d180",
        "gasUsed": "0x5208",
        "timestamp": "0x5f5e1000",
        "extraData": "0x",
        "mixHash": format!("0x{}", "00".repeat(32)),
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x3b9aca00",
        "uncles": [],
        "transactions": [tx_hash()]
    })
}

fn mined_transaction() -> Value {
    json!({
        "type": "0x0",
        "hash": tx_hash(),
        "nonce": "0x7",
        "blockHash": block_hash(),
        "blockNumber": BLOCK_NUMBER,
        "transactionIndex": "0x0",
        "from": TEST_KEY_ADDRESS,
        "to": BUSD,
        "value": "0xde0b6b3a7640000",
        "gasPrice": "0x3b9aca00",
        "gas": "0x5208",
        "input": "0x",
        "chainId": "0x38",
        "v": "0x93",
        "r": format!("0x{}", "01".repeat(32)),
        "s": format!("0x{}", "02".repeat(32))
    })
}

fn mined_receipt(status: &str) -> Value {
    json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": bloom(),
        "transactionHash": tx_hash(),
        "transactionIndex": "0x0",
        "blockHash": block_hash(),
        "blockNumber": BLOCK_NUMBER,
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": TEST_KEY_ADDRESS,
        "to": null,
        "contractAddress": DEPLOYED_TOKEN
    })
}

/// Node with one mined block, transaction and receipt. Also answers the
/// calls a signing provider makes while filling and sending a transaction.
fn answer_mined(request: &Value, receipt_status: &str) -> Value {
    let result = match request["method"].as_str().unwrap_or_default() {
        "eth_getBlockByNumber" | "eth_getBlockByHash" => mined_block(),
        "eth_getTransactionByHash" => mined_transaction(),
        "eth_getTransactionReceipt" => mined_receipt(receipt_status),
        "eth_chainId" => json!("0x38"),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x1e8480"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_feeHistory" => json!({
            "oldestBlock": "0xf423f",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]]
        }),
        "eth_sendRawTransaction" => json!(tx_hash()),
        "eth_newBlockFilter" => json!("0x1"),
        "eth_getFilterChanges" => json!([]),
        _ => return answer(request),
    };

    json!({ "jsonrpc": "2.0", "id": request["id"], "result": result })
}

async fn mock_mined_node(server: &mut ServerGuard, receipt_status: &'static str) -> Mock {
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |request| {
            let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
            serde_json::to_vec(&answer_mined(&body, receipt_status)).unwrap()
        })
        .create_async()
        .await
}

fn deployer_tools(server: &ServerGuard) -> ToolSet {
    let mut config = Config::from_url(server.url()).with_private_key(TEST_KEY);
    config.token_bytecode = Some("0x6080604052348015600f57600080fd5b50".to_string());
    ToolSet::new(BscClient::new(&config).unwrap())
}

fn create_args() -> Value {
    json!({
        "name": "Four Pepe",
        "symbol": "4PEPE",
        "initialSupply": 420690000000u64,
        "ownerAddress": WALLET
    })
}

async fn mock_node(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(|request| {
            let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
            serde_json::to_vec(&answer(&body)).unwrap()
        })
        .create_async()
        .await
}

fn tools_for(server: &ServerGuard) -> ToolSet {
    let config = Config::from_url(server.url());
    ToolSet::new(BscClient::new(&config).unwrap())
}

fn text(result: &ToolResult) -> &str {
    result.first_text().unwrap()
}

#[tokio::test]
async fn block_number_is_formatted() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_node(&mut server).await;

    let result = tools_for(&server)
        .call("get-block-number", json!({}))
        .await
        .unwrap();

    assert!(!result.is_error());
    assert_eq!(text(&result), "Current BSC block number: 16");
}

#[tokio::test]
async fn native_balance_is_formatted_in_bnb() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_node(&mut server).await;

    let result = tools_for(&server)
        .call("get-balance", json!({ "address": WALLET }))
        .await
        .unwrap();

    assert!(!result.is_error());
    assert_eq!(text(&result), "Balance: 1.0 BNB");
}

#[tokio::test]
async fn token_balance_uses_decimals_and_symbol() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_node(&mut server).await;

    let result = tools_for(&server)
        .call(
            "get-token-balance",
            json!({ "tokenAddress": BUSD, "walletAddress": WALLET }),
        )
        .await
        .unwrap();

    assert!(!result.is_error(), "{:?}", result);
    assert_eq!(text(&result), "Token Balance: 1.2345 BUSD");
}

#[tokio::test]
async fn missing_transaction_renders_null() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_node(&mut server).await;
    let tools = tools_for(&server);
    let hash = format!("0x{}", "ab".repeat(32));

    let tx = tools
        .call("get-transaction", json!({ "txHash": hash }))
        .await
        .unwrap();
    assert!(!tx.is_error());
    assert_eq!(text(&tx), "null");

    let receipt = tools
        .call("get-transaction-receipt", json!({ "txHash": hash }))
        .await
        .unwrap();
    assert!(!receipt.is_error());
    assert_eq!(text(&receipt), "null");
}

#[tokio::test]
async fn block_hash_queries_by_hash() {
    let mut server = mockito::Server::new_async().await;
    let by_hash = server
        .mock("POST", "/")
        .match_body(Matcher::Regex("eth_getBlockByHash".to_string()))
        .with_header("content-type", "application/json")
        .with_body_from_request(|request| {
            let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
            serde_json::to_vec(&answer(&body)).unwrap()
        })
        .expect(1)
        .create_async()
        .await;

    let hash = format!("0x{}", "11".repeat(32));
    let result = tools_for(&server)
        .call("get-block", json!({ "blockHashOrNumber": hash }))
        .await
        .unwrap();

    assert_eq!(text(&result), "null");
    by_hash.assert_async().await;
}

#[tokio::test]
async fn rpc_error_becomes_error_payload() {
    let mut server = mockito::Server::new_async().await;
    let _node = server
        .mock("POST", "/")
        .with_header("content-type", "application/json")
        .with_body_from_request(|request| {
            let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
            serde_json::to_vec(&json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": { "code": -32000, "message": "header not found" }
            }))
            .unwrap()
        })
        .create_async()
        .await;

    let result = tools_for(&server)
        .call("get-block", json!({ "blockHashOrNumber": 123 }))
        .await
        .unwrap();

    assert!(result.is_error());
    assert!(text(&result).starts_with("Error getting block:"));
    assert!(text(&result).contains("header not found"));
}

#[tokio::test]
async fn http_failure_becomes_error_payload() {
    let mut server = mockito::Server::new_async().await;
    let _node = server
        .mock("POST", "/")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let result = tools_for(&server)
        .call("get-balance", json!({ "address": WALLET }))
        .await
        .unwrap();

    assert!(result.is_error());
    assert!(text(&result).starts_with("Error getting balance:"));
}

#[tokio::test]
async fn builtin_bytecode_failure_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let node = server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let config = Config::from_url(server.url()).with_private_key(TEST_KEY);
    let tools = ToolSet::new(BscClient::new(&config).unwrap());

    let result = tools
        .call("create-four-meme-token", create_args())
        .await
        .unwrap();

    assert!(result.is_error());
    assert!(text(&result)
        .starts_with("Error creating Four.meme token: Failed to deploy Four.meme token:"));
    node.assert_async().await;
}

#[tokio::test]
async fn mined_block_is_rendered_as_json() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_mined_node(&mut server, "0x1").await;

    let result = tools_for(&server)
        .call("get-block", json!({ "blockHashOrNumber": 1_000_000 }))
        .await
        .unwrap();

    assert!(!result.is_error(), "{:?}", result);
    let block: Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(block["number"], BLOCK_NUMBER);
    assert_eq!(block["hash"], block_hash());
    assert_eq!(block["transactions"][0], tx_hash());
}

#[tokio::test]
async fn mined_transaction_and_receipt_are_rendered_as_json() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_mined_node(&mut server, "0x1").await;
    let tools = tools_for(&server);

    let tx = tools
        .call("get-transaction", json!({ "txHash": tx_hash() }))
        .await
        .unwrap();
    assert!(!tx.is_error(), "{:?}", tx);
    let tx: Value = serde_json::from_str(text(&tx)).unwrap();
    assert_eq!(tx["hash"], tx_hash());
    assert_eq!(tx["blockNumber"], BLOCK_NUMBER);
    assert_eq!(
        tx["from"].as_str().unwrap().to_lowercase(),
        TEST_KEY_ADDRESS
    );

    let receipt = tools
        .call("get-transaction-receipt", json!({ "txHash": tx_hash() }))
        .await
        .unwrap();
    assert!(!receipt.is_error(), "{:?}", receipt);
    let receipt: Value = serde_json::from_str(text(&receipt)).unwrap();
    assert_eq!(receipt["status"], "0x1");
    assert_eq!(receipt["transactionHash"], tx_hash());
    assert_eq!(
        receipt["contractAddress"].as_str().unwrap().to_lowercase(),
        DEPLOYED_TOKEN
    );
}

#[tokio::test]
async fn create_four_meme_token_reports_deployment() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_mined_node(&mut server, "0x1").await;

    let result = deployer_tools(&server)
        .call("create-four-meme-token", create_args())
        .await
        .unwrap();

    assert!(!result.is_error(), "{:?}", result);

    let token = Address::from_str(DEPLOYED_TOKEN).unwrap();
    let hash = B256::from_str(&tx_hash()).unwrap();
    assert_eq!(
        text(&result),
        format!(
            "Successfully created Four.meme token!\n\n\
             Token Name: Four Pepe\n\
             Token Symbol: 4PEPE\n\
             Token Address: {}\n\
             Transaction Hash: {}\n\n\
             You can view the token on BscScan: https://bscscan.com/token/{}",
            token, hash, token
        )
    );
}

#[tokio::test]
async fn reverted_deployment_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_mined_node(&mut server, "0x0").await;

    let result = deployer_tools(&server)
        .call("create-four-meme-token", create_args())
        .await
        .unwrap();

    assert!(result.is_error());
    assert!(text(&result)
        .starts_with("Error creating Four.meme token: Failed to deploy Four.meme token:"));
    assert!(text(&result).contains("reverted"));
}

#[tokio::test]
async fn stdio_transport_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let _node = mock_node(&mut server).await;
    let mcp = McpServer::new(Arc::new(tools_for(&server)));

    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "get-block-number"}}),
    ]
    .iter()
    .map(|v| format!("{}\n", v))
    .collect::<String>();

    let mut output = Vec::new();
    mcp.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "BSC Explorer");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        "Current BSC block number: 16"
    );
}
