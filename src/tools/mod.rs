pub mod balance;
pub mod block;
pub mod token;
pub mod transaction;

pub use balance::BalanceTool;
pub use block::BlockTool;
pub use token::TokenTool;
pub use transaction::TransactionTool;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{BscError, Result};
use crate::rpc::BscClient;

pub const GET_BLOCK_NUMBER: &str = "get-block-number";
pub const GET_BLOCK: &str = "get-block";
pub const GET_TRANSACTION: &str = "get-transaction";
pub const GET_TRANSACTION_RECEIPT: &str = "get-transaction-receipt";
pub const GET_BALANCE: &str = "get-balance";
pub const GET_TOKEN_BALANCE: &str = "get-token-balance";
pub const CREATE_FOUR_MEME_TOKEN: &str = "create-four-meme-token";

pub const MISSING_SIGNER_MESSAGE: &str = "Cannot create token: BSC_PRIVATE_KEY environment variable is not set. Please provide a private key to deploy contracts.";

/// MCP Tool Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Standard tool response format (MCP `CallToolResult`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        ToolResult {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
            is_error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult {
            is_error: Some(true),
            ..Self::text(message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first content item, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

/// Deserialize tool arguments; `null` is treated as an empty object.
pub(crate) fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };

    serde_json::from_value(arguments).map_err(|e| BscError::InvalidArguments(e.to_string()))
}

/// The full BSC tool surface, shared by every transport.
pub struct ToolSet {
    block_tool: BlockTool,
    transaction_tool: TransactionTool,
    balance_tool: BalanceTool,
    token_tool: TokenTool,
}

impl ToolSet {
    pub fn new(rpc: BscClient) -> Self {
        ToolSet {
            block_tool: BlockTool::new(rpc.clone()),
            transaction_tool: TransactionTool::new(rpc.clone()),
            balance_tool: BalanceTool::new(rpc.clone()),
            token_tool: TokenTool::new(rpc),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        Self::definitions().iter().any(|tool| tool.name == name)
    }

    /// Get tool definitions (MCP spec)
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: GET_BLOCK_NUMBER.to_string(),
                description: "Get the current BSC block number".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            ToolDefinition {
                name: GET_BLOCK.to_string(),
                description: "Get block details by block hash, number or tag".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "blockHashOrNumber": {
                            "type": ["string", "number"],
                            "description": "Block hash (0x...), block number, or tag such as 'latest'"
                        }
                    },
                    "required": ["blockHashOrNumber"]
                }),
            },
            ToolDefinition {
                name: GET_TRANSACTION.to_string(),
                description: "Get transaction details by transaction hash".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "txHash": {
                            "type": "string",
                            "description": "Transaction hash (0x...)"
                        }
                    },
                    "required": ["txHash"]
                }),
            },
            ToolDefinition {
                name: GET_TRANSACTION_RECEIPT.to_string(),
                description: "Get the receipt of a mined transaction".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "txHash": {
                            "type": "string",
                            "description": "Transaction hash (0x...)"
                        }
                    },
                    "required": ["txHash"]
                }),
            },
            ToolDefinition {
                name: GET_BALANCE.to_string(),
                description: "Get the native BNB balance of an address".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "address": {
                            "type": "string",
                            "description": "BSC wallet address (0x...)"
                        }
                    },
                    "required": ["address"]
                }),
            },
            ToolDefinition {
                name: GET_TOKEN_BALANCE.to_string(),
                description: "Get the BEP-20 token balance of a wallet".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "tokenAddress": {
                            "type": "string",
                            "description": "BEP-20 token contract address (0x...)"
                        },
                        "walletAddress": {
                            "type": "string",
                            "description": "BSC wallet address (0x...)"
                        }
                    },
                    "required": ["tokenAddress", "walletAddress"]
                }),
            },
            ToolDefinition {
                name: CREATE_FOUR_MEME_TOKEN.to_string(),
                description: "Deploy a new Four.meme BEP-20 token (requires BSC_PRIVATE_KEY)"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "minLength": 1,
                            "description": "Full token name"
                        },
                        "symbol": {
                            "type": "string",
                            "minLength": 1,
                            "description": "Token symbol"
                        },
                        "initialSupply": {
                            "type": "number",
                            "exclusiveMinimum": 0,
                            "description": "Initial supply in whole tokens"
                        },
                        "decimals": {
                            "type": "integer",
                            "minimum": 0,
                            "maximum": 18,
                            "default": 18,
                            "description": "Number of decimal places"
                        },
                        "ownerAddress": {
                            "type": "string",
                            "pattern": "^0x[a-fA-F0-9]{40}$",
                            "description": "Address receiving the initial supply"
                        }
                    },
                    "required": ["name", "symbol", "initialSupply", "ownerAddress"]
                }),
            },
        ]
    }

    /// Invoke a tool by name. Returns `None` when no such tool exists;
    /// every failure inside a known tool becomes an error-flagged result.
    pub async fn call(&self, name: &str, arguments: Value) -> Option<ToolResult> {
        info!("Calling tool: {}", name);

        let result = match name {
            GET_BLOCK_NUMBER => to_result(
                self.block_tool.get_block_number().await,
                "Error getting block number",
            ),
            GET_BLOCK => to_result(
                self.block_tool.get_block(arguments).await,
                "Error getting block",
            ),
            GET_TRANSACTION => to_result(
                self.transaction_tool.get_transaction(arguments).await,
                "Error getting transaction",
            ),
            GET_TRANSACTION_RECEIPT => to_result(
                self.transaction_tool.get_transaction_receipt(arguments).await,
                "Error getting transaction receipt",
            ),
            GET_BALANCE => to_result(
                self.balance_tool.get_balance(arguments).await,
                "Error getting balance",
            ),
            GET_TOKEN_BALANCE => to_result(
                self.balance_tool.get_token_balance(arguments).await,
                "Error getting token balance",
            ),
            CREATE_FOUR_MEME_TOKEN => {
                let outcome = self.token_tool.create_four_meme_token(arguments).await;
                match outcome {
                    Err(BscError::MissingSigner) => ToolResult::error(MISSING_SIGNER_MESSAGE),
                    other => to_result(other, "Error creating Four.meme token"),
                }
            }
            _ => {
                warn!("Tool not found: {}", name);
                return None;
            }
        };

        if result.is_error() {
            warn!("Tool {} failed: {:?}", name, result.first_text());
        }

        Some(result)
    }
}

fn to_result(outcome: Result<String>, context: &str) -> ToolResult {
    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(e) => ToolResult::error(format!("{}: {}", context, e)),
    }
}
