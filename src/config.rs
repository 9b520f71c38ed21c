use crate::error::{BscError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_RPC_URL: &str = "https://bsc-dataseed.binance.org/";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
    pub port: u16,
    /// Hex override for the Four.meme token creation bytecode.
    #[serde(default)]
    pub token_bytecode: Option<String>,
}

impl Config {
    /// Load settings shared by both transports. `PORT` is left at its
    /// default, see [`Config::with_port_from_env`].
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let rpc_url = env::var("BSC_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        validate_rpc_url(&rpc_url)?;

        let private_key = non_empty(env::var("BSC_PRIVATE_KEY").ok());
        let token_bytecode = non_empty(env::var("FOUR_MEME_BYTECODE").ok());

        Ok(Config {
            rpc_url,
            private_key,
            port: DEFAULT_PORT,
            token_bytecode,
        })
    }

    /// Read `PORT` for the HTTP transport
    pub fn with_port_from_env(mut self) -> Result<Self> {
        self.port = parse_port(env::var("PORT").ok())?;
        Ok(self)
    }

    pub fn from_url(rpc_url: String) -> Self {
        Config {
            rpc_url,
            private_key: None,
            port: DEFAULT_PORT,
            token_bytecode: None,
        }
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = non_empty(Some(private_key.into()));
        self
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    match non_empty(raw) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| BscError::Config(format!("Invalid PORT '{}': {}", raw, e))),
        None => Ok(DEFAULT_PORT),
    }
}

fn validate_rpc_url(rpc_url: &str) -> Result<()> {
    rpc_url
        .parse::<url::Url>()
        .map(|_| ())
        .map_err(|e| BscError::Config(format!("Invalid BSC_RPC_URL '{}': {}", rpc_url, e)))
}
