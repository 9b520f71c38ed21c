use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{BscError, Result};

/// BEP-20 balance together with the token metadata needed to display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
    pub symbol: String,
}

/// Constructor arguments for a Four.meme token deployment.
#[derive(Debug, Clone)]
pub struct FourMemeTokenParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Initial supply already scaled to base units.
    pub total_supply: U256,
    pub owner: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub token_address: Address,
    pub tx_hash: B256,
}

fn is_hex_of_len(raw: &str, hex_len: usize) -> bool {
    raw.len() == hex_len + 2
        && raw.starts_with("0x")
        && raw[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// 验证 BSC 地址格式
///
/// Accepts `0x` followed by 40 hex digits. Mixed-case input must carry a
/// valid EIP-55 checksum; all-lowercase or all-uppercase input is accepted
/// as is.
pub fn parse_address(raw: &str) -> Result<Address> {
    let trimmed = raw.trim();
    if !is_hex_of_len(trimmed, 40) {
        return Err(BscError::InvalidAddress(format!(
            "expected 0x followed by 40 hex characters, got '{}'",
            raw
        )));
    }

    let address = Address::from_str(trimmed)
        .map_err(|e| BscError::InvalidAddress(format!("{}: {}", raw, e)))?;

    let body = &trimmed[2..];
    let single_case = body == body.to_ascii_lowercase() || body == body.to_ascii_uppercase();
    if !single_case && address.to_checksum(None) != trimmed {
        return Err(BscError::InvalidAddress(format!(
            "bad address checksum: {}",
            raw
        )));
    }

    Ok(address)
}

pub fn parse_tx_hash(raw: &str) -> Result<B256> {
    let trimmed = raw.trim();
    if !is_hex_of_len(trimmed, 64) {
        return Err(BscError::InvalidHash(format!(
            "expected 0x followed by 64 hex characters, got '{}'",
            raw
        )));
    }

    B256::from_str(trimmed).map_err(|e| BscError::InvalidHash(format!("{}: {}", raw, e)))
}

/// Resolve a block hash, number or tag supplied as JSON.
///
/// Numbers may be given as JSON numbers, decimal strings or `0x` quantities.
/// Tags are `latest`, `earliest`, `pending`, `safe` and `finalized`.
pub fn parse_block_id(value: &Value) -> Result<BlockId> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .map(BlockId::number)
            .ok_or_else(|| BscError::InvalidBlockId(number.to_string())),
        Value::String(raw) => parse_block_id_str(raw),
        other => Err(BscError::InvalidBlockId(other.to_string())),
    }
}

fn parse_block_id_str(raw: &str) -> Result<BlockId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BscError::InvalidBlockId("empty block identifier".to_string()));
    }

    if let Ok(number) = trimmed.parse::<u64>() {
        return Ok(BlockId::number(number));
    }

    if is_hex_of_len(trimmed, 64) {
        return B256::from_str(trimmed)
            .map(BlockId::hash)
            .map_err(|e| BscError::InvalidBlockId(format!("{}: {}", raw, e)));
    }

    BlockNumberOrTag::from_str(&trimmed.to_ascii_lowercase())
        .map(BlockId::Number)
        .map_err(|e| BscError::InvalidBlockId(format!("{}: {}", raw, e)))
}
