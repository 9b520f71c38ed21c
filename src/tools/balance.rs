use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::precision;
use crate::rpc::{parse_address, BscClient};
use crate::tools::parse_args;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceRequest {
    pub token_address: String,
    pub wallet_address: String,
}

pub struct BalanceTool {
    rpc: BscClient,
}

impl BalanceTool {
    pub fn new(rpc: BscClient) -> Self {
        BalanceTool { rpc }
    }

    /// 获取 BNB 余额
    pub async fn get_balance(&self, arguments: Value) -> Result<String> {
        let request: BalanceRequest = parse_args(arguments)?;
        let address = parse_address(&request.address)?;
        info!("正在获取 BNB 余额: {:?}", address);

        let raw_balance = self.rpc.native_balance(address).await?;

        Ok(format!("Balance: {} BNB", precision::format_ether(raw_balance)))
    }

    /// 获取 BEP-20 代币余额
    pub async fn get_token_balance(&self, arguments: Value) -> Result<String> {
        let request: TokenBalanceRequest = parse_args(arguments)?;
        let token_address = parse_address(&request.token_address)?;
        let wallet_address = parse_address(&request.wallet_address)?;
        info!(
            "正在获取 BEP-20 余额: {:?} 在代币: {:?}",
            wallet_address, token_address
        );

        let balance = self.rpc.token_balance(token_address, wallet_address).await?;

        Ok(format!(
            "Token Balance: {} {}",
            precision::format_units(balance.raw, balance.decimals),
            balance.symbol
        ))
    }
}
