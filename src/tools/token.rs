use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{BscError, Result};
use crate::precision;
use crate::rpc::{parse_address, BscClient, FourMemeTokenParams};
use crate::tools::parse_args;

pub const MAX_DECIMALS: u8 = 18;

fn default_decimals() -> u8 {
    MAX_DECIMALS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    /// Initial supply in whole tokens
    pub initial_supply: Decimal,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub owner_address: String,
}

impl CreateTokenRequest {
    /// 校验参数并转换为部署参数
    fn into_params(self) -> Result<FourMemeTokenParams> {
        if self.name.trim().is_empty() {
            return Err(BscError::InvalidArguments(
                "Token name is required".to_string(),
            ));
        }

        if self.symbol.trim().is_empty() {
            return Err(BscError::InvalidArguments(
                "Token symbol is required".to_string(),
            ));
        }

        if self.initial_supply <= Decimal::ZERO {
            return Err(BscError::InvalidAmount(
                "Initial supply must be positive".to_string(),
            ));
        }

        if self.decimals > MAX_DECIMALS {
            return Err(BscError::InvalidArguments(format!(
                "decimals must be between 0 and {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }

        let owner = parse_address(&self.owner_address)
            .map_err(|_| BscError::InvalidAddress("Invalid BSC address format".to_string()))?;

        let total_supply = precision::parse_units(self.initial_supply, self.decimals)?;

        Ok(FourMemeTokenParams {
            name: self.name,
            symbol: self.symbol,
            decimals: self.decimals,
            total_supply,
            owner,
        })
    }
}

pub struct TokenTool {
    rpc: BscClient,
}

impl TokenTool {
    pub fn new(rpc: BscClient) -> Self {
        TokenTool { rpc }
    }

    pub async fn create_four_meme_token(&self, arguments: Value) -> Result<String> {
        let request: CreateTokenRequest = parse_args(arguments)?;
        let params = request.into_params()?;

        if !self.rpc.has_signer() {
            return Err(BscError::MissingSigner);
        }

        info!(
            "Creating Four.meme token {} ({}), supply {}",
            params.name, params.symbol, params.total_supply
        );

        let deployment = self.rpc.deploy_four_meme_token(&params).await?;

        Ok(format!(
            "Successfully created Four.meme token!\n\n\
             Token Name: {}\n\
             Token Symbol: {}\n\
             Token Address: {}\n\
             Transaction Hash: {}\n\n\
             You can view the token on BscScan: https://bscscan.com/token/{}",
            params.name,
            params.symbol,
            deployment.token_address,
            deployment.tx_hash,
            deployment.token_address
        ))
    }
}
