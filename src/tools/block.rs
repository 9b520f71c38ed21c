use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::rpc::{parse_block_id, BscClient};
use crate::tools::parse_args;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    /// Block hash, number or tag
    #[serde(rename = "blockHashOrNumber")]
    pub block_hash_or_number: Value,
}

pub struct BlockTool {
    rpc: BscClient,
}

impl BlockTool {
    pub fn new(rpc: BscClient) -> Self {
        BlockTool { rpc }
    }

    pub async fn get_block_number(&self) -> Result<String> {
        let block_number = self.rpc.block_number().await?;
        Ok(format!("Current BSC block number: {}", block_number))
    }

    /// 获取区块详情，区块不存在时返回 `null`
    pub async fn get_block(&self, arguments: Value) -> Result<String> {
        let request: BlockRequest = parse_args(arguments)?;
        let block_id = parse_block_id(&request.block_hash_or_number)?;
        debug!("Resolved block identifier: {:?}", block_id);

        let block = self.rpc.block(block_id).await?;
        Ok(serde_json::to_string_pretty(&block)?)
    }
}
