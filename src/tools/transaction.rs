use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::rpc::{parse_tx_hash, BscClient};
use crate::tools::parse_args;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxHashRequest {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

pub struct TransactionTool {
    rpc: BscClient,
}

impl TransactionTool {
    pub fn new(rpc: BscClient) -> Self {
        TransactionTool { rpc }
    }

    pub async fn get_transaction(&self, arguments: Value) -> Result<String> {
        let request: TxHashRequest = parse_args(arguments)?;
        let hash = parse_tx_hash(&request.tx_hash)?;

        let tx = self.rpc.transaction(hash).await?;
        Ok(serde_json::to_string_pretty(&tx)?)
    }

    pub async fn get_transaction_receipt(&self, arguments: Value) -> Result<String> {
        let request: TxHashRequest = parse_args(arguments)?;
        let hash = parse_tx_hash(&request.tx_hash)?;

        let receipt = self.rpc.transaction_receipt(hash).await?;
        Ok(serde_json::to_string_pretty(&receipt)?)
    }
}
