use alloy::eips::BlockId;
use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Block, Transaction, TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolConstructor;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{BscError, Result};
use crate::rpc::contracts::{FourMemeToken, IBEP20, FOUR_MEME_TOKEN_BYTECODE};
use crate::rpc::types::{Deployment, FourMemeTokenParams, TokenBalance};

/// RPC client for BSC interactions
#[derive(Clone)]
pub struct BscClient {
    inner: Arc<BscClientInner>,
}

struct BscClientInner {
    rpc_url: url::Url,
    signer: Option<PrivateKeySigner>,
    token_bytecode: Option<String>,
}

impl BscClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let rpc_url = config
            .rpc_url
            .parse::<url::Url>()
            .map_err(|e| BscError::Config(format!("Invalid RPC URL format: {}", e)))?;

        let signer = config
            .private_key
            .as_deref()
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| BscError::Config(format!("Invalid BSC_PRIVATE_KEY: {}", e)))
            })
            .transpose()?;

        if let Some(signer) = &signer {
            info!("Signer configured for address {}", signer.address());
        }

        debug!("Using BSC RPC: {}", rpc_url);

        Ok(BscClient {
            inner: Arc::new(BscClientInner {
                rpc_url,
                signer,
                token_bytecode: config.token_bytecode.clone(),
            }),
        })
    }

    /// Helper to get a read-only provider for each operation
    fn provider(&self) -> DynProvider {
        ProviderBuilder::new()
            .connect_http(self.inner.rpc_url.clone())
            .erased()
    }

    /// Helper to get a provider that signs with the configured key
    fn signing_provider(&self) -> Result<DynProvider> {
        let signer = self.inner.signer.clone().ok_or(BscError::MissingSigner)?;

        Ok(ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.inner.rpc_url.clone())
            .erased())
    }

    pub fn has_signer(&self) -> bool {
        self.inner.signer.is_some()
    }

    /// Get the current block height
    pub async fn block_number(&self) -> Result<u64> {
        debug!("Getting block number");

        self.provider().get_block_number().await.map_err(|e| {
            error!("Failed to get block number: {}", e);
            BscError::Rpc(format!("Failed to get block number: {}", e))
        })
    }

    /// Get a block by hash, number or tag
    pub async fn block(&self, block: BlockId) -> Result<Option<Block>> {
        debug!("Getting block: {:?}", block);

        self.provider().get_block(block).await.map_err(|e| {
            error!("Failed to get block {:?}: {}", block, e);
            BscError::Rpc(format!("Failed to get block: {}", e))
        })
    }

    pub async fn transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        debug!("Getting transaction: {}", hash);

        self.provider()
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| {
                error!("Failed to get transaction {}: {}", hash, e);
                BscError::Rpc(format!("Failed to get transaction: {}", e))
            })
    }

    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        debug!("Getting transaction receipt: {}", hash);

        self.provider()
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| {
                error!("Failed to get transaction receipt {}: {}", hash, e);
                BscError::Rpc(format!("Failed to get transaction receipt: {}", e))
            })
    }

    /// Get native BNB balance (in wei) for an address
    pub async fn native_balance(&self, address: Address) -> Result<U256> {
        debug!("Getting BNB balance for: {:?}", address);

        self.provider().get_balance(address).await.map_err(|e| {
            error!("Failed to get BNB balance: {}", e);
            BscError::Rpc(format!("Failed to get balance: {}", e))
        })
    }

    /// Get BEP-20 balance, decimals and symbol for a wallet
    pub async fn token_balance(&self, token: Address, wallet: Address) -> Result<TokenBalance> {
        debug!(
            "Getting token balance for: {:?} on token: {:?}",
            wallet, token
        );

        let contract = IBEP20::new(token, self.provider());

        let raw = contract.balanceOf(wallet).call().await.map_err(|e| {
            error!("Failed to get token balance: {} (token: {:?})", e, token);
            BscError::Rpc(format!("Failed to get token balance: {}", e))
        })?;

        let decimals = contract.decimals().call().await.map_err(|e| {
            error!("Failed to get token decimals: {} (token: {:?})", e, token);
            BscError::Rpc(format!("Failed to get token decimals: {}", e))
        })?;

        let symbol = contract.symbol().call().await.map_err(|e| {
            error!("Failed to get token symbol: {} (token: {:?})", e, token);
            BscError::Rpc(format!("Failed to get token symbol: {}", e))
        })?;

        Ok(TokenBalance {
            raw,
            decimals,
            symbol,
        })
    }

    /// Bytecode sent in the creation transaction, before constructor arguments
    fn creation_bytecode(&self) -> Result<Vec<u8>> {
        let code = self
            .inner
            .token_bytecode
            .as_deref()
            .unwrap_or(FOUR_MEME_TOKEN_BYTECODE);

        alloy::hex::decode(code.trim())
            .map_err(|e| BscError::Deployment(format!("invalid contract bytecode: {}", e)))
    }

    /// Deploy a Four.meme token and wait for the deployment receipt
    pub async fn deploy_four_meme_token(&self, params: &FourMemeTokenParams) -> Result<Deployment> {
        info!(
            "Deploying Four.meme token {} ({}) for owner {}",
            params.name, params.symbol, params.owner
        );

        let provider = self.signing_provider()?;

        let constructor = FourMemeToken::constructorCall {
            _name: params.name.clone(),
            _symbol: params.symbol.clone(),
            _decimals: params.decimals,
            _initialSupply: params.total_supply,
            _owner: params.owner,
        };

        let mut code = self.creation_bytecode()?;
        code.extend_from_slice(&constructor.abi_encode());

        let tx = TransactionRequest::default().with_deploy_code(code);

        let pending = provider.send_transaction(tx).await.map_err(|e| {
            error!("Failed to send deployment transaction: {}", e);
            BscError::Deployment(e.to_string())
        })?;

        debug!("Deployment transaction sent: {}", pending.tx_hash());

        let receipt = pending.get_receipt().await.map_err(|e| {
            error!("Failed to get deployment receipt: {}", e);
            BscError::Deployment(format!("Failed to get deployment receipt: {}", e))
        })?;

        if !receipt.status() {
            return Err(BscError::Deployment(format!(
                "transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        let token_address = receipt.contract_address.ok_or_else(|| {
            BscError::Deployment("receipt does not contain a contract address".to_string())
        })?;

        info!(
            "Deployed Four.meme token at {} (tx: {})",
            token_address, receipt.transaction_hash
        );

        Ok(Deployment {
            token_address,
            tx_hash: receipt.transaction_hash,
        })
    }

    /// Get RPC URL
    pub fn rpc_url(&self) -> &str {
        self.inner.rpc_url.as_str()
    }
}
