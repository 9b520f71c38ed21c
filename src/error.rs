use thiserror::Error;

#[derive(Error, Debug)]
pub enum BscError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid block hash or number: {0}")]
    InvalidBlockId(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Private key not provided. Cannot create token without a signer.")]
    MissingSigner,

    #[error("Failed to deploy Four.meme token: {0}")]
    Deployment(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("precision error: {0}")]
    Precision(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BscError>;
