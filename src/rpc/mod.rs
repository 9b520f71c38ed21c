pub mod client;
pub mod contracts;
pub mod types;

pub use client::BscClient;
pub use types::{
    parse_address, parse_block_id, parse_tx_hash, Deployment, FourMemeTokenParams, TokenBalance,
};
