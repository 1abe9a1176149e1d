//! Wallet and signing-client capability interfaces
//!
//! The wallet extension and the signing/broadcast client are external
//! components. This module models them as explicit capability traits with
//! exactly the methods the workflow consumes, so tests can substitute mock
//! implementations without touching workflow logic. Key handling and
//! transaction signing never happen inside this crate.

pub mod connector;

pub use connector::WalletConnector;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// A token amount in a named denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

/// Transaction fee: a flat coin list plus a gas limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// Account key material exposed by the wallet extension
#[derive(Debug, Clone)]
pub struct WalletKey {
    /// Human-readable account address
    pub bech32_address: String,
    /// Compressed public key bytes
    pub pub_key: Vec<u8>,
}

/// Opaque handle to a wallet-held signer, scoped to one chain
///
/// Carries no key material; the extension keeps the keys and the signing
/// client redeems the handle when it signs.
#[derive(Debug, Clone)]
pub struct SignerHandle {
    pub chain_id: String,
    pub bech32_address: String,
}

/// Outcome of a successful broadcast
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastResponse {
    pub transaction_hash: String,
}

/// Browser wallet extension capability
///
/// `enable` may prompt the user and suspend indefinitely; rejection is a
/// recoverable failure, not a crash.
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Request access to the given chain, prompting the user if needed
    async fn enable(&self, chain_id: &str) -> Result<(), WorkflowError>;

    /// Retrieve the account key for the given chain
    async fn get_key(&self, chain_id: &str) -> Result<WalletKey, WorkflowError>;

    /// Obtain a signer handle scoped to the given chain
    fn get_offline_signer(&self, chain_id: &str) -> Result<SignerHandle, WorkflowError>;
}

/// External signing/broadcast client, constructed per transfer from an
/// RPC endpoint and a signer handle
#[async_trait]
pub trait SigningClientConnector: Send + Sync {
    async fn connect_with_signer(
        &self,
        rpc_url: &str,
        signer: &SignerHandle,
    ) -> Result<Box<dyn SigningClient>, WorkflowError>;
}

/// Connected signing client
#[async_trait]
pub trait SigningClient: Send + Sync {
    /// Sign and broadcast a token transfer
    async fn send_tokens(
        &self,
        sender: &str,
        recipient: &str,
        amount: &[Coin],
        fee: &Fee,
        memo: &str,
    ) -> Result<BroadcastResponse, WorkflowError>;
}
