//! Wallet Connector
//!
//! Drives the enable/get-key handshake against the wallet extension and
//! hands the workflow a connected address.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::wallet::WalletExtension;

/// Connects to the wallet extension for a fixed chain
///
/// Extension absence is modeled as `None`, matching a host environment
/// where the extension is not installed.
pub struct WalletConnector {
    extension: Option<Arc<dyn WalletExtension>>,
    chain_id: String,
}

impl WalletConnector {
    pub fn new(extension: Option<Arc<dyn WalletExtension>>, chain_id: &str) -> Self {
        Self {
            extension,
            chain_id: chain_id.to_string(),
        }
    }

    /// Whether a wallet extension is present at all
    pub fn is_available(&self) -> bool {
        self.extension.is_some()
    }

    /// Request chain access and return the connected address
    ///
    /// The enable prompt can suspend until the user responds. Rejection
    /// surfaces as `UserRejected`; a missing extension as
    /// `WalletUnavailable`.
    pub async fn connect(&self) -> Result<String, WorkflowError> {
        let extension = self
            .extension
            .as_ref()
            .ok_or(WorkflowError::WalletUnavailable)?;

        extension.enable(&self.chain_id).await?;
        let key = extension.get_key(&self.chain_id).await?;
        debug!(address = %key.bech32_address, chain_id = %self.chain_id, "wallet enabled");
        Ok(key.bech32_address)
    }

    /// Probing variant of [`connect`](Self::connect): returns `None`
    /// instead of an error when the wallet is missing or declines
    pub async fn try_connect(&self) -> Option<String> {
        match self.connect().await {
            Ok(address) => Some(address),
            Err(err) => {
                warn!(error = %err, "wallet connection attempt failed");
                None
            }
        }
    }
}
