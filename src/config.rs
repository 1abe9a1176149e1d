//! Chain configuration
//!
//! Endpoint URLs and denomination constants for the target network.
//! Defaults target Cosmos Hub; every value can be overridden for tests
//! or alternative deployments.

use serde::{Deserialize, Serialize};

pub const COSMOS_HUB_CHAIN_ID: &str = "cosmoshub-4";
pub const COSMOS_HUB_ADDRESS_PREFIX: &str = "cosmos";
pub const COSMOS_HUB_DENOM: &str = "uatom";
pub const COSMOS_HUB_DISPLAY_DENOM: &str = "ATOM";
pub const COSMOS_HUB_DECIMALS: u32 = 6;
pub const COSMOS_HUB_LCD_URL: &str = "https://lcd-cosmoshub.keplr.app";
pub const COSMOS_HUB_RPC_URL: &str = "https://rpc-cosmoshub.keplr.app";
pub const COSMOS_HUB_EXPLORER_URL: &str = "https://www.mintscan.io/cosmos";

/// Configuration for a single target chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain identifier passed to the wallet extension
    pub chain_id: String,
    /// Bech32 human-readable address prefix
    pub address_prefix: String,
    /// Smallest-unit denomination symbol
    pub denom: String,
    /// Display denomination symbol
    pub display_denom: String,
    /// Decimal exponent between smallest unit and display unit
    pub decimals: u32,
    /// Base URL of the bank LCD endpoint
    pub lcd_url: String,
    /// Base URL of the RPC endpoint used by the signing client
    pub rpc_url: String,
    /// Base URL of the block explorer
    pub explorer_url: String,
}

impl ChainConfig {
    /// Configuration for Cosmos Hub mainnet
    pub fn cosmos_hub() -> Self {
        Self {
            chain_id: COSMOS_HUB_CHAIN_ID.to_string(),
            address_prefix: COSMOS_HUB_ADDRESS_PREFIX.to_string(),
            denom: COSMOS_HUB_DENOM.to_string(),
            display_denom: COSMOS_HUB_DISPLAY_DENOM.to_string(),
            decimals: COSMOS_HUB_DECIMALS,
            lcd_url: COSMOS_HUB_LCD_URL.to_string(),
            rpc_url: COSMOS_HUB_RPC_URL.to_string(),
            explorer_url: COSMOS_HUB_EXPLORER_URL.to_string(),
        }
    }

    /// Override the LCD endpoint
    pub fn with_lcd_url(mut self, lcd_url: &str) -> Self {
        self.lcd_url = lcd_url.to_string();
        self
    }

    /// Override the RPC endpoint
    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.rpc_url = rpc_url.to_string();
        self
    }

    /// Override the explorer base URL
    pub fn with_explorer_url(mut self, explorer_url: &str) -> Self {
        self.explorer_url = explorer_url.to_string();
        self
    }

    /// Explorer page for a transaction hash
    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::cosmos_hub()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_tx_url() {
        let config = ChainConfig::cosmos_hub();
        assert_eq!(
            config.explorer_tx_url("ABCD1234"),
            "https://www.mintscan.io/cosmos/tx/ABCD1234"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = ChainConfig::cosmos_hub()
            .with_lcd_url("http://localhost:1317")
            .with_rpc_url("http://localhost:26657");
        assert_eq!(config.lcd_url, "http://localhost:1317");
        assert_eq!(config.rpc_url, "http://localhost:26657");
        assert_eq!(config.chain_id, COSMOS_HUB_CHAIN_ID);
    }
}
