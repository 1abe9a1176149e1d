//! Balance Fetcher
//!
//! Read-only queries against the bank LCD endpoint. The endpoint is
//! untrusted and may hang, so every request carries a bounded timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ChainConfig;
use crate::denom;
use crate::error::WorkflowError;
use crate::wallet::Coin;

/// Request timeout for LCD queries
pub const LCD_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An account balance in the target denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Integer amount in the smallest unit
    pub raw_amount: String,
    /// Human-readable amount in the display denomination
    pub display_amount: String,
}

impl Balance {
    /// The balance of an account with no entry in the target denomination
    pub fn zero() -> Self {
        Self {
            raw_amount: "0".to_string(),
            display_amount: "0".to_string(),
        }
    }
}

/// Capability for reading an account balance
#[async_trait]
pub trait BalanceFetcher: Send + Sync {
    async fn fetch_balance(&self, address: &str) -> Result<Balance, WorkflowError>;
}

#[derive(Debug, Deserialize)]
struct BalancesResponse {
    #[serde(default)]
    balances: Vec<Coin>,
}

/// LCD client for the bank module
#[derive(Clone)]
pub struct LcdClient {
    client: reqwest::Client,
    base_url: String,
    denom: String,
    decimals: u32,
}

impl LcdClient {
    pub fn new(config: &ChainConfig) -> Result<Self, WorkflowError> {
        let client = reqwest::Client::builder()
            .timeout(LCD_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.lcd_url.clone(),
            denom: config.denom.clone(),
            decimals: config.decimals,
        })
    }

    /// Query all balances for an address and extract the target denomination
    pub async fn balance_of(&self, address: &str) -> Result<Balance, WorkflowError> {
        let url = format!(
            "{}/cosmos/bank/v1beta1/balances/{}",
            self.base_url, address
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(WorkflowError::Network(format!(
                "HTTP {}: {}",
                status,
                truncate_body(&text, 200)
            )));
        }

        let parsed: BalancesResponse = serde_json::from_str(&text)?;
        select_balance(parsed.balances, &self.denom, self.decimals)
    }
}

#[async_trait]
impl BalanceFetcher for LcdClient {
    async fn fetch_balance(&self, address: &str) -> Result<Balance, WorkflowError> {
        self.balance_of(address).await
    }
}

/// Truncate an error body for reporting without splitting a multi-byte
/// UTF-8 character
fn truncate_body(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Pick the target denomination out of a balance list
///
/// Absence of the denomination is not an error: accounts that have never
/// held the token simply report zero.
fn select_balance(
    balances: Vec<Coin>,
    target_denom: &str,
    decimals: u32,
) -> Result<Balance, WorkflowError> {
    match balances.into_iter().find(|c| c.denom == target_denom) {
        Some(coin) => Ok(Balance {
            display_amount: denom::format_display(&coin.amount, decimals)?,
            raw_amount: coin.amount,
        }),
        None => Ok(Balance::zero()),
    }
}
