//! Transfer Submitter
//!
//! Validates a transfer request, converts the amount to base units, and
//! delegates signing plus broadcast to the external signing client. Fee
//! and gas are fixed flat values, not estimated.

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::address::is_valid_address;
use crate::config::ChainConfig;
use crate::denom;
use crate::error::{ValidationError, WorkflowError};
use crate::lcd::Balance;
use crate::wallet::{Coin, Fee, SigningClientConnector, WalletExtension};

/// Flat fee in the smallest unit charged on every transfer
pub const FLAT_FEE_AMOUNT: &str = "5000";
/// Fixed gas limit for a bank send
pub const GAS_LIMIT: &str = "200000";
/// Memo attached to every transfer
pub const TRANSFER_MEMO: &str = "Sent via Cosmos Wallet";

/// A validated-on-submit transfer request
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    /// Display-denomination decimal amount as entered by the user
    pub amount: String,
}

/// Outcome of an accepted transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    pub success: bool,
    pub tx_hash: String,
    pub explorer_url: String,
    /// Broadcast acceptance time (unix ms)
    pub timestamp: i64,
}

/// Builds and submits transfers through the wallet and signing-client
/// capabilities
pub struct TransferSubmitter {
    wallet: Option<Arc<dyn WalletExtension>>,
    signing: Arc<dyn SigningClientConnector>,
    config: ChainConfig,
}

impl TransferSubmitter {
    pub fn new(
        wallet: Option<Arc<dyn WalletExtension>>,
        signing: Arc<dyn SigningClientConnector>,
        config: ChainConfig,
    ) -> Self {
        Self {
            wallet,
            signing,
            config,
        }
    }

    /// Re-validate the request against the most recently fetched balance
    ///
    /// The workflow validates before calling, but a violation here is a
    /// caller bug and must fail before any signer or network activity.
    fn validate(&self, req: &TransferRequest, available: &Balance) -> Result<(), WorkflowError> {
        if !is_valid_address(&req.recipient, &self.config.address_prefix) {
            return Err(ValidationError::InvalidRecipient(req.recipient.clone()).into());
        }

        let amount = Decimal::from_str(&req.amount).map_err(|_| {
            ValidationError::InvalidAmount(format!("{:?} is not a number", req.amount))
        })?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount("amount must be positive".to_string()).into());
        }

        let balance = Decimal::from_str(&available.display_amount).map_err(|_| {
            WorkflowError::Parse(format!(
                "unreadable balance {:?}",
                available.display_amount
            ))
        })?;
        if amount > balance {
            return Err(ValidationError::InsufficientFunds {
                requested: req.amount.clone(),
                available: available.display_amount.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Submit a transfer: validate, sign, broadcast
    ///
    /// Either a complete [`TransferResult`] is produced or nothing changes.
    pub async fn submit(
        &self,
        req: &TransferRequest,
        available: &Balance,
    ) -> Result<TransferResult, WorkflowError> {
        self.validate(req, available)?;

        let base_amount = denom::to_base_units(&req.amount, self.config.decimals)?;
        debug!(amount = %req.amount, base_amount = %base_amount, "converted to base units");

        let wallet = self
            .wallet
            .as_ref()
            .ok_or(WorkflowError::WalletUnavailable)?;
        let signer = wallet.get_offline_signer(&self.config.chain_id)?;
        let client = self
            .signing
            .connect_with_signer(&self.config.rpc_url, &signer)
            .await?;

        let coins = [Coin {
            denom: self.config.denom.clone(),
            amount: base_amount,
        }];
        let fee = Fee {
            amount: vec![Coin {
                denom: self.config.denom.clone(),
                amount: FLAT_FEE_AMOUNT.to_string(),
            }],
            gas: GAS_LIMIT.to_string(),
        };

        let response = client
            .send_tokens(&req.sender, &req.recipient, &coins, &fee, TRANSFER_MEMO)
            .await?;

        info!(tx_hash = %response.transaction_hash, "transfer broadcast accepted");
        Ok(TransferResult {
            success: true,
            explorer_url: self.config.explorer_tx_url(&response.transaction_hash),
            tx_hash: response.transaction_hash,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{BroadcastResponse, SignerHandle, SigningClient, WalletKey};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubWallet {
        address: String,
    }

    #[async_trait]
    impl WalletExtension for StubWallet {
        async fn enable(&self, _chain_id: &str) -> Result<(), WorkflowError> {
            Ok(())
        }

        async fn get_key(&self, _chain_id: &str) -> Result<WalletKey, WorkflowError> {
            Ok(WalletKey {
                bech32_address: self.address.clone(),
                pub_key: vec![2; 33],
            })
        }

        fn get_offline_signer(&self, chain_id: &str) -> Result<SignerHandle, WorkflowError> {
            Ok(SignerHandle {
                chain_id: chain_id.to_string(),
                bech32_address: self.address.clone(),
            })
        }
    }

    struct MockSigning {
        send_calls: Arc<AtomicUsize>,
        result: Result<String, WorkflowError>,
    }

    struct MockClient {
        send_calls: Arc<AtomicUsize>,
        result: Result<String, WorkflowError>,
    }

    #[async_trait]
    impl SigningClientConnector for MockSigning {
        async fn connect_with_signer(
            &self,
            _rpc_url: &str,
            _signer: &SignerHandle,
        ) -> Result<Box<dyn SigningClient>, WorkflowError> {
            Ok(Box::new(MockClient {
                send_calls: self.send_calls.clone(),
                result: self.result.clone(),
            }))
        }
    }

    #[async_trait]
    impl SigningClient for MockClient {
        async fn send_tokens(
            &self,
            _sender: &str,
            _recipient: &str,
            _amount: &[Coin],
            _fee: &Fee,
            _memo: &str,
        ) -> Result<BroadcastResponse, WorkflowError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map(|hash| BroadcastResponse {
                transaction_hash: hash,
            })
        }
    }

    fn addr(c: char) -> String {
        format!("cosmos1{}", c.to_string().repeat(38))
    }

    fn balance(raw: &str, display: &str) -> Balance {
        Balance {
            raw_amount: raw.to_string(),
            display_amount: display.to_string(),
        }
    }

    fn submitter(result: Result<String, WorkflowError>) -> (TransferSubmitter, Arc<AtomicUsize>) {
        let send_calls = Arc::new(AtomicUsize::new(0));
        let submitter = TransferSubmitter::new(
            Some(Arc::new(StubWallet { address: addr('a') }) as _),
            Arc::new(MockSigning {
                send_calls: send_calls.clone(),
                result,
            }),
            ChainConfig::cosmos_hub(),
        );
        (submitter, send_calls)
    }

    fn request(recipient: &str, amount: &str) -> TransferRequest {
        TransferRequest {
            sender: addr('a'),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_transfer_builds_explorer_url() {
        let (submitter, send_calls) = submitter(Ok("ABCD1234".to_string()));

        let result = submitter
            .submit(&request(&addr('b'), "1.5"), &balance("2500000", "2.5"))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.tx_hash, "ABCD1234");
        assert_eq!(
            result.explorer_url,
            "https://www.mintscan.io/cosmos/tx/ABCD1234"
        );
        assert_eq!(send_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_over_balance_rejected_before_any_signing() {
        let (submitter, send_calls) = submitter(Ok("UNREACHED".to_string()));

        let err = submitter
            .submit(&request(&addr('b'), "3"), &balance("2500000", "2.5"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::InsufficientFunds { .. })
        ));
        assert_eq!(send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_any_signing() {
        let (submitter, send_calls) = submitter(Ok("UNREACHED".to_string()));

        let err = submitter
            .submit(&request("cosmos1abc", "1"), &balance("2500000", "2.5"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::InvalidRecipient(_))
        ));
        assert_eq!(send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let (submitter, send_calls) = submitter(Ok("UNREACHED".to_string()));

        for bad in ["0", "-1", "abc", ""] {
            let err = submitter
                .submit(&request(&addr('b'), bad), &balance("2500000", "2.5"))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    WorkflowError::Validation(ValidationError::InvalidAmount(_))
                ),
                "amount {:?} should be rejected",
                bad
            );
        }
        assert_eq!(send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_amount_equal_to_balance_is_allowed() {
        let (submitter, send_calls) = submitter(Ok("HASH".to_string()));

        submitter
            .submit(&request(&addr('b'), "2.5"), &balance("2500000", "2.5"))
            .await
            .unwrap();
        assert_eq!(send_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signing_rejection_passes_through() {
        let (submitter, _) = submitter(Err(WorkflowError::SigningRejected));

        let err = submitter
            .submit(&request(&addr('b'), "1"), &balance("2500000", "2.5"))
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::SigningRejected);
    }

    #[tokio::test]
    async fn test_missing_wallet_is_unavailable() {
        let send_calls = Arc::new(AtomicUsize::new(0));
        let submitter = TransferSubmitter::new(
            None,
            Arc::new(MockSigning {
                send_calls: send_calls.clone(),
                result: Ok("UNREACHED".to_string()),
            }),
            ChainConfig::cosmos_hub(),
        );

        let err = submitter
            .submit(&request(&addr('b'), "1"), &balance("2500000", "2.5"))
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::WalletUnavailable);
        assert_eq!(send_calls.load(Ordering::SeqCst), 0);
    }
}
