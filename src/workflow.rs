//! Workflow State
//!
//! Orchestrates connect, balance fetch, and transfer submission into one
//! linear flow and exposes the current state to the presentation layer.
//!
//! States: `Disconnected -> Connecting -> Connected -> Submitting ->
//! Connected`. A connect while already connecting is ignored so the user
//! never sees duplicate permission prompts, and `Submitting` acts as a
//! mutual-exclusion gate against a second in-flight transfer.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::config::ChainConfig;
use crate::error::WorkflowError;
use crate::lcd::{Balance, BalanceFetcher};
use crate::transfer::{TransferRequest, TransferResult, TransferSubmitter};
use crate::wallet::{WalletConnector, WalletExtension, SigningClientConnector};

/// Current position in the transfer workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Disconnected,
    Connecting,
    Connected(Balance),
    Submitting(Balance),
}

/// Injectable notification sink for user-facing messages
///
/// The presentation layer decides how a message is rendered; the workflow
/// only decides when one is raised.
pub trait Notifier: Send + Sync {
    fn success(&self, title: &str, body: &str);
    fn error(&self, title: &str, body: &str);
}

/// Notifier that routes messages to the tracing subscriber
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, title: &str, body: &str) {
        info!(title = %title, "{}", body);
    }

    fn error(&self, title: &str, body: &str) {
        error!(title = %title, "{}", body);
    }
}

/// Single-session transfer workflow
///
/// One instance per session; all state lives here and nothing is
/// persisted. Methods take `&self` so a presentation layer can share the
/// workflow behind an `Arc`.
pub struct Workflow {
    connector: WalletConnector,
    submitter: TransferSubmitter,
    fetcher: Arc<dyn BalanceFetcher>,
    notifier: Arc<dyn Notifier>,
    display_denom: String,
    state: RwLock<WorkflowState>,
    address: RwLock<Option<String>>,
    last_result: Mutex<Option<TransferResult>>,
}

impl Workflow {
    pub fn new(
        extension: Option<Arc<dyn WalletExtension>>,
        signing: Arc<dyn SigningClientConnector>,
        fetcher: Arc<dyn BalanceFetcher>,
        notifier: Arc<dyn Notifier>,
        config: ChainConfig,
    ) -> Self {
        let connector = WalletConnector::new(extension.clone(), &config.chain_id);
        let display_denom = config.display_denom.clone();
        let submitter = TransferSubmitter::new(extension, signing, config);
        Self {
            connector,
            submitter,
            fetcher,
            notifier,
            display_denom,
            state: RwLock::new(WorkflowState::Disconnected),
            address: RwLock::new(None),
            last_result: Mutex::new(None),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    /// Connected wallet address, if any
    pub async fn address(&self) -> Option<String> {
        self.address.read().await.clone()
    }

    /// Most recent transfer result, if not yet dismissed
    pub async fn last_result(&self) -> Option<TransferResult> {
        self.last_result.lock().await.clone()
    }

    /// Dismiss the surfaced transfer result
    pub async fn dismiss_result(&self) {
        self.last_result.lock().await.take();
    }

    /// Connect the wallet and fetch the initial balance
    ///
    /// Ignored unless the workflow is `Disconnected`: a re-entrant call
    /// while a prompt is pending must not trigger a second `enable`.
    pub async fn connect(&self) -> Result<(), WorkflowError> {
        {
            let mut state = self.state.write().await;
            if *state != WorkflowState::Disconnected {
                info!(state = ?*state, "connect ignored");
                return Ok(());
            }
            *state = WorkflowState::Connecting;
        }

        match self.connect_inner().await {
            Ok((address, balance)) => {
                info!(address = %address, balance = %balance.display_amount, "wallet connected");
                *self.address.write().await = Some(address);
                *self.state.write().await = WorkflowState::Connected(balance);
                Ok(())
            }
            Err(err) => {
                *self.state.write().await = WorkflowState::Disconnected;
                // A user closing the prompt is not a system fault
                if err != WorkflowError::UserRejected {
                    self.notifier.error("Connection failed", &err.to_string());
                }
                Err(err)
            }
        }
    }

    async fn connect_inner(&self) -> Result<(String, Balance), WorkflowError> {
        let address = self.connector.connect().await?;
        let balance = self.fetcher.fetch_balance(&address).await?;
        Ok((address, balance))
    }

    /// Validate and submit a transfer, then refetch the balance once
    ///
    /// Only one transfer may be in flight; a second call while
    /// `Submitting` is rejected without touching the wallet.
    pub async fn submit_transfer(
        &self,
        recipient: &str,
        amount: &str,
    ) -> Result<TransferResult, WorkflowError> {
        let balance = {
            let mut state = self.state.write().await;
            match state.clone() {
                WorkflowState::Connected(balance) => {
                    *state = WorkflowState::Submitting(balance.clone());
                    balance
                }
                WorkflowState::Submitting(_) => return Err(WorkflowError::TransferInFlight),
                _ => return Err(WorkflowError::NotConnected),
            }
        };
        let sender = match self.address.read().await.clone() {
            Some(address) => address,
            None => {
                *self.state.write().await = WorkflowState::Disconnected;
                return Err(WorkflowError::NotConnected);
            }
        };

        let request = TransferRequest {
            sender: sender.clone(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        };

        match self.submitter.submit(&request, &balance).await {
            Ok(result) => {
                // Refresh only after the success outcome is observed
                let refreshed = match self.fetcher.fetch_balance(&sender).await {
                    Ok(balance) => balance,
                    Err(err) => {
                        warn!(error = %err, "balance refresh after transfer failed");
                        balance
                    }
                };
                *self.state.write().await = WorkflowState::Connected(refreshed);
                self.notifier.success(
                    "Transfer complete",
                    &format!(
                        "Sent {} {} to {}. View at {}",
                        amount, self.display_denom, recipient, result.explorer_url
                    ),
                );
                *self.last_result.lock().await = Some(result.clone());
                Ok(result)
            }
            Err(err) => {
                // Balance unchanged, back to the pre-operation state
                *self.state.write().await = WorkflowState::Connected(balance);
                match &err {
                    // Field-level, resolved by the form
                    WorkflowError::Validation(_) => {}
                    // User declined, silently return
                    WorkflowError::SigningRejected | WorkflowError::UserRejected => {}
                    other => self.notifier.error("Transfer failed", &other.to_string()),
                }
                Err(err)
            }
        }
    }

    /// Manually refresh the balance; last write wins against a concurrent
    /// post-transfer refresh since both read the same source of truth
    pub async fn refresh_balance(&self) -> Result<Balance, WorkflowError> {
        let address = self
            .address
            .read()
            .await
            .clone()
            .ok_or(WorkflowError::NotConnected)?;
        let balance = self.fetcher.fetch_balance(&address).await?;

        let mut state = self.state.write().await;
        if matches!(*state, WorkflowState::Connected(_)) {
            *state = WorkflowState::Connected(balance.clone());
        }
        Ok(balance)
    }
}
