//! Wallet-backed ATOM transfer workflow for Cosmos Hub
//!
//! This crate implements the workflow that takes a user from
//! "disconnected" to "balance fetched" to "transfer confirmed or failed":
//! - Wallet connection through an injectable extension capability
//! - Balance queries against the bank LCD endpoint
//! - Validated transfer submission through an external signing client
//! - A linear state machine (`Disconnected -> Connecting -> Connected ->
//!   Submitting -> Connected`) driving it all
//!
//! Signing, broadcasting, and key handling are owned by external
//! components and modeled as capability traits in [`wallet`].

pub mod address;
pub mod config;
pub mod denom;
pub mod error;
pub mod lcd;
pub mod transfer;
pub mod wallet;
pub mod workflow;

pub use config::ChainConfig;
pub use error::{ValidationError, WorkflowError};
pub use lcd::{Balance, BalanceFetcher, LcdClient};
pub use transfer::{TransferRequest, TransferResult, TransferSubmitter};
pub use wallet::WalletConnector;
pub use workflow::{Notifier, TracingNotifier, Workflow, WorkflowState};
