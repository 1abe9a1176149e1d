//! Error types for the transfer workflow
//!
//! One taxonomy shared by every component. No error here is fatal: each
//! failure returns the workflow to an interactive state, and no operation
//! retries on its own.

/// Errors that can occur while connecting, fetching a balance, or
/// submitting a transfer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    /// Wallet extension is not installed in the host environment
    #[error("Wallet not found")]
    WalletUnavailable,

    /// User declined the connection prompt or closed it
    #[error("Connection request was rejected")]
    UserRejected,

    /// User declined to sign the transaction
    #[error("Signing request was rejected")]
    SigningRejected,

    /// Extension reported an unexpected failure during enable/key retrieval
    #[error("Wallet connection error: {0}")]
    Connection(String),

    /// Transport failure talking to the LCD or RPC endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed response from an external endpoint
    #[error("Parse error: {0}")]
    Parse(String),

    /// Chain rejected the signed transaction
    #[error("Broadcast error: {0}")]
    Broadcast(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Request failed local validation before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No wallet session is active
    #[error("Wallet not connected")]
    NotConnected,

    /// Another transfer is already in flight for this session
    #[error("A transfer is already in progress")]
    TransferInFlight,
}

/// Field-level validation failures, resolved locally and never sent
/// over the network
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds { requested: String, available: String },
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WorkflowError::Timeout(err.to_string())
        } else if err.is_connect() {
            WorkflowError::Network(format!("Connection failed: {}", err))
        } else {
            WorkflowError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        WorkflowError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_to_workflow_error() {
        let err: WorkflowError = ValidationError::InvalidRecipient("bogus".to_string()).into();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn test_insufficient_funds_message_names_both_amounts() {
        let err = ValidationError::InsufficientFunds {
            requested: "3".to_string(),
            available: "2.5".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3"));
        assert!(msg.contains("2.5"));
    }
}
