//! Error types for the wallet ledger

use crate::types::WalletId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
///
/// Every error is terminal for the triggering call: the ledger never retries
/// internally and never leaves state partially mutated. Callers that retry a
/// fund or transfer should reuse the same idempotency key.
#[derive(Error, Debug)]
pub enum Error {
    /// Wallet id collision on create
    #[error("Wallet with id {0} already exists")]
    AlreadyExists(WalletId),

    /// Operation references an unknown wallet id
    #[error("Wallet with id {0} not found")]
    NotFound(WalletId),

    /// Transfer source lacks funds
    #[error("Insufficient balance. Current balance: {balance}, Required: {required}")]
    InsufficientBalance {
        /// Source balance at the time of the check
        balance: Decimal,
        /// Amount the transfer asked for
        required: Decimal,
    },

    /// Structurally invalid transfer request (e.g. self-transfer)
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    /// Idempotency key already seen
    #[error("This operation has already been processed (duplicate idempotency key {0})")]
    DuplicateOperation(String),

    /// Empty wallet id on create
    #[error("Wallet id must not be empty")]
    InvalidWalletId,

    /// Non-positive amount reached the core boundary
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status a transport adapter should map this error to
    ///
    /// Mirrors the service's wire contract: unknown wallet is 404, conflicts
    /// (id collision, replayed idempotency key) are 409, everything else the
    /// caller got wrong is 400. Internal kinds map to 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::AlreadyExists(_) | Error::DuplicateOperation(_) => 409,
            Error::InsufficientBalance { .. }
            | Error::InvalidTransfer(_)
            | Error::InvalidWalletId
            | Error::InvalidAmount(_) => 400,
            Error::Config(_) | Error::Io(_) => 500,
        }
    }
}
