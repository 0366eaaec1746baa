//! Wallet Ledger Core
//!
//! In-memory ledger tracking named wallets, their balances, and an
//! append-only transaction history per wallet.
//!
//! # Architecture
//!
//! - **Single owner**: all state belongs to a [`Ledger`] instance; no globals
//! - **Validate then mutate**: every check that can fail runs before any
//!   state change, so no error leaves the ledger partially mutated
//! - **Fine-grained locking**: per-wallet locks, acquired in ascending id
//!   order for transfers
//! - **Idempotency**: caller-supplied keys deduplicate retried mutations
//!
//! # Invariants
//!
//! - Wallet balances never go negative
//! - Transfers conserve the total balance across both wallets
//! - Transactions are append-only and never modified or deleted
//! - A replayed idempotency key is rejected without side effects

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use metrics::Metrics;
pub use types::{
    Currency, Transaction, TransactionType, TransferOutcome, Wallet, WalletDetails, WalletId,
};
