//! Core types for the wallet ledger
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money)
//! - Stable wire shape (serde, camelCase field names)
//! - Immutable audit records (transactions never change after creation)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wallet identifier (opaque, caller-supplied, unique per ledger)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletId(String);

impl WalletId {
    /// Create new wallet ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty (rejected by wallet creation)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WalletId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// ISO 4217 currency code
///
/// The ledger currently supports a single currency. The enum stays
/// `non_exhaustive` so adding currencies later is not a breaking change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Currency {
    /// US Dollar
    #[default]
    USD,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Parse from string, rejecting unsupported codes
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A balance-holding account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Caller-supplied identifier, immutable after creation
    pub id: WalletId,

    /// Currency, fixed at creation
    pub currency: Currency,

    /// Current balance (invariant: never negative)
    pub balance: Decimal,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last balance mutation
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet with zero balance
    pub fn new(id: WalletId, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id,
            currency,
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kind of balance-changing event a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// External funds credited to a wallet
    Fund,
    /// Debit leg of a transfer
    TransferOut,
    /// Credit leg of a transfer
    TransferIn,
}

/// Immutable audit record of a balance-changing event
///
/// Transactions are append-only per wallet; history order is insertion
/// order. The id is a UUIDv7 (time-ordered with a random suffix) and is an
/// audit identifier only — idempotency is driven by caller-supplied keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Audit identifier (UUIDv7)
    pub id: Uuid,

    /// Wallet this record belongs to
    pub wallet_id: WalletId,

    /// Kind of event
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Amount moved (always positive)
    pub amount: Decimal,

    /// Counterparty wallet, set only for transfer legs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_wallet_id: Option<WalletId>,

    /// When the event was applied
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Record a funding event
    pub fn fund(wallet_id: WalletId, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            wallet_id,
            tx_type: TransactionType::Fund,
            amount,
            related_wallet_id: None,
            timestamp,
        }
    }

    /// Record the debit leg of a transfer
    pub fn transfer_out(
        wallet_id: WalletId,
        counterparty: WalletId,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            wallet_id,
            tx_type: TransactionType::TransferOut,
            amount,
            related_wallet_id: Some(counterparty),
            timestamp,
        }
    }

    /// Record the credit leg of a transfer
    pub fn transfer_in(
        wallet_id: WalletId,
        counterparty: WalletId,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            wallet_id,
            tx_type: TransactionType::TransferIn,
            amount,
            related_wallet_id: Some(counterparty),
            timestamp,
        }
    }
}

/// Wallet snapshot plus full transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDetails {
    /// Current wallet snapshot
    pub wallet: Wallet,

    /// Full history in insertion order
    pub transactions: Vec<Transaction>,
}

/// Both post-transfer wallet snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    /// Source wallet after the debit
    pub from_wallet: Wallet,

    /// Destination wallet after the credit
    pub to_wallet: Wallet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_str("EUR"), None);
        assert_eq!(Currency::from_str("usd"), None);
    }

    #[test]
    fn test_new_wallet_starts_empty() {
        let wallet = Wallet::new(WalletId::new("alice"), Currency::USD);
        assert_eq!(wallet.balance, Decimal::ZERO);
        assert_eq!(wallet.created_at, wallet.updated_at);
    }

    #[test]
    fn test_transaction_wire_shape() {
        let tx = Transaction::transfer_out(
            WalletId::new("alice"),
            WalletId::new("bob"),
            Decimal::new(5000, 2),
            Utc::now(),
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "TRANSFER_OUT");
        assert_eq!(json["walletId"], "alice");
        assert_eq!(json["relatedWalletId"], "bob");
    }

    #[test]
    fn test_fund_transaction_omits_counterparty() {
        let tx = Transaction::fund(WalletId::new("alice"), Decimal::ONE, Utc::now());
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "FUND");
        assert!(json.get("relatedWalletId").is_none());
    }

    #[test]
    fn test_wallet_ids_order_lexicographically() {
        // Transfer locks both wallets in ascending id order
        assert!(WalletId::new("alice") < WalletId::new("bob"));
    }
}
