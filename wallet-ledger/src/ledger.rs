//! Main ledger: wallets, histories, and the four core operations
//!
//! All state lives in memory and is owned by a [`Ledger`] instance, so tests
//! can run any number of independent ledgers side by side.
//!
//! # Example
//!
//! ```
//! use wallet_ledger::{Config, Ledger, WalletId};
//! use rust_decimal::Decimal;
//!
//! fn main() -> wallet_ledger::Result<()> {
//!     let ledger = Ledger::new(Config::default())?;
//!
//!     ledger.create_wallet(WalletId::new("alice"), None)?;
//!     let alice = ledger.fund_wallet(&WalletId::new("alice"), Decimal::from(100), None)?;
//!     assert_eq!(alice.balance, Decimal::from(100));
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! Wallets are stored in a [`DashMap`] keyed by wallet id; each map value is
//! an `Arc<Mutex<..>>` guarding the wallet together with its transaction
//! history, so one lock covers a wallet's balance check, mutation, and
//! history append. Transfers lock both wallets in ascending id order, which
//! rules out deadlock between two opposite-direction transfers, and hold
//! both locks across the debit and credit so no reader can observe a
//! half-applied transfer.

use crate::{
    config::Config,
    error::{Error, Result},
    metrics::Metrics,
    types::{
        Currency, Transaction, TransferOutcome, Wallet, WalletDetails, WalletId,
    },
};
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;

/// A wallet and its append-only history, guarded by a single lock
struct WalletEntry {
    wallet: Wallet,
    transactions: Vec<Transaction>,
}

/// In-memory store and operation set governing wallets and their histories
pub struct Ledger {
    /// Wallets by id; entries are never removed
    wallets: DashMap<WalletId, Arc<Mutex<WalletEntry>>>,

    /// Idempotency keys already processed; grow-only
    seen_keys: DashMap<String, ()>,

    /// Currency assigned to wallets created without an explicit one
    default_currency: Currency,

    /// Operation metrics
    metrics: Metrics,
}

impl Ledger {
    /// Create an empty ledger from configuration
    pub fn new(config: Config) -> Result<Self> {
        let default_currency = Currency::from_str(&config.default_currency).ok_or_else(|| {
            Error::Config(format!(
                "Unsupported default currency: {}",
                config.default_currency
            ))
        })?;

        let metrics = Metrics::new()
            .map_err(|e| Error::Config(format!("Failed to create metrics: {}", e)))?;

        Ok(Self {
            wallets: DashMap::new(),
            seen_keys: DashMap::new(),
            default_currency,
            metrics,
        })
    }

    /// Register a new wallet with zero balance and an empty history
    ///
    /// The existence check and the insert are a single atomic step, so two
    /// concurrent creates for the same id cannot both succeed.
    pub fn create_wallet(&self, id: WalletId, currency: Option<Currency>) -> Result<Wallet> {
        if id.is_empty() {
            return Err(Error::InvalidWalletId);
        }

        let currency = currency.unwrap_or(self.default_currency);

        match self.wallets.entry(id.clone()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                let wallet = Wallet::new(id, currency);
                slot.insert(Arc::new(Mutex::new(WalletEntry {
                    wallet: wallet.clone(),
                    transactions: Vec::new(),
                })));

                tracing::info!(wallet = %wallet.id, %currency, "created wallet");
                self.metrics.record_wallet_created();
                Ok(wallet)
            }
        }
    }

    /// Credit a wallet with external funds
    ///
    /// Check order is observable through the returned error and must not be
    /// rearranged: duplicate key, then unknown wallet, then amount. The key
    /// is recorded before the balance mutation so a replayed request stays
    /// rejected even if a later, unrelated failure were introduced.
    pub fn fund_wallet(
        &self,
        wallet_id: &WalletId,
        amount: Decimal,
        idempotency_key: Option<&str>,
    ) -> Result<Wallet> {
        let started = Instant::now();
        self.probe_idempotency_key(idempotency_key)?;

        let entry = self.wallet_entry(wallet_id)?;
        let mut guard = entry.lock();

        // Amount positivity is validated upstream; re-checked here as a
        // boundary invariant.
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }

        self.record_idempotency_key(idempotency_key)?;

        let now = Utc::now();
        guard.wallet.balance += amount;
        guard.wallet.updated_at = now;
        let tx = Transaction::fund(wallet_id.clone(), amount, now);
        guard.transactions.push(tx);

        let snapshot = guard.wallet.clone();
        drop(guard);

        tracing::info!(wallet = %wallet_id, %amount, balance = %snapshot.balance, "funded wallet");
        self.metrics.record_fund();
        self.metrics
            .record_op_duration(started.elapsed().as_secs_f64());
        Ok(snapshot)
    }

    /// Move funds between two wallets atomically
    ///
    /// Both balance mutations and both history appends happen while both
    /// wallet locks are held; the two transfer legs share one timestamp and
    /// reference each other through `related_wallet_id`.
    pub fn transfer(
        &self,
        from: &WalletId,
        to: &WalletId,
        amount: Decimal,
        idempotency_key: Option<&str>,
    ) -> Result<TransferOutcome> {
        let started = Instant::now();
        self.probe_idempotency_key(idempotency_key)?;

        if from == to {
            return Err(Error::InvalidTransfer(
                "Cannot transfer to the same wallet".to_string(),
            ));
        }

        let from_entry = self.wallet_entry(from)?;
        let to_entry = self.wallet_entry(to)?;

        // Fixed global lock order (ascending wallet id) prevents deadlock
        // between two concurrent opposite-direction transfers.
        let (mut from_guard, mut to_guard) = if from < to {
            let f = from_entry.lock();
            let t = to_entry.lock();
            (f, t)
        } else {
            let t = to_entry.lock();
            let f = from_entry.lock();
            (f, t)
        };

        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }

        if from_guard.wallet.balance < amount {
            return Err(Error::InsufficientBalance {
                balance: from_guard.wallet.balance,
                required: amount,
            });
        }

        self.record_idempotency_key(idempotency_key)?;

        let now = Utc::now();
        from_guard.wallet.balance -= amount;
        from_guard.wallet.updated_at = now;
        to_guard.wallet.balance += amount;
        to_guard.wallet.updated_at = now;

        let out = Transaction::transfer_out(from.clone(), to.clone(), amount, now);
        let incoming = Transaction::transfer_in(to.clone(), from.clone(), amount, now);
        from_guard.transactions.push(out);
        to_guard.transactions.push(incoming);

        let outcome = TransferOutcome {
            from_wallet: from_guard.wallet.clone(),
            to_wallet: to_guard.wallet.clone(),
        };
        drop(from_guard);
        drop(to_guard);

        tracing::info!(%from, %to, %amount, "transferred funds");
        self.metrics.record_transfer();
        self.metrics
            .record_op_duration(started.elapsed().as_secs_f64());
        Ok(outcome)
    }

    /// Get a wallet snapshot
    pub fn wallet(&self, wallet_id: &WalletId) -> Result<Wallet> {
        let entry = self.wallet_entry(wallet_id)?;
        let guard = entry.lock();
        Ok(guard.wallet.clone())
    }

    /// Get a wallet's transaction history in insertion order
    pub fn wallet_transactions(&self, wallet_id: &WalletId) -> Result<Vec<Transaction>> {
        let entry = self.wallet_entry(wallet_id)?;
        let guard = entry.lock();
        Ok(guard.transactions.clone())
    }

    /// Get a wallet snapshot plus its full history
    pub fn wallet_details(&self, wallet_id: &WalletId) -> Result<WalletDetails> {
        let entry = self.wallet_entry(wallet_id)?;
        let guard = entry.lock();
        tracing::debug!(wallet = %wallet_id, transactions = guard.transactions.len(), "read wallet details");
        Ok(WalletDetails {
            wallet: guard.wallet.clone(),
            transactions: guard.transactions.clone(),
        })
    }

    /// Number of registered wallets
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Operation metrics for scraping
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Resolve a wallet id to its locked entry
    fn wallet_entry(&self, wallet_id: &WalletId) -> Result<Arc<Mutex<WalletEntry>>> {
        self.wallets
            .get(wallet_id)
            .map(|slot| Arc::clone(slot.value()))
            .ok_or_else(|| Error::NotFound(wallet_id.clone()))
    }

    /// First-stage duplicate check, done before any other validation so a
    /// replayed request reports `DuplicateOperation` rather than whatever
    /// else may be wrong with it
    fn probe_idempotency_key(&self, idempotency_key: Option<&str>) -> Result<()> {
        if let Some(key) = idempotency_key {
            if self.seen_keys.contains_key(key) {
                self.metrics.record_duplicate_rejected();
                return Err(Error::DuplicateOperation(key.to_string()));
            }
        }
        Ok(())
    }

    /// Record the key after validation, before mutation
    ///
    /// The insert is atomic; if another call with the same key won the race
    /// between the probe and this point, this call backs out before touching
    /// any balance.
    fn record_idempotency_key(&self, idempotency_key: Option<&str>) -> Result<()> {
        if let Some(key) = idempotency_key {
            if self.seen_keys.insert(key.to_string(), ()).is_some() {
                self.metrics.record_duplicate_rejected();
                return Err(Error::DuplicateOperation(key.to_string()));
            }
        }
        Ok(())
    }
}
