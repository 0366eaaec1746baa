//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the ledger.
//!
//! # Metrics
//!
//! - `ledger_wallets_created_total` - Total number of wallets created
//! - `ledger_funds_total` - Total number of funding operations applied
//! - `ledger_transfers_total` - Total number of transfers applied
//! - `ledger_duplicates_rejected_total` - Operations rejected as idempotency replays
//! - `ledger_op_duration_seconds` - Histogram of mutation latencies

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Each ledger instance carries its own registry, so independent ledgers
/// (e.g. in tests) never collide on metric names.
#[derive(Clone)]
pub struct Metrics {
    /// Total wallets created
    pub wallets_created_total: IntCounter,

    /// Total funding operations applied
    pub funds_total: IntCounter,

    /// Total transfers applied
    pub transfers_total: IntCounter,

    /// Operations rejected because their idempotency key was already seen
    pub duplicates_rejected_total: IntCounter,

    /// Mutation latency histogram
    pub op_duration: Histogram,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let wallets_created_total = IntCounter::with_opts(Opts::new(
            "ledger_wallets_created_total",
            "Total number of wallets created",
        ))?;
        registry.register(Box::new(wallets_created_total.clone()))?;

        let funds_total = IntCounter::with_opts(Opts::new(
            "ledger_funds_total",
            "Total number of funding operations applied",
        ))?;
        registry.register(Box::new(funds_total.clone()))?;

        let transfers_total = IntCounter::with_opts(Opts::new(
            "ledger_transfers_total",
            "Total number of transfers applied",
        ))?;
        registry.register(Box::new(transfers_total.clone()))?;

        let duplicates_rejected_total = IntCounter::with_opts(Opts::new(
            "ledger_duplicates_rejected_total",
            "Operations rejected as idempotency replays",
        ))?;
        registry.register(Box::new(duplicates_rejected_total.clone()))?;

        let op_duration = Histogram::with_opts(
            HistogramOpts::new(
                "ledger_op_duration_seconds",
                "Histogram of mutation latencies",
            )
            .buckets(vec![
                0.000_001, 0.000_01, 0.000_1, 0.001, 0.005, 0.010, 0.050, 0.100,
            ]),
        )?;
        registry.register(Box::new(op_duration.clone()))?;

        Ok(Self {
            wallets_created_total,
            funds_total,
            transfers_total,
            duplicates_rejected_total,
            op_duration,
            registry,
        })
    }

    /// Record wallet creation
    pub fn record_wallet_created(&self) {
        self.wallets_created_total.inc();
    }

    /// Record an applied funding operation
    pub fn record_fund(&self) {
        self.funds_total.inc();
    }

    /// Record an applied transfer
    pub fn record_transfer(&self) {
        self.transfers_total.inc();
    }

    /// Record an idempotency replay rejection
    pub fn record_duplicate_rejected(&self) {
        self.duplicates_rejected_total.inc();
    }

    /// Record a mutation latency
    pub fn record_op_duration(&self, duration_seconds: f64) {
        self.op_duration.observe(duration_seconds);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
