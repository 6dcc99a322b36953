// =============================================================================
// Signal Aggregator — Deduplicated, time-ordered signal store
// =============================================================================
//
// The one shared-state component: strategies for many symbol/period pairs can
// run in parallel and push their signals here. Deduplication keys on
// `(symbol, period, kind, time, price)` with the price compared by exact bit
// pattern — batch recomputation is bit-identical, so re-inserting the same
// analysis never duplicates a record.
//
// Lock discipline: short critical sections only, never held across any
// computation.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::period::Period;
use crate::types::{Signal, SignalKind};

/// A signal paired with the symbol and timeframe it was detected on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub period: Period,
    pub signal: Signal,
}

impl std::fmt::Display for SignalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.period, self.signal)
    }
}

/// Identity of a signal for deduplication purposes.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct SignalKey {
    symbol: String,
    period: Period,
    kind: SignalKind,
    time: i64,
    price_bits: u64,
}

impl SignalKey {
    fn new(symbol: &str, period: Period, signal: &Signal) -> Self {
        Self {
            symbol: symbol.to_string(),
            period,
            kind: signal.kind,
            time: signal.time,
            price_bits: signal.price.to_bits(),
        }
    }
}

/// Thread-safe collector for divergence signals across strategies, periods,
/// and symbols.
#[derive(Default)]
pub struct SignalAggregator {
    records: RwLock<HashMap<SignalKey, SignalRecord>>,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one signal. Returns `false` when an identical signal (same
    /// symbol, period, kind, time, and price) is already present.
    pub fn insert(&self, symbol: &str, period: Period, signal: &Signal) -> bool {
        let key = SignalKey::new(symbol, period, signal);
        let mut records = self.records.write();
        if records.contains_key(&key) {
            return false;
        }
        records.insert(
            key,
            SignalRecord {
                symbol: symbol.to_string(),
                period,
                signal: signal.clone(),
            },
        );
        true
    }

    /// Record a batch of signals; returns how many were new.
    pub fn insert_batch(&self, symbol: &str, period: Period, signals: &[Signal]) -> usize {
        let new_count = signals
            .iter()
            .filter(|s| self.insert(symbol, period, s))
            .count();
        debug!(
            symbol,
            period = %period,
            total = signals.len(),
            new = new_count,
            "signal batch recorded"
        );
        new_count
    }

    /// All records, newest first. Ties on time break by symbol, period, and
    /// kind (ascending), then price, so repeated snapshots of the same
    /// content are identical.
    pub fn snapshot(&self) -> Vec<SignalRecord> {
        let mut out: Vec<SignalRecord> = self.records.read().values().cloned().collect();
        out.sort_by(|a, b| {
            b.signal
                .time
                .cmp(&a.signal.time)
                .then_with(|| a.symbol.cmp(&b.symbol))
                .then_with(|| a.period.cmp(&b.period))
                .then_with(|| a.signal.kind.cmp(&b.signal.kind))
                .then_with(|| a.signal.price.total_cmp(&b.signal.price))
        });
        out
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}
