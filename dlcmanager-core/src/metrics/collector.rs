//! Local grant tallies

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of [`GrantCollector`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrantSnapshot {
    pub players_reconciled: u64,
    pub blueprints_granted: u64,
    pub resets: u64,
    pub gateway_failures: u64,
}

#[derive(Debug, Default)]
pub struct GrantCollector {
    players_reconciled: AtomicU64,
    blueprints_granted: AtomicU64,
    resets: AtomicU64,
    gateway_failures: AtomicU64,
}

impl GrantCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reconcile(&self, added: usize) {
        self.players_reconciled.fetch_add(1, Ordering::Relaxed);
        self.blueprints_granted.fetch_add(added as u64, Ordering::Relaxed);
        super::record_counter(super::PLAYERS_RECONCILED, 1);
        super::record_counter(super::BLUEPRINTS_GRANTED, added as u64);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
        super::record_counter(super::RESETS, 1);
    }

    pub fn record_failure(&self) {
        self.gateway_failures.fetch_add(1, Ordering::Relaxed);
        super::record_counter(super::GATEWAY_FAILURES, 1);
    }

    pub fn snapshot(&self) -> GrantSnapshot {
        GrantSnapshot {
            players_reconciled: self.players_reconciled.load(Ordering::Relaxed),
            blueprints_granted: self.blueprints_granted.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            gateway_failures: self.gateway_failures.load(Ordering::Relaxed),
        }
    }
}
