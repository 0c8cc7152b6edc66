//! Listener counters

use std::sync::atomic::{AtomicU64, Ordering};

use avosc_core::DropReason;

/// Live counters, updated by the receive loop
#[derive(Debug, Default)]
pub struct ListenerStats {
    datagrams_received: AtomicU64,
    receive_errors: AtomicU64,
    built_in_updates: AtomicU64,
    dynamic_created: AtomicU64,
    dynamic_updates: AtomicU64,
    bundles_ignored: AtomicU64,
    empty_ignored: AtomicU64,
    dropped_malformed: AtomicU64,
    dropped_unsupported: AtomicU64,
    dropped_type_mismatch: AtomicU64,
}

/// Point-in-time copy of [`ListenerStats`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub datagrams_received: u64,
    pub receive_errors: u64,
    pub built_in_updates: u64,
    pub dynamic_created: u64,
    pub dynamic_updates: u64,
    pub bundles_ignored: u64,
    pub empty_ignored: u64,
    pub dropped_malformed: u64,
    pub dropped_unsupported: u64,
    pub dropped_type_mismatch: u64,
}

impl StatsSnapshot {
    /// Messages that changed the store
    pub fn messages_applied(&self) -> u64 {
        self.built_in_updates + self.dynamic_updates
    }

    pub fn messages_dropped(&self) -> u64 {
        self.dropped_malformed + self.dropped_unsupported + self.dropped_type_mismatch
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl ListenerStats {
    pub fn new() -> Self {
        ListenerStats::default()
    }

    pub fn record_datagram(&self) {
        bump(&self.datagrams_received);
    }

    pub fn record_receive_error(&self) {
        bump(&self.receive_errors);
    }

    pub fn record_built_in_update(&self) {
        bump(&self.built_in_updates);
    }

    pub fn record_dynamic_created(&self) {
        bump(&self.dynamic_created);
    }

    pub fn record_dynamic_update(&self) {
        bump(&self.dynamic_updates);
    }

    pub fn record_bundle_ignored(&self) {
        bump(&self.bundles_ignored);
    }

    pub fn record_empty_ignored(&self) {
        bump(&self.empty_ignored);
    }

    pub fn record_drop(&self, reason: DropReason) {
        match reason {
            DropReason::MalformedMessage => bump(&self.dropped_malformed),
            DropReason::UnsupportedType => bump(&self.dropped_unsupported),
            DropReason::TypeMismatch => bump(&self.dropped_type_mismatch),
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        StatsSnapshot {
            datagrams_received: load(&self.datagrams_received),
            receive_errors: load(&self.receive_errors),
            built_in_updates: load(&self.built_in_updates),
            dynamic_created: load(&self.dynamic_created),
            dynamic_updates: load(&self.dynamic_updates),
            bundles_ignored: load(&self.bundles_ignored),
            empty_ignored: load(&self.empty_ignored),
            dropped_malformed: load(&self.dropped_malformed),
            dropped_unsupported: load(&self.dropped_unsupported),
            dropped_type_mismatch: load(&self.dropped_type_mismatch),
        }
    }
}
