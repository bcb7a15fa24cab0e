use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Counter of documents the backend acknowledged.
pub const FILES_INDEXED: &str = "FILES[INDEXED]";
/// Counter of documents that failed to index (or to parse, in skip
/// mode).
pub const FILES_FAILED: &str = "FILES[FAILED]";

/// Metrics capability injected into the pass.
///
/// The core only increments; exposing or resetting counters is the
/// host's business. Increments must be safe under concurrent passes.
pub trait MetricsSink: Send + Sync {
    fn increment(&self, name: &str, amount: u64);
}

/// Thread-safe named counters, monotonically increasing.
#[derive(Debug, Default)]
pub struct CounterRegistry {
    counters: RwLock<HashMap<String, AtomicU64>>,
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, name: &str) -> u64 {
        self.counters
            .read()
            .expect("counter lock poisoned")
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// All counters, sorted by name, for the host's summary output.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counters
            .read()
            .expect("counter lock poisoned")
            .iter()
            .map(|(name, c)| (name.clone(), c.load(Ordering::Relaxed)))
            .collect();
        entries.sort();
        entries
    }
}

impl MetricsSink for CounterRegistry {
    fn increment(&self, name: &str, amount: u64) {
        {
            let counters = self.counters.read().expect("counter lock poisoned");
            if let Some(counter) = counters.get(name) {
                counter.fetch_add(amount, Ordering::Relaxed);
                return;
            }
        }
        let mut counters = self.counters.write().expect("counter lock poisoned");
        counters
            .entry(name.to_string())
            .or_default()
            .fetch_add(amount, Ordering::Relaxed);
    }
}
