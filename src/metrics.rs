use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use serde::Serialize;

/// Process-wide planning counters. Cloning shares the same counters.
#[derive(Clone, Default, Debug)]
pub struct Metrics {
    /// Plans served, including fallback plans
    pub plans_generated: Arc<AtomicU64>,
    /// Tasks produced by the engine (fallbacks excluded)
    pub tasks_emitted: Arc<AtomicU64>,
    /// Plans answered with a caller-side fallback task
    pub fallbacks_used: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub plans_generated: u64,
    pub tasks_emitted: u64,
    pub fallbacks_used: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan(&self, task_count: usize) {
        self.plans_generated.fetch_add(1, Ordering::Relaxed);
        self.tasks_emitted.fetch_add(task_count as u64, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks_used.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            plans_generated: self.plans_generated.load(Ordering::Relaxed),
            tasks_emitted: self.tasks_emitted.load(Ordering::Relaxed),
            fallbacks_used: self.fallbacks_used.load(Ordering::Relaxed),
        }
    }
}
